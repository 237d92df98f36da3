// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SubscriptionError;

/// A feed the user is already subscribed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribedFeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl SubscribedFeed {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}

/// Read the subscribed feed list from a JSON array file.
///
/// Unknown fields are ignored, so exports carrying more metadata per feed
/// can be used directly.
pub fn read_subscriptions(path: &Path) -> Result<Vec<SubscribedFeed>, SubscriptionError> {
    let content = std::fs::read_to_string(path).map_err(|e| SubscriptionError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| SubscriptionError::JsonParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
