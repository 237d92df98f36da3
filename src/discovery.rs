// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::country::{CountryCode, device_default_region};
use crate::http::HttpClient;
use crate::preferences::DiscoveryPreferences;
use crate::progress::SharedProgressReporter;
use crate::subscriptions::SubscribedFeed;
use crate::toplist::{SearchResult, ToplistOptions, load_toplist};

/// Number of suggestions shown in the quick discovery grid
pub const NUM_SUGGESTIONS: usize = 12;

/// Options for a discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Overrides the persisted country for this run only
    pub country_override: Option<CountryCode>,
    /// Maximum number of suggestions
    pub limit: usize,
    /// Region tried first when no country is set
    pub default_region: String,
    /// Refuse to contact the catalog until the user has confirmed
    pub require_confirmation: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            country_override: None,
            limit: NUM_SUGGESTIONS,
            default_region: device_default_region(),
            require_confirmation: true,
        }
    }
}

/// What the discovery view should show after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Discovery is switched off; nothing was fetched
    Hidden,
    /// The user must confirm before the catalog is contacted
    NeedsConfirmation,
    /// Suggestions to display, in ranked order
    Loaded(Vec<SearchResult>),
    /// The catalog answered but nothing is left after filtering
    NoResults,
    /// Loading failed; `message` is meant to be shown verbatim
    Failed {
        message: String,
        no_data_for_region: bool,
    },
}

/// Evaluate preferences and, if allowed, load suggestions
pub async fn discover<C: HttpClient>(
    client: &C,
    preferences: &DiscoveryPreferences,
    options: &DiscoveryOptions,
    subscribed: &[SubscribedFeed],
    reporter: &SharedProgressReporter,
) -> DiscoveryOutcome {
    if preferences.hidden {
        return DiscoveryOutcome::Hidden;
    }

    if options.require_confirmation && preferences.needs_confirm {
        return DiscoveryOutcome::NeedsConfirmation;
    }

    let toplist_options = ToplistOptions {
        country: options
            .country_override
            .clone()
            .unwrap_or_else(|| preferences.country_code.clone()),
        limit: options.limit,
        default_region: options.default_region.clone(),
    };

    match load_toplist(client, &toplist_options, subscribed, reporter).await {
        Ok(results) if results.is_empty() => DiscoveryOutcome::NoResults,
        Ok(results) => DiscoveryOutcome::Loaded(results),
        Err(err) => DiscoveryOutcome::Failed {
            message: err.to_string(),
            no_data_for_region: err.is_no_data_for_region(),
        },
    }
}
