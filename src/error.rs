// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// A request never produced an HTTP response (DNS, connect, TLS, body read)
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    /// Create a transport error without an underlying reqwest cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Errors that can occur when fetching a regional toplist
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch toplist from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("iTunes does not have data for the selected country ({country}).")]
    NoDataForRegion { country: String },

    #[error("Unexpected response from server: HTTP {status} for {url}")]
    Rejected { url: String, status: u16 },

    #[error("Invalid toplist URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors surfaced by the toplist loader
#[derive(Error, Debug)]
pub enum ToplistError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ToplistError {
    /// Whether the catalog has no toplist for the requested region.
    ///
    /// Callers offer picking another country instead of a plain retry.
    pub fn is_no_data_for_region(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::NoDataForRegion { .. }))
    }
}

/// Errors that can occur when parsing a country code
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CountryError {
    #[error("Invalid country code '{0}': expected two letters (e.g. US) or 99 for unset")]
    Invalid(String),
}

/// Errors that can occur when reading or writing discovery preferences
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to read preferences file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preferences file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preferences JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),

    #[error("Could not determine a configuration directory")]
    NoConfigDirectory,
}

/// Errors that can occur when storing responses in the on-disk cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache entry {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cache entry: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),

    #[error("Could not determine a cache directory")]
    NoCacheDirectory,
}

/// Errors that can occur when reading the subscribed feed list
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Failed to read subscriptions file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse subscriptions JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
