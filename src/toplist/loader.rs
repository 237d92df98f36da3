// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;

use crate::country::{CountryCode, FALLBACK_REGION, device_default_region};
use crate::error::{FetchError, ToplistError};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::subscriptions::SubscribedFeed;

use super::fetch::{fetch_toplist_from, toplist_url};
use super::filter::remove_subscribed;
use super::parse::{SearchResult, parse_toplist};

/// Options for loading a toplist
#[derive(Debug, Clone)]
pub struct ToplistOptions {
    /// Requested region, or unset to use `default_region`
    pub country: CountryCode,
    /// Maximum number of suggestions to return
    pub limit: usize,
    /// Region tried first when `country` is unset
    pub default_region: String,
}

impl Default for ToplistOptions {
    fn default() -> Self {
        Self {
            country: CountryCode::Unset,
            limit: super::fetch::NUM_LOADED,
            default_region: device_default_region(),
        }
    }
}

/// Load the toplist for a region and remove already-subscribed podcasts
///
/// This is the main entry point for the library. It:
/// 1. Fetches the toplist for the requested (or default) region
/// 2. Retries once against the fallback region if the region was unset
///    and the first request failed at the transport level
/// 3. Parses the ranked entries
/// 4. Removes subscribed podcasts and truncates to the limit
pub async fn load_toplist<C: HttpClient>(
    client: &C,
    options: &ToplistOptions,
    subscribed: &[SubscribedFeed],
    reporter: &SharedProgressReporter,
) -> Result<Vec<SearchResult>, ToplistError> {
    let country = options.country.resolve(&options.default_region);

    let body = match fetch_reported(client, country, reporter).await {
        Ok(body) => body,
        Err(err @ FetchError::Transport { .. }) if options.country.is_unset() => {
            reporter.report(ProgressEvent::FallingBackToRegion {
                failed_country: country.to_string(),
                fallback_country: FALLBACK_REGION.to_string(),
                error: err.to_string(),
            });
            fetch_reported(client, FALLBACK_REGION, reporter).await?
        }
        Err(err) => return Err(err.into()),
    };

    let candidates = parse_toplist(&body);
    reporter.report(ProgressEvent::ToplistParsed {
        entries: candidates.len(),
    });

    let candidate_count = candidates.len();
    let results = remove_subscribed(candidates, subscribed, options.limit);
    reporter.report(ProgressEvent::SubscribedFiltered {
        candidates: candidate_count,
        kept: results.len(),
        limit: options.limit,
    });

    Ok(results)
}

async fn fetch_reported<C: HttpClient>(
    client: &C,
    country: &str,
    reporter: &SharedProgressReporter,
) -> Result<Bytes, FetchError> {
    let url = toplist_url(country)?;
    reporter.report(ProgressEvent::FetchingToplist {
        country: country.to_string(),
        url: url.to_string(),
    });
    fetch_toplist_from(client, &url, country).await
}
