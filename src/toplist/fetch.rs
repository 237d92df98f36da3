// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::error::FetchError;
use crate::http::{CacheDirective, HttpClient};

/// Number of entries requested from the catalog, independent of the caller's limit
pub const NUM_LOADED: usize = 25;

/// How stale a cached toplist may be before it must be refetched
pub const TOPLIST_MAX_STALE: Duration = Duration::from_secs(24 * 60 * 60);

const STATUS_NO_DATA_FOR_REGION: u16 = 400;

/// Build the iTunes top-podcasts URL for a region
pub fn toplist_url(country: &str) -> Result<Url, FetchError> {
    let url = format!(
        "https://itunes.apple.com/{}/rss/toppodcasts/limit={NUM_LOADED}/explicit=true/json",
        country.to_ascii_lowercase()
    );
    Ok(Url::parse(&url)?)
}

/// Fetch the raw toplist body for a region
pub async fn fetch_toplist_body<C: HttpClient>(client: &C, country: &str) -> Result<Bytes, FetchError> {
    let url = toplist_url(country)?;
    fetch_toplist_from(client, &url, country).await
}

/// Fetch the raw toplist body from an already built toplist URL
pub async fn fetch_toplist_from<C: HttpClient>(
    client: &C,
    url: &Url,
    country: &str,
) -> Result<Bytes, FetchError> {
    let response = client
        .get(url.as_str(), CacheDirective::MaxStale(TOPLIST_MAX_STALE))
        .await
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    if response.is_success() {
        return Ok(response.body);
    }

    if response.status == STATUS_NO_DATA_FOR_REGION {
        return Err(FetchError::NoDataForRegion {
            country: country.to_string(),
        });
    }

    Err(FetchError::Rejected {
        url: url.to_string(),
        status: response.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::ScriptedClient;

    #[test]
    fn toplist_url_uses_template() {
        let url = toplist_url("DE").unwrap();
        assert_eq!(
            url.as_str(),
            "https://itunes.apple.com/de/rss/toppodcasts/limit=25/explicit=true/json"
        );
    }

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let client = ScriptedClient::new().respond(200, r#"{"feed":{}}"#);
        let body = fetch_toplist_body(&client, "US").await.unwrap();
        assert_eq!(&body[..], br#"{"feed":{}}"#);
    }

    #[tokio::test]
    async fn fetch_sends_one_day_max_stale() {
        let client = ScriptedClient::new().respond(200, "{}");
        fetch_toplist_body(&client, "US").await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].1.header_value(),
            Some("max-stale=86400".to_string())
        );
    }

    #[tokio::test]
    async fn fetch_maps_400_to_no_data_for_region() {
        let client = ScriptedClient::new().respond(400, "");
        let err = fetch_toplist_body(&client, "XK").await.unwrap_err();
        assert!(matches!(err, FetchError::NoDataForRegion { ref country } if country == "XK"));
        assert!(err.to_string().contains("does not have data"));
    }

    #[tokio::test]
    async fn fetch_maps_other_status_to_rejected() {
        let client = ScriptedClient::new().respond(503, "busy");
        let err = fetch_toplist_body(&client, "US").await.unwrap_err();
        assert!(matches!(err, FetchError::Rejected { status: 503, .. }));
    }

    #[tokio::test]
    async fn fetch_maps_transport_failure() {
        let client = ScriptedClient::new().fail("dns lookup failed");
        let err = fetch_toplist_body(&client, "US").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.to_string().contains("dns lookup failed"));
    }
}
