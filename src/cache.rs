// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CacheError, TransportError};
use crate::http::{CacheDirective, HttpClient, HttpResponse};

const CACHE_DIRNAME: &str = "podscout";

/// A successful response as stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    url: String,
    fetched_at: DateTime<Utc>,
    status: u16,
    body: String,
}

/// Default response cache location (`<cache dir>/podscout`)
pub fn default_cache_dir() -> Result<PathBuf, CacheError> {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIRNAME))
        .ok_or(CacheError::NoCacheDirectory)
}

/// HTTP client wrapper that keeps successful responses on disk.
///
/// A request carrying [`CacheDirective::MaxStale`] is answered from disk when
/// the stored response is at most that old; otherwise it goes to the wrapped
/// client and a successful answer replaces the stored one.
#[derive(Clone)]
pub struct CachingClient<C> {
    inner: C,
    dir: PathBuf,
}

impl<C: HttpClient> CachingClient<C> {
    pub fn new(inner: C, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{digest:x}.json"))
    }

    /// Stored response for `url`, if one exists and is no older than `max_stale`
    fn lookup(&self, url: &str, max_stale: Duration) -> Option<HttpResponse> {
        let content = std::fs::read_to_string(self.entry_path(url)).ok()?;
        let cached: CachedResponse = serde_json::from_str(&content).ok()?;
        if cached.url != url {
            return None;
        }

        // Timestamps from the future fail the conversion and count as a miss
        let age = Utc::now()
            .signed_duration_since(cached.fetched_at)
            .to_std()
            .ok()?;
        if age > max_stale {
            return None;
        }

        Some(HttpResponse {
            status: cached.status,
            body: Bytes::from(cached.body),
        })
    }

    /// Store a successful, UTF-8 response as fetched at `fetched_at`
    pub fn store(
        &self,
        url: &str,
        response: &HttpResponse,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        if !response.is_success() {
            return Ok(());
        }
        let Ok(body) = std::str::from_utf8(&response.body) else {
            return Ok(());
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::CreateDirectoryFailed {
            path: self.dir.clone(),
            source: e,
        })?;

        let entry = CachedResponse {
            url: url.to_string(),
            fetched_at,
            status: response.status,
            body: body.to_string(),
        };
        let json = serde_json::to_string(&entry)?;

        let path = self.entry_path(url);
        std::fs::write(&path, json).map_err(|e| CacheError::WriteFailed { path, source: e })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for CachingClient<C> {
    async fn get(&self, url: &str, cache: CacheDirective) -> Result<HttpResponse, TransportError> {
        if let CacheDirective::MaxStale(max_stale) = cache
            && let Some(hit) = self.lookup(url, max_stale)
        {
            return Ok(hit);
        }

        let response = self.inner.get(url, cache).await?;

        // An unwritable cache only costs a network request next time
        let _ = self.store(url, &response, Utc::now());

        Ok(response)
    }
}
