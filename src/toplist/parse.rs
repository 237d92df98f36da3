// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const LOOKUP_URL_PREFIX: &str = "https://itunes.apple.com/lookup?id=";

/// Smallest artwork edge (in pixels) worth showing in a grid cell
const MIN_IMAGE_HEIGHT: u32 = 100;

/// A single podcast suggestion from the toplist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Url>,
}

impl SearchResult {
    /// Create a result with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            feed_url: None,
            image_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Label {
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    label: String,
    #[serde(default)]
    attributes: Option<ImageAttributes>,
}

#[derive(Debug, Deserialize)]
struct ImageAttributes {
    #[serde(default)]
    height: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    attributes: LinkAttributes,
}

#[derive(Debug, Deserialize)]
struct LinkAttributes {
    #[serde(default)]
    rel: Option<String>,
    href: String,
}

#[derive(Debug, Deserialize)]
struct RawId {
    #[serde(default)]
    attributes: Option<IdAttributes>,
}

#[derive(Debug, Deserialize)]
struct IdAttributes {
    #[serde(rename = "im:id", default)]
    itunes_id: Option<String>,
}

/// Read one member of an entry; a malformed member counts as absent
fn member<'a, T: Deserialize<'a>>(entry: &'a Value, key: &str) -> Option<T> {
    entry.get(key).and_then(|value| T::deserialize(value).ok())
}

/// Read a member that may be a single object or an array of them.
///
/// Malformed elements are skipped, the rest are kept in order.
fn members<'a, T: Deserialize<'a>>(entry: &'a Value, key: &str) -> Vec<T> {
    match entry.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        Some(item @ Value::Object(_)) => T::deserialize(item).ok().into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Parse an iTunes toplist JSON body into ranked search results.
///
/// Never fails: a body that is not JSON, or lacks `feed.entry`, yields no
/// results. Every element of `feed.entry` yields exactly one result, in
/// source order.
pub fn parse_toplist(body: &[u8]) -> Vec<SearchResult> {
    let Ok(root) = serde_json::from_slice::<Value>(body) else {
        return Vec::new();
    };

    let entries = match root.get("feed").and_then(|feed| feed.get("entry")) {
        Some(Value::Array(entries)) => entries.as_slice(),
        // A single-entry toplist is serialized as a bare object
        Some(entry @ Value::Object(_)) => std::slice::from_ref(entry),
        _ => return Vec::new(),
    };

    entries.iter().map(search_result_from_entry).collect()
}

fn search_result_from_entry(entry: &Value) -> SearchResult {
    let title = member::<Label>(entry, "title")
        .or_else(|| member::<Label>(entry, "im:name"))
        .map(|label| decode_label(&label.label))
        .unwrap_or_default();

    let author = member::<Label>(entry, "im:artist")
        .map(|label| decode_label(&label.label))
        .filter(|s| !s.is_empty());

    let feed_url = member::<RawId>(entry, "id")
        .and_then(|id| id.attributes)
        .and_then(|attrs| attrs.itunes_id)
        .and_then(|itunes_id| Url::parse(&format!("{LOOKUP_URL_PREFIX}{itunes_id}")).ok())
        .or_else(|| {
            select_link(members::<RawLink>(entry, "link")).and_then(|href| Url::parse(&href).ok())
        });

    SearchResult {
        title,
        author,
        feed_url,
        image_url: select_image(&members::<RawImage>(entry, "im:image")),
    }
}

/// Prefer the `alternate` link, otherwise take the first one
fn select_link(links: Vec<RawLink>) -> Option<String> {
    let alternate = links
        .iter()
        .position(|link| link.attributes.rel.as_deref() == Some("alternate"));
    links
        .into_iter()
        .nth(alternate.unwrap_or(0))
        .map(|link| link.attributes.href)
}

/// First image at least [`MIN_IMAGE_HEIGHT`] tall, otherwise the last one
fn select_image(images: &[RawImage]) -> Option<Url> {
    images
        .iter()
        .find(|image| {
            image
                .attributes
                .as_ref()
                .and_then(|attrs| attrs.height.as_deref())
                .and_then(|height| height.parse::<u32>().ok())
                .is_some_and(|height| height >= MIN_IMAGE_HEIGHT)
        })
        .or_else(|| images.last())
        .and_then(|image| Url::parse(&image.label).ok())
}

fn decode_label(label: &str) -> String {
    html_escape::decode_html_entities(label).trim().to_string()
}
