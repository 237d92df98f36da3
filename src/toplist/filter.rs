// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use crate::subscriptions::SubscribedFeed;

use super::parse::SearchResult;

const KEY_SEPARATOR: &str = " - ";

/// Normalized `"title - author"` key used to match suggestions against subscriptions
pub fn subscription_key(title: &str, author: &str) -> String {
    format!("{}{KEY_SEPARATOR}{}", title.trim(), author.trim())
}

/// Keys of the subscribed feeds, plus their bare titles for author-less suggestions
#[derive(Debug, Default)]
struct SubscribedIndex {
    keys: HashSet<String>,
    titles: HashSet<String>,
}

impl SubscribedIndex {
    /// Only feeds carrying both a title and an author contribute a key
    fn build(subscribed: &[SubscribedFeed]) -> Self {
        let mut index = Self::default();
        for feed in subscribed {
            if let (Some(title), Some(author)) = (&feed.title, &feed.author) {
                index.keys.insert(subscription_key(title, author));
                index.titles.insert(title.trim().to_string());
            }
        }
        index
    }

    fn contains(&self, candidate: &SearchResult) -> bool {
        let title = candidate.title.trim();

        // Toplist titles already read "Name - Artist"
        if self.keys.contains(title) {
            return true;
        }

        match &candidate.author {
            Some(author) => self.keys.contains(&subscription_key(title, author)),
            None => self.titles.contains(title),
        }
    }
}

/// Drop suggestions the user already subscribes to, keeping at most `limit`.
///
/// Ranked order is preserved; the first `limit` survivors win.
pub fn remove_subscribed(
    candidates: Vec<SearchResult>,
    subscribed: &[SubscribedFeed],
    limit: usize,
) -> Vec<SearchResult> {
    let index = SubscribedIndex::build(subscribed);

    candidates
        .into_iter()
        .filter(|candidate| !index.contains(candidate))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_author(title: &str, author: &str) -> SearchResult {
        SearchResult {
            author: Some(author.to_string()),
            ..SearchResult::titled(title)
        }
    }

    #[test]
    fn subscription_key_trims_both_parts() {
        assert_eq!(subscription_key("  Show A ", "\tAlice\n"), "Show A - Alice");
    }

    #[test]
    fn author_less_candidate_matching_subscribed_title_is_removed() {
        let subscribed = vec![SubscribedFeed::new("Show A", "Alice")];
        let candidates = vec![SearchResult::titled("Show A"), SearchResult::titled("Show B")];

        let result = remove_subscribed(candidates, &subscribed, 10);
        assert_eq!(result, vec![SearchResult::titled("Show B")]);
    }

    #[test]
    fn itunes_style_title_matches_key() {
        let subscribed = vec![SubscribedFeed::new("The Daily", " The New York Times ")];
        let candidates = vec![
            with_author("The Daily - The New York Times", "The New York Times"),
            with_author("Up First - NPR", "NPR"),
        ];

        let result = remove_subscribed(candidates, &subscribed, 10);
        assert_eq!(result, vec![with_author("Up First - NPR", "NPR")]);
    }

    #[test]
    fn candidate_title_and_author_are_combined_into_key() {
        let subscribed = vec![SubscribedFeed::new("Show A", "Alice")];
        let candidates = vec![with_author(" Show A ", "Alice"), with_author("Show A", "Bob")];

        let result = remove_subscribed(candidates, &subscribed, 10);
        assert_eq!(result, vec![with_author("Show A", "Bob")]);
    }

    #[test]
    fn subscriptions_without_author_never_match() {
        let subscribed = vec![
            SubscribedFeed {
                title: Some("Show A".to_string()),
                author: None,
            },
            SubscribedFeed {
                title: None,
                author: Some("Alice".to_string()),
            },
        ];
        let candidates = vec![SearchResult::titled("Show A"), with_author("Show A", "Alice")];

        let result = remove_subscribed(candidates.clone(), &subscribed, 10);
        assert_eq!(result, candidates);
    }

    #[test]
    fn truncates_to_limit_in_ranked_order() {
        let subscribed = vec![SubscribedFeed::new("Two", "X")];
        let candidates: Vec<_> = ["One", "Two", "Three", "Four", "Five"]
            .into_iter()
            .map(SearchResult::titled)
            .collect();

        let result = remove_subscribed(candidates, &subscribed, 3);
        let titles: Vec<_> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["One", "Three", "Four"]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let candidates = vec![SearchResult::titled("One")];
        assert!(remove_subscribed(candidates, &[], 0).is_empty());
    }

    #[test]
    fn output_never_exceeds_limit_or_contains_subscribed() {
        let subscribed = vec![
            SubscribedFeed::new("Show 1", "Host 1"),
            SubscribedFeed::new("Show 4", "Host 4"),
        ];
        let candidates: Vec<_> = (0..10)
            .map(|i| with_author(&format!("Show {i}"), &format!("Host {i}")))
            .collect();

        for limit in 0..12 {
            let result = remove_subscribed(candidates.clone(), &subscribed, limit);
            assert!(result.len() <= limit);
            assert!(result.iter().all(|r| r.title != "Show 1" && r.title != "Show 4"));
        }
    }
}
