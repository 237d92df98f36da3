pub mod cache;
pub mod country;
pub mod discovery;
pub mod error;
pub mod http;
pub mod preferences;
pub mod progress;
pub mod subscriptions;
pub mod toplist;

// Re-export main types for convenience
pub use cache::{CachingClient, default_cache_dir};
pub use country::{COUNTRY_CODE_UNSET, CountryCode, FALLBACK_REGION, device_default_region};
pub use discovery::{DiscoveryOptions, DiscoveryOutcome, NUM_SUGGESTIONS, discover};
pub use error::{
    CacheError, CountryError, FetchError, PreferencesError, SubscriptionError, ToplistError,
    TransportError,
};
pub use http::{CacheDirective, HttpClient, HttpResponse, ReqwestClient};
pub use preferences::{
    DiscoveryPreferences, default_preferences_path, read_preferences, write_preferences,
};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use subscriptions::{SubscribedFeed, read_subscriptions};
pub use toplist::{SearchResult, ToplistOptions, load_toplist, parse_toplist, remove_subscribed};
