use std::sync::Arc;

/// Events emitted while loading a toplist for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A toplist request is being sent
    FetchingToplist { country: String, url: String },

    /// The first attempt failed at the transport level and the loader is
    /// retrying against the fallback region
    FallingBackToRegion {
        failed_country: String,
        fallback_country: String,
        error: String,
    },

    /// The response body has been parsed
    ToplistParsed { entries: usize },

    /// Already-subscribed podcasts have been removed
    SubscribedFiltered {
        candidates: usize,
        kept: usize,
        limit: usize,
    },
}

/// Trait for reporting progress events while loading a toplist.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Reporter that keeps every event for later assertions
    #[derive(Default)]
    pub struct RecordingReporter {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
