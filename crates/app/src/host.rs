//! View host for the console front end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use biodex_core::view::ViewHost;

/// Records navigation and refresh requests so the command can report them
/// after the edit flow returns.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    redirect: Mutex<Option<String>>,
    refreshes: AtomicUsize,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last redirect target requested, if any.
    pub fn redirected_to(&self) -> Option<String> {
        self.redirect
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl ViewHost for ConsoleHost {
    fn redirect(&self, path: &str) {
        tracing::info!(path, "Redirect requested");
        *self
            .redirect
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(path.to_string());
    }

    fn refresh(&self) {
        tracing::debug!("Refresh requested");
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }
}
