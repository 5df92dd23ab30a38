//! Live product search behind a debounced text box.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shopfront_core::AppConfig;
use tokio::task::JoinHandle;

use crate::client::StorefrontClient;
use crate::debounce::Debouncer;
use crate::sequence::RequestSequence;
use crate::types::SearchHit;

/// What the search box and its dropdown currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub error: Option<String>,
}

/// Search box state shared between the caller and scheduled lookups.
///
/// Keystrokes reschedule the lookup; only the last one in a burst reaches
/// the server, and only the newest response is rendered.
pub struct SearchBox {
    client: Arc<StorefrontClient>,
    debouncer: Debouncer,
    sequence: RequestSequence,
    view: Arc<Mutex<SearchView>>,
}

impl SearchBox {
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>, delay: Duration) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(delay),
            sequence: RequestSequence::new(),
            view: Arc::new(Mutex::new(SearchView::default())),
        }
    }

    #[must_use]
    pub fn from_config(client: Arc<StorefrontClient>, config: &AppConfig) -> Self {
        Self::new(client, Duration::from_millis(config.search_debounce_ms))
    }

    /// Snapshot of the current view.
    #[must_use]
    pub fn view(&self) -> SearchView {
        lock(&self.view).clone()
    }

    /// Handles the box's new text. Returns the scheduled lookup, which
    /// resolves to `false` if a later keystroke superseded it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input(&self, text: &str) -> JoinHandle<bool> {
        lock(&self.view).query = text.to_owned();

        let client = Arc::clone(&self.client);
        let sequence = self.sequence.clone();
        let view = Arc::clone(&self.view);
        let query = text.to_owned();

        self.debouncer.schedule(move || async move {
            let ticket = sequence.issue();
            let result = client.search_products(&query).await;
            if !sequence.is_latest(ticket) {
                tracing::debug!(query = %query, "discarding stale search response");
                return;
            }
            let mut view = lock(&view);
            match result {
                Ok(hits) => {
                    tracing::debug!(query = %query, hits = hits.len(), "search results");
                    view.results = hits;
                    view.error = None;
                }
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "product search failed");
                    view.results.clear();
                    view.error = Some(e.user_message());
                }
            }
        })
    }

    /// Handles focus leaving the box. Unless focus moved into the results
    /// list, results are cleared and pending or in-flight lookups are
    /// dropped.
    pub fn on_blur(&self, focus_in_results: bool) {
        if focus_in_results {
            return;
        }
        self.debouncer.cancel();
        let _ = self.sequence.issue();
        let mut view = lock(&self.view);
        view.results.clear();
        view.error = None;
    }
}

fn lock(view: &Mutex<SearchView>) -> MutexGuard<'_, SearchView> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}
