use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::{api::DynGeocoding, entities::Place};

/// One address input with its suggestion list.
///
/// Each keystroke issues its own lookup and nothing is cancelled, but every lookup is
/// tagged with a sequence number and only the newest one may write the suggestion
/// list, so a slow stale response cannot replace a fresher one.
pub struct Autocomplete {
    geocoding: DynGeocoding,
    text: Mutex<String>,
    suggestions: Mutex<Vec<Place>>,
    latest: AtomicU64,
}

impl Autocomplete {
    pub fn new(geocoding: DynGeocoding) -> Self {
        Self {
            geocoding,
            text: Mutex::new(String::new()),
            suggestions: Mutex::new(Vec::new()),
            latest: AtomicU64::new(0),
        }
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    pub fn suggestions(&self) -> Vec<Place> {
        self.suggestions.lock().clone()
    }

    /// Records the typed text and refreshes suggestions for it.
    #[tracing::instrument(skip(self))]
    pub async fn input(&self, text: &str) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        *self.text.lock() = text.to_string();

        let places = self.geocoding.suggest(text).await;

        let mut suggestions = self.suggestions.lock();
        if self.latest.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "discarding superseded suggestions");
            return;
        }
        *suggestions = places;
    }

    /// Picks a suggestion: the input shows its address and the list closes.
    pub fn select(&self, index: usize) -> Option<Place> {
        let place = {
            let mut suggestions = self.suggestions.lock();
            if index >= suggestions.len() {
                return None;
            }
            let place = suggestions.swap_remove(index);
            suggestions.clear();
            // in-flight lookups must not reopen the list
            self.latest.fetch_add(1, Ordering::SeqCst);
            place
        };

        *self.text.lock() = place.formatted_address.clone();

        Some(place)
    }
}
