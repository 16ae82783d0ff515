// Search widget (independent demo)
// Autocomplete over a fixed city list plus a mock search that completes after
// a fixed delay. The original fired overlapping un-cancelable timers; here a
// new search supersedes the in-flight task and stale completions are dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

pub const SUGGESTION_LIMIT: usize = 5;
pub const SEARCH_DELAY: Duration = Duration::from_millis(900);

pub const SUGGESTION_CITIES: &[&str] = &[
    "New York City",
    "New Orleans",
    "Newport",
    "San Francisco",
    "San Diego",
    "Santa Fe",
    "Miami",
    "Grand Canyon",
    "Yellowstone",
    "Yosemite",
];

// Case-insensitive substring matches, capped at SUGGESTION_LIMIT. An empty
// query suggests nothing.
pub fn suggest(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    SUGGESTION_CITIES
        .iter()
        .filter(|city| city.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .copied()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Searching,
    Done,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Idle => Ok(()),
            SearchStatus::Searching => f.write_str("Searching…"),
            SearchStatus::Done => f.write_str("Search complete."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub id: u64,
    pub title: String,
    pub image_url: String,
}

impl ResultCard {
    fn generated(id: u64, query: &str) -> Self {
        Self {
            id,
            title: format!("Results for \"{query}\" (mock)"),
            // Deterministically constructed placeholder image location.
            image_url: format!(
                "https://placehold.co/400x240?text={}",
                urlencoding::encode(query)
            ),
        }
    }
}

struct SearchState {
    status: Mutex<SearchStatus>,
    results: Mutex<Vec<ResultCard>>,
    seq: AtomicU64,
}

// One search box. `begin_search` shows the searching status immediately and
// appends a generated card once the delay elapses; a newer search aborts the
// older task, and a completion whose sequence number is stale is dropped.
pub struct SearchSession {
    state: Arc<SearchState>,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SearchState {
                status: Mutex::new(SearchStatus::Idle),
                results: Mutex::new(Vec::new()),
                seq: AtomicU64::new(0),
            }),
            current: Mutex::new(None),
        }
    }

    pub fn status(&self) -> SearchStatus {
        *self.state.status.lock()
    }

    pub fn results(&self) -> Vec<ResultCard> {
        self.state.results.lock().clone()
    }

    // Kick off the mock search, superseding any in-flight one.
    pub fn begin_search(&self, query: &str) -> u64 {
        let seq = self.state.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.status.lock() = SearchStatus::Searching;
        debug!(query, seq, "mock search started");

        if let Some(previous) = self.current.lock().take() {
            previous.abort();
        }

        let state = Arc::clone(&self.state);
        let query = query.to_string();
        let handle = tokio::spawn(async move {
            sleep(SEARCH_DELAY).await;
            // A newer search owns the session now.
            if state.seq.load(Ordering::SeqCst) != seq {
                return;
            }
            state.results.lock().push(ResultCard::generated(seq, &query));
            *state.status.lock() = SearchStatus::Done;
            debug!(seq, "mock search completed");
        });
        *self.current.lock() = Some(handle);
        seq
    }

    // Selecting a suggestion chip fills the input and triggers the search.
    pub fn choose_suggestion(&self, city: &str) -> u64 {
        self.begin_search(city)
    }

    // Wait for the in-flight task, if any, to finish or be aborted.
    pub async fn settle(&self) {
        let handle = self.current.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

// Saved state per result card plus a running count, floored at zero.
#[derive(Debug, Default)]
pub struct SavedCards {
    saved: DashMap<u64, bool>,
    count: AtomicUsize,
}

impl SavedCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saved(&self, card_id: u64) -> bool {
        self.saved.get(&card_id).map(|v| *v).unwrap_or(false)
    }

    // Flip the card's saved state and adjust the counter. Returns the new
    // state. The displayed count never drops below zero.
    pub fn toggle(&self, card_id: u64) -> bool {
        let mut entry = self.saved.entry(card_id).or_insert(false);
        *entry = !*entry;
        let now_saved = *entry;
        drop(entry);

        if now_saved {
            self.count.fetch_add(1, Ordering::SeqCst);
        } else {
            let _ = self
                .count
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| {
                    Some(c.saturating_sub(1))
                });
        }
        now_saved
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
