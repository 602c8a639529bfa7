//! History loader for the stock-withdrawal history page
//!
//! One best-effort fetch per page view: no retry, no caching, no paging.
//! After the page is torn down a late response is dropped instead of
//! being written into state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::StockHistoryRecord;
use tokio::task::JoinHandle;

use crate::external::HistorySource;

/// Message shown when the history cannot be loaded
pub const HISTORY_LOAD_FAILED_TH: &str = "ไม่สามารถโหลดประวัติการเบิกสินค้าได้";

/// Message shown while the history is loading
pub const HISTORY_LOADING_TH: &str = "กำลังโหลด...";

/// State of the history page's data
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Not activated yet
    #[default]
    Idle,
    Loading,
    Loaded(Vec<StockHistoryRecord>),
    /// Localized message; the underlying error is only logged
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn records(&self) -> Option<&[StockHistoryRecord]> {
        match self {
            LoadState::Loaded(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Loads the withdrawal history once per page view
#[derive(Clone, Default)]
pub struct HistoryLoader {
    state: Arc<Mutex<LoadState>>,
    started: Arc<AtomicBool>,
    torn_down: Arc<AtomicBool>,
}

impl HistoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LoadState {
        self.lock().clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Mark the page as gone; responses arriving afterwards are ignored
    pub fn teardown(&self) {
        // Flag flips under the state lock so no write can straddle it.
        let _state = self.lock();
        self.torn_down.store(true, Ordering::SeqCst);
        tracing::debug!("History page torn down");
    }

    fn set_state(&self, state: LoadState) -> bool {
        let mut current = self.lock();
        if self.is_torn_down() {
            tracing::debug!("Ignoring history update after teardown");
            return false;
        }
        *current = state;
        true
    }

    /// Fetch the history and record the outcome.
    ///
    /// Only the first call of a page view fetches; later calls return the
    /// current state unchanged.
    pub async fn load<S>(&self, source: &S) -> LoadState
    where
        S: HistorySource + ?Sized,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        self.set_state(LoadState::Loading);

        let outcome = match source.fetch_withdraw_history().await {
            Ok(records) => {
                tracing::info!("Loaded {} withdrawal history records", records.len());
                LoadState::Loaded(records)
            }
            Err(e) => {
                tracing::error!("Error fetching stock history: {}", e);
                LoadState::Failed(HISTORY_LOAD_FAILED_TH.to_string())
            }
        };

        self.set_state(outcome);
        self.state()
    }

    /// Start the fetch in the background on page activation
    pub fn activate<S>(&self, source: Arc<S>) -> JoinHandle<LoadState>
    where
        S: HistorySource + ?Sized + 'static,
    {
        let loader = self.clone();
        tokio::spawn(async move { loader.load(source.as_ref()).await })
    }
}
