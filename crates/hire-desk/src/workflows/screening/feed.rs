use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::domain::ScreeningSummary;
use super::view::{ScreeningQuery, ScreeningViewModel};
use crate::client::{ClientContext, ScreeningSource};

/// Lifecycle of the fetched snapshot for one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<Vec<ScreeningSummary>>),
    Failed { message: String },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Records to display; empty unless the last fetch succeeded.
    pub fn records(&self) -> Arc<Vec<ScreeningSummary>> {
        match self {
            LoadState::Ready(records) => Arc::clone(records),
            _ => Arc::default(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Holds the pending-screenings snapshot for one view and guarantees at most
/// one fetch is in flight. Callers that arrive while a fetch is running wait
/// for it and share its result instead of issuing their own.
pub struct ScreeningFeed<S> {
    source: Arc<S>,
    state: RwLock<LoadState>,
    in_flight: Mutex<()>,
    completed: AtomicU64,
}

impl<S> ScreeningFeed<S>
where
    S: ScreeningSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: RwLock::new(LoadState::Idle),
            in_flight: Mutex::new(()),
            completed: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of fetches that have run to completion.
    pub fn completed_fetches(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    pub fn view_model(&self, query: ScreeningQuery) -> ScreeningViewModel {
        ScreeningViewModel::new(self.state().records()).with_query(query)
    }

    pub async fn refresh(&self, context: &ClientContext) -> LoadState {
        let observed = self.completed.load(Ordering::Acquire);
        let _permit = self.in_flight.lock().await;

        if self.completed.load(Ordering::Acquire) != observed {
            debug!("joined pending screenings fetch already in flight");
            return self.state();
        }

        let loading = LoadingGuard::enter(&self.state);
        let next = match self.source.fetch_pending(context).await {
            Ok(records) => LoadState::Ready(Arc::new(records)),
            Err(err) => {
                warn!(error = %err, "pending screenings fetch failed");
                LoadState::Failed {
                    message: err.user_message(),
                }
            }
        };

        loading.settle(next.clone());
        self.completed.fetch_add(1, Ordering::AcqRel);
        next
    }
}

/// Marks the feed as loading for the lifetime of one fetch. A fetch that is
/// dropped before it settles puts the previous state back.
struct LoadingGuard<'a> {
    state: &'a RwLock<LoadState>,
    previous: Option<LoadState>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a RwLock<LoadState>) -> Self {
        let previous = std::mem::replace(
            &mut *state.write().unwrap_or_else(PoisonError::into_inner),
            LoadState::Loading,
        );
        Self {
            state,
            previous: Some(previous),
        }
    }

    fn settle(mut self, next: LoadState) {
        self.previous = None;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!("pending screenings fetch abandoned before completion");
            *self.state.write().unwrap_or_else(PoisonError::into_inner) = previous;
        }
    }
}
