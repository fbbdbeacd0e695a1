use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::card::ScreeningCard;
use super::domain::{ApplicationId, ScreeningSummary};
use super::filter::{filter_screenings, MatchBucket};
use super::sort::{sort_screenings, SortKey};
use super::stats::{screening_stats, ScreeningStats};

/// The three pieces of UI state that select what the board shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningQuery {
    pub search: String,
    pub bucket: MatchBucket,
    pub sort: SortKey,
}

/// Source snapshot plus UI state. Every combination of fields is valid.
#[derive(Debug, Clone, Default)]
pub struct ScreeningViewModel {
    pub source: Arc<Vec<ScreeningSummary>>,
    pub search: String,
    pub bucket: MatchBucket,
    pub sort: SortKey,
}

impl ScreeningViewModel {
    pub fn new(source: impl Into<Arc<Vec<ScreeningSummary>>>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: ScreeningQuery) -> Self {
        let ScreeningQuery {
            search,
            bucket,
            sort,
        } = query;
        self.search = search;
        self.bucket = bucket;
        self.sort = sort;
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_bucket(&mut self, bucket: MatchBucket) {
        self.bucket = bucket;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn replace_source(&mut self, source: impl Into<Arc<Vec<ScreeningSummary>>>) {
        self.source = source.into();
    }

    pub fn query(&self) -> ScreeningQuery {
        ScreeningQuery {
            search: self.search.clone(),
            bucket: self.bucket,
            sort: self.sort,
        }
    }

    /// Filtered then sorted records, recomputed from scratch on every call.
    pub fn displayed(&self) -> Vec<ScreeningSummary> {
        let filtered = filter_screenings(&self.source, &self.search, self.bucket);
        sort_screenings(filtered, self.sort)
    }
}

/// Everything a rendering layer needs for the pending-screenings page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningBoard {
    pub stats: ScreeningStats,
    pub filtered: usize,
    pub query: ScreeningQuery,
    pub cards: Vec<ScreeningCard>,
}

impl ScreeningBoard {
    pub fn card(&self, application_id: &ApplicationId) -> Option<&ScreeningCard> {
        self.cards
            .iter()
            .find(|card| &card.application_id == application_id)
    }
}

pub fn derive_view(view_model: &ScreeningViewModel) -> ScreeningBoard {
    let displayed = view_model.displayed();
    let cards: Vec<ScreeningCard> = displayed.iter().map(ScreeningCard::from_summary).collect();

    ScreeningBoard {
        stats: screening_stats(&view_model.source),
        filtered: cards.len(),
        query: view_model.query(),
        cards,
    }
}
