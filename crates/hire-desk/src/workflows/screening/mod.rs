//! Pending-screenings pipeline: ingest, filter, sort, count and present.

pub mod card;
pub mod domain;
pub mod feed;
pub mod filter;
pub mod normalize;
pub mod router;
pub mod sort;
pub mod stats;
pub mod view;

#[cfg(test)]
mod tests;

pub use card::{LinkOpener, ReviewNavigator, ScreeningCard};
pub use domain::{match_percentage, match_ratio, ApplicationId, MatchLevel, ScreeningSummary};
pub use feed::{LoadState, ScreeningFeed};
pub use filter::{filter_screenings, matches_search, MatchBucket};
pub use normalize::{normalize_screening, parse_pending_payload, PayloadError};
pub use router::{screening_router, ScreeningRouterState};
pub use sort::{sort_screenings, SortKey};
pub use stats::{screening_stats, ScreeningStats};
pub use view::{derive_view, ScreeningBoard, ScreeningQuery, ScreeningViewModel};
