use serde::Serialize;

use super::domain::{MatchLevel, ScreeningSummary};

/// Counters over the full fetched set, independent of the active filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScreeningStats {
    pub total: usize,
    pub high_match: usize,
    pub medium_match: usize,
    pub low_match: usize,
    pub previously_screened: usize,
}

pub fn screening_stats(records: &[ScreeningSummary]) -> ScreeningStats {
    records
        .iter()
        .fold(ScreeningStats::default(), |mut stats, summary| {
            stats.total += 1;
            match summary.match_level() {
                MatchLevel::High => stats.high_match += 1,
                MatchLevel::Medium => stats.medium_match += 1,
                MatchLevel::Low => stats.low_match += 1,
            }
            if summary.previously_screened {
                stats.previously_screened += 1;
            }
            stats
        })
}
