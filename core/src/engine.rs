//! The scoring engine, entry point for collaborators.
//!
//! A pass runs in two steps:
//!   1. Group the full complaint set by station, fixing each station's total.
//!   2. Replay each station's complaints, in input order, through a fresh
//!      `ScoreAccumulator` seeded with that total.
//!
//! RULES:
//!   - Accumulators never outlive the pass that created them.
//!   - A station with no complaints never appears in the output.
//!   - Any invalid complaint fails the whole pass; there are no partial results.

use crate::{
    accumulator::{ScoreAccumulator, StationScore},
    clock::{Clock, FixedClock, SystemClock},
    complaint::Complaint,
    config::ScoringConfig,
    error::ScoringResult,
    tracker::{MonthlyScoreSeries, ScoreTracker},
    types::StationName,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

pub type StationScores = BTreeMap<StationName, StationScore>;

pub struct ScoringEngine {
    config: ScoringConfig,
    clock: Box<dyn Clock>,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, clock: Box<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Engine reading wall-clock time.
    pub fn with_system_clock(config: ScoringConfig) -> Self {
        Self::new(config, Box::new(SystemClock))
    }

    /// Engine with default constants, frozen at `now`.
    /// Used by tests and reproducible reports.
    pub fn build_test(now: DateTime<Utc>) -> Self {
        Self::new(ScoringConfig::default(), Box::new(FixedClock::new(now)))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Score every station present in `complaints`. The clock is read
    /// once, so every station is measured against the same instant.
    pub fn calculate_scores(&self, complaints: &[Complaint]) -> ScoringResult<StationScores> {
        let now = self.clock.now();
        let groups = group_by_station(complaints);
        let mut scores = StationScores::new();

        for (station, station_complaints) in groups {
            let score = self.score_station_at(&station, &station_complaints, now)?;
            log::debug!(
                "score: station={station} complaints={} final={:.2}",
                score.total_number_of_complaints,
                score.final_score,
            );
            scores.insert(station, score);
        }

        log::info!(
            "score: scored {} complaints across {} stations",
            complaints.len(),
            scores.len(),
        );
        Ok(scores)
    }

    /// One station's pass against `now`. The total is the length of
    /// `complaints`.
    pub fn score_station_at(
        &self,
        station: &str,
        complaints: &[&Complaint],
        now: DateTime<Utc>,
    ) -> ScoringResult<StationScore> {
        let mut accumulator =
            ScoreAccumulator::new(station, complaints.len(), &self.config, now)?;
        for complaint in complaints {
            accumulator.add_complaint(complaint)?;
        }
        Ok(accumulator.snapshot())
    }

    /// Cumulative month-by-month scores from `start` through `end`.
    pub fn track_scores(
        &self,
        complaints: &[Complaint],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScoringResult<MonthlyScoreSeries> {
        ScoreTracker::new(self).track_scores(complaints, start, end)
    }
}

/// Group complaints by station, keeping input order within each station.
pub fn group_by_station(complaints: &[Complaint]) -> BTreeMap<StationName, Vec<&Complaint>> {
    let mut groups: BTreeMap<StationName, Vec<&Complaint>> = BTreeMap::new();
    for complaint in complaints {
        groups
            .entry(complaint.station.clone())
            .or_default()
            .push(complaint);
    }
    groups
}

/// Stations ordered best first. Ties are broken by station name.
pub fn rank_stations(scores: &StationScores) -> Vec<&StationScore> {
    let mut ranked: Vec<&StationScore> = scores.values().collect();
    ranked.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| a.station.cmp(&b.station))
    });
    ranked
}
