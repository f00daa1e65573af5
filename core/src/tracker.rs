//! Score tracking over time.
//!
//! For each station a cursor walks from `start` to `end` one calendar
//! month at a time. At every cursor the station is re-scored from scratch
//! over all of its complaints made within `[start, cursor]`, so each point
//! reflects the station's standing to date rather than that month alone.
//! Months with no complaints in the window are omitted. The clock is read
//! once per tracking run.

use crate::{
    complaint::Complaint,
    engine::{group_by_station, ScoringEngine},
    error::{ScoringError, ScoringResult},
    timing::{month_label, nth_month_from},
    types::{FinalScore, MonthLabel, StationName},
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

pub type MonthlyScoreSeries = BTreeMap<StationName, BTreeMap<MonthLabel, FinalScore>>;

pub struct ScoreTracker<'a> {
    engine: &'a ScoringEngine,
}

impl<'a> ScoreTracker<'a> {
    pub fn new(engine: &'a ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn track_scores(
        &self,
        complaints: &[Complaint],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ScoringResult<MonthlyScoreSeries> {
        if start > end {
            return Err(ScoringError::InvalidDateRange { start, end });
        }

        let now = self.engine.clock().now();
        let cursors = month_cursors(start, end);
        let mut series = MonthlyScoreSeries::new();

        for (station, station_complaints) in group_by_station(complaints) {
            let months = self.track_station(&station, &station_complaints, start, &cursors, now)?;
            log::debug!("track: station={station} months={}", months.len());
            if !months.is_empty() {
                series.insert(station, months);
            }
        }

        log::info!(
            "track: {} stations over {} months ({start} to {end})",
            series.len(),
            cursors.len(),
        );
        Ok(series)
    }

    fn track_station(
        &self,
        station: &str,
        complaints: &[&Complaint],
        start: NaiveDate,
        cursors: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> ScoringResult<BTreeMap<MonthLabel, FinalScore>> {
        let mut months = BTreeMap::new();

        for &cursor in cursors {
            let window: Vec<&Complaint> = complaints
                .iter()
                .copied()
                .filter(|c| {
                    let made = c.date_complaint_made.date_naive();
                    made >= start && made <= cursor
                })
                .collect();

            if window.is_empty() {
                continue;
            }

            let score = self.engine.score_station_at(station, &window, now)?;
            months.insert(month_label(cursor), score.final_score);
        }

        Ok(months)
    }
}

/// Cursor dates `start`, `start + 1 month`, ... up to and including `end`.
pub fn month_cursors(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    (0u32..)
        .map_while(|n| nth_month_from(start, n))
        .take_while(|cursor| *cursor <= end)
        .collect()
}
