//! Per-station score accumulator.
//!
//! One accumulator exists per station per scoring pass. It is told up
//! front how many complaints the station has, because every penalty and
//! recompense is scaled by `1 / total`. Complaints are then replayed one
//! at a time through `add_complaint`.
//!
//! The running score starts at `initial_score` and is only clamped to
//! [0, 100] when read, so intermediate totals may leave that range.
//!
//! "Now" is fixed when the accumulator is created; every unaddressed or
//! still-investigating complaint in the pass is measured against it.

use crate::{
    complaint::{Complaint, ComplaintStatus},
    config::ScoringConfig,
    error::{ScoringError, ScoringResult},
    timing::{
        average_days, format_days, format_percent_value, format_percentage, millis_between,
        round2, whole_days_between,
    },
    types::{FinalScore, StationName},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable result of one station's scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationScore {
    pub station: StationName,
    pub total_number_of_complaints: usize,
    pub unaddressed_complaints: usize,
    pub investigating_complaints: usize,
    pub resolved_complaints: usize,
    pub percentage_unaddressed: String,
    pub percentage_investigating: String,
    pub percentage_resolved: String,
    pub percentage_attended_to: String,
    pub average_investigation_time: Option<String>,
    pub average_resolution_time: Option<String>,
    pub average_case_duration: Option<String>,
    pub final_score: FinalScore,
}

/// Score movement caused by a single complaint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAdjustment {
    pub penalty: f64,
    pub recompense: f64,
}

impl ScoreAdjustment {
    pub fn net(&self) -> f64 {
        self.recompense - self.penalty
    }
}

pub struct ScoreAccumulator<'a> {
    station: StationName,
    total: usize,
    base_score_unit: f64,
    config: &'a ScoringConfig,
    now: DateTime<Utc>,

    unaddressed: usize,
    investigating: usize,
    resolved: usize,

    investigation_ms: i64,
    resolution_ms: i64,
    case_duration_ms: i64,

    score: f64,
}

impl<'a> ScoreAccumulator<'a> {
    /// `total` is the number of complaints the station will receive over
    /// the whole pass. It must be known before the first complaint.
    pub fn new(
        station: impl Into<StationName>,
        total: usize,
        config: &'a ScoringConfig,
        now: DateTime<Utc>,
    ) -> ScoringResult<Self> {
        let station = station.into();
        if total == 0 {
            return Err(ScoringError::EmptyStation { station });
        }
        Ok(Self {
            station,
            total,
            base_score_unit: 1.0 / total as f64,
            config,
            now,
            unaddressed: 0,
            investigating: 0,
            resolved: 0,
            investigation_ms: 0,
            resolution_ms: 0,
            case_duration_ms: 0,
            score: config.initial_score,
        })
    }

    pub fn added(&self) -> usize {
        self.unaddressed + self.investigating + self.resolved
    }

    pub fn is_complete(&self) -> bool {
        self.added() == self.total
    }

    /// Unclamped running score.
    pub fn raw_score(&self) -> f64 {
        self.score
    }

    /// Running score clamped to [0, 100] and rounded to two decimals.
    pub fn final_score(&self) -> FinalScore {
        round2(self.score.clamp(0.0, 100.0))
    }

    /// Fold one complaint into the running totals.
    ///
    /// The complaint is fully checked before any state changes, so a
    /// failed call leaves the accumulator untouched.
    pub fn add_complaint(&mut self, complaint: &Complaint) -> ScoringResult<()> {
        complaint.validate()?;
        if complaint.station != self.station {
            return Err(ScoringError::StationMismatch {
                complaint_id: complaint.complaint_id.clone(),
                expected: self.station.clone(),
                actual: complaint.station.clone(),
            });
        }
        if self.is_complete() {
            return Err(ScoringError::CapacityExceeded {
                station: self.station.clone(),
                declared: self.total,
            });
        }

        let adjustment = self.adjustment(complaint)?;

        match complaint.status {
            ComplaintStatus::Resolved => {
                let made = complaint.date_complaint_made;
                let investigated = complaint.require_under_investigation()?;
                let resolved = complaint.require_resolved()?;
                self.resolved += 1;
                self.investigation_ms += millis_between(made, investigated);
                self.resolution_ms += millis_between(investigated, resolved);
                self.case_duration_ms += millis_between(made, resolved);
            }
            ComplaintStatus::Investigating => {
                let investigated = complaint.require_under_investigation()?;
                self.investigating += 1;
                self.investigation_ms +=
                    millis_between(complaint.date_complaint_made, investigated);
            }
            ComplaintStatus::Unaddressed => {
                self.unaddressed += 1;
            }
        }

        self.score += adjustment.net();
        log::trace!(
            "{} {}: {:?} penalty={:.4} recompense={:.4} running={:.4}",
            self.station,
            complaint.complaint_id,
            complaint.status,
            adjustment.penalty,
            adjustment.recompense,
            self.score,
        );
        Ok(())
    }

    /// Penalty and recompense this complaint would contribute.
    pub fn adjustment(&self, complaint: &Complaint) -> ScoringResult<ScoreAdjustment> {
        let severity_weight = self
            .config
            .severity_weights
            .weight(complaint.severity());
        let penalty_factor =
            self.base_score_unit * (self.config.base_penalty_weight + severity_weight);

        let lower_bound = match complaint.status {
            ComplaintStatus::Unaddressed => self.now,
            _ => complaint.require_under_investigation()?,
        };
        let elapsed_days = whole_days_between(lower_bound, complaint.date_complaint_made);
        let penalized_days = (elapsed_days - self.config.slack_days)
            .max(0)
            .min(self.config.max_penalized_days);
        let penalty = penalty_factor * penalized_days as f64;

        let recompense = match complaint.status {
            ComplaintStatus::Unaddressed => 0.0,
            ComplaintStatus::Investigating | ComplaintStatus::Resolved => {
                let investigation_end = match complaint.status {
                    ComplaintStatus::Resolved => complaint.require_resolved()?,
                    _ => self.now,
                };
                let investigated = complaint.require_under_investigation()?;
                let recompense_days = whole_days_between(investigation_end, investigated)
                    .min(self.config.max_recompense_days);
                penalty_factor * recompense_days as f64 * self.config.recompense_rate
            }
        };

        Ok(ScoreAdjustment {
            penalty,
            recompense,
        })
    }

    pub fn snapshot(&self) -> StationScore {
        let total = self.total as f64;
        let pct_investigating = self.investigating as f64 / total * 100.0;
        let pct_resolved = self.resolved as f64 / total * 100.0;
        let attended = self.investigating + self.resolved;

        StationScore {
            station: self.station.clone(),
            total_number_of_complaints: self.total,
            unaddressed_complaints: self.unaddressed,
            investigating_complaints: self.investigating,
            resolved_complaints: self.resolved,
            percentage_unaddressed: format_percentage(self.unaddressed, self.total),
            percentage_investigating: format_percentage(self.investigating, self.total),
            percentage_resolved: format_percentage(self.resolved, self.total),
            percentage_attended_to: format_percent_value(pct_resolved + pct_investigating),
            average_investigation_time: average_days(self.investigation_ms, attended)
                .map(format_days),
            average_resolution_time: average_days(self.resolution_ms, self.resolved)
                .map(format_days),
            average_case_duration: average_days(self.case_duration_ms, self.resolved)
                .map(format_days),
            final_score: self.final_score(),
        }
    }
}
