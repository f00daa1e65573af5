//! Shared primitive types used across the scoring engine.

/// Name of a police station. The unit of aggregation for every score.
pub type StationName = String;

/// A stable, unique identifier for a complaint record.
pub type ComplaintId = String;

/// Calendar month label in `YYYY-MM` form.
pub type MonthLabel = String;

/// A station's clamped, rounded 0–100 score.
pub type FinalScore = f64;

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
