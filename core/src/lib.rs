//! Scoring engine for police-station complaint handling.
//!
//! Turns a stream of complaint records into per-station performance
//! scores, and into a month-by-month series of those scores.

pub mod accumulator;
pub mod clock;
pub mod complaint;
pub mod config;
pub mod engine;
pub mod error;
pub mod timing;
pub mod tracker;
pub mod types;

pub use accumulator::{ScoreAccumulator, ScoreAdjustment, StationScore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use complaint::{Complaint, ComplaintStatus, IncidentSeverity, IncidentType};
pub use config::ScoringConfig;
pub use engine::{rank_stations, ScoringEngine, StationScores};
pub use error::{ScoringError, ScoringResult};
pub use tracker::{MonthlyScoreSeries, ScoreTracker};
