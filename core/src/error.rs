use crate::{
    complaint::ComplaintStatus,
    types::{ComplaintId, StationName},
};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Complaint '{complaint_id}' is missing required timestamp '{field}'")]
    MissingTimestamp {
        complaint_id: ComplaintId,
        field: &'static str,
    },

    #[error("Complaint '{complaint_id}' is {status:?} but carries timestamp '{field}'")]
    UnexpectedTimestamp {
        complaint_id: ComplaintId,
        status: ComplaintStatus,
        field: &'static str,
    },

    #[error("Complaint '{complaint_id}': '{earlier}' must not be after '{later}'")]
    TimestampOrder {
        complaint_id: ComplaintId,
        earlier: &'static str,
        later: &'static str,
    },

    #[error("Station '{station}' has no complaints to score")]
    EmptyStation { station: StationName },

    #[error("Station '{station}' declared {declared} complaints but received more")]
    CapacityExceeded {
        station: StationName,
        declared: usize,
    },

    #[error("Complaint '{complaint_id}' belongs to '{actual}', not '{expected}'")]
    StationMismatch {
        complaint_id: ComplaintId,
        expected: StationName,
        actual: StationName,
    },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ScoringResult<T> = Result<T, ScoringError>;
