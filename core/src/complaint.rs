//! Complaint records as handed to the engine by the data-access layer.
//!
//! The engine never fetches or filters complaints itself. It only checks
//! that each record's status agrees with the timestamps it carries.

use crate::{
    error::{ScoringError, ScoringResult},
    types::{ComplaintId, StationName},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Unaddressed,
    Investigating,
    Resolved,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
}

/// Kinds of incident a complaint can be filed for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Discourtesy,
    Negligence,
    RefusalToRegister,
    Harassment,
    Bribery,
    WrongfulDetention,
    PhysicalAssault,
}

impl IncidentType {
    pub const ALL: [IncidentType; 7] = [
        Self::Discourtesy,
        Self::Negligence,
        Self::RefusalToRegister,
        Self::Harassment,
        Self::Bribery,
        Self::WrongfulDetention,
        Self::PhysicalAssault,
    ];

    pub fn severity(&self) -> IncidentSeverity {
        match self {
            Self::Discourtesy | Self::Negligence => IncidentSeverity::Low,
            Self::RefusalToRegister | Self::Harassment | Self::Bribery => {
                IncidentSeverity::Medium
            }
            Self::WrongfulDetention | Self::PhysicalAssault => IncidentSeverity::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub complaint_id: ComplaintId,
    pub station: StationName,
    pub incident_type: IncidentType,
    pub status: ComplaintStatus,
    pub date_complaint_made: DateTime<Utc>,
    #[serde(default)]
    pub date_under_investigation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_resolved: Option<DateTime<Utc>>,
}

impl Complaint {
    /// A freshly filed complaint nobody has picked up yet.
    pub fn unaddressed(
        complaint_id: impl Into<ComplaintId>,
        station: impl Into<StationName>,
        incident_type: IncidentType,
        date_complaint_made: DateTime<Utc>,
    ) -> Self {
        Self {
            complaint_id: complaint_id.into(),
            station: station.into(),
            incident_type,
            status: ComplaintStatus::Unaddressed,
            date_complaint_made,
            date_under_investigation: None,
            date_resolved: None,
        }
    }

    /// Move the complaint under investigation as of `at`.
    pub fn investigating(mut self, at: DateTime<Utc>) -> Self {
        self.status = ComplaintStatus::Investigating;
        self.date_under_investigation = Some(at);
        self.date_resolved = None;
        self
    }

    /// Resolve the complaint at `at`. Investigation must already be set.
    pub fn resolved(mut self, at: DateTime<Utc>) -> Self {
        self.status = ComplaintStatus::Resolved;
        self.date_resolved = Some(at);
        self
    }

    pub fn severity(&self) -> IncidentSeverity {
        self.incident_type.severity()
    }

    /// Investigation start, required for every status past Unaddressed.
    pub fn require_under_investigation(&self) -> ScoringResult<DateTime<Utc>> {
        self.date_under_investigation
            .ok_or_else(|| ScoringError::MissingTimestamp {
                complaint_id: self.complaint_id.clone(),
                field: "dateUnderInvestigation",
            })
    }

    pub fn require_resolved(&self) -> ScoringResult<DateTime<Utc>> {
        self.date_resolved.ok_or_else(|| ScoringError::MissingTimestamp {
            complaint_id: self.complaint_id.clone(),
            field: "dateResolved",
        })
    }

    /// Check the status/timestamp invariants.
    ///
    /// Each status carries exactly its own timestamps: Unaddressed has
    /// neither later date, Investigating has only `dateUnderInvestigation`,
    /// Resolved has both. Present timestamps must be non-decreasing:
    /// `dateComplaintMade <= dateUnderInvestigation <= dateResolved`.
    pub fn validate(&self) -> ScoringResult<()> {
        match self.status {
            ComplaintStatus::Unaddressed => {
                self.reject_present(self.date_under_investigation, "dateUnderInvestigation")?;
                self.reject_present(self.date_resolved, "dateResolved")?;
            }
            ComplaintStatus::Investigating => {
                self.require_under_investigation()?;
                self.reject_present(self.date_resolved, "dateResolved")?;
            }
            ComplaintStatus::Resolved => {
                self.require_under_investigation()?;
                self.require_resolved()?;
            }
        }

        if let Some(investigated) = self.date_under_investigation {
            if investigated < self.date_complaint_made {
                return Err(ScoringError::TimestampOrder {
                    complaint_id: self.complaint_id.clone(),
                    earlier: "dateComplaintMade",
                    later: "dateUnderInvestigation",
                });
            }
            if let Some(resolved) = self.date_resolved {
                if resolved < investigated {
                    return Err(ScoringError::TimestampOrder {
                        complaint_id: self.complaint_id.clone(),
                        earlier: "dateUnderInvestigation",
                        later: "dateResolved",
                    });
                }
            }
        }
        Ok(())
    }

    fn reject_present(
        &self,
        timestamp: Option<DateTime<Utc>>,
        field: &'static str,
    ) -> ScoringResult<()> {
        match timestamp {
            Some(_) => Err(ScoringError::UnexpectedTimestamp {
                complaint_id: self.complaint_id.clone(),
                status: self.status,
                field,
            }),
            None => Ok(()),
        }
    }
}
