use crate::{
    complaint::IncidentSeverity,
    error::{ScoringError, ScoringResult},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 0.0,
            medium: 2.0,
            high: 5.0,
        }
    }
}

impl SeverityWeights {
    pub fn weight(&self, severity: IncidentSeverity) -> f64 {
        match severity {
            IncidentSeverity::Low => self.low,
            IncidentSeverity::Medium => self.medium,
            IncidentSeverity::High => self.high,
        }
    }
}

/// Constants of the penalty/recompense model. JSON keys are camelCase,
/// matching the complaint and score records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Score every station starts from before penalties.
    pub initial_score: f64,
    /// Grace period in days before any penalty accrues.
    pub slack_days: i64,
    /// Upper bound on penalized days per complaint.
    pub max_penalized_days: i64,
    /// Upper bound on recompensed investigation days per complaint.
    pub max_recompense_days: i64,
    /// Fraction of the penalty rate paid back per investigation day.
    pub recompense_rate: f64,
    /// Added to the severity weight to form the per-day penalty factor.
    pub base_penalty_weight: f64,
    pub severity_weights: SeverityWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_score: 100.0,
            slack_days: 5,
            max_penalized_days: 90,
            max_recompense_days: 30,
            recompense_rate: 0.55,
            base_penalty_weight: 2.0,
            severity_weights: SeverityWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config = Self::from_json(&content)?;
        log::debug!("loaded scoring config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> ScoringResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScoringResult<()> {
        if !(self.initial_score > 0.0 && self.initial_score <= 100.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "initialScore must be in (0, 100], got {}",
                self.initial_score
            )));
        }
        if self.slack_days < 0 || self.max_penalized_days < 0 || self.max_recompense_days < 0 {
            return Err(ScoringError::InvalidConfig(
                "day limits must be non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.recompense_rate) {
            return Err(ScoringError::InvalidConfig(format!(
                "recompenseRate must be in [0, 1], got {}",
                self.recompense_rate
            )));
        }
        let weights = &self.severity_weights;
        if self.base_penalty_weight < 0.0
            || weights.low < 0.0
            || weights.medium < 0.0
            || weights.high < 0.0
        {
            return Err(ScoringError::InvalidConfig(
                "penalty weights must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
