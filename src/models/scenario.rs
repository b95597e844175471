//! Scenario identity and per-scenario global parameters.
//!
//! A comparison session always holds exactly two scenarios. Scenario 1 is
//! always user-editable; scenario 2 is either user-editable or derived
//! automatically from scenario 1 in lump-sum-vs-DCA mode.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifies one of the two scenarios in a session.
///
/// Scenarios appear in URLs as the numbers `1` and `2`, e.g.
/// `/api/v1/scenarios/1/cycles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    One,
    Two,
}

/// Parse a scenario number from a URL path segment.
///
/// Anything other than 1 or 2 is a 404.
impl TryFrom<u8> for ScenarioId {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ScenarioId::One),
            2 => Ok(ScenarioId::Two),
            _ => Err(AppError::ScenarioNotFound),
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioId::One => write!(f, "1"),
            ScenarioId::Two => write!(f, "2"),
        }
    }
}

/// Global simulation parameters, held separately per scenario.
///
/// # JSON Example
///
/// ```json
/// {
///   "annual_investment_rate": 0.08,
///   "start_age": 30
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Annual growth rate applied to the invested portfolio (0.08 = 8%)
    pub annual_investment_rate: f64,

    /// Age of the investor when the scenario starts
    pub start_age: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            annual_investment_rate: 0.08,
            start_age: 30,
        }
    }
}

impl ScenarioParams {
    /// Check that both parameters are inside their allowed ranges.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidRequest` naming the offending field.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.annual_investment_rate) {
            return Err(AppError::InvalidRequest(
                "annual_investment_rate must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.start_age > 100 {
            return Err(AppError::InvalidRequest(
                "start_age must be at most 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for updating session-level settings.
///
/// All fields are optional; omitted fields keep their current value.
///
/// # JSON Example
///
/// ```json
/// {
///   "compare_lump_sum_dca": true,
///   "scenario1": { "annual_investment_rate": 0.08, "start_age": 30 },
///   "scenario2": { "annual_investment_rate": 0.07, "start_age": 30 }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct UpdateParamsRequest {
    /// Enable or disable automatic DCA mirroring of scenario 1 into
    /// scenario 2
    pub compare_lump_sum_dca: Option<bool>,

    /// New parameters for scenario 1
    pub scenario1: Option<ScenarioParams>,

    /// New parameters for scenario 2
    pub scenario2: Option<ScenarioParams>,
}
