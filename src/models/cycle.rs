//! Strategy cycle data model and API request/response types.
//!
//! This module defines:
//! - `StrategyCycle`: One loan/contribution phase of an investment strategy
//! - `CycleRequest`: Request body for creating or replacing a cycle
//! - `CycleResponse`: Response body returned to clients

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One phase of an investment strategy.
///
/// A cycle combines two money streams that run in parallel:
///
/// - A **loan**: `loan_amount` is borrowed and invested as a lump sum the
///   moment the cycle starts, then repaid out of pocket as a fixed monthly
///   annuity over `loan_repayment_years`.
/// - **Contributions**: `monthly_contribution` is paid out of pocket and
///   invested every month for `contribution_years`.
///
/// Either stream can be zeroed out, giving pure lump-sum or pure
/// dollar-cost-averaging cycles. The cycle runs for the longer of the two
/// periods; cycles within a scenario execute sequentially.
///
/// # Monetary Representation
///
/// Amounts are `f64` because the portfolio evolves by multiplicative
/// compound growth; integer cents cannot represent intermediate balances.
/// Summary values are rounded to cents only at the response boundary.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyCycle {
    /// Amount borrowed and invested at cycle start
    pub loan_amount: f64,

    /// Annual interest rate of the loan (0.06 = 6%)
    pub loan_interest_rate: f64,

    /// Years over which the loan is repaid
    pub loan_repayment_years: u32,

    /// Out-of-pocket amount invested each month
    pub monthly_contribution: f64,

    /// Years over which monthly contributions are made
    pub contribution_years: u32,

    /// Fixed monthly annuity payment for the loan
    ///
    /// Derived from the loan fields when the cycle is created or updated,
    /// then stored on the cycle so the simulation never recomputes it.
    pub monthly_repayment: f64,

    /// True when this cycle was derived as a DCA mirror of a scenario 1
    /// cycle. Informational only; cleared again on manual edit.
    pub auto_generated: bool,
}

impl StrategyCycle {
    /// Total duration of this cycle in years.
    ///
    /// The cycle ends only once both the repayment schedule and the
    /// contribution schedule have finished.
    pub fn duration_years(&self) -> u32 {
        self.loan_repayment_years.max(self.contribution_years)
    }
}

/// Request body for creating or replacing a strategy cycle.
///
/// # JSON Example
///
/// ```json
/// {
///   "loan_amount": 100000.0,
///   "loan_interest_rate": 0.06,
///   "loan_repayment_years": 20,
///   "monthly_contribution": 500.0,
///   "contribution_years": 20
/// }
/// ```
///
/// # Defaults
///
/// Omitted fields take the same defaults the dashboard's entry form
/// pre-fills: a loan of 100,000 at 6% over 20 years, plus 500/month
/// contributed for 20 years.
///
/// # Validation
///
/// - `loan_amount`: >= 0
/// - `loan_interest_rate`: between 0.0 and 1.0
/// - `loan_repayment_years`: at most 40
/// - `monthly_contribution`: >= 0
/// - `contribution_years`: at most 40
#[derive(Debug, Deserialize)]
pub struct CycleRequest {
    /// Amount borrowed and invested at cycle start
    #[serde(default = "default_loan_amount")]
    pub loan_amount: f64,

    /// Annual interest rate of the loan (0.06 = 6%)
    #[serde(default = "default_loan_interest_rate")]
    pub loan_interest_rate: f64,

    /// Years over which the loan is repaid
    #[serde(default = "default_loan_repayment_years")]
    pub loan_repayment_years: u32,

    /// Out-of-pocket amount invested each month
    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    /// Years over which monthly contributions are made
    #[serde(default = "default_contribution_years")]
    pub contribution_years: u32,
}

fn default_loan_amount() -> f64 {
    100_000.0
}

fn default_loan_interest_rate() -> f64 {
    0.06
}

fn default_loan_repayment_years() -> u32 {
    20
}

fn default_monthly_contribution() -> f64 {
    500.0
}

fn default_contribution_years() -> u32 {
    20
}

impl CycleRequest {
    /// Check that every field is inside its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidRequest` naming the offending field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.loan_amount < 0.0 {
            return Err(AppError::InvalidRequest(
                "loan_amount must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.loan_interest_rate) {
            return Err(AppError::InvalidRequest(
                "loan_interest_rate must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.loan_repayment_years > 40 {
            return Err(AppError::InvalidRequest(
                "loan_repayment_years must be at most 40".to_string(),
            ));
        }
        if self.monthly_contribution < 0.0 {
            return Err(AppError::InvalidRequest(
                "monthly_contribution must not be negative".to_string(),
            ));
        }
        if self.contribution_years > 40 {
            return Err(AppError::InvalidRequest(
                "contribution_years must be at most 40".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response body for cycle endpoints.
///
/// Identical to the stored cycle plus its position in the scenario, since
/// cycles are addressed by 0-based index.
///
/// # JSON Example
///
/// ```json
/// {
///   "index": 0,
///   "loan_amount": 100000.0,
///   "loan_interest_rate": 0.06,
///   "loan_repayment_years": 20,
///   "monthly_contribution": 500.0,
///   "contribution_years": 20,
///   "monthly_repayment": 707.32,
///   "auto_generated": false
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CycleResponse {
    /// Position of this cycle within its scenario (0-based)
    pub index: usize,

    /// Amount borrowed and invested at cycle start
    pub loan_amount: f64,

    /// Annual interest rate of the loan
    pub loan_interest_rate: f64,

    /// Years over which the loan is repaid
    pub loan_repayment_years: u32,

    /// Out-of-pocket amount invested each month
    pub monthly_contribution: f64,

    /// Years over which monthly contributions are made
    pub contribution_years: u32,

    /// Derived fixed monthly annuity payment for the loan
    pub monthly_repayment: f64,

    /// True for cycles derived automatically in DCA comparison mode
    pub auto_generated: bool,
}

/// Convert an indexed cycle into its API representation.
impl From<(usize, &StrategyCycle)> for CycleResponse {
    fn from((index, cycle): (usize, &StrategyCycle)) -> Self {
        Self {
            index,
            loan_amount: cycle.loan_amount,
            loan_interest_rate: cycle.loan_interest_rate,
            loan_repayment_years: cycle.loan_repayment_years,
            monthly_contribution: cycle.monthly_contribution,
            contribution_years: cycle.contribution_years,
            monthly_repayment: cycle.monthly_repayment,
            auto_generated: cycle.auto_generated,
        }
    }
}
