//! Simulation result types returned by the comparison endpoint.
//!
//! These types carry everything the dashboard renders after a run: the
//! age/net-gains series for the chart, a per-year breakdown table, and the
//! final summary figures.

use serde::Serialize;

/// One simulated year of a scenario.
///
/// All monetary fields are raw `f64` values; only the scenario-level
/// summary is rounded for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct YearBreakdown {
    /// 1-based year number, counted across all cycles of the scenario
    pub year: u32,

    /// Investor age at the end of this year
    pub age_end: u32,

    /// Portfolio value at the start of the year
    pub portfolio_before: f64,

    /// Money paid out of pocket this year (loan repayments plus
    /// contributions)
    pub out_of_pocket: f64,

    /// Portfolio value at the end of the year
    pub portfolio_after: f64,

    /// Effective investment gains this year: the portfolio change minus
    /// what was paid in
    pub roi: f64,

    /// `roi` minus this year's out-of-pocket spending
    pub delta: f64,

    /// Cumulative net gains at year end: portfolio value minus all money
    /// injected so far
    pub net_gains: f64,
}

/// Full simulation result for one scenario.
///
/// # JSON Example
///
/// ```json
/// {
///   "ages": [31, 32, 33],
///   "net_gains_by_year": [-1203.5, 2410.9, 7822.4],
///   "years": [ { "year": 1, "age_end": 31, … }, … ],
///   "final_portfolio": 154230.12,
///   "total_out_of_pocket": 120000.0,
///   "net_gains": 34230.12
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Investor age at the end of each simulated year (chart x-axis)
    pub ages: Vec<u32>,

    /// Cumulative net gains at the end of each simulated year
    /// (chart y-axis)
    pub net_gains_by_year: Vec<f64>,

    /// Detailed per-year breakdown
    pub years: Vec<YearBreakdown>,

    /// Final portfolio value, rounded to cents
    pub final_portfolio: f64,

    /// Total money injected over the whole scenario, rounded to cents
    pub total_out_of_pocket: f64,

    /// Final net gains (portfolio minus injected money), rounded to cents
    pub net_gains: f64,
}

/// Response body for `POST /api/v1/simulations/compare`.
///
/// Both scenarios are always present; a scenario with no cycles produces
/// empty series and zeroed summary figures.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    /// Outcome of scenario 1
    pub scenario1: ScenarioOutcome,

    /// Outcome of scenario 2
    pub scenario2: ScenarioOutcome,
}
