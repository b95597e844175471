//! Simulation service - Core month-by-month scenario engine.
//!
//! This service runs one investment scenario from start to finish and
//! records a breakdown of every simulated year.
//!
//! # Simulation Model
//!
//! Cycles execute sequentially. Within a cycle, each year consists of 12
//! monthly steps, and within a month the order is fixed:
//!
//! 1. Loan repayment leaves the pocket (it never touches the portfolio)
//! 2. The monthly contribution leaves the pocket and enters the portfolio
//! 3. The whole portfolio grows by one month at the investment rate
//!
//! Net gains at any point are the portfolio value minus all money injected
//! so far, so loan interest shows up as a drag on net gains even though
//! the borrowed principal itself was invested.

use crate::models::cycle::StrategyCycle;
use crate::models::scenario::ScenarioParams;
use crate::models::simulation::{ScenarioOutcome, YearBreakdown};
use crate::services::rates;

/// Round a monetary value to cents for presentation.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simulate a scenario over all of its cycles.
///
/// # Arguments
///
/// * `cycles` - Strategy cycles, executed in order
/// * `params` - Investment rate and starting age for this scenario
///
/// # Returns
///
/// A [`ScenarioOutcome`] holding the chart series, one [`YearBreakdown`]
/// per simulated year, and the rounded summary figures. An empty cycle
/// list yields empty series and zeroed summary values.
pub fn simulate_scenario(cycles: &[StrategyCycle], params: &ScenarioParams) -> ScenarioOutcome {
    let monthly_investment_rate = rates::annual_to_monthly_rate(params.annual_investment_rate);

    let mut portfolio = 0.0_f64;
    let mut total_out_of_pocket = 0.0_f64;
    let mut age = params.start_age;

    let mut ages = Vec::new();
    let mut net_gains_by_year = Vec::new();
    let mut years: Vec<YearBreakdown> = Vec::new();

    for cycle in cycles {
        // The borrowed amount is invested the moment the cycle starts.
        portfolio += cycle.loan_amount;

        for year_index in 0..cycle.duration_years() {
            let portfolio_before = portfolio;
            let mut out_of_pocket_year = 0.0_f64;

            for _ in 0..12 {
                // Loan repayment: out of pocket, not into the portfolio
                if year_index < cycle.loan_repayment_years {
                    out_of_pocket_year += cycle.monthly_repayment;
                }

                // Contribution: out of pocket and into the portfolio
                if year_index < cycle.contribution_years {
                    out_of_pocket_year += cycle.monthly_contribution;
                    portfolio += cycle.monthly_contribution;
                }

                // One month of growth on the whole portfolio
                portfolio = rates::compound_growth(portfolio, monthly_investment_rate, 1);
            }

            total_out_of_pocket += out_of_pocket_year;

            let portfolio_after = portfolio;
            let roi = (portfolio_after - portfolio_before) - out_of_pocket_year;
            let net_gains = portfolio - total_out_of_pocket;

            age += 1;
            ages.push(age);
            net_gains_by_year.push(net_gains);

            years.push(YearBreakdown {
                // Cumulative numbering: year 1 of cycle 2 continues where
                // cycle 1 left off
                year: ages.len() as u32,
                age_end: age,
                portfolio_before,
                out_of_pocket: out_of_pocket_year,
                portfolio_after,
                roi,
                delta: roi - out_of_pocket_year,
                net_gains,
            });
        }
    }

    ScenarioOutcome {
        ages,
        net_gains_by_year,
        years,
        final_portfolio: round_cents(portfolio),
        total_out_of_pocket: round_cents(total_out_of_pocket),
        net_gains: round_cents(portfolio - total_out_of_pocket),
    }
}
