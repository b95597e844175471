//! Interest rate and annuity math.
//!
//! Small pure functions shared by cycle construction and the simulation
//! loop. Everything here works on effective monthly rates: annual rates
//! are converted with the compound-equivalent formula, not divided by 12.

/// Grow `principal` for `months` months at the effective monthly rate.
pub fn compound_growth(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    principal * (1.0 + monthly_rate).powi(months as i32)
}

/// Convert an effective annual rate into the equivalent monthly rate.
///
/// Satisfies `(1 + monthly)^12 == 1 + annual`.
pub fn annual_to_monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Fixed monthly annuity payment that repays `principal` over `years`.
///
/// # Edge Cases
///
/// - Zero-length schedule: returns 0.0 (there is no loan to repay)
/// - Zero interest rate: the payment is simply `principal / n_months`
pub fn monthly_repayment(principal: f64, annual_interest_rate: f64, years: u32) -> f64 {
    let monthly_interest_rate = annual_to_monthly_rate(annual_interest_rate);
    let n_months = years * 12;

    if n_months == 0 {
        return 0.0;
    }
    if monthly_interest_rate == 0.0 {
        return principal / n_months as f64;
    }

    let growth = (1.0 + monthly_interest_rate).powi(n_months as i32);
    let numerator = monthly_interest_rate * growth;
    let denominator = growth - 1.0;

    principal * (numerator / denominator)
}
