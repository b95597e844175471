//! Scenario service - Cycle management and DCA mirroring.
//!
//! This service owns every mutation of a session's scenarios:
//! - Building validated cycles (with their derived monthly repayment)
//! - Adding, replacing, and removing cycles
//! - Applying session-level parameter updates
//! - Keeping scenario 2 in sync as a DCA mirror of scenario 1
//!
//! # Lump Sum vs. DCA
//!
//! While the session's compare flag is on, scenario 2 is owned by the
//! service: every scenario 1 mutation rebuilds it, and direct edits to it
//! are rejected. Each mirror cycle invests the exact monthly loan payment
//! of its source cycle, for the source cycle's full duration, without any
//! borrowing. This answers the classic question: given the same monthly
//! budget, is it better to borrow-and-invest a lump sum or to
//! dollar-cost-average?

use crate::error::AppError;
use crate::models::cycle::{CycleRequest, StrategyCycle};
use crate::models::scenario::{ScenarioId, UpdateParamsRequest};
use crate::models::session::Session;
use crate::services::rates;

/// Build a validated cycle from a request.
///
/// The monthly repayment is derived from the loan fields here, once, and
/// stored on the cycle.
///
/// # Errors
///
/// Returns `AppError::InvalidRequest` if any field is out of range.
pub fn build_cycle(request: &CycleRequest) -> Result<StrategyCycle, AppError> {
    request.validate()?;

    Ok(StrategyCycle {
        loan_amount: request.loan_amount,
        loan_interest_rate: request.loan_interest_rate,
        loan_repayment_years: request.loan_repayment_years,
        monthly_contribution: request.monthly_contribution,
        contribution_years: request.contribution_years,
        monthly_repayment: rates::monthly_repayment(
            request.loan_amount,
            request.loan_interest_rate,
            request.loan_repayment_years,
        ),
        auto_generated: false,
    })
}

/// Derive the DCA mirror of a list of lump-sum cycles.
///
/// For each source cycle the mirror cycle:
/// - borrows nothing (all loan fields zeroed)
/// - contributes the source cycle's monthly loan payment instead
/// - runs for the source cycle's full duration
pub fn derive_dca_cycles(source: &[StrategyCycle]) -> Vec<StrategyCycle> {
    source
        .iter()
        .map(|cycle| StrategyCycle {
            loan_amount: 0.0,
            loan_interest_rate: 0.0,
            loan_repayment_years: 0,
            monthly_contribution: cycle.monthly_repayment,
            contribution_years: cycle.duration_years(),
            monthly_repayment: 0.0,
            auto_generated: true,
        })
        .collect()
}

/// Rebuild scenario 2 from scenario 1 if the session compares
/// lump sum against DCA. No-op otherwise.
fn sync_dca_mirror(session: &mut Session) {
    if session.compare_lump_sum_dca {
        session.scenario2_cycles = derive_dca_cycles(&session.scenario1_cycles);
    }
}

/// Reject mutations of scenario 2 while it is a derived mirror.
fn ensure_unlocked(session: &Session, scenario: ScenarioId) -> Result<(), AppError> {
    if scenario == ScenarioId::Two && session.compare_lump_sum_dca {
        return Err(AppError::CycleLocked);
    }
    Ok(())
}

/// Append a cycle to a scenario.
///
/// # Returns
///
/// The 0-based index of the new cycle.
///
/// # Errors
///
/// - `CycleLocked`: scenario 2 while the compare flag is on
/// - `InvalidRequest`: cycle fields out of range
pub fn add_cycle(
    session: &mut Session,
    scenario: ScenarioId,
    request: &CycleRequest,
) -> Result<usize, AppError> {
    ensure_unlocked(session, scenario)?;
    let cycle = build_cycle(request)?;

    let cycles = session.cycles_mut(scenario);
    cycles.push(cycle);
    let index = cycles.len() - 1;

    sync_dca_mirror(session);
    Ok(index)
}

/// Replace the cycle at `index` with freshly validated fields.
///
/// The monthly repayment is recomputed and the auto-generated marker is
/// cleared, since the cycle now reflects manual input.
///
/// # Errors
///
/// - `CycleLocked`: scenario 2 while the compare flag is on
/// - `CycleNotFound`: index out of range
/// - `InvalidRequest`: cycle fields out of range
pub fn update_cycle(
    session: &mut Session,
    scenario: ScenarioId,
    index: usize,
    request: &CycleRequest,
) -> Result<(), AppError> {
    ensure_unlocked(session, scenario)?;
    let cycle = build_cycle(request)?;

    let cycles = session.cycles_mut(scenario);
    if index >= cycles.len() {
        return Err(AppError::CycleNotFound);
    }
    cycles[index] = cycle;

    sync_dca_mirror(session);
    Ok(())
}

/// Remove the cycle at `index`; later cycles shift down.
///
/// # Errors
///
/// - `CycleLocked`: scenario 2 while the compare flag is on
/// - `CycleNotFound`: index out of range
pub fn remove_cycle(
    session: &mut Session,
    scenario: ScenarioId,
    index: usize,
) -> Result<(), AppError> {
    ensure_unlocked(session, scenario)?;

    let cycles = session.cycles_mut(scenario);
    if index >= cycles.len() {
        return Err(AppError::CycleNotFound);
    }
    cycles.remove(index);

    sync_dca_mirror(session);
    Ok(())
}

/// Apply a session-level settings update.
///
/// Omitted fields keep their current values. Enabling the compare flag
/// immediately rebuilds scenario 2 from scenario 1; disabling it leaves
/// the derived cycles in place but editable again.
///
/// # Errors
///
/// Returns `AppError::InvalidRequest` if any supplied parameter is out of
/// range. Nothing is applied on error.
pub fn apply_params_update(
    session: &mut Session,
    request: &UpdateParamsRequest,
) -> Result<(), AppError> {
    // Validate everything before touching the session.
    if let Some(ref params) = request.scenario1 {
        params.validate()?;
    }
    if let Some(ref params) = request.scenario2 {
        params.validate()?;
    }

    if let Some(ref params) = request.scenario1 {
        session.scenario1_params = params.clone();
    }
    if let Some(ref params) = request.scenario2 {
        session.scenario2_params = params.clone();
    }
    if let Some(compare) = request.compare_lump_sum_dca {
        session.compare_lump_sum_dca = compare;
    }

    sync_dca_mirror(session);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_session() -> Session {
        Session::new(Duration::minutes(60))
    }

    fn loan_request() -> CycleRequest {
        CycleRequest {
            loan_amount: 120_000.0,
            loan_interest_rate: 0.0,
            loan_repayment_years: 10,
            monthly_contribution: 200.0,
            contribution_years: 4,
        }
    }

    fn enable_compare(session: &mut Session) {
        let request = UpdateParamsRequest {
            compare_lump_sum_dca: Some(true),
            scenario1: None,
            scenario2: None,
        };
        apply_params_update(session, &request).unwrap();
    }

    #[test]
    fn add_cycle_derives_the_monthly_repayment() {
        let mut session = new_session();
        let index = add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();

        assert_eq!(index, 0);
        let cycle = &session.scenario1_cycles[0];
        // 120k at 0% over 10 years is exactly 1000 a month.
        assert!((cycle.monthly_repayment - 1_000.0).abs() < 1e-9);
        assert!(!cycle.auto_generated);
    }

    #[test]
    fn add_cycle_rejects_invalid_fields() {
        let mut session = new_session();
        let mut request = loan_request();
        request.loan_interest_rate = 2.0;

        let result = add_cycle(&mut session, ScenarioId::One, &request);
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(session.scenario1_cycles.is_empty());
    }

    #[test]
    fn update_cycle_recomputes_and_bounds_checks() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();

        let mut request = loan_request();
        request.loan_amount = 60_000.0;
        update_cycle(&mut session, ScenarioId::One, 0, &request).unwrap();
        assert!((session.scenario1_cycles[0].monthly_repayment - 500.0).abs() < 1e-9);

        let result = update_cycle(&mut session, ScenarioId::One, 5, &loan_request());
        assert!(matches!(result, Err(AppError::CycleNotFound)));
    }

    #[test]
    fn remove_cycle_shifts_later_cycles_down() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();
        let mut second = loan_request();
        second.loan_amount = 60_000.0;
        add_cycle(&mut session, ScenarioId::One, &second).unwrap();

        remove_cycle(&mut session, ScenarioId::One, 0).unwrap();
        assert_eq!(session.scenario1_cycles.len(), 1);
        assert_eq!(session.scenario1_cycles[0].loan_amount, 60_000.0);

        let result = remove_cycle(&mut session, ScenarioId::One, 1);
        assert!(matches!(result, Err(AppError::CycleNotFound)));
    }

    #[test]
    fn dca_mirror_trades_the_loan_for_contributions() {
        let source = vec![build_cycle(&loan_request()).unwrap()];
        let mirror = derive_dca_cycles(&source);

        assert_eq!(mirror.len(), 1);
        let cycle = &mirror[0];
        assert_eq!(cycle.loan_amount, 0.0);
        assert_eq!(cycle.loan_interest_rate, 0.0);
        assert_eq!(cycle.loan_repayment_years, 0);
        // Contributes the source's monthly payment for the source's
        // full duration (10 repayment years beats 4 contribution years).
        assert!((cycle.monthly_contribution - 1_000.0).abs() < 1e-9);
        assert_eq!(cycle.contribution_years, 10);
        assert_eq!(cycle.monthly_repayment, 0.0);
        assert!(cycle.auto_generated);
    }

    #[test]
    fn enabling_compare_rebuilds_scenario_two() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();
        add_cycle(&mut session, ScenarioId::Two, &loan_request()).unwrap();

        enable_compare(&mut session);

        assert_eq!(session.scenario2_cycles.len(), 1);
        assert!(session.scenario2_cycles[0].auto_generated);
    }

    #[test]
    fn scenario_one_edits_resync_the_mirror() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();
        enable_compare(&mut session);

        let mut request = loan_request();
        request.loan_amount = 60_000.0;
        update_cycle(&mut session, ScenarioId::One, 0, &request).unwrap();

        assert!((session.scenario2_cycles[0].monthly_contribution - 500.0).abs() < 1e-9);
    }

    #[test]
    fn locked_scenario_two_rejects_all_mutations() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();
        enable_compare(&mut session);

        let add = add_cycle(&mut session, ScenarioId::Two, &loan_request());
        assert!(matches!(add, Err(AppError::CycleLocked)));
        let update = update_cycle(&mut session, ScenarioId::Two, 0, &loan_request());
        assert!(matches!(update, Err(AppError::CycleLocked)));
        let remove = remove_cycle(&mut session, ScenarioId::Two, 0);
        assert!(matches!(remove, Err(AppError::CycleLocked)));
    }

    #[test]
    fn disabling_compare_unlocks_the_derived_cycles() {
        let mut session = new_session();
        add_cycle(&mut session, ScenarioId::One, &loan_request()).unwrap();
        enable_compare(&mut session);

        let request = UpdateParamsRequest {
            compare_lump_sum_dca: Some(false),
            scenario1: None,
            scenario2: None,
        };
        apply_params_update(&mut session, &request).unwrap();

        // The derived cycles stay, but are editable again.
        assert_eq!(session.scenario2_cycles.len(), 1);
        remove_cycle(&mut session, ScenarioId::Two, 0).unwrap();
        assert!(session.scenario2_cycles.is_empty());
    }

    #[test]
    fn params_update_is_all_or_nothing() {
        use crate::models::scenario::ScenarioParams;

        let mut session = new_session();
        let request = UpdateParamsRequest {
            compare_lump_sum_dca: Some(true),
            scenario1: Some(ScenarioParams {
                annual_investment_rate: 0.05,
                start_age: 40,
            }),
            scenario2: Some(ScenarioParams {
                annual_investment_rate: 3.0,
                start_age: 30,
            }),
        };

        let result = apply_params_update(&mut session, &request);
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        // Nothing was applied, including the valid scenario 1 params.
        assert_eq!(session.scenario1_params.start_age, 30);
        assert!(!session.compare_lump_sum_dca);
    }
}
