use crate::config::EconomyConfig;
use crate::fixed::Fixed;
use crate::state::GameState;
use tracing::instrument;

/// Accrues one second of interest on outstanding debt.
///
/// Every tier whose threshold is at or below the debt adds `debt * rate`, so a
/// debt of 600 pays both the 100 and 500 tier rates. Returns the amount added.
#[instrument(skip_all, name = "interest")]
pub fn run_interest_tick(state: &mut GameState, economy: &EconomyConfig) -> Fixed {
    let debt = state.bank.debt;
    if !debt.is_positive() {
        return Fixed::ZERO;
    }

    let accrued: Fixed = economy
        .interest_tiers
        .iter()
        .filter(|tier| tier.threshold <= debt)
        .map(|tier| debt * tier.rate)
        .sum();

    state.bank.accrued_interest += accrued;
    log::debug!(
        "interest +{} on debt {} -> {}",
        accrued,
        debt,
        state.bank.accrued_interest
    );
    accrued
}
