use crate::fixed::Fixed;
use crate::state::GameState;
use tracing::instrument;

/// Pays one second of income: tax plus business income from every owned territory.
#[instrument(skip_all, name = "income")]
pub fn run_income_tick(state: &mut GameState) -> Fixed {
    let earned = state.income_per_second();
    if earned.is_positive() {
        state.money += earned;
        log::debug!("income +{} -> {}", earned, state.money);
    }
    earned
}
