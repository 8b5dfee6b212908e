use crate::state::GameState;
use tracing::instrument;

#[instrument(skip_all, name = "calendar")]
pub fn run_calendar_tick(state: &mut GameState, days: u32) {
    if days == 0 {
        return;
    }
    state.date = state.date.add_days(days);
    log::debug!("date advanced {} day(s) to {}", days, state.date);
}
