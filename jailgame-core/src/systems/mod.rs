//! Time-driven economy systems.

pub mod calendar;
pub mod income;
pub mod interest;

pub use calendar::run_calendar_tick;
pub use income::run_income_tick;
pub use interest::run_interest_tick;

use crate::clock::IntervalTimer;
use crate::config::GameConfig;
use crate::state::GameState;
use std::time::Duration;

/// Last-run bookkeeping for each accrual, in simulation time.
#[derive(Debug, Clone)]
pub struct AccrualTimers {
    pub income: IntervalTimer,
    pub interest: IntervalTimer,
    pub day: IntervalTimer,
}

impl AccrualTimers {
    pub fn new(config: &GameConfig) -> Self {
        let economy = &config.economy;
        Self {
            income: IntervalTimer::new(economy.income_interval),
            interest: IntervalTimer::new(economy.interest_interval),
            day: IntervalTimer::new(economy.day_interval),
        }
    }
}

/// Runs every accrual that is due at simulation time `now`.
///
/// Each one fires at most once per call and then restarts its timer from
/// `now`, so a long frame pays a single interval's worth.
pub fn run_accruals(
    state: &mut GameState,
    config: &GameConfig,
    timers: &mut AccrualTimers,
    now: Duration,
) {
    if timers.income.is_due(now) {
        run_income_tick(state);
        timers.income.reset(now);
    }

    if !config.is_full() {
        return;
    }

    // The interest timer stays stale while there is no debt.
    if state.bank.debt.is_positive() && timers.interest.is_due(now) {
        run_interest_tick(state, &config.economy);
        timers.interest.reset(now);
    }

    if timers.day.is_due(now) {
        let days = timers.day.elapsed_intervals(now);
        run_calendar_tick(state, days);
        timers.day.reset(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Fixed;
    use crate::state::{BusinessKind, Date};
    use crate::testing::GameStateBuilder;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_nothing_fires_before_first_interval() {
        let (config, mut state) = GameStateBuilder::full()
            .owning("France")
            .with_business(BusinessKind::GunProduction, "France")
            .debt(600)
            .build_with_config();
        let mut timers = AccrualTimers::new(&config);

        run_accruals(&mut state, &config, &mut timers, Duration::from_millis(999));

        assert_eq!(state.money, Fixed::ZERO);
        assert_eq!(state.bank.accrued_interest, Fixed::ZERO);
        assert_eq!(state.date, Date::new(2010, 12, 2));
    }

    #[test]
    fn test_long_frame_pays_once_and_drops_remainder() {
        let (config, mut state) = GameStateBuilder::full()
            .owning("France")
            .with_business(BusinessKind::GunProduction, "France")
            .build_with_config();
        let mut timers = AccrualTimers::new(&config);

        run_accruals(&mut state, &config, &mut timers, Duration::from_millis(3500));
        assert_eq!(state.money, Fixed::from_int(100));

        // Timer restarted at 3.5s, so 4.4s is not yet due.
        run_accruals(&mut state, &config, &mut timers, Duration::from_millis(4400));
        assert_eq!(state.money, Fixed::from_int(100));

        run_accruals(&mut state, &config, &mut timers, Duration::from_millis(4500));
        assert_eq!(state.money, Fixed::from_int(200));
    }

    #[test]
    fn test_calendar_advances_whole_days() {
        let (config, mut state) = GameStateBuilder::full().build_with_config();
        let mut timers = AccrualTimers::new(&config);

        run_accruals(&mut state, &config, &mut timers, secs(12));
        assert_eq!(state.date, Date::new(2010, 12, 4));

        // Remainder from the first call was dropped.
        run_accruals(&mut state, &config, &mut timers, secs(16));
        assert_eq!(state.date, Date::new(2010, 12, 4));
        run_accruals(&mut state, &config, &mut timers, secs(17));
        assert_eq!(state.date, Date::new(2010, 12, 5));
    }

    #[test]
    fn test_tax_only_has_no_calendar_or_interest() {
        let (config, mut state) = GameStateBuilder::tax_only()
            .owning("Germany")
            .money(0)
            .debt(600)
            .build_with_config();
        let mut timers = AccrualTimers::new(&config);

        run_accruals(&mut state, &config, &mut timers, secs(10));

        assert_eq!(state.money, Fixed::from_int(15));
        assert_eq!(state.bank.accrued_interest, Fixed::ZERO);
        assert_eq!(state.date, Date::new(2010, 12, 2));
    }

    #[test]
    fn test_interest_timer_is_stale_until_debt_exists() {
        let (config, mut state) = GameStateBuilder::full().build_with_config();
        let mut timers = AccrualTimers::new(&config);

        run_accruals(&mut state, &config, &mut timers, secs(30));
        state.bank.debt = Fixed::from_int(100);

        // Borrowing long after the last reset accrues on the very next update.
        run_accruals(&mut state, &config, &mut timers, Duration::from_millis(30_016));
        assert_eq!(state.bank.accrued_interest, Fixed::from_raw(1000));
    }
}
