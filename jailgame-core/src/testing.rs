use crate::config::GameConfig;
use crate::fixed::Fixed;
use crate::state::{Business, BusinessId, BusinessKind, Date, GameState, GangMember, MemberId};
use crate::step::recompute_business_income;

/// Builds game states for tests without replaying player actions.
pub struct GameStateBuilder {
    config: GameConfig,
    state: GameState,
}

impl GameStateBuilder {
    pub fn new(config: GameConfig) -> Self {
        let state = config.initial_state();
        Self { config, state }
    }

    pub fn full() -> Self {
        Self::new(GameConfig::full())
    }

    pub fn tax_only() -> Self {
        Self::new(GameConfig::tax_only())
    }

    pub fn money(mut self, amount: i64) -> Self {
        self.state.money = Fixed::from_int(amount);
        self
    }

    pub fn date(mut self, year: i32, month: u8, day: u8) -> Self {
        self.state.date = Date::new(year, month, day);
        self
    }

    /// Marks a territory as owned. The first one owned becomes headquarters
    /// and uses up the free purchase.
    pub fn owning(mut self, name: &str) -> Self {
        let id = self
            .state
            .find_territory(name)
            .unwrap_or_else(|| panic!("no territory named {name}"));
        self.state.territories[id.index()].owned = true;
        if self.state.headquarters.is_none() {
            self.state.headquarters = Some(id);
        }
        self.state.first_purchase = false;
        self
    }

    /// Adds `n` unassigned members, numbered after any already hired.
    pub fn with_members(mut self, n: u32) -> Self {
        for _ in 0..n {
            let number = self.state.next_member_number;
            self.state.next_member_number += 1;
            self.state.pool.push(GangMember {
                id: MemberId(number),
                name: format!("Gang Member {number}"),
            });
        }
        self
    }

    /// Places a running business in a territory, which must already be owned.
    pub fn with_business(mut self, kind: BusinessKind, territory: &str) -> Self {
        let tid = self
            .state
            .find_territory(territory)
            .unwrap_or_else(|| panic!("no territory named {territory}"));
        let id = BusinessId(self.state.next_business_id);
        self.state.next_business_id += 1;
        self.state.businesses.push(Business {
            id,
            kind,
            territory: tid,
        });
        self.state.territories[tid.index()].business = Some(id);
        recompute_business_income(&mut self.state, &self.config.economy, tid);
        self
    }

    pub fn pending_business(mut self, kind: BusinessKind) -> Self {
        self.state.pending_business = Some(kind);
        self
    }

    pub fn debt(mut self, amount: i64) -> Self {
        self.state.bank.debt = Fixed::from_int(amount);
        self
    }

    pub fn interest(mut self, amount: Fixed) -> Self {
        self.state.bank.accrued_interest = amount;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn build(self) -> GameState {
        self.state
    }

    pub fn build_with_config(self) -> (GameConfig, GameState) {
        (self.config, self.state)
    }
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let state = GameStateBuilder::default()
            .owning("Italy")
            .owning("Poland")
            .with_business(BusinessKind::GunProduction, "Poland")
            .with_members(2)
            .money(42)
            .build();

        let italy = state.find_territory("Italy").unwrap();
        let poland = state.find_territory("Poland").unwrap();
        assert_eq!(state.headquarters, Some(italy));
        assert!(!state.first_purchase);
        assert_eq!(state.owned_count(), 2);
        assert_eq!(state.territory(poland).unwrap().business_income, Fixed::from_int(100));
        assert_eq!(state.pool.len(), 2);
        assert_eq!(state.next_member_number, 3);
        assert_eq!(state.money, Fixed::from_int(42));
    }
}
