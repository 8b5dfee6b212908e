//! Player actions against the game state.
//!
//! Every command either applies completely or fails with an [`ActionError`]
//! and leaves the state untouched.

use crate::config::{EconomyConfig, GameConfig};
use crate::fixed::Fixed;
use crate::input::Command;
use crate::state::{
    Business, BusinessId, BusinessKind, GameState, GangMember, MemberId, MemberLocation,
    TerritoryId,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Not enough money to {action}!")]
    InsufficientFunds {
        action: String,
        required: Fixed,
        available: Fixed,
    },
    #[error("{0} is already yours!")]
    AlreadyOwned(String),
    #[error("You don't own {0}!")]
    NotOwned(String),
    #[error("You must own a country to start a business!")]
    NoTerritoryOwned,
    #[error("{0} already runs a business!")]
    BusinessSlotTaken(String),
    #[error("{0} is still waiting for a location!")]
    PendingBusinessExists(BusinessKind),
    #[error("No business is waiting for a location!")]
    NoPendingBusiness,
    #[error("{0} is already assigned to a country!")]
    MemberNotInPool(String),
    #[error("{0} is not assigned to a country!")]
    MemberNotAssigned(String),
    #[error("The bank does not lend ${0}!")]
    InvalidBorrowAmount(Fixed),
    #[error("You have no debt to pay off!")]
    NoDebt,
    #[error("Unknown territory {0:?}")]
    UnknownTerritory(TerritoryId),
    #[error("Unknown gang member {0:?}")]
    UnknownMember(MemberId),
    #[error("Unknown business {0:?}")]
    UnknownBusiness(BusinessId),
    #[error("{0} is not part of this game mode!")]
    NotAvailable(&'static str),
}

/// What a successful command did, phrased for the on-screen notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Bought { territory: String, cost: Fixed },
    HeadquartersMoved { territory: String },
    Hired { member: String },
    Sold { member: String, refund: Fixed },
    Assigned { member: String, territory: String },
    Unassigned { member: String, territory: String },
    BusinessPaid { kind: BusinessKind, cost: Fixed },
    BusinessPlaced { kind: BusinessKind, territory: String },
    PendingDiscarded { kind: BusinessKind },
    BusinessCancelled { kind: BusinessKind, territory: String, fee: Fixed },
    BusinessRelocated { kind: BusinessKind, territory: String },
    Borrowed { amount: Fixed },
    DebtRepaid { debt: Fixed, interest: Fixed },
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::Bought { territory, .. } => write!(f, "Bought {territory}!"),
            ActionOutcome::HeadquartersMoved { territory } => {
                write!(f, "HQ location changed to {territory}!")
            }
            ActionOutcome::Hired { member } => write!(f, "Bought a new gang member: {member}!"),
            ActionOutcome::Sold { member, refund } => write!(f, "Sold {member} for ${refund}!"),
            ActionOutcome::Assigned { member, territory } => {
                write!(f, "Assigned {member} to {territory}!")
            }
            ActionOutcome::Unassigned { member, territory } => {
                write!(f, "Unassigned {member} from {territory}!")
            }
            ActionOutcome::BusinessPaid { kind, cost } => {
                write!(f, "Selected {kind}! ${cost} deducted.")
            }
            ActionOutcome::BusinessPlaced { kind, territory } => {
                write!(f, "Assigned {kind} to {territory}!")
            }
            ActionOutcome::PendingDiscarded { kind } => {
                write!(f, "{kind} was never placed. The payment is lost.")
            }
            ActionOutcome::BusinessCancelled {
                kind,
                territory,
                fee,
            } => write!(f, "Cancelled {kind} in {territory} for ${fee}!"),
            ActionOutcome::BusinessRelocated { kind, territory } => {
                write!(f, "Relocated {kind} to {territory}!")
            }
            ActionOutcome::Borrowed { amount } => write!(f, "Borrowed ${amount} from the bank!"),
            ActionOutcome::DebtRepaid { debt, interest } => {
                write!(f, "Paid off ${debt} debt and ${} interest!", interest.trunc())
            }
        }
    }
}

/// Apply one command, logging the result.
pub fn execute_command(
    state: &mut GameState,
    config: &GameConfig,
    cmd: &Command,
) -> Result<ActionOutcome, ActionError> {
    let result = apply(state, config, cmd);
    match &result {
        Ok(outcome) => log::info!("{:?} -> {}", cmd, outcome),
        Err(e) => log::warn!("Rejected {:?}: {}", cmd, e),
    }
    result
}

fn apply(
    state: &mut GameState,
    config: &GameConfig,
    cmd: &Command,
) -> Result<ActionOutcome, ActionError> {
    let economy = &config.economy;

    if !config.is_full() && !matches!(cmd, Command::BuyTerritory(_)) {
        return Err(ActionError::NotAvailable(feature_name(cmd)));
    }

    match *cmd {
        Command::BuyTerritory(id) => buy_territory(state, id),
        Command::ChangeHeadquarters(id) => {
            let territory = owned_territory_name(state, id)?;
            state.headquarters = Some(id);
            Ok(ActionOutcome::HeadquartersMoved { territory })
        }
        Command::HireMember => hire_member(state, economy),
        Command::SellMember(member) => sell_member(state, economy, member),
        Command::AssignMember { member, territory } => {
            assign_member(state, economy, member, territory)
        }
        Command::UnassignMember(member) => unassign_member(state, economy, member),
        Command::StartBusiness(kind) => start_business(state, economy, kind),
        Command::PlaceBusiness(territory) => place_business(state, economy, territory),
        Command::DiscardPendingBusiness => state
            .pending_business
            .take()
            .map(|kind| ActionOutcome::PendingDiscarded { kind })
            .ok_or(ActionError::NoPendingBusiness),
        Command::CancelBusiness(business) => cancel_business(state, economy, business),
        Command::RelocateBusiness {
            business,
            territory,
        } => relocate_business(state, economy, business, territory),
        Command::Borrow(amount) => {
            if !economy.borrow_amounts.contains(&amount) {
                return Err(ActionError::InvalidBorrowAmount(amount));
            }
            state.money += amount;
            state.bank.debt += amount;
            Ok(ActionOutcome::Borrowed { amount })
        }
        Command::RepayDebt => repay_debt(state),
    }
}

fn feature_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::BuyTerritory(_) => "Buying",
        Command::ChangeHeadquarters(_) => "HQ",
        Command::HireMember
        | Command::SellMember(_)
        | Command::AssignMember { .. }
        | Command::UnassignMember(_) => "The gang",
        Command::StartBusiness(_)
        | Command::PlaceBusiness(_)
        | Command::DiscardPendingBusiness
        | Command::CancelBusiness(_)
        | Command::RelocateBusiness { .. } => "Business",
        Command::Borrow(_) | Command::RepayDebt => "The bank",
    }
}

fn territory_name(state: &GameState, id: TerritoryId) -> Result<String, ActionError> {
    state
        .territory(id)
        .map(|t| t.name.clone())
        .ok_or(ActionError::UnknownTerritory(id))
}

fn owned_territory_name(state: &GameState, id: TerritoryId) -> Result<String, ActionError> {
    let territory = state
        .territory(id)
        .ok_or(ActionError::UnknownTerritory(id))?;
    if !territory.owned {
        return Err(ActionError::NotOwned(territory.name.clone()));
    }
    Ok(territory.name.clone())
}

fn require_funds(state: &GameState, required: Fixed, action: &str) -> Result<(), ActionError> {
    if state.money < required {
        return Err(ActionError::InsufficientFunds {
            action: action.to_string(),
            required,
            available: state.money,
        });
    }
    Ok(())
}

/// Recompute a territory's business income from its current roster size.
///
/// Income = base × (1 + bonus × members), truncated to whole dollars.
pub fn recompute_business_income(state: &mut GameState, economy: &EconomyConfig, id: TerritoryId) {
    let kind = state
        .territory(id)
        .and_then(|t| t.business)
        .and_then(|b| state.business(b))
        .map(|b| b.kind);

    let Some(territory) = state.territory_mut(id) else {
        return;
    };
    territory.business_income = match kind {
        Some(kind) => {
            let members = territory.roster.len() as i64;
            let factor = Fixed::ONE + economy.member_income_bonus.times(members);
            (economy.base_rate(kind) * factor).trunc()
        }
        None => Fixed::ZERO,
    };
}

fn buy_territory(state: &mut GameState, id: TerritoryId) -> Result<ActionOutcome, ActionError> {
    let first_purchase = state.first_purchase;
    let territory = state
        .territory(id)
        .ok_or(ActionError::UnknownTerritory(id))?;
    if territory.owned {
        return Err(ActionError::AlreadyOwned(territory.name.clone()));
    }

    let cost = if first_purchase {
        Fixed::ZERO
    } else {
        territory.cost
    };
    let name = territory.name.clone();
    require_funds(state, cost, &format!("buy {name}"))?;

    state.money -= cost;
    if let Some(t) = state.territory_mut(id) {
        t.owned = true;
    }
    if first_purchase {
        state.first_purchase = false;
        state.headquarters = Some(id);
    }
    Ok(ActionOutcome::Bought {
        territory: name,
        cost,
    })
}

fn hire_member(
    state: &mut GameState,
    economy: &EconomyConfig,
) -> Result<ActionOutcome, ActionError> {
    require_funds(state, economy.hire_cost, "buy a gang member")?;

    state.money -= economy.hire_cost;
    let number = state.next_member_number;
    state.next_member_number += 1;
    let member = GangMember {
        id: MemberId(number),
        name: format!("Gang Member {number}"),
    };
    let name = member.name.clone();
    state.pool.push(member);
    Ok(ActionOutcome::Hired { member: name })
}

/// Remove a member from whichever collection holds it.
fn take_member(state: &mut GameState, id: MemberId) -> Option<(GangMember, MemberLocation)> {
    let location = state.member_location(id)?;
    let collection = match location {
        MemberLocation::Pool => &mut state.pool,
        MemberLocation::Territory(tid) => &mut state.territory_mut(tid)?.roster,
    };
    let index = collection.iter().position(|m| m.id == id)?;
    Some((collection.remove(index), location))
}

fn sell_member(
    state: &mut GameState,
    economy: &EconomyConfig,
    id: MemberId,
) -> Result<ActionOutcome, ActionError> {
    let (member, location) = take_member(state, id).ok_or(ActionError::UnknownMember(id))?;
    if let MemberLocation::Territory(tid) = location {
        recompute_business_income(state, economy, tid);
    }
    state.money += economy.sell_refund;
    Ok(ActionOutcome::Sold {
        member: member.name,
        refund: economy.sell_refund,
    })
}

fn assign_member(
    state: &mut GameState,
    economy: &EconomyConfig,
    id: MemberId,
    territory: TerritoryId,
) -> Result<ActionOutcome, ActionError> {
    let territory_name = owned_territory_name(state, territory)?;
    match state.member_location(id) {
        None => return Err(ActionError::UnknownMember(id)),
        Some(MemberLocation::Territory(_)) => {
            let name = state.member(id).map(|m| m.name.clone()).unwrap_or_default();
            return Err(ActionError::MemberNotInPool(name));
        }
        Some(MemberLocation::Pool) => {}
    }

    let (member, _) = take_member(state, id).ok_or(ActionError::UnknownMember(id))?;
    let name = member.name.clone();
    if let Some(t) = state.territory_mut(territory) {
        t.roster.push(member);
    }
    recompute_business_income(state, economy, territory);
    Ok(ActionOutcome::Assigned {
        member: name,
        territory: territory_name,
    })
}

fn unassign_member(
    state: &mut GameState,
    economy: &EconomyConfig,
    id: MemberId,
) -> Result<ActionOutcome, ActionError> {
    let tid = match state.member_location(id) {
        None => return Err(ActionError::UnknownMember(id)),
        Some(MemberLocation::Pool) => {
            let name = state.member(id).map(|m| m.name.clone()).unwrap_or_default();
            return Err(ActionError::MemberNotAssigned(name));
        }
        Some(MemberLocation::Territory(tid)) => tid,
    };

    let (member, _) = take_member(state, id).ok_or(ActionError::UnknownMember(id))?;
    let name = member.name.clone();
    state.pool.push(member);
    recompute_business_income(state, economy, tid);
    Ok(ActionOutcome::Unassigned {
        member: name,
        territory: territory_name(state, tid)?,
    })
}

fn start_business(
    state: &mut GameState,
    economy: &EconomyConfig,
    kind: BusinessKind,
) -> Result<ActionOutcome, ActionError> {
    if let Some(pending) = state.pending_business {
        return Err(ActionError::PendingBusinessExists(pending));
    }
    if state.owned_count() == 0 {
        return Err(ActionError::NoTerritoryOwned);
    }
    require_funds(state, economy.business_start_cost, "start a business")?;

    state.money -= economy.business_start_cost;
    state.pending_business = Some(kind);
    Ok(ActionOutcome::BusinessPaid {
        kind,
        cost: economy.business_start_cost,
    })
}

fn place_business(
    state: &mut GameState,
    economy: &EconomyConfig,
    territory: TerritoryId,
) -> Result<ActionOutcome, ActionError> {
    let kind = state
        .pending_business
        .ok_or(ActionError::NoPendingBusiness)?;
    let name = owned_territory_name(state, territory)?;
    if state.territory(territory).is_some_and(|t| t.business.is_some()) {
        return Err(ActionError::BusinessSlotTaken(name));
    }

    let id = BusinessId(state.next_business_id);
    state.next_business_id += 1;
    state.pending_business = None;
    state.businesses.push(Business {
        id,
        kind,
        territory,
    });
    if let Some(t) = state.territory_mut(territory) {
        t.business = Some(id);
    }
    recompute_business_income(state, economy, territory);
    Ok(ActionOutcome::BusinessPlaced {
        kind,
        territory: name,
    })
}

fn cancel_business(
    state: &mut GameState,
    economy: &EconomyConfig,
    id: BusinessId,
) -> Result<ActionOutcome, ActionError> {
    let index = state
        .businesses
        .iter()
        .position(|b| b.id == id)
        .ok_or(ActionError::UnknownBusiness(id))?;
    require_funds(state, economy.business_cancel_fee, "cancel this business")?;

    state.money -= economy.business_cancel_fee;
    let business = state.businesses.remove(index);
    if let Some(t) = state.territory_mut(business.territory) {
        t.business = None;
        t.business_income = Fixed::ZERO;
    }
    Ok(ActionOutcome::BusinessCancelled {
        kind: business.kind,
        territory: territory_name(state, business.territory)?,
        fee: economy.business_cancel_fee,
    })
}

fn relocate_business(
    state: &mut GameState,
    economy: &EconomyConfig,
    id: BusinessId,
    target: TerritoryId,
) -> Result<ActionOutcome, ActionError> {
    let business = state
        .business(id)
        .cloned()
        .ok_or(ActionError::UnknownBusiness(id))?;
    let name = owned_territory_name(state, target)?;
    if state.territory(target).is_some_and(|t| t.business.is_some()) {
        return Err(ActionError::BusinessSlotTaken(name));
    }

    if let Some(old) = state.territory_mut(business.territory) {
        old.business = None;
        old.business_income = Fixed::ZERO;
    }
    if let Some(b) = state.businesses.iter_mut().find(|b| b.id == id) {
        b.territory = target;
    }
    if let Some(t) = state.territory_mut(target) {
        t.business = Some(id);
    }
    recompute_business_income(state, economy, target);
    Ok(ActionOutcome::BusinessRelocated {
        kind: business.kind,
        territory: name,
    })
}

fn repay_debt(state: &mut GameState) -> Result<ActionOutcome, ActionError> {
    if !state.bank.debt.is_positive() {
        return Err(ActionError::NoDebt);
    }
    let total = state.bank.payoff_amount();
    require_funds(state, total, "pay debt and interest")?;

    state.money -= total;
    let repaid = ActionOutcome::DebtRepaid {
        debt: state.bank.debt,
        interest: state.bank.accrued_interest,
    };
    state.bank = Default::default();
    Ok(repaid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::GameStateBuilder;

    fn full() -> GameConfig {
        GameConfig::full()
    }

    fn id(state: &GameState, name: &str) -> TerritoryId {
        state.find_territory(name).unwrap()
    }

    #[test]
    fn test_first_purchase_is_free_even_when_broke() {
        let config = full();
        let mut state = GameStateBuilder::full().money(0).build();
        let france = id(&state, "France");

        let outcome = execute_command(&mut state, &config, &Command::BuyTerritory(france)).unwrap();

        assert_eq!(outcome.to_string(), "Bought France!");
        assert_eq!(state.money, Fixed::ZERO);
        assert!(state.territory(france).unwrap().owned);
        assert!(!state.first_purchase);
        assert_eq!(state.headquarters, Some(france));
    }

    #[test]
    fn test_purchase_scenario() {
        let config = full();
        let mut state = GameStateBuilder::full().money(1000).build();
        let france = id(&state, "France");
        let germany = id(&state, "Germany");

        execute_command(&mut state, &config, &Command::BuyTerritory(france)).unwrap();
        assert_eq!(state.money, Fixed::from_int(1000));

        execute_command(&mut state, &config, &Command::BuyTerritory(germany)).unwrap();
        assert_eq!(state.money, Fixed::from_int(775));

        let err =
            execute_command(&mut state, &config, &Command::BuyTerritory(germany)).unwrap_err();
        assert_eq!(err, ActionError::AlreadyOwned("Germany".into()));
        assert_eq!(state.money, Fixed::from_int(775));
        assert!(state.territory(germany).unwrap().owned);
        assert_eq!(state.headquarters, Some(france));
    }

    #[test]
    fn test_purchase_rejected_without_funds() {
        let config = full();
        let mut state = GameStateBuilder::full().owning("Spain").money(224).build();
        let germany = id(&state, "Germany");

        let err =
            execute_command(&mut state, &config, &Command::BuyTerritory(germany)).unwrap_err();

        assert_eq!(err.to_string(), "Not enough money to buy Germany!");
        assert_eq!(state.money, Fixed::from_int(224));
        assert!(!state.territory(germany).unwrap().owned);
    }

    #[test]
    fn test_tax_only_purchase_charges_full_cost() {
        let config = GameConfig::tax_only();
        let mut state = config.initial_state();
        let poland = id(&state, "Poland");

        execute_command(&mut state, &config, &Command::BuyTerritory(poland)).unwrap();

        assert_eq!(state.money, Fixed::from_int(30));
    }

    #[test]
    fn test_tax_only_rejects_gang_commands() {
        let config = GameConfig::tax_only();
        let mut state = config.initial_state();

        let err =
            execute_command(&mut state, &config, &Command::HireMember).unwrap_err();

        assert_eq!(err, ActionError::NotAvailable("The gang"));
        assert_eq!(state.money, Fixed::from_int(100));
    }

    #[test]
    fn test_hire_charges_and_names_sequentially() {
        let config = full();
        let mut state = GameStateBuilder::full().money(400).build();

        execute_command(&mut state, &config, &Command::HireMember).unwrap();
        execute_command(&mut state, &config, &Command::HireMember).unwrap();

        assert_eq!(state.money, Fixed::from_int(100));
        let names: Vec<_> = state.pool.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Gang Member 1", "Gang Member 2"]);

        let err =
            execute_command(&mut state, &config, &Command::HireMember).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientFunds { .. }));
        assert_eq!(state.pool.len(), 2);
    }

    #[test]
    fn test_member_names_never_reused_after_sale() {
        let config = full();
        let mut state = GameStateBuilder::full().money(1000).build();

        execute_command(&mut state, &config, &Command::HireMember).unwrap();
        execute_command(&mut state, &config, &Command::HireMember).unwrap();
        let first = state.pool[0].id;
        execute_command(&mut state, &config, &Command::SellMember(first)).unwrap();
        execute_command(&mut state, &config, &Command::HireMember).unwrap();

        let names: Vec<_> = state.pool.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Gang Member 2", "Gang Member 3"]);
    }

    #[test]
    fn test_sell_refunds_flat_amount_from_pool_and_roster() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("France")
            .with_members(2)
            .money(0)
            .build();
        let france = id(&state, "France");
        let (pooled, stationed) = (state.pool[0].id, state.pool[1].id);
        execute_command(
            &mut state,
            &config,
            &Command::AssignMember {
                member: stationed,
                territory: france,
            },
        )
        .unwrap();

        execute_command(&mut state, &config, &Command::SellMember(pooled)).unwrap();
        assert_eq!(state.money, Fixed::from_int(90));

        execute_command(&mut state, &config, &Command::SellMember(stationed)).unwrap();
        assert_eq!(state.money, Fixed::from_int(180));
        assert_eq!(state.member_count(), 0);
    }

    #[test]
    fn test_third_member_raises_gun_production_to_130() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("France")
            .with_business(BusinessKind::GunProduction, "France")
            .with_members(3)
            .build();
        let france = id(&state, "France");
        assert_eq!(state.territory(france).unwrap().business_income, Fixed::from_int(100));

        let members: Vec<_> = state.pool.iter().map(|m| m.id).collect();
        for member in members {
            execute_command(
                &mut state,
                &config,
                &Command::AssignMember {
                    member,
                    territory: france,
                },
            )
            .unwrap();
        }

        assert_eq!(state.territory(france).unwrap().business_income, Fixed::from_int(130));
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_income_truncates_to_whole_dollars() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("Italy")
            .with_business(BusinessKind::TaxFrauds, "Italy")
            .with_members(1)
            .build();
        let italy = id(&state, "Italy");
        let member = state.pool[0].id;

        execute_command(
            &mut state,
            &config,
            &Command::AssignMember {
                member,
                territory: italy,
            },
        )
        .unwrap();

        // 75 × 1.1 = 82.5
        assert_eq!(state.territory(italy).unwrap().business_income, Fixed::from_int(82));
    }

    #[test]
    fn test_unassign_moves_back_and_recomputes() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("France")
            .with_business(BusinessKind::DrugProduction, "France")
            .with_members(1)
            .build();
        let france = id(&state, "France");
        let member = state.pool[0].id;
        execute_command(
            &mut state,
            &config,
            &Command::AssignMember {
                member,
                territory: france,
            },
        )
        .unwrap();
        assert_eq!(state.territory(france).unwrap().business_income, Fixed::from_int(165));

        execute_command(&mut state, &config, &Command::UnassignMember(member)).unwrap();

        assert_eq!(state.member_location(member), Some(MemberLocation::Pool));
        assert!(state.territory(france).unwrap().roster.is_empty());
        assert_eq!(state.territory(france).unwrap().business_income, Fixed::from_int(150));

        let err =
            execute_command(&mut state, &config, &Command::UnassignMember(member)).unwrap_err();
        assert!(matches!(err, ActionError::MemberNotAssigned(_)));
    }

    #[test]
    fn test_assign_requires_owned_territory() {
        let config = full();
        let mut state = GameStateBuilder::full().with_members(1).build();
        let spain = id(&state, "Spain");
        let member = state.pool[0].id;

        let err = execute_command(
            &mut state,
            &config,
            &Command::AssignMember {
                member,
                territory: spain,
            },
        )
        .unwrap_err();

        assert_eq!(err, ActionError::NotOwned("Spain".into()));
        assert_eq!(state.pool.len(), 1);
    }

    #[test]
    fn test_business_charged_before_placement() {
        let config = full();
        let mut state = GameStateBuilder::full().owning("Poland").money(600).build();
        let poland = id(&state, "Poland");

        execute_command(
            &mut state,
            &config,
            &Command::StartBusiness(BusinessKind::LocalBusinessTakeover),
        )
        .unwrap();
        assert_eq!(state.money, Fixed::from_int(100));
        assert_eq!(state.pending_business, Some(BusinessKind::LocalBusinessTakeover));
        assert!(state.businesses.is_empty());

        execute_command(&mut state, &config, &Command::PlaceBusiness(poland)).unwrap();
        assert_eq!(state.pending_business, None);
        assert_eq!(state.businesses.len(), 1);
        let t = state.territory(poland).unwrap();
        assert_eq!(t.business, Some(state.businesses[0].id));
        assert_eq!(t.business_income, Fixed::from_int(50));
    }

    #[test]
    fn test_start_business_needs_funds_and_territory() {
        let config = full();
        let mut state = GameStateBuilder::full().money(10_000).build();
        let err = execute_command(
            &mut state,
            &config,
            &Command::StartBusiness(BusinessKind::GunProduction),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::NoTerritoryOwned);

        let mut state = GameStateBuilder::full().owning("France").money(499).build();
        let err = execute_command(
            &mut state,
            &config,
            &Command::StartBusiness(BusinessKind::GunProduction),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Not enough money to start a business!");
        assert_eq!(state.money, Fixed::from_int(499));
        assert_eq!(state.pending_business, None);
    }

    #[test]
    fn test_place_business_rejects_occupied_territory() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("France")
            .with_business(BusinessKind::GunProduction, "France")
            .money(500)
            .build();
        let france = id(&state, "France");
        execute_command(
            &mut state,
            &config,
            &Command::StartBusiness(BusinessKind::TaxFrauds),
        )
        .unwrap();

        let err =
            execute_command(&mut state, &config, &Command::PlaceBusiness(france)).unwrap_err();

        assert_eq!(err, ActionError::BusinessSlotTaken("France".into()));
        assert_eq!(state.businesses.len(), 1);
        assert_eq!(state.pending_business, Some(BusinessKind::TaxFrauds));
    }

    #[test]
    fn test_discarding_pending_business_forfeits_payment() {
        let config = full();
        let mut state = GameStateBuilder::full().owning("France").money(500).build();
        execute_command(
            &mut state,
            &config,
            &Command::StartBusiness(BusinessKind::GunProduction),
        )
        .unwrap();

        execute_command(&mut state, &config, &Command::DiscardPendingBusiness).unwrap();

        assert_eq!(state.money, Fixed::ZERO);
        assert_eq!(state.pending_business, None);
    }

    #[test]
    fn test_cancel_business_costs_fee_and_clears_slot() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("Germany")
            .with_business(BusinessKind::DrugProduction, "Germany")
            .money(700)
            .build();
        let germany = id(&state, "Germany");
        let business = state.businesses[0].id;

        let outcome =
            execute_command(&mut state, &config, &Command::CancelBusiness(business)).unwrap();

        assert_eq!(outcome.to_string(), "Cancelled Drug Production in Germany for $700!");
        assert_eq!(state.money, Fixed::ZERO);
        assert!(state.businesses.is_empty());
        let t = state.territory(germany).unwrap();
        assert_eq!(t.business, None);
        assert_eq!(t.business_income, Fixed::ZERO);
    }

    #[test]
    fn test_cancel_business_without_funds_changes_nothing() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("Germany")
            .with_business(BusinessKind::DrugProduction, "Germany")
            .money(699)
            .build();
        let business = state.businesses[0].id;

        let err =
            execute_command(&mut state, &config, &Command::CancelBusiness(business)).unwrap_err();

        assert!(matches!(err, ActionError::InsufficientFunds { .. }));
        assert_eq!(state.businesses.len(), 1);
        assert_eq!(state.money, Fixed::from_int(699));
    }

    #[test]
    fn test_relocate_moves_income_to_new_roster_size() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .owning("France")
            .owning("Spain")
            .with_business(BusinessKind::GunProduction, "France")
            .with_members(2)
            .money(0)
            .build();
        let (france, spain) = (id(&state, "France"), id(&state, "Spain"));
        let members: Vec<_> = state.pool.iter().map(|m| m.id).collect();
        for member in members {
            execute_command(
                &mut state,
                &config,
                &Command::AssignMember {
                    member,
                    territory: spain,
                },
            )
            .unwrap();
        }
        let business = state.businesses[0].id;

        execute_command(
            &mut state,
            &config,
            &Command::RelocateBusiness {
                business,
                territory: spain,
            },
        )
        .unwrap();

        assert_eq!(state.money, Fixed::ZERO);
        assert_eq!(state.territory(france).unwrap().business, None);
        assert_eq!(state.territory(france).unwrap().business_income, Fixed::ZERO);
        assert_eq!(state.territory(spain).unwrap().business, Some(business));
        assert_eq!(state.territory(spain).unwrap().business_income, Fixed::from_int(120));
        assert_eq!(state.businesses[0].territory, spain);
    }

    #[test]
    fn test_change_headquarters_requires_ownership() {
        let config = full();
        let mut state = GameStateBuilder::full().owning("France").owning("Italy").build();
        let (italy, poland) = (id(&state, "Italy"), id(&state, "Poland"));

        execute_command(&mut state, &config, &Command::ChangeHeadquarters(italy)).unwrap();
        assert_eq!(state.headquarters, Some(italy));

        let err =
            execute_command(&mut state, &config, &Command::ChangeHeadquarters(poland)).unwrap_err();
        assert_eq!(err, ActionError::NotOwned("Poland".into()));
        assert_eq!(state.headquarters, Some(italy));
    }

    #[test]
    fn test_borrow_adds_money_and_debt() {
        let config = full();
        let mut state = GameStateBuilder::full().money(20).build();

        execute_command(&mut state, &config, &Command::Borrow(Fixed::from_int(500))).unwrap();

        assert_eq!(state.money, Fixed::from_int(520));
        assert_eq!(state.bank.debt, Fixed::from_int(500));

        let err = execute_command(&mut state, &config, &Command::Borrow(Fixed::from_int(250)))
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidBorrowAmount(_)));
        assert_eq!(state.bank.debt, Fixed::from_int(500));
    }

    #[test]
    fn test_repay_requires_debt_plus_interest() {
        let config = full();
        let mut state = GameStateBuilder::full()
            .money(600)
            .debt(500)
            .interest(Fixed::from_raw(1_015_000))
            .build();

        let err =
            execute_command(&mut state, &config, &Command::RepayDebt).unwrap_err();
        assert_eq!(err.to_string(), "Not enough money to pay debt and interest!");
        assert_eq!(state.money, Fixed::from_int(600));
        assert_eq!(state.bank.debt, Fixed::from_int(500));

        state.money = Fixed::from_int(700);
        execute_command(&mut state, &config, &Command::RepayDebt).unwrap();
        assert_eq!(state.money, Fixed::from_raw(7_000_000 - 6_015_000));
        assert_eq!(state.bank, Default::default());
    }

    #[test]
    fn test_repay_without_debt_is_rejected() {
        let config = full();
        let mut state = GameStateBuilder::full().money(100).build();
        assert_eq!(
            execute_command(&mut state, &config, &Command::RepayDebt),
            Err(ActionError::NoDebt)
        );
    }
}
