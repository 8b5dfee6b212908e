use crate::fixed::Fixed;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A calendar date shown in the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u8, // 1-12
    pub day: u8,   // 1-31
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    fn days_in_month(year: i32, month: u8) -> u8 {
        match month {
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Adds days using the Gregorian calendar.
    pub fn add_days(&self, days: u32) -> Self {
        let mut d = self.day as u32 + days;
        let mut m = self.month;
        let mut y = self.year;

        loop {
            let len = Self::days_in_month(y, m) as u32;
            if d <= len {
                break;
            }
            d -= len;
            m += 1;
            if m > 12 {
                m = 1;
                y += 1;
            }
        }

        Self {
            year: y,
            month: m,
            day: d as u8,
        }
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::new(2010, 12, 2)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{:02}.{}", self.day, self.month, self.year)
    }
}

/// Index of a territory in [`GameState::territories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub u32);

/// A hired gang member.
///
/// Not `Clone`: a member lives in exactly one collection (the
/// general pool or one territory roster) and is moved between them.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GangMember {
    pub id: MemberId,
    pub name: String,
}

/// Where a gang member currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberLocation {
    Pool,
    Territory(TerritoryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessKind {
    GunProduction,
    LocalBusinessTakeover,
    DrugProduction,
    TaxFrauds,
}

impl BusinessKind {
    pub const ALL: [BusinessKind; 4] = [
        BusinessKind::GunProduction,
        BusinessKind::LocalBusinessTakeover,
        BusinessKind::DrugProduction,
        BusinessKind::TaxFrauds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BusinessKind::GunProduction => "Gun Production",
            BusinessKind::LocalBusinessTakeover => "Local Business Takeover",
            BusinessKind::DrugProduction => "Drug Production",
            BusinessKind::TaxFrauds => "Tax Frauds",
        }
    }
}

impl std::fmt::Display for BusinessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub kind: BusinessKind,
    pub territory: TerritoryId,
}

/// A purchasable map region.
#[derive(Debug, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub cost: Fixed,
    pub population: u32,
    /// Passive per-second income while owned (tax-only ruleset).
    pub tax: Fixed,
    pub polygon: Vec<Point>,
    pub owned: bool,
    /// Business running here, if any. At most one per territory.
    pub business: Option<BusinessId>,
    /// Current per-second income of that business (zero without one).
    pub business_income: Fixed,
    /// Members stationed here.
    pub roster: Vec<GangMember>,
}

/// Bank loan bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub debt: Fixed,
    pub accrued_interest: Fixed,
}

impl BankAccount {
    /// Amount needed to clear the loan in one payment.
    pub fn payoff_amount(&self) -> Fixed {
        self.debt + self.accrued_interest
    }
}

/// Complete simulation state: everything a renderer reads and every action mutates.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameState {
    pub money: Fixed,
    pub reputation: i32,
    pub date: Date,
    pub territories: Vec<Territory>,
    /// Unassigned members.
    pub pool: Vec<GangMember>,
    pub businesses: Vec<Business>,
    pub bank: BankAccount,
    /// True until the first territory purchase.
    pub first_purchase: bool,
    pub headquarters: Option<TerritoryId>,
    /// Business type already paid for and waiting for a territory.
    pub pending_business: Option<BusinessKind>,
    /// Number given to the next hired member ("Gang Member N").
    pub next_member_number: u32,
    pub next_business_id: u32,
}

impl GameState {
    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn territory_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id.index())
    }

    pub fn territory_ids(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        (0..self.territories.len()).map(|i| TerritoryId(i as u16))
    }

    pub fn find_territory(&self, name: &str) -> Option<TerritoryId> {
        self.territories
            .iter()
            .position(|t| t.name == name)
            .map(|i| TerritoryId(i as u16))
    }

    pub fn owned_territories(&self) -> Vec<TerritoryId> {
        self.territory_ids()
            .filter(|&id| self.territories[id.index()].owned)
            .collect()
    }

    /// Owned territories without a business: valid targets for placing or relocating one.
    pub fn business_free_territories(&self) -> Vec<TerritoryId> {
        self.territory_ids()
            .filter(|&id| {
                let t = &self.territories[id.index()];
                t.owned && t.business.is_none()
            })
            .collect()
    }

    pub fn owned_count(&self) -> usize {
        self.territories.iter().filter(|t| t.owned).count()
    }

    pub fn member_location(&self, id: MemberId) -> Option<MemberLocation> {
        if self.pool.iter().any(|m| m.id == id) {
            return Some(MemberLocation::Pool);
        }
        self.territory_ids().find_map(|tid| {
            self.territories[tid.index()]
                .roster
                .iter()
                .any(|m| m.id == id)
                .then_some(MemberLocation::Territory(tid))
        })
    }

    pub fn member(&self, id: MemberId) -> Option<&GangMember> {
        self.pool
            .iter()
            .chain(self.territories.iter().flat_map(|t| t.roster.iter()))
            .find(|m| m.id == id)
    }

    /// All members with their location: the pool first, then each territory's roster.
    pub fn all_members(&self) -> Vec<(&GangMember, MemberLocation)> {
        let pooled = self.pool.iter().map(|m| (m, MemberLocation::Pool));
        let stationed = self.territory_ids().flat_map(move |tid| {
            self.territories[tid.index()]
                .roster
                .iter()
                .map(move |m| (m, MemberLocation::Territory(tid)))
        });
        pooled.chain(stationed).collect()
    }

    pub fn member_count(&self) -> usize {
        self.pool.len() + self.territories.iter().map(|t| t.roster.len()).sum::<usize>()
    }

    pub fn business(&self, id: BusinessId) -> Option<&Business> {
        self.businesses.iter().find(|b| b.id == id)
    }

    /// Per-second income currently produced by owned territories.
    pub fn income_per_second(&self) -> Fixed {
        self.territories
            .iter()
            .filter(|t| t.owned)
            .map(|t| {
                let business = if t.business.is_some() {
                    t.business_income
                } else {
                    Fixed::ZERO
                };
                t.tax + business
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::GameStateBuilder;

    #[test]
    fn test_date_add_days_within_month() {
        assert_eq!(Date::new(2010, 12, 2).add_days(5), Date::new(2010, 12, 7));
    }

    #[test]
    fn test_date_add_days_rolls_year() {
        assert_eq!(Date::new(2010, 12, 30).add_days(3), Date::new(2011, 1, 2));
    }

    #[test]
    fn test_date_leap_february() {
        assert_eq!(Date::new(2012, 2, 28).add_days(1), Date::new(2012, 2, 29));
        assert_eq!(Date::new(2011, 2, 28).add_days(1), Date::new(2011, 3, 1));
        assert_eq!(Date::new(2100, 2, 28).add_days(1), Date::new(2100, 3, 1));
    }

    #[test]
    fn test_date_display() {
        assert_eq!(Date::default().to_string(), "02.12.2010");
    }

    #[test]
    fn test_member_lookup_across_collections() {
        let mut state = GameStateBuilder::full().with_members(2).build();
        let france = state.find_territory("France").unwrap();
        let moved = state.pool.remove(1);
        let moved_id = moved.id;
        state.territory_mut(france).unwrap().roster.push(moved);

        assert_eq!(state.member_count(), 2);
        assert_eq!(
            state.member_location(moved_id),
            Some(MemberLocation::Territory(france))
        );
        assert_eq!(state.member_location(MemberId(99)), None);

        let all = state.all_members();
        assert_eq!(all[0].1, MemberLocation::Pool);
        assert_eq!(all[1].0.id, moved_id);
    }

    #[test]
    fn test_income_ignores_unowned_territories() {
        let mut state = GameStateBuilder::tax_only().build();
        let spain = state.find_territory("Spain").unwrap();
        assert_eq!(state.income_per_second(), Fixed::ZERO);

        state.territory_mut(spain).unwrap().owned = true;
        assert_eq!(state.income_per_second(), Fixed::from_int(8));
    }
}
