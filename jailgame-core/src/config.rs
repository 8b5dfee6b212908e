use crate::fixed::Fixed;
use crate::geometry::Point;
use crate::maps;
use crate::state::{BusinessKind, Date, GameState, Territory};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Which rule variant the session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesetKind {
    /// Click a territory to buy it outright; owned territories pay tax every second.
    TaxOnly,
    /// Panels, confirmations, gang, businesses, bank and calendar.
    Full,
}

/// Static description of one territory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryDef {
    pub name: String,
    pub cost: i64,
    #[serde(default)]
    pub population: u32,
    #[serde(default)]
    pub tax: i64,
    pub polygon: Vec<(f32, f32)>,
}

/// One interest tier: every tier whose threshold is at or below the debt
/// contributes `debt * rate` per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestTier {
    pub threshold: Fixed,
    pub rate: Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRate {
    pub kind: BusinessKind,
    pub base: Fixed,
}

/// Prices, rates and accrual intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyConfig {
    pub hire_cost: Fixed,
    pub sell_refund: Fixed,
    pub business_start_cost: Fixed,
    pub business_cancel_fee: Fixed,
    /// Income bonus per stationed member (0.1 = +10%).
    pub member_income_bonus: Fixed,
    pub borrow_amounts: Vec<Fixed>,
    pub interest_tiers: Vec<InterestTier>,
    pub business_rates: Vec<BusinessRate>,
    pub income_interval: Duration,
    pub interest_interval: Duration,
    /// Real time per in-game day.
    pub day_interval: Duration,
    pub notification_duration: Duration,
}

impl EconomyConfig {
    pub fn base_rate(&self, kind: BusinessKind) -> Fixed {
        self.business_rates
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.base)
            .unwrap_or(Fixed::ZERO)
    }

    /// Rate quoted for a borrow amount (the tier with exactly that threshold).
    pub fn quoted_rate(&self, amount: Fixed) -> Option<Fixed> {
        self.interest_tiers
            .iter()
            .find(|t| t.threshold == amount)
            .map(|t| t.rate)
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        let tier = |threshold: i64, raw_rate: i64| InterestTier {
            threshold: Fixed::from_int(threshold),
            rate: Fixed::from_raw(raw_rate),
        };
        let rate = |kind, base: i64| BusinessRate {
            kind,
            base: Fixed::from_int(base),
        };
        Self {
            hire_cost: Fixed::from_int(150),
            sell_refund: Fixed::from_int(90),
            business_start_cost: Fixed::from_int(500),
            business_cancel_fee: Fixed::from_int(700),
            member_income_bonus: Fixed::from_raw(1000),
            borrow_amounts: [100, 500, 1000, 5000, 10000]
                .into_iter()
                .map(Fixed::from_int)
                .collect(),
            // 0.1%, 0.15%, 0.2%, 0.25%, 0.3% per second
            interest_tiers: vec![
                tier(100, 10),
                tier(500, 15),
                tier(1000, 20),
                tier(5000, 25),
                tier(10000, 30),
            ],
            business_rates: vec![
                rate(BusinessKind::GunProduction, 100),
                rate(BusinessKind::LocalBusinessTakeover, 50),
                rate(BusinessKind::DrugProduction, 150),
                rate(BusinessKind::TaxFrauds, 75),
            ],
            income_interval: Duration::from_secs(1),
            interest_interval: Duration::from_secs(1),
            day_interval: Duration::from_secs(5),
            notification_duration: Duration::from_secs(3),
        }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub ruleset: RulesetKind,
    pub starting_money: i64,
    pub first_purchase_free: bool,
    pub start_date: Date,
    pub territories: Vec<TerritoryDef>,
    #[serde(default)]
    pub economy: EconomyConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config defines no territories")]
    NoTerritories,
    #[error("territory {0} has fewer than 3 polygon vertices")]
    DegeneratePolygon(String),
}

impl GameConfig {
    /// The simple variant: immediate purchases and per-territory tax.
    pub fn tax_only() -> Self {
        Self {
            ruleset: RulesetKind::TaxOnly,
            starting_money: 100,
            first_purchase_free: false,
            start_date: Date::default(),
            territories: maps::tax_only_territories(),
            economy: EconomyConfig::default(),
        }
    }

    /// The full variant: gang, businesses, bank and calendar.
    pub fn full() -> Self {
        Self {
            ruleset: RulesetKind::Full,
            starting_money: 0,
            first_purchase_free: true,
            start_date: Date::new(2010, 12, 2),
            territories: maps::full_territories(),
            economy: EconomyConfig::default(),
        }
    }

    pub fn for_ruleset(kind: RulesetKind) -> Self {
        match kind {
            RulesetKind::TaxOnly => Self::tax_only(),
            RulesetKind::Full => Self::full(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.territories.is_empty() {
            return Err(ConfigError::NoTerritories);
        }
        if let Some(bad) = self.territories.iter().find(|t| t.polygon.len() < 3) {
            return Err(ConfigError::DegeneratePolygon(bad.name.clone()));
        }
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.ruleset == RulesetKind::Full
    }

    /// Fresh state at the start of a game.
    pub fn initial_state(&self) -> GameState {
        let territories = self
            .territories
            .iter()
            .map(|def| Territory {
                name: def.name.clone(),
                cost: Fixed::from_int(def.cost),
                population: def.population,
                tax: Fixed::from_int(def.tax),
                polygon: def.polygon.iter().copied().map(Point::from).collect(),
                owned: false,
                business: None,
                business_income: Fixed::ZERO,
                roster: Vec::new(),
            })
            .collect();

        GameState {
            money: Fixed::from_int(self.starting_money),
            reputation: 0,
            date: self.start_date,
            territories,
            pool: Vec::new(),
            businesses: Vec::new(),
            bank: Default::default(),
            first_purchase: self.first_purchase_free,
            headquarters: None,
            pending_business: None,
            next_member_number: 1,
            next_business_id: 0,
        }
    }
}
