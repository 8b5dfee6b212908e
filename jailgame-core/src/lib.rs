//! # Jailgame Core
//!
//! Game state and rules for a small map-clicking strategy game: buy
//! territories, collect income, run a gang and its businesses, and borrow
//! from a bank that charges interest by the second.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Input source │────▶│ GameSession  │────▶│ execute_command │
//! │ (InputEvent) │     │ (modal, UI)  │     │ (rules)         │
//! └──────────────┘     └──────┬───────┘     └────────┬────────┘
//!                             │                      │
//!                      ┌──────▼───────┐     ┌────────▼────────┐
//!                      │RenderSnapshot│◀────│   GameState     │
//!                      │ (to draw)    │     │ (+ accruals)    │
//!                      └──────────────┘     └─────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`GameState`] | Territories, gang, businesses, money and bank |
//! | [`GameConfig`] | Ruleset, prices, rates and the territory table |
//! | [`Command`] | Confirmed player actions |
//! | [`execute_command`] | Applies a command or rejects it untouched |
//! | [`GameSession`] | Input routing, modal dialogs, clock and pause |
//! | [`RenderSnapshot`] | Everything a renderer needs for one frame |
//!
//! Two rulesets share the model: [`RulesetKind::TaxOnly`] (click to buy,
//! per-territory tax) and [`RulesetKind::Full`] (panels, gang, businesses,
//! bank and calendar).

pub mod clock;
pub mod config;
pub mod fixed;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod maps;
pub mod modal;
pub mod notify;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod step;
pub mod systems;
pub mod testing;

pub use config::{ConfigError, GameConfig, RulesetKind};
pub use fixed::Fixed;
pub use geometry::{point_in_polygon, polygon_centroid, Point};
pub use input::{Command, InputEvent, Key};
pub use modal::ActiveModal;
pub use session::{GameSession, LoopControl};
pub use snapshot::RenderSnapshot;
pub use state::{GameState, TerritoryId};
pub use step::{execute_command, ActionError, ActionOutcome};
