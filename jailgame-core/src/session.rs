//! A running game: state, modal UI, clock and notifications.
//!
//! The frame loop feeds [`InputEvent`]s to [`GameSession::handle_event`],
//! calls [`GameSession::update`] once per frame and draws whatever
//! [`GameSession::snapshot`] returns. Wall time is passed in by the caller
//! as time since the session started.

use crate::clock::SimClock;
use crate::config::GameConfig;
use crate::geometry::{point_in_polygon, polygon_centroid, Point};
use crate::input::{Command, InputEvent, Key};
use crate::layout::{self, hit_test, ButtonAction, Label, BANK_BUTTON, GANG_BUTTON};
use crate::modal::{ActiveModal, Dialog, GangTab, Panel};
use crate::notify::Notifier;
use crate::snapshot::{RenderSnapshot, TerritoryView, Tooltip};
use crate::state::{GameState, TerritoryId};
use crate::step::{execute_command, ActionError, ActionOutcome};
use crate::systems::{run_accruals, AccrualTimers};
use std::time::Duration;

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct GameSession {
    config: GameConfig,
    state: GameState,
    modal: ActiveModal,
    clock: SimClock,
    timers: AccrualTimers,
    notifier: Notifier,
    selected: Option<TerritoryId>,
    pointer: Option<Point>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let state = config.initial_state();
        Self::with_state(config, state)
    }

    /// Starts from an existing state instead of the config's initial one.
    pub fn with_state(config: GameConfig, state: GameState) -> Self {
        let timers = AccrualTimers::new(&config);
        let notifier = Notifier::new(config.economy.notification_duration);
        Self {
            config,
            state,
            modal: ActiveModal::None,
            clock: SimClock::new(),
            timers,
            notifier,
            selected: None,
            pointer: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn modal(&self) -> ActiveModal {
        self.modal
    }

    pub fn selected(&self) -> Option<TerritoryId> {
        self.selected
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn notification(&self, wall: Duration) -> Option<&str> {
        self.notifier.active(wall)
    }

    pub fn handle_event(&mut self, event: InputEvent, wall: Duration) -> LoopControl {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return LoopControl::Exit,
            InputEvent::KeyDown(_) => {}
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::PointerDown(p) => {
                self.pointer = Some(p);
                self.handle_click(p, wall);
            }
        }
        LoopControl::Continue
    }

    /// Advances simulation time and runs whichever accruals are due.
    pub fn update(&mut self, wall: Duration) {
        let now = self.clock.advance(wall);
        if self.clock.is_paused() {
            return;
        }
        run_accruals(&mut self.state, &self.config, &mut self.timers, now);
    }

    fn handle_click(&mut self, p: Point, wall: Duration) {
        if !self.config.is_full() {
            self.handle_tax_only_click(p, wall);
            return;
        }

        let globals = layout::global_controls(&self.config, self.clock.is_paused());
        let global = hit_test(p, &globals).map(|c| c.action);

        // The pause button stays live over modals and while paused.
        if global == Some(ButtonAction::TogglePause) {
            self.activate(ButtonAction::TogglePause, wall);
            return;
        }
        if self.clock.is_paused() {
            return;
        }

        match layout::modal_layout(&self.modal, &self.state, &self.config) {
            Some(modal) => {
                if let Some(control) = hit_test(p, &modal.controls) {
                    self.activate(control.action, wall);
                } else if !modal.captures(p) {
                    self.dismiss(wall);
                }
            }
            None => match global {
                Some(action) => self.activate(action, wall),
                None => {
                    self.selected = self.territory_at(p);
                    if let Some(id) = self.selected {
                        self.set_modal(ActiveModal::Panel(Panel::CountryInfo(id)));
                    }
                }
            },
        }
    }

    /// Tax-only play: clicking a territory selects it and buys it on the spot.
    fn handle_tax_only_click(&mut self, p: Point, wall: Duration) {
        self.selected = self.territory_at(p);
        let Some(id) = self.selected else {
            return;
        };
        if self.state.territory(id).is_some_and(|t| !t.owned) {
            let _ = self.run(Command::BuyTerritory(id), wall);
        }
    }

    fn territory_at(&self, p: Point) -> Option<TerritoryId> {
        self.state
            .territory_ids()
            .find(|&id| point_in_polygon(p, &self.state.territories[id.index()].polygon))
    }

    fn toggle_pause(&mut self, wall: Duration) {
        // Bank the time up to the click before the clock stops or restarts.
        self.clock.advance(wall);
        let paused = self.clock.toggle_pause();
        self.notifier
            .post(if paused { "Paused" } else { "Resumed" }, wall);
    }

    fn set_modal(&mut self, modal: ActiveModal) {
        if modal != self.modal {
            log::debug!("modal: {} -> {}", self.modal.describe(), modal.describe());
        }
        self.modal = modal;
    }

    fn open(&mut self, dialog: Dialog) {
        self.set_modal(self.modal.open(dialog));
    }

    /// Executes a command and shows its result as the notification.
    fn run(&mut self, cmd: Command, wall: Duration) -> Result<ActionOutcome, ActionError> {
        let result = execute_command(&mut self.state, &self.config, &cmd);
        match &result {
            Ok(outcome) => self.notifier.post(outcome.to_string(), wall),
            Err(e) => self.notifier.post(e.to_string(), wall),
        }
        result
    }

    fn activate(&mut self, action: ButtonAction, wall: Duration) {
        use ButtonAction as A;
        match action {
            A::OpenGang => {
                self.selected = None;
                self.set_modal(ActiveModal::Panel(Panel::gang(GangTab::Members)));
            }
            A::OpenBank => self.set_modal(ActiveModal::Panel(Panel::Bank)),
            A::TogglePause => self.toggle_pause(wall),
            A::ClosePanel => {
                if matches!(self.modal, ActiveModal::Panel(Panel::CountryInfo(_))) {
                    self.selected = None;
                }
                self.set_modal(ActiveModal::None);
            }
            A::SelectTab(tab) => self.set_modal(ActiveModal::Panel(Panel::gang(tab))),
            A::ShowPage(page) => {
                if let ActiveModal::Panel(Panel::Gang { tab, .. }) = self.modal {
                    self.set_modal(ActiveModal::Panel(Panel::Gang { tab, page }));
                }
            }
            A::OpenPurchase(id) => self.open(Dialog::ConfirmPurchase(id)),
            A::OpenHire => self.open(Dialog::HireStep1),
            A::OpenProfile(m) => self.open(Dialog::MemberProfile(m)),
            A::OpenAssignMember(m) => self.open(Dialog::AssignMember(m)),
            A::OpenSell(m) => self.open(Dialog::ConfirmSell(m)),
            A::OpenStartBusiness => {
                if self.state.owned_count() == 0 {
                    self.notifier
                        .post(ActionError::NoTerritoryOwned.to_string(), wall);
                } else {
                    self.open(Dialog::ChooseBusinessType);
                }
            }
            A::OpenRelocate(b) => self.open(Dialog::RelocateBusiness(b)),
            A::OpenCancelBusiness(b) => self.open(Dialog::ConfirmCancelBusiness(b)),
            A::OpenChangeHq => self.open(Dialog::ChangeHq),
            A::OpenBorrow(amount) => self.open(Dialog::ConfirmBorrow(amount)),
            A::RepayDebt => {
                let _ = self.run(Command::RepayDebt, wall);
                self.set_modal(ActiveModal::None);
            }
            A::Confirm => self.confirm(wall),
            A::Dismiss => self.dismiss(wall),
            A::ChooseBusiness(kind) => {
                let next = match self.run(Command::StartBusiness(kind), wall) {
                    Ok(_) => self.modal.open(Dialog::AssignBusiness(kind)),
                    Err(_) => self.modal.closed(),
                };
                self.set_modal(next);
            }
            A::PickTerritory(id) => self.pick_territory(id, wall),
            A::Unassign(m) => {
                let _ = self.run(Command::UnassignMember(m), wall);
                self.set_modal(self.modal.closed());
            }
        }
    }

    /// "Yes" on the active confirmation.
    fn confirm(&mut self, wall: Duration) {
        let Some(dialog) = self.modal.dialog() else {
            return;
        };
        let cmd = match dialog {
            Dialog::HireStep1 => {
                self.open(Dialog::HireStep2);
                return;
            }
            Dialog::ConfirmPurchase(id) => Command::BuyTerritory(id),
            Dialog::HireStep2 => Command::HireMember,
            Dialog::ConfirmSell(m) => Command::SellMember(m),
            Dialog::ConfirmCancelBusiness(b) => Command::CancelBusiness(b),
            Dialog::ConfirmBorrow(amount) => Command::Borrow(amount),
            _ => return,
        };
        let _ = self.run(cmd, wall);
        self.set_modal(self.modal.closed());
    }

    fn pick_territory(&mut self, id: TerritoryId, wall: Duration) {
        let Some(dialog) = self.modal.dialog() else {
            return;
        };
        let cmd = match dialog {
            Dialog::AssignBusiness(_) => Command::PlaceBusiness(id),
            Dialog::AssignMember(member) => Command::AssignMember {
                member,
                territory: id,
            },
            Dialog::ChangeHq => Command::ChangeHeadquarters(id),
            Dialog::RelocateBusiness(business) => Command::RelocateBusiness {
                business,
                territory: id,
            },
            _ => return,
        };
        let result = self.run(cmd, wall);
        // A paid-for business stays on screen until it is placed or dismissed.
        if result.is_ok() || !matches!(dialog, Dialog::AssignBusiness(_)) {
            self.set_modal(self.modal.closed());
        }
    }

    /// Close the active modal without confirming it.
    fn dismiss(&mut self, wall: Duration) {
        match self.modal {
            ActiveModal::Dialog {
                dialog: Dialog::AssignBusiness(_),
                ..
            } => {
                let _ = self.run(Command::DiscardPendingBusiness, wall);
            }
            ActiveModal::Panel(Panel::CountryInfo(_)) => self.selected = None,
            _ => {}
        }
        self.set_modal(self.modal.closed());
    }

    pub fn snapshot(&self, wall: Duration) -> RenderSnapshot {
        let full = self.config.is_full();
        let territories = self
            .state
            .territory_ids()
            .map(|id| {
                let t = &self.state.territories[id.index()];
                let price_label = (!t.owned).then(|| {
                    if self.state.first_purchase {
                        "Free".to_string()
                    } else {
                        format!("${}", t.cost)
                    }
                });
                TerritoryView {
                    id,
                    name: t.name.clone(),
                    polygon: t.polygon.clone(),
                    centroid: polygon_centroid(&t.polygon),
                    price_label,
                    owned: t.owned,
                    selected: self.selected == Some(id),
                }
            })
            .collect();

        let heading = if full {
            None
        } else {
            self.selected
                .and_then(|id| self.state.territory(id))
                .map(|t| t.name.clone())
        };

        RenderSnapshot {
            ruleset: self.config.ruleset,
            paused: self.clock.is_paused(),
            territories,
            stats_frame: full.then_some(layout::STATS_BAR),
            stats: self.stats_labels(),
            heading,
            controls: layout::global_controls(&self.config, self.clock.is_paused()),
            modal: layout::modal_layout(&self.modal, &self.state, &self.config),
            notification: self.notifier.active(wall).map(str::to_string),
            tooltip: self.tooltip(),
            pointer: self.pointer,
        }
    }

    fn owned_summary(&self) -> String {
        format!("{}/{}", self.state.owned_count(), self.state.territories.len())
    }

    fn stats_labels(&self) -> Vec<Label> {
        let state = &self.state;
        if !self.config.is_full() {
            let lines = [
                format!("Money: ${}", state.money),
                format!("Income: ${}/s", state.income_per_second()),
                format!("Owned: {}", self.owned_summary()),
            ];
            return lines
                .into_iter()
                .enumerate()
                .map(|(i, text)| Label {
                    x: 10.0,
                    y: 10.0 + 30.0 * i as f32,
                    text,
                })
                .collect();
        }

        let values = [
            format!("${}", state.money),
            format!("${}", state.bank.debt),
            state.reputation.to_string(),
            self.owned_summary(),
            state.date.to_string(),
        ];
        layout::stats_columns()
            .into_iter()
            .zip(values)
            .map(|(col, text)| Label {
                x: col.x + 10.0,
                y: col.y + 15.0,
                text,
            })
            .collect()
    }

    fn tooltip(&self) -> Option<Tooltip> {
        if !self.config.is_full() {
            return None;
        }
        let p = self.pointer?;
        let state = &self.state;
        let debt_lines = || {
            vec![
                format!("Bank Debt: ${}", state.bank.debt),
                format!("Interest Owed: ${}", state.bank.accrued_interest.trunc()),
            ]
        };

        let columns = layout::stats_columns();
        if let Some(i) = columns.iter().position(|c| c.contains(p)) {
            let lines = match i {
                0 => {
                    let mut lines = vec![
                        format!("Money: ${}", state.money),
                        "Income from:".to_string(),
                    ];
                    let sources: Vec<String> = state
                        .businesses
                        .iter()
                        .filter_map(|b| {
                            let t = state.territory(b.territory)?;
                            Some(format!("{} in {}: ${}/s", b.kind, t.name, t.business_income))
                        })
                        .collect();
                    if sources.is_empty() {
                        lines.push("None".to_string());
                    } else {
                        lines.extend(sources);
                    }
                    lines
                }
                1 => debt_lines(),
                2 => vec![format!("Reputation: {}", state.reputation)],
                3 => vec![format!("Countries Owned: {}", self.owned_summary())],
                _ => vec![format!("Date: {}", state.date)],
            };
            let col = columns[i];
            return Some(Tooltip {
                anchor: Point::new(col.center().x, 75.0),
                lines,
            });
        }

        let below = |r: layout::Rect| Point::new(r.center().x, r.y + r.height + 10.0);
        if GANG_BUTTON.contains(p) {
            return Some(Tooltip {
                anchor: below(GANG_BUTTON),
                lines: vec![format!("Unassigned Gang Members: {}", state.pool.len())],
            });
        }
        if BANK_BUTTON.contains(p) {
            return Some(Tooltip {
                anchor: below(BANK_BUTTON),
                lines: debt_lines(),
            });
        }
        None
    }
}
