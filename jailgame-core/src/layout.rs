//! Screen layout of buttons, panels and dialogs.
//!
//! The same layout feeds the render snapshot and pointer hit-testing, so a
//! control is clickable exactly where it is drawn.

use crate::config::GameConfig;
use crate::fixed::Fixed;
use crate::geometry::Point;
use crate::modal::{ActiveModal, Dialog, GangTab, Panel};
use crate::state::{BusinessId, BusinessKind, GameState, MemberId, MemberLocation, TerritoryId};
use serde::Serialize;

pub const MAP_WIDTH: f32 = 800.0;
pub const MAP_HEIGHT: f32 = 600.0;

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// What a button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonAction {
    OpenGang,
    OpenBank,
    TogglePause,
    ClosePanel,
    OpenPurchase(TerritoryId),
    SelectTab(GangTab),
    OpenHire,
    OpenProfile(MemberId),
    OpenAssignMember(MemberId),
    OpenSell(MemberId),
    OpenStartBusiness,
    OpenRelocate(BusinessId),
    OpenCancelBusiness(BusinessId),
    OpenChangeHq,
    OpenBorrow(Fixed),
    /// Show a page of the gang panel's current list.
    ShowPage(usize),
    RepayDebt,
    /// "Yes" on a confirmation.
    Confirm,
    /// "No", "Cancel" or "Close" on a dialog.
    Dismiss,
    ChooseBusiness(BusinessKind),
    PickTerritory(TerritoryId),
    Unassign(MemberId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub rect: Rect,
    pub label: String,
    pub action: ButtonAction,
}

impl Control {
    fn new(rect: Rect, label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
        }
    }
}

/// Static text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

fn label(x: f32, y: f32, text: impl Into<String>) -> Label {
    Label {
        x,
        y,
        text: text.into(),
    }
}

/// Everything the active modal puts on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalLayout {
    pub title: String,
    /// Drawn box. Clicks inside it (or on any control) are captured.
    pub frame: Rect,
    pub labels: Vec<Label>,
    pub controls: Vec<Control>,
}

impl ModalLayout {
    fn new(title: impl Into<String>, frame: Rect) -> Self {
        Self {
            title: title.into(),
            frame,
            labels: Vec::new(),
            controls: Vec::new(),
        }
    }

    /// True when `p` lands on this modal rather than the map behind it.
    pub fn captures(&self, p: Point) -> bool {
        self.frame.contains(p) || self.controls.iter().any(|c| c.rect.contains(p))
    }
}

/// First control containing `p`, in list order.
pub fn hit_test(p: Point, controls: &[Control]) -> Option<&Control> {
    controls.iter().find(|c| c.rect.contains(p))
}

// Global controls
pub const GANG_BUTTON: Rect = Rect::new(10.0, 150.0, 100.0, 40.0);
pub const BANK_BUTTON: Rect = Rect::new(10.0, 210.0, 100.0, 40.0);
pub const PAUSE_BUTTON: Rect = Rect::new(10.0, 550.0, 100.0, 40.0);

// Stats bar: five equal columns
pub const STATS_BAR: Rect = Rect::new(50.0, 10.0, 700.0, 50.0);
const STATS_COLUMN_WIDTH: f32 = 140.0;

pub fn stats_columns() -> [Rect; 5] {
    std::array::from_fn(|i| {
        Rect::new(
            STATS_BAR.x + STATS_COLUMN_WIDTH * i as f32,
            STATS_BAR.y,
            STATS_COLUMN_WIDTH,
            STATS_BAR.height,
        )
    })
}

const COUNTRY_PANEL: Rect = Rect::new(500.0, 150.0, 250.0, 230.0);
const GANG_TABS_ORIGIN: Point = Point::new(500.0, 150.0);
const GANG_BODY: Rect = Rect::new(550.0, 150.0, 250.0, 300.0);
const DIALOG: Rect = Rect::new(200.0, 200.0, 400.0, 200.0);

const YES_BUTTON: Rect = Rect::new(300.0, 350.0, 80.0, 30.0);
const NO_BUTTON: Rect = Rect::new(420.0, 350.0, 80.0, 30.0);

const ROW_HEIGHT: f32 = 20.0;
const MEMBER_ROWS_TOP: f32 = 220.0;
const BUSINESS_ROWS_TOP: f32 = 240.0;
/// Rows per page of the member and business lists.
const PAGE_ROWS: usize = 8;
const PAGER_Y: f32 = 405.0;

/// Buttons drawn outside any modal. The tax-only ruleset has none.
pub fn global_controls(config: &GameConfig, paused: bool) -> Vec<Control> {
    if !config.is_full() {
        return Vec::new();
    }
    vec![
        Control::new(GANG_BUTTON, "Gang", ButtonAction::OpenGang),
        Control::new(BANK_BUTTON, "Bank", ButtonAction::OpenBank),
        Control::new(
            PAUSE_BUTTON,
            if paused { "Resume" } else { "Pause" },
            ButtonAction::TogglePause,
        ),
    ]
}

/// Layout for the active modal, or `None` when nothing is open.
pub fn modal_layout(
    modal: &ActiveModal,
    state: &GameState,
    config: &GameConfig,
) -> Option<ModalLayout> {
    match *modal {
        ActiveModal::None => None,
        ActiveModal::Panel(panel) => Some(panel_layout(panel, state, config)),
        ActiveModal::Dialog { dialog, .. } => Some(dialog_layout(dialog, state, config)),
    }
}

fn panel_layout(panel: Panel, state: &GameState, config: &GameConfig) -> ModalLayout {
    match panel {
        Panel::CountryInfo(id) => country_panel(id, state),
        Panel::Gang { tab, page } => gang_panel(tab, page, state, config),
        Panel::Bank => bank_panel(state, config),
    }
}

fn country_panel(id: TerritoryId, state: &GameState) -> ModalLayout {
    let Some(t) = state.territory(id) else {
        return ModalLayout::new("Unknown", COUNTRY_PANEL);
    };

    let mut layout = ModalLayout::new(t.name.clone(), COUNTRY_PANEL);
    let business = t
        .business
        .and_then(|b| state.business(b))
        .map(|b| b.kind.label())
        .unwrap_or("None");
    let lines = [
        format!("Pop: {}", group_thousands(t.population)),
        format!("Gang: {}", t.roster.len()),
        format!("Income: ${}/s", t.business_income),
        format!("Business: {business}"),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        layout.labels.push(label(510.0, 200.0 + 30.0 * i as f32, line));
    }

    if !t.owned {
        layout.controls.push(Control::new(
            Rect::new(510.0, 350.0, 80.0, 25.0),
            "Buy",
            ButtonAction::OpenPurchase(id),
        ));
    }
    layout.controls.push(Control::new(
        Rect::new(670.0, 350.0, 80.0, 25.0),
        "Close",
        ButtonAction::ClosePanel,
    ));
    layout
}

/// Clamps `page` to the list length; returns (page, page count).
fn page_bounds(len: usize, page: usize) -> (usize, usize) {
    let pages = len.div_ceil(PAGE_ROWS).max(1);
    (page.min(pages - 1), pages)
}

fn push_pager(layout: &mut ModalLayout, page: usize, pages: usize) {
    if pages < 2 {
        return;
    }
    if page > 0 {
        layout.controls.push(Control::new(
            Rect::new(560.0, PAGER_Y, 50.0, ROW_HEIGHT),
            "<",
            ButtonAction::ShowPage(page - 1),
        ));
    }
    layout
        .labels
        .push(label(620.0, PAGER_Y, format!("{}/{}", page + 1, pages)));
    if page + 1 < pages {
        layout.controls.push(Control::new(
            Rect::new(665.0, PAGER_Y, 50.0, ROW_HEIGHT),
            ">",
            ButtonAction::ShowPage(page + 1),
        ));
    }
}

fn gang_panel(tab: GangTab, page: usize, state: &GameState, config: &GameConfig) -> ModalLayout {
    let mut layout = ModalLayout::new(tab.label(), GANG_BODY);

    for (i, t) in GangTab::ALL.into_iter().enumerate() {
        let rect = Rect::new(
            GANG_TABS_ORIGIN.x,
            GANG_TABS_ORIGIN.y + 30.0 * i as f32,
            50.0,
            30.0,
        );
        layout
            .controls
            .push(Control::new(rect, t.short_label(), ButtonAction::SelectTab(t)));
    }

    let primary = Rect::new(560.0, 180.0, 230.0, 25.0);
    match tab {
        GangTab::Members => {
            layout.controls.push(Control::new(
                primary,
                format!("Buy Gang Member (${})", config.economy.hire_cost),
                ButtonAction::OpenHire,
            ));
            let members = state.all_members();
            let (page, pages) = page_bounds(members.len(), page);
            let rows = members.iter().skip(page * PAGE_ROWS).take(PAGE_ROWS);
            for (i, (member, location)) in rows.enumerate() {
                let y = MEMBER_ROWS_TOP + ROW_HEIGHT * i as f32;
                let place = match location {
                    MemberLocation::Pool => "Unassigned".to_string(),
                    MemberLocation::Territory(t) => territory_label(state, *t),
                };
                layout.controls.push(Control::new(
                    Rect::new(560.0, y, 105.0, ROW_HEIGHT),
                    format!("{} ({place})", member.name),
                    ButtonAction::OpenProfile(member.id),
                ));
                if *location == MemberLocation::Pool {
                    layout.controls.push(Control::new(
                        Rect::new(670.0, y, 70.0, ROW_HEIGHT),
                        "Assign",
                        ButtonAction::OpenAssignMember(member.id),
                    ));
                }
                layout.controls.push(Control::new(
                    Rect::new(745.0, y, 20.0, ROW_HEIGHT),
                    "P",
                    ButtonAction::OpenProfile(member.id),
                ));
                layout.controls.push(Control::new(
                    Rect::new(770.0, y, 20.0, ROW_HEIGHT),
                    "-",
                    ButtonAction::OpenSell(member.id),
                ));
            }
            push_pager(&mut layout, page, pages);
        }
        GangTab::Business => {
            layout.controls.push(Control::new(
                primary,
                "Start New Business",
                ButtonAction::OpenStartBusiness,
            ));
            if !state.businesses.is_empty() {
                layout.labels.push(label(560.0, 215.0, "Active Businesses:"));
            }
            let (page, pages) = page_bounds(state.businesses.len(), page);
            let rows = state.businesses.iter().skip(page * PAGE_ROWS).take(PAGE_ROWS);
            for (i, b) in rows.enumerate() {
                let y = BUSINESS_ROWS_TOP + ROW_HEIGHT * i as f32;
                layout.labels.push(label(
                    560.0,
                    y,
                    format!("{} in {}", b.kind, territory_label(state, b.territory)),
                ));
                layout.controls.push(Control::new(
                    Rect::new(670.0, y, 70.0, ROW_HEIGHT),
                    "Relocate",
                    ButtonAction::OpenRelocate(b.id),
                ));
                layout.controls.push(Control::new(
                    Rect::new(745.0, y, 20.0, ROW_HEIGHT),
                    "X",
                    ButtonAction::OpenCancelBusiness(b.id),
                ));
            }
            push_pager(&mut layout, page, pages);
        }
        GangTab::Location => {
            let hq = state
                .headquarters
                .map(|t| territory_label(state, t))
                .unwrap_or_else(|| "No HQ".to_string());
            layout.labels.push(label(560.0, 185.0, format!("HQ: {hq}")));
            layout.controls.push(Control::new(
                Rect::new(560.0, 210.0, 230.0, 25.0),
                "Change HQ Location",
                ButtonAction::OpenChangeHq,
            ));
        }
        GangTab::Vehicle | GangTab::Diplomacy => {
            layout
                .labels
                .push(label(560.0, 185.0, format!("{} - Coming Soon", tab.label())));
        }
    }

    layout.controls.push(Control::new(
        Rect::new(720.0, 420.0, 80.0, 25.0),
        "Close",
        ButtonAction::ClosePanel,
    ));
    layout
}

fn bank_panel(state: &GameState, config: &GameConfig) -> ModalLayout {
    let mut layout = ModalLayout::new("Borrow or Pay Debt", DIALOG);
    layout.labels.push(label(
        220.0,
        230.0,
        format!(
            "Debt: ${}  Interest: ${}",
            state.bank.debt,
            state.bank.accrued_interest.trunc()
        ),
    ));

    const AMOUNT_SLOTS: [(f32, f32); 5] = [
        (220.0, 260.0),
        (310.0, 260.0),
        (400.0, 260.0),
        (265.0, 310.0),
        (355.0, 310.0),
    ];
    for (&(x, y), &amount) in AMOUNT_SLOTS.iter().zip(&config.economy.borrow_amounts) {
        layout.controls.push(Control::new(
            Rect::new(x, y, 80.0, 25.0),
            format!("${amount}"),
            ButtonAction::OpenBorrow(amount),
        ));
    }

    layout.controls.push(Control::new(
        Rect::new(265.0, 360.0, 80.0, 25.0),
        "Cancel",
        ButtonAction::ClosePanel,
    ));
    layout.controls.push(Control::new(
        Rect::new(355.0, 360.0, 80.0, 25.0),
        "Pay Debt",
        ButtonAction::RepayDebt,
    ));
    layout
}

fn dialog_layout(dialog: Dialog, state: &GameState, config: &GameConfig) -> ModalLayout {
    let economy = &config.economy;
    match dialog {
        Dialog::ConfirmPurchase(id) => {
            let name = territory_label(state, id);
            let price = match state.territory(id) {
                _ if state.first_purchase => "free".to_string(),
                Some(t) => format!("${}", t.cost),
                None => "?".to_string(),
            };
            confirmation("Buy Country", format!("Buy {name} for {price}?"))
        }
        Dialog::HireStep1 => confirmation(
            "Hire",
            format!("Buy gang member for ${}?", economy.hire_cost),
        ),
        Dialog::HireStep2 => confirmation(
            "Hire",
            format!("Confirm: Buy gang member for ${}?", economy.hire_cost),
        ),
        Dialog::ConfirmSell(id) => confirmation(
            "Sell",
            format!("Sell {} for ${}?", member_label(state, id), economy.sell_refund),
        ),
        Dialog::ConfirmCancelBusiness(id) => {
            let text = match state.business(id) {
                Some(b) => format!(
                    "Cancel {} in {} for ${}?",
                    b.kind,
                    territory_label(state, b.territory),
                    economy.business_cancel_fee
                ),
                None => "Cancel business?".to_string(),
            };
            confirmation("Cancel Business", text)
        }
        Dialog::ConfirmBorrow(amount) => {
            let rate = economy.quoted_rate(amount).unwrap_or(Fixed::ZERO);
            confirmation(
                "Borrow",
                format!(
                    "Borrow ${amount}? Interest: {:.2}%/s",
                    rate.to_f64() * 100.0
                ),
            )
        }
        Dialog::ChooseBusinessType => {
            let mut layout = ModalLayout::new(
                format!("Choose Business (${})", economy.business_start_cost),
                DIALOG,
            );
            const SLOTS: [(f32, f32); 4] =
                [(220.0, 280.0), (220.0, 310.0), (430.0, 280.0), (430.0, 310.0)];
            for (&(x, y), kind) in SLOTS.iter().zip(BusinessKind::ALL) {
                let text = match kind {
                    BusinessKind::LocalBusinessTakeover => "Local Business",
                    other => other.label(),
                };
                layout.controls.push(Control::new(
                    Rect::new(x, y, 150.0, 25.0),
                    text,
                    ButtonAction::ChooseBusiness(kind),
                ));
            }
            layout
        }
        Dialog::AssignBusiness(kind) => {
            territory_picker(format!("Assign {kind}"), state.business_free_territories(), state)
        }
        Dialog::AssignMember(_) => {
            territory_picker("Assign Gang Member", state.owned_territories(), state)
        }
        Dialog::ChangeHq => territory_picker("Choose New HQ", state.owned_territories(), state),
        Dialog::RelocateBusiness(id) => {
            let title = match state.business(id) {
                Some(b) => format!("Relocate {}", b.kind),
                None => "Relocate".to_string(),
            };
            territory_picker(title, state.business_free_territories(), state)
        }
        Dialog::MemberProfile(id) => {
            let mut layout =
                ModalLayout::new(format!("Profile: {}", member_label(state, id)), DIALOG);
            let location = state.member_location(id);
            let place = match location {
                Some(MemberLocation::Territory(t)) => territory_label(state, t),
                _ => "Unassigned".to_string(),
            };
            layout
                .labels
                .push(label(220.0, 250.0, format!("Location: {place}")));
            if matches!(location, Some(MemberLocation::Territory(_))) {
                layout.controls.push(Control::new(
                    Rect::new(230.0, 350.0, 80.0, 30.0),
                    "Unassign",
                    ButtonAction::Unassign(id),
                ));
            }
            layout.controls.push(Control::new(
                Rect::new(320.0, 350.0, 80.0, 30.0),
                "Sell",
                ButtonAction::OpenSell(id),
            ));
            layout.controls.push(Control::new(
                Rect::new(490.0, 350.0, 80.0, 30.0),
                "Close",
                ButtonAction::Dismiss,
            ));
            layout
        }
    }
}

fn confirmation(title: &str, question: String) -> ModalLayout {
    let mut layout = ModalLayout::new(title, DIALOG);
    layout.labels.push(label(220.0, 270.0, question));
    layout
        .controls
        .push(Control::new(YES_BUTTON, "Yes", ButtonAction::Confirm));
    layout
        .controls
        .push(Control::new(NO_BUTTON, "No", ButtonAction::Dismiss));
    layout
}

fn territory_picker(
    title: impl Into<String>,
    choices: Vec<TerritoryId>,
    state: &GameState,
) -> ModalLayout {
    let mut layout = ModalLayout::new(title, DIALOG);
    for (i, id) in choices.into_iter().enumerate() {
        layout.controls.push(Control::new(
            Rect::new(220.0, 240.0 + 30.0 * i as f32, 360.0, 25.0),
            territory_label(state, id),
            ButtonAction::PickTerritory(id),
        ));
    }
    if layout.controls.is_empty() {
        layout.labels.push(label(220.0, 250.0, "No eligible countries"));
    }
    layout
}

fn territory_label(state: &GameState, id: TerritoryId) -> String {
    state
        .territory(id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "?".to_string())
}

fn member_label(state: &GameState, id: MemberId) -> String {
    state
        .member(id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "?".to_string())
}

/// 67000 -> "67,000"
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
