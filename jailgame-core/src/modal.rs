//! Modal interaction state.
//!
//! At most one panel or dialog captures input at a time. Dialogs opened from
//! a panel remember it and return to it when they close.

use crate::fixed::Fixed;
use crate::state::{BusinessId, BusinessKind, MemberId, TerritoryId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GangTab {
    #[default]
    Members,
    Business,
    Location,
    Vehicle,
    Diplomacy,
}

impl GangTab {
    pub const ALL: [GangTab; 5] = [
        GangTab::Members,
        GangTab::Business,
        GangTab::Location,
        GangTab::Vehicle,
        GangTab::Diplomacy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GangTab::Members => "Members",
            GangTab::Business => "Business",
            GangTab::Location => "Location",
            GangTab::Vehicle => "Vehicle",
            GangTab::Diplomacy => "Gang Diplomacy",
        }
    }

    /// Single-letter label drawn on the tab itself.
    pub fn short_label(self) -> &'static str {
        match self {
            GangTab::Members => "M",
            GangTab::Business => "B",
            GangTab::Location => "L",
            GangTab::Vehicle => "V",
            GangTab::Diplomacy => "D",
        }
    }

    /// Vehicle and diplomacy have no behaviour yet.
    pub fn is_placeholder(self) -> bool {
        matches!(self, GangTab::Vehicle | GangTab::Diplomacy)
    }
}

/// Long-lived views that dialogs can be opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Panel {
    CountryInfo(TerritoryId),
    /// `page` indexes the member or business list of the current tab.
    Gang { tab: GangTab, page: usize },
    /// Borrow amounts and debt repayment.
    Bank,
}

impl Panel {
    /// Gang panel on the first page of `tab`.
    pub fn gang(tab: GangTab) -> Panel {
        Panel::Gang { tab, page: 0 }
    }
}

/// Short-lived prompts. Each variant carries the entity it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dialog {
    ConfirmPurchase(TerritoryId),
    /// First of the two hire confirmations.
    HireStep1,
    HireStep2,
    ConfirmSell(MemberId),
    ConfirmCancelBusiness(BusinessId),
    ConfirmBorrow(Fixed),
    ChooseBusinessType,
    /// Pick a territory for a business that has already been paid for.
    AssignBusiness(BusinessKind),
    AssignMember(MemberId),
    ChangeHq,
    RelocateBusiness(BusinessId),
    MemberProfile(MemberId),
}

impl Dialog {
    /// Yes/No prompts, as opposed to list pickers and the profile card.
    pub fn is_confirmation(self) -> bool {
        matches!(
            self,
            Dialog::ConfirmPurchase(_)
                | Dialog::HireStep1
                | Dialog::HireStep2
                | Dialog::ConfirmSell(_)
                | Dialog::ConfirmCancelBusiness(_)
                | Dialog::ConfirmBorrow(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ActiveModal {
    #[default]
    None,
    Panel(Panel),
    Dialog {
        dialog: Dialog,
        parent: Option<Panel>,
    },
}

impl ActiveModal {
    /// Opens `dialog` on top of the current panel. A dialog replacing another
    /// dialog inherits its parent.
    pub fn open(self, dialog: Dialog) -> ActiveModal {
        let parent = match self {
            ActiveModal::None => None,
            ActiveModal::Panel(panel) => Some(panel),
            ActiveModal::Dialog { parent, .. } => parent,
        };
        ActiveModal::Dialog { dialog, parent }
    }

    /// State after this modal closes: a dialog falls back to its panel, a
    /// panel closes completely.
    pub fn closed(self) -> ActiveModal {
        match self {
            ActiveModal::Dialog {
                parent: Some(panel),
                ..
            } => ActiveModal::Panel(panel),
            _ => ActiveModal::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ActiveModal::None)
    }

    pub fn dialog(&self) -> Option<Dialog> {
        match self {
            ActiveModal::Dialog { dialog, .. } => Some(*dialog),
            _ => None,
        }
    }

    pub fn panel(&self) -> Option<Panel> {
        match self {
            ActiveModal::Panel(panel) => Some(*panel),
            _ => None,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            ActiveModal::None => "none".to_string(),
            ActiveModal::Panel(panel) => format!("{panel:?}"),
            ActiveModal::Dialog { dialog, parent } => match parent {
                Some(p) => format!("{dialog:?} over {p:?}"),
                None => format!("{dialog:?}"),
            },
        }
    }
}
