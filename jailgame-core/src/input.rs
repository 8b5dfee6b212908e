use crate::fixed::Fixed;
use crate::geometry::Point;
use crate::state::{BusinessId, BusinessKind, MemberId, TerritoryId};
use serde::{Deserialize, Serialize};

/// Raw events from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed at a map-space position.
    PointerDown(Point),
    /// Pointer moved; drives hover tooltips only.
    PointerMoved(Point),
    KeyDown(Key),
    /// Window closed or the input source ended.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Char(char),
    Other,
}

/// State-changing player actions, already confirmed by the interaction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // Territory
    BuyTerritory(TerritoryId),
    ChangeHeadquarters(TerritoryId),

    // Gang
    HireMember,
    SellMember(MemberId),
    AssignMember {
        member: MemberId,
        territory: TerritoryId,
    },
    UnassignMember(MemberId),

    // Business
    /// Pay the start-up cost and hold the business until a territory is picked.
    StartBusiness(BusinessKind),
    PlaceBusiness(TerritoryId),
    /// Drop a paid-for business that was never placed (the payment is not refunded).
    DiscardPendingBusiness,
    CancelBusiness(BusinessId),
    RelocateBusiness {
        business: BusinessId,
        territory: TerritoryId,
    },

    // Bank
    Borrow(Fixed),
    RepayDebt,
}
