use serde::{Deserialize, Serialize};

use super::address::{owner_from_wire, Address};
use super::card::{Card, CardView};

pub type BoosterId = String;

// ---------------------------------------------------------------------------
// BoosterDetails — wire shape of `getBoosterDetails`
// ---------------------------------------------------------------------------

/// Raw booster record as read from the ledger.
///
/// A read for an id the ledger does not know returns the zero-value record:
/// empty id, no card payload and the zero owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterDetails {
    pub booster_id: BoosterId,
    #[serde(default)]
    pub cards: Option<Vec<Card>>,
    pub owner: Address,
}

// ---------------------------------------------------------------------------
// BoosterState / Booster — typed client-side view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum BoosterState {
    Unclaimed,
    Claimed { by: Address },
}

impl BoosterState {
    pub fn from_wire(owner: Address) -> Self {
        match owner_from_wire(owner) {
            Some(by) => BoosterState::Claimed { by },
            None => BoosterState::Unclaimed,
        }
    }

    pub fn owner(&self) -> Option<Address> {
        match self {
            BoosterState::Claimed { by } => Some(*by),
            BoosterState::Unclaimed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booster {
    pub booster_id: BoosterId,
    pub cards: Vec<Card>,
    pub state: BoosterState,
}

impl Booster {
    /// Build a typed booster from raw details.
    ///
    /// Returns `None` when the details carry no card payload; such a record
    /// is a fetch anomaly, not an empty booster.
    pub fn from_details(details: BoosterDetails) -> Option<Self> {
        let cards = details.cards?;
        Some(Self {
            booster_id: details.booster_id,
            cards,
            state: BoosterState::from_wire(details.owner),
        })
    }

    pub fn owner(&self) -> Option<Address> {
        self.state.owner()
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self.state, BoosterState::Claimed { .. })
    }
}

/// A booster in the display shape consumed by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterView {
    pub booster_id: BoosterId,
    pub cards: Vec<CardView>,
    pub owner: Option<Address>,
}

impl From<&Booster> for BoosterView {
    fn from(booster: &Booster) -> Self {
        Self {
            booster_id: booster.booster_id.clone(),
            cards: booster.cards.iter().map(CardView::from).collect(),
            owner: booster.owner(),
        }
    }
}
