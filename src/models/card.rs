use serde::{Deserialize, Serialize};

use super::address::Address;

// ---------------------------------------------------------------------------
// SourceCard — a candidate returned by a card source
// ---------------------------------------------------------------------------

/// A card as returned by the external random-card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCard {
    pub id: String,
    pub name: String,
    /// Empty when the catalog has no image for the card.
    #[serde(default)]
    pub image_url: String,
}

impl SourceCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
        }
    }

    /// Convert into a ledger card owned by `owner`. The card name becomes
    /// the card description.
    pub fn into_card(self, owner: Address) -> Card {
        Card {
            card_id: self.id,
            image_url: self.image_url,
            description: self.name,
            owner,
        }
    }
}

// ---------------------------------------------------------------------------
// Card — a minted card as stored on the ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: String,
    pub image_url: String,
    pub description: String,
    /// Wire owner slot; [`Address::ZERO`] while the card sits in an unclaimed booster.
    pub owner: Address,
}

// ---------------------------------------------------------------------------
// CardView — the display shape consumed by clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub image: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.card_id.clone(),
            title: card.description.clone(),
            image: card.image_url.clone(),
        }
    }
}
