use serde::{Deserialize, Serialize};

use crate::models::{Address, BoosterId, CollectionId, SourceCard};

/// A state-mutating call submitted to the ledger.
///
/// Each variant corresponds to exactly one contract write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Operation {
    #[serde(rename_all = "camelCase")]
    RegisterNewCollection { name: String, card_count: u32 },

    #[serde(rename_all = "camelCase")]
    MintCardToCollection {
        minter: Address,
        collection_id: CollectionId,
        card_id: String,
        image_url: String,
        description: String,
    },

    #[serde(rename_all = "camelCase")]
    CreateBooster {
        booster_id: BoosterId,
        cards: Vec<SourceCard>,
    },

    #[serde(rename_all = "camelCase")]
    ClaimBooster { booster_id: BoosterId },
}

impl Operation {
    /// The contract method name this operation invokes.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::RegisterNewCollection { .. } => "registerNewCollection",
            Operation::MintCardToCollection { .. } => "mintCardToCollection",
            Operation::CreateBooster { .. } => "createBooster",
            Operation::ClaimBooster { .. } => "claimBooster",
        }
    }
}

/// The return value of a successfully executed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    #[serde(rename_all = "camelCase")]
    CollectionRegistered { collection_id: CollectionId },

    #[serde(rename_all = "camelCase")]
    CardMinted {
        collection_id: CollectionId,
        card_id: String,
    },

    #[serde(rename_all = "camelCase")]
    BoosterCreated { booster_id: BoosterId },

    #[serde(rename_all = "camelCase")]
    BoosterClaimed { booster_id: BoosterId, owner: Address },
}
