//! The vault contract: ledger-held collections and boosters.
//!
//! All writes enter through [`VaultContract::execute`], which the ledger
//! calls in its global execution order. Every guard is evaluated against the
//! state at execution time, never against what the caller saw when it
//! submitted.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::operation::{Operation, Outcome};
use crate::models::{
    Address, BoosterDetails, BoosterId, Card, CollectionId, CollectionInfo, CollectionSummary,
    SourceCard,
};

/// Revert reasons raised by the contract's guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContractError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Collection name must not be empty")]
    EmptyName,

    #[error("Collection capacity must be positive")]
    ZeroCapacity,

    #[error("Unknown collection {id}")]
    UnknownCollection { id: CollectionId },

    #[error("Collection {id} is full ({capacity} cards)")]
    CollectionFull { id: CollectionId, capacity: u32 },

    #[error("Card {card_id} already minted into collection {id}")]
    #[serde(rename_all = "camelCase")]
    DuplicateCard { id: CollectionId, card_id: String },

    #[error("Booster {booster_id} already exists")]
    #[serde(rename_all = "camelCase")]
    BoosterExists { booster_id: BoosterId },

    #[error("Unknown booster {booster_id}")]
    #[serde(rename_all = "camelCase")]
    UnknownBooster { booster_id: BoosterId },

    #[error("Booster must contain exactly {expected} cards, got {got}")]
    WrongBoosterSize { expected: usize, got: usize },

    #[error("Card {card_id} appears twice in the booster")]
    #[serde(rename_all = "camelCase")]
    DuplicateCardInBooster { card_id: String },

    #[error("Booster {booster_id} already claimed by {owner}")]
    #[serde(rename_all = "camelCase")]
    AlreadyClaimed { booster_id: BoosterId, owner: Address },

    #[error("The zero address cannot claim a booster")]
    ZeroAddressClaimer,
}

#[derive(Debug, Clone)]
struct CollectionRecord {
    name: String,
    card_count: u32,
    cards: Vec<Card>,
}

#[derive(Debug, Clone)]
struct BoosterRecord {
    cards: Vec<Card>,
    owner: Address,
}

#[derive(Debug, Clone)]
pub struct VaultContract {
    admin: Address,
    booster_card_count: usize,
    collections: Vec<CollectionRecord>,
    boosters: HashMap<BoosterId, BoosterRecord>,
    booster_order: Vec<BoosterId>,
}

impl VaultContract {
    pub fn new(admin: Address, booster_card_count: usize) -> Self {
        Self {
            admin,
            booster_card_count,
            collections: Vec::new(),
            boosters: HashMap::new(),
            booster_order: Vec::new(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Number of cards every booster must hold.
    pub fn booster_card_count(&self) -> usize {
        self.booster_card_count
    }

    /// Apply one operation on behalf of `sender`.
    ///
    /// On `Err` the state is left untouched.
    pub fn execute(&mut self, sender: Address, op: &Operation) -> Result<Outcome, ContractError> {
        match op {
            Operation::RegisterNewCollection { name, card_count } => {
                let collection_id = self.register_new_collection(sender, name, *card_count)?;
                Ok(Outcome::CollectionRegistered { collection_id })
            }
            Operation::MintCardToCollection {
                minter,
                collection_id,
                card_id,
                image_url,
                description,
            } => {
                self.mint_card_to_collection(
                    sender,
                    *minter,
                    *collection_id,
                    card_id,
                    image_url,
                    description,
                )?;
                Ok(Outcome::CardMinted {
                    collection_id: *collection_id,
                    card_id: card_id.clone(),
                })
            }
            Operation::CreateBooster { booster_id, cards } => {
                self.create_booster(sender, booster_id, cards)?;
                Ok(Outcome::BoosterCreated {
                    booster_id: booster_id.clone(),
                })
            }
            Operation::ClaimBooster { booster_id } => {
                self.claim_booster(sender, booster_id)?;
                Ok(Outcome::BoosterClaimed {
                    booster_id: booster_id.clone(),
                    owner: sender,
                })
            }
        }
    }

    fn assert_admin(&self, sender: Address) -> Result<(), ContractError> {
        if sender != self.admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    // -- Writes ------------------------------------------------------------

    fn register_new_collection(
        &mut self,
        sender: Address,
        name: &str,
        card_count: u32,
    ) -> Result<CollectionId, ContractError> {
        self.assert_admin(sender)?;
        if name.trim().is_empty() {
            return Err(ContractError::EmptyName);
        }
        if card_count == 0 {
            return Err(ContractError::ZeroCapacity);
        }
        let id = self.collections.len() as CollectionId;
        self.collections.push(CollectionRecord {
            name: name.to_string(),
            card_count,
            cards: Vec::new(),
        });
        Ok(id)
    }

    fn mint_card_to_collection(
        &mut self,
        sender: Address,
        minter: Address,
        collection_id: CollectionId,
        card_id: &str,
        image_url: &str,
        description: &str,
    ) -> Result<(), ContractError> {
        self.assert_admin(sender)?;
        let collection = usize::try_from(collection_id)
            .ok()
            .and_then(|idx| self.collections.get_mut(idx))
            .ok_or(ContractError::UnknownCollection { id: collection_id })?;

        if collection.cards.len() >= collection.card_count as usize {
            return Err(ContractError::CollectionFull {
                id: collection_id,
                capacity: collection.card_count,
            });
        }
        if collection.cards.iter().any(|c| c.card_id == card_id) {
            return Err(ContractError::DuplicateCard {
                id: collection_id,
                card_id: card_id.to_string(),
            });
        }

        collection.cards.push(Card {
            card_id: card_id.to_string(),
            image_url: image_url.to_string(),
            description: description.to_string(),
            owner: minter,
        });
        Ok(())
    }

    fn create_booster(
        &mut self,
        sender: Address,
        booster_id: &str,
        cards: &[SourceCard],
    ) -> Result<(), ContractError> {
        self.assert_admin(sender)?;
        if self.boosters.contains_key(booster_id) {
            return Err(ContractError::BoosterExists {
                booster_id: booster_id.to_string(),
            });
        }
        if cards.len() != self.booster_card_count {
            return Err(ContractError::WrongBoosterSize {
                expected: self.booster_card_count,
                got: cards.len(),
            });
        }
        let mut seen = HashSet::with_capacity(cards.len());
        for card in cards {
            if !seen.insert(card.id.as_str()) {
                return Err(ContractError::DuplicateCardInBooster {
                    card_id: card.id.clone(),
                });
            }
        }

        let record = BoosterRecord {
            cards: cards
                .iter()
                .cloned()
                .map(|c| c.into_card(Address::ZERO))
                .collect(),
            owner: Address::ZERO,
        };
        self.boosters.insert(booster_id.to_string(), record);
        self.booster_order.push(booster_id.to_string());
        Ok(())
    }

    fn claim_booster(&mut self, sender: Address, booster_id: &str) -> Result<(), ContractError> {
        // The zero address is the unclaimed marker and can never become an owner.
        if sender.is_zero() {
            return Err(ContractError::ZeroAddressClaimer);
        }
        let booster = self
            .boosters
            .get_mut(booster_id)
            .ok_or_else(|| ContractError::UnknownBooster {
                booster_id: booster_id.to_string(),
            })?;

        if !booster.owner.is_zero() {
            return Err(ContractError::AlreadyClaimed {
                booster_id: booster_id.to_string(),
                owner: booster.owner,
            });
        }

        booster.owner = sender;
        for card in &mut booster.cards {
            card.owner = sender;
        }
        Ok(())
    }

    // -- Views -------------------------------------------------------------

    pub fn get_all_collections(&self) -> CollectionSummary {
        CollectionSummary {
            names: self.collections.iter().map(|c| c.name.clone()).collect(),
            card_counts: self.collections.iter().map(|c| c.card_count).collect(),
        }
    }

    pub fn get_collection_info(&self, collection_id: CollectionId) -> Option<CollectionInfo> {
        self.collection(collection_id).map(|c| CollectionInfo {
            id: collection_id,
            name: c.name.clone(),
            card_count: c.card_count,
        })
    }

    pub fn get_cards_in_collection(&self, collection_id: CollectionId) -> Option<Vec<Card>> {
        self.collection(collection_id).map(|c| c.cards.clone())
    }

    /// Booster ids in creation order.
    pub fn get_boosters(&self) -> Vec<BoosterId> {
        self.booster_order.clone()
    }

    pub fn get_booster_details(&self, booster_id: &str) -> BoosterDetails {
        match self.boosters.get(booster_id) {
            Some(record) => BoosterDetails {
                booster_id: booster_id.to_string(),
                cards: Some(record.cards.clone()),
                owner: record.owner,
            },
            None => BoosterDetails::default(),
        }
    }

    pub fn get_cards_in_booster(&self, booster_id: &str) -> Option<Vec<Card>> {
        self.boosters.get(booster_id).map(|b| b.cards.clone())
    }

    fn collection(&self, collection_id: CollectionId) -> Option<&CollectionRecord> {
        usize::try_from(collection_id)
            .ok()
            .and_then(|idx| self.collections.get(idx))
    }
}
