//! Collection registry: named, capacity-bounded collections and their cards.

use tracing::debug;

use crate::error::{Result, TcgError};
use crate::ledger::{Operation, Outcome};
use crate::models::{Address, Card, CollectionId, CollectionInfo, CollectionSummary};
use crate::VaultClient;

/// Read and write interface over the ledger's collections.
pub struct CollectionRegistry<'a> {
    client: &'a VaultClient,
}

impl<'a> CollectionRegistry<'a> {
    pub fn new(client: &'a VaultClient) -> Self {
        Self { client }
    }

    // -- Writes --------------------------------------------------------------

    /// Register a new collection and return its id (its registration index).
    pub fn register_collection(&self, name: &str, card_count: u32) -> Result<CollectionId> {
        let outcome = self.client.transact(Operation::RegisterNewCollection {
            name: name.to_string(),
            card_count,
        })?;
        match outcome {
            Outcome::CollectionRegistered { collection_id } => {
                debug!(collection_id, name, card_count, "collection registered");
                Ok(collection_id)
            }
            other => Err(unexpected_outcome("registerNewCollection", &other)),
        }
    }

    /// Mint one card into a collection, owned by `minter`.
    ///
    /// Fails with a rejection if the collection is unknown, full, or already
    /// holds `card_id`.
    pub fn mint_card_to_collection(
        &self,
        minter: Address,
        collection_id: CollectionId,
        card_id: &str,
        image_url: &str,
        description: &str,
    ) -> Result<()> {
        self.client.transact(Operation::MintCardToCollection {
            minter,
            collection_id,
            card_id: card_id.to_string(),
            image_url: image_url.to_string(),
            description: description.to_string(),
        })?;
        debug!(collection_id, card_id, "card minted");
        Ok(())
    }

    // -- Reads ---------------------------------------------------------------

    /// Names and capacities of every collection, indexed by id.
    pub fn get_all_collections(&self) -> Result<CollectionSummary> {
        Ok(self.client.ledger().view(|c| c.get_all_collections()))
    }

    pub fn get_collection_info(&self, collection_id: CollectionId) -> Result<CollectionInfo> {
        self.client
            .ledger()
            .view(|c| c.get_collection_info(collection_id))
            .ok_or_else(|| TcgError::NotFound(format!("Collection {collection_id}")))
    }

    /// Cards minted into a collection, in mint order.
    pub fn get_cards_in_collection(&self, collection_id: CollectionId) -> Result<Vec<Card>> {
        self.client
            .ledger()
            .view(|c| c.get_cards_in_collection(collection_id))
            .ok_or_else(|| TcgError::NotFound(format!("Collection {collection_id}")))
    }
}

pub(crate) fn unexpected_outcome(method: &str, outcome: &Outcome) -> TcgError {
    TcgError::InvalidArgument(format!("{method} returned unexpected outcome {outcome:?}"))
}
