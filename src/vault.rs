//! Booster vault: fixed-size card bundles with a one-time owner slot.

use tracing::debug;

use crate::error::{Result, TcgError};
use crate::ledger::Operation;
use crate::models::{Booster, BoosterDetails, BoosterId, Card, SourceCard};
use crate::VaultClient;

pub struct BoosterVault<'a> {
    client: &'a VaultClient,
}

impl<'a> BoosterVault<'a> {
    pub fn new(client: &'a VaultClient) -> Self {
        Self { client }
    }

    /// Register a booster with the given cards. Its owner starts unset.
    pub fn create_booster(&self, booster_id: &str, cards: Vec<SourceCard>) -> Result<()> {
        let count = cards.len();
        self.client.transact(Operation::CreateBooster {
            booster_id: booster_id.to_string(),
            cards,
        })?;
        debug!(booster_id, count, "booster created");
        Ok(())
    }

    /// Every booster id, in creation order.
    pub fn get_boosters(&self) -> Result<Vec<BoosterId>> {
        Ok(self.client.ledger().view(|c| c.get_boosters()))
    }

    /// Raw booster record. Unknown ids yield the zero-value record.
    pub fn get_booster_details(&self, booster_id: &str) -> Result<BoosterDetails> {
        Ok(self.client.ledger().view(|c| c.get_booster_details(booster_id)))
    }

    pub fn get_cards_in_booster(&self, booster_id: &str) -> Result<Vec<Card>> {
        self.client
            .ledger()
            .view(|c| c.get_cards_in_booster(booster_id))
            .ok_or_else(|| TcgError::NotFound(format!("Booster {booster_id}")))
    }

    /// Typed booster, or `None` when the ledger has no card payload for it.
    pub fn booster(&self, booster_id: &str) -> Result<Option<Booster>> {
        Ok(Booster::from_details(self.get_booster_details(booster_id)?))
    }
}
