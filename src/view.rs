//! Client-facing query and claim surface.
//!
//! Reads here never fail the caller: a failed read degrades to an empty
//! result with a logged warning.

use std::collections::HashSet;

use tracing::warn;

use crate::claim::ClaimOutcome;
use crate::models::{
    Booster, BoosterDetails, BoosterView, Card, CardView, CollectionId, CollectionView,
};
use crate::VaultClient;

pub struct ClientView<'a> {
    client: &'a VaultClient,
}

impl<'a> ClientView<'a> {
    pub fn new(client: &'a VaultClient) -> Self {
        Self { client }
    }

    /// Every collection with its cards, deduplicated by card id.
    pub fn fetch_collections(&self) -> Vec<CollectionView> {
        let summary = match self.client.collections().get_all_collections() {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "failed to fetch collections");
                return Vec::new();
            }
        };

        summary
            .infos()
            .into_iter()
            .map(|info| CollectionView {
                cards: self.collection_cards(info.id),
                id: info.id,
                name: info.name,
                card_count: info.card_count,
            })
            .collect()
    }

    /// Cards of one collection, deduplicated by card id. Empty on failure.
    pub fn collection_cards(&self, collection_id: CollectionId) -> Vec<CardView> {
        match self.client.collections().get_cards_in_collection(collection_id) {
            Ok(cards) => dedup_cards(&cards),
            Err(e) => {
                warn!(collection_id, error = %e, "failed to fetch collection cards");
                Vec::new()
            }
        }
    }

    /// Every booster whose details arrived with a card payload.
    pub fn fetch_boosters(&self) -> Vec<BoosterView> {
        let vault = self.client.boosters();
        let ids = match vault.get_boosters() {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "failed to fetch booster ids");
                return Vec::new();
            }
        };

        let details = ids
            .iter()
            .filter_map(|id| match vault.get_booster_details(id) {
                Ok(details) => Some((id.clone(), details)),
                Err(e) => {
                    warn!(booster_id = %id, error = %e, "failed to fetch booster details");
                    None
                }
            })
            .collect();
        collect_boosters(details)
    }

    /// Claim a booster for the client's signer.
    pub fn claim_booster(&self, booster_id: &str) -> ClaimOutcome {
        self.client.claims().claim(booster_id)
    }
}

/// Keep the first card for each id, preserving order.
pub fn dedup_cards(cards: &[Card]) -> Vec<CardView> {
    let mut seen = HashSet::with_capacity(cards.len());
    cards
        .iter()
        .filter(|c| seen.insert(c.card_id.as_str()))
        .map(CardView::from)
        .collect()
}

/// Turn `(requested id, details)` pairs into booster views, dropping any
/// entry that arrived without a card payload.
pub fn collect_boosters(details: Vec<(String, BoosterDetails)>) -> Vec<BoosterView> {
    details
        .into_iter()
        .filter_map(|(requested, details)| match Booster::from_details(details) {
            Some(booster) => Some(BoosterView::from(&booster)),
            None => {
                warn!(booster_id = %requested, "no cards found for booster, dropping it");
                None
            }
        })
        .collect()
}
