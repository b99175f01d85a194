//! One-time population of the registry and vault from a card source.
//!
//! Every write is submitted and confirmed before the next one is issued.
//! A failure aborts the run; whatever was already confirmed stays on the
//! ledger.

use tracing::{info, warn};

use crate::config::{DedupScope, SeedConfig, ShortCollectionPolicy};
use crate::dedup::{fetch_unique_cards, UsedCardIds};
use crate::error::{Result, TcgError};
use crate::models::{Address, BoosterId, CollectionId, SourceCard};
use crate::source::CardSource;
use crate::VaultClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededCollection {
    pub id: CollectionId,
    pub name: String,
    /// Capacity declared at registration.
    pub declared: u32,
    /// Cards actually minted.
    pub minted: usize,
}

impl SeededCollection {
    pub fn is_short(&self) -> bool {
        self.minted < self.declared as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub collections: Vec<SeededCollection>,
    pub boosters_created: Vec<BoosterId>,
    pub boosters_skipped: Vec<BoosterId>,
    /// Every card id consumed by the run.
    pub used_ids: UsedCardIds,
}

impl SeedReport {
    pub fn short_collections(&self) -> impl Iterator<Item = &SeededCollection> {
        self.collections.iter().filter(|c| c.is_short())
    }
}

/// Split `pool` into `booster_count` contiguous slices of `booster_card_count`.
///
/// Always returns `booster_count` slices; once the pool runs out, slices are
/// short or empty.
pub fn partition_pool(
    pool: &[SourceCard],
    booster_count: usize,
    booster_card_count: usize,
) -> Vec<Vec<SourceCard>> {
    (0..booster_count)
        .map(|i| {
            let start = i.saturating_mul(booster_card_count).min(pool.len());
            let end = (i + 1).saturating_mul(booster_card_count).min(pool.len());
            pool[start..end].to_vec()
        })
        .collect()
}

pub struct SeedingPipeline<'a, S: CardSource + ?Sized> {
    client: &'a VaultClient,
    source: &'a S,
    config: &'a SeedConfig,
}

impl<'a, S: CardSource + ?Sized> SeedingPipeline<'a, S> {
    pub fn new(client: &'a VaultClient, source: &'a S, config: &'a SeedConfig) -> Self {
        Self {
            client,
            source,
            config,
        }
    }

    /// Seed every declared collection, then the boosters.
    ///
    /// The used-id set lives for exactly this run.
    pub fn run(self) -> Result<SeedReport> {
        let minter = self.validate()?;
        let mut used_ids = UsedCardIds::new();

        let collections = self.seed_collections(minter, &mut used_ids)?;
        let (boosters_created, boosters_skipped) = self.seed_boosters(&mut used_ids)?;

        info!(
            collections = collections.len(),
            boosters = boosters_created.len(),
            skipped = boosters_skipped.len(),
            cards = used_ids.len(),
            "seeding finished"
        );
        Ok(SeedReport {
            collections,
            boosters_created,
            boosters_skipped,
            used_ids,
        })
    }

    fn validate(&self) -> Result<Address> {
        let minter = self.client.signer().ok_or(TcgError::MissingSigner)?;
        if self.config.booster_count > 0 {
            let expected = self.client.ledger().view(|c| c.booster_card_count());
            if self.config.booster_card_count == 0 {
                return Err(TcgError::InvalidArgument(
                    "booster card count must be positive".to_string(),
                ));
            }
            if self.config.booster_card_count != expected {
                return Err(TcgError::InvalidArgument(format!(
                    "booster card count {} does not match the contract's {}",
                    self.config.booster_card_count, expected
                )));
            }
        }
        Ok(minter)
    }

    fn seed_collections(
        &self,
        minter: Address,
        run_ids: &mut UsedCardIds,
    ) -> Result<Vec<SeededCollection>> {
        let registry = self.client.collections();
        let mut seeded = Vec::with_capacity(self.config.collections.len());

        for spec in &self.config.collections {
            let wanted = spec.card_count as usize;

            let cards = match self.config.dedup_scope {
                DedupScope::Global => fetch_unique_cards(self.source, wanted, run_ids)?,
                DedupScope::PerCollection => {
                    let mut local = UsedCardIds::new();
                    let cards = fetch_unique_cards(self.source, wanted, &mut local)?;
                    run_ids.merge(&local);
                    cards
                }
            };

            if cards.len() < wanted {
                match self.config.short_collection {
                    ShortCollectionPolicy::Abort => {
                        return Err(TcgError::InsufficientUniqueCards {
                            target: format!("collection '{}'", spec.name),
                            wanted,
                            got: cards.len(),
                        });
                    }
                    ShortCollectionPolicy::MintAvailable => warn!(
                        collection = %spec.name,
                        declared = wanted,
                        available = cards.len(),
                        "collection will hold fewer cards than declared"
                    ),
                }
            }

            // Registration waits until the cards are in hand.
            let id = registry.register_collection(&spec.name, spec.card_count)?;
            for card in &cards {
                registry.mint_card_to_collection(minter, id, &card.id, &card.image_url, &card.name)?;
            }

            info!(collection = %spec.name, id, minted = cards.len(), "collection seeded");
            seeded.push(SeededCollection {
                id,
                name: spec.name.clone(),
                declared: spec.card_count,
                minted: cards.len(),
            });
        }

        Ok(seeded)
    }

    fn seed_boosters(&self, run_ids: &mut UsedCardIds) -> Result<(Vec<BoosterId>, Vec<BoosterId>)> {
        let mut created = Vec::new();
        let mut skipped = Vec::new();
        if self.config.booster_count == 0 {
            return Ok((created, skipped));
        }

        let size = self.config.booster_card_count;
        let pool = fetch_unique_cards(self.source, self.config.booster_pool_size(), run_ids)?;
        let vault = self.client.boosters();

        for (index, slice) in partition_pool(&pool, self.config.booster_count, size)
            .into_iter()
            .enumerate()
        {
            let booster_id = (index + 1).to_string();
            if slice.len() < size {
                warn!(
                    booster_id = %booster_id,
                    available = slice.len(),
                    needed = size,
                    "not enough cards for booster, skipping"
                );
                skipped.push(booster_id);
                continue;
            }
            vault.create_booster(&booster_id, slice)?;
            info!(booster_id = %booster_id, "booster seeded");
            created.push(booster_id);
        }

        Ok((created, skipped))
    }
}
