//! Shared test fixtures for the vault integration tests.
//!
//! Provides a freshly deployed ledger with an admin client, well-known
//! addresses, synthetic cards and scripted card sources.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tcg_vault::{Address, CardSource, Ledger, Result, SourceCard, TcgError, VaultClient};

pub const BOOSTER_CARD_COUNT: usize = 5;

pub fn deployer() -> Address {
    Address::repeat_byte(0xd0)
}

pub fn alice() -> Address {
    Address::repeat_byte(0xa1)
}

pub fn bob() -> Address {
    Address::repeat_byte(0xb0)
}

/// Deploy a ledger and return it with a client signing as the deployer.
pub fn setup_ledger() -> (Arc<Ledger>, VaultClient) {
    let ledger = Ledger::deploy(deployer(), BOOSTER_CARD_COUNT);
    let admin = VaultClient::builder(ledger.clone())
        .signer(deployer())
        .build();
    (ledger, admin)
}

/// `count` cards with ids `{prefix}-1`, `{prefix}-2`, ...
pub fn sample_cards(prefix: &str, count: usize) -> Vec<SourceCard> {
    (1..=count)
        .map(|i| {
            SourceCard::new(
                format!("{prefix}-{i}"),
                format!("{prefix} card {i}"),
                format!("https://images.example.invalid/{prefix}-{i}.png"),
            )
        })
        .collect()
}

/// Create an unclaimed booster holding `BOOSTER_CARD_COUNT` fresh cards.
pub fn create_booster(admin: &VaultClient, booster_id: &str) {
    admin
        .boosters()
        .create_booster(booster_id, sample_cards(&format!("b{booster_id}"), BOOSTER_CARD_COUNT))
        .unwrap();
}

/// A source that replays queued batches in order and records every request.
pub struct ScriptedSource {
    batches: Mutex<VecDeque<Vec<SourceCard>>>,
    requests: Mutex<Vec<usize>>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<SourceCard>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requested counts, one per call.
    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().clone()
    }
}

impl CardSource for ScriptedSource {
    fn random_cards(&self, count: usize, _exclude: &HashSet<String>) -> Result<Vec<SourceCard>> {
        self.requests.lock().push(count);
        let batch = self.batches.lock().pop_front().unwrap_or_default();
        Ok(batch.into_iter().take(count).collect())
    }
}

/// A source that is always down.
pub struct FailingSource;

impl CardSource for FailingSource {
    fn random_cards(&self, _count: usize, _exclude: &HashSet<String>) -> Result<Vec<SourceCard>> {
        Err(TcgError::SourceUnavailable("503 Service Unavailable".to_string()))
    }
}
