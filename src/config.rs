use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::CollectionSpec;

pub const POKEMON_TCG_API: &str = "https://api.pokemontcg.io/v2/cards";
pub const API_KEY_ENV: &str = "POKEMON_TCG_API_KEY";

pub const DEFAULT_BOOSTER_COUNT: usize = 3;
pub const DEFAULT_BOOSTER_CARD_COUNT: usize = 5;

/// The collections declared by the reference seeding flow.
pub fn default_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new("Collection 1", 5),
        CollectionSpec::new("Collection 2", 10),
        CollectionSpec::new("Collection 3", 12),
    ]
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tcg-vault").join("seed.json"))
}

/// Which seeding steps share a used-id set when fetching collection cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DedupScope {
    /// One set for every collection and the booster pool.
    #[default]
    Global,
    /// A fresh set per collection, so two collections may share a card id.
    /// The booster pool still excludes every id minted during the run.
    PerCollection,
}

/// What to do when fewer unique cards arrive than a collection declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortCollectionPolicy {
    /// Mint what was obtained and record the shortfall in the report.
    #[default]
    MintAvailable,
    /// Fail the run with `InsufficientUniqueCards` before minting.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedConfig {
    pub collections: Vec<CollectionSpec>,
    pub booster_count: usize,
    pub booster_card_count: usize,
    pub dedup_scope: DedupScope,
    pub short_collection: ShortCollectionPolicy,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            collections: default_collections(),
            booster_count: DEFAULT_BOOSTER_COUNT,
            booster_card_count: DEFAULT_BOOSTER_CARD_COUNT,
            dedup_scope: DedupScope::default(),
            short_collection: ShortCollectionPolicy::default(),
        }
    }
}

impl SeedConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from the platform config directory if a file exists there,
    /// otherwise return the defaults.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Total cards the booster pool must provide.
    pub fn booster_pool_size(&self) -> usize {
        self.booster_count.saturating_mul(self.booster_card_count)
    }
}
