//! Random-card sources.
//!
//! A [`CardSource`] returns randomly ordered candidate cards. Sources are free
//! to ignore the excluded-id hint; the dedup layer ([`crate::dedup`]) is what
//! guarantees uniqueness.

use std::collections::HashSet;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config;
use crate::error::{Result, TcgError};
use crate::models::SourceCard;

pub trait CardSource {
    /// Return up to `count` randomly ordered candidate cards.
    fn random_cards(&self, count: usize, exclude: &HashSet<String>) -> Result<Vec<SourceCard>>;
}

impl<S: CardSource + ?Sized> CardSource for &S {
    fn random_cards(&self, count: usize, exclude: &HashSet<String>) -> Result<Vec<SourceCard>> {
        (**self).random_cards(count, exclude)
    }
}

// ---------------------------------------------------------------------------
// PokemonTcgSource
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<ApiCard>,
}

#[derive(Deserialize)]
struct ApiCard {
    id: String,
    name: String,
    images: Option<ApiImages>,
}

#[derive(Deserialize)]
struct ApiImages {
    large: Option<String>,
}

/// Card source backed by the public Pokémon TCG API.
///
/// The API cannot filter by an excluded-id set, so `exclude` is ignored.
pub struct PokemonTcgSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PokemonTcgSource {
    /// Create a source with the given request timeout. The API key is read
    /// from `POKEMON_TCG_API_KEY` when set.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TcgError::SourceUnavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config::POKEMON_TCG_API.to_string(),
            api_key: std::env::var(config::API_KEY_ENV).ok().filter(|k| !k.is_empty()),
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Parse a `/v2/cards` response body. A card without a large image gets
    /// an empty image URL.
    pub fn parse_response(body: &str) -> Result<Vec<SourceCard>> {
        let resp: ApiResponse = serde_json::from_str(body)
            .map_err(|e| TcgError::SourceUnavailable(format!("malformed card response: {e}")))?;
        Ok(resp
            .data
            .into_iter()
            .map(|c| SourceCard {
                id: c.id,
                name: c.name,
                image_url: c.images.and_then(|i| i.large).unwrap_or_default(),
            })
            .collect())
    }
}

impl CardSource for PokemonTcgSource {
    fn random_cards(&self, count: usize, _exclude: &HashSet<String>) -> Result<Vec<SourceCard>> {
        debug!(count, url = %self.base_url, "requesting random cards");
        let mut req = self
            .client
            .get(&self.base_url)
            .query(&[("pageSize", count.to_string()), ("orderBy", "random".to_string())]);
        if let Some(key) = &self.api_key {
            req = req.header("X-Api-Key", key);
        }

        let body = req
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| TcgError::SourceUnavailable(e.to_string()))?;

        Self::parse_response(&body)
    }
}

// ---------------------------------------------------------------------------
// StaticCardSource
// ---------------------------------------------------------------------------

/// In-memory catalog sampled in random order, without replacement within a
/// single request. Excluded ids are never offered.
pub struct StaticCardSource {
    catalog: Vec<SourceCard>,
    rng: Mutex<StdRng>,
}

impl StaticCardSource {
    pub fn new(catalog: Vec<SourceCard>) -> Self {
        Self {
            catalog,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sampling for reproducible runs.
    pub fn with_seed(catalog: Vec<SourceCard>, seed: u64) -> Self {
        Self {
            catalog,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A synthetic catalog of `size` cards with ids `fixture-0001`, ...
    pub fn fixture(size: usize) -> Self {
        let catalog = (1..=size)
            .map(|i| {
                SourceCard::new(
                    format!("fixture-{i:04}"),
                    format!("Fixture Card {i}"),
                    format!("https://images.example.invalid/fixture-{i:04}.png"),
                )
            })
            .collect();
        Self::new(catalog)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl CardSource for StaticCardSource {
    fn random_cards(&self, count: usize, exclude: &HashSet<String>) -> Result<Vec<SourceCard>> {
        let available: Vec<&SourceCard> = self
            .catalog
            .iter()
            .filter(|c| !exclude.contains(&c.id))
            .collect();
        let mut rng = self.rng.lock();
        Ok(available
            .choose_multiple(&mut *rng, count.min(available.len()))
            .map(|c| (*c).clone())
            .collect())
    }
}
