//! Deduplicated random-card sourcing.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::SourceCard;
use crate::source::CardSource;

/// Card ids consumed so far in one seeding run.
///
/// Owned by the caller and mutated by [`fetch_unique_cards`]. A set must not
/// be shared between seeding runs executing at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedCardIds(HashSet<String>);

impl UsedCardIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.0.contains(card_id)
    }

    pub fn insert(&mut self, card_id: impl Into<String>) -> bool {
        self.0.insert(card_id.into())
    }

    /// Merge every id from `other` into this set.
    pub fn merge(&mut self, other: &UsedCardIds) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for UsedCardIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Fetch up to `count` cards whose ids are neither in `used` nor repeated
/// within the result, then record the returned ids in `used`.
///
/// Over-fetches `count * 2` candidates to tolerate collisions. The result may
/// be shorter than `count`; callers decide what a short result means. A
/// source error is returned as-is and leaves `used` untouched.
pub fn fetch_unique_cards<S: CardSource + ?Sized>(
    source: &S,
    count: usize,
    used: &mut UsedCardIds,
) -> Result<Vec<SourceCard>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let candidates = source.random_cards(count.saturating_mul(2), used.as_set())?;
    let offered = candidates.len();

    let mut picked_ids: HashSet<String> = HashSet::with_capacity(count);
    let picked: Vec<SourceCard> = candidates
        .into_iter()
        .filter(|card| !used.contains(&card.id) && picked_ids.insert(card.id.clone()))
        .take(count)
        .collect();

    for card in &picked {
        used.insert(card.id.clone());
    }

    if picked.len() < count {
        warn!(
            wanted = count,
            got = picked.len(),
            offered,
            "card source returned fewer unique cards than requested"
        );
    } else {
        debug!(count, offered, "fetched unique cards");
    }

    Ok(picked)
}
