use serde::{Deserialize, Serialize};

use super::card::CardView;

/// Collection ids are assigned sequentially in registration order, from 0.
pub type CollectionId = u64;

/// A declared collection to seed: a name and its fixed card capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpec {
    pub name: String,
    pub card_count: u32,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>, card_count: u32) -> Self {
        Self {
            name: name.into(),
            card_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    pub id: CollectionId,
    pub name: String,
    pub card_count: u32,
}

/// Wire shape of `getAllCollections`: parallel name and capacity arrays,
/// indexed by collection id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub names: Vec<String>,
    pub card_counts: Vec<u32>,
}

impl CollectionSummary {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Zip the parallel arrays into per-collection records.
    pub fn infos(&self) -> Vec<CollectionInfo> {
        self.names
            .iter()
            .zip(&self.card_counts)
            .enumerate()
            .map(|(id, (name, count))| CollectionInfo {
                id: id as CollectionId,
                name: name.clone(),
                card_count: *count,
            })
            .collect()
    }
}

/// A collection together with its (deduplicated) cards, as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionView {
    pub id: CollectionId,
    pub name: String,
    pub card_count: u32,
    pub cards: Vec<CardView>,
}
