//! Async wrapper around [`VaultClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs client operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use tcg_vault::{Address, AsyncVaultClient, Ledger, VaultClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let ledger = Ledger::deploy(Address::repeat_byte(0xd0), 5);
//!     let client = VaultClient::builder(ledger).signer(Address::repeat_byte(0xa1)).build();
//!     let client = AsyncVaultClient::new(client);
//!
//!     let collections = client.fetch_collections().await;
//!     let outcome = client.claim("1").await.unwrap();
//!     println!("{} collections, {}", collections.len(), outcome.user_message());
//! }
//! ```

use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use crate::claim::ClaimOutcome;
use crate::error::{Result, TcgError};
use crate::models::CollectionView;
use crate::VaultClient;

/// Async wrapper around [`VaultClient`].
///
/// Writes from one wrapper are still issued and confirmed one at a time by
/// the closures passed to [`run()`](Self::run); only read batches fan out.
#[derive(Clone)]
pub struct AsyncVaultClient {
    inner: Arc<VaultClient>,
}

impl AsyncVaultClient {
    pub fn new(client: VaultClient) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&VaultClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(|e| TcgError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Every collection with its cards; per-collection card reads run
    /// concurrently. Failed reads degrade to empty results.
    pub async fn fetch_collections(&self) -> Vec<CollectionView> {
        let summary = match self.run(|c| c.collections().get_all_collections()).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "failed to fetch collections");
                return Vec::new();
            }
        };

        let reads = summary.infos().into_iter().map(|info| {
            let this = self.clone();
            async move {
                let id = info.id;
                let cards = this
                    .run(move |c| Ok(c.view().collection_cards(id)))
                    .await
                    .unwrap_or_else(|e| {
                        warn!(collection_id = id, error = %e, "card read task failed");
                        Vec::new()
                    });
                CollectionView {
                    id: info.id,
                    name: info.name,
                    card_count: info.card_count,
                    cards,
                }
            }
        });

        join_all(reads).await
    }

    /// Run the claim protocol on the blocking pool.
    pub async fn claim(&self, booster_id: &str) -> Result<ClaimOutcome> {
        let booster_id = booster_id.to_string();
        self.run(move |c| Ok(c.claims().claim(&booster_id))).await
    }

    pub fn client(&self) -> &VaultClient {
        &self.inner
    }
}
