//! TCG vault SDK for Rust.
//!
//! Distributes a catalog of collectible cards into named collections and
//! fixed-size boosters held on a consensus-ordered ledger. Each booster can be
//! claimed by exactly one owner, exactly once.
//!
//! # Quick start
//!
//! ```no_run
//! use std::time::Duration;
//! use tcg_vault::{Address, Ledger, PokemonTcgSource, SeedConfig, SeedingPipeline, VaultClient};
//!
//! let deployer = Address::repeat_byte(0xd0);
//! let ledger = Ledger::deploy(deployer, 5);
//! let admin = VaultClient::builder(ledger.clone()).signer(deployer).build();
//!
//! // Seed collections and boosters from the public card API
//! let source = PokemonTcgSource::new(Duration::from_secs(30)).unwrap();
//! let config = SeedConfig::default();
//! let report = SeedingPipeline::new(&admin, &source, &config).run().unwrap();
//!
//! // Claim a booster as another account
//! let player = VaultClient::builder(ledger).signer(Address::repeat_byte(0xa1)).build();
//! let outcome = player.claims().claim(&report.boosters_created[0]);
//! println!("{}", outcome.user_message());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod claim;
pub mod config;
pub mod dedup;
pub mod error;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod seeding;
pub mod source;
pub mod vault;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncVaultClient;
pub use claim::{ClaimCoordinator, ClaimOutcome, PendingClaim};
pub use config::{DedupScope, SeedConfig, ShortCollectionPolicy};
pub use dedup::{fetch_unique_cards, UsedCardIds};
pub use error::{Result, TcgError};
pub use ledger::{ContractError, Ledger, Operation, Outcome, PendingTx, Receipt, TxStatus};
pub use models::*;
pub use registry::CollectionRegistry;
pub use seeding::{SeedReport, SeededCollection, SeedingPipeline};
pub use source::{CardSource, PokemonTcgSource, StaticCardSource};
pub use vault::BoosterVault;
pub use view::ClientView;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

// ---------------------------------------------------------------------------
// VaultClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`VaultClient`].
///
/// Use [`VaultClient::builder()`] to obtain one.
pub struct VaultClientBuilder {
    ledger: Arc<Ledger>,
    signer: Option<Address>,
    preflight: bool,
}

impl VaultClientBuilder {
    /// Set the identity that signs writes. Without a signer the client is
    /// read-only.
    pub fn signer(mut self, signer: Address) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Enable or disable client-side simulation before each submission.
    ///
    /// Defaults to `true`.
    pub fn preflight(mut self, enabled: bool) -> Self {
        self.preflight = enabled;
        self
    }

    pub fn build(self) -> VaultClient {
        VaultClient {
            ledger: self.ledger,
            signer: self.signer,
            preflight: self.preflight,
        }
    }
}

// ---------------------------------------------------------------------------
// VaultClient
// ---------------------------------------------------------------------------

/// The main entry point: a connection to the vault ledger under one identity.
///
/// Exposes the registry, vault, claim and view interfaces as lightweight
/// borrowing wrappers.
pub struct VaultClient {
    ledger: Arc<Ledger>,
    signer: Option<Address>,
    preflight: bool,
}

impl VaultClient {
    pub fn builder(ledger: Arc<Ledger>) -> VaultClientBuilder {
        VaultClientBuilder {
            ledger,
            signer: None,
            preflight: true,
        }
    }

    /// A client for the same ledger signing as `signer`.
    pub fn signed_by(&self, signer: Address) -> VaultClient {
        VaultClient {
            ledger: self.ledger.clone(),
            signer: Some(signer),
            preflight: self.preflight,
        }
    }

    // -- Interface accessors -----------------------------------------------

    /// Access the collection registry.
    pub fn collections(&self) -> CollectionRegistry<'_> {
        CollectionRegistry::new(self)
    }

    /// Access the booster vault.
    pub fn boosters(&self) -> BoosterVault<'_> {
        BoosterVault::new(self)
    }

    /// Access the claim coordinator. Claims are signed by this client's signer.
    pub fn claims(&self) -> ClaimCoordinator<'_> {
        ClaimCoordinator::new(self)
    }

    /// Access the client-facing query surface.
    pub fn view(&self) -> ClientView<'_> {
        ClientView::new(self)
    }

    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    // -- Write path ----------------------------------------------------------

    /// Preflight (if enabled) and submit an operation, without awaiting it.
    pub(crate) fn submit(&self, operation: Operation) -> Result<PendingTx<'_>> {
        let signer = self.signer.ok_or(TcgError::MissingSigner)?;
        if self.preflight {
            if let Err(reason) = self.ledger.estimate(signer, &operation) {
                return Err(TcgError::PreflightEstimation {
                    method: operation.method().to_string(),
                    reason,
                });
            }
        }
        Ok(self.ledger.submit(signer, operation))
    }

    /// Submit an operation, await finalization and require a success status.
    pub(crate) fn transact(&self, operation: Operation) -> Result<Outcome> {
        let pending = self.submit(operation)?;
        let method = pending.method();
        let receipt = pending.wait()?;
        debug!(sequence = receipt.sequence, block = receipt.block, method, status = ?receipt.status, "operation finalized");
        receipt.successful()
    }
}

impl fmt::Display for VaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signer = self
            .signer
            .map(|s| s.to_string())
            .unwrap_or_else(|| "read-only".to_string());
        write!(
            f,
            "VaultClient(signer={}, preflight={}, height={})",
            signer,
            self.preflight,
            self.ledger.height()
        )
    }
}
