//! Booster claims.
//!
//! A claim moves a booster from unclaimed to claimed-by-caller. The client
//! never locks anything: exclusivity is enforced by the contract, which
//! re-checks the owner slot when the claim executes in ledger order. The
//! coordinator only reacts to the finalized outcome and re-reads the booster
//! afterwards as the source of truth.

use tracing::{info, warn};

use crate::error::TcgError;
use crate::ledger::{ContractError, Operation, PendingTx};
use crate::models::{Address, Booster, BoosterId};
use crate::VaultClient;

/// The user-facing result of a claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The ledger reports the caller as owner after finalization.
    Claimed(Booster),
    /// The booster already had an owner, seen by the pre-check or reported
    /// by the contract.
    AlreadyClaimed {
        booster_id: BoosterId,
        owner: Option<Address>,
    },
    /// Client-side simulation predicted a certain rejection; nothing was submitted.
    EstimationFailed { booster_id: BoosterId, reason: String },
    /// The operation was finalized with a revert.
    Rejected { booster_id: BoosterId, reason: String },
    /// No structured reason is available.
    Failed { booster_id: BoosterId, message: String },
}

impl ClaimOutcome {
    pub fn booster_id(&self) -> &str {
        match self {
            ClaimOutcome::Claimed(b) => &b.booster_id,
            ClaimOutcome::AlreadyClaimed { booster_id, .. }
            | ClaimOutcome::EstimationFailed { booster_id, .. }
            | ClaimOutcome::Rejected { booster_id, .. }
            | ClaimOutcome::Failed { booster_id, .. } => booster_id,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            ClaimOutcome::Claimed(b) => format!(
                "Booster {} claimed: {} cards are now yours.",
                b.booster_id,
                b.cards.len()
            ),
            ClaimOutcome::AlreadyClaimed { owner: Some(owner), .. } => {
                format!("This booster has already been claimed by {owner}.")
            }
            ClaimOutcome::AlreadyClaimed { owner: None, .. } => {
                "This booster has already been claimed.".to_string()
            }
            ClaimOutcome::EstimationFailed { reason, .. } => format!(
                "Unable to estimate the claim; the booster may already be owned or the request is invalid ({reason})."
            ),
            ClaimOutcome::Rejected { reason, .. } => {
                format!("Error while claiming the booster: {reason}")
            }
            ClaimOutcome::Failed { .. } => {
                "An unknown error occurred while claiming the booster. Please try again.".to_string()
            }
        }
    }

    fn from_error(booster_id: &str, err: &TcgError) -> Self {
        let booster_id = booster_id.to_string();
        if let Some(ContractError::AlreadyClaimed { owner, .. }) = err.contract_reason() {
            return ClaimOutcome::AlreadyClaimed {
                booster_id,
                owner: Some(*owner),
            };
        }
        match err {
            TcgError::PreflightEstimation { reason, .. } => ClaimOutcome::EstimationFailed {
                booster_id,
                reason: reason.to_string(),
            },
            TcgError::OperationRejected { reason, .. } => ClaimOutcome::Rejected {
                booster_id,
                reason: reason.to_string(),
            },
            other => ClaimOutcome::Failed {
                booster_id,
                message: other.to_string(),
            },
        }
    }
}

pub struct ClaimCoordinator<'a> {
    client: &'a VaultClient,
}

impl<'a> ClaimCoordinator<'a> {
    pub fn new(client: &'a VaultClient) -> Self {
        Self { client }
    }

    /// Run the whole claim protocol for the client's signer.
    ///
    /// Never panics or returns an error: every failure becomes a
    /// [`ClaimOutcome`].
    pub fn claim(&self, booster_id: &str) -> ClaimOutcome {
        // Advisory only: another claim may still be ordered ahead of ours.
        match self.client.boosters().get_booster_details(booster_id) {
            Ok(details) if !details.owner.is_zero() => {
                info!(booster_id, owner = %details.owner, "booster already claimed");
                return ClaimOutcome::AlreadyClaimed {
                    booster_id: booster_id.to_string(),
                    owner: Some(details.owner),
                };
            }
            Ok(_) => {}
            Err(e) => warn!(booster_id, error = %e, "pre-claim read failed"),
        }

        match self.submit_claim(booster_id) {
            Ok(pending) => pending.finish(),
            Err(outcome) => outcome,
        }
    }

    /// Preflight and submit a claim without awaiting it.
    ///
    /// Several claims may be in flight at once; their order of submission is
    /// their order of execution.
    pub fn submit_claim(&self, booster_id: &str) -> Result<PendingClaim<'a>, ClaimOutcome> {
        let signer = self.client.signer().ok_or_else(|| {
            ClaimOutcome::from_error(booster_id, &TcgError::MissingSigner)
        })?;
        let tx = self
            .client
            .submit(Operation::ClaimBooster {
                booster_id: booster_id.to_string(),
            })
            .map_err(|e| {
                warn!(booster_id, error = %e, "claim not submitted");
                ClaimOutcome::from_error(booster_id, &e)
            })?;
        Ok(PendingClaim {
            client: self.client,
            booster_id: booster_id.to_string(),
            signer,
            tx,
        })
    }
}

/// A submitted claim awaiting finalization.
pub struct PendingClaim<'a> {
    client: &'a VaultClient,
    booster_id: BoosterId,
    signer: Address,
    tx: PendingTx<'a>,
}

impl PendingClaim<'_> {
    pub fn sequence(&self) -> u64 {
        self.tx.sequence()
    }

    pub fn booster_id(&self) -> &str {
        &self.booster_id
    }

    /// Await finalization, check the success flag, then re-read the booster.
    pub fn finish(self) -> ClaimOutcome {
        let receipt = match self.tx.wait() {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(booster_id = %self.booster_id, error = %e, "claim not confirmed");
                return ClaimOutcome::from_error(&self.booster_id, &e);
            }
        };
        if let Err(e) = receipt.successful() {
            warn!(booster_id = %self.booster_id, error = %e, "claim rejected");
            return ClaimOutcome::from_error(&self.booster_id, &e);
        }

        match self.client.boosters().booster(&self.booster_id) {
            Ok(Some(booster)) if booster.owner() == Some(self.signer) => {
                info!(booster_id = %self.booster_id, owner = %self.signer, "booster claimed");
                ClaimOutcome::Claimed(booster)
            }
            Ok(Some(booster)) => ClaimOutcome::Failed {
                booster_id: self.booster_id,
                message: format!(
                    "claim finalized but the ledger reports owner {:?}",
                    booster.owner()
                ),
            },
            Ok(None) => ClaimOutcome::Failed {
                booster_id: self.booster_id,
                message: "booster has no card payload after the claim".to_string(),
            },
            Err(e) => ClaimOutcome::Failed {
                booster_id: self.booster_id,
                message: e.to_string(),
            },
        }
    }
}
