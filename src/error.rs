use crate::ledger::ContractError;

#[derive(Debug, thiserror::Error)]
pub enum TcgError {
    #[error("Card source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Insufficient unique cards for {target}: wanted {wanted}, got {got}")]
    InsufficientUniqueCards {
        target: String,
        wanted: usize,
        got: usize,
    },

    #[error("Operation {method} rejected: {reason}")]
    OperationRejected {
        method: String,
        reason: ContractError,
    },

    #[error("Operation #{sequence} was never confirmed")]
    OperationUnconfirmed { sequence: u64 },

    #[error("Preflight estimation failed for {method}: {reason}")]
    PreflightEstimation {
        method: String,
        reason: ContractError,
    },

    #[error("No signer configured; the client is read-only")]
    MissingSigner,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TcgError {
    /// The structured contract reason behind this error, if the ledger gave one.
    pub fn contract_reason(&self) -> Option<&ContractError> {
        match self {
            TcgError::OperationRejected { reason, .. }
            | TcgError::PreflightEstimation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TcgError>;
