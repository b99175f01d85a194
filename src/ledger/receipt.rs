use serde::{Deserialize, Serialize};

use super::contract::ContractError;
use super::operation::Outcome;
use crate::error::{Result, TcgError};
use crate::models::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TxStatus {
    Success,
    Reverted,
}

/// The finalized result of one submitted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Global execution order of the operation.
    pub sequence: u64,
    /// Height of the block that finalized the operation.
    pub block: u64,
    pub sender: Address,
    pub method: String,
    pub status: TxStatus,
    pub outcome: Option<Outcome>,
    pub revert: Option<ContractError>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.status == TxStatus::Success
    }

    /// Turn the receipt into the operation's outcome, treating anything but
    /// a success status as a rejection.
    pub fn successful(self) -> Result<Outcome> {
        match (self.status, self.outcome, self.revert) {
            (TxStatus::Success, Some(outcome), _) => Ok(outcome),
            (_, _, Some(reason)) => Err(TcgError::OperationRejected {
                method: self.method,
                reason,
            }),
            _ => Err(TcgError::OperationUnconfirmed {
                sequence: self.sequence,
            }),
        }
    }
}
