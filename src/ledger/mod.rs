//! In-process, consensus-ordered ledger hosting the [`VaultContract`].
//!
//! Submitting an operation only places it in the pending pool and assigns
//! its sequence number, which is its position in the global execution order.
//! Nothing is observable until a block is produced: [`PendingTx::wait`]
//! finalizes every pending operation in sequence order and returns the
//! receipt of the awaited one. Submitted operations cannot be withdrawn by
//! their sender.

pub mod contract;
pub mod operation;
pub mod receipt;

pub use contract::{ContractError, VaultContract};
pub use operation::{Operation, Outcome};
pub use receipt::{Receipt, TxStatus};

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, TcgError};
use crate::models::Address;

struct PendingEntry {
    sequence: u64,
    sender: Address,
    operation: Operation,
}

struct LedgerState {
    contract: VaultContract,
    pending: VecDeque<PendingEntry>,
    receipts: HashMap<u64, Receipt>,
    next_sequence: u64,
    height: u64,
}

impl LedgerState {
    /// Execute every pending operation in sequence order as one block.
    fn produce_block(&mut self) -> usize {
        self.height += 1;
        let block = self.height;
        let mut executed = 0;

        while let Some(entry) = self.pending.pop_front() {
            let method = entry.operation.method();
            let receipt = match self.contract.execute(entry.sender, &entry.operation) {
                Ok(outcome) => Receipt {
                    sequence: entry.sequence,
                    block,
                    sender: entry.sender,
                    method: method.to_string(),
                    status: TxStatus::Success,
                    outcome: Some(outcome),
                    revert: None,
                },
                Err(reason) => {
                    debug!(sequence = entry.sequence, method, %reason, "operation reverted");
                    Receipt {
                        sequence: entry.sequence,
                        block,
                        sender: entry.sender,
                        method: method.to_string(),
                        status: TxStatus::Reverted,
                        outcome: None,
                        revert: Some(reason),
                    }
                }
            };
            self.receipts.insert(entry.sequence, receipt);
            executed += 1;
        }

        debug!(block, executed, "block finalized");
        executed
    }
}

pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Deploy a fresh vault contract administered by `admin`.
    pub fn deploy(admin: Address, booster_card_count: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LedgerState {
                contract: VaultContract::new(admin, booster_card_count),
                pending: VecDeque::new(),
                receipts: HashMap::new(),
                next_sequence: 0,
                height: 0,
            }),
        })
    }

    /// Place an operation in the pending pool.
    pub fn submit(&self, sender: Address, operation: Operation) -> PendingTx<'_> {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        let method = operation.method();
        debug!(sequence, method, %sender, "operation submitted");
        state.pending.push_back(PendingEntry {
            sequence,
            sender,
            operation,
        });
        PendingTx {
            ledger: self,
            sequence,
            method,
        }
    }

    /// Simulate an operation against a snapshot of the finalized state.
    ///
    /// Pending operations are not applied to the snapshot, so a successful
    /// estimate says nothing about how the operation will fare once ordered.
    pub fn estimate(
        &self,
        sender: Address,
        operation: &Operation,
    ) -> std::result::Result<Outcome, ContractError> {
        let mut snapshot = self.state.lock().contract.clone();
        snapshot.execute(sender, operation)
    }

    /// Finalize all pending operations now. Returns how many were executed.
    pub fn finalize(&self) -> usize {
        self.state.lock().produce_block()
    }

    /// Drop a still-pending operation from the pool. It will never execute.
    pub fn evict(&self, sequence: u64) -> bool {
        let mut state = self.state.lock();
        let before = state.pending.len();
        state.pending.retain(|e| e.sequence != sequence);
        let evicted = state.pending.len() != before;
        if evicted {
            warn!(sequence, "pending operation evicted");
        }
        evicted
    }

    pub fn receipt(&self, sequence: u64) -> Option<Receipt> {
        self.state.lock().receipts.get(&sequence).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn height(&self) -> u64 {
        self.state.lock().height
    }

    /// Run a read-only query against finalized contract state.
    pub fn view<T>(&self, query: impl FnOnce(&VaultContract) -> T) -> T {
        let state = self.state.lock();
        query(&state.contract)
    }

    fn await_receipt(&self, sequence: u64) -> Result<Receipt> {
        let mut state = self.state.lock();
        if !state.receipts.contains_key(&sequence)
            && state.pending.iter().any(|e| e.sequence == sequence)
        {
            state.produce_block();
        }
        state
            .receipts
            .get(&sequence)
            .cloned()
            .ok_or(TcgError::OperationUnconfirmed { sequence })
    }
}

/// Handle to a submitted, not yet awaited operation.
pub struct PendingTx<'a> {
    ledger: &'a Ledger,
    sequence: u64,
    method: &'static str,
}

impl PendingTx<'_> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Block until the operation is finalized and return its receipt.
    ///
    /// The receipt may report a revert; callers must check its status.
    pub fn wait(self) -> Result<Receipt> {
        self.ledger.await_receipt(self.sequence)
    }
}
