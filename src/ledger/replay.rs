// Replay - rebuild ledger state from a seed and an append-only log

use crate::ledger::{Ledger, Rejection};
use crate::tx::{Transaction, TransactionId};
use tracing::{debug, warn};

/// Result of replaying a transaction log
#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    /// State after every valid entry was applied
    pub ledger: Ledger,
    /// IDs of applied entries, in log order
    pub applied: Vec<TransactionId>,
    /// (log position, reason) for every skipped entry
    pub rejected: Vec<(usize, Rejection)>,
}

impl ReplayOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Ledger {
    /// Apply `log` in order on top of `seed`.
    ///
    /// Each entry is validated against the state left by the entries before
    /// it; invalid entries are skipped and reported, never partially applied.
    pub fn replay<'a, I>(seed: Ledger, log: I) -> ReplayOutcome
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut ledger = seed;
        let mut applied = Vec::new();
        let mut rejected = Vec::new();

        for (position, tx) in log.into_iter().enumerate() {
            match ledger.validate(tx) {
                Ok(_) => {
                    ledger.apply_transaction(tx);
                    applied.push(tx.id());
                }
                Err(rejection) => {
                    warn!(position, %rejection, "skipping log entry");
                    rejected.push((position, rejection));
                }
            }
        }

        debug!(
            applied = applied.len(),
            rejected = rejected.len(),
            "replay finished"
        );

        ReplayOutcome {
            ledger,
            applied,
            rejected,
        }
    }
}
