// Shared ledger - serialises validate + apply for concurrent callers

use crate::identity::PublicKey;
use crate::ledger::{Ledger, LedgerError};
use crate::tx::{Transaction, TransactionId};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Thread-safe handle to a single ledger.
///
/// `submit` validates and applies under one lock acquisition, so two
/// transactions can never both be checked against the same pre-debit
/// balance. Clones share the same ledger.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>, LedgerError> {
        self.inner.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Validate and apply atomically
    pub fn submit(&self, tx: &Transaction) -> Result<TransactionId, LedgerError> {
        let mut ledger = self.lock()?;
        let id = ledger.try_apply(tx)?;
        info!(tx = %id, version = ledger.version(), "transaction settled");
        Ok(id)
    }

    /// Check a transaction against the current state without applying it
    pub fn validate_transaction(&self, tx: &Transaction) -> Result<bool, LedgerError> {
        Ok(self.lock()?.validate_transaction(tx))
    }

    pub fn balance(&self, key: &PublicKey) -> Result<i64, LedgerError> {
        Ok(self.lock()?.balance(key))
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Result<Ledger, LedgerError> {
        Ok(self.lock()?.clone())
    }

    /// Run `f` with exclusive access to the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> Result<R, LedgerError> {
        let mut ledger = self.lock()?;
        Ok(f(&mut ledger))
    }
}
