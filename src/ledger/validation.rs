// Transaction validation - conservation, signatures, sufficient funds

use crate::identity::PublicKey;
use crate::ledger::{ConservationRule, Ledger};
use crate::tx::{Transaction, TransactionId};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a transaction was rejected.
///
/// Rejections are expected outcomes for untrusted input, not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Outputs total {outputs} exceeds inputs total {inputs}")]
    AmountsExceedInputs { inputs: u128, outputs: u128 },

    #[error("Outputs total {outputs} does not match inputs total {inputs}")]
    BurnNotAllowed { inputs: u128, outputs: u128 },

    #[error("Inputs total {0} is beyond any representable balance")]
    AmountOutOfRange(u128),

    #[error("Input {index} is not signed over this output list by its sender")]
    InvalidSignature { index: usize },

    #[error("Insufficient funds in {account}: available {available}, required {required}")]
    InsufficientFunds {
        account: PublicKey,
        available: i64,
        required: i64,
    },

    #[error("Crediting {account} would overflow its balance")]
    CreditOverflow { account: PublicKey },
}

/// Misuse of the ledger API, as opposed to a rejected transaction
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Transaction rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Validation is stale: checked at version {validated_at}, ledger is at {current}")]
    StaleValidation { validated_at: u64, current: u64 },

    #[error("Validation was performed against a different ledger")]
    ForeignValidation,

    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

/// Proof that a transaction passed validation against a specific ledger
/// state. Only `Ledger::validate` creates one, and `Ledger::apply` consumes it.
#[derive(Debug)]
pub struct ValidatedTransaction<'t> {
    tx: &'t Transaction,
    instance: u64,
    validated_at: u64,
}

impl<'t> ValidatedTransaction<'t> {
    pub fn transaction(&self) -> &'t Transaction {
        self.tx
    }

    /// Ledger version the check ran against
    pub fn validated_at(&self) -> u64 {
        self.validated_at
    }
}

impl Ledger {
    /// Run every check against the current balances.
    ///
    /// Checks run in order (amounts, signatures, funds, credit headroom) and
    /// the first failure is reported. Nothing is mutated.
    pub fn validate<'t>(&self, tx: &'t Transaction) -> Result<ValidatedTransaction<'t>, Rejection> {
        self.check(tx).map_err(|rejection| {
            debug!(%rejection, "transaction rejected");
            rejection
        })?;

        Ok(ValidatedTransaction {
            tx,
            instance: self.instance(),
            validated_at: self.version(),
        })
    }

    fn check(&self, tx: &Transaction) -> Result<(), Rejection> {
        let inputs = tx.inputs().total_amount();
        let outputs = tx.outputs().total_amount();

        if outputs > inputs {
            return Err(Rejection::AmountsExceedInputs { inputs, outputs });
        }
        if self.config().conservation == ConservationRule::Exact && outputs != inputs {
            return Err(Rejection::BurnNotAllowed { inputs, outputs });
        }

        if let Some(index) = tx.inputs().first_invalid_signature(tx.outputs()) {
            return Err(Rejection::InvalidSignature { index });
        }

        // Keeps the aggregate below from saturating
        if inputs > i64::MAX as u128 {
            return Err(Rejection::AmountOutOfRange(inputs));
        }

        if let Some((account, available, required)) = self.first_shortfall(&tx.inputs().aggregate()) {
            return Err(Rejection::InsufficientFunds {
                account,
                available,
                required,
            });
        }

        if let Some(account) = self.first_credit_overflow(tx) {
            return Err(Rejection::CreditOverflow { account });
        }

        Ok(())
    }

    /// Boolean form of `validate`
    pub fn validate_transaction(&self, tx: &Transaction) -> bool {
        self.validate(tx).is_ok()
    }

    /// Apply a transaction validated against this exact ledger state
    pub fn apply(&mut self, validated: ValidatedTransaction<'_>) -> Result<TransactionId, LedgerError> {
        if validated.instance != self.instance() {
            warn!("validation token belongs to another ledger");
            return Err(LedgerError::ForeignValidation);
        }
        if validated.validated_at != self.version() {
            warn!(
                validated_at = validated.validated_at,
                current = self.version(),
                "stale validation token"
            );
            return Err(LedgerError::StaleValidation {
                validated_at: validated.validated_at,
                current: self.version(),
            });
        }

        self.apply_transaction(validated.tx);
        Ok(validated.tx.id())
    }

    /// Validate and apply in one step
    pub fn try_apply(&mut self, tx: &Transaction) -> Result<TransactionId, LedgerError> {
        let validated = self.validate(tx)?;
        self.apply(validated)
    }
}
