// Account balances - the authoritative key -> balance mapping

use crate::identity::PublicKey;
use crate::ledger::LedgerConfig;
use crate::tx::{InputList, OutputList, Transaction};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// Account balances keyed by public key.
///
/// Accounts are enumerated in the order they were first added and are never
/// removed. Reading an unknown account yields 0 without creating it.
///
/// Only the validated paths (`validate` / `apply`) guarantee non-negative
/// balances. The administrative setters are unchecked.
#[derive(Debug)]
pub struct Ledger {
    balances: HashMap<PublicKey, i64>,
    /// Keys in first-insertion order; same key set as `balances`
    order: Vec<PublicKey>,
    /// Logical clock, bumped on every mutation
    version: u64,
    /// Distinguishes ledgers whose versions happen to coincide
    instance: u64,
    config: LedgerConfig,
}

impl Ledger {
    /// Create an empty ledger with the default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger with a configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            balances: HashMap::new(),
            order: Vec::new(),
            version: 0,
            instance: next_instance(),
            config,
        }
    }

    /// Create a ledger pre-populated from a seed.
    ///
    /// The seed is not validated. Its iteration order becomes the account
    /// order; a repeated key keeps its first position and its last amount.
    pub fn from_seed<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = (PublicKey, i64)>,
    {
        let mut ledger = Self::new();
        for (key, amount) in seed {
            ledger.add_account(&key, amount);
        }
        ledger
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: LedgerConfig) {
        self.config = config;
        self.version += 1;
    }

    /// Current logical version
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn instance(&self) -> u64 {
        self.instance
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Balance of `key`, or 0 if the account does not exist
    pub fn balance(&self, key: &PublicKey) -> i64 {
        self.balances.get(key).copied().unwrap_or(0)
    }

    pub fn has_account(&self, key: &PublicKey) -> bool {
        self.balances.contains_key(key)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Account keys in first-insertion order
    pub fn keys(&self) -> &[PublicKey] {
        &self.order
    }

    /// (key, balance) pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&PublicKey, i64)> + '_ {
        self.order.iter().map(move |key| (key, self.balance(key)))
    }

    /// Owned snapshot of `iter()`
    pub fn enumerate(&self) -> Vec<(PublicKey, i64)> {
        self.iter().map(|(key, amount)| (key.clone(), amount)).collect()
    }

    /// Sum of all balances
    pub fn total_supply(&self) -> i128 {
        self.balances.values().map(|&b| b as i128).sum()
    }

    // ========================================================================
    // ADMINISTRATIVE MUTATION (unchecked)
    // ========================================================================

    /// Insert an account, overwriting any existing balance
    pub fn add_account(&mut self, key: &PublicKey, amount: i64) {
        self.set_balance(key, amount);
    }

    /// Set a balance unconditionally; it may be negative
    pub fn set_balance(&mut self, key: &PublicKey, amount: i64) {
        match self.balances.get_mut(key) {
            Some(balance) => *balance = amount,
            None => {
                self.balances.insert(key.clone(), amount);
                self.order.push(key.clone());
            }
        }
        self.version += 1;
    }

    /// Add `amount`, creating the account at 0 first if needed
    pub fn increment(&mut self, key: &PublicKey, amount: u64) {
        let updated = self.balance(key).saturating_add_unsigned(amount);
        self.set_balance(key, updated);
    }

    /// Subtract `amount` with no underflow guard
    pub fn decrement(&mut self, key: &PublicKey, amount: u64) {
        let updated = self.balance(key).saturating_sub_unsigned(amount);
        self.set_balance(key, updated);
    }

    // ========================================================================
    // DEDUCTIBILITY
    // ========================================================================

    /// True if `key` holds at least `amount`
    pub fn can_deduct(&self, key: &PublicKey, amount: u64) -> bool {
        self.balance(key) as i128 >= amount as i128
    }

    /// True if every balance in `claims` is covered by this ledger
    pub fn can_deduct_all(&self, claims: &Ledger) -> bool {
        self.first_shortfall(claims).is_none()
    }

    /// True if the aggregate of `inputs` is covered by this ledger
    pub fn can_deduct_inputs(&self, inputs: &InputList) -> bool {
        inputs.claims().iter().all(|(key, required)| {
            i128::try_from(*required).is_ok_and(|required| self.balance(key) as i128 >= required)
        })
    }

    /// First account in `claims` (in its insertion order) this ledger cannot
    /// cover, as (key, available, required)
    pub fn first_shortfall(&self, claims: &Ledger) -> Option<(PublicKey, i64, i64)> {
        claims
            .iter()
            .find(|(key, required)| self.balance(key) < *required)
            .map(|(key, required)| (key.clone(), self.balance(key), required))
    }

    // ========================================================================
    // APPLYING TRANSACTIONS
    // ========================================================================

    /// Debit every input.
    ///
    /// No bounds check: the caller must already know the inputs are
    /// deductible, otherwise balances go negative.
    pub fn apply_inputs(&mut self, inputs: &InputList) {
        for input in inputs {
            self.decrement(input.sender(), input.amount());
        }
    }

    /// Credit every output, creating unseen accounts
    pub fn apply_outputs(&mut self, outputs: &OutputList) {
        for output in outputs {
            self.increment(output.recipient(), output.amount());
        }
    }

    /// First output recipient whose balance would pass `i64::MAX` once
    /// `tx` is applied, debits included
    pub fn first_credit_overflow(&self, tx: &Transaction) -> Option<PublicKey> {
        let debits = tx.inputs().claims();
        let mut credited: Vec<(&PublicKey, i128)> = Vec::new();

        for output in tx.outputs() {
            let amount = output.amount() as i128;
            match credited.iter_mut().find(|(key, _)| *key == output.recipient()) {
                Some((_, balance)) => *balance += amount,
                None => {
                    let debit = debits
                        .iter()
                        .find(|(key, _)| key == output.recipient())
                        .map_or(0, |(_, debit)| *debit as i128);
                    let start = self.balance(output.recipient()) as i128 - debit;
                    credited.push((output.recipient(), start + amount));
                }
            }
        }

        credited
            .into_iter()
            .find(|(_, balance)| *balance > i64::MAX as i128)
            .map(|(key, _)| key.clone())
    }

    /// Debit all inputs, then credit all outputs.
    ///
    /// Trusts the caller: nothing is re-validated. Prefer `validate` +
    /// `apply`, or `try_apply`.
    pub fn apply_transaction(&mut self, tx: &Transaction) {
        self.apply_inputs(tx.inputs());
        self.apply_outputs(tx.outputs());
        // Even an empty transaction retires every outstanding token
        self.version += 1;
        debug!(
            inputs = tx.inputs().len(),
            outputs = tx.outputs().len(),
            version = self.version,
            "applied transaction"
        );
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

// A clone is a separate ledger: validation tokens do not carry over.
impl Clone for Ledger {
    fn clone(&self) -> Self {
        Self {
            balances: self.balances.clone(),
            order: self.order.clone(),
            version: self.version,
            instance: next_instance(),
            config: self.config.clone(),
        }
    }
}

impl PartialEq for Ledger {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.balances == other.balances
    }
}

impl Eq for Ledger {}
