//! Account-based ledger for Ed25519-signed transactions.
//!
//! Transactions debit accounts through signed inputs and credit accounts
//! through outputs. A [`ledger::Ledger`] validates them (conservation,
//! signatures, sufficient funds) and applies valid ones in full.

pub mod identity;
pub mod ledger;
pub mod tx;
