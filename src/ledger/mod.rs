// Ledger module - account balances, validation and settlement

mod balance;
mod config;
mod replay;
mod report;
mod shared;
mod validation;

pub use balance::Ledger;
pub use config::{ConservationRule, LedgerConfig};
pub use replay::ReplayOutcome;
pub use report::BalanceReport;
pub use shared::SharedLedger;
pub use validation::{LedgerError, Rejection, ValidatedTransaction};
