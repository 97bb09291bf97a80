// Shared ledger tests
// Concurrent submission must never over-spend an account

use keyledger::identity::Wallet;
use keyledger::ledger::{Ledger, LedgerError, Rejection, SharedLedger};
use keyledger::tx::TransactionBuilder;
use std::sync::Arc;
use std::thread;

#[test]
fn test_submit_applies_valid_transaction() {
    let wallet = Wallet::generate(&["A1", "B1"]).unwrap();
    let a1 = wallet.public_key("A1").unwrap();
    let b1 = wallet.public_key("B1").unwrap();
    let shared = SharedLedger::new(Ledger::from_seed([(a1.clone(), 10)]));

    let tx = TransactionBuilder::new()
        .input(a1.clone(), 4, "A1")
        .output(b1.clone(), 4)
        .build(&wallet)
        .unwrap();

    assert!(shared.validate_transaction(&tx).unwrap());
    assert_eq!(shared.submit(&tx).unwrap(), tx.id());
    assert_eq!(shared.balance(&a1).unwrap(), 6);
    assert_eq!(shared.balance(&b1).unwrap(), 4);
}

#[test]
fn test_submit_reports_rejection() {
    let wallet = Wallet::generate(&["A1", "B1"]).unwrap();
    let a1 = wallet.public_key("A1").unwrap();
    let shared = SharedLedger::new(Ledger::new());

    let tx = TransactionBuilder::new()
        .input(a1, 1, "A1")
        .output(wallet.public_key("B1").unwrap(), 1)
        .build(&wallet)
        .unwrap();

    assert!(matches!(
        shared.submit(&tx),
        Err(LedgerError::Rejected(Rejection::InsufficientFunds { .. }))
    ));
}

#[test]
fn test_clones_share_state() {
    let wallet = Wallet::generate(&["A1"]).unwrap();
    let a1 = wallet.public_key("A1").unwrap();
    let shared = SharedLedger::default();
    let other = shared.clone();

    shared.with_ledger(|ledger| ledger.add_account(&a1, 3)).unwrap();

    assert_eq!(other.balance(&a1).unwrap(), 3);
    assert_eq!(other.snapshot().unwrap().len(), 1);
}

/// Many threads race to spend the same 10 units; exactly one wins
#[test]
fn test_concurrent_double_spend_settles_once() {
    let wallet = Wallet::generate(&["A1", "B1", "C1", "D1", "E1"]).unwrap();
    let a1 = wallet.public_key("A1").unwrap();
    let shared = SharedLedger::new(Ledger::from_seed([(a1.clone(), 10)]));

    let transactions: Vec<_> = ["B1", "C1", "D1", "E1"]
        .iter()
        .map(|name| {
            TransactionBuilder::new()
                .input(a1.clone(), 10, "A1")
                .output(wallet.public_key(name).unwrap(), 10)
                .build(&wallet)
                .unwrap()
        })
        .collect();
    let transactions = Arc::new(transactions);

    let handles: Vec<_> = (0..transactions.len())
        .map(|i| {
            let shared = shared.clone();
            let transactions = Arc::clone(&transactions);
            thread::spawn(move || shared.submit(&transactions[i]).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    let snapshot = shared.snapshot().unwrap();
    assert_eq!(successes, 1);
    assert_eq!(snapshot.balance(&a1), 0);
    assert_eq!(snapshot.total_supply(), 10);
}
