// End-to-end walk-through with four wallets
// Alice (A1, A2), Bob (B1, B2), Carol (C1, C2, C3), David (D1)

use keyledger::identity::{KeyDirectory, PublicKey, Wallet};
use keyledger::ledger::Ledger;
use keyledger::tx::{InputList, OutputList, Transaction, TransactionBuilder, UnsignedInput};

struct World {
    alice: Wallet,
    bob: Wallet,
    carol: Wallet,
    directory: KeyDirectory,
}

impl World {
    fn new() -> Self {
        let alice = Wallet::generate(&["A1", "A2"]).unwrap();
        let bob = Wallet::generate(&["B1", "B2"]).unwrap();
        let carol = Wallet::generate(&["C1", "C2", "C3"]).unwrap();
        let david = Wallet::generate(&["D1"]).unwrap();

        let mut directory = KeyDirectory::new();
        for wallet in [&alice, &bob, &carol, &david] {
            directory.merge(&KeyDirectory::from_wallet(wallet));
        }

        Self {
            alice,
            bob,
            carol,
            directory,
        }
    }

    fn key(&self, name: &str) -> PublicKey {
        self.directory.public_key(name).cloned().unwrap()
    }

    /// Every key opened at 0, then A1=20, B1=15-5, C1=10
    fn seeded_ledger(&self) -> Ledger {
        let mut ledger = Ledger::new();
        for name in ["A1", "A2", "B1", "B2", "C1", "C2", "C3", "D1"] {
            ledger.add_account(&self.key(name), 0);
        }
        ledger.set_balance(&self.key("A1"), 20);
        ledger.increment(&self.key("B1"), 15);
        ledger.decrement(&self.key("B1"), 5);
        ledger.set_balance(&self.key("C1"), 10);
        ledger
    }
}

#[test]
fn test_full_walkthrough() {
    let w = World::new();
    let mut ledger = w.seeded_ledger();
    let placeholder = vec![0u8; 64];

    assert_eq!(
        ledger.report(&w.directory).lines(),
        vec![
            "The balance for A1 is 20",
            "The balance for A2 is 0",
            "The balance for B1 is 10",
            "The balance for B2 is 0",
            "The balance for C1 is 10",
            "The balance for C2 is 0",
            "The balance for C3 is 0",
            "The balance for D1 is 0",
        ]
    );

    // A1:15 + B1:5 is deductible; A1:15 + A1:15 is not
    let txil1 = InputList::new()
        .with(w.key("A1"), 15, placeholder.clone())
        .with(w.key("B1"), 5, placeholder.clone());
    let txil2 = InputList::new()
        .with(w.key("A1"), 15, placeholder.clone())
        .with(w.key("A1"), 15, placeholder.clone());
    assert!(ledger.can_deduct_inputs(&txil1));
    assert!(!ledger.can_deduct_inputs(&txil2));

    ledger.apply_inputs(&txil1);
    assert_eq!(ledger.balance(&w.key("A1")), 5);
    assert_eq!(ledger.balance(&w.key("B1")), 5);

    ledger.apply_outputs(&OutputList::new().with(w.key("A1"), 15).with(w.key("A1"), 15));
    assert_eq!(ledger.balance(&w.key("A1")), 35);

    // A1:30 signed over [B2:10, C1:20]
    let txol2 = OutputList::new().with(w.key("B2"), 10).with(w.key("C1"), 20);
    let signed = UnsignedInput::new(w.key("A1"), 30)
        .sign(&w.alice, "A1", &txol2)
        .unwrap();
    let txil3: InputList = std::iter::once(signed).collect();
    assert!(txil3.check_signatures(&txol2));

    let txil4 = InputList::new().with(w.key("A1"), 30, placeholder);
    assert!(!txil4.check_signatures(&txol2));

    // A1 spends 35: B2 10, C2 10, change 15 to A2
    let tx1 = TransactionBuilder::new()
        .input(w.key("A1"), 35, "A1")
        .output(w.key("B2"), 10)
        .output(w.key("C2"), 10)
        .output(w.key("A2"), 15)
        .build(&w.alice)
        .unwrap();
    assert!(tx1.is_amount_valid());
    assert!(ledger.validate_transaction(&tx1));

    let before = ledger.enumerate();
    ledger.try_apply(&tx1).unwrap();

    let expected_delta = |name: &str| match name {
        "A1" => -35,
        "B2" | "C2" => 10,
        "A2" => 15,
        _ => 0,
    };
    for (key, old) in before {
        let name = w.directory.name(&key).unwrap().to_string();
        assert_eq!(ledger.balance(&key), old + expected_delta(&name), "account {name}");
    }

    // B2:10 + C2:10 signed by different wallets: D1 15, C3 5
    let txol = OutputList::new().with(w.key("D1"), 15).with(w.key("C3"), 5);
    let mut inputs = InputList::new();
    inputs.push(UnsignedInput::new(w.key("B2"), 10).sign(&w.bob, "B2", &txol).unwrap());
    inputs.push(UnsignedInput::new(w.key("C2"), 10).sign(&w.carol, "C2", &txol).unwrap());
    let tx2 = Transaction::new(inputs, txol);

    assert!(ledger.validate_transaction(&tx2));
    ledger.try_apply(&tx2).unwrap();

    assert_eq!(
        ledger.report(&w.directory).lines(),
        vec![
            "The balance for A1 is 0",
            "The balance for A2 is 15",
            "The balance for B1 is 5",
            "The balance for B2 is 0",
            "The balance for C1 is 10",
            "The balance for C2 is 0",
            "The balance for C3 is 5",
            "The balance for D1 is 15",
        ]
    );
}

#[test]
fn test_wallet_cannot_sign_for_another_wallets_key() {
    let w = World::new();
    let ledger = w.seeded_ledger();

    // Bob's wallet has no A1 key
    let result = TransactionBuilder::new()
        .input(w.key("A1"), 5, "A1")
        .output(w.key("B1"), 5)
        .build(&w.bob);
    assert!(result.is_err());

    // Bob signs the A1 debit with his own B1 key
    let outputs = OutputList::new().with(w.key("B1"), 5);
    let forged = UnsignedInput::new(w.key("A1"), 5)
        .sign(&w.bob, "B1", &outputs)
        .unwrap();
    let tx = Transaction::new(std::iter::once(forged).collect(), outputs);

    assert!(!ledger.validate_transaction(&tx));
}
