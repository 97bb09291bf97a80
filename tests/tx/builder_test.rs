use keyledger::identity::{MessageSigner, Wallet, WalletError};
use keyledger::tx::{TransactionBuilder, TxError};
use std::cell::RefCell;

/// Signer that records which key names it was asked for
struct RecordingSigner {
    wallet: Wallet,
    requests: RefCell<Vec<String>>,
}

impl MessageSigner for RecordingSigner {
    fn sign_message(&self, message: &[u8], key_name: &str) -> Result<Vec<u8>, WalletError> {
        self.requests.borrow_mut().push(key_name.to_string());
        self.wallet.sign_message(message, key_name)
    }
}

#[test]
fn test_build_signs_every_input() {
    let wallet = Wallet::generate(&["B2", "C2", "D1", "C3"]).unwrap();

    let tx = TransactionBuilder::new()
        .input(wallet.public_key("B2").unwrap(), 10, "B2")
        .input(wallet.public_key("C2").unwrap(), 10, "C2")
        .output(wallet.public_key("D1").unwrap(), 15)
        .output(wallet.public_key("C3").unwrap(), 5)
        .build(&wallet)
        .unwrap();

    assert_eq!(tx.inputs().len(), 2);
    assert_eq!(tx.outputs().len(), 2);
    assert!(tx.is_signature_valid());
}

#[test]
fn test_outputs_added_after_inputs_are_still_signed() {
    let wallet = Wallet::generate(&["A1", "B1"]).unwrap();

    let tx = TransactionBuilder::new()
        .input(wallet.public_key("A1").unwrap(), 5, "A1")
        .output(wallet.public_key("B1").unwrap(), 2)
        .output(wallet.public_key("B1").unwrap(), 3)
        .build(&wallet)
        .unwrap();

    assert!(tx.is_signature_valid());
}

#[test]
fn test_build_without_inputs_fails() {
    let wallet = Wallet::generate(&["A1"]).unwrap();

    let result = TransactionBuilder::new()
        .output(wallet.public_key("A1").unwrap(), 1)
        .build(&wallet);

    assert!(matches!(result, Err(TxError::NoInputs)));
}

#[test]
fn test_unknown_key_name_fails() {
    let wallet = Wallet::generate(&["A1"]).unwrap();

    let result = TransactionBuilder::new()
        .input(wallet.public_key("A1").unwrap(), 1, "missing")
        .build(&wallet);

    assert!(matches!(
        result,
        Err(TxError::Signing(WalletError::UnknownKey(name))) if name == "missing"
    ));
}

#[test]
fn test_signer_asked_once_per_input_in_order() {
    let signer = RecordingSigner {
        wallet: Wallet::generate(&["A1", "B1", "C1"]).unwrap(),
        requests: RefCell::new(Vec::new()),
    };
    let key = |name: &str| signer.wallet.public_key(name).unwrap();

    let tx = TransactionBuilder::new()
        .input(key("B1"), 1, "B1")
        .input(key("A1"), 1, "A1")
        .output(key("C1"), 2)
        .build(&signer)
        .unwrap();

    assert_eq!(*signer.requests.borrow(), vec!["B1", "A1"]);
    assert!(tx.is_signature_valid());
}
