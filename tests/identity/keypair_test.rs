use keyledger::identity::{Keypair, KeypairError, PublicKey};
use std::collections::HashMap;

/// Test: Each generated keypair addresses a different account
#[test]
fn test_keypairs_are_unique() {
    let keypair1 = Keypair::generate();
    let keypair2 = Keypair::generate();

    assert_ne!(
        keypair1.public_key(),
        keypair2.public_key(),
        "Two generated keypairs should have different public keys"
    );
}

/// Test: Restoring a keypair from its secret bytes keeps the account
#[test]
fn test_keypair_restore_keeps_account() {
    let original = Keypair::generate();

    let restored = Keypair::from_bytes(&original.to_bytes())
        .expect("Should restore keypair from bytes");

    assert_eq!(original.public_key(), restored.public_key());
}

/// Test: Decoded copies of a key find the same map entry
#[test]
fn test_public_key_works_as_map_key() {
    let key = Keypair::generate().public_key();
    let copy = PublicKey::from_bytes(key.as_bytes()).expect("Should decode key");

    let mut balances = HashMap::new();
    balances.insert(key, 20);

    assert_eq!(balances.get(&copy), Some(&20));
}

/// Test: Wrong-length key bytes report the length
#[test]
fn test_invalid_public_key_length() {
    let result = PublicKey::from_bytes(&[0u8; 16]);

    assert!(matches!(
        result,
        Err(KeypairError::InvalidLength { expected: 32, got: 16 })
    ));
}

/// Test: Wrong-length secret bytes fail
#[test]
fn test_invalid_keypair_bytes_fails() {
    assert!(Keypair::from_bytes(&[0u8; 10]).is_err());
}

/// Test: Display form parses back to the same key
#[test]
fn test_base58_display_roundtrip() {
    let key = Keypair::generate().public_key();
    let shown = key.to_string();

    assert_eq!(PublicKey::from_base58(&shown).unwrap(), key);
    assert!(PublicKey::from_base58("0OIl").is_err(), "Non-base58 text should fail");
}

/// Test: Keys serialize through serde as raw bytes
#[test]
fn test_public_key_serde() {
    let key = Keypair::generate().public_key();

    let json = serde_json::to_string(&key).unwrap();
    let restored: PublicKey = serde_json::from_str(&json).unwrap();

    assert_eq!(key, restored);
}
