// Key directory - maps human-readable key names to account keys
// Used for reporting only; ledger correctness never depends on names.

use crate::identity::{PublicKey, Wallet};
use std::collections::HashMap;

/// Resolve an account key to a display name
pub trait NameResolver {
    fn resolve(&self, key: &PublicKey) -> Option<String>;

    /// Resolved name, or the base58 key when the key is unknown
    fn display_name(&self, key: &PublicKey) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_base58())
    }
}

/// Bidirectional name <-> key map
#[derive(Clone, Debug, Default)]
pub struct KeyDirectory {
    by_name: HashMap<String, PublicKey>,
    by_key: HashMap<PublicKey, String>,
}

impl KeyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory of every key in a wallet
    pub fn from_wallet(wallet: &Wallet) -> Self {
        let mut directory = Self::new();
        for (name, key) in wallet.public_keys() {
            directory.insert(name, key);
        }
        directory
    }

    /// Register a name for a key, replacing earlier entries for either side
    pub fn insert(&mut self, name: &str, key: PublicKey) {
        if let Some(old_key) = self.by_name.remove(name) {
            self.by_key.remove(&old_key);
        }
        if let Some(old_name) = self.by_key.remove(&key) {
            self.by_name.remove(&old_name);
        }
        self.by_name.insert(name.to_string(), key.clone());
        self.by_key.insert(key, name.to_string());
    }

    /// Fold another directory into this one
    pub fn merge(&mut self, other: &KeyDirectory) {
        for (name, key) in &other.by_name {
            self.insert(name, key.clone());
        }
    }

    pub fn public_key(&self, name: &str) -> Option<&PublicKey> {
        self.by_name.get(name)
    }

    pub fn name(&self, key: &PublicKey) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl NameResolver for KeyDirectory {
    fn resolve(&self, key: &PublicKey) -> Option<String> {
        self.name(key).map(str::to_string)
    }
}
