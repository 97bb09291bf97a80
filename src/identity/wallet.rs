use crate::identity::{Keypair, MessageSigner, PublicKey, Signer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("Duplicate key name: {0}")]
    DuplicateKey(String),
}

/// In-memory collection of named keypairs.
///
/// Names keep the order they were added in.
#[derive(Clone, Debug, Default)]
pub struct Wallet {
    keys: Vec<(String, Keypair)>,
}

impl Wallet {
    /// Create an empty wallet
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh keypair for every name
    pub fn generate<S: AsRef<str>>(names: &[S]) -> Result<Self, WalletError> {
        let mut wallet = Self::new();
        for name in names {
            wallet.add(name.as_ref(), Keypair::generate())?;
        }
        Ok(wallet)
    }

    /// Add a keypair under a name
    pub fn add(&mut self, name: &str, keypair: Keypair) -> Result<(), WalletError> {
        if self.keypair(name).is_some() {
            return Err(WalletError::DuplicateKey(name.to_string()));
        }
        self.keys.push((name.to_string(), keypair));
        Ok(())
    }

    /// Look up a keypair by name
    pub fn keypair(&self, name: &str) -> Option<&Keypair> {
        self.keys.iter().find(|(n, _)| n == name).map(|(_, kp)| kp)
    }

    /// Public key for a name
    pub fn public_key(&self, name: &str) -> Result<PublicKey, WalletError> {
        self.keypair(name)
            .map(Keypair::public_key)
            .ok_or_else(|| WalletError::UnknownKey(name.to_string()))
    }

    /// Key names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|(n, _)| n.as_str())
    }

    /// (name, public key) pairs in insertion order
    pub fn public_keys(&self) -> impl Iterator<Item = (&str, PublicKey)> + '_ {
        self.keys.iter().map(|(n, kp)| (n.as_str(), kp.public_key()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl MessageSigner for Wallet {
    fn sign_message(&self, message: &[u8], key_name: &str) -> Result<Vec<u8>, WalletError> {
        let keypair = self
            .keypair(key_name)
            .ok_or_else(|| WalletError::UnknownKey(key_name.to_string()))?;
        Ok(Signer::sign(keypair, message).to_vec())
    }
}
