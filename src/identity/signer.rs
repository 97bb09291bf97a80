use crate::identity::{Keypair, PublicKey, WalletError};
use ed25519_dalek::{Signature as DalekSignature, Signer as DalekSigner, Verifier};
use thiserror::Error;

/// Length in bytes of an Ed25519 signature
pub const SIGNATURE_LENGTH: usize = 64;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid signature length: expected 64, got {0}")]
    InvalidLength(usize),
}

/// Ed25519 signature (64 bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: DalekSignature,
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// Get the raw bytes of the signature
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the signature out as an owned byte vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Create a signature from raw bytes
    ///
    /// Only the length is checked here; whether the bytes form a valid
    /// signature is decided by verification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes_array: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidLength(bytes.len()))?;

        let inner = DalekSignature::from_bytes(&bytes_array);
        Ok(Self {
            inner,
            bytes: bytes_array,
        })
    }

    fn from_inner(inner: DalekSignature) -> Self {
        let bytes = inner.to_bytes();
        Self { inner, bytes }
    }
}

/// Signing and verification primitives
pub struct Signer;

impl Signer {
    /// Sign a message with a keypair
    pub fn sign(keypair: &Keypair, message: &[u8]) -> Signature {
        let sig = keypair.signing_key().sign(message);
        Signature::from_inner(sig)
    }

    /// Verify a signature against a public key and message
    pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        public_key.inner().verify(message, &signature.inner).is_ok()
    }

    /// Verify untrusted signature bytes
    ///
    /// Malformed bytes verify as false.
    pub fn verify_bytes(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_bytes(signature) {
            Ok(sig) => Self::verify(public_key, message, &sig),
            Err(_) => false,
        }
    }
}

/// Capability to sign a message with a key held under a name.
///
/// The ledger never holds private keys; whoever builds transactions supplies
/// an implementation of this trait.
pub trait MessageSigner {
    fn sign_message(&self, message: &[u8], key_name: &str) -> Result<Vec<u8>, WalletError>;
}

impl<T: MessageSigner + ?Sized> MessageSigner for &T {
    fn sign_message(&self, message: &[u8], key_name: &str) -> Result<Vec<u8>, WalletError> {
        (**self).sign_message(message, key_name)
    }
}
