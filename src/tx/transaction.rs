use crate::identity::NameResolver;
use crate::tx::{InputList, OutputList, SignatureVerifier};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Unique identifier for a transaction (SHA256 of its canonical bytes)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId([u8; 32]);

impl TransactionId {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// One atomic transfer: every input is debited and every output credited, or
/// nothing happens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    inputs: InputList,
    outputs: OutputList,
}

impl Transaction {
    pub fn new(inputs: InputList, outputs: OutputList) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &InputList {
        &self.inputs
    }

    pub fn outputs(&self) -> &OutputList {
        &self.outputs
    }

    /// Outputs may not credit more than the inputs debit
    pub fn is_amount_valid(&self) -> bool {
        self.outputs.total_amount() <= self.inputs.total_amount()
    }

    /// Every input is signed over this transaction's own output list
    pub fn is_signature_valid(&self) -> bool {
        self.inputs.check_signatures(&self.outputs)
    }

    /// Value debited but not credited anywhere
    pub fn burned_amount(&self) -> u128 {
        self.inputs
            .total_amount()
            .saturating_sub(self.outputs.total_amount())
    }

    /// Canonical bytes: each input's signing message followed by its
    /// length-prefixed signature
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            let message =
                SignatureVerifier::message_to_sign(input.sender(), input.amount(), &self.outputs);
            bytes.extend_from_slice(&message);
            bytes.extend_from_slice(&(input.signature().len() as u32).to_le_bytes());
            bytes.extend_from_slice(input.signature());
        }
        bytes
    }

    /// Compute the unique ID for this transaction
    pub fn id(&self) -> TransactionId {
        let hash = Sha256::digest(self.to_canonical_bytes());
        let mut id = [0u8; 32];
        id.copy_from_slice(&hash);
        TransactionId(id)
    }

    /// Human-readable lines, one per input and output
    pub fn describe(&self, names: &dyn NameResolver) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.inputs.len() + self.outputs.len());
        for input in &self.inputs {
            lines.push(format!(
                "Input: {} spends {}",
                names.display_name(input.sender()),
                input.amount()
            ));
        }
        for output in &self.outputs {
            lines.push(format!(
                "Output: {} receives {}",
                names.display_name(output.recipient()),
                output.amount()
            ));
        }
        lines
    }
}
