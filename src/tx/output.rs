use crate::identity::PublicKey;
use serde::{Deserialize, Serialize};

/// A credit of `amount` to `recipient`.
///
/// Outputs are unsigned; they are trusted because every input signs over the
/// full output list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    recipient: PublicKey,
    amount: u64,
}

impl TxOutput {
    pub fn new(recipient: PublicKey, amount: u64) -> Self {
        Self { recipient, amount }
    }

    pub fn recipient(&self) -> &PublicKey {
        &self.recipient
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Ordered list of outputs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputList {
    outputs: Vec<TxOutput>,
}

impl OutputList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output
    pub fn push(&mut self, recipient: PublicKey, amount: u64) {
        self.outputs.push(TxOutput::new(recipient, amount));
    }

    /// Builder-style append
    pub fn with(mut self, recipient: PublicKey, amount: u64) -> Self {
        self.push(recipient, amount);
        self
    }

    /// Sum of all output amounts
    pub fn total_amount(&self) -> u128 {
        self.outputs.iter().map(|o| o.amount as u128).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TxOutput> {
        self.outputs.iter()
    }

    pub fn as_slice(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<TxOutput> for OutputList {
    fn from_iter<I: IntoIterator<Item = TxOutput>>(iter: I) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutputList {
    type Item = &'a TxOutput;
    type IntoIter = std::slice::Iter<'a, TxOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.outputs.iter()
    }
}
