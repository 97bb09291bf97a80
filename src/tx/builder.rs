use crate::identity::{MessageSigner, PublicKey, WalletError};
use crate::tx::{InputList, OutputList, Transaction, UnsignedInput};
use thiserror::Error;

/// Errors that can occur when building a transaction
#[derive(Error, Debug)]
pub enum TxError {
    #[error("Missing inputs: a transaction needs at least one input")]
    NoInputs,

    #[error("Signing failed: {0}")]
    Signing(#[from] WalletError),
}

/// Builder for signed transactions.
///
/// Outputs are collected first; every input is then signed over the final
/// output list, so adding an output after signing is impossible.
pub struct TransactionBuilder {
    inputs: Vec<(UnsignedInput, String)>,
    outputs: OutputList,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: OutputList::new(),
        }
    }

    /// Debit `amount` from `sender`, signed with the key named `key_name`
    pub fn input(mut self, sender: PublicKey, amount: u64, key_name: &str) -> Self {
        self.inputs
            .push((UnsignedInput::new(sender, amount), key_name.to_string()));
        self
    }

    /// Credit `amount` to `recipient`
    pub fn output(mut self, recipient: PublicKey, amount: u64) -> Self {
        self.outputs.push(recipient, amount);
        self
    }

    /// Sign every input and assemble the transaction
    pub fn build<S: MessageSigner + ?Sized>(self, signer: &S) -> Result<Transaction, TxError> {
        if self.inputs.is_empty() {
            return Err(TxError::NoInputs);
        }

        let mut inputs = InputList::new();
        for (unsigned, key_name) in self.inputs {
            inputs.push(unsigned.sign(signer, &key_name, &self.outputs)?);
        }

        Ok(Transaction::new(inputs, self.outputs))
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
