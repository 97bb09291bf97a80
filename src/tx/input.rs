use crate::identity::{MessageSigner, PublicKey, WalletError};
use crate::ledger::Ledger;
use crate::tx::{OutputList, SignatureVerifier};
use serde::{Deserialize, Serialize};

/// A claimed debit of `amount` from `sender`.
///
/// The signature is kept as raw bytes: it comes from untrusted callers and is
/// only checked during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    sender: PublicKey,
    amount: u64,
    signature: Vec<u8>,
}

impl TxInput {
    pub fn new(sender: PublicKey, amount: u64, signature: Vec<u8>) -> Self {
        Self {
            sender,
            amount,
            signature,
        }
    }

    pub fn sender(&self) -> &PublicKey {
        &self.sender
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Check this input's signature against an output list
    pub fn verify(&self, outputs: &OutputList) -> bool {
        SignatureVerifier::verify_input(self, outputs)
    }
}

/// An input before it has been signed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedInput {
    sender: PublicKey,
    amount: u64,
}

impl UnsignedInput {
    pub fn new(sender: PublicKey, amount: u64) -> Self {
        Self { sender, amount }
    }

    pub fn sender(&self) -> &PublicKey {
        &self.sender
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// The message a signature for this input must cover
    pub fn message_to_sign(&self, outputs: &OutputList) -> Vec<u8> {
        SignatureVerifier::message_to_sign(&self.sender, self.amount, outputs)
    }

    /// Sign over `outputs` with the key held under `key_name`
    pub fn sign<S: MessageSigner + ?Sized>(
        self,
        signer: &S,
        key_name: &str,
        outputs: &OutputList,
    ) -> Result<TxInput, WalletError> {
        let message = self.message_to_sign(outputs);
        let signature = signer.sign_message(&message, key_name)?;
        Ok(TxInput::new(self.sender, self.amount, signature))
    }

    /// Attach an externally produced signature
    pub fn with_signature(self, signature: Vec<u8>) -> TxInput {
        TxInput::new(self.sender, self.amount, signature)
    }
}

/// Ordered list of signed inputs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputList {
    inputs: Vec<TxInput>,
}

impl InputList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input
    pub fn push(&mut self, input: TxInput) {
        self.inputs.push(input);
    }

    /// Builder-style append
    pub fn with(mut self, sender: PublicKey, amount: u64, signature: Vec<u8>) -> Self {
        self.push(TxInput::new(sender, amount, signature));
        self
    }

    /// Sum of all input amounts
    pub fn total_amount(&self) -> u128 {
        self.inputs.iter().map(|i| i.amount as u128).sum()
    }

    /// Collapse the list into the total claimed per account.
    ///
    /// Two inputs debiting the same key for 15 each become one claim of 30.
    /// Per-account totals saturate at `i64::MAX`; `claims` keeps them exact.
    pub fn aggregate(&self) -> Ledger {
        let mut claims = Ledger::new();
        for input in &self.inputs {
            claims.increment(input.sender(), input.amount());
        }
        claims
    }

    /// Exact total claimed per account, in order of first appearance
    pub fn claims(&self) -> Vec<(PublicKey, u128)> {
        let mut claims: Vec<(PublicKey, u128)> = Vec::new();
        for input in &self.inputs {
            let amount = input.amount() as u128;
            match claims.iter_mut().find(|(key, _)| *key == *input.sender()) {
                Some((_, total)) => *total += amount,
                None => claims.push((input.sender().clone(), amount)),
            }
        }
        claims
    }

    /// True if every input is signed over `outputs`
    pub fn check_signatures(&self, outputs: &OutputList) -> bool {
        self.inputs.iter().all(|input| input.verify(outputs))
    }

    /// Index of the first input whose signature does not cover `outputs`
    pub fn first_invalid_signature(&self, outputs: &OutputList) -> Option<usize> {
        self.inputs.iter().position(|input| !input.verify(outputs))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TxInput> {
        self.inputs.iter()
    }

    pub fn as_slice(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl FromIterator<TxInput> for InputList {
    fn from_iter<I: IntoIterator<Item = TxInput>>(iter: I) -> Self {
        Self {
            inputs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InputList {
    type Item = &'a TxInput;
    type IntoIter = std::slice::Iter<'a, TxInput>;

    fn into_iter(self) -> Self::IntoIter {
        self.inputs.iter()
    }
}
