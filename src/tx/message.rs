// Canonical signing message for transaction inputs
//
// Layout (all integers little-endian, fixed width):
//   domain tag | sender (32) | amount (u64) | output count (u32)
//   then per output: recipient (32) | amount (u64)

use crate::identity::{PublicKey, Signer};
use crate::tx::{OutputList, TxInput};

const DOMAIN_TAG: &[u8] = b"keyledger/txinput/v1";

/// Builds and checks the message an input's signature covers
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Deterministic message binding a debit of `amount` from `sender` to
    /// exactly this ordered output list
    pub fn message_to_sign(sender: &PublicKey, amount: u64, outputs: &OutputList) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(DOMAIN_TAG.len() + 44 + outputs.len() * 40);

        bytes.extend_from_slice(DOMAIN_TAG);
        bytes.extend_from_slice(sender.as_bytes());
        bytes.extend_from_slice(&amount.to_le_bytes());

        bytes.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
        for output in outputs {
            bytes.extend_from_slice(output.recipient().as_bytes());
            bytes.extend_from_slice(&output.amount().to_le_bytes());
        }

        bytes
    }

    /// Check `signature` over `message` against `sender`.
    ///
    /// Never fails: malformed signature bytes, a different key or a changed
    /// message all return false.
    pub fn verify(sender: &PublicKey, signature: &[u8], message: &[u8]) -> bool {
        Signer::verify_bytes(sender, message, signature)
    }

    /// Rebuild the message for `input` over `outputs` and verify it
    pub fn verify_input(input: &TxInput, outputs: &OutputList) -> bool {
        let message = Self::message_to_sign(input.sender(), input.amount(), outputs);
        Self::verify(input.sender(), input.signature(), &message)
    }
}
