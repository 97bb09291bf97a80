// Identity module - Ed25519 account keys, signing, named key wallets

mod directory;
mod keypair;
mod signer;
mod wallet;

pub use directory::*;
pub use keypair::*;
pub use signer::*;
pub use wallet::*;
