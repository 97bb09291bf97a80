// Transaction module - signed inputs, outputs and the message they sign

mod builder;
mod input;
mod message;
mod output;
mod transaction;

pub use builder::*;
pub use input::*;
pub use message::*;
pub use output::*;
pub use transaction::*;
