//! Block, transaction and receipt types for the DPoS chain.
//!
//! Everything here is plain data plus the hashing and signature rules that
//! every validating node has to agree on.  Wire encoding is owned elsewhere;
//! the RLP used here only feeds hashes and signing payloads.

mod block;
mod category;
mod errors;
mod message;
mod receipt;
mod signer;
mod transaction;
mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use block::{Block, Header};
pub use category::TxCategory;
pub use errors::SignerError;
pub use message::Message;
pub use receipt::{Log, Receipt, accumulate_logs_bloom, bloom_contains, logs_bloom};
pub use signer::TxSigner;
pub use transaction::{Transaction, TxSignature};
pub use utils::create_address;
