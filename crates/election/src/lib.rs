//! On-chain election state as seen by the block processor.
//!
//! The processor only needs two things from the election layer: who the
//! current token authority is, and a place to report election-related
//! transactions.  How candidates, votes and deploy permissions are actually
//! tallied is up to the implementor of [`ElectionContext`].

mod context;
mod errors;
mod mem;

pub use context::{DeployKind, ElectionContext};
pub use errors::{ElectionError, ElectionResult};
pub use mem::MemElectionContext;
