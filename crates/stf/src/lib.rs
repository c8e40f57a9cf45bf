//! Block state transition for the DPoS chain.
//!
//! Applies every transaction of a block, in order, against a mutable ledger
//! and produces the receipts, logs and gas totals that all validating nodes
//! must agree on.  Any failure rejects the whole block.
//!
//! ## Architecture
//!
//! - `processor`: [`StateProcessor`], the per-block driver
//! - `dispatch`: decodes a transaction and picks its handler
//! - `handlers`: per-category pre-checks and election hooks
//! - `apply`: the execution skeleton shared by every category
//! - `receipt`: receipt construction
//! - `hardfork`: one-time state patches run before a block's transactions
//!
//! The execution engine, the ledger and the consensus engine are external and
//! plugged in through [`ExecutionEngine`], [`LedgerStore`] and
//! [`ConsensusEngine`].

mod apply;
mod consensus;
mod dispatch;
mod engine;
mod env;
pub mod errors;
mod gas_pool;
mod handlers;
mod hardfork;
mod ledger;
mod output;
mod processor;
mod receipt;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use apply::apply_transaction;
pub use consensus::{ChainReader, ConsensusEngine};
pub use dispatch::{Dispatched, HandlerKind, dispatch_transaction};
pub use engine::{ExecContext, ExecOutcome, ExecutionEngine};
pub use env::BlockEnv;
pub use errors::{EngineError, HardForkError, StfError, StfResult};
pub use gas_pool::{GasPool, GasPoolError};
pub use hardfork::apply_dao_hard_fork;
pub use ledger::LedgerStore;
pub use output::ProcessOutput;
pub use processor::StateProcessor;
