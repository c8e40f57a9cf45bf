//! Block processing errors.
//!
//! Every variant means the block is invalid and must be rejected as a whole.
//! A reverted execution is not an error; it shows up as a failed receipt.

use alloy_primitives::Address;
use dpos_chain_types::SignerError;
use dpos_election::ElectionError;
use thiserror::Error;

use crate::GasPoolError;

#[derive(Debug, Error)]
pub enum StfError {
    /// The sender could not be recovered from the signature.
    #[error("decode: {0}")]
    Decode(#[from] SignerError),

    #[error("invalid transaction type {0}")]
    InvalidTransactionType(u8),

    /// An authority-gated transaction was not sent by the current authority.
    #[error("sender {got} is not the token authority (expected {expected:?})")]
    AuthorityMismatch {
        expected: Option<Address>,
        got: Address,
    },

    #[error("insufficient gas: {0}")]
    InsufficientGas(#[from] GasPoolError),

    /// Non-recoverable engine failure, distinct from a revert.
    #[error("execution: {0}")]
    Execution(#[from] EngineError),

    #[error("hard fork: {0}")]
    HardForkApply(#[from] HardForkError),

    #[error("election: {0}")]
    Election(#[from] ElectionError),
}

pub type StfResult<T> = Result<T, StfError>;

/// Fatal conditions reported by an execution engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("nonce too low for {account} (state {state}, tx {tx})")]
    NonceTooLow { account: Address, state: u64, tx: u64 },

    #[error("nonce too high for {account} (state {state}, tx {tx})")]
    NonceTooHigh { account: Address, state: u64, tx: u64 },

    #[error("insufficient funds for gas * price + value on {0}")]
    InsufficientFunds(Address),

    #[error("intrinsic gas too low (have {have}, want {want})")]
    IntrinsicGas { have: u64, want: u64 },

    /// The engine claims to have used more gas than the message allowed.
    #[error("engine used {used} gas with a limit of {limit}")]
    GasUsedExceedsLimit { used: u64, limit: u64 },

    #[error("engine: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum HardForkError {
    #[error("balance overflow crediting {0}")]
    BalanceOverflow(Address),
}
