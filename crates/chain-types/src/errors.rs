use alloy_primitives::SignatureError;
use thiserror::Error;

/// Failure to recover a transaction sender.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("invalid transaction v, r, s values")]
    InvalidSignatureValues,

    #[error("invalid chain id for signer (expected {expected}, got {got:?})")]
    InvalidChainId { expected: u64, got: Option<u64> },

    #[error("sender recovery: {0}")]
    Recovery(#[from] SignatureError),
}
