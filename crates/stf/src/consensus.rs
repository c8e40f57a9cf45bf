use std::fmt::Debug;

use alloy_primitives::B256;
use dpos_chain_types::{Header, Receipt, Transaction};
use dpos_election::ElectionContext;

use crate::LedgerStore;

/// Read access to the canonical chain below the block being processed.
pub trait ChainReader: Debug {
    /// Hash of the canonical block at `number`, if known.
    fn block_hash(&self, number: u64) -> Option<B256>;
}

/// Consensus-specific work done once all transactions have been applied.
pub trait ConsensusEngine<L: LedgerStore + ?Sized> {
    /// Applies end-of-block changes such as producer rewards.
    ///
    /// Must be deterministic.  It cannot fail: a block that reaches this
    /// point is valid as far as transaction processing is concerned.
    #[expect(clippy::too_many_arguments, reason = "mirrors the finalize hook contract")]
    fn finalize(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        ledger: &mut L,
        txs: &[Transaction],
        uncles: &[Header],
        receipts: &[Receipt],
        election: &mut dyn ElectionContext,
    );
}
