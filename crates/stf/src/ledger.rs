use alloy_primitives::{Address, B256, U256};
use dpos_chain_types::Log;

/// Mutable account state a block is applied against.
///
/// One processing call has exclusive access to the ledger for its whole
/// duration.  If processing fails the caller throws the ledger away.
pub trait LedgerStore {
    /// Scopes logs recorded from now on to the given transaction.
    fn prepare(&mut self, tx_hash: B256, block_hash: B256, tx_index: usize);

    /// Records a log under the transaction set by [`Self::prepare`].
    fn add_log(&mut self, log: Log);

    /// Logs recorded for a transaction, in emission order.
    fn logs(&self, tx_hash: &B256) -> Vec<Log>;

    /// Commits pending changes without computing a root.
    fn finalise(&mut self, prune_empty: bool);

    /// Commits pending changes and returns the resulting state root.
    fn intermediate_root(&mut self, prune_empty: bool) -> B256;

    fn exists(&self, addr: &Address) -> bool;

    fn create_account(&mut self, addr: Address);

    fn balance(&self, addr: &Address) -> U256;

    fn set_balance(&mut self, addr: Address, amount: U256);

    fn nonce(&self, addr: &Address) -> u64;

    fn set_nonce(&mut self, addr: Address, nonce: u64);
}
