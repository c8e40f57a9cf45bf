/// The set of state-transition rules active for one block.
///
/// Produced by [`ChainConfig::rules`](crate::ChainConfig::rules).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ForkRules {
    pub chain_id: u64,
    pub block_number: u64,
    pub is_homestead: bool,
    pub is_eip155: bool,
    pub is_eip158: bool,
    pub is_byzantium: bool,
}

impl ForkRules {
    /// Whether receipts carry an intermediate state root.
    pub fn has_receipt_root(&self) -> bool {
        !self.is_byzantium
    }

    /// Whether empty accounts touched by a transaction are deleted.
    pub fn prunes_empty_accounts(&self) -> bool {
        self.is_eip158
    }
}
