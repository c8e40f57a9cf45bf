use alloy_primitives::Bloom;
use dpos_chain_types::{Log, Receipt, accumulate_logs_bloom};

/// Result of applying every transaction of a block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcessOutput {
    receipts: Vec<Receipt>,
    logs: Vec<Log>,
    gas_used: u64,
}

impl ProcessOutput {
    pub(crate) fn new(receipts: Vec<Receipt>, logs: Vec<Log>, gas_used: u64) -> Self {
        Self {
            receipts,
            logs,
            gas_used,
        }
    }

    /// Receipts, one per transaction in block order.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Every log of the block in emission order.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Header bloom for the block.
    pub fn logs_bloom(&self) -> Bloom {
        accumulate_logs_bloom(&self.receipts)
    }

    pub fn into_parts(self) -> (Vec<Receipt>, Vec<Log>, u64) {
        (self.receipts, self.logs, self.gas_used)
    }
}
