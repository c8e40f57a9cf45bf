use alloy_primitives::{Address, B256, Bloom, BloomInput, Bytes};

/// Event emitted during execution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,

    // Placement, stamped by the ledger when the log is recorded.
    pub block_hash: B256,
    pub tx_hash: B256,
    pub tx_index: usize,
    /// Index of the log within the whole block.
    pub log_index: usize,
}

impl Log {
    /// Creates an unplaced log.
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self {
            address,
            topics,
            data,
            ..Default::default()
        }
    }
}

/// Outcome of one transaction.
///
/// Built once by the processor and never modified afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    post_state: Option<B256>,
    success: bool,
    cumulative_gas_used: u64,
    gas_used: u64,
    tx_hash: B256,
    contract_address: Option<Address>,
    logs: Vec<Log>,
    bloom: Bloom,
}

impl Receipt {
    /// Constructs a receipt, deriving the bloom from `logs`.
    pub fn new(
        post_state: Option<B256>,
        success: bool,
        cumulative_gas_used: u64,
        gas_used: u64,
        tx_hash: B256,
        contract_address: Option<Address>,
        logs: Vec<Log>,
    ) -> Self {
        let bloom = logs_bloom(&logs);
        Self {
            post_state,
            success,
            cumulative_gas_used,
            gas_used,
            tx_hash,
            contract_address,
            logs,
            bloom,
        }
    }

    /// Intermediate state root, only present before Byzantium.
    pub fn post_state(&self) -> Option<B256> {
        self.post_state
    }

    /// `false` if execution reverted.
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn cumulative_gas_used(&self) -> u64 {
        self.cumulative_gas_used
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    pub fn tx_hash(&self) -> B256 {
        self.tx_hash
    }

    pub fn contract_address(&self) -> Option<Address> {
        self.contract_address
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn bloom(&self) -> &Bloom {
        &self.bloom
    }

    /// Probabilistic membership test for an address or topic.
    ///
    /// May return false positives, never false negatives.
    pub fn bloom_contains(&self, input: &[u8]) -> bool {
        bloom_contains(&self.bloom, input)
    }
}

/// Builds the bloom filter over the addresses and topics of `logs`.
pub fn logs_bloom(logs: &[Log]) -> Bloom {
    let mut bloom = Bloom::default();
    for log in logs {
        bloom.accrue(BloomInput::Raw(log.address.as_slice()));
        for topic in &log.topics {
            bloom.accrue(BloomInput::Raw(topic.as_slice()));
        }
    }
    bloom
}

/// Combines the blooms of every receipt into a block-level bloom.
pub fn accumulate_logs_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::default();
    receipts.iter().for_each(|r| {
        bloom.accrue_bloom(r.bloom());
    });
    bloom
}

pub fn bloom_contains(bloom: &Bloom, input: &[u8]) -> bool {
    bloom.contains_input(BloomInput::Raw(input))
}
