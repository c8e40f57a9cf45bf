use alloy_primitives::{Address, B256, Bloom, Bytes, U256};
use alloy_rlp::Encodable;

use crate::{Transaction, utils::rlp_hash};

/// Block header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Header {
    pub parent_hash: B256,
    pub uncles_hash: B256,
    /// Block producer, credited by the consensus engine.
    pub coinbase: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
}

impl Header {
    /// Header hash, the keccak-256 of its RLP encoding.
    pub fn hash(&self) -> B256 {
        let parent_hash = self.parent_hash.as_slice();
        let uncles_hash = self.uncles_hash.as_slice();
        let coinbase = self.coinbase.as_slice();
        let state_root = self.state_root.as_slice();
        let transactions_root = self.transactions_root.as_slice();
        let receipts_root = self.receipts_root.as_slice();
        let logs_bloom = self.logs_bloom.as_slice();
        let extra_data: &[u8] = &self.extra_data;

        let fields: [&dyn Encodable; 13] = [
            &parent_hash,
            &uncles_hash,
            &coinbase,
            &state_root,
            &transactions_root,
            &receipts_root,
            &logs_bloom,
            &self.difficulty,
            &self.number,
            &self.gas_limit,
            &self.gas_used,
            &self.timestamp,
            &extra_data,
        ];
        rlp_hash(&fields)
    }
}

/// A block as handed to the processor.  Never mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Block {
    header: Header,
    transactions: Vec<Transaction>,
    uncles: Vec<Header>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>, uncles: Vec<Header>) -> Self {
        Self {
            header,
            transactions,
            uncles,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn uncles(&self) -> &[Header] {
        &self.uncles
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn gas_limit(&self) -> u64 {
        self.header.gas_limit
    }

    pub fn hash(&self) -> B256 {
        self.header.hash()
    }
}
