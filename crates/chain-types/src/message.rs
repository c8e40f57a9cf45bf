use alloy_primitives::{Address, Bytes, U256};

use crate::{Transaction, TxCategory};

/// Sender-resolved view of a transaction, ready for execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    from: Address,
    to: Option<Address>,
    category: TxCategory,
    nonce: u64,
    gas_limit: u64,
    gas_price: U256,
    value: U256,
    input: Bytes,
}

impl Message {
    /// Projects a transaction whose sender has already been recovered.
    pub fn from_recovered(tx: &Transaction, from: Address, category: TxCategory) -> Self {
        Self {
            from,
            to: tx.to(),
            category,
            nonce: tx.nonce(),
            gas_limit: tx.gas_limit(),
            gas_price: tx.gas_price(),
            value: tx.value(),
            input: tx.input().clone(),
        }
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn to(&self) -> Option<Address> {
        self.to
    }

    pub fn category(&self) -> TxCategory {
        self.category
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn input(&self) -> &Bytes {
        &self.input
    }

    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }
}
