use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rlp::Encodable;

use crate::utils::rlp_hash;

/// Raw `(v, r, s)` signature as carried by a transaction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TxSignature {
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl TxSignature {
    pub fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Whether `v` commits to a chain id.
    pub fn is_protected(&self) -> bool {
        self.v != 27 && self.v != 28
    }

    /// Chain id encoded in a protected `v`.
    pub fn chain_id(&self) -> Option<u64> {
        if !self.is_protected() || self.v < 35 {
            return None;
        }
        Some((self.v - 35) / 2)
    }
}

/// Signed transaction.
///
/// The category is kept as the raw tag so that blocks carrying unknown tags
/// can still be represented and rejected during processing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    category: u8,
    nonce: u64,
    gas_price: U256,
    gas_limit: u64,
    to: Option<Address>,
    value: U256,
    input: Bytes,
    signature: TxSignature,
}

impl Transaction {
    /// Creates an unsigned transaction.
    pub fn new(
        category: u8,
        nonce: u64,
        gas_price: U256,
        gas_limit: u64,
        to: Option<Address>,
        value: U256,
        input: Bytes,
    ) -> Self {
        Self {
            category,
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            input,
            signature: TxSignature::default(),
        }
    }

    pub fn with_signature(mut self, signature: TxSignature) -> Self {
        self.signature = signature;
        self
    }

    pub fn category_tag(&self) -> u8 {
        self.category
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Recipient, `None` for contract creation.
    pub fn to(&self) -> Option<Address> {
        self.to
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn input(&self) -> &Bytes {
        &self.input
    }

    pub fn signature(&self) -> &TxSignature {
        &self.signature
    }

    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Transaction hash, covering every field including the signature.
    pub fn hash(&self) -> B256 {
        let to = self.to_field();
        let input: &[u8] = &self.input;
        let fields: [&dyn Encodable; 10] = [
            &self.nonce,
            &self.gas_price,
            &self.gas_limit,
            &to,
            &self.value,
            &input,
            &self.category,
            &self.signature.v,
            &self.signature.r,
            &self.signature.s,
        ];
        rlp_hash(&fields)
    }

    /// Hash signed by the sender, optionally committing to a chain id.
    pub(crate) fn signing_hash(&self, chain_id: Option<u64>) -> B256 {
        let to = self.to_field();
        let input: &[u8] = &self.input;
        let replay_protection = chain_id.map(|chain_id| [chain_id, 0, 0]);

        let base: [&dyn Encodable; 7] = [
            &self.nonce,
            &self.gas_price,
            &self.gas_limit,
            &to,
            &self.value,
            &input,
            &self.category,
        ];
        let mut fields = base.to_vec();
        if let Some(extra) = &replay_protection {
            fields.extend(extra.iter().map(|f| f as &dyn Encodable));
        }

        rlp_hash(&fields)
    }

    fn to_field(&self) -> &[u8] {
        self.to.as_ref().map(|a| a.as_slice()).unwrap_or_default()
    }
}
