use alloy_primitives::{Address, B256, keccak256};
use alloy_rlp::Encodable;

/// Derives the address of a contract created by `sender` with `nonce`.
///
/// This is the last 20 bytes of `keccak256(rlp([sender, nonce]))`.
pub fn create_address(sender: Address, nonce: u64) -> Address {
    sender.create(nonce)
}

/// RLP-encodes `fields` as a single list.
pub(crate) fn rlp_list(fields: &[&dyn Encodable]) -> Vec<u8> {
    let payload_length = fields.iter().map(|f| f.length()).sum();
    let header = alloy_rlp::Header {
        list: true,
        payload_length,
    };

    let mut out = Vec::with_capacity(header.length() + payload_length);
    header.encode(&mut out);
    for field in fields {
        field.encode(&mut out);
    }
    out
}

/// Hashes the RLP list of `fields`.
pub(crate) fn rlp_hash(fields: &[&dyn Encodable]) -> B256 {
    keccak256(rlp_list(fields))
}
