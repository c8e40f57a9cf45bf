//! Deterministic keys for signing test transactions.

#![allow(unreachable_pub, reason = "test util module")]

use alloy_primitives::{Address, U256};
use k256::ecdsa::SigningKey;

use crate::{Transaction, TxSignature, TxSigner};

/// secp256k1 key derived from a small seed.
#[derive(Clone, Debug)]
pub struct TestKey {
    key: SigningKey,
    address: Address,
}

impl TestKey {
    /// Derives a key from `seed`.  Distinct seeds give distinct keys.
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x11;
        bytes[24..].copy_from_slice(&seed.to_be_bytes());
        let key = SigningKey::from_slice(&bytes).expect("test: valid scalar");
        let address = Address::from_private_key(&key);
        Self { key, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs `tx` under `signer`'s scheme.
    pub fn sign(&self, tx: Transaction, signer: &TxSigner) -> Transaction {
        let hash = signer.signature_hash(&tx);
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .expect("test: signing");

        let (sig, y_parity) = match sig.normalize_s() {
            Some(normalized) => (normalized, !recid.is_y_odd()),
            None => (sig, recid.is_y_odd()),
        };

        let bytes = sig.to_bytes();
        let r = U256::from_be_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..]);
        tx.with_signature(TxSignature::new(signer.encode_v(y_parity), r, s))
    }
}
