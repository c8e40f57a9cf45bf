//! Fork-aware sender recovery.

use alloy_primitives::{Address, B256, Signature, U256, uint};
use dpos_params::ForkRules;

use crate::{SignerError, Transaction, TxSignature};

/// Order of the secp256k1 curve.
const SECP256K1N: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Half the curve order, the Homestead upper bound for `s`.
const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Signing scheme in force for a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TxSigner {
    /// Original scheme, any `s` accepted.
    Frontier,

    /// Rejects high-`s` signatures.
    Homestead,

    /// Replay-protected scheme committing to a chain id.  Unprotected
    /// signatures are still accepted under Homestead rules.
    Eip155 { chain_id: u64 },
}

impl TxSigner {
    /// Picks the signer for a block's rules.
    pub fn for_rules(rules: &ForkRules) -> Self {
        if rules.is_eip155 {
            Self::Eip155 {
                chain_id: rules.chain_id,
            }
        } else if rules.is_homestead {
            Self::Homestead
        } else {
            Self::Frontier
        }
    }

    /// Hash the sender signs for `tx` under this scheme.
    pub fn signature_hash(&self, tx: &Transaction) -> B256 {
        match self {
            Self::Frontier | Self::Homestead => tx.signing_hash(None),
            Self::Eip155 { chain_id } => tx.signing_hash(Some(*chain_id)),
        }
    }

    /// Encodes the recovery parity as `v`.
    pub fn encode_v(&self, y_parity: bool) -> u64 {
        let parity = y_parity as u64;
        match self {
            Self::Frontier | Self::Homestead => 27 + parity,
            Self::Eip155 { chain_id } => chain_id * 2 + 35 + parity,
        }
    }

    /// Recovers the sender of `tx`.
    pub fn sender(&self, tx: &Transaction) -> Result<Address, SignerError> {
        let sig = tx.signature();
        match self {
            Self::Frontier => recover_plain(tx.signing_hash(None), sig, sig.v, false),
            Self::Homestead => recover_plain(tx.signing_hash(None), sig, sig.v, true),
            Self::Eip155 { chain_id } => {
                if !sig.is_protected() {
                    return Self::Homestead.sender(tx);
                }

                let got = sig.chain_id();
                if got != Some(*chain_id) {
                    return Err(SignerError::InvalidChainId {
                        expected: *chain_id,
                        got,
                    });
                }

                let v = sig.v - chain_id * 2 - 8;
                recover_plain(tx.signing_hash(Some(*chain_id)), sig, v, true)
            }
        }
    }
}

/// Recovers an address from a signature whose `v` has been normalised to
/// 27/28.
fn recover_plain(
    hash: B256,
    sig: &TxSignature,
    v: u64,
    homestead: bool,
) -> Result<Address, SignerError> {
    let y_parity = match v {
        27 => false,
        28 => true,
        _ => return Err(SignerError::InvalidSignatureValues),
    };

    if !validate_signature_values(sig.r, sig.s, homestead) {
        return Err(SignerError::InvalidSignatureValues);
    }

    let signature = Signature::new(sig.r, sig.s, y_parity);
    Ok(signature.recover_address_from_prehash(&hash)?)
}

fn validate_signature_values(r: U256, s: U256, homestead: bool) -> bool {
    if r.is_zero() || s.is_zero() {
        return false;
    }
    if homestead && s > SECP256K1N_HALF {
        return false;
    }
    r < SECP256K1N && s < SECP256K1N
}
