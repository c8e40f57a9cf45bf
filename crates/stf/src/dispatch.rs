//! Transaction decoding and routing.

use dpos_chain_types::{Message, Transaction, TxCategory, TxSigner};

use crate::{StfError, StfResult};

/// Handler a transaction category is routed to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HandlerKind {
    General,
    DeployEnable,
    DeployDisable,
    Election,
    Token,
}

impl HandlerKind {
    pub fn for_category(category: TxCategory) -> Self {
        match category {
            TxCategory::Transfer => Self::General,
            TxCategory::EnableVoteDeploy | TxCategory::EnableTokenAssignDeploy => {
                Self::DeployEnable
            }
            TxCategory::DisableVoteDeploy | TxCategory::DisableTokenAssignDeploy => {
                Self::DeployDisable
            }
            TxCategory::RegisterCandidate | TxCategory::CastVote | TxCategory::RotateVote => {
                Self::Election
            }
            TxCategory::AssignToken | TxCategory::ProducerReward => Self::Token,
        }
    }
}

/// A decoded transaction and the handler it goes to.
#[derive(Clone, Debug)]
pub struct Dispatched {
    pub message: Message,
    pub handler: HandlerKind,
}

/// Recovers the sender of `tx` and routes it on its category tag.
///
/// Pure: touches no state.  Unknown tags are rejected before the signature is
/// looked at.
pub fn dispatch_transaction(tx: &Transaction, signer: &TxSigner) -> StfResult<Dispatched> {
    let tag = tx.category_tag();
    let category =
        TxCategory::try_from(tag).map_err(|_| StfError::InvalidTransactionType(tag))?;

    let from = signer.sender(tx)?;
    Ok(Dispatched {
        message: Message::from_recovered(tx, from, category),
        handler: HandlerKind::for_category(category),
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, U256, address};
    use dpos_chain_types::test_utils::TestKey;

    use super::*;

    const SIGNER: TxSigner = TxSigner::Eip155 { chain_id: 7 };

    fn signed(tag: u8, key: &TestKey) -> Transaction {
        let tx = Transaction::new(
            tag,
            0,
            U256::from(1),
            21_000,
            Some(address!("00000000000000000000000000000000000000cc")),
            U256::ZERO,
            Bytes::new(),
        );
        key.sign(tx, &SIGNER)
    }

    #[test]
    fn test_routing_table() {
        let cases = [
            (TxCategory::Transfer, HandlerKind::General),
            (TxCategory::EnableVoteDeploy, HandlerKind::DeployEnable),
            (TxCategory::EnableTokenAssignDeploy, HandlerKind::DeployEnable),
            (TxCategory::DisableVoteDeploy, HandlerKind::DeployDisable),
            (TxCategory::DisableTokenAssignDeploy, HandlerKind::DeployDisable),
            (TxCategory::RegisterCandidate, HandlerKind::Election),
            (TxCategory::CastVote, HandlerKind::Election),
            (TxCategory::RotateVote, HandlerKind::Election),
            (TxCategory::AssignToken, HandlerKind::Token),
            (TxCategory::ProducerReward, HandlerKind::Token),
        ];

        for (category, handler) in cases {
            assert_eq!(HandlerKind::for_category(category), handler, "{category:?}");
        }
    }

    #[test]
    fn test_dispatch_recovers_sender() {
        let key = TestKey::from_seed(11);
        let tx = signed(TxCategory::CastVote.tag(), &key);

        let dispatched = dispatch_transaction(&tx, &SIGNER).unwrap();
        assert_eq!(dispatched.handler, HandlerKind::Election);
        assert_eq!(dispatched.message.from(), key.address());
        assert_eq!(dispatched.message.category(), TxCategory::CastVote);
        assert_eq!(dispatched.message.nonce(), tx.nonce());
    }

    #[test]
    fn test_dispatch_rejects_unknown_tag() {
        let key = TestKey::from_seed(12);
        let tx = signed(0x42, &key);
        assert!(matches!(
            dispatch_transaction(&tx, &SIGNER),
            Err(StfError::InvalidTransactionType(0x42))
        ));
    }

    #[test]
    fn test_dispatch_rejects_bad_signature() {
        let key = TestKey::from_seed(13);
        let tx = signed(TxCategory::Transfer.tag(), &key);
        let other_chain = TxSigner::Eip155 { chain_id: 8 };
        assert!(matches!(
            dispatch_transaction(&tx, &other_chain),
            Err(StfError::Decode(_))
        ));
    }
}
