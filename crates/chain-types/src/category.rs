use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Declared category of a transaction.
///
/// Transactions carry the raw tag; anything that does not decode into one of
/// these variants makes the whole block invalid.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum TxCategory {
    /// Plain value transfer, contract call or contract creation.
    Transfer = 0,

    EnableVoteDeploy = 1,
    EnableTokenAssignDeploy = 2,
    DisableVoteDeploy = 3,
    DisableTokenAssignDeploy = 4,

    RegisterCandidate = 5,
    CastVote = 6,
    RotateVote = 7,

    /// Token distribution, only accepted from the current token authority.
    AssignToken = 8,

    /// Producer reward payout, gated like [`Self::AssignToken`].
    ProducerReward = 9,
}

impl TxCategory {
    pub fn tag(self) -> u8 {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in 0u8..=9 {
            let category = TxCategory::try_from(tag).expect("known tag");
            assert_eq!(category.tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!(TxCategory::try_from(10u8).is_err());
        assert!(TxCategory::try_from(0xffu8).is_err());
    }
}
