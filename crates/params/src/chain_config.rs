use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ForkRules};

/// Fork activation schedule of a chain.
///
/// A fork scheduled at block `n` is active for every block numbered `n` or
/// higher.  An unscheduled fork (`None`) is never active.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,

    #[serde(default)]
    pub homestead_block: Option<u64>,

    #[serde(default)]
    pub eip155_block: Option<u64>,

    #[serde(default)]
    pub eip158_block: Option<u64>,

    #[serde(default)]
    pub byzantium_block: Option<u64>,

    /// One-time balance redistribution, if the chain schedules one.
    #[serde(default)]
    pub dao_fork: Option<DaoForkParams>,
}

/// Parameters of the DAO irregular state change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DaoForkParams {
    /// Block at which the balances are moved.
    pub block: u64,

    /// Whether this node follows the fork at all.
    pub support: bool,

    /// Account that receives every drained balance.
    pub refund_contract: Address,

    /// Accounts whose balances are moved to the refund contract.
    #[serde(default)]
    pub drain_list: Vec<Address>,
}

impl ChainConfig {
    /// Config with no fork ever active.
    pub fn frontier(chain_id: u64) -> Self {
        Self {
            chain_id,
            homestead_block: None,
            eip155_block: None,
            eip158_block: None,
            byzantium_block: None,
            dao_fork: None,
        }
    }

    /// Config with every fork active from genesis.
    pub fn all_forks_at_genesis(chain_id: u64) -> Self {
        Self {
            chain_id,
            homestead_block: Some(0),
            eip155_block: Some(0),
            eip158_block: Some(0),
            byzantium_block: Some(0),
            dao_fork: None,
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that forks are scheduled in dependency order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let schedule = [
            ("homestead", self.homestead_block),
            ("eip155", self.eip155_block),
            ("eip158", self.eip158_block),
            ("byzantium", self.byzantium_block),
        ];

        let mut prev: Option<(&'static str, Option<u64>)> = None;
        for (fork, block) in schedule {
            if let Some((prev_fork, prev_block)) = prev {
                match (prev_block, block) {
                    (None, Some(_)) => {
                        return Err(ConfigError::ForkGap {
                            fork,
                            missing: prev_fork,
                        });
                    }
                    (Some(prev_block), Some(block)) if block < prev_block => {
                        return Err(ConfigError::ForkOrder {
                            fork,
                            block,
                            prev_fork,
                            prev_block,
                        });
                    }
                    _ => {}
                }
            }
            prev = Some((fork, block));
        }

        if let Some(dao) = &self.dao_fork
            && dao.drain_list.contains(&dao.refund_contract)
        {
            return Err(ConfigError::DaoDrainIncludesRefund(dao.refund_contract));
        }

        Ok(())
    }

    pub fn is_homestead(&self, number: u64) -> bool {
        is_forked(self.homestead_block, number)
    }

    pub fn is_eip155(&self, number: u64) -> bool {
        is_forked(self.eip155_block, number)
    }

    pub fn is_eip158(&self, number: u64) -> bool {
        is_forked(self.eip158_block, number)
    }

    pub fn is_byzantium(&self, number: u64) -> bool {
        is_forked(self.byzantium_block, number)
    }

    /// Returns the DAO parameters if the patch must be applied at exactly
    /// this block.
    pub fn dao_fork_at(&self, number: u64) -> Option<&DaoForkParams> {
        self.dao_fork
            .as_ref()
            .filter(|dao| dao.support && dao.block == number)
    }

    /// Collapses the schedule into the rules for one block.
    pub fn rules(&self, number: u64) -> ForkRules {
        ForkRules {
            chain_id: self.chain_id,
            block_number: number,
            is_homestead: self.is_homestead(number),
            is_eip155: self.is_eip155(number),
            is_eip158: self.is_eip158(number),
            is_byzantium: self.is_byzantium(number),
        }
    }
}

fn is_forked(activation: Option<u64>, number: u64) -> bool {
    activation.is_some_and(|block| block <= number)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const REFUND: Address = address!("bf4ed7b27f1d666546e30d74d50d173d20bca754");
    const DRAINED: Address = address!("d4fe7bc31cedb7bfb8a345f31e668033056b2728");

    #[test]
    fn test_rules_at_activation_boundaries() {
        let config = ChainConfig {
            homestead_block: Some(10),
            eip155_block: Some(20),
            eip158_block: Some(20),
            byzantium_block: Some(30),
            ..ChainConfig::frontier(7)
        };

        let r = config.rules(9);
        assert!(!r.is_homestead);
        assert!(r.has_receipt_root());

        let r = config.rules(20);
        assert!(r.is_homestead && r.is_eip155 && r.is_eip158);
        assert!(!r.is_byzantium);
        assert!(r.prunes_empty_accounts());

        let r = config.rules(30);
        assert!(r.is_byzantium);
        assert!(!r.has_receipt_root());
        assert_eq!(r.chain_id, 7);
        assert_eq!(r.block_number, 30);
    }

    #[test]
    fn test_frontier_has_no_forks() {
        let r = ChainConfig::frontier(1).rules(u64::MAX);
        assert!(!r.is_homestead && !r.is_eip155 && !r.is_eip158 && !r.is_byzantium);
    }

    #[test]
    fn test_validate_rejects_out_of_order_forks() {
        let config = ChainConfig {
            homestead_block: Some(100),
            eip155_block: Some(50),
            ..ChainConfig::frontier(1)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ForkOrder {
                fork: "eip155",
                block: 50,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_fork_gap() {
        let config = ChainConfig {
            byzantium_block: Some(5),
            ..ChainConfig::frontier(1)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ForkGap {
                fork: "byzantium",
                missing: "eip158",
            })
        ));
    }

    #[test]
    fn test_dao_fork_only_at_exact_block_with_support() {
        let mut config = ChainConfig::all_forks_at_genesis(1);
        config.dao_fork = Some(DaoForkParams {
            block: 42,
            support: true,
            refund_contract: REFUND,
            drain_list: vec![DRAINED],
        });

        assert!(config.dao_fork_at(41).is_none());
        assert!(config.dao_fork_at(42).is_some());
        assert!(config.dao_fork_at(43).is_none());

        config.dao_fork.as_mut().unwrap().support = false;
        assert!(config.dao_fork_at(42).is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let doc = r#"
            chain_id = 5
            homestead_block = 0
            eip155_block = 10
            eip158_block = 10

            [dao_fork]
            block = 3
            support = true
            refund_contract = "0xbf4ed7b27f1d666546e30d74d50d173d20bca754"
            drain_list = ["0xd4fe7bc31cedb7bfb8a345f31e668033056b2728"]
        "#;

        let config = ChainConfig::from_toml_str(doc).expect("config should parse");
        assert_eq!(config.chain_id, 5);
        assert_eq!(config.byzantium_block, None);
        assert!(config.is_eip155(10));
        assert!(!config.is_eip155(9));

        let dao = config.dao_fork_at(3).expect("dao fork scheduled");
        assert_eq!(dao.refund_contract, REFUND);
        assert_eq!(dao.drain_list, vec![DRAINED]);
    }

    #[test]
    fn test_from_toml_str_rejects_refund_in_drain_list() {
        let doc = r#"
            chain_id = 5

            [dao_fork]
            block = 3
            support = true
            refund_contract = "0xbf4ed7b27f1d666546e30d74d50d173d20bca754"
            drain_list = ["0xbf4ed7b27f1d666546e30d74d50d173d20bca754"]
        "#;

        assert!(matches!(
            ChainConfig::from_toml_str(doc),
            Err(ConfigError::DaoDrainIncludesRefund(addr)) if addr == REFUND
        ));
    }
}
