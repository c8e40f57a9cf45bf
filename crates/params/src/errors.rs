use alloy_primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A fork is scheduled before a fork it depends on.
    #[error("fork {fork} at block {block} is scheduled before {prev_fork} at block {prev_block}")]
    ForkOrder {
        fork: &'static str,
        block: u64,
        prev_fork: &'static str,
        prev_block: u64,
    },

    /// A fork is scheduled while a fork it depends on is not.
    #[error("fork {fork} is scheduled but {missing} is not")]
    ForkGap {
        fork: &'static str,
        missing: &'static str,
    },

    #[error("dao refund contract {0} is also listed for draining")]
    DaoDrainIncludesRefund(Address),
}
