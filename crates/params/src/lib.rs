//! Chain parameters consumed by the block processor.
//!
//! [`ChainConfig`] carries the fork activation heights for a chain and is
//! usually loaded once by the node from its TOML configuration.  The processor
//! collapses it into a [`ForkRules`] value once per block so that the
//! per-transaction code never re-evaluates fork predicates.

mod chain_config;
mod errors;
mod exec_config;
mod rules;

pub use chain_config::{ChainConfig, DaoForkParams};
pub use errors::ConfigError;
pub use exec_config::ExecConfig;
pub use rules::ForkRules;
