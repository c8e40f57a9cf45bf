use alloy_primitives::{Address, B256, Bytes, U256};
use dpos_chain_types::{Header, Message};
use dpos_params::{ExecConfig, ForkRules};

use crate::{ChainReader, EngineError, GasPool, LedgerStore};

/// Block and transaction environment an engine executes a message in.
#[derive(Debug)]
pub struct ExecContext<'a> {
    origin: Address,
    gas_price: U256,
    coinbase: Address,
    number: u64,
    timestamp: u64,
    gas_limit: u64,
    difficulty: U256,
    parent_hash: B256,
    rules: ForkRules,
    config: &'a ExecConfig,
    chain: &'a dyn ChainReader,
}

impl<'a> ExecContext<'a> {
    /// Builds the context for `msg`.  `author` overrides the header's
    /// coinbase as the fee recipient.
    pub fn new(
        msg: &Message,
        header: &Header,
        chain: &'a dyn ChainReader,
        author: Option<Address>,
        rules: ForkRules,
        config: &'a ExecConfig,
    ) -> Self {
        Self {
            origin: msg.from(),
            gas_price: msg.gas_price(),
            coinbase: author.unwrap_or(header.coinbase),
            number: header.number,
            timestamp: header.timestamp,
            gas_limit: header.gas_limit,
            difficulty: header.difficulty,
            parent_hash: header.parent_hash,
            rules,
            config,
            chain,
        }
    }

    /// Original sender of the transaction.
    pub fn origin(&self) -> Address {
        self.origin
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    /// Recipient of transaction fees.
    pub fn coinbase(&self) -> Address {
        self.coinbase
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Gas limit of the block, not of the message.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn difficulty(&self) -> U256 {
        self.difficulty
    }

    pub fn rules(&self) -> &ForkRules {
        &self.rules
    }

    pub fn config(&self) -> &ExecConfig {
        self.config
    }

    /// Hash of an ancestor block.  Returns `None` for the current block and
    /// anything above it.
    pub fn block_hash(&self, number: u64) -> Option<B256> {
        if number >= self.number {
            return None;
        }
        if number + 1 == self.number {
            return Some(self.parent_hash);
        }
        self.chain.block_hash(number)
    }
}

/// Result of executing one message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecOutcome {
    pub return_data: Bytes,

    /// Gas charged to the message, after refunds.
    pub gas_used: u64,

    /// Execution failed but the transaction is still valid and pays for gas.
    pub reverted: bool,
}

/// Executes messages against ledger state.
pub trait ExecutionEngine<L: LedgerStore + ?Sized> {
    /// Executes `msg`.
    ///
    /// The processor has already checked that `gas_pool` can cover the
    /// message's gas limit and deducts the reported gas afterwards.  Returns
    /// an error only for conditions that make the transaction invalid.
    fn execute(
        &self,
        ctx: &ExecContext<'_>,
        msg: &Message,
        ledger: &mut L,
        gas_pool: &GasPool,
    ) -> Result<ExecOutcome, EngineError>;
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, address, b256};
    use dpos_chain_types::{Transaction, TxCategory};
    use dpos_params::ChainConfig;

    use super::*;
    use crate::test_utils::{MemChain, TEST_COINBASE, test_header};

    fn message() -> Message {
        let tx = Transaction::new(
            TxCategory::Transfer.tag(),
            3,
            U256::from(7),
            21_000,
            None,
            U256::ZERO,
            Bytes::new(),
        );
        let from = address!("00000000000000000000000000000000000000a1");
        Message::from_recovered(&tx, from, TxCategory::Transfer)
    }

    #[test]
    fn test_context_fields() {
        let header = test_header(10, 8_000_000);
        let chain = MemChain::new();
        let config = ExecConfig::default();
        let rules = ChainConfig::all_forks_at_genesis(5).rules(10);
        let msg = message();

        let ctx = ExecContext::new(&msg, &header, &chain, None, rules, &config);
        assert_eq!(ctx.origin(), msg.from());
        assert_eq!(ctx.gas_price(), U256::from(7));
        assert_eq!(ctx.coinbase(), TEST_COINBASE);
        assert_eq!(ctx.number(), 10);
        assert_eq!(ctx.gas_limit(), 8_000_000);
        assert_eq!(ctx.timestamp(), header.timestamp);
        assert_eq!(ctx.difficulty(), header.difficulty);
        assert!(ctx.rules().is_byzantium);
        assert!(!ctx.config().debug);

        let author = address!("00000000000000000000000000000000000000a2");
        let ctx = ExecContext::new(&msg, &header, &chain, Some(author), rules, &config);
        assert_eq!(ctx.coinbase(), author);
    }

    #[test]
    fn test_block_hash_lookup() {
        let header = test_header(10, 8_000_000);
        let old = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let mut chain = MemChain::new();
        chain.insert(4, old);

        let config = ExecConfig::default();
        let rules = ChainConfig::frontier(5).rules(10);
        let msg = message();
        let ctx = ExecContext::new(&msg, &header, &chain, None, rules, &config);

        assert_eq!(ctx.block_hash(9), Some(header.parent_hash));
        assert_eq!(ctx.block_hash(4), Some(old));
        assert_eq!(ctx.block_hash(5), None);
        assert_eq!(ctx.block_hash(10), None);
        assert_eq!(ctx.block_hash(11), None);
    }
}
