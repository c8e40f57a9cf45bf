//! Block-level tests driving [`StateProcessor`] with in-memory collaborators.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use dpos_chain_types::{Block, Transaction, TxSigner};
use dpos_election::ElectionContext;
use dpos_params::{ChainConfig, ExecConfig};

use crate::{
    ProcessOutput, StateProcessor, StfResult,
    test_utils::{MemChain, MemLedger, RewardConsensus, TestKey, TransferEngine, test_header},
};

mod election_hooks;

const CHAIN_ID: u64 = 1337;
const BLOCK_GAS_LIMIT: u64 = 8_000_000;
const BLOCK_REWARD: u64 = 5_000_000;
const INITIAL_BALANCE: u64 = 1_000_000_000;

type TestProcessor = StateProcessor<TransferEngine, RewardConsensus>;

fn alice() -> TestKey {
    TestKey::from_seed(1)
}

fn bob() -> TestKey {
    TestKey::from_seed(2)
}

fn authority() -> TestKey {
    TestKey::from_seed(3)
}

fn new_processor(config: ChainConfig) -> TestProcessor {
    StateProcessor::new(
        Arc::new(config),
        TransferEngine::new(),
        RewardConsensus::new(U256::from(BLOCK_REWARD)),
    )
}

/// Ledger where every test key starts with [`INITIAL_BALANCE`].
fn funded_ledger() -> MemLedger {
    let balance = U256::from(INITIAL_BALANCE);
    MemLedger::with_balances(&[
        (alice().address(), balance),
        (bob().address(), balance),
        (authority().address(), balance),
    ])
}

fn signer_at(processor: &TestProcessor, number: u64) -> TxSigner {
    TxSigner::for_rules(&processor.config().rules(number))
}

fn block(number: u64, gas_limit: u64, txs: Vec<Transaction>) -> Block {
    Block::new(test_header(number, gas_limit), txs, Vec::new())
}

fn process(
    processor: &TestProcessor,
    block: &Block,
    ledger: &mut MemLedger,
    election: &mut dyn ElectionContext,
) -> StfResult<ProcessOutput> {
    let chain = MemChain::new();
    processor.process(&chain, block, ledger, election, &ExecConfig::default())
}

fn addr(byte: u8) -> Address {
    Address::with_last_byte(byte)
}
