use std::sync::Arc;

use dpos_chain_types::Block;
use dpos_election::ElectionContext;
use dpos_params::{ChainConfig, ExecConfig};
use tracing::*;

use crate::{
    BlockEnv, ChainReader, ConsensusEngine, ExecutionEngine, GasPool, LedgerStore,
    ProcessOutput, StfResult, apply_dao_hard_fork, apply_transaction,
};

/// Applies whole blocks on top of a ledger.
///
/// Holds the chain configuration and the two pluggable engines.  It keeps no
/// per-block state, so one processor can be shared across blocks.
#[derive(Debug)]
pub struct StateProcessor<E, C> {
    config: Arc<ChainConfig>,
    engine: E,
    consensus: C,
}

impl<E, C> StateProcessor<E, C> {
    pub fn new(config: Arc<ChainConfig>, engine: E, consensus: C) -> Self {
        Self {
            config,
            engine,
            consensus,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn consensus(&self) -> &C {
        &self.consensus
    }

    /// Applies every transaction of `block` in order and finalizes the block.
    ///
    /// Runs the DAO patch first when the block is the configured fork block.
    /// The first failing transaction aborts the whole block.  In that case
    /// nothing is returned and `ledger` and `election` must be discarded.
    pub fn process<L>(
        &self,
        chain: &dyn ChainReader,
        block: &Block,
        ledger: &mut L,
        election: &mut dyn ElectionContext,
        exec_config: &ExecConfig,
    ) -> StfResult<ProcessOutput>
    where
        L: LedgerStore + ?Sized,
        E: ExecutionEngine<L>,
        C: ConsensusEngine<L>,
    {
        let header = block.header();
        let env = BlockEnv::new(&self.config, header, chain, exec_config);
        debug!(
            number = header.number,
            block_hash = %env.block_hash(),
            txs = block.transactions().len(),
            "processing block"
        );

        if let Some(dao) = self.config.dao_fork_at(header.number) {
            apply_dao_hard_fork(ledger, dao)?;
            info!(
                number = header.number,
                drained = dao.drain_list.len(),
                "applied DAO hard fork"
            );
        }

        let mut gas_pool = GasPool::new(header.gas_limit);
        let mut used_gas = 0u64;
        let mut receipts = Vec::with_capacity(block.transactions().len());
        let mut logs = Vec::new();

        for (i, tx) in block.transactions().iter().enumerate() {
            let tx_hash = tx.hash();
            ledger.prepare(tx_hash, env.block_hash(), i);

            let receipt = apply_transaction(
                &env,
                &self.engine,
                ledger,
                election,
                &mut gas_pool,
                &mut used_gas,
                tx,
                None,
            )
            .inspect_err(|e| {
                warn!(
                    number = header.number,
                    tx_index = i,
                    %tx_hash,
                    err = %e,
                    "transaction rejected block"
                );
            })?;

            logs.extend_from_slice(receipt.logs());
            receipts.push(receipt);
        }

        self.consensus.finalize(
            chain,
            header,
            ledger,
            block.transactions(),
            block.uncles(),
            &receipts,
            election,
        );

        debug!(number = header.number, gas_used = used_gas, "processed block");
        Ok(ProcessOutput::new(receipts, logs, used_gas))
    }
}
