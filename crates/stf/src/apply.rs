use alloy_primitives::Address;
use dpos_chain_types::{Receipt, Transaction};
use dpos_election::ElectionContext;
use tracing::*;

use crate::{
    BlockEnv, EngineError, ExecutionEngine, GasPool, LedgerStore, StfResult, dispatch_transaction,
    receipt::build_receipt,
};

/// Applies a single transaction to `ledger` and builds its receipt.
///
/// The caller is expected to have scoped the ledger to the transaction with
/// [`LedgerStore::prepare`].  `author` overrides the header coinbase as the
/// fee recipient, which block production uses before the header is sealed.
///
/// Any error invalidates the containing block, and the state passed in must be
/// discarded along with it.
#[expect(clippy::too_many_arguments, reason = "every collaborator is borrowed separately")]
pub fn apply_transaction<L, E>(
    env: &BlockEnv<'_>,
    engine: &E,
    ledger: &mut L,
    election: &mut dyn ElectionContext,
    gas_pool: &mut GasPool,
    used_gas: &mut u64,
    tx: &Transaction,
    author: Option<Address>,
) -> StfResult<Receipt>
where
    L: LedgerStore + ?Sized,
    E: ExecutionEngine<L> + ?Sized,
{
    let dispatched = dispatch_transaction(tx, env.signer())?;
    let msg = &dispatched.message;
    let rule = dispatched.handler.rule();

    rule.pre_check(msg, election)?;
    gas_pool.check(msg.gas_limit())?;

    let ctx = env.exec_context(msg, author);
    let outcome = engine.execute(&ctx, msg, ledger, gas_pool)?;
    if outcome.gas_used > msg.gas_limit() {
        return Err(EngineError::GasUsedExceedsLimit {
            used: outcome.gas_used,
            limit: msg.gas_limit(),
        }
        .into());
    }
    gas_pool.sub_gas(outcome.gas_used)?;

    if !outcome.reverted {
        rule.post_hook(msg, election)?;
    }

    *used_gas += outcome.gas_used;

    debug!(
        tx_hash = %tx.hash(),
        handler = rule.name(),
        from = %msg.from(),
        gas_used = outcome.gas_used,
        reverted = outcome.reverted,
        "applied transaction"
    );

    Ok(build_receipt(
        env.rules(),
        ledger,
        tx,
        msg,
        &outcome,
        *used_gas,
    ))
}
