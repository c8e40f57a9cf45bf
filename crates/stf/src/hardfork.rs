use alloy_primitives::U256;
use dpos_params::DaoForkParams;
use tracing::*;

use crate::{HardForkError, LedgerStore};

/// Moves every drain-list balance into the refund contract.
///
/// Creates the refund contract first if it does not exist yet.  Drained
/// accounts keep existing with a zero balance.
pub fn apply_dao_hard_fork<L: LedgerStore + ?Sized>(
    ledger: &mut L,
    params: &DaoForkParams,
) -> Result<(), HardForkError> {
    let refund = params.refund_contract;
    if !ledger.exists(&refund) {
        ledger.create_account(refund);
    }

    let mut refund_balance = ledger.balance(&refund);
    for addr in &params.drain_list {
        if *addr == refund {
            continue;
        }
        let drained = ledger.balance(addr);
        refund_balance = refund_balance
            .checked_add(drained)
            .ok_or(HardForkError::BalanceOverflow(refund))?;
        ledger.set_balance(*addr, U256::ZERO);
        trace!(%addr, %drained, "drained account");
    }
    ledger.set_balance(refund, refund_balance);

    Ok(())
}
