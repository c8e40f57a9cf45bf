use dpos_chain_types::{Message, Receipt, Transaction, create_address};
use dpos_params::ForkRules;

use crate::{ExecOutcome, LedgerStore};

/// Builds the receipt for an executed transaction.
///
/// From Byzantium the ledger is only finalised and the receipt carries no
/// post-state; before that the intermediate root is embedded.
pub(crate) fn build_receipt<L: LedgerStore + ?Sized>(
    rules: &ForkRules,
    ledger: &mut L,
    tx: &Transaction,
    msg: &Message,
    outcome: &ExecOutcome,
    cumulative_gas_used: u64,
) -> Receipt {
    let post_state = if rules.has_receipt_root() {
        Some(ledger.intermediate_root(rules.prunes_empty_accounts()))
    } else {
        ledger.finalise(true);
        None
    };

    let contract_address = msg
        .is_creation()
        .then(|| create_address(msg.from(), tx.nonce()));

    let tx_hash = tx.hash();
    Receipt::new(
        post_state,
        !outcome.reverted,
        cumulative_gas_used,
        outcome.gas_used,
        tx_hash,
        contract_address,
        ledger.logs(&tx_hash),
    )
}
