//! In-memory collaborators for exercising the block processor.

#![allow(unreachable_pub, reason = "test util module")]

use std::{
    cell::Cell,
    collections::{BTreeMap, BTreeSet, HashMap},
    mem,
};

use alloy_primitives::{Address, B256, Bytes, U256, address, keccak256};
pub use dpos_chain_types::test_utils::TestKey;
use dpos_chain_types::{
    Header, Log, Message, Receipt, Transaction, TxCategory, TxSigner, create_address,
};
use dpos_election::{DeployKind, ElectionContext, ElectionError, ElectionResult};

use crate::{
    ChainReader, ConsensusEngine, EngineError, ExecContext, ExecOutcome, ExecutionEngine, GasPool,
    LedgerStore,
};

/// Coinbase used by [`test_header`].
pub const TEST_COINBASE: Address = address!("0000000000000000000000000000000000c0ffee");

/// Base cost of every transaction.
pub const TX_GAS: u64 = 21_000;

/// Base cost of a contract creation from Homestead on.
pub const TX_GAS_CREATION: u64 = 53_000;

const TX_DATA_ZERO_GAS: u64 = 4;
const TX_DATA_NON_ZERO_GAS: u64 = 68;

/// First input byte that makes [`TransferEngine`] revert.
pub const REVERT_MARKER: u8 = 0xfd;

/// Header with fixed test values for everything but number and gas limit.
pub fn test_header(number: u64, gas_limit: u64) -> Header {
    Header {
        parent_hash: keccak256(number.saturating_sub(1).to_be_bytes()),
        coinbase: TEST_COINBASE,
        difficulty: U256::from(1),
        number,
        gas_limit,
        timestamp: 1_700_000_000 + number * 3,
        ..Default::default()
    }
}

/// Canonical chain made of explicitly inserted hashes.
#[derive(Clone, Debug, Default)]
pub struct MemChain {
    hashes: BTreeMap<u64, B256>,
}

impl MemChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: u64, hash: B256) {
        self.hashes.insert(number, hash);
    }
}

impl ChainReader for MemChain {
    fn block_hash(&self, number: u64) -> Option<B256> {
        self.hashes.get(&number).copied()
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
struct Account {
    balance: U256,
    nonce: u64,
}

impl Account {
    fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.nonce == 0
    }
}

/// Ledger backed by ordered maps.
///
/// The "state root" is a keccak over the sorted account list, enough to tell
/// two states apart.
#[derive(Clone, Debug, Default)]
pub struct MemLedger {
    accounts: BTreeMap<Address, Account>,
    touched: BTreeSet<Address>,
    logs: HashMap<B256, Vec<Log>>,
    tx_hash: B256,
    block_hash: B256,
    tx_index: usize,
    block_log_count: usize,
    finalise_calls: usize,
    root_calls: usize,
}

impl MemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with the given balances already committed.
    pub fn with_balances(balances: &[(Address, U256)]) -> Self {
        let mut ledger = Self::new();
        for (addr, balance) in balances {
            ledger.accounts.insert(
                *addr,
                Account {
                    balance: *balance,
                    nonce: 0,
                },
            );
        }
        ledger
    }

    /// Number of times pending changes were committed without a root.
    pub fn finalise_calls(&self) -> usize {
        self.finalise_calls
    }

    /// Number of intermediate roots computed.
    pub fn root_calls(&self) -> usize {
        self.root_calls
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Root over the current state without committing anything.
    pub fn state_root(&self) -> B256 {
        let mut buf = Vec::with_capacity(self.accounts.len() * 60);
        for (addr, acct) in &self.accounts {
            buf.extend_from_slice(addr.as_slice());
            buf.extend_from_slice(&acct.balance.to_be_bytes::<32>());
            buf.extend_from_slice(&acct.nonce.to_be_bytes());
        }
        keccak256(&buf)
    }

    fn touch(&mut self, addr: Address) -> &mut Account {
        self.touched.insert(addr);
        self.accounts.entry(addr).or_default()
    }

    fn commit(&mut self, prune_empty: bool) {
        let touched = mem::take(&mut self.touched);
        if !prune_empty {
            return;
        }
        for addr in touched {
            if self.accounts.get(&addr).is_some_and(Account::is_empty) {
                self.accounts.remove(&addr);
            }
        }
    }
}

impl LedgerStore for MemLedger {
    fn prepare(&mut self, tx_hash: B256, block_hash: B256, tx_index: usize) {
        if block_hash != self.block_hash {
            self.block_log_count = 0;
        }
        self.tx_hash = tx_hash;
        self.block_hash = block_hash;
        self.tx_index = tx_index;
    }

    fn add_log(&mut self, mut log: Log) {
        log.tx_hash = self.tx_hash;
        log.block_hash = self.block_hash;
        log.tx_index = self.tx_index;
        log.log_index = self.block_log_count;
        self.block_log_count += 1;
        self.logs.entry(self.tx_hash).or_default().push(log);
    }

    fn logs(&self, tx_hash: &B256) -> Vec<Log> {
        self.logs.get(tx_hash).cloned().unwrap_or_default()
    }

    fn finalise(&mut self, prune_empty: bool) {
        self.finalise_calls += 1;
        self.commit(prune_empty);
    }

    fn intermediate_root(&mut self, prune_empty: bool) -> B256 {
        self.root_calls += 1;
        self.commit(prune_empty);
        self.state_root()
    }

    fn exists(&self, addr: &Address) -> bool {
        self.accounts.contains_key(addr)
    }

    fn create_account(&mut self, addr: Address) {
        self.accounts.insert(addr, Account::default());
    }

    fn balance(&self, addr: &Address) -> U256 {
        self.accounts.get(addr).map(|a| a.balance).unwrap_or_default()
    }

    fn set_balance(&mut self, addr: Address, amount: U256) {
        self.touch(addr).balance = amount;
    }

    fn nonce(&self, addr: &Address) -> u64 {
        self.accounts.get(addr).map(|a| a.nonce).unwrap_or_default()
    }

    fn set_nonce(&mut self, addr: Address, nonce: u64) {
        self.touch(addr).nonce = nonce;
    }
}

/// Engine that only moves value.
///
/// Charges intrinsic gas and nothing else.  Input starting with
/// [`REVERT_MARKER`] reverts; any other non-empty input is emitted as a log
/// from the recipient with `keccak256(input)` as its only topic.
#[derive(Clone, Debug, Default)]
pub struct TransferEngine {
    calls: Cell<usize>,
    last_coinbase: Cell<Option<Address>>,
}

impl TransferEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages executed so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Fee recipient seen by the last execution.
    pub fn last_coinbase(&self) -> Option<Address> {
        self.last_coinbase.get()
    }
}

/// Gas charged before any execution happens.
pub fn intrinsic_gas(input: &[u8], creation: bool, homestead: bool) -> u64 {
    let base = if creation && homestead {
        TX_GAS_CREATION
    } else {
        TX_GAS
    };
    let zeros = input.iter().filter(|b| **b == 0).count() as u64;
    let non_zeros = input.len() as u64 - zeros;
    base + zeros * TX_DATA_ZERO_GAS + non_zeros * TX_DATA_NON_ZERO_GAS
}

impl<L: LedgerStore + ?Sized> ExecutionEngine<L> for TransferEngine {
    fn execute(
        &self,
        ctx: &ExecContext<'_>,
        msg: &Message,
        ledger: &mut L,
        _gas_pool: &GasPool,
    ) -> Result<ExecOutcome, EngineError> {
        self.calls.set(self.calls.get() + 1);
        self.last_coinbase.set(Some(ctx.coinbase()));

        let from = msg.from();
        let state_nonce = ledger.nonce(&from);
        if msg.nonce() < state_nonce {
            return Err(EngineError::NonceTooLow {
                account: from,
                state: state_nonce,
                tx: msg.nonce(),
            });
        }
        if msg.nonce() > state_nonce {
            return Err(EngineError::NonceTooHigh {
                account: from,
                state: state_nonce,
                tx: msg.nonce(),
            });
        }

        let gas_cost = U256::from(msg.gas_limit())
            .checked_mul(msg.gas_price())
            .ok_or(EngineError::InsufficientFunds(from))?;
        let balance = ledger.balance(&from);
        if balance < gas_cost {
            return Err(EngineError::InsufficientFunds(from));
        }

        let intrinsic = intrinsic_gas(msg.input(), msg.is_creation(), ctx.rules().is_homestead);
        if msg.gas_limit() < intrinsic {
            return Err(EngineError::IntrinsicGas {
                have: msg.gas_limit(),
                want: intrinsic,
            });
        }

        ledger.set_balance(from, balance - gas_cost);
        ledger.set_nonce(from, state_nonce + 1);

        let target = msg.to().unwrap_or_else(|| create_address(from, msg.nonce()));
        let reverted = msg.input().first() == Some(&REVERT_MARKER)
            || ledger.balance(&from) < msg.value();

        if !reverted {
            if !ledger.exists(&target) {
                ledger.create_account(target);
            }
            ledger.set_balance(from, ledger.balance(&from) - msg.value());
            ledger.set_balance(target, ledger.balance(&target) + msg.value());

            if !msg.input().is_empty() {
                ledger.add_log(Log::new(
                    target,
                    vec![keccak256(msg.input())],
                    msg.input().clone(),
                ));
            }
        }

        let gas_used = intrinsic;
        let refund = U256::from(msg.gas_limit() - gas_used) * msg.gas_price();
        ledger.set_balance(from, ledger.balance(&from) + refund);
        let fee = U256::from(gas_used) * msg.gas_price();
        ledger.set_balance(ctx.coinbase(), ledger.balance(&ctx.coinbase()) + fee);

        Ok(ExecOutcome {
            return_data: Bytes::new(),
            gas_used,
            reverted,
        })
    }
}

/// Consensus engine crediting a fixed reward to the block coinbase.
#[derive(Clone, Debug, Default)]
pub struct RewardConsensus {
    reward: U256,
    calls: Cell<usize>,
    last_receipt_count: Cell<usize>,
}

impl RewardConsensus {
    pub fn new(reward: U256) -> Self {
        Self {
            reward,
            ..Default::default()
        }
    }

    /// Number of blocks finalized.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Receipts handed to the last finalize call.
    pub fn last_receipt_count(&self) -> usize {
        self.last_receipt_count.get()
    }
}

impl<L: LedgerStore + ?Sized> ConsensusEngine<L> for RewardConsensus {
    fn finalize(
        &self,
        _chain: &dyn ChainReader,
        header: &Header,
        ledger: &mut L,
        _txs: &[Transaction],
        _uncles: &[Header],
        receipts: &[Receipt],
        _election: &mut dyn ElectionContext,
    ) {
        self.calls.set(self.calls.get() + 1);
        self.last_receipt_count.set(receipts.len());
        let balance = ledger.balance(&header.coinbase);
        ledger.set_balance(header.coinbase, balance.saturating_add(self.reward));
        ledger.finalise(true);
    }
}

/// Election hook call captured by [`RecordingElection`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionEvent {
    Deploy {
        sender: Address,
        kind: DeployKind,
        enabled: bool,
    },
    Register(Address),
    Vote {
        voter: Address,
        candidate: Option<Address>,
    },
    Rotate(Address),
}

/// Election context that records every hook call.
#[derive(Clone, Debug, Default)]
pub struct RecordingElection {
    authority: Option<Address>,
    events: Vec<ElectionEvent>,
    reject_votes: bool,
}

impl RecordingElection {
    pub fn new(authority: Option<Address>) -> Self {
        Self {
            authority,
            ..Default::default()
        }
    }

    /// Makes every `cast_vote` fail.
    pub fn rejecting_votes(mut self) -> Self {
        self.reject_votes = true;
        self
    }

    pub fn events(&self) -> &[ElectionEvent] {
        &self.events
    }
}

impl ElectionContext for RecordingElection {
    fn current_token_authority(&self) -> Option<Address> {
        self.authority
    }

    fn set_deploy_permission(
        &mut self,
        sender: Address,
        kind: DeployKind,
        enabled: bool,
    ) -> ElectionResult<()> {
        self.events.push(ElectionEvent::Deploy {
            sender,
            kind,
            enabled,
        });
        Ok(())
    }

    fn register_candidate(&mut self, candidate: Address) -> ElectionResult<()> {
        self.events.push(ElectionEvent::Register(candidate));
        Ok(())
    }

    fn cast_vote(&mut self, voter: Address, candidate: Option<Address>) -> ElectionResult<()> {
        if self.reject_votes {
            return Err(ElectionError::Backend("votes closed".to_owned()));
        }
        self.events.push(ElectionEvent::Vote { voter, candidate });
        Ok(())
    }

    fn rotate_vote(&mut self, sender: Address) -> ElectionResult<()> {
        self.events.push(ElectionEvent::Rotate(sender));
        Ok(())
    }
}

/// Builder for signed test transactions.
#[derive(Clone, Debug)]
pub struct TxBuilder {
    tag: u8,
    nonce: u64,
    gas_price: U256,
    gas_limit: u64,
    to: Option<Address>,
    value: U256,
    input: Bytes,
}

impl TxBuilder {
    /// Plain call to the zero address with enough gas for a transfer.
    pub fn new(category: TxCategory) -> Self {
        Self::with_tag(category.tag())
    }

    /// Same as [`Self::new`] but with an arbitrary, possibly invalid, tag.
    pub fn with_tag(tag: u8) -> Self {
        Self {
            tag,
            nonce: 0,
            gas_price: U256::from(1),
            gas_limit: TX_GAS,
            to: Some(Address::ZERO),
            value: U256::ZERO,
            input: Bytes::new(),
        }
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = U256::from(gas_price);
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Turns the transaction into a contract creation.
    pub fn create(mut self) -> Self {
        self.to = None;
        self
    }

    pub fn value(mut self, value: u64) -> Self {
        self.value = U256::from(value);
        self
    }

    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(
            self.tag,
            self.nonce,
            self.gas_price,
            self.gas_limit,
            self.to,
            self.value,
            self.input,
        )
    }

    pub fn sign(self, key: &TestKey, signer: &TxSigner) -> Transaction {
        key.sign(self.build(), signer)
    }
}
