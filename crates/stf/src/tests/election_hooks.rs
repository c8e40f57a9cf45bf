use dpos_chain_types::TxCategory;
use dpos_election::{DeployKind, ElectionError};
use dpos_params::ChainConfig;

use super::*;
use crate::{
    StfError,
    test_utils::{ElectionEvent, REVERT_MARKER, RecordingElection, TxBuilder},
};

fn run(txs: Vec<Transaction>, election: &mut RecordingElection) -> StfResult<ProcessOutput> {
    let processor = new_processor(ChainConfig::all_forks_at_genesis(CHAIN_ID));
    let blk = block(1, BLOCK_GAS_LIMIT, txs);
    process(&processor, &blk, &mut funded_ledger(), election)
}

fn signer() -> TxSigner {
    TxSigner::Eip155 { chain_id: CHAIN_ID }
}

#[test]
fn test_deploy_toggles_are_reported() {
    let alice = alice();
    let categories = [
        TxCategory::EnableVoteDeploy,
        TxCategory::EnableTokenAssignDeploy,
        TxCategory::DisableVoteDeploy,
        TxCategory::DisableTokenAssignDeploy,
    ];
    let txs = categories
        .iter()
        .zip(0u64..)
        .map(|(category, nonce)| {
            TxBuilder::new(*category)
                .nonce(nonce)
                .sign(&alice, &signer())
        })
        .collect();

    let mut election = RecordingElection::default();
    run(txs, &mut election).unwrap();

    let sender = alice.address();
    assert_eq!(
        election.events(),
        &[
            ElectionEvent::Deploy {
                sender,
                kind: DeployKind::Vote,
                enabled: true
            },
            ElectionEvent::Deploy {
                sender,
                kind: DeployKind::TokenAssign,
                enabled: true
            },
            ElectionEvent::Deploy {
                sender,
                kind: DeployKind::Vote,
                enabled: false
            },
            ElectionEvent::Deploy {
                sender,
                kind: DeployKind::TokenAssign,
                enabled: false
            },
        ]
    );
}

#[test]
fn test_election_transactions_are_reported() {
    let (alice, bob) = (alice(), bob());
    let candidate = addr(0x01);

    let txs = vec![
        TxBuilder::new(TxCategory::RegisterCandidate).sign(&bob, &signer()),
        TxBuilder::new(TxCategory::CastVote)
            .to(candidate)
            .sign(&alice, &signer()),
        TxBuilder::new(TxCategory::RotateVote)
            .nonce(1)
            .sign(&alice, &signer()),
    ];

    let mut election = RecordingElection::default();
    let output = run(txs, &mut election).unwrap();

    assert_eq!(output.receipts().len(), 3);
    assert_eq!(
        election.events(),
        &[
            ElectionEvent::Register(bob.address()),
            ElectionEvent::Vote {
                voter: alice.address(),
                candidate: Some(candidate),
            },
            ElectionEvent::Rotate(alice.address()),
        ]
    );
}

#[test]
fn test_general_transactions_skip_hooks() {
    let alice = alice();
    let txs = vec![
        TxBuilder::new(TxCategory::Transfer)
            .to(addr(0x02))
            .value(3)
            .sign(&alice, &signer()),
    ];

    let mut election = RecordingElection::default();
    run(txs, &mut election).unwrap();
    assert!(election.events().is_empty());
}

#[test]
fn test_reverted_transaction_skips_hook() {
    let alice = alice();
    let txs = vec![
        TxBuilder::new(TxCategory::CastVote)
            .to(addr(0x03))
            .gas_limit(30_000)
            .input(vec![REVERT_MARKER])
            .sign(&alice, &signer()),
    ];

    let mut election = RecordingElection::default();
    let output = run(txs, &mut election).unwrap();

    assert!(!output.receipts()[0].success());
    assert!(election.events().is_empty());
}

#[test]
fn test_hook_failure_aborts_block() {
    let alice = alice();
    let txs = vec![
        TxBuilder::new(TxCategory::RegisterCandidate).sign(&alice, &signer()),
        TxBuilder::new(TxCategory::CastVote)
            .nonce(1)
            .to(addr(0x04))
            .sign(&alice, &signer()),
    ];

    let mut election = RecordingElection::default().rejecting_votes();
    let err = run(txs, &mut election).unwrap_err();

    assert!(matches!(err, StfError::Election(ElectionError::Backend(_))));
    assert_eq!(
        election.events(),
        &[ElectionEvent::Register(alice.address())]
    );
}
