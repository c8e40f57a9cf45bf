//! Per-category checks and election hooks.
//!
//! Every category shares the same execution skeleton in [`crate::apply`];
//! what differs is captured by a [`CategoryRule`] looked up from the handler
//! kind.

use std::fmt;

use dpos_chain_types::{Message, TxCategory};
use dpos_election::{DeployKind, ElectionContext};
use tracing::*;

use crate::{HandlerKind, StfError, StfResult};

/// Runs before execution.  An error rejects the block.
pub(crate) type PreCheckFn = fn(&Message, &dyn ElectionContext) -> StfResult<()>;

/// Runs after a successful execution.
pub(crate) type PostHookFn = fn(&Message, &mut dyn ElectionContext) -> StfResult<()>;

pub(crate) struct CategoryRule {
    name: &'static str,
    pre_check: PreCheckFn,
    post_hook: PostHookFn,
}

impl CategoryRule {
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn pre_check(&self, msg: &Message, election: &dyn ElectionContext) -> StfResult<()> {
        (self.pre_check)(msg, election)
    }

    pub(crate) fn post_hook(
        &self,
        msg: &Message,
        election: &mut dyn ElectionContext,
    ) -> StfResult<()> {
        (self.post_hook)(msg, election)
    }
}

impl fmt::Debug for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const GENERAL: CategoryRule = CategoryRule {
    name: "general",
    pre_check: no_check,
    post_hook: no_hook,
};

const DEPLOY_ENABLE: CategoryRule = CategoryRule {
    name: "deploy-enable",
    pre_check: no_check,
    post_hook: enable_deploy_hook,
};

const DEPLOY_DISABLE: CategoryRule = CategoryRule {
    name: "deploy-disable",
    pre_check: no_check,
    post_hook: disable_deploy_hook,
};

const ELECTION: CategoryRule = CategoryRule {
    name: "election",
    pre_check: no_check,
    post_hook: election_hook,
};

const TOKEN: CategoryRule = CategoryRule {
    name: "token",
    pre_check: check_token_authority,
    post_hook: no_hook,
};

impl HandlerKind {
    pub(crate) fn rule(self) -> &'static CategoryRule {
        match self {
            HandlerKind::General => &GENERAL,
            HandlerKind::DeployEnable => &DEPLOY_ENABLE,
            HandlerKind::DeployDisable => &DEPLOY_DISABLE,
            HandlerKind::Election => &ELECTION,
            HandlerKind::Token => &TOKEN,
        }
    }
}

fn no_check(_msg: &Message, _election: &dyn ElectionContext) -> StfResult<()> {
    Ok(())
}

fn no_hook(_msg: &Message, _election: &mut dyn ElectionContext) -> StfResult<()> {
    Ok(())
}

fn check_token_authority(msg: &Message, election: &dyn ElectionContext) -> StfResult<()> {
    let expected = election.current_token_authority();
    if expected != Some(msg.from()) {
        debug!(sender = %msg.from(), ?expected, "token transaction from non-authority");
        return Err(StfError::AuthorityMismatch {
            expected,
            got: msg.from(),
        });
    }
    Ok(())
}

fn deploy_kind(category: TxCategory) -> Option<DeployKind> {
    match category {
        TxCategory::EnableVoteDeploy | TxCategory::DisableVoteDeploy => Some(DeployKind::Vote),
        TxCategory::EnableTokenAssignDeploy | TxCategory::DisableTokenAssignDeploy => {
            Some(DeployKind::TokenAssign)
        }
        _ => None,
    }
}

fn set_deploy(msg: &Message, election: &mut dyn ElectionContext, enabled: bool) -> StfResult<()> {
    if let Some(kind) = deploy_kind(msg.category()) {
        election.set_deploy_permission(msg.from(), kind, enabled)?;
    }
    Ok(())
}

fn enable_deploy_hook(msg: &Message, election: &mut dyn ElectionContext) -> StfResult<()> {
    set_deploy(msg, election, true)
}

fn disable_deploy_hook(msg: &Message, election: &mut dyn ElectionContext) -> StfResult<()> {
    set_deploy(msg, election, false)
}

fn election_hook(msg: &Message, election: &mut dyn ElectionContext) -> StfResult<()> {
    match msg.category() {
        TxCategory::RegisterCandidate => election.register_candidate(msg.from())?,
        TxCategory::CastVote => election.cast_vote(msg.from(), msg.to())?,
        TxCategory::RotateVote => election.rotate_vote(msg.from())?,
        _ => {}
    }
    Ok(())
}
