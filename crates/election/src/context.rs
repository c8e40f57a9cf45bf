use alloy_primitives::Address;

use crate::ElectionResult;

/// Which category of privileged transactions a deploy toggle applies to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeployKind {
    /// Candidate registration and vote casting.
    Vote,

    /// Token assignment and producer rewards.
    TokenAssign,
}

/// Authority and voting state consulted while applying a block.
///
/// The mutation hooks are extension points.  Their default bodies do nothing,
/// so an implementor that does not track a given event needs no code for it.
pub trait ElectionContext {
    /// Account currently allowed to send token distribution transactions.
    ///
    /// `None` means no authority is designated and every such transaction is
    /// rejected.
    fn current_token_authority(&self) -> Option<Address>;

    /// Records that `sender` enabled or disabled a class of privileged
    /// transactions chain-wide.
    fn set_deploy_permission(
        &mut self,
        _sender: Address,
        _kind: DeployKind,
        _enabled: bool,
    ) -> ElectionResult<()> {
        Ok(())
    }

    /// Records a candidate registration.
    fn register_candidate(&mut self, _candidate: Address) -> ElectionResult<()> {
        Ok(())
    }

    /// Records a vote from `voter` for `candidate`.
    fn cast_vote(&mut self, _voter: Address, _candidate: Option<Address>) -> ElectionResult<()> {
        Ok(())
    }

    /// Records a request to rotate the producer set.
    fn rotate_vote(&mut self, _sender: Address) -> ElectionResult<()> {
        Ok(())
    }
}
