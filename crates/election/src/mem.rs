use alloy_primitives::Address;

use crate::ElectionContext;

/// In-memory election context holding only the token authority.
///
/// Every mutation hook keeps its default behaviour.
#[derive(Clone, Debug, Default)]
pub struct MemElectionContext {
    token_authority: Option<Address>,
}

impl MemElectionContext {
    pub fn new(token_authority: Option<Address>) -> Self {
        Self { token_authority }
    }

    pub fn set_token_authority(&mut self, authority: Option<Address>) {
        self.token_authority = authority;
    }
}

impl ElectionContext for MemElectionContext {
    fn current_token_authority(&self) -> Option<Address> {
        self.token_authority
    }
}
