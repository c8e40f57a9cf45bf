use alloy_primitives::{Address, B256};
use dpos_chain_types::{Header, Message, TxSigner};
use dpos_params::{ChainConfig, ExecConfig, ForkRules};

use crate::{ChainReader, ExecContext};

/// Per-block values shared by every transaction of the block.
///
/// The fork rules and signer are resolved here once instead of per
/// transaction.
#[derive(Debug)]
pub struct BlockEnv<'a> {
    header: &'a Header,
    block_hash: B256,
    rules: ForkRules,
    signer: TxSigner,
    chain: &'a dyn ChainReader,
    exec_config: &'a ExecConfig,
}

impl<'a> BlockEnv<'a> {
    pub fn new(
        config: &ChainConfig,
        header: &'a Header,
        chain: &'a dyn ChainReader,
        exec_config: &'a ExecConfig,
    ) -> Self {
        let rules = config.rules(header.number);
        Self {
            header,
            block_hash: header.hash(),
            rules,
            signer: TxSigner::for_rules(&rules),
            chain,
            exec_config,
        }
    }

    pub fn header(&self) -> &Header {
        self.header
    }

    pub fn block_hash(&self) -> B256 {
        self.block_hash
    }

    pub fn rules(&self) -> &ForkRules {
        &self.rules
    }

    pub fn signer(&self) -> &TxSigner {
        &self.signer
    }

    pub fn chain(&self) -> &'a dyn ChainReader {
        self.chain
    }

    pub(crate) fn exec_context(&self, msg: &Message, author: Option<Address>) -> ExecContext<'a> {
        ExecContext::new(
            msg,
            self.header,
            self.chain,
            author,
            self.rules,
            self.exec_config,
        )
    }
}
