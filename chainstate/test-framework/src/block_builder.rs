// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chainstate::AssetIndexError;
use common::{
    chain::{Block, Transaction},
    primitives::{BlockHeight, Id},
};

use crate::TestFramework;

/// The block builder that allows construction and processing of a block.
pub struct BlockBuilder<'f> {
    framework: &'f mut TestFramework,
    transactions: Vec<Transaction>,
    prev_block_id: Id<Block>,
    timestamp: u64,
}

impl<'f> BlockBuilder<'f> {
    pub fn new(framework: &'f mut TestFramework) -> Self {
        let prev_block_id = framework.best_block_id();
        let timestamp = framework.best_block().timestamp() + 1;
        Self {
            framework,
            transactions: Vec::new(),
            prev_block_id,
            timestamp,
        }
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn add_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn with_parent(mut self, prev_block_id: Id<Block>) -> Self {
        self.prev_block_id = prev_block_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> Block {
        Block::new(self.prev_block_id, self.timestamp, self.transactions)
    }

    pub fn build_and_process(self) -> Result<BlockHeight, AssetIndexError> {
        let block = Block::new(self.prev_block_id, self.timestamp, self.transactions);
        self.framework.process_block(block)
    }
}
