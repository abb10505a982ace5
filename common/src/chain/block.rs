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

use serialization::{Decode, Encode};

use super::Transaction;
use crate::primitives::{hash_encoded, Id, Idable, H256};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BlockHeader {
    prev_block_id: Id<Block>,
    tx_root: H256,
    timestamp: u64,
}

impl BlockHeader {
    pub fn prev_block_id(&self) -> Id<Block> {
        self.prev_block_id
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Block {
    header: BlockHeader,
    transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(prev_block_id: Id<Block>, timestamp: u64, transactions: Vec<Transaction>) -> Self {
        let tx_ids: Vec<_> = transactions.iter().map(Idable::get_id).collect();
        let header = BlockHeader {
            prev_block_id,
            tx_root: hash_encoded(&tx_ids),
            timestamp,
        };
        Self {
            header,
            transactions,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn prev_block_id(&self) -> Id<Block> {
        self.header.prev_block_id
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl Idable for Block {
    type Tag = Block;

    fn get_id(&self) -> Id<Block> {
        Id::new(hash_encoded(&self.header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chain::TxInput,
        primitives::{BlockHeight, H256},
    };

    #[test]
    fn block_id_commits_to_transactions() {
        let prev = Id::new(H256::zero());
        let tx = |h| Transaction::new(vec![TxInput::Coinbase(BlockHeight::new(h))], vec![]);
        let a = Block::new(prev, 10, vec![tx(1)]);
        let b = Block::new(prev, 10, vec![tx(2)]);
        assert_ne!(a.get_id(), b.get_id());
        assert_eq!(a.prev_block_id(), prev);
        assert_eq!(a.transactions().len(), 1);
    }
}
