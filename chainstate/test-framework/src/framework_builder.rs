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

use std::{collections::BTreeMap, sync::Arc};

use chainstate::{AssetIndex, AssetIndexConfig, MempoolAssetTracker};
use common::{
    chain::{config, Block, ChainConfig, Destination, Transaction, TxInput, TxOutput},
    primitives::{Amount, BlockHeight, Id, H256},
};

use crate::{utils::test_address, TestFramework};

/// Addresses funded by the genesis block unless told otherwise.
const DEFAULT_FUNDED_ADDRESSES: u8 = 8;
const DEFAULT_FUNDS: Amount = Amount::from_coins(100_000);

/// The builder for TestFramework
pub struct TestFrameworkBuilder {
    chain_config: ChainConfig,
    index_config: AssetIndexConfig,
    funds: Vec<(Destination, Amount)>,
}

impl TestFrameworkBuilder {
    pub fn new() -> Self {
        let funds = (1..=DEFAULT_FUNDED_ADDRESSES)
            .map(|n| (test_address(n), DEFAULT_FUNDS))
            .collect();
        Self {
            chain_config: config::create_regtest(),
            index_config: AssetIndexConfig::default(),
            funds,
        }
    }

    pub fn with_chain_config(mut self, chain_config: ChainConfig) -> Self {
        self.chain_config = chain_config;
        self
    }

    pub fn with_index_config(mut self, index_config: AssetIndexConfig) -> Self {
        self.index_config = index_config;
        self
    }

    /// Replaces the genesis payouts.
    pub fn with_funds(mut self, funds: Vec<(Destination, Amount)>) -> Self {
        self.funds = funds;
        self
    }

    /// Builds the framework and connects the genesis block paying the funded addresses.
    pub fn build(self) -> TestFramework {
        let chain_config = Arc::new(self.chain_config);
        let index = AssetIndex::new(Arc::clone(&chain_config), self.index_config);

        let coinbase = Transaction::new(
            vec![TxInput::Coinbase(BlockHeight::zero())],
            self.funds
                .iter()
                .map(|(destination, amount)| TxOutput::transfer(*amount, *destination))
                .collect(),
        );
        let genesis = Block::new(Id::new(H256::zero()), 0, vec![coinbase]);

        let mut framework = TestFramework {
            chain_config,
            index,
            utxos: BTreeMap::new(),
            mempool: MempoolAssetTracker::new(),
            blocks: Vec::new(),
        };
        framework.process_block(genesis).unwrap();
        framework
    }
}

impl Default for TestFrameworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
