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

use chainstate::{AssetIndex, AssetIndexError, AssetTxError, MempoolAssetTracker};
use common::{
    chain::{Block, ChainConfig, Destination, Transaction, TxOutput, UtxoOutPoint},
    primitives::{Amount, BlockHeight, Id, Idable, H256},
};

use crate::{
    block_builder::BlockBuilder, framework_builder::TestFrameworkBuilder, TestScriptVerifier,
};

/// Outputs a transaction spent, in input order.
type SpentOutputs = Vec<(UtxoOutPoint, TxOutput)>;

/// The chain the asset index runs on in tests: blocks, the UTXO set and the asset
/// claims of the mempool.
pub struct TestFramework {
    pub(crate) chain_config: Arc<ChainConfig>,
    pub index: AssetIndex,
    pub utxos: BTreeMap<UtxoOutPoint, TxOutput>,
    pub mempool: MempoolAssetTracker,
    pub(crate) blocks: Vec<(Block, Vec<SpentOutputs>)>,
}

impl TestFramework {
    pub fn builder() -> TestFrameworkBuilder {
        TestFrameworkBuilder::new()
    }

    pub fn chain_config(&self) -> &Arc<ChainConfig> {
        &self.chain_config
    }

    pub fn make_block_builder(&mut self) -> BlockBuilder<'_> {
        BlockBuilder::new(self)
    }

    pub fn best_block_id(&self) -> Id<Block> {
        self.blocks
            .last()
            .map(|(block, _)| block.get_id())
            .unwrap_or_else(|| Id::new(H256::zero()))
    }

    pub fn tip_height(&self) -> Option<BlockHeight> {
        self.index.tip_height()
    }

    pub fn best_block(&self) -> &Block {
        &self.blocks.last().expect("genesis is always there").0
    }

    /// Connects `block` to the asset index, then applies it to the UTXO set and the
    /// mempool claims.
    pub fn process_block(&mut self, block: Block) -> Result<BlockHeight, AssetIndexError> {
        let height = self.index.connect_block(&block, &self.utxos, &TestScriptVerifier)?;

        let mut spent_per_tx = Vec::with_capacity(block.transactions().len());
        for tx in block.transactions() {
            let spent = tx
                .inputs()
                .iter()
                .filter_map(|input| input.utxo_outpoint())
                .filter_map(|outpoint| {
                    self.utxos.remove(outpoint).map(|output| (*outpoint, output))
                })
                .collect();
            spent_per_tx.push(spent);

            for (index, output) in tx.outputs().iter().enumerate() {
                self.utxos.insert(tx.outpoint(index as u32), output.clone());
            }
        }

        self.mempool.remove_for_block(block.transactions());
        self.blocks.push((block, spent_per_tx));
        Ok(height)
    }

    /// Disconnects the tip block, restoring the outputs it spent.
    pub fn disconnect_tip(&mut self) -> Result<Block, AssetIndexError> {
        let (block, spent_per_tx) = self.blocks.pop().expect("no block to disconnect");
        if let Err(e) = self.index.disconnect_block(&block) {
            self.blocks.push((block, spent_per_tx));
            return Err(e);
        }

        for (tx, spent) in block.transactions().iter().zip(spent_per_tx).rev() {
            for index in 0..tx.outputs().len() {
                self.utxos.remove(&tx.outpoint(index as u32));
            }
            self.utxos.extend(spent);
        }

        Ok(block)
    }

    /// Full validation of `tx` on top of the tip, as the mempool would do it.
    pub fn validate(&self, tx: &Transaction) -> Result<(), AssetTxError> {
        self.index
            .validate_transaction(tx, &self.utxos, &TestScriptVerifier, Some(&self.mempool))
    }

    /// Validates `tx` and claims its asset names in the mempool.
    pub fn add_to_mempool(&mut self, tx: &Transaction) -> Result<(), AssetTxError> {
        self.validate(tx)?;
        self.mempool.add_transaction(tx)
    }

    /// Plain coin outputs held by `owner`.
    pub fn coins_of(&self, owner: &Destination) -> Vec<(UtxoOutPoint, Amount)> {
        self.utxos
            .iter()
            .filter(|(_, output)| {
                output.destination() == Some(*owner)
                    && matches!(output.asset_operation(), Ok(None))
                    && output.value() > Amount::ZERO
            })
            .map(|(outpoint, output)| (*outpoint, output.value()))
            .collect()
    }

    /// A coin of `owner` worth at least `amount`.
    pub fn pick_coin(&self, owner: &Destination, amount: Amount) -> (UtxoOutPoint, Amount) {
        self.coins_of(owner)
            .into_iter()
            .find(|(_, value)| *value >= amount)
            .unwrap_or_else(|| panic!("{owner} has no coin worth {amount:?}"))
    }

    /// Outputs holding `name` for `owner`, as the asset index reports them.
    pub fn asset_outpoints(&self, name: &str, owner: &Destination) -> Vec<(UtxoOutPoint, Amount)> {
        self.index.get_outpoints_by_asset_and_address(name, owner)
    }

    pub fn asset_balance(&self, name: &str, owner: &Destination) -> Amount {
        self.index
            .get_balances_by_address(owner)
            .get(name)
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}
