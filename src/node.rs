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

use std::sync::Arc;

use chainstate::{
    AssetIndex, AssetIndexError, AssetTxError, InputScriptVerifier, MempoolAssetTracker,
    UtxoSource,
};
use common::{
    chain::{Block, ChainConfig, Transaction},
    primitives::{BlockHeight, Id},
};
use logging::log;
use messaging::{AddressOwnership, Message, MessageStore, MessagingError};
use rewards::{
    DistributionRequest, DistributionStatus, PayoutWallet, RewardsEngine, RewardsError, Snapshot,
};

use crate::config_file::NodeConfigFile;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Asset index error: {0}")]
    Index(#[from] AssetIndexError),
    #[error("Rewards error: {0}")]
    Rewards(#[from] RewardsError),
    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),
}

/// The asset index together with the services that follow its tip.
pub struct AssetsNode {
    index: AssetIndex,
    mempool: MempoolAssetTracker,
    rewards: RewardsEngine,
    messages: MessageStore,
}

impl AssetsNode {
    pub fn new(chain_config: Arc<ChainConfig>, config: &NodeConfigFile) -> Result<Self, NodeError> {
        Ok(Self {
            index: AssetIndex::new(Arc::clone(&chain_config), config.asset_index_config()),
            mempool: MempoolAssetTracker::new(),
            rewards: RewardsEngine::new(Arc::clone(&chain_config), config.rewards_config())?,
            messages: MessageStore::new(chain_config, config.messaging_config()),
        })
    }

    pub fn index(&self) -> &AssetIndex {
        &self.index
    }

    pub fn rewards(&self) -> &RewardsEngine {
        &self.rewards
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageStore {
        &mut self.messages
    }

    /// Height of the tip, genesis if nothing was connected yet.
    pub fn tip_height(&self) -> BlockHeight {
        self.index.tip_height().unwrap_or_default()
    }

    /// Connects `block`, then takes the due snapshots, retries the pending distributions
    /// and collects the block's messages.
    pub fn connect_block<U, S, W>(
        &mut self,
        block: &Block,
        utxos: &U,
        script_verifier: &S,
        wallet: &mut W,
    ) -> Result<BlockHeight, NodeError>
    where
        U: UtxoSource,
        S: InputScriptVerifier,
        W: PayoutWallet + AddressOwnership,
    {
        let height = self.index.connect_block(block, utxos, script_verifier)?;
        self.mempool.remove_for_block(block.transactions());
        self.messages.on_block_connected(block, height, &*wallet);
        self.rewards.on_block_connected(height, &self.index, wallet);
        Ok(height)
    }

    pub fn disconnect_block(&mut self, block: &Block) -> Result<(), NodeError> {
        let height = self.tip_height();
        self.index.disconnect_block(block)?;
        self.rewards.on_block_disconnected(height);
        self.messages.on_block_disconnected(height);
        log::debug!("Services rolled back from height {height}");
        Ok(())
    }

    /// Validates `tx` against the tip and the pending transactions, then claims its
    /// issued names.
    pub fn accept_to_mempool<U, S>(
        &mut self,
        tx: &Transaction,
        utxos: &U,
        script_verifier: &S,
    ) -> Result<(), AssetTxError>
    where
        U: UtxoSource,
        S: InputScriptVerifier,
    {
        self.index.validate_transaction(tx, utxos, script_verifier, Some(&self.mempool))?;
        self.mempool.add_transaction(tx)
    }

    pub fn remove_from_mempool(&mut self, tx: &Transaction) {
        self.mempool.remove_transaction(tx);
    }

    pub fn request_snapshot(
        &mut self,
        asset: &str,
        height: BlockHeight,
    ) -> Result<bool, NodeError> {
        let tip = self.tip_height();
        Ok(self.rewards.request_snapshot(asset, height, tip)?)
    }

    pub fn get_snapshot(&self, asset: &str, height: BlockHeight) -> Result<&Snapshot, NodeError> {
        Ok(self.rewards.get_snapshot(asset, height)?)
    }

    pub fn distribute_reward(
        &mut self,
        request: DistributionRequest,
        wallet: &mut impl PayoutWallet,
    ) -> Result<(Id<DistributionRequest>, DistributionStatus), NodeError> {
        let tip = self.tip_height();
        Ok(self.rewards.distribute_reward(request, tip, &self.index, wallet)?)
    }

    pub fn get_distribution_status(
        &self,
        id: &Id<DistributionRequest>,
    ) -> Result<DistributionStatus, NodeError> {
        Ok(self.rewards.get_distribution_status(id)?)
    }

    pub fn subscribe_to_channel(&mut self, channel: &str) -> Result<bool, NodeError> {
        let tip = self.tip_height();
        Ok(self.messages.subscribe(channel, tip)?)
    }

    pub fn view_all_messages(&mut self, now: u64) -> Vec<Message> {
        self.messages.view_all_messages(now)
    }
}
