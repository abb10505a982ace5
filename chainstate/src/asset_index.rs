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

use accounting::BlockUndo;
use assets_accounting::{
    AssetData, AssetsAccountingCache, AssetsAccountingDB, AssetsAccountingOperations,
    AssetsAccountingUndo, AssetsAccountingView, FlushableAssetsAccountingView,
    InMemoryAssetsAccounting,
};
use common::{
    chain::{Block, ChainConfig, Destination, Transaction, UtxoOutPoint},
    primitives::{Amount, BlockHeight, Id, Idable},
};
use logging::log;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use utils::ensure;
use verifier_string::{QualifierTags, VerifierStringError};

use crate::{
    config::AssetIndexConfig,
    error::{AssetIndexError, AssetTxError},
    mempool::MempoolAssetTracker,
    tx_verifier::{self, QualifierView},
    utxo::{InputScriptVerifier, UtxoOverlay, UtxoSource},
};

struct IndexState {
    storage: InMemoryAssetsAccounting,
    undos: BTreeMap<Id<Block>, (BlockHeight, BlockUndo<AssetsAccountingUndo>)>,
    tip: Option<(Id<Block>, BlockHeight)>,
}

/// The asset index at the chain tip.
///
/// Blocks are validated and applied into a cache; the committed state changes only when
/// a whole block succeeds, under the write lock. Readers see the state either before or
/// after a block, never in between.
pub struct AssetIndex {
    chain_config: Arc<ChainConfig>,
    config: AssetIndexConfig,
    state: RwLock<IndexState>,
}

impl AssetIndex {
    pub fn new(chain_config: Arc<ChainConfig>, config: AssetIndexConfig) -> Self {
        Self {
            chain_config,
            config,
            state: RwLock::new(IndexState {
                storage: InMemoryAssetsAccounting::new(),
                undos: BTreeMap::new(),
                tip: None,
            }),
        }
    }

    pub fn chain_config(&self) -> &Arc<ChainConfig> {
        &self.chain_config
    }

    pub fn config(&self) -> &AssetIndexConfig {
        &self.config
    }

    pub fn tip(&self) -> Option<(Id<Block>, BlockHeight)> {
        self.state.read().tip
    }

    pub fn tip_height(&self) -> Option<BlockHeight> {
        self.tip().map(|(_, height)| height)
    }

    /// Height a transaction accepted now would be mined at.
    fn next_height(tip: Option<(Id<Block>, BlockHeight)>) -> Result<BlockHeight, AssetIndexError> {
        match tip {
            Some((_, height)) => height.checked_add(1).ok_or(AssetIndexError::HeightOverflow),
            None => Ok(BlockHeight::zero()),
        }
    }

    /// Validates `block` against the current state and applies it.
    ///
    /// `utxos` is the UTXO set the block builds on; outputs created earlier in the block
    /// are resolved internally.
    pub fn connect_block<U, S>(
        &self,
        block: &Block,
        utxos: &U,
        script_verifier: &S,
    ) -> Result<BlockHeight, AssetIndexError>
    where
        U: UtxoSource,
        S: InputScriptVerifier,
    {
        let block_id = block.get_id();
        let state = self.state.upgradable_read();

        if let Some((tip_id, _)) = state.tip {
            ensure!(
                block.prev_block_id() == tip_id,
                AssetIndexError::NotOnTip(block_id)
            );
        }
        let height = Self::next_height(state.tip)?;

        let mut cache = AssetsAccountingCache::new(AssetsAccountingDB::new(&state.storage));
        let mut overlay = UtxoOverlay::new(utxos);
        let mut block_undo = BlockUndo::default();

        for tx in block.transactions() {
            let tx_id = tx.get_id();
            let reject = |e: AssetTxError| AssetIndexError::TxRejected(tx_id, e);

            tx_verifier::check_transaction(
                &self.chain_config,
                &cache,
                &overlay,
                script_verifier,
                tx,
                height,
                None,
            )
            .map_err(reject)?;

            let tx_undo = tx_verifier::connect_transaction_assets(&mut cache, &overlay, tx, height)
                .map_err(reject)?;
            if !tx_undo.inner().is_empty() {
                block_undo.insert_tx_undo(tx_id, tx_undo)?;
            }

            overlay.apply_transaction(tx);
        }

        let delta = cache.consume();

        let mut storage = state.storage.clone();
        // The per-transaction undo in `BlockUndo` is what disconnect replays.
        let _flush_undo = AssetsAccountingDB::new(&mut storage).batch_write_assets_data(delta)?;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.storage = storage;
        state.undos.insert(block_id, (height, block_undo));
        state.tip = Some((block_id, height));

        let max_depth = self.config.max_reorg_depth;
        state.undos.retain(|_, (undo_height, _)| {
            undo_height.checked_add(max_depth).is_none_or(|limit| limit >= height)
        });

        log::info!("Connected block {block_id} at height {height} to the asset index");
        Ok(height)
    }

    /// Undoes the tip block.
    pub fn disconnect_block(&self, block: &Block) -> Result<(), AssetIndexError> {
        let block_id = block.get_id();
        let state = self.state.upgradable_read();

        let height = match state.tip {
            Some((tip_id, height)) if tip_id == block_id => height,
            _ => return Err(AssetIndexError::DisconnectNotTip(block_id)),
        };
        let (_, mut block_undo) = state
            .undos
            .get(&block_id)
            .cloned()
            .ok_or(AssetIndexError::UndoNotFound(block_id))?;

        let mut cache = AssetsAccountingCache::new(AssetsAccountingDB::new(&state.storage));
        for tx in block.transactions().iter().rev() {
            let Some(tx_undo) = block_undo.take_tx_undo(&tx.get_id()) else {
                continue;
            };
            for undo in tx_undo.into_inner().into_iter().rev() {
                cache.undo(undo)?;
            }
        }
        let delta = cache.consume();

        let mut storage = state.storage.clone();
        let _flush_undo = AssetsAccountingDB::new(&mut storage).batch_write_assets_data(delta)?;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.storage = storage;
        state.undos.remove(&block_id);
        state.tip = height.prev_height().map(|prev| (block.prev_block_id(), prev));

        log::info!("Disconnected block {block_id} at height {height} from the asset index");
        Ok(())
    }

    /// Full asset validation of a transaction against the current tip.
    pub fn validate_transaction<U, S>(
        &self,
        tx: &Transaction,
        utxos: &U,
        script_verifier: &S,
        mempool: Option<&MempoolAssetTracker>,
    ) -> Result<(), AssetTxError>
    where
        U: UtxoSource,
        S: InputScriptVerifier,
    {
        let state = self.state.read();
        let spend_height = match state.tip {
            Some((_, height)) => height.next_height(),
            None => BlockHeight::zero(),
        };
        let view = AssetsAccountingDB::new(&state.storage);
        tx_verifier::check_transaction(
            &self.chain_config,
            &view,
            utxos,
            script_verifier,
            tx,
            spend_height,
            mempool,
        )
        .inspect_err(|e| log::debug!("Transaction {} rejected: {e}", tx.get_id()))
    }

    pub fn get_asset_metadata(&self, name: &str) -> Result<Option<AssetData>, AssetIndexError> {
        let state = self.state.read();
        Ok(AssetsAccountingDB::new(&state.storage).get_asset_data(name)?)
    }

    /// Non-zero balances of an address, by asset name.
    pub fn get_balances_by_address(&self, address: &Destination) -> BTreeMap<String, Amount> {
        self.state.read().storage.balances_by_address(address)
    }

    pub fn get_outpoints_by_asset_and_address(
        &self,
        name: &str,
        address: &Destination,
    ) -> Vec<(UtxoOutPoint, Amount)> {
        self.state.read().storage.outpoints_by_asset_and_address(name, address)
    }

    /// Assets matching `pattern`, in name order. A trailing `*` matches any suffix.
    ///
    /// At most `count` entries are returned, capped by the configured maximum, after
    /// skipping `start` matches.
    pub fn list_assets(&self, pattern: &str, count: Option<usize>, start: usize) -> Vec<AssetData> {
        let count = count.unwrap_or(self.config.max_list_assets).min(self.config.max_list_assets);
        let matches = |name: &str| match pattern.strip_suffix('*') {
            Some(prefix) => name.starts_with(prefix),
            None => name == pattern,
        };

        self.state
            .read()
            .storage
            .assets()
            .filter(|data| matches(data.name()))
            .skip(start)
            .take(count)
            .cloned()
            .collect()
    }

    pub fn get_asset_holders(&self, name: &str) -> BTreeMap<Destination, Amount> {
        self.state.read().storage.asset_holders(name)
    }

    pub fn get_verifier_string(&self, name: &str) -> Result<Option<String>, AssetIndexError> {
        let state = self.state.read();
        Ok(AssetsAccountingDB::new(&state.storage).get_verifier(name)?)
    }

    /// True if `address` carries `qualifier`, directly or through one of its sub-qualifiers.
    pub fn check_address_tag(&self, address: &Destination, qualifier: &str) -> bool {
        let state = self.state.read();
        let view = AssetsAccountingDB::new(&state.storage);
        QualifierView::new(&view).has_tag(qualifier, address)
    }

    pub fn list_tags_for_address(&self, address: &Destination) -> Vec<String> {
        self.state.read().storage.tags_for_address(address)
    }

    pub fn list_addresses_for_tag(&self, qualifier: &str) -> Vec<Destination> {
        self.state.read().storage.addresses_for_tag(qualifier)
    }

    pub fn list_frozen_addresses(&self, asset: &str) -> Vec<Destination> {
        self.state.read().storage.frozen_addresses(asset)
    }

    /// True if `address` is frozen for the restricted `asset`.
    pub fn check_address_restriction(
        &self,
        address: &Destination,
        asset: &str,
    ) -> Result<bool, AssetIndexError> {
        let state = self.state.read();
        let record = AssetsAccountingDB::new(&state.storage).get_address_freeze(asset, address)?;
        Ok(record.is_some_and(|record| record.frozen))
    }

    pub fn check_global_restriction(&self, asset: &str) -> Result<bool, AssetIndexError> {
        let state = self.state.read();
        let record = AssetsAccountingDB::new(&state.storage).get_global_freeze(asset)?;
        Ok(record.is_some_and(|record| record.frozen))
    }

    /// Syntax check of a verifier string plus the check that its qualifiers were issued.
    pub fn is_valid_verifier_string(&self, verifier: &str) -> Result<(), VerifierStringError> {
        let state = self.state.read();
        let view = AssetsAccountingDB::new(&state.storage);
        verifier_string::is_valid_verifier_string(verifier, &QualifierView::new(&view))?;
        Ok(())
    }
}
