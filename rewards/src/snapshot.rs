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

use std::collections::{BTreeMap, BTreeSet};

use common::{
    chain::{assets::name, Destination},
    primitives::{Amount, BlockHeight},
};
use logging::log;
use utils::ensure;

use crate::{
    error::{Result, RewardsError},
    holders::AssetHolders,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnapshotRequest {
    pub asset: String,
    pub height: BlockHeight,
}

/// Holders of an asset right after the block at `height` was connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub asset: String,
    pub height: BlockHeight,
    pub holders: BTreeMap<Destination, Amount>,
}

impl Snapshot {
    pub fn total(&self) -> Option<Amount> {
        self.holders.values().try_fold(Amount::ZERO, |acc, amount| acc + *amount)
    }
}

/// Snapshot requests and the snapshots taken for them.
///
/// Requests outlive their snapshots, so a height connected again after a reorg is
/// captured again from the new chain.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    requests: BTreeSet<(BlockHeight, String)>,
    snapshots: BTreeMap<(String, BlockHeight), Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request. Returns false if it was already there.
    pub fn request_snapshot(
        &mut self,
        asset: &str,
        height: BlockHeight,
        tip: BlockHeight,
    ) -> Result<bool> {
        ensure!(
            name::is_valid(asset),
            RewardsError::InvalidAssetName(asset.to_owned())
        );
        ensure!(
            height > tip,
            RewardsError::SnapshotHeightNotAboveTip { height, tip }
        );

        let added = self.requests.insert((height, asset.to_owned()));
        if added {
            log::info!("Snapshot of {asset} requested at height {height}");
        }
        Ok(added)
    }

    pub fn cancel_snapshot_request(&mut self, asset: &str, height: BlockHeight) -> Result<()> {
        ensure!(
            self.requests.remove(&(height, asset.to_owned())),
            RewardsError::SnapshotRequestNotFound(asset.to_owned(), height)
        );
        self.snapshots.remove(&(asset.to_owned(), height));
        log::info!("Snapshot request of {asset} at height {height} cancelled");
        Ok(())
    }

    /// Requests matching both filters, by height then asset name.
    pub fn list_snapshot_requests(
        &self,
        asset: Option<&str>,
        height: Option<BlockHeight>,
    ) -> Vec<SnapshotRequest> {
        self.requests
            .iter()
            .filter(|(h, a)| {
                asset.is_none_or(|asset| asset == a) && height.is_none_or(|height| height == *h)
            })
            .map(|(height, asset)| SnapshotRequest {
                asset: asset.clone(),
                height: *height,
            })
            .collect()
    }

    pub fn get_snapshot(&self, asset: &str, height: BlockHeight) -> Result<&Snapshot> {
        self.snapshots
            .get(&(asset.to_owned(), height))
            .ok_or_else(|| RewardsError::SnapshotNotFound(asset.to_owned(), height))
    }

    /// Takes the snapshots requested for `height` from the state after the block.
    pub fn on_block_connected(&mut self, height: BlockHeight, holders: &impl AssetHolders) {
        let assets: Vec<String> = self
            .requests
            .range((height, String::new())..)
            .take_while(|(h, _)| *h == height)
            .map(|(_, asset)| asset.clone())
            .collect();

        for asset in assets {
            let snapshot = Snapshot {
                asset: asset.clone(),
                height,
                holders: holders.asset_holders(&asset),
            };
            log::info!(
                "Snapshot of {asset} taken at height {height} with {} holders",
                snapshot.holders.len()
            );
            self.snapshots.insert((asset, height), snapshot);
        }
    }

    pub fn on_block_disconnected(&mut self, height: BlockHeight) {
        let before = self.snapshots.len();
        self.snapshots.retain(|(_, h), _| *h != height);
        let dropped = before - self.snapshots.len();
        if dropped > 0 {
            log::info!("Dropped {dropped} snapshots of disconnected height {height}");
        }
    }
}

#[cfg(test)]
mod tests {
    use common::primitives::H160;

    use super::*;

    fn address(n: u8) -> Destination {
        Destination::PublicKeyHash(H160::repeat_byte(n))
    }

    struct Holders(BTreeMap<String, BTreeMap<Destination, Amount>>);

    impl AssetHolders for Holders {
        fn asset_holders(&self, asset: &str) -> BTreeMap<Destination, Amount> {
            self.0.get(asset).cloned().unwrap_or_default()
        }

        fn asset_units(&self, asset: &str) -> Option<u8> {
            self.0.contains_key(asset).then_some(0)
        }
    }

    fn holders(amounts: &[(u8, u128)]) -> Holders {
        let map = amounts
            .iter()
            .map(|(n, coins)| (address(*n), Amount::from_coins(*coins)))
            .collect();
        Holders([("ROOT".to_owned(), map)].into_iter().collect())
    }

    #[test]
    fn requests() {
        let mut store = SnapshotStore::new();
        let tip = BlockHeight::new(10);

        assert_eq!(
            store.request_snapshot("ROOT", BlockHeight::new(10), tip),
            Err(RewardsError::SnapshotHeightNotAboveTip {
                height: BlockHeight::new(10),
                tip
            })
        );
        assert_eq!(
            store.request_snapshot("ro", BlockHeight::new(11), tip),
            Err(RewardsError::InvalidAssetName("ro".to_owned()))
        );

        assert_eq!(store.request_snapshot("ROOT", BlockHeight::new(20), tip), Ok(true));
        assert_eq!(store.request_snapshot("ROOT", BlockHeight::new(20), tip), Ok(false));
        assert_eq!(store.request_snapshot("OTHER", BlockHeight::new(15), tip), Ok(true));

        let all = store.list_snapshot_requests(None, None);
        assert_eq!(
            all.iter().map(|r| (r.asset.as_str(), r.height.into_int())).collect::<Vec<_>>(),
            vec![("OTHER", 15), ("ROOT", 20)]
        );
        assert_eq!(store.list_snapshot_requests(Some("ROOT"), None).len(), 1);
        assert!(store.list_snapshot_requests(Some("ROOT"), Some(BlockHeight::new(15))).is_empty());

        store.cancel_snapshot_request("ROOT", BlockHeight::new(20)).unwrap();
        assert_eq!(
            store.cancel_snapshot_request("ROOT", BlockHeight::new(20)),
            Err(RewardsError::SnapshotRequestNotFound("ROOT".to_owned(), BlockHeight::new(20)))
        );
    }

    #[test]
    fn snapshots_follow_the_chain() {
        let mut store = SnapshotStore::new();
        let height = BlockHeight::new(5);
        store.request_snapshot("ROOT", height, BlockHeight::new(1)).unwrap();

        store.on_block_connected(BlockHeight::new(4), &holders(&[(1, 10)]));
        assert!(store.get_snapshot("ROOT", height).is_err());

        store.on_block_connected(height, &holders(&[(1, 10), (2, 5)]));
        let snapshot = store.get_snapshot("ROOT", height).unwrap();
        assert_eq!(snapshot.holders.len(), 2);
        assert_eq!(snapshot.total(), Some(Amount::from_coins(15)));

        store.on_block_disconnected(height);
        assert_eq!(
            store.get_snapshot("ROOT", height),
            Err(RewardsError::SnapshotNotFound("ROOT".to_owned(), height))
        );

        // The new chain decides
        store.on_block_connected(height, &holders(&[(3, 7)]));
        let snapshot = store.get_snapshot("ROOT", height).unwrap();
        assert_eq!(
            snapshot.holders.clone().into_iter().collect::<Vec<_>>(),
            vec![(address(3), Amount::from_coins(7))]
        );
    }
}
