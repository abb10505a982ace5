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

use accounting::{DeltaAmountCollection, DeltaDataCollection, DeltaDataUndoCollection};
use common::{
    chain::{assets::IpfsHash, Destination, UtxoOutPoint},
    primitives::{Amount, BlockHeight},
};
use serialization::{Decode, Encode};

use crate::error::Result;

/// Metadata of an issued asset.
///
/// Owner tokens (`NAME!`) are stored as assets too, with an amount of one coin,
/// zero units and no reissuance.
#[derive(Clone, Encode, Decode, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AssetData {
    name: String,
    amount: Amount,
    units: u8,
    reissuable: bool,
    ipfs_hash: Option<IpfsHash>,
    last_changed_height: BlockHeight,
}

impl AssetData {
    pub fn new(
        name: String,
        amount: Amount,
        units: u8,
        reissuable: bool,
        ipfs_hash: Option<IpfsHash>,
        last_changed_height: BlockHeight,
    ) -> Self {
        Self {
            name,
            amount,
            units,
            reissuable,
            ipfs_hash,
            last_changed_height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn units(&self) -> u8 {
        self.units
    }

    pub fn is_reissuable(&self) -> bool {
        self.reissuable
    }

    pub fn ipfs_hash(&self) -> Option<&IpfsHash> {
        self.ipfs_hash.as_ref()
    }

    pub fn last_changed_height(&self) -> BlockHeight {
        self.last_changed_height
    }

    /// The metadata after a reissuance. `None` if the new supply overflows.
    pub fn reissue(
        &self,
        amount: Amount,
        reissuable: bool,
        new_units: Option<u8>,
        new_ipfs: Option<IpfsHash>,
        height: BlockHeight,
    ) -> Option<Self> {
        Some(Self {
            name: self.name.clone(),
            amount: (self.amount + amount)?,
            units: new_units.unwrap_or(self.units),
            reissuable,
            ipfs_hash: new_ipfs.or_else(|| self.ipfs_hash.clone()),
            last_changed_height: height,
        })
    }
}

/// A qualifier assignment. Removing a tag keeps the record with `assigned` cleared.
#[derive(Clone, Copy, Encode, Decode, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TagRecord {
    pub assigned: bool,
    pub changed_at: BlockHeight,
}

/// Sub-qualifiers of one root currently assigned to an address. The address carries
/// the root while the set is non-empty.
#[derive(Clone, Encode, Decode, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RootTagRecord {
    pub sub_qualifiers: BTreeSet<String>,
    pub changed_at: BlockHeight,
}

impl RootTagRecord {
    pub fn is_assigned(&self) -> bool {
        !self.sub_qualifiers.is_empty()
    }

    /// The record after assigning or removing `sub_qualifier`.
    pub fn with_sub_qualifier(
        prev: Option<&Self>,
        sub_qualifier: &str,
        assigned: bool,
        height: BlockHeight,
    ) -> Self {
        let mut sub_qualifiers = prev.map(|r| r.sub_qualifiers.clone()).unwrap_or_default();
        if assigned {
            sub_qualifiers.insert(sub_qualifier.to_owned());
        } else {
            sub_qualifiers.remove(sub_qualifier);
        }
        Self {
            sub_qualifiers,
            changed_at: height,
        }
    }
}

#[derive(Clone, Copy, Encode, Decode, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FreezeRecord {
    pub frozen: bool,
    pub changed_at: BlockHeight,
}

pub type HolderKey = (String, Destination);
pub type OutpointKey = (String, Destination, UtxoOutPoint);

/// Committed state of the asset index.
#[derive(Clone, Encode, Decode, Debug, PartialEq, Eq, Default)]
pub struct AssetsAccountingData {
    pub asset_data: BTreeMap<String, AssetData>,
    pub verifiers: BTreeMap<String, String>,
    pub balances: BTreeMap<HolderKey, Amount>,
    pub outpoints: BTreeMap<OutpointKey, Amount>,
    pub qualifier_tags: BTreeMap<HolderKey, TagRecord>,
    /// Addresses tagged with any sub-qualifier count as tagged with its root.
    pub root_qualifier_tags: BTreeMap<HolderKey, RootTagRecord>,
    pub address_freezes: BTreeMap<HolderKey, FreezeRecord>,
    pub global_freezes: BTreeMap<String, FreezeRecord>,
}

impl AssetsAccountingData {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Encode, Decode, Debug, PartialEq, Eq)]
pub struct AssetsAccountingDeltaData {
    pub(crate) asset_data: DeltaDataCollection<String, AssetData>,
    pub(crate) verifiers: DeltaDataCollection<String, String>,
    pub(crate) balances: DeltaAmountCollection<HolderKey>,
    pub(crate) outpoints: DeltaDataCollection<OutpointKey, Amount>,
    pub(crate) qualifier_tags: DeltaDataCollection<HolderKey, TagRecord>,
    pub(crate) root_qualifier_tags: DeltaDataCollection<HolderKey, RootTagRecord>,
    pub(crate) address_freezes: DeltaDataCollection<HolderKey, FreezeRecord>,
    pub(crate) global_freezes: DeltaDataCollection<String, FreezeRecord>,
}

impl AssetsAccountingDeltaData {
    pub fn new() -> Self {
        Self {
            asset_data: DeltaDataCollection::new(),
            verifiers: DeltaDataCollection::new(),
            balances: DeltaAmountCollection::new(),
            outpoints: DeltaDataCollection::new(),
            qualifier_tags: DeltaDataCollection::new(),
            root_qualifier_tags: DeltaDataCollection::new(),
            address_freezes: DeltaDataCollection::new(),
            global_freezes: DeltaDataCollection::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asset_data.is_empty()
            && self.verifiers.is_empty()
            && self.balances.is_empty()
            && self.outpoints.is_empty()
            && self.qualifier_tags.is_empty()
            && self.root_qualifier_tags.is_empty()
            && self.address_freezes.is_empty()
            && self.global_freezes.is_empty()
    }

    pub fn merge_with_delta(
        &mut self,
        other: AssetsAccountingDeltaData,
    ) -> Result<AssetsAccountingDeltaUndoData> {
        let asset_data = self.asset_data.merge_delta_data(other.asset_data)?;
        let verifiers = self.verifiers.merge_delta_data(other.verifiers)?;

        let balances = other.balances.clone();
        self.balances.merge_delta_amounts(other.balances)?;

        let outpoints = self.outpoints.merge_delta_data(other.outpoints)?;
        let qualifier_tags = self.qualifier_tags.merge_delta_data(other.qualifier_tags)?;
        let root_qualifier_tags =
            self.root_qualifier_tags.merge_delta_data(other.root_qualifier_tags)?;
        let address_freezes = self.address_freezes.merge_delta_data(other.address_freezes)?;
        let global_freezes = self.global_freezes.merge_delta_data(other.global_freezes)?;

        Ok(AssetsAccountingDeltaUndoData {
            asset_data,
            verifiers,
            balances,
            outpoints,
            qualifier_tags,
            root_qualifier_tags,
            address_freezes,
            global_freezes,
        })
    }
}

impl Default for AssetsAccountingDeltaData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Encode, Decode, Debug, PartialEq, Eq)]
pub struct AssetsAccountingDeltaUndoData {
    pub(crate) asset_data: DeltaDataUndoCollection<String, AssetData>,
    pub(crate) verifiers: DeltaDataUndoCollection<String, String>,
    pub(crate) balances: DeltaAmountCollection<HolderKey>,
    pub(crate) outpoints: DeltaDataUndoCollection<OutpointKey, Amount>,
    pub(crate) qualifier_tags: DeltaDataUndoCollection<HolderKey, TagRecord>,
    pub(crate) root_qualifier_tags: DeltaDataUndoCollection<HolderKey, RootTagRecord>,
    pub(crate) address_freezes: DeltaDataUndoCollection<HolderKey, FreezeRecord>,
    pub(crate) global_freezes: DeltaDataUndoCollection<String, FreezeRecord>,
}

impl AssetsAccountingDeltaUndoData {
    pub fn new() -> Self {
        Self {
            asset_data: DeltaDataUndoCollection::new(),
            verifiers: DeltaDataUndoCollection::new(),
            balances: DeltaAmountCollection::new(),
            outpoints: DeltaDataUndoCollection::new(),
            qualifier_tags: DeltaDataUndoCollection::new(),
            root_qualifier_tags: DeltaDataUndoCollection::new(),
            address_freezes: DeltaDataUndoCollection::new(),
            global_freezes: DeltaDataUndoCollection::new(),
        }
    }
}

impl Default for AssetsAccountingDeltaUndoData {
    fn default() -> Self {
        Self::new()
    }
}
