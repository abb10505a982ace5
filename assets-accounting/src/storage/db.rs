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

use accounting::{
    combine_amount_delta, combine_data_with_delta, DataDeltaUndo, DeltaAmountCollection,
    DeltaDataCollection, DeltaDataUndoCollection,
};
use common::{
    chain::{Destination, UtxoOutPoint},
    primitives::Amount,
};
use utils::tap_log::TapLog;

use crate::{
    data::{
        AssetData, AssetsAccountingDeltaData, AssetsAccountingDeltaUndoData, FreezeRecord,
        RootTagRecord, TagRecord,
    },
    error::Error,
    view::{AssetsAccountingView, FlushableAssetsAccountingView},
};

use super::{AssetsAccountingStorageRead, AssetsAccountingStorageWrite};

/// Assets accounting on top of a storage backend.
#[must_use]
pub struct AssetsAccountingDB<S>(S);

impl<S: AssetsAccountingStorageRead> AssetsAccountingDB<S> {
    pub fn new(store: S) -> Self {
        Self(store)
    }

    pub fn storage(&self) -> &S {
        &self.0
    }
}

impl<S: AssetsAccountingStorageWrite> AssetsAccountingDB<S> {
    pub fn merge_with_delta(
        &mut self,
        other: AssetsAccountingDeltaData,
    ) -> Result<AssetsAccountingDeltaUndoData, Error> {
        let asset_data = self.merge_data_generic(
            other.asset_data,
            |s, name| s.get_asset_data(name),
            |s, name, data| s.set_asset_data(name, data),
            |s, name| s.del_asset_data(name),
        )?;

        let verifiers = self.merge_data_generic(
            other.verifiers,
            |s, name| s.get_verifier(name),
            |s, name, verifier| s.set_verifier(name, verifier),
            |s, name| s.del_verifier(name),
        )?;

        let balances = other.balances.clone();
        self.merge_balances_generic(
            other.balances,
            |s, (name, holder)| s.get_balance(name, holder),
            |s, (name, holder), amount| s.set_balance(name, holder, amount),
            |s, (name, holder)| s.del_balance(name, holder),
        )?;

        let outpoints = self.merge_data_generic(
            other.outpoints,
            |s, (name, holder, outpoint)| s.get_outpoint_amount(name, holder, outpoint),
            |s, (name, holder, outpoint), amount| {
                s.set_outpoint_amount(name, holder, outpoint, *amount)
            },
            |s, (name, holder, outpoint)| s.del_outpoint_amount(name, holder, outpoint),
        )?;

        let qualifier_tags = self.merge_data_generic(
            other.qualifier_tags,
            |s, (qualifier, holder)| s.get_qualifier_tag(qualifier, holder),
            |s, (qualifier, holder), record| s.set_qualifier_tag(qualifier, holder, record),
            |s, (qualifier, holder)| s.del_qualifier_tag(qualifier, holder),
        )?;

        let root_qualifier_tags = self.merge_data_generic(
            other.root_qualifier_tags,
            |s, (qualifier, holder)| s.get_root_qualifier_tag(qualifier, holder),
            |s, (qualifier, holder), record| s.set_root_qualifier_tag(qualifier, holder, record),
            |s, (qualifier, holder)| s.del_root_qualifier_tag(qualifier, holder),
        )?;

        let address_freezes = self.merge_data_generic(
            other.address_freezes,
            |s, (asset, holder)| s.get_address_freeze(asset, holder),
            |s, (asset, holder), record| s.set_address_freeze(asset, holder, record),
            |s, (asset, holder)| s.del_address_freeze(asset, holder),
        )?;

        let global_freezes = self.merge_data_generic(
            other.global_freezes,
            |s, asset| s.get_global_freeze(asset),
            |s, asset, record| s.set_global_freeze(asset, record),
            |s, asset| s.del_global_freeze(asset),
        )?;

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

    fn merge_balances_generic<K: Ord + Clone, Getter, Setter, Deleter>(
        &mut self,
        delta: DeltaAmountCollection<K>,
        getter: Getter,
        mut setter: Setter,
        mut deleter: Deleter,
    ) -> Result<(), Error>
    where
        Getter: Fn(&S, &K) -> Result<Option<Amount>, S::Error>,
        Setter: FnMut(&mut S, &K, Amount) -> Result<(), S::Error>,
        Deleter: FnMut(&mut S, &K) -> Result<(), S::Error>,
    {
        delta.consume().into_iter().try_for_each(|(key, delta)| {
            let balance = getter(&self.0, &key)
                .map_err(|_| Error::ViewFail)?
                .unwrap_or(Amount::ZERO);
            let result = combine_amount_delta(balance, Some(delta))?;
            if result > Amount::ZERO {
                setter(&mut self.0, &key, result).map_err(|_| Error::StorageWrite)
            } else {
                deleter(&mut self.0, &key).map_err(|_| Error::StorageWrite)
            }
        })
    }

    fn merge_data_generic<K: Ord + Clone, T: Clone + PartialEq, Getter, Setter, Deleter>(
        &mut self,
        delta: DeltaDataCollection<K, T>,
        getter: Getter,
        mut setter: Setter,
        mut deleter: Deleter,
    ) -> Result<DeltaDataUndoCollection<K, T>, Error>
    where
        Getter: Fn(&S, &K) -> Result<Option<T>, S::Error>,
        Setter: FnMut(&mut S, &K, &T) -> Result<(), S::Error>,
        Deleter: FnMut(&mut S, &K) -> Result<(), S::Error>,
    {
        delta
            .consume()
            .into_iter()
            .map(|(key, delta)| -> Result<_, Error> {
                let data = getter(&self.0, &key).map_err(|_| Error::ViewFail)?;
                let written = match combine_data_with_delta(data.as_ref(), Some(&delta))? {
                    Some(result) => setter(&mut self.0, &key, &result),
                    None => deleter(&mut self.0, &key),
                };
                written.map_err(|_| Error::StorageWrite)?;
                Ok((key, DataDeltaUndo::new(delta.invert())))
            })
            .collect::<Result<_, _>>()
    }
}

impl<S: AssetsAccountingStorageRead> AssetsAccountingView for AssetsAccountingDB<S> {
    type Error = S::Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error> {
        self.0.get_asset_data(name)
    }

    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error> {
        self.0.get_verifier(name)
    }

    fn get_balance(&self, name: &str, holder: &Destination) -> Result<Amount, Self::Error> {
        self.0.get_balance(name, holder).map(|b| b.unwrap_or(Amount::ZERO))
    }

    fn get_outpoint_amount(
        &self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<Option<Amount>, Self::Error> {
        self.0.get_outpoint_amount(name, holder, outpoint)
    }

    fn get_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<TagRecord>, Self::Error> {
        self.0.get_qualifier_tag(qualifier, holder)
    }

    fn get_root_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<RootTagRecord>, Self::Error> {
        self.0.get_root_qualifier_tag(qualifier, holder)
    }

    fn get_address_freeze(
        &self,
        asset: &str,
        holder: &Destination,
    ) -> Result<Option<FreezeRecord>, Self::Error> {
        self.0.get_address_freeze(asset, holder)
    }

    fn get_global_freeze(&self, asset: &str) -> Result<Option<FreezeRecord>, Self::Error> {
        self.0.get_global_freeze(asset)
    }
}

impl<S: AssetsAccountingStorageWrite> FlushableAssetsAccountingView for AssetsAccountingDB<S> {
    type Error = Error;

    fn batch_write_assets_data(
        &mut self,
        delta: AssetsAccountingDeltaData,
    ) -> Result<AssetsAccountingDeltaUndoData, Self::Error> {
        self.merge_with_delta(delta).log_err_pfx("Assets accounting flush")
    }
}
