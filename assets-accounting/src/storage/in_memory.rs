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

use std::collections::BTreeMap;

use common::{
    chain::{Destination, UtxoOutPoint},
    primitives::{Amount, Id, H160, H256},
};

use crate::data::{AssetData, AssetsAccountingData, FreezeRecord, RootTagRecord, TagRecord};

use super::{AssetsAccountingStorageRead, AssetsAccountingStorageWrite};

fn holder_key(name: &str, holder: &Destination) -> (String, Destination) {
    (name.to_owned(), *holder)
}

fn lowest_destination() -> Destination {
    Destination::PublicKeyHash(H160::zero())
}

fn lowest_outpoint() -> UtxoOutPoint {
    UtxoOutPoint::new(Id::new(H256::zero()), 0)
}

#[must_use]
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct InMemoryAssetsAccounting {
    data: AssetsAccountingData,
}

impl InMemoryAssetsAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: AssetsAccountingData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &AssetsAccountingData {
        &self.data
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetData> {
        self.data.asset_data.values()
    }

    /// All non-zero asset balances of an address.
    pub fn balances_by_address(&self, holder: &Destination) -> BTreeMap<String, Amount> {
        self.data
            .balances
            .iter()
            .filter(|((_, dest), amount)| dest == holder && **amount > Amount::ZERO)
            .map(|((name, _), amount)| (name.clone(), *amount))
            .collect()
    }

    pub fn outpoints_by_asset_and_address(
        &self,
        name: &str,
        holder: &Destination,
    ) -> Vec<(UtxoOutPoint, Amount)> {
        self.data
            .outpoints
            .range((name.to_owned(), *holder, lowest_outpoint())..)
            .take_while(|((n, dest, _), _)| n == name && dest == holder)
            .map(|((_, _, outpoint), amount)| (*outpoint, *amount))
            .collect()
    }

    pub fn asset_holders(&self, name: &str) -> BTreeMap<Destination, Amount> {
        self.data
            .balances
            .range((name.to_owned(), lowest_destination())..)
            .take_while(|((n, _), _)| n == name)
            .filter(|(_, amount)| **amount > Amount::ZERO)
            .map(|((_, dest), amount)| (*dest, *amount))
            .collect()
    }

    /// Qualifiers currently assigned to an address, sub-qualifier roots excluded.
    pub fn tags_for_address(&self, holder: &Destination) -> Vec<String> {
        self.data
            .qualifier_tags
            .iter()
            .filter(|((_, dest), record)| dest == holder && record.assigned)
            .map(|((qualifier, _), _)| qualifier.clone())
            .collect()
    }

    pub fn addresses_for_tag(&self, qualifier: &str) -> Vec<Destination> {
        self.data
            .qualifier_tags
            .range((qualifier.to_owned(), lowest_destination())..)
            .take_while(|((q, _), _)| q == qualifier)
            .filter(|(_, record)| record.assigned)
            .map(|((_, dest), _)| *dest)
            .collect()
    }

    /// Addresses frozen for a restricted asset.
    pub fn frozen_addresses(&self, asset: &str) -> Vec<Destination> {
        self.data
            .address_freezes
            .range((asset.to_owned(), lowest_destination())..)
            .take_while(|((a, _), _)| a == asset)
            .filter(|(_, record)| record.frozen)
            .map(|((_, dest), _)| *dest)
            .collect()
    }
}

impl AssetsAccountingStorageRead for InMemoryAssetsAccounting {
    type Error = crate::Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error> {
        Ok(self.data.asset_data.get(name).cloned())
    }

    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.data.verifiers.get(name).cloned())
    }

    fn get_balance(
        &self,
        name: &str,
        holder: &Destination,
    ) -> Result<Option<Amount>, Self::Error> {
        Ok(self.data.balances.get(&holder_key(name, holder)).copied())
    }

    fn get_outpoint_amount(
        &self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<Option<Amount>, Self::Error> {
        Ok(self.data.outpoints.get(&(name.to_owned(), *holder, *outpoint)).copied())
    }

    fn get_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<TagRecord>, Self::Error> {
        Ok(self.data.qualifier_tags.get(&holder_key(qualifier, holder)).copied())
    }

    fn get_root_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<RootTagRecord>, Self::Error> {
        Ok(self.data.root_qualifier_tags.get(&holder_key(qualifier, holder)).cloned())
    }

    fn get_address_freeze(
        &self,
        asset: &str,
        holder: &Destination,
    ) -> Result<Option<FreezeRecord>, Self::Error> {
        Ok(self.data.address_freezes.get(&holder_key(asset, holder)).copied())
    }

    fn get_global_freeze(&self, asset: &str) -> Result<Option<FreezeRecord>, Self::Error> {
        Ok(self.data.global_freezes.get(asset).copied())
    }
}

impl AssetsAccountingStorageWrite for InMemoryAssetsAccounting {
    fn set_asset_data(&mut self, name: &str, data: &AssetData) -> Result<(), Self::Error> {
        self.data.asset_data.insert(name.to_owned(), data.clone());
        Ok(())
    }

    fn del_asset_data(&mut self, name: &str) -> Result<(), Self::Error> {
        self.data.asset_data.remove(name);
        Ok(())
    }

    fn set_verifier(&mut self, name: &str, verifier: &str) -> Result<(), Self::Error> {
        self.data.verifiers.insert(name.to_owned(), verifier.to_owned());
        Ok(())
    }

    fn del_verifier(&mut self, name: &str) -> Result<(), Self::Error> {
        self.data.verifiers.remove(name);
        Ok(())
    }

    fn set_balance(
        &mut self,
        name: &str,
        holder: &Destination,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.data.balances.insert(holder_key(name, holder), amount);
        Ok(())
    }

    fn del_balance(&mut self, name: &str, holder: &Destination) -> Result<(), Self::Error> {
        self.data.balances.remove(&holder_key(name, holder));
        Ok(())
    }

    fn set_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.data.outpoints.insert((name.to_owned(), *holder, *outpoint), amount);
        Ok(())
    }

    fn del_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<(), Self::Error> {
        self.data.outpoints.remove(&(name.to_owned(), *holder, *outpoint));
        Ok(())
    }

    fn set_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &TagRecord,
    ) -> Result<(), Self::Error> {
        self.data.qualifier_tags.insert(holder_key(qualifier, holder), *record);
        Ok(())
    }

    fn del_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.data.qualifier_tags.remove(&holder_key(qualifier, holder));
        Ok(())
    }

    fn set_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &RootTagRecord,
    ) -> Result<(), Self::Error> {
        self.data.root_qualifier_tags.insert(holder_key(qualifier, holder), record.clone());
        Ok(())
    }

    fn del_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.data.root_qualifier_tags.remove(&holder_key(qualifier, holder));
        Ok(())
    }

    fn set_address_freeze(
        &mut self,
        asset: &str,
        holder: &Destination,
        record: &FreezeRecord,
    ) -> Result<(), Self::Error> {
        self.data.address_freezes.insert(holder_key(asset, holder), *record);
        Ok(())
    }

    fn del_address_freeze(
        &mut self,
        asset: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.data.address_freezes.remove(&holder_key(asset, holder));
        Ok(())
    }

    fn set_global_freeze(
        &mut self,
        asset: &str,
        record: &FreezeRecord,
    ) -> Result<(), Self::Error> {
        self.data.global_freezes.insert(asset.to_owned(), *record);
        Ok(())
    }

    fn del_global_freeze(&mut self, asset: &str) -> Result<(), Self::Error> {
        self.data.global_freezes.remove(asset);
        Ok(())
    }
}
