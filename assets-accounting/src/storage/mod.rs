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

use std::ops::{Deref, DerefMut};

use common::{
    chain::{Destination, UtxoOutPoint},
    primitives::Amount,
};

use crate::data::{AssetData, FreezeRecord, RootTagRecord, TagRecord};

pub mod db;
pub mod in_memory;

pub trait AssetsAccountingStorageRead {
    type Error: std::error::Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error>;

    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error>;

    /// Provides the amount of an asset held by an address. Zero balances are never stored,
    /// so `None` means the address holds nothing of the asset.
    fn get_balance(&self, name: &str, holder: &Destination)
        -> Result<Option<Amount>, Self::Error>;

    /// Provides the amount of an asset carried by a particular unspent output.
    ///
    /// The sum over all outputs of a holder equals the holder's balance.
    fn get_outpoint_amount(
        &self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<Option<Amount>, Self::Error>;

    fn get_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<TagRecord>, Self::Error>;

    fn get_root_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<RootTagRecord>, Self::Error>;

    fn get_address_freeze(
        &self,
        asset: &str,
        holder: &Destination,
    ) -> Result<Option<FreezeRecord>, Self::Error>;

    fn get_global_freeze(&self, asset: &str) -> Result<Option<FreezeRecord>, Self::Error>;
}

pub trait AssetsAccountingStorageWrite: AssetsAccountingStorageRead {
    fn set_asset_data(&mut self, name: &str, data: &AssetData) -> Result<(), Self::Error>;
    fn del_asset_data(&mut self, name: &str) -> Result<(), Self::Error>;

    fn set_verifier(&mut self, name: &str, verifier: &str) -> Result<(), Self::Error>;
    fn del_verifier(&mut self, name: &str) -> Result<(), Self::Error>;

    fn set_balance(
        &mut self,
        name: &str,
        holder: &Destination,
        amount: Amount,
    ) -> Result<(), Self::Error>;
    fn del_balance(&mut self, name: &str, holder: &Destination) -> Result<(), Self::Error>;

    fn set_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
        amount: Amount,
    ) -> Result<(), Self::Error>;
    fn del_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<(), Self::Error>;

    fn set_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &TagRecord,
    ) -> Result<(), Self::Error>;
    fn del_qualifier_tag(&mut self, qualifier: &str, holder: &Destination)
        -> Result<(), Self::Error>;

    fn set_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &RootTagRecord,
    ) -> Result<(), Self::Error>;
    fn del_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error>;

    fn set_address_freeze(
        &mut self,
        asset: &str,
        holder: &Destination,
        record: &FreezeRecord,
    ) -> Result<(), Self::Error>;
    fn del_address_freeze(&mut self, asset: &str, holder: &Destination)
        -> Result<(), Self::Error>;

    fn set_global_freeze(&mut self, asset: &str, record: &FreezeRecord)
        -> Result<(), Self::Error>;
    fn del_global_freeze(&mut self, asset: &str) -> Result<(), Self::Error>;
}

impl<T> AssetsAccountingStorageRead for T
where
    T: Deref,
    <T as Deref>::Target: AssetsAccountingStorageRead,
{
    type Error = <T::Target as AssetsAccountingStorageRead>::Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error> {
        self.deref().get_asset_data(name)
    }

    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error> {
        self.deref().get_verifier(name)
    }

    fn get_balance(
        &self,
        name: &str,
        holder: &Destination,
    ) -> Result<Option<Amount>, Self::Error> {
        self.deref().get_balance(name, holder)
    }

    fn get_outpoint_amount(
        &self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<Option<Amount>, Self::Error> {
        self.deref().get_outpoint_amount(name, holder, outpoint)
    }

    fn get_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<TagRecord>, Self::Error> {
        self.deref().get_qualifier_tag(qualifier, holder)
    }

    fn get_root_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<RootTagRecord>, Self::Error> {
        self.deref().get_root_qualifier_tag(qualifier, holder)
    }

    fn get_address_freeze(
        &self,
        asset: &str,
        holder: &Destination,
    ) -> Result<Option<FreezeRecord>, Self::Error> {
        self.deref().get_address_freeze(asset, holder)
    }

    fn get_global_freeze(&self, asset: &str) -> Result<Option<FreezeRecord>, Self::Error> {
        self.deref().get_global_freeze(asset)
    }
}

impl<T> AssetsAccountingStorageWrite for T
where
    T: DerefMut,
    <T as Deref>::Target: AssetsAccountingStorageWrite,
{
    fn set_asset_data(&mut self, name: &str, data: &AssetData) -> Result<(), Self::Error> {
        self.deref_mut().set_asset_data(name, data)
    }

    fn del_asset_data(&mut self, name: &str) -> Result<(), Self::Error> {
        self.deref_mut().del_asset_data(name)
    }

    fn set_verifier(&mut self, name: &str, verifier: &str) -> Result<(), Self::Error> {
        self.deref_mut().set_verifier(name, verifier)
    }

    fn del_verifier(&mut self, name: &str) -> Result<(), Self::Error> {
        self.deref_mut().del_verifier(name)
    }

    fn set_balance(
        &mut self,
        name: &str,
        holder: &Destination,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_balance(name, holder, amount)
    }

    fn del_balance(&mut self, name: &str, holder: &Destination) -> Result<(), Self::Error> {
        self.deref_mut().del_balance(name, holder)
    }

    fn set_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_outpoint_amount(name, holder, outpoint, amount)
    }

    fn del_outpoint_amount(
        &mut self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<(), Self::Error> {
        self.deref_mut().del_outpoint_amount(name, holder, outpoint)
    }

    fn set_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &TagRecord,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_qualifier_tag(qualifier, holder, record)
    }

    fn del_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.deref_mut().del_qualifier_tag(qualifier, holder)
    }

    fn set_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
        record: &RootTagRecord,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_root_qualifier_tag(qualifier, holder, record)
    }

    fn del_root_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.deref_mut().del_root_qualifier_tag(qualifier, holder)
    }

    fn set_address_freeze(
        &mut self,
        asset: &str,
        holder: &Destination,
        record: &FreezeRecord,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_address_freeze(asset, holder, record)
    }

    fn del_address_freeze(
        &mut self,
        asset: &str,
        holder: &Destination,
    ) -> Result<(), Self::Error> {
        self.deref_mut().del_address_freeze(asset, holder)
    }

    fn set_global_freeze(
        &mut self,
        asset: &str,
        record: &FreezeRecord,
    ) -> Result<(), Self::Error> {
        self.deref_mut().set_global_freeze(asset, record)
    }

    fn del_global_freeze(&mut self, asset: &str) -> Result<(), Self::Error> {
        self.deref_mut().del_global_freeze(asset)
    }
}
