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

use std::ops::Deref;

use common::{
    chain::{Destination, UtxoOutPoint},
    primitives::Amount,
};

use crate::data::{
    AssetData, AssetsAccountingDeltaData, AssetsAccountingDeltaUndoData, FreezeRecord,
    RootTagRecord, TagRecord,
};

pub trait AssetsAccountingView {
    /// Error that can occur during queries
    type Error: std::error::Error;

    /// Retrieves asset metadata.
    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error>;

    /// Retrieves the verifier string of a restricted asset.
    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error>;

    /// Retrieves the amount of an asset held by an address. Zero if none.
    fn get_balance(&self, name: &str, holder: &Destination) -> Result<Amount, Self::Error>;

    /// Retrieves the asset amount locked in a particular output.
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

    /// The record implied for a root qualifier by tagging one of its sub-qualifiers.
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

pub trait FlushableAssetsAccountingView {
    /// Errors potentially triggered by flushing the view
    type Error: std::error::Error;

    /// Performs bulk modification
    fn batch_write_assets_data(
        &mut self,
        delta: AssetsAccountingDeltaData,
    ) -> Result<AssetsAccountingDeltaUndoData, Self::Error>;
}

impl<T> AssetsAccountingView for T
where
    T: Deref,
    <T as Deref>::Target: AssetsAccountingView,
{
    type Error = <T::Target as AssetsAccountingView>::Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>, Self::Error> {
        self.deref().get_asset_data(name)
    }

    fn get_verifier(&self, name: &str) -> Result<Option<String>, Self::Error> {
        self.deref().get_verifier(name)
    }

    fn get_balance(&self, name: &str, holder: &Destination) -> Result<Amount, Self::Error> {
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
