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

use accounting::DataDeltaUndo;
use common::{
    chain::{Destination, UtxoOutPoint},
    primitives::{Amount, BlockHeight},
};
use serialization::{Decode, Encode};
use variant_count::VariantCount;

use crate::{
    data::{AssetData, FreezeRecord, RootTagRecord, TagRecord},
    error::Result,
};

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct AssetDataUndo {
    pub(crate) name: String,
    pub(crate) undo_data: DataDeltaUndo<AssetData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct CreditUndo {
    pub(crate) name: String,
    pub(crate) holder: Destination,
    pub(crate) outpoint: UtxoOutPoint,
    pub(crate) amount: Amount,
    pub(crate) undo_data: DataDeltaUndo<Amount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct DebitUndo {
    pub(crate) name: String,
    pub(crate) holder: Destination,
    pub(crate) outpoint: UtxoOutPoint,
    pub(crate) amount: Amount,
    pub(crate) undo_data: DataDeltaUndo<Amount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct TagUndo {
    pub(crate) qualifier: String,
    pub(crate) holder: Destination,
    pub(crate) undo_data: DataDeltaUndo<TagRecord>,
    /// Set when a sub-qualifier tag also touched its root qualifier record.
    pub(crate) root_undo: Option<(String, DataDeltaUndo<RootTagRecord>)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct FreezeUndo {
    pub(crate) asset: String,
    pub(crate) holder: Option<Destination>,
    pub(crate) undo_data: DataDeltaUndo<FreezeRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct VerifierUndo {
    pub(crate) asset: String,
    pub(crate) undo_data: DataDeltaUndo<String>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, VariantCount)]
pub enum AssetsAccountingUndo {
    IssueAsset(AssetDataUndo),
    ReissueAsset(AssetDataUndo),
    Credit(CreditUndo),
    Debit(DebitUndo),
    QualifierTag(TagUndo),
    AddressFreeze(FreezeUndo),
    GlobalFreeze(FreezeUndo),
    Verifier(VerifierUndo),
}

pub trait AssetsAccountingOperations {
    fn issue_asset(&mut self, data: AssetData) -> Result<AssetsAccountingUndo>;

    /// Replaces the metadata of an existing asset.
    fn reissue_asset(&mut self, data: AssetData) -> Result<AssetsAccountingUndo>;

    /// Records `amount` of an asset carried by a newly created output.
    fn credit(
        &mut self,
        name: &str,
        holder: Destination,
        outpoint: UtxoOutPoint,
        amount: Amount,
    ) -> Result<AssetsAccountingUndo>;

    /// Removes the asset amount carried by a spent output.
    fn debit(
        &mut self,
        name: &str,
        holder: Destination,
        outpoint: UtxoOutPoint,
    ) -> Result<AssetsAccountingUndo>;

    fn set_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: Destination,
        assigned: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo>;

    fn set_address_freeze(
        &mut self,
        asset: &str,
        holder: Destination,
        frozen: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo>;

    fn set_global_freeze(
        &mut self,
        asset: &str,
        frozen: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo>;

    fn set_verifier(&mut self, asset: &str, verifier: String) -> Result<AssetsAccountingUndo>;

    fn undo(&mut self, undo_data: AssetsAccountingUndo) -> Result<()>;
}
