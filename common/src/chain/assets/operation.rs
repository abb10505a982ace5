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

use serialization::{Decode, Encode};

use super::{ipfs::IpfsHash, name, OWNER_ASSET_AMOUNT, UNIQUE_ASSET_AMOUNT};
use crate::{chain::Destination, primitives::Amount};

/// Value of the flag of null-data operations.
pub const FLAG_SET: u8 = 1;
pub const FLAG_CLEAR: u8 = 0;

/// An asset operation carried by an output script.
///
/// The codec index of every variant is the op tag byte written after the asset marker.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, strum::EnumDiscriminants)]
#[strum_discriminants(name(AssetOperationTag), derive(strum::Display, Hash, PartialOrd, Ord))]
pub enum AssetOperation {
    /// Root, sub and message channel issuance.
    #[codec(index = 113)] // 'q'
    Issue {
        name: String,
        amount: Amount,
        units: u8,
        reissuable: bool,
        ipfs_hash: Option<IpfsHash>,
    },
    #[codec(index = 114)] // 'r'
    Reissue {
        name: String,
        amount: Amount,
        reissuable: bool,
        new_units: Option<u8>,
        new_ipfs: Option<IpfsHash>,
    },
    #[codec(index = 111)] // 'o'
    Owner { name: String },
    #[codec(index = 116)] // 't'
    Transfer {
        name: String,
        amount: Amount,
        memo: Option<IpfsHash>,
        expire_time: Option<u64>,
    },
    #[codec(index = 117)] // 'u'
    IssueUnique {
        root: String,
        tags: Vec<String>,
        ipfs_hashes: Vec<Option<IpfsHash>>,
    },
    #[codec(index = 99)] // 'c'
    IssueQualifier {
        name: String,
        amount: Amount,
        ipfs_hash: Option<IpfsHash>,
    },
    #[codec(index = 120)] // 'x'
    IssueRestricted {
        name: String,
        amount: Amount,
        units: u8,
        reissuable: bool,
        ipfs_hash: Option<IpfsHash>,
        verifier: String,
    },
    #[codec(index = 121)] // 'y'
    ReissueRestricted {
        name: String,
        amount: Amount,
        reissuable: bool,
        new_units: Option<u8>,
        new_ipfs: Option<IpfsHash>,
        new_verifier: Option<String>,
    },
    #[codec(index = 103)] // 'g'
    TagAddresses {
        qualifier: String,
        addresses: Vec<Destination>,
        flag: u8,
    },
    #[codec(index = 102)] // 'f'
    FreezeAddresses {
        asset: String,
        addresses: Vec<Destination>,
        flag: u8,
    },
    #[codec(index = 122)] // 'z'
    FreezeAsset { asset: String, flag: u8 },
    /// Broadcast on a channel; the output returns the channel token to its holder.
    #[codec(index = 109)] // 'm'
    Message {
        channel: String,
        ipfs_hash: IpfsHash,
        expire_time: Option<u64>,
    },
}

impl AssetOperation {
    pub fn tag(&self) -> AssetOperationTag {
        self.into()
    }

    /// The asset the operation is about; the root for unique issuance.
    pub fn asset_name(&self) -> &str {
        match self {
            AssetOperation::Issue { name, .. }
            | AssetOperation::Reissue { name, .. }
            | AssetOperation::Owner { name }
            | AssetOperation::Transfer { name, .. }
            | AssetOperation::IssueQualifier { name, .. }
            | AssetOperation::IssueRestricted { name, .. }
            | AssetOperation::ReissueRestricted { name, .. } => name,
            AssetOperation::IssueUnique { root, .. } => root,
            AssetOperation::TagAddresses { qualifier, .. } => qualifier,
            AssetOperation::FreezeAddresses { asset, .. }
            | AssetOperation::FreezeAsset { asset, .. } => asset,
            AssetOperation::Message { channel, .. } => channel,
        }
    }

    /// Null-data operations have no holder and move no asset.
    pub fn is_null(&self) -> bool {
        match self {
            AssetOperation::TagAddresses { .. }
            | AssetOperation::FreezeAddresses { .. }
            | AssetOperation::FreezeAsset { .. } => true,
            AssetOperation::Issue { .. }
            | AssetOperation::Reissue { .. }
            | AssetOperation::Owner { .. }
            | AssetOperation::Transfer { .. }
            | AssetOperation::IssueUnique { .. }
            | AssetOperation::IssueQualifier { .. }
            | AssetOperation::IssueRestricted { .. }
            | AssetOperation::ReissueRestricted { .. }
            | AssetOperation::Message { .. } => false,
        }
    }

    pub fn is_issuance(&self) -> bool {
        matches!(
            self,
            AssetOperation::Issue { .. }
                | AssetOperation::IssueUnique { .. }
                | AssetOperation::IssueQualifier { .. }
                | AssetOperation::IssueRestricted { .. }
        )
    }

    pub fn is_reissuance(&self) -> bool {
        matches!(
            self,
            AssetOperation::Reissue { .. } | AssetOperation::ReissueRestricted { .. }
        )
    }

    /// The asset amounts the holder of the output receives.
    pub fn holdings(&self) -> Vec<(String, Amount)> {
        match self {
            AssetOperation::Issue { name, amount, .. }
            | AssetOperation::Reissue { name, amount, .. }
            | AssetOperation::Transfer { name, amount, .. }
            | AssetOperation::IssueQualifier { name, amount, .. }
            | AssetOperation::IssueRestricted { name, amount, .. }
            | AssetOperation::ReissueRestricted { name, amount, .. } => {
                vec![(name.clone(), *amount)]
            }
            AssetOperation::Owner { name } => vec![(name.clone(), OWNER_ASSET_AMOUNT)],
            AssetOperation::Message { channel, .. } => vec![(channel.clone(), OWNER_ASSET_AMOUNT)],
            AssetOperation::IssueUnique { root, tags, .. } => tags
                .iter()
                .map(|tag| (name::unique_name(root, tag), UNIQUE_ASSET_AMOUNT))
                .collect(),
            AssetOperation::TagAddresses { .. }
            | AssetOperation::FreezeAddresses { .. }
            | AssetOperation::FreezeAsset { .. } => Vec::new(),
        }
    }

    pub fn ipfs_hashes(&self) -> impl Iterator<Item = &IpfsHash> {
        let hashes: Vec<&IpfsHash> = match self {
            AssetOperation::Issue { ipfs_hash, .. }
            | AssetOperation::IssueQualifier { ipfs_hash, .. }
            | AssetOperation::IssueRestricted { ipfs_hash, .. } => ipfs_hash.iter().collect(),
            AssetOperation::Reissue { new_ipfs, .. }
            | AssetOperation::ReissueRestricted { new_ipfs, .. } => new_ipfs.iter().collect(),
            AssetOperation::Transfer { memo, .. } => memo.iter().collect(),
            AssetOperation::IssueUnique { ipfs_hashes, .. } => {
                ipfs_hashes.iter().flatten().collect()
            }
            AssetOperation::Message { ipfs_hash, .. } => vec![ipfs_hash],
            AssetOperation::Owner { .. }
            | AssetOperation::TagAddresses { .. }
            | AssetOperation::FreezeAddresses { .. }
            | AssetOperation::FreezeAsset { .. } => Vec::new(),
        };
        hashes.into_iter()
    }
}
