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

mod codec;
pub mod ipfs;
pub mod name;
mod operation;

pub use codec::{
    asset_script, decode_asset_script, null_asset_script, AssetScriptError, DecodedAssetScript,
};
pub use ipfs::{IpfsHash, IpfsHashError};
pub use name::{AssetKind, AssetNameError};
pub use operation::{AssetOperation, AssetOperationTag, FLAG_CLEAR, FLAG_SET};

use crate::primitives::{Amount, COIN};

pub const MAX_UNITS: u8 = 8;

pub const OWNER_ASSET_AMOUNT: Amount = Amount::from_atoms(COIN);
pub const OWNER_ASSET_UNITS: u8 = 0;

pub const UNIQUE_ASSET_AMOUNT: Amount = Amount::from_atoms(COIN);
pub const UNIQUE_ASSET_UNITS: u8 = 0;

pub const MSG_CHANNEL_ASSET_AMOUNT: Amount = Amount::from_atoms(COIN);
pub const MSG_CHANNEL_ASSET_UNITS: u8 = 0;

pub const MIN_QUALIFIER_AMOUNT: Amount = Amount::from_coins(1);
pub const MAX_QUALIFIER_AMOUNT: Amount = Amount::from_coins(100);
pub const QUALIFIER_ASSET_UNITS: u8 = 0;

static_assertions::const_assert!(MAX_UNITS as u32 == crate::primitives::amount::DECIMALS as u32);
