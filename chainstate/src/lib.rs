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

//! Asset rules of the ledger: transaction validation and the reorg-aware asset index.

mod asset_index;
mod config;
mod error;
mod mempool;
pub mod tx_verifier;
mod utxo;

pub use crate::{
    asset_index::AssetIndex,
    config::AssetIndexConfig,
    error::{AssetIndexError, AssetTxError, ErrorKind},
    mempool::MempoolAssetTracker,
    utxo::{InputScriptVerifier, UtxoOverlay, UtxoSource},
};
