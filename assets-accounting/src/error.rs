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

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Base accounting error: {0}")]
    AccountingError(#[from] accounting::Error),
    #[error("Asset already exists: `{0}`")]
    AssetAlreadyExists(String),
    #[error("Data for asset `{0}` not found")]
    AssetDataNotFound(String),
    #[error("Asset name mismatch on reissue: expected `{0}`, got `{1}`")]
    AssetNameMismatch(String, String),
    #[error("Outpoint {2} already holds `{0}` for {1}")]
    OutpointAlreadyCredited(String, common::chain::Destination, common::chain::UtxoOutPoint),
    #[error("Outpoint {2} holds no `{0}` for {1}")]
    OutpointNotFound(String, common::chain::Destination, common::chain::UtxoOutPoint),
    #[error("Credited amount for `{0}` is zero")]
    ZeroAmountCredit(String),
    #[error("Balance of `{0}` changed before undo")]
    InvariantBalanceChangedForUndo(String),

    #[error("Assets accounting view query failed")]
    ViewFail,
    #[error("Assets accounting storage write failed")]
    StorageWrite,
}

pub type Result<T> = core::result::Result<T, Error>;
