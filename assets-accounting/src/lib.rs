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

mod cache;
mod data;
mod error;
mod operations;
mod storage;
mod view;

pub use {
    cache::AssetsAccountingCache,
    data::{
        AssetData, AssetsAccountingData, AssetsAccountingDeltaData, AssetsAccountingDeltaUndoData,
        FreezeRecord, RootTagRecord, TagRecord,
    },
    error::{Error, Result},
    operations::{
        AssetDataUndo, AssetsAccountingOperations, AssetsAccountingUndo, CreditUndo, DebitUndo,
        FreezeUndo, TagUndo, VerifierUndo,
    },
    storage::{
        db::AssetsAccountingDB, in_memory::InMemoryAssetsAccounting,
        AssetsAccountingStorageRead, AssetsAccountingStorageWrite,
    },
    view::{AssetsAccountingView, FlushableAssetsAccountingView},
};

#[cfg(test)]
mod tests;
