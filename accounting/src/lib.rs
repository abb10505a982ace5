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

mod block_undo;
mod delta;
mod error;

pub use crate::{
    block_undo::{BlockUndo, BlockUndoError, TxUndo},
    delta::{
        combine_amount_delta, combine_data_with_delta,
        delta_amount_collection::DeltaAmountCollection,
        delta_data_collection::{
            DataDelta, DataDeltaUndo, DeltaDataCollection, DeltaDataUndoCollection, GetDataResult,
        },
    },
    error::Error,
};

pub type Result<T> = core::result::Result<T, Error>;
