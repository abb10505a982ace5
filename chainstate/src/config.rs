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

use serde::{Deserialize, Serialize};

/// The asset index configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssetIndexConfig {
    /// Undo data is kept for this many blocks below the tip; deeper blocks can't be disconnected.
    pub max_reorg_depth: u64,
    /// Upper bound on the number of entries `list_assets` returns.
    pub max_list_assets: usize,
}

impl AssetIndexConfig {
    /// Creates a new asset index configuration instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_reorg_depth(mut self, max_reorg_depth: u64) -> Self {
        self.max_reorg_depth = max_reorg_depth;
        self
    }

    pub fn with_max_list_assets(mut self, max_list_assets: usize) -> Self {
        self.max_list_assets = max_list_assets;
        self
    }
}

impl Default for AssetIndexConfig {
    fn default() -> Self {
        Self {
            max_reorg_depth: 1000,
            max_list_assets: 5000,
        }
    }
}
