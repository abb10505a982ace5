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

/// The rewards engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RewardsConfig {
    /// Blocks the chain has to be ahead of a snapshot before its rewards can be paid.
    pub payout_margin: u64,
    /// Payouts sent in a single transaction.
    pub max_payouts_per_transaction: usize,
}

impl RewardsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payout_margin(mut self, payout_margin: u64) -> Self {
        self.payout_margin = payout_margin;
        self
    }

    pub fn with_max_payouts_per_transaction(mut self, max_payouts_per_transaction: usize) -> Self {
        self.max_payouts_per_transaction = max_payouts_per_transaction;
        self
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            payout_margin: 60,
            max_payouts_per_transaction: 190,
        }
    }
}
