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

//! Ownership snapshots of assets and the reward payouts computed from them.

mod config;
mod distribution;
mod engine;
mod error;
mod holders;
mod snapshot;
mod wallet;

pub use crate::{
    config::RewardsConfig,
    distribution::{
        batch_count, compute_payouts, total_payout, DistributionRequest, DistributionStatus, Payout,
        PayoutCurrency,
    },
    engine::{DistributionRecord, RewardsEngine},
    error::{Result, RewardsError},
    holders::AssetHolders,
    snapshot::{Snapshot, SnapshotRequest, SnapshotStore},
    wallet::{PayoutError, PayoutWallet},
};
