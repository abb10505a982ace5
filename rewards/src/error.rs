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

use chainstate::ErrorKind;
use common::primitives::{BlockHeight, Id};

use crate::distribution::DistributionRequest;

pub type Result<T> = core::result::Result<T, RewardsError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardsError {
    #[error("Invalid asset name {0}")]
    InvalidAssetName(String),
    #[error("Snapshot height {height} must be above the chain tip {tip}")]
    SnapshotHeightNotAboveTip { height: BlockHeight, tip: BlockHeight },
    #[error("No snapshot request for {0} at height {1}")]
    SnapshotRequestNotFound(String, BlockHeight),
    #[error("No snapshot of {0} at height {1}")]
    SnapshotNotFound(String, BlockHeight),
    #[error(
        "For security of the rewards payout, it is recommended to wait until chain is {margin} blocks ahead of the snapshot height. Snapshot height: {snapshot_height}, chain tip: {tip}"
    )]
    PayoutTooEarly {
        margin: u64,
        snapshot_height: BlockHeight,
        tip: BlockHeight,
    },
    #[error("Reward amount must be positive")]
    ZeroReward,
    #[error("Payout asset {0} not found")]
    PayoutAssetNotFound(String),
    #[error("No holders are eligible for the reward")]
    NoEligibleHolders,
    #[error("Reward amount overflow")]
    AmountOverflow,
    #[error("Distribution {0} not found")]
    DistributionNotFound(Id<DistributionRequest>),
    #[error("Invalid rewards configuration: {0}")]
    InvalidConfig(&'static str),
}

impl RewardsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RewardsError::InvalidAssetName(_) | RewardsError::ZeroReward => ErrorKind::Formatting,
            RewardsError::SnapshotHeightNotAboveTip { .. }
            | RewardsError::PayoutTooEarly { .. } => ErrorKind::Timing,
            RewardsError::SnapshotRequestNotFound(_, _)
            | RewardsError::SnapshotNotFound(_, _)
            | RewardsError::PayoutAssetNotFound(_)
            | RewardsError::NoEligibleHolders
            | RewardsError::AmountOverflow
            | RewardsError::DistributionNotFound(_)
            | RewardsError::InvalidConfig(_) => ErrorKind::Resource,
        }
    }
}
