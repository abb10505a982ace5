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

//! Height-scheduled activation of the asset soft forks.

use std::collections::BTreeMap;

use crate::primitives::BlockHeight;

/// A list of versions sorted by the height they take effect at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetUpgrades<T>(Vec<(BlockHeight, T)>);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetUpgradeError {
    #[error("The first upgrade must be at genesis, got {0}")]
    FirstUpgradeNotAtGenesis(BlockHeight),
    #[error("No upgrades given")]
    Empty,
}

impl<T: Copy + Ord> NetUpgrades<T> {
    pub fn initialize(upgrades: Vec<(BlockHeight, T)>) -> Result<Self, NetUpgradeError> {
        let mut upgrades = upgrades;
        upgrades.sort_unstable();

        match upgrades.first() {
            None => Err(NetUpgradeError::Empty),
            Some(&(height, _)) if height != BlockHeight::zero() => {
                Err(NetUpgradeError::FirstUpgradeNotAtGenesis(height))
            }
            Some(_) => Ok(Self(upgrades)),
        }
    }

    /// A single version in effect from genesis on.
    pub fn unchanging(version: T) -> Self {
        Self(vec![(BlockHeight::zero(), version)])
    }

    pub fn get_version(&self, height: BlockHeight) -> T {
        match self.0.iter().rfind(|&&(elem_height, _)| elem_height <= height) {
            Some(&(_, version)) => version,
            None => self.0[0].1,
        }
    }

    pub fn all_upgrades(&self) -> &[(BlockHeight, T)] {
        &self.0
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum SoftFork {
    /// Issuance and transfer of assets.
    Tokens,
    /// Messaging, restricted assets, qualifiers and txid IPFS hashes.
    MessagingRestricted,
    /// Assets held by pay-to-script-hash outputs.
    P2shTokens,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum DeploymentStatus {
    Defined,
    Started,
    LockedIn,
    Active,
    Failed,
}

/// Deployment status of every soft fork by height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftForkSchedule {
    forks: BTreeMap<SoftFork, NetUpgrades<DeploymentStatus>>,
}

impl SoftForkSchedule {
    /// Every fork active from genesis.
    pub fn all_active() -> Self {
        Self::activated_at(BlockHeight::zero())
    }

    /// Every fork defined until `height` and active from it on.
    pub fn activated_at(height: BlockHeight) -> Self {
        use strum::IntoEnumIterator;

        let forks = SoftFork::iter().map(|fork| (fork, Self::activation(height))).collect();
        Self { forks }
    }

    fn activation(height: BlockHeight) -> NetUpgrades<DeploymentStatus> {
        if height == BlockHeight::zero() {
            NetUpgrades::unchanging(DeploymentStatus::Active)
        } else {
            NetUpgrades(vec![
                (BlockHeight::zero(), DeploymentStatus::Defined),
                (height, DeploymentStatus::Active),
            ])
        }
    }

    pub fn with_fork(mut self, fork: SoftFork, schedule: NetUpgrades<DeploymentStatus>) -> Self {
        self.forks.insert(fork, schedule);
        self
    }

    /// Forks missing from the schedule count as never started.
    pub fn status(&self, fork: SoftFork, height: BlockHeight) -> DeploymentStatus {
        self.forks
            .get(&fork)
            .map_or(DeploymentStatus::Defined, |upgrades| upgrades.get_version(height))
    }

    pub fn is_active(&self, fork: SoftFork, height: BlockHeight) -> bool {
        self.status(fork, height) == DeploymentStatus::Active
    }
}
