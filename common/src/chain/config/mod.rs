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

mod builder;

use std::collections::BTreeMap;

pub use builder::Builder;

use super::{
    upgrades::{DeploymentStatus, NetUpgrades, SoftFork, SoftForkSchedule},
    Destination,
};
use crate::primitives::{hash_encoded, Amount, BlockHeight, COIN, H160};

/// The largest supply any asset may reach.
pub const MAX_MONEY: Amount = Amount::from_coins(21_000_000_000);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ChainType {
    Mainnet,
    Testnet,
    Regtest,
}

impl ChainType {
    pub const fn name(&self) -> &'static str {
        match self {
            ChainType::Mainnet => "mainnet",
            ChainType::Testnet => "testnet",
            ChainType::Regtest => "regtest",
        }
    }

    fn default_soft_forks(&self) -> SoftForkSchedule {
        match self {
            ChainType::Mainnet => SoftForkSchedule::activated_at(BlockHeight::new(10_000))
                .with_fork(
                    SoftFork::Tokens,
                    NetUpgrades::unchanging(DeploymentStatus::Active),
                ),
            ChainType::Testnet => SoftForkSchedule::activated_at(BlockHeight::new(100)),
            ChainType::Regtest => SoftForkSchedule::all_active(),
        }
    }
}

/// What a burn output pays for. Every kind has its own amount and burn address.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetBurnKind {
    Issue,
    Reissue,
    SubAsset,
    /// Charged per unique asset created.
    Unique,
    MsgChannel,
    Qualifier,
    SubQualifier,
    Restricted,
    /// Charged per address tagged.
    AddTag,
}

impl AssetBurnKind {
    const fn default_amount(&self) -> Amount {
        match self {
            AssetBurnKind::Issue => Amount::from_coins(500),
            AssetBurnKind::Reissue => Amount::from_coins(100),
            AssetBurnKind::SubAsset => Amount::from_coins(100),
            AssetBurnKind::Unique => Amount::from_coins(5),
            AssetBurnKind::MsgChannel => Amount::from_coins(100),
            AssetBurnKind::Qualifier => Amount::from_coins(1000),
            AssetBurnKind::SubQualifier => Amount::from_coins(100),
            AssetBurnKind::Restricted => Amount::from_coins(1500),
            AssetBurnKind::AddTag => Amount::from_atoms(COIN / 10),
        }
    }

    /// An unspendable address derived from the chain and the burn kind.
    fn default_address(&self, chain_type: ChainType) -> Destination {
        let hash = hash_encoded(&(chain_type.name(), "burn", self.to_string()));
        Destination::PublicKeyHash(H160::from_slice(&hash.as_bytes()[..H160::len_bytes()]))
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    chain_type: ChainType,
    max_money: Amount,
    burn_amounts: BTreeMap<AssetBurnKind, Amount>,
    burn_addresses: BTreeMap<AssetBurnKind, Destination>,
    soft_forks: SoftForkSchedule,
}

impl ChainConfig {
    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    pub fn max_money(&self) -> Amount {
        self.max_money
    }

    pub fn burn_amount(&self, kind: AssetBurnKind) -> Amount {
        self.burn_amounts.get(&kind).copied().unwrap_or_else(|| kind.default_amount())
    }

    pub fn burn_address(&self, kind: AssetBurnKind) -> Destination {
        self.burn_addresses
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_address(self.chain_type))
    }

    /// Burn addresses never hold a share of rewards.
    pub fn is_burn_address(&self, destination: &Destination) -> bool {
        use strum::IntoEnumIterator;
        AssetBurnKind::iter().any(|kind| self.burn_address(kind) == *destination)
    }

    pub fn soft_forks(&self) -> &SoftForkSchedule {
        &self.soft_forks
    }

    pub fn is_feature_active(&self, fork: SoftFork, height: BlockHeight) -> bool {
        self.soft_forks.is_active(fork, height)
    }
}

pub fn create_regtest() -> ChainConfig {
    Builder::new(ChainType::Regtest).build()
}

pub fn create_mainnet() -> ChainConfig {
    Builder::new(ChainType::Mainnet).build()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn burn_table() {
        let config = create_mainnet();
        assert_eq!(config.burn_amount(AssetBurnKind::Issue), Amount::from_coins(500));
        assert_eq!(
            config.burn_amount(AssetBurnKind::AddTag),
            Amount::from_atoms(10_000_000)
        );

        let addresses: std::collections::BTreeSet<_> =
            AssetBurnKind::iter().map(|kind| config.burn_address(kind)).collect();
        assert_eq!(addresses.len(), AssetBurnKind::iter().count());
        assert!(addresses.iter().all(|a| config.is_burn_address(a)));
        assert_ne!(
            config.burn_address(AssetBurnKind::Issue),
            create_regtest().burn_address(AssetBurnKind::Issue)
        );
    }

    #[rstest]
    #[case(ChainType::Mainnet, SoftFork::Tokens, 0, true)]
    #[case(ChainType::Mainnet, SoftFork::MessagingRestricted, 9_999, false)]
    #[case(ChainType::Mainnet, SoftFork::MessagingRestricted, 10_000, true)]
    #[case(ChainType::Regtest, SoftFork::P2shTokens, 0, true)]
    #[case(ChainType::Testnet, SoftFork::Tokens, 99, false)]
    fn default_activation(
        #[case] chain_type: ChainType,
        #[case] fork: SoftFork,
        #[case] height: u64,
        #[case] active: bool,
    ) {
        let config = Builder::new(chain_type).build();
        assert_eq!(config.is_feature_active(fork, BlockHeight::new(height)), active);
    }

    #[test]
    fn chain_type_names() {
        assert_eq!("regtest".parse(), Ok(ChainType::Regtest));
        assert_eq!(ChainType::Testnet.name(), "testnet");
    }
}
