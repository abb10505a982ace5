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

use std::collections::BTreeMap;

use super::{AssetBurnKind, ChainConfig, ChainType, MAX_MONEY};
use crate::{
    chain::{upgrades::SoftForkSchedule, Destination},
    primitives::Amount,
};

/// Builder for [ChainConfig]
#[derive(Debug, Clone)]
pub struct Builder {
    chain_type: ChainType,
    max_money: Amount,
    burn_amounts: BTreeMap<AssetBurnKind, Amount>,
    burn_addresses: BTreeMap<AssetBurnKind, Destination>,
    soft_forks: SoftForkSchedule,
}

impl Builder {
    /// A new chain config builder, with certain parameters set according to the chain type.
    pub fn new(chain_type: ChainType) -> Self {
        Self {
            chain_type,
            max_money: MAX_MONEY,
            burn_amounts: BTreeMap::new(),
            burn_addresses: BTreeMap::new(),
            soft_forks: chain_type.default_soft_forks(),
        }
    }

    /// New builder initialized with regtest chain type.
    pub fn test_chain() -> Self {
        Self::new(ChainType::Regtest)
    }

    pub fn build(self) -> ChainConfig {
        let Self {
            chain_type,
            max_money,
            burn_amounts,
            burn_addresses,
            soft_forks,
        } = self;

        ChainConfig {
            chain_type,
            max_money,
            burn_amounts,
            burn_addresses,
            soft_forks,
        }
    }

    #[must_use = "chain::config::Builder dropped prematurely"]
    pub fn burn_amount(mut self, kind: AssetBurnKind, amount: Amount) -> Self {
        self.burn_amounts.insert(kind, amount);
        self
    }

    #[must_use = "chain::config::Builder dropped prematurely"]
    pub fn burn_address(mut self, kind: AssetBurnKind, destination: Destination) -> Self {
        self.burn_addresses.insert(kind, destination);
        self
    }
}

macro_rules! builder_method {
    ($name:ident: $type:ty) => {
        #[doc = concat!("Set the `", stringify!($name), "` field.")]
        #[must_use = "chain::config::Builder dropped prematurely"]
        pub fn $name(mut self, $name: $type) -> Self {
            self.$name = $name;
            self
        }
    };
}

impl Builder {
    builder_method!(chain_type: ChainType);
    builder_method!(max_money: Amount);
    builder_method!(soft_forks: SoftForkSchedule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chain::upgrades::SoftFork,
        primitives::{BlockHeight, H160},
    };

    #[test]
    fn overrides() {
        let burn = Destination::ScriptHash(H160::repeat_byte(9));
        let config = Builder::test_chain()
            .max_money(Amount::from_coins(1000))
            .burn_amount(AssetBurnKind::Issue, Amount::from_coins(1))
            .burn_address(AssetBurnKind::Issue, burn)
            .soft_forks(SoftForkSchedule::activated_at(BlockHeight::new(5)))
            .build();

        assert_eq!(config.max_money(), Amount::from_coins(1000));
        assert_eq!(config.burn_amount(AssetBurnKind::Issue), Amount::from_coins(1));
        assert_eq!(config.burn_amount(AssetBurnKind::Reissue), Amount::from_coins(100));
        assert_eq!(config.burn_address(AssetBurnKind::Issue), burn);
        assert!(config.is_burn_address(&burn));
        assert!(!config.is_feature_active(SoftFork::Tokens, BlockHeight::new(4)));
        assert!(config.is_feature_active(SoftFork::Tokens, BlockHeight::new(5)));
    }
}
