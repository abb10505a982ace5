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

use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use chainstate::AssetIndexConfig;
use common::chain::{config::Builder, ChainConfig, ChainType};
use messaging::MessagingConfig;
use rewards::RewardsConfig;
use serde::{Deserialize, Serialize};

/// The node configuration file. Missing sections take their defaults.
#[must_use]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NodeConfigFile {
    /// `mainnet`, `testnet` or `regtest`.
    pub chain_type: Option<String>,
    pub asset_index: Option<AssetIndexConfig>,
    pub rewards: Option<RewardsConfig>,
    pub messaging: Option<MessagingConfig>,
}

impl NodeConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration at `config_path`; a missing file gives the defaults.
    pub fn read(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }
        let config_as_str = fs::read_to_string(config_path).with_context(|| {
            format!("Unable to read config file in {}", config_path.display())
        })?;
        Self::from_toml(&config_as_str)
    }

    pub fn from_toml(config_as_str: &str) -> Result<Self> {
        toml::from_str(config_as_str).context("Failed to parse config")
    }

    pub fn write(&self, config_path: &Path) -> Result<()> {
        let config_as_str = toml::to_string(self).context("Failed to serialize config")?;
        fs::write(config_path, config_as_str)
            .with_context(|| format!("Failed to write config to the '{config_path:?}' file"))
    }

    pub fn chain_type(&self) -> Result<ChainType> {
        match &self.chain_type {
            Some(name) => ChainType::from_str(name)
                .with_context(|| format!("Unknown chain type '{name}'")),
            None => Ok(ChainType::Mainnet),
        }
    }

    pub fn chain_config(&self) -> Result<ChainConfig> {
        Ok(Builder::new(self.chain_type()?).build())
    }

    pub fn asset_index_config(&self) -> AssetIndexConfig {
        self.asset_index.clone().unwrap_or_default()
    }

    pub fn rewards_config(&self) -> RewardsConfig {
        self.rewards.clone().unwrap_or_default()
    }

    pub fn messaging_config(&self) -> MessagingConfig {
        self.messaging.clone().unwrap_or_default()
    }
}
