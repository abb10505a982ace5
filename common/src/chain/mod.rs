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

pub mod assets;
pub mod block;
pub mod config;
mod destination;
pub mod transaction;
pub mod upgrades;

pub use block::{Block, BlockHeader};
pub use config::{AssetBurnKind, ChainConfig, ChainType};
pub use destination::{Destination, DestinationParseError};
pub use transaction::{Transaction, TxInput, TxOutput, UtxoOutPoint};
pub use upgrades::{DeploymentStatus, NetUpgrades, SoftFork, SoftForkSchedule};
