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

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MessagingConfig {
    /// Most channels the wallet can be subscribed to.
    pub max_subscribed_channels: usize,
    /// Subscribe to the channels of assets the wallet issues or receives.
    pub auto_subscribe: bool,
}

impl MessagingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_subscribed_channels(mut self, max_subscribed_channels: usize) -> Self {
        self.max_subscribed_channels = max_subscribed_channels;
        self
    }

    pub fn with_auto_subscribe(mut self, auto_subscribe: bool) -> Self {
        self.auto_subscribe = auto_subscribe;
        self
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            max_subscribed_channels: 200,
            auto_subscribe: true,
        }
    }
}
