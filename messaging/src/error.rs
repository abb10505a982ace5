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
use common::primitives::BlockHeight;

pub type Result<T> = core::result::Result<T, MessagingError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("{0} is not a message channel")]
    InvalidChannel(String),
    #[error("Messages can't be sent on {0}, only on owner and message channels")]
    ChannelCannotMessage(String),
    #[error("Not subscribed to channel {0}")]
    NotSubscribed(String),
    #[error("Subscribed to the maximum of {0} channels")]
    SubscriptionLimit(usize),
    #[error("Messaging is not active at height {0}")]
    MessagingNotActive(BlockHeight),
}

impl MessagingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MessagingError::InvalidChannel(_) => ErrorKind::Formatting,
            MessagingError::ChannelCannotMessage(_) => ErrorKind::Structural,
            MessagingError::NotSubscribed(_) | MessagingError::SubscriptionLimit(_) => {
                ErrorKind::Resource
            }
            MessagingError::MessagingNotActive(_) => ErrorKind::Activation,
        }
    }
}
