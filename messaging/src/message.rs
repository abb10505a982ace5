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

use common::{
    chain::{
        assets::{AssetOperation, IpfsHash},
        ChainConfig, Destination, SoftFork, TxOutput, UtxoOutPoint,
    },
    primitives::BlockHeight,
};
use serde::Serialize;
use utils::ensure;

use crate::{
    channel::accepts_messages,
    error::{MessagingError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageStatus {
    Unread,
    Read,
}

/// A message seen on a subscribed channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub channel: String,
    pub ipfs_hash: IpfsHash,
    pub outpoint: UtxoOutPoint,
    pub height: BlockHeight,
    pub time: u64,
    pub expire_time: Option<u64>,
    pub status: MessageStatus,
}

impl Message {
    pub fn is_expired(&self, now: u64) -> bool {
        self.expire_time.is_some_and(|expire| expire <= now)
    }
}

/// An output broadcasting `ipfs_hash` on `channel`.
///
/// The output sends the channel token back to `holder`, who has to spend it in the same
/// transaction.
pub fn build_message_output(
    chain_config: &ChainConfig,
    height: BlockHeight,
    holder: Destination,
    channel: &str,
    ipfs_hash: IpfsHash,
    expire_time: Option<u64>,
) -> Result<TxOutput> {
    ensure!(
        chain_config.is_feature_active(SoftFork::MessagingRestricted, height),
        MessagingError::MessagingNotActive(height)
    );
    ensure!(
        accepts_messages(channel),
        MessagingError::ChannelCannotMessage(channel.to_owned())
    );

    Ok(TxOutput::asset(
        holder,
        &AssetOperation::Message {
            channel: channel.to_owned(),
            ipfs_hash,
            expire_time,
        },
    ))
}
