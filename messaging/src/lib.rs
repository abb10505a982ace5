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

//! Message channels of assets: subscriptions, the local message log and message outputs.

mod channel;
mod config;
mod error;
mod message;
mod ownership;
mod store;

pub use crate::{
    channel::{accepts_messages, channel_for_asset, is_channel},
    config::MessagingConfig,
    error::{MessagingError, Result},
    message::{build_message_output, Message, MessageStatus},
    ownership::AddressOwnership,
    store::MessageStore,
};
