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

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use common::{
    chain::{
        assets::{name, AssetKind, AssetOperation, IpfsHash},
        Block, ChainConfig, Destination, SoftFork, Transaction, UtxoOutPoint,
    },
    primitives::BlockHeight,
};
use logging::log;
use serialization::hex::HexEncode;
use utils::{ensure, tap_log::TapLog};

use crate::{
    channel::{channel_for_asset, is_channel},
    config::MessagingConfig,
    error::{MessagingError, Result},
    message::{Message, MessageStatus},
    ownership::AddressOwnership,
};

/// Channel subscriptions of a wallet and the messages received on them.
///
/// A subscription made at height `H` sees the messages of blocks above `H` only.
pub struct MessageStore {
    chain_config: Arc<ChainConfig>,
    config: MessagingConfig,
    subscriptions: BTreeMap<String, BlockHeight>,
    messages: BTreeMap<(BlockHeight, UtxoOutPoint), Message>,
    seen_addresses: BTreeSet<Destination>,
}

impl MessageStore {
    pub fn new(chain_config: Arc<ChainConfig>, config: MessagingConfig) -> Self {
        Self {
            chain_config,
            config,
            subscriptions: BTreeMap::new(),
            messages: BTreeMap::new(),
            seen_addresses: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &MessagingConfig {
        &self.config
    }

    /// Subscribes to `channel` from the block after `tip` on. Returns false if already
    /// subscribed.
    pub fn subscribe(&mut self, channel: &str, tip: BlockHeight) -> Result<bool> {
        ensure!(
            is_channel(channel),
            MessagingError::InvalidChannel(channel.to_owned())
        );
        if self.subscriptions.contains_key(channel) {
            return Ok(false);
        }
        let max = self.config.max_subscribed_channels;
        ensure!(
            self.subscriptions.len() < max,
            MessagingError::SubscriptionLimit(max)
        );

        self.subscriptions.insert(channel.to_owned(), tip);
        log::info!("Subscribed to channel {channel} at height {tip}");
        Ok(true)
    }

    pub fn unsubscribe(&mut self, channel: &str) -> Result<()> {
        ensure!(
            self.subscriptions.remove(channel).is_some(),
            MessagingError::NotSubscribed(channel.to_owned())
        );
        log::info!("Unsubscribed from channel {channel}");
        Ok(())
    }

    pub fn channels(&self) -> Vec<String> {
        self.subscriptions.keys().cloned().collect()
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.subscriptions.contains_key(channel)
    }

    /// Messages of the subscribed channels that are not expired at `now`, oldest first.
    ///
    /// They are returned with the status they had before the call, then marked read.
    pub fn view_all_messages(&mut self, now: u64) -> Vec<Message> {
        let subscriptions = &self.subscriptions;
        let mut result = Vec::new();
        for message in self.messages.values_mut() {
            let visible = subscriptions
                .get(&message.channel)
                .is_some_and(|since| message.height > *since);
            if visible && !message.is_expired(now) {
                result.push(message.clone());
                message.status = MessageStatus::Read;
            }
        }
        result
    }

    /// Drops every stored message. Returns how many there were.
    pub fn clear_messages(&mut self) -> usize {
        let count = self.messages.len();
        self.messages.clear();
        log::info!("Cleared {count} messages");
        count
    }

    /// Collects the messages of `block` and subscribes the wallet to the channels of the
    /// assets it issues or receives.
    pub fn on_block_connected(
        &mut self,
        block: &Block,
        height: BlockHeight,
        wallet: &impl AddressOwnership,
    ) {
        let messaging = self.chain_config.is_feature_active(SoftFork::MessagingRestricted, height);
        for tx in block.transactions() {
            self.connect_transaction(tx, height, block.timestamp(), messaging, wallet);
        }
    }

    fn connect_transaction(
        &mut self,
        tx: &Transaction,
        height: BlockHeight,
        time: u64,
        messaging: bool,
        wallet: &impl AddressOwnership,
    ) {
        for (index, output) in tx.outputs().iter().enumerate() {
            let decoded = output
                .asset_operation()
                .log_warn_pfx("Undecodable asset output")
                .ok()
                .flatten();

            let Some(decoded) = decoded else {
                if let Some(address) = output.destination() {
                    if wallet.is_mine(&address) {
                        self.seen_addresses.insert(address);
                    }
                }
                continue;
            };

            if messaging {
                if let Some((channel, ipfs_hash, expire_time)) = message_of(&decoded.operation) {
                    self.store_message(Message {
                        channel,
                        ipfs_hash,
                        outpoint: tx.outpoint(index as u32),
                        height,
                        time,
                        expire_time,
                        status: MessageStatus::Unread,
                    });
                }
            }

            let Some(holder) = decoded.holder.filter(|holder| wallet.is_mine(holder)) else {
                continue;
            };
            let first_receipt = self.seen_addresses.insert(holder);

            if !self.config.auto_subscribe {
                continue;
            }
            let issued = decoded.operation.is_issuance()
                || matches!(decoded.operation, AssetOperation::Owner { .. });
            if !issued && !first_receipt {
                continue;
            }
            for (asset, _) in decoded.operation.holdings() {
                if let Some(channel) = channel_for_asset(&asset) {
                    let _ = self
                        .subscribe(&channel, height)
                        .log_warn_pfx("Automatic channel subscription");
                }
            }
        }
    }

    fn store_message(&mut self, message: Message) {
        let visible = self
            .subscriptions
            .get(&message.channel)
            .is_some_and(|since| message.height > *since);
        let expired = message.is_expired(message.time);
        if !visible || expired {
            return;
        }
        log::info!(
            "Message {} on channel {} at {}",
            message.ipfs_hash.hex_encode(),
            message.channel,
            message.outpoint
        );
        self.messages.insert((message.height, message.outpoint), message);
    }

    /// Drops the messages of the disconnected height.
    pub fn on_block_disconnected(&mut self, height: BlockHeight) {
        self.messages.retain(|(message_height, _), _| *message_height != height);
    }
}

/// The message an output carries: an explicit message, or a memo sent along an owner
/// or channel token.
fn message_of(operation: &AssetOperation) -> Option<(String, IpfsHash, Option<u64>)> {
    match operation {
        AssetOperation::Message {
            channel,
            ipfs_hash,
            expire_time,
        } => Some((channel.clone(), ipfs_hash.clone(), *expire_time)),
        AssetOperation::Transfer {
            name: asset,
            memo: Some(memo),
            expire_time,
            ..
        } if matches!(name::classify(asset), AssetKind::Owner | AssetKind::Channel) => {
            Some((asset.clone(), memo.clone(), *expire_time))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use common::{
        chain::{
            config::{create_regtest, Builder},
            ChainType, SoftForkSchedule, TxInput, TxOutput,
        },
        primitives::{Amount, Id, COIN, H160, H256},
    };
    use rstest::rstest;
    use test_utils::random::{make_seedable_rng, Seed};

    use super::*;

    fn address(n: u8) -> Destination {
        Destination::PublicKeyHash(H160::repeat_byte(n))
    }

    fn mine() -> BTreeSet<Destination> {
        [address(1), address(2)].into_iter().collect()
    }

    fn store() -> MessageStore {
        MessageStore::new(Arc::new(create_regtest()), MessagingConfig::new())
    }

    fn hash(n: u8) -> IpfsHash {
        IpfsHash::TxId(H256::repeat_byte(n))
    }

    fn block(time: u64, outputs: Vec<TxOutput>) -> Block {
        let seed = H256::from_low_u64_be(time);
        let tx = Transaction::new(vec![TxInput::from_utxo(Id::new(seed), 0)], outputs);
        Block::new(Id::new(seed), time, vec![tx])
    }

    /// Connects a block with `outputs`, stamped `time`, at `height`.
    fn connect(
        store: &mut MessageStore,
        time: u64,
        height: u64,
        outputs: Vec<TxOutput>,
        wallet: &impl AddressOwnership,
    ) {
        store.on_block_connected(&block(time, outputs), BlockHeight::new(height), wallet);
    }

    fn message(holder: Destination, channel: &str, n: u8, expire_time: Option<u64>) -> TxOutput {
        TxOutput::asset(
            holder,
            &AssetOperation::Message {
                channel: channel.to_owned(),
                ipfs_hash: hash(n),
                expire_time,
            },
        )
    }

    fn transfer(to: Destination, asset: &str) -> TxOutput {
        TxOutput::asset(
            to,
            &AssetOperation::Transfer {
                name: asset.to_owned(),
                amount: Amount::from_coins(1),
                memo: None,
                expire_time: None,
            },
        )
    }

    #[test]
    fn subscriptions() {
        let mut store = MessageStore::new(
            Arc::new(create_regtest()),
            MessagingConfig::new().with_max_subscribed_channels(2),
        );
        let tip = BlockHeight::new(1);

        assert_eq!(store.subscribe("ROOT!", tip), Ok(true));
        assert_eq!(store.subscribe("ROOT!", tip), Ok(false));
        assert_eq!(
            store.subscribe("ROOT", tip),
            Err(MessagingError::InvalidChannel("ROOT".to_owned()))
        );
        assert_eq!(store.subscribe("#KYC", tip), Ok(true));
        assert_eq!(
            store.subscribe("ROOT~NEWS", tip),
            Err(MessagingError::SubscriptionLimit(2))
        );
        assert_eq!(store.channels(), vec!["#KYC".to_owned(), "ROOT!".to_owned()]);

        store.unsubscribe("#KYC").unwrap();
        assert_eq!(
            store.unsubscribe("#KYC"),
            Err(MessagingError::NotSubscribed("#KYC".to_owned()))
        );
        assert_eq!(store.subscribe("ROOT~NEWS", tip), Ok(true));
    }

    #[test]
    fn no_retroactive_messages() {
        let mut store = store();
        let wallet = mine();

        connect(&mut store, 100, 1, vec![message(address(5), "ROOT!", 1, None)], &wallet);
        store.subscribe("ROOT!", BlockHeight::new(1)).unwrap();
        assert!(store.view_all_messages(100).is_empty());

        connect(&mut store, 200, 2, vec![message(address(5), "ROOT!", 2, None)], &wallet);
        connect(&mut store, 300, 3, vec![message(address(5), "OTHER!", 3, None)], &wallet);

        let messages = store.view_all_messages(300);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].ipfs_hash, hash(2));
        assert_eq!(messages[0].height, BlockHeight::new(2));
        assert_eq!(messages[0].time, 200);
        assert_eq!(messages[0].status, MessageStatus::Unread);

        let messages = store.view_all_messages(300);
        assert_eq!(messages[0].status, MessageStatus::Read);

        assert_eq!(store.clear_messages(), 1);
        assert!(store.view_all_messages(300).is_empty());
    }

    #[test]
    fn expired_messages_are_skipped() {
        let mut store = store();
        store.subscribe("ROOT~NEWS", BlockHeight::zero()).unwrap();

        let outputs = vec![
            message(address(5), "ROOT~NEWS", 1, Some(50)),
            message(address(5), "ROOT~NEWS", 2, Some(150)),
            message(address(5), "ROOT~NEWS", 3, None),
        ];
        store.on_block_connected(&block(100, outputs), BlockHeight::new(1), &mine());

        let seen = |store: &mut MessageStore, now| {
            store.view_all_messages(now).into_iter().map(|m| m.ipfs_hash).collect::<Vec<_>>()
        };
        assert_eq!(seen(&mut store, 100), vec![hash(2), hash(3)]);
        assert_eq!(seen(&mut store, 150), vec![hash(3)]);
    }

    #[test]
    fn memos_on_owner_transfers_are_messages() {
        let mut store = store();
        store.subscribe("ROOT!", BlockHeight::zero()).unwrap();
        store.subscribe("#KYC", BlockHeight::zero()).unwrap();

        let with_memo = |asset: &str, n| {
            TxOutput::asset(
                address(5),
                &AssetOperation::Transfer {
                    name: asset.to_owned(),
                    amount: Amount::from_coins(1),
                    memo: Some(hash(n)),
                    expire_time: None,
                },
            )
        };
        connect(&mut store, 10, 1, vec![with_memo("ROOT!", 1), with_memo("#KYC", 2)], &mine());

        let messages = store.view_all_messages(10);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel, "ROOT!");
    }

    #[test]
    fn auto_subscription_guards_against_spam() {
        let mut store = store();
        let wallet = mine();

        // First receipt of address 1 subscribes
        connect(&mut store, 10, 1, vec![transfer(address(1), "FOO")], &wallet);
        // Address 1 was seen already
        connect(&mut store, 20, 2, vec![transfer(address(1), "SPAM")], &wallet);
        // Address 2 got coins first
        let coins = TxOutput::transfer(Amount::from_atoms(COIN), address(2));
        connect(&mut store, 30, 3, vec![coins, transfer(address(2), "BAR")], &wallet);
        // Not ours
        connect(&mut store, 40, 4, vec![transfer(address(3), "BAZ")], &wallet);

        assert_eq!(store.channels(), vec!["FOO!".to_owned()]);
    }

    #[test]
    fn issued_assets_subscribe() {
        let mut store = store();
        let wallet = mine();
        connect(&mut store, 10, 1, vec![transfer(address(1), "FOO")], &wallet);

        let issue = TxOutput::asset(
            address(1),
            &AssetOperation::Owner {
                name: "NEW!".to_owned(),
            },
        );
        connect(&mut store, 20, 2, vec![issue], &wallet);
        assert_eq!(store.channels(), vec!["FOO!".to_owned(), "NEW!".to_owned()]);

        let disabled = MessagingConfig::new().with_auto_subscribe(false);
        let mut store = MessageStore::new(Arc::new(create_regtest()), disabled);
        connect(&mut store, 10, 1, vec![transfer(address(1), "FOO")], &wallet);
        assert!(store.channels().is_empty());
    }

    #[test]
    fn disconnect_drops_messages_of_the_height() {
        let mut store = store();
        store.subscribe("ROOT!", BlockHeight::zero()).unwrap();
        connect(&mut store, 10, 1, vec![message(address(5), "ROOT!", 1, None)], &mine());
        connect(&mut store, 20, 2, vec![message(address(5), "ROOT!", 2, None)], &mine());

        store.on_block_disconnected(BlockHeight::new(2));
        let messages = store.view_all_messages(20);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].ipfs_hash, hash(1));
    }

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn messages_wait_for_activation(#[case] seed: Seed) {
        use rand::Rng;

        let mut rng = make_seedable_rng(seed);
        let activation = rng.gen_range(2..100);
        let config = Builder::new(ChainType::Regtest)
            .soft_forks(SoftForkSchedule::activated_at(BlockHeight::new(activation)))
            .build();
        let mut store = MessageStore::new(Arc::new(config), MessagingConfig::new());
        store.subscribe("ROOT!", BlockHeight::zero()).unwrap();

        let before = rng.gen_range(1..activation);
        connect(&mut store, 10, before, vec![message(address(5), "ROOT!", 1, None)], &mine());
        connect(&mut store, 20, activation, vec![message(address(5), "ROOT!", 2, None)], &mine());

        let messages = store.view_all_messages(20);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].ipfs_hash, hash(2));
    }
}
