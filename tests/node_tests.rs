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

use std::collections::{BTreeMap, BTreeSet};

use assets_core::{
    messaging::{AddressOwnership, MessageStatus},
    rewards::{
        DistributionRequest, DistributionStatus, Payout, PayoutCurrency, PayoutError,
        PayoutWallet, RewardsError,
    },
    AssetsNode, NodeConfigFile, NodeError,
};
use chainstate_test_framework::{test_address, TestFramework, TestScriptVerifier};
use common::{
    chain::{assets::IpfsHash, Block, Destination, Transaction},
    primitives::{hash_encoded, Amount, BlockHeight, Id, H256},
};
use rstest::rstest;
use test_utils::random::{make_seedable_rng, Seed};

struct Wallet {
    mine: BTreeSet<Destination>,
    coins: Amount,
    paid: Vec<Payout>,
}

impl Wallet {
    fn new(mine: &[u8]) -> Self {
        Self {
            mine: mine.iter().map(|n| test_address(*n)).collect(),
            coins: Amount::from_coins(1_000_000),
            paid: Vec::new(),
        }
    }
}

impl AddressOwnership for Wallet {
    fn is_mine(&self, address: &Destination) -> bool {
        self.mine.contains(address)
    }
}

impl PayoutWallet for Wallet {
    fn coin_balance(&self) -> Amount {
        self.coins
    }

    fn asset_balance(&self, _asset: &str) -> Amount {
        Amount::ZERO
    }

    fn estimate_fee(&self, _payouts: usize) -> Option<Amount> {
        Some(Amount::from_atoms(1000))
    }

    fn send_batch(
        &mut self,
        _currency: &PayoutCurrency,
        payouts: &[Payout],
    ) -> Result<Id<Transaction>, PayoutError> {
        self.paid.extend_from_slice(payouts);
        Ok(Id::new(hash_encoded(&(self.paid.len() as u64))))
    }
}

struct Harness {
    tf: TestFramework,
    node: AssetsNode,
    wallet: Wallet,
}

impl Harness {
    fn new(config: &str, mine: &[u8]) -> Self {
        let tf = TestFramework::builder().build();
        let config = NodeConfigFile::from_toml(config).unwrap();
        let mut node = AssetsNode::new(tf.chain_config().clone(), &config).unwrap();
        let mut wallet = Wallet::new(mine);

        let genesis = tf.best_block().clone();
        node.connect_block(&genesis, &BTreeMap::new(), &TestScriptVerifier, &mut wallet)
            .unwrap();
        Self { tf, node, wallet }
    }

    fn block(&mut self, txs: Vec<Transaction>) -> Block {
        let block = self.tf.make_block_builder().with_transactions(txs).build();
        self.node
            .connect_block(&block, &self.tf.utxos, &TestScriptVerifier, &mut self.wallet)
            .unwrap();
        self.tf.process_block(block.clone()).unwrap();
        block
    }

    fn empty_blocks(&mut self, count: usize) {
        for _ in 0..count {
            self.block(Vec::new());
        }
    }
}

const CONFIG: &str = r#"
chain_type = "regtest"

[rewards]
payout_margin = 5
"#;

#[test]
fn snapshot_and_reward() {
    let mut h = Harness::new(CONFIG, &[1]);
    let (a, b, c) = (test_address(1), test_address(2), test_address(3));

    let issue = h.tf.issue_asset_tx(a, "ROOT", Amount::from_coins(900), 0, true);
    h.block(vec![issue]);
    let transfer = h.tf.transfer_tx(a, "ROOT", b, Amount::from_coins(300));
    h.block(vec![transfer]);

    let snapshot_height = h.node.tip_height().next_height();
    assert_eq!(h.node.request_snapshot("ROOT", snapshot_height), Ok(true));
    let transfer = h.tf.transfer_tx(b, "ROOT", c, Amount::from_coins(100));
    h.block(vec![transfer]);

    let snapshot = h.node.get_snapshot("ROOT", snapshot_height).unwrap();
    assert_eq!(snapshot.holders.get(&a), Some(&Amount::from_coins(600)));
    assert_eq!(snapshot.holders.get(&b), Some(&Amount::from_coins(200)));
    assert_eq!(snapshot.holders.get(&c), Some(&Amount::from_coins(100)));

    let request = DistributionRequest {
        ownership_asset: "ROOT".to_owned(),
        snapshot_height,
        currency: PayoutCurrency::Coin,
        gross_amount: Amount::from_coins(90),
        exception_addresses: [a].into_iter().collect(),
    };

    let mut wallet = Wallet::new(&[]);
    let err = h.node.distribute_reward(request.clone(), &mut wallet).unwrap_err();
    assert!(matches!(
        err,
        NodeError::Rewards(RewardsError::PayoutTooEarly { margin: 5, .. })
    ));
    assert!(err.to_string().contains(
        "it is recommended to wait until chain is 5 blocks ahead of the snapshot height"
    ));

    h.empty_blocks(5);
    let (id, status) = h.node.distribute_reward(request, &mut wallet).unwrap();
    assert_eq!(status, DistributionStatus::Complete);
    assert_eq!(h.node.get_distribution_status(&id), Ok(DistributionStatus::Complete));
    assert_eq!(
        wallet.paid,
        vec![
            Payout {
                address: b,
                amount: Amount::from_coins(60)
            },
            Payout {
                address: c,
                amount: Amount::from_coins(30)
            },
        ]
    );
}

#[test]
fn snapshots_follow_reorgs() {
    let mut h = Harness::new(CONFIG, &[1]);
    let (a, b) = (test_address(1), test_address(2));

    let issue = h.tf.issue_asset_tx(a, "ROOT", Amount::from_coins(10), 0, true);
    h.block(vec![issue]);

    let height = h.node.tip_height().next_height();
    h.node.request_snapshot("ROOT", height).unwrap();
    let transfer = h.tf.transfer_tx(a, "ROOT", b, Amount::from_coins(4));
    let block = h.block(vec![transfer]);
    assert_eq!(h.node.get_snapshot("ROOT", height).unwrap().holders.len(), 2);

    h.node.disconnect_block(&block).unwrap();
    h.tf.disconnect_tip().unwrap();
    assert!(matches!(
        h.node.get_snapshot("ROOT", height),
        Err(NodeError::Rewards(RewardsError::SnapshotNotFound(_, _)))
    ));

    h.block(Vec::new());
    let snapshot = h.node.get_snapshot("ROOT", height).unwrap();
    assert_eq!(
        snapshot.holders.clone().into_iter().collect::<Vec<_>>(),
        vec![(a, Amount::from_coins(10))]
    );
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn channel_messages(#[case] seed: Seed) {
    use rand::Rng;

    let mut rng = make_seedable_rng(seed);
    let mut h = Harness::new(CONFIG, &[1]);
    let (a, b) = (test_address(1), test_address(2));

    // Issuing subscribes the wallet to the owner channel
    let issue = h.tf.issue_asset_tx(a, "ROOT", Amount::from_coins(10), 0, true);
    h.block(vec![issue]);
    assert_eq!(h.node.messages().channels(), vec!["ROOT!".to_owned()]);

    let payload = IpfsHash::TxId(H256::from_low_u64_be(rng.gen()));
    let message = h.tf.message_tx(a, "ROOT!", payload.clone(), None);
    let block = h.block(vec![message]);

    let messages = h.node.view_all_messages(block.timestamp());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].channel, "ROOT!");
    assert_eq!(messages[0].ipfs_hash, payload);
    assert_eq!(messages[0].status, MessageStatus::Unread);

    // Other issuers' channels are not followed
    let other = h.tf.issue_asset_tx(b, "OTHER", Amount::from_coins(10), 0, true);
    h.block(vec![other]);
    let message = h.tf.message_tx(b, "OTHER!", payload, None);
    h.block(vec![message]);
    assert_eq!(h.node.view_all_messages(block.timestamp()).len(), 1);

    h.node.messages_mut().clear_messages();
    assert!(h.node.view_all_messages(block.timestamp()).is_empty());
}

#[test]
fn mempool_claims_are_released_by_blocks() {
    let mut h = Harness::new(CONFIG, &[]);
    let a = test_address(1);

    let first = h.tf.issue_asset_tx(a, "ROOT", Amount::from_coins(10), 0, true);
    let second = h.tf.issue_asset_tx(test_address(2), "ROOT", Amount::from_coins(10), 0, true);

    h.node.accept_to_mempool(&first, &h.tf.utxos, &TestScriptVerifier).unwrap();
    assert!(h.node.accept_to_mempool(&second, &h.tf.utxos, &TestScriptVerifier).is_err());

    h.node.remove_from_mempool(&first);
    h.node.accept_to_mempool(&second, &h.tf.utxos, &TestScriptVerifier).unwrap();

    h.block(vec![second]);
    assert_eq!(
        h.node.index().get_asset_metadata("ROOT").unwrap().unwrap().amount(),
        Amount::from_coins(10)
    );
    assert_eq!(h.node.tip_height(), BlockHeight::new(1));
}
