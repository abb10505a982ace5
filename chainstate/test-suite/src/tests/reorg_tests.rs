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

use chainstate::{AssetIndexConfig, AssetIndexError};
use chainstate_test_framework::{test_address, TestFramework};
use common::{
    chain::{assets::FLAG_SET, Destination},
    primitives::{Amount, BlockHeight, Id, Idable, H256},
};
use rand::Rng;
use rstest::rstest;
use test_utils::{
    assert_matches,
    random::{make_seedable_rng, Seed},
};

use super::{process_tx, random_root_name};

/// What the queries report about one asset.
#[derive(Debug, PartialEq, Eq)]
struct AssetSnapshot {
    amount: Option<Amount>,
    holders: BTreeMap<Destination, Amount>,
    tagged: Vec<Destination>,
}

fn snapshot(tf: &TestFramework, name: &str) -> AssetSnapshot {
    AssetSnapshot {
        amount: tf.index.get_asset_metadata(name).unwrap().map(|data| data.amount()),
        holders: tf.index.get_asset_holders(name),
        tagged: tf.index.list_addresses_for_tag("#TAGGED"),
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn disconnect_restores_state(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut tf = TestFramework::builder().build();
    let (issuer, receiver) = (test_address(1), test_address(2));
    let name = random_root_name(&mut rng);
    let supply_coins = rng.gen_range(2..10_000);
    let supply = Amount::from_coins(supply_coins);

    let empty = snapshot(&tf, &name);

    let tx = tf.issue_asset_tx(issuer, &name, supply, 0, true);
    process_tx(&mut tf, tx).unwrap();
    let issued = snapshot(&tf, &name);
    assert_eq!(issued.amount, Some(supply));

    let sent = Amount::from_coins(rng.gen_range(1..supply_coins));
    let transfer = tf.transfer_tx(issuer, &name, receiver, sent);
    let reissue = tf.reissue_tx(issuer, &name, Amount::from_coins(10), true, None);
    let qualifier = tf.issue_qualifier_tx(test_address(3), "#TAGGED", Amount::from_coins(1));
    tf.make_block_builder()
        .with_transactions(vec![transfer, reissue, qualifier])
        .build_and_process()
        .unwrap();
    let tx = tf.tag_addresses_tx(test_address(3), "#TAGGED", vec![receiver], FLAG_SET);
    process_tx(&mut tf, tx).unwrap();

    let last = snapshot(&tf, &name);
    assert_eq!(last.amount, supply + Amount::from_coins(10));
    assert_eq!(last.holders.get(&receiver), Some(&sent));
    assert_eq!(last.tagged, vec![receiver]);

    let tag_block = tf.disconnect_tip().unwrap();
    let transfer_block = tf.disconnect_tip().unwrap();
    assert_eq!(snapshot(&tf, &name), issued);
    assert_eq!(tf.tip_height(), Some(BlockHeight::new(1)));

    let issue_block = tf.disconnect_tip().unwrap();
    assert_eq!(snapshot(&tf, &name), empty);
    assert!(tf.index.list_assets("*", None, 0).is_empty());

    // Connecting the same blocks again gives the same state
    for block in [issue_block, transfer_block, tag_block] {
        tf.process_block(block).unwrap();
    }
    assert_eq!(snapshot(&tf, &name), last);
}

#[test]
fn only_the_tip_can_be_disconnected() {
    let mut tf = TestFramework::builder().build();
    let tx = tf.issue_asset_tx(test_address(1), "ROOT", Amount::from_coins(10), 0, true);
    process_tx(&mut tf, tx).unwrap();
    let issue_block = tf.best_block().clone();
    tf.make_block_builder().build_and_process().unwrap();

    assert_matches!(
        tf.index.disconnect_block(&issue_block),
        Err(AssetIndexError::DisconnectNotTip(id)) if id == issue_block.get_id()
    );
    assert!(tf.index.get_asset_metadata("ROOT").unwrap().is_some());
}

#[test]
fn block_must_extend_the_tip() {
    let mut tf = TestFramework::builder().build();
    let block = tf.make_block_builder().with_parent(Id::new(H256::repeat_byte(1))).build();
    let block_id = block.get_id();
    assert_matches!(
        tf.process_block(block),
        Err(AssetIndexError::NotOnTip(id)) if id == block_id
    );
    assert_eq!(tf.tip_height(), Some(BlockHeight::zero()));
}

#[test]
fn undo_data_is_pruned_below_reorg_depth() {
    let mut tf = TestFramework::builder()
        .with_index_config(AssetIndexConfig::new().with_max_reorg_depth(2))
        .build();
    for _ in 0..4 {
        tf.make_block_builder().build_and_process().unwrap();
    }
    assert_eq!(tf.tip_height(), Some(BlockHeight::new(4)));

    for _ in 0..3 {
        tf.disconnect_tip().unwrap();
    }
    assert_eq!(tf.tip_height(), Some(BlockHeight::new(1)));

    let tip_id = tf.best_block_id();
    assert_matches!(tf.disconnect_tip(), Err(AssetIndexError::UndoNotFound(id)) if id == tip_id);
    assert_eq!(tf.tip_height(), Some(BlockHeight::new(1)));
}
