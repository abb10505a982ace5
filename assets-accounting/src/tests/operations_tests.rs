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
    chain::{assets::IpfsHash, Destination, Transaction, UtxoOutPoint},
    primitives::{Amount, BlockHeight, Id, H160, H256},
};
use rand::Rng;
use rstest::rstest;
use test_utils::{
    assert_encoded_eq,
    random::{make_seedable_rng, Seed},
    random_asset_name_chars, try_all_single_bit_mutations,
};

use crate::{
    AssetData, AssetsAccountingCache, AssetsAccountingDB, AssetsAccountingDeltaData,
    AssetsAccountingOperations, AssetsAccountingView, Error, FlushableAssetsAccountingView,
    InMemoryAssetsAccounting,
};

fn random_destination(rng: &mut impl Rng) -> Destination {
    Destination::PublicKeyHash(H160::from_low_u64_be(rng.gen()))
}

fn random_outpoint(rng: &mut impl Rng) -> UtxoOutPoint {
    UtxoOutPoint::new(
        Id::<Transaction>::new(H256::from_low_u64_be(rng.gen())),
        rng.gen_range(0..10),
    )
}

fn make_asset(rng: &mut impl Rng, ipfs_hash: Option<IpfsHash>) -> AssetData {
    AssetData::new(
        random_asset_name_chars(rng, 3..30),
        Amount::from_coins(rng.gen_range(1..1000)),
        0,
        true,
        ipfs_hash,
        BlockHeight::new(1),
    )
}

fn flush(storage: &mut InMemoryAssetsAccounting, delta: AssetsAccountingDeltaData) {
    let mut db = AssetsAccountingDB::new(storage);
    let _ = db.batch_write_assets_data(delta).unwrap();
}

#[test]
fn stored_asset_data_encoding() {
    let data = AssetData::new(
        "FOO".to_owned(),
        Amount::from_atoms(1),
        2,
        true,
        None,
        BlockHeight::new(1),
    );
    assert_encoded_eq(&data, "0c464f4f0402010004");

    for mutated in try_all_single_bit_mutations(&data) {
        assert_ne!(mutated.ok().as_ref(), Some(&data));
    }
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn issue_and_undo(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let storage = InMemoryAssetsAccounting::new();
    let db = AssetsAccountingDB::new(&storage);
    let mut cache = AssetsAccountingCache::new(&db);

    let asset = make_asset(&mut rng, None);
    let undo = cache.issue_asset(asset.clone()).unwrap();
    assert_eq!(cache.get_asset_data(asset.name()), Ok(Some(asset.clone())));

    assert_eq!(
        cache.issue_asset(asset.clone()),
        Err(Error::AssetAlreadyExists(asset.name().to_owned()))
    );

    cache.undo(undo).unwrap();
    assert_eq!(cache.get_asset_data(asset.name()), Ok(None));
    assert!(cache.data().is_empty());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn credit_debit_flush_and_revert(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut storage = InMemoryAssetsAccounting::new();

    let asset = make_asset(&mut rng, None);
    let holder = random_destination(&mut rng);
    let outpoint1 = random_outpoint(&mut rng);
    let outpoint2 = random_outpoint(&mut rng);

    // First block: issue and credit two outputs
    let undos = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undos = vec![
            cache.issue_asset(asset.clone()).unwrap(),
            cache.credit(asset.name(), holder, outpoint1, Amount::from_coins(3)).unwrap(),
            cache.credit(asset.name(), holder, outpoint2, Amount::from_coins(4)).unwrap(),
        ];
        let delta = cache.consume();
        flush(&mut storage, delta);
        undos
    };
    let after_first_block = storage.clone();

    assert_eq!(
        storage.balances_by_address(&holder).get(asset.name()),
        Some(&Amount::from_coins(7))
    );
    assert_eq!(
        storage.outpoints_by_asset_and_address(asset.name(), &holder).len(),
        2
    );

    // Second block: spend one output
    let spend_undo = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undo = cache.debit(asset.name(), holder, outpoint1).unwrap();
        assert_eq!(
            cache.debit(asset.name(), holder, outpoint1),
            Err(Error::OutpointNotFound(asset.name().to_owned(), holder, outpoint1))
        );
        let delta = cache.consume();
        flush(&mut storage, delta);
        undo
    };
    assert_eq!(
        storage.asset_holders(asset.name()).get(&holder),
        Some(&Amount::from_coins(4))
    );

    // Disconnect the second block
    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        cache.undo(spend_undo).unwrap();
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    assert_eq!(storage, after_first_block);

    // Disconnect the first block, undos in reverse order
    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        undos.into_iter().rev().for_each(|u| cache.undo(u).unwrap());
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    assert_eq!(storage, InMemoryAssetsAccounting::new());
    assert!(storage.balances_by_address(&holder).is_empty());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn reissue_undo_restores_ipfs_presence(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut storage = InMemoryAssetsAccounting::new();

    let asset = make_asset(&mut rng, None);
    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let _ = cache.issue_asset(asset.clone()).unwrap();
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    let before = storage.clone();

    let mut hash = [0u8; 34];
    hash[0] = 0x12;
    hash[1] = 0x20;
    let reissued = asset
        .reissue(
            Amount::from_coins(5),
            false,
            Some(2),
            Some(IpfsHash::Multihash(hash)),
            BlockHeight::new(2),
        )
        .unwrap();

    let undo = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undo = cache.reissue_asset(reissued.clone()).unwrap();
        let delta = cache.consume();
        flush(&mut storage, delta);
        undo
    };
    let stored = storage.data().asset_data.get(asset.name()).cloned().unwrap();
    assert_eq!(stored, reissued);
    assert!(stored.ipfs_hash().is_some());
    assert_eq!(stored.amount(), (asset.amount() + Amount::from_coins(5)).unwrap());

    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        cache.undo(undo).unwrap();
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    assert_eq!(storage, before);
    assert!(storage.data().asset_data.get(asset.name()).unwrap().ipfs_hash().is_none());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn sub_qualifier_tag_marks_root(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let storage = InMemoryAssetsAccounting::new();
    let db = AssetsAccountingDB::new(&storage);
    let mut cache = AssetsAccountingCache::new(db);
    let holder = random_destination(&mut rng);
    let height = BlockHeight::new(rng.gen_range(1..1000));

    let undo = cache.set_qualifier_tag("#KYC/#US", holder, true, height).unwrap();
    assert_eq!(
        cache.get_root_qualifier_tag("#KYC", &holder).unwrap().map(|r| r.is_assigned()),
        Some(true)
    );
    assert_eq!(cache.get_qualifier_tag("#KYC", &holder), Ok(None));

    let untag = cache.set_qualifier_tag("#KYC/#US", holder, false, height).unwrap();
    let record = cache.get_qualifier_tag("#KYC/#US", &holder).unwrap().unwrap();
    assert!(!record.assigned);
    assert_eq!(record.changed_at, height);

    cache.undo(untag).unwrap();
    cache.undo(undo).unwrap();
    assert_eq!(cache.get_root_qualifier_tag("#KYC", &holder), Ok(None));
    assert!(cache.data().is_empty());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn root_qualifier_held_while_any_sub_qualifier_assigned(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut storage = InMemoryAssetsAccounting::new();
    let holder = random_destination(&mut rng);
    let height = BlockHeight::new(rng.gen_range(1..1000));
    let root_subs = |storage: &InMemoryAssetsAccounting| {
        storage
            .data()
            .root_qualifier_tags
            .get(&("#KYC".to_owned(), holder))
            .map(|record| record.sub_qualifiers.iter().cloned().collect::<Vec<_>>())
    };

    let undos = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undos = vec![
            cache.set_qualifier_tag("#KYC/#US", holder, true, height).unwrap(),
            cache.set_qualifier_tag("#KYC/#CA", holder, true, height).unwrap(),
            cache.set_qualifier_tag("#KYC/#US", holder, false, height.next_height()).unwrap(),
        ];
        let root = cache.get_root_qualifier_tag("#KYC", &holder).unwrap().unwrap();
        assert!(root.is_assigned());
        assert_eq!(root.changed_at, height.next_height());
        let delta = cache.consume();
        flush(&mut storage, delta);
        undos
    };
    assert_eq!(root_subs(&storage), Some(vec!["#KYC/#CA".to_owned()]));

    let last = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undo = cache.set_qualifier_tag("#KYC/#CA", holder, false, height).unwrap();
        assert!(!cache.get_root_qualifier_tag("#KYC", &holder).unwrap().unwrap().is_assigned());
        cache.undo(undo).unwrap();
        assert_eq!(
            cache.get_root_qualifier_tag("#KYC", &holder).unwrap().map(|r| r.is_assigned()),
            Some(true)
        );
        cache.consume()
    };
    flush(&mut storage, last);
    assert_eq!(root_subs(&storage), Some(vec!["#KYC/#CA".to_owned()]));

    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        undos.into_iter().rev().for_each(|u| cache.undo(u).unwrap());
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    assert_eq!(storage, InMemoryAssetsAccounting::new());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn freezes_and_verifier(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut storage = InMemoryAssetsAccounting::new();
    let holder = random_destination(&mut rng);
    let height = BlockHeight::new(7);

    let undos = {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        let undos = vec![
            cache.set_address_freeze("$FOO", holder, true, height).unwrap(),
            cache.set_global_freeze("$FOO", true, height).unwrap(),
            cache.set_verifier("$FOO", "KYC".to_owned()).unwrap(),
        ];
        let delta = cache.consume();
        flush(&mut storage, delta);
        undos
    };
    assert_eq!(storage.frozen_addresses("$FOO"), vec![holder]);
    assert_eq!(storage.data().verifiers.get("$FOO").map(String::as_str), Some("KYC"));
    assert!(storage.data().global_freezes.get("$FOO").unwrap().frozen);

    {
        let db = AssetsAccountingDB::new(&storage);
        let mut cache = AssetsAccountingCache::new(db);
        undos.into_iter().rev().for_each(|u| cache.undo(u).unwrap());
        let delta = cache.consume();
        flush(&mut storage, delta);
    }
    assert_eq!(storage, InMemoryAssetsAccounting::new());
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn nested_caches(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let storage = InMemoryAssetsAccounting::new();
    let db = AssetsAccountingDB::new(&storage);
    let mut block_cache = AssetsAccountingCache::new(db);

    let asset = make_asset(&mut rng, None);
    let holder = random_destination(&mut rng);
    let outpoint = random_outpoint(&mut rng);

    let mut tx_cache = AssetsAccountingCache::new(&block_cache);
    let _ = tx_cache.issue_asset(asset.clone()).unwrap();
    let _ = tx_cache.credit(asset.name(), holder, outpoint, asset.amount()).unwrap();
    let delta = tx_cache.consume();

    let _ = block_cache.batch_write_assets_data(delta).unwrap();
    assert_eq!(block_cache.get_balance(asset.name(), &holder), Ok(asset.amount()));
    assert_eq!(
        block_cache.get_outpoint_amount(asset.name(), &holder, &outpoint),
        Ok(Some(asset.amount()))
    );
}

#[rstest]
#[trace]
#[case(Seed::from_entropy())]
fn flush_rejects_stale_delta(#[case] seed: Seed) {
    let mut rng = make_seedable_rng(seed);
    let mut storage = InMemoryAssetsAccounting::new();
    let asset = make_asset(&mut rng, None);

    let make_issue_delta = |storage: &InMemoryAssetsAccounting| {
        let db = AssetsAccountingDB::new(storage);
        let mut cache = AssetsAccountingCache::new(db);
        let _ = cache.issue_asset(asset.clone()).unwrap();
        cache.consume()
    };

    let first = make_issue_delta(&storage);
    let second = make_issue_delta(&storage);

    let _ = AssetsAccountingDB::new(&mut storage).batch_write_assets_data(first).unwrap();
    assert_eq!(
        AssetsAccountingDB::new(&mut storage).batch_write_assets_data(second),
        Err(Error::AccountingError(accounting::Error::DataMismatch))
    );
}
