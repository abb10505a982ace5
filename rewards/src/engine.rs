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

use std::{collections::BTreeMap, sync::Arc};

use common::{
    chain::{assets::name, ChainConfig, Transaction},
    primitives::{amount::DECIMALS, Amount, BlockHeight, Id},
};
use logging::log;
use utils::ensure;

use crate::{
    config::RewardsConfig,
    distribution::{
        batch_count, compute_payouts, total_payout, DistributionRequest, DistributionStatus,
        Payout, PayoutCurrency,
    },
    error::{Result, RewardsError},
    holders::AssetHolders,
    snapshot::{Snapshot, SnapshotRequest, SnapshotStore},
    wallet::{PayoutError, PayoutWallet},
};

/// A distribution and how far its payment got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRecord {
    pub request: DistributionRequest,
    pub status: DistributionStatus,
    pub payouts: Vec<Payout>,
    /// Transactions of the batches already paid, by batch index.
    pub sent_batches: BTreeMap<usize, Id<Transaction>>,
}

impl DistributionRecord {
    fn batches(&self, max_per_tx: usize) -> impl Iterator<Item = (usize, &[Payout])> {
        self.payouts.chunks(max_per_tx.max(1)).enumerate()
    }

    pub fn batch_count(&self, max_per_tx: usize) -> usize {
        batch_count(self.payouts.len(), max_per_tx)
    }
}

pub struct RewardsEngine {
    chain_config: Arc<ChainConfig>,
    config: RewardsConfig,
    snapshots: SnapshotStore,
    distributions: BTreeMap<Id<DistributionRequest>, DistributionRecord>,
}

impl RewardsEngine {
    pub fn new(chain_config: Arc<ChainConfig>, config: RewardsConfig) -> Result<Self> {
        ensure!(
            config.max_payouts_per_transaction > 0,
            RewardsError::InvalidConfig("max_payouts_per_transaction must be positive")
        );
        Ok(Self {
            chain_config,
            config,
            snapshots: SnapshotStore::new(),
            distributions: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &RewardsConfig {
        &self.config
    }

    pub fn request_snapshot(
        &mut self,
        asset: &str,
        height: BlockHeight,
        tip: BlockHeight,
    ) -> Result<bool> {
        self.snapshots.request_snapshot(asset, height, tip)
    }

    pub fn cancel_snapshot_request(&mut self, asset: &str, height: BlockHeight) -> Result<()> {
        self.snapshots.cancel_snapshot_request(asset, height)
    }

    pub fn list_snapshot_requests(
        &self,
        asset: Option<&str>,
        height: Option<BlockHeight>,
    ) -> Vec<SnapshotRequest> {
        self.snapshots.list_snapshot_requests(asset, height)
    }

    pub fn get_snapshot(&self, asset: &str, height: BlockHeight) -> Result<&Snapshot> {
        self.snapshots.get_snapshot(asset, height)
    }

    pub fn get_distribution(&self, id: &Id<DistributionRequest>) -> Result<&DistributionRecord> {
        self.distributions.get(id).ok_or(RewardsError::DistributionNotFound(*id))
    }

    pub fn get_distribution_status(
        &self,
        id: &Id<DistributionRequest>,
    ) -> Result<DistributionStatus> {
        self.get_distribution(id).map(|record| record.status)
    }

    /// Pays `request` out of `wallet`.
    ///
    /// The same request is recorded once; submitting it again retries the batches that
    /// were not paid yet. Failures to pay are reported through the returned status.
    pub fn distribute_reward(
        &mut self,
        request: DistributionRequest,
        tip: BlockHeight,
        holders: &impl AssetHolders,
        wallet: &mut impl PayoutWallet,
    ) -> Result<(Id<DistributionRequest>, DistributionStatus)> {
        ensure!(
            request.gross_amount > Amount::ZERO,
            RewardsError::ZeroReward
        );
        ensure!(
            name::is_valid(&request.ownership_asset),
            RewardsError::InvalidAssetName(request.ownership_asset.clone())
        );

        let margin = self.config.payout_margin;
        let payable = request
            .snapshot_height
            .checked_add(margin)
            .is_some_and(|height| tip >= height);
        ensure!(
            payable,
            RewardsError::PayoutTooEarly {
                margin,
                snapshot_height: request.snapshot_height,
                tip,
            }
        );

        let id = request.id();
        if !self.distributions.contains_key(&id) {
            let record = self.new_record(request, holders)?;
            log::info!(
                "Distribution {id} of {} recorded with {} payouts",
                record.request.ownership_asset,
                record.payouts.len()
            );
            self.distributions.insert(id, record);
        }

        let max_per_tx = self.config.max_payouts_per_transaction;
        let record = self.distributions.get_mut(&id).ok_or(RewardsError::DistributionNotFound(id))?;
        if !record.status.is_complete() {
            process(record, max_per_tx, wallet);
        }
        Ok((id, record.status))
    }

    fn new_record(
        &self,
        request: DistributionRequest,
        holders: &impl AssetHolders,
    ) -> Result<DistributionRecord> {
        let units = match &request.currency {
            PayoutCurrency::Coin => DECIMALS,
            PayoutCurrency::Asset(asset) => holders
                .asset_units(asset)
                .ok_or_else(|| RewardsError::PayoutAssetNotFound(asset.clone()))?,
        };

        let snapshot = self
            .snapshots
            .get_snapshot(&request.ownership_asset, request.snapshot_height)?;
        let payouts = compute_payouts(
            &snapshot.holders,
            request.gross_amount,
            units,
            &request.exception_addresses,
            |address| self.chain_config.is_burn_address(address),
        )?;
        total_payout(&payouts).ok_or(RewardsError::AmountOverflow)?;

        Ok(DistributionRecord {
            request,
            status: DistributionStatus::Pending,
            payouts,
            sent_batches: BTreeMap::new(),
        })
    }

    /// Takes the snapshots due at `height` and retries the unfinished distributions.
    pub fn on_block_connected(
        &mut self,
        height: BlockHeight,
        holders: &impl AssetHolders,
        wallet: &mut impl PayoutWallet,
    ) {
        self.snapshots.on_block_connected(height, holders);

        let max_per_tx = self.config.max_payouts_per_transaction;
        for (id, record) in self.distributions.iter_mut() {
            if record.status.is_complete() {
                continue;
            }
            log::debug!("Retrying distribution {id}");
            process(record, max_per_tx, wallet);
        }
    }

    pub fn on_block_disconnected(&mut self, height: BlockHeight) {
        self.snapshots.on_block_disconnected(height);
    }
}

/// Pays the unsent batches of `record` until one fails.
fn process(record: &mut DistributionRecord, max_per_tx: usize, wallet: &mut impl PayoutWallet) {
    let pending: Vec<(usize, Vec<Payout>)> = record
        .batches(max_per_tx)
        .filter(|(index, _)| !record.sent_batches.contains_key(index))
        .map(|(index, batch)| (index, batch.to_vec()))
        .collect();

    for (index, batch) in pending {
        if let Err(status) = check_funds(&record.request.currency, &batch, wallet) {
            log::warn!(
                "Distribution {} batch {index} not paid: {status:?}",
                record.request.id()
            );
            record.status = status;
            return;
        }

        match wallet.send_batch(&record.request.currency, &batch) {
            Ok(tx_id) => {
                log::info!(
                    "Distribution {} batch {index} paid in transaction {tx_id}",
                    record.request.id()
                );
                record.sent_batches.insert(index, tx_id);
            }
            Err(e) => {
                log::error!("Distribution {} batch {index} failed: {e}", record.request.id());
                record.status = match e {
                    PayoutError::CreateTransaction(_) => {
                        DistributionStatus::FailedCreateTransaction
                    }
                    PayoutError::CommitTransaction(_) => {
                        DistributionStatus::FailedCommitTransaction
                    }
                    PayoutError::Network(_) => DistributionStatus::NetworkError,
                };
                return;
            }
        }
    }

    record.status = DistributionStatus::Complete;
}

fn check_funds(
    currency: &PayoutCurrency,
    batch: &[Payout],
    wallet: &impl PayoutWallet,
) -> core::result::Result<(), DistributionStatus> {
    let total = total_payout(batch).ok_or(DistributionStatus::FailedCreateTransaction)?;
    let fee = wallet
        .estimate_fee(batch.len())
        .ok_or(DistributionStatus::FailedCreateTransaction)?;
    let coins = wallet.coin_balance();

    match currency {
        PayoutCurrency::Coin => {
            ensure!(total <= coins, DistributionStatus::InsufficientFunds);
            let needed = (total + fee).ok_or(DistributionStatus::InsufficientFee)?;
            ensure!(needed <= coins, DistributionStatus::InsufficientFee);
        }
        PayoutCurrency::Asset(asset) => {
            ensure!(
                total <= wallet.asset_balance(asset),
                DistributionStatus::InsufficientRewards
            );
            ensure!(fee <= coins, DistributionStatus::InsufficientFee);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use common::{
        chain::{config::create_regtest, Destination},
        primitives::{hash_encoded, H160},
    };
    use rstest::rstest;
    use test_utils::random::{make_seedable_rng, Seed};

    use super::*;

    fn address(n: u8) -> Destination {
        Destination::PublicKeyHash(H160::repeat_byte(n))
    }

    #[derive(Default)]
    struct Holders(BTreeMap<String, (u8, BTreeMap<Destination, Amount>)>);

    impl Holders {
        fn with(mut self, asset: &str, units: u8, amounts: &[(u8, u128)]) -> Self {
            let map = amounts
                .iter()
                .map(|(n, coins)| (address(*n), Amount::from_coins(*coins)))
                .collect();
            self.0.insert(asset.to_owned(), (units, map));
            self
        }
    }

    impl AssetHolders for Holders {
        fn asset_holders(&self, asset: &str) -> BTreeMap<Destination, Amount> {
            self.0.get(asset).map(|(_, holders)| holders.clone()).unwrap_or_default()
        }

        fn asset_units(&self, asset: &str) -> Option<u8> {
            self.0.get(asset).map(|(units, _)| *units)
        }
    }

    struct MockWallet {
        coins: Amount,
        assets: BTreeMap<String, Amount>,
        fee: Option<Amount>,
        fail_with: Option<PayoutError>,
        sent: Vec<Vec<Payout>>,
    }

    impl MockWallet {
        fn with_coins(coins: u128) -> Self {
            Self {
                coins: Amount::from_coins(coins),
                assets: BTreeMap::new(),
                fee: Some(Amount::from_atoms(1000)),
                fail_with: None,
                sent: Vec::new(),
            }
        }
    }

    impl PayoutWallet for MockWallet {
        fn coin_balance(&self) -> Amount {
            self.coins
        }

        fn asset_balance(&self, asset: &str) -> Amount {
            self.assets.get(asset).copied().unwrap_or(Amount::ZERO)
        }

        fn estimate_fee(&self, _payouts: usize) -> Option<Amount> {
            self.fee
        }

        fn send_batch(
            &mut self,
            currency: &PayoutCurrency,
            payouts: &[Payout],
        ) -> core::result::Result<Id<Transaction>, PayoutError> {
            if let Some(e) = &self.fail_with {
                return Err(e.clone());
            }
            let total = total_payout(payouts).unwrap();
            match currency {
                PayoutCurrency::Coin => self.coins = (self.coins - total).unwrap(),
                PayoutCurrency::Asset(asset) => {
                    let balance = self.assets.get_mut(asset).unwrap();
                    *balance = (*balance - total).unwrap();
                }
            }
            self.coins = (self.coins - self.fee.unwrap()).unwrap();
            self.sent.push(payouts.to_vec());
            Ok(Id::new(hash_encoded(&(self.sent.len() as u64))))
        }
    }

    fn engine(config: RewardsConfig) -> RewardsEngine {
        RewardsEngine::new(Arc::new(create_regtest()), config).unwrap()
    }

    fn coin_request(height: u64, coins: u128) -> DistributionRequest {
        DistributionRequest {
            ownership_asset: "ROOT".to_owned(),
            snapshot_height: BlockHeight::new(height),
            currency: PayoutCurrency::Coin,
            gross_amount: Amount::from_coins(coins),
            exception_addresses: BTreeSet::new(),
        }
    }

    /// Engine with a snapshot of ROOT taken at height 10.
    fn engine_with_snapshot(config: RewardsConfig, holders: &Holders) -> RewardsEngine {
        let mut engine = engine(config);
        engine.request_snapshot("ROOT", BlockHeight::new(10), BlockHeight::new(5)).unwrap();
        engine.snapshots.on_block_connected(BlockHeight::new(10), holders);
        engine
    }

    #[test]
    fn payout_waits_for_the_margin() {
        let holders = Holders::default().with("ROOT", 0, &[(1, 1)]);
        let mut engine = engine_with_snapshot(RewardsConfig::new(), &holders);
        let mut wallet = MockWallet::with_coins(1000);

        let err = engine
            .distribute_reward(coin_request(10, 100), BlockHeight::new(69), &holders, &mut wallet)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "For security of the rewards payout, it is recommended to wait until chain is 60 blocks ahead of the snapshot height. Snapshot height: 10, chain tip: 69"
        );
        assert_eq!(err.kind(), chainstate::ErrorKind::Timing);

        let (_, status) = engine
            .distribute_reward(coin_request(10, 100), BlockHeight::new(70), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::Complete);
    }

    #[test]
    fn pays_each_holder_its_share() {
        let holders = Holders::default().with("ROOT", 0, &[(1, 9), (2, 3), (3, 2), (4, 1)]);
        let config = RewardsConfig::new().with_payout_margin(0);
        let mut engine = engine_with_snapshot(config, &holders);
        let mut wallet = MockWallet::with_coins(1000);

        let mut request = coin_request(10, 10);
        request.currency = PayoutCurrency::Asset("PAY".to_owned());
        let holders = holders.with("PAY", 0, &[(9, 100)]);
        wallet.assets.insert("PAY".to_owned(), Amount::from_coins(100));

        let (id, status) = engine
            .distribute_reward(request, BlockHeight::new(10), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::Complete);
        assert_eq!(engine.get_distribution_status(&id), Ok(DistributionStatus::Complete));

        let paid: Vec<_> =
            wallet.sent.concat().into_iter().map(|p| (p.address, p.amount)).collect();
        assert_eq!(
            paid,
            vec![
                (address(1), Amount::from_coins(6)),
                (address(2), Amount::from_coins(2)),
                (address(3), Amount::from_coins(1)),
            ]
        );
        assert_eq!(wallet.assets["PAY"], Amount::from_coins(91));
    }

    #[test]
    fn unknown_payout_asset() {
        let holders = Holders::default().with("ROOT", 0, &[(1, 1)]);
        let mut engine = engine_with_snapshot(RewardsConfig::new().with_payout_margin(0), &holders);
        let mut request = coin_request(10, 10);
        request.currency = PayoutCurrency::Asset("NOPE".to_owned());

        assert_eq!(
            engine.distribute_reward(
                request,
                BlockHeight::new(10),
                &holders,
                &mut MockWallet::with_coins(1)
            ),
            Err(RewardsError::PayoutAssetNotFound("NOPE".to_owned()))
        );
        assert_eq!(
            engine.distribute_reward(
                coin_request(11, 10),
                BlockHeight::new(20),
                &holders,
                &mut MockWallet::with_coins(1)
            ),
            Err(RewardsError::SnapshotNotFound("ROOT".to_owned(), BlockHeight::new(11)))
        );
    }

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn payouts_are_batched(#[case] seed: Seed) {
        use rand::Rng;

        let mut rng = make_seedable_rng(seed);
        let max_per_tx = rng.gen_range(1..200);
        let count = rng.gen_range(1..=250u8);
        let amounts: Vec<(u8, u128)> = (0..count).map(|n| (n, 1)).collect();

        let holders = Holders::default().with("ROOT", 0, &amounts);
        let config = RewardsConfig::new()
            .with_payout_margin(0)
            .with_max_payouts_per_transaction(max_per_tx);
        let mut engine = engine_with_snapshot(config, &holders);
        let mut wallet = MockWallet::with_coins(1_000_000);

        let (id, status) = engine
            .distribute_reward(
                coin_request(10, count as u128),
                BlockHeight::new(10),
                &holders,
                &mut wallet,
            )
            .unwrap();

        assert_eq!(status, DistributionStatus::Complete);
        let expected = batch_count(count as usize, max_per_tx);
        assert_eq!(wallet.sent.len(), expected);
        assert!(wallet.sent.iter().all(|batch| batch.len() <= max_per_tx));
        assert_eq!(engine.get_distribution(&id).unwrap().sent_batches.len(), expected);
    }

    #[test]
    fn retries_after_funds_arrive() {
        let amounts: Vec<(u8, u128)> = (0..4).map(|n| (n, 1)).collect();
        let holders = Holders::default().with("ROOT", 0, &amounts);
        let config = RewardsConfig::new().with_payout_margin(0).with_max_payouts_per_transaction(2);
        let mut engine = engine_with_snapshot(config, &holders);

        // Enough for the first batch only
        let mut wallet = MockWallet::with_coins(3);
        let (id, status) = engine
            .distribute_reward(coin_request(10, 4), BlockHeight::new(10), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::InsufficientFunds);
        assert_eq!(status.code(), 2);
        assert_eq!(wallet.sent.len(), 1);

        wallet.coins = Amount::from_coins(100);
        engine.on_block_connected(BlockHeight::new(11), &holders, &mut wallet);
        assert_eq!(engine.get_distribution_status(&id), Ok(DistributionStatus::Complete));
        assert_eq!(wallet.sent.len(), 2);

        // Nothing is paid twice
        let (_, status) = engine
            .distribute_reward(coin_request(10, 4), BlockHeight::new(12), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::Complete);
        engine.on_block_connected(BlockHeight::new(12), &holders, &mut wallet);
        assert_eq!(wallet.sent.len(), 2);
    }

    #[rstest]
    #[case(
        PayoutError::CreateTransaction("x".to_owned()),
        DistributionStatus::FailedCreateTransaction
    )]
    #[case(
        PayoutError::CommitTransaction("x".to_owned()),
        DistributionStatus::FailedCommitTransaction
    )]
    #[case(PayoutError::Network("x".to_owned()), DistributionStatus::NetworkError)]
    fn wallet_failures(#[case] error: PayoutError, #[case] expected: DistributionStatus) {
        let holders = Holders::default().with("ROOT", 0, &[(1, 1)]);
        let mut engine = engine_with_snapshot(RewardsConfig::new().with_payout_margin(0), &holders);
        let mut wallet = MockWallet::with_coins(100);
        wallet.fail_with = Some(error);

        let (id, status) = engine
            .distribute_reward(coin_request(10, 1), BlockHeight::new(10), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, expected);

        wallet.fail_with = None;
        engine.on_block_connected(BlockHeight::new(11), &holders, &mut wallet);
        assert_eq!(engine.get_distribution_status(&id), Ok(DistributionStatus::Complete));
    }

    #[test]
    fn fee_and_reward_shortages() {
        let holders = Holders::default().with("ROOT", 0, &[(1, 1)]).with("PAY", 0, &[(2, 1)]);
        let mut engine = engine_with_snapshot(RewardsConfig::new().with_payout_margin(0), &holders);

        // The payout fits but the fee does not
        let mut wallet = MockWallet::with_coins(1);
        let (_, status) = engine
            .distribute_reward(coin_request(10, 1), BlockHeight::new(10), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::InsufficientFee);

        let mut request = coin_request(10, 5);
        request.currency = PayoutCurrency::Asset("PAY".to_owned());
        wallet.assets.insert("PAY".to_owned(), Amount::from_coins(4));
        let (_, status) = engine
            .distribute_reward(request, BlockHeight::new(10), &holders, &mut wallet)
            .unwrap();
        assert_eq!(status, DistributionStatus::InsufficientRewards);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(matches!(
            RewardsEngine::new(
                Arc::new(create_regtest()),
                RewardsConfig::new().with_max_payouts_per_transaction(0)
            ),
            Err(RewardsError::InvalidConfig(_))
        ));
    }
}
