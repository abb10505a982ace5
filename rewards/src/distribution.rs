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

use common::{
    chain::Destination,
    primitives::{hash_encoded, Amount, BlockHeight, Id},
};
use serialization::{Decode, Encode};

use crate::error::{Result, RewardsError};

/// What a reward is paid in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
pub enum PayoutCurrency {
    Coin,
    Asset(String),
}

/// A request to split `gross_amount` among the holders of `ownership_asset` as they
/// stood at `snapshot_height`.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct DistributionRequest {
    pub ownership_asset: String,
    pub snapshot_height: BlockHeight,
    pub currency: PayoutCurrency,
    pub gross_amount: Amount,
    pub exception_addresses: BTreeSet<Destination>,
}

impl DistributionRequest {
    pub fn id(&self) -> Id<DistributionRequest> {
        Id::new(hash_encoded(self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub address: Destination,
    pub amount: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DistributionStatus {
    Pending = 0,
    Complete = 1,
    InsufficientFunds = 2,
    InsufficientFee = 3,
    InsufficientRewards = 4,
    FailedCreateTransaction = 5,
    FailedCommitTransaction = 6,
    NetworkError = 7,
}

impl DistributionStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_complete(self) -> bool {
        self == DistributionStatus::Complete
    }
}

/// Splits `gross` pro rata among `holders` not listed in `exceptions`.
///
/// Every share is rounded down to the `units` of the payout currency. Zero shares are
/// dropped and the rounding remainder stays with the payer. Burn addresses never receive
/// anything.
pub fn compute_payouts(
    holders: &BTreeMap<Destination, Amount>,
    gross: Amount,
    units: u8,
    exceptions: &BTreeSet<Destination>,
    is_burn: impl Fn(&Destination) -> bool,
) -> Result<Vec<Payout>> {
    let eligible: Vec<(Destination, Amount)> = holders
        .iter()
        .filter(|(address, amount)| {
            **amount > Amount::ZERO && !exceptions.contains(address) && !is_burn(address)
        })
        .map(|(address, amount)| (*address, *amount))
        .collect();

    let total = eligible
        .iter()
        .try_fold(0u128, |acc, (_, amount)| acc.checked_add(amount.into_atoms()))
        .ok_or(RewardsError::AmountOverflow)?;
    if total == 0 {
        return Err(RewardsError::NoEligibleHolders);
    }

    let mut payouts = Vec::with_capacity(eligible.len());
    for (address, held) in eligible {
        let share = gross
            .into_atoms()
            .checked_mul(held.into_atoms())
            .ok_or(RewardsError::AmountOverflow)?
            / total;
        let amount = Amount::from_atoms(share)
            .floor_to_units(units)
            .ok_or(RewardsError::AmountOverflow)?;
        if amount > Amount::ZERO {
            payouts.push(Payout { address, amount });
        }
    }
    Ok(payouts)
}

/// Transactions needed to pay `payouts` outputs, `max_per_tx` at a time.
pub fn batch_count(payouts: usize, max_per_tx: usize) -> usize {
    payouts.div_ceil(max_per_tx.max(1))
}

pub fn total_payout(payouts: &[Payout]) -> Option<Amount> {
    payouts.iter().try_fold(Amount::ZERO, |acc, payout| acc + payout.amount)
}

#[cfg(test)]
mod tests {
    use common::primitives::{H160, COIN};
    use rstest::rstest;
    use test_utils::random::{make_seedable_rng, Seed};

    use super::*;

    fn address(n: u8) -> Destination {
        Destination::PublicKeyHash(H160::repeat_byte(n))
    }

    fn holders(amounts: &[(u8, u128)]) -> BTreeMap<Destination, Amount> {
        amounts.iter().map(|(n, coins)| (address(*n), Amount::from_coins(*coins))).collect()
    }

    #[test]
    fn rounding_down_to_units() {
        let payouts = compute_payouts(
            &holders(&[(1, 9), (2, 3), (3, 2), (4, 1)]),
            Amount::from_coins(10),
            0,
            &BTreeSet::new(),
            |_| false,
        )
        .unwrap();

        assert_eq!(
            payouts,
            vec![
                Payout {
                    address: address(1),
                    amount: Amount::from_coins(6)
                },
                Payout {
                    address: address(2),
                    amount: Amount::from_coins(2)
                },
                Payout {
                    address: address(3),
                    amount: Amount::from_coins(1)
                },
            ]
        );
    }

    #[test]
    fn exceptions_and_burns_are_skipped() {
        let exceptions = [address(1)].into_iter().collect();
        let payouts = compute_payouts(
            &holders(&[(1, 50), (2, 25), (3, 25), (9, 100)]),
            Amount::from_coins(100),
            8,
            &exceptions,
            |a| *a == address(9),
        )
        .unwrap();

        assert_eq!(payouts.len(), 2);
        assert!(payouts.iter().all(|p| p.amount == Amount::from_coins(50)));

        assert_eq!(
            compute_payouts(
                &holders(&[(1, 50)]),
                Amount::from_coins(100),
                8,
                &exceptions,
                |_| false
            ),
            Err(RewardsError::NoEligibleHolders)
        );
    }

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn payouts_never_exceed_gross(#[case] seed: Seed) {
        use rand::Rng;

        let mut rng = make_seedable_rng(seed);
        let holders: BTreeMap<Destination, Amount> = (0..rng.gen_range(1..50u8))
            .map(|n| (address(n), Amount::from_atoms(rng.gen_range(1..1_000_000 * COIN))))
            .collect();
        let gross = Amount::from_atoms(rng.gen_range(1..1_000_000 * COIN));
        let units = rng.gen_range(0..=8);

        let payouts = compute_payouts(&holders, gross, units, &BTreeSet::new(), |_| false).unwrap();

        assert!(total_payout(&payouts).unwrap() <= gross);
        assert!(payouts.iter().all(|p| p.amount.fits_units(units)));
        assert!(payouts.iter().all(|p| p.amount > Amount::ZERO));
    }

    #[rstest]
    #[case(0, 190, 0)]
    #[case(1, 190, 1)]
    #[case(190, 190, 1)]
    #[case(191, 190, 2)]
    #[case(400, 190, 3)]
    fn batches(#[case] payouts: usize, #[case] max: usize, #[case] expected: usize) {
        assert_eq!(batch_count(payouts, max), expected);
    }

    #[test]
    fn status_codes() {
        assert_eq!(DistributionStatus::Pending.code(), 0);
        assert_eq!(DistributionStatus::Complete.code(), 1);
        assert_eq!(DistributionStatus::InsufficientRewards.code(), 4);
        assert_eq!(DistributionStatus::NetworkError.code(), 7);
    }

    #[test]
    fn request_id_covers_every_field() {
        let request = DistributionRequest {
            ownership_asset: "ROOT".to_owned(),
            snapshot_height: BlockHeight::new(10),
            currency: PayoutCurrency::Coin,
            gross_amount: Amount::from_coins(100),
            exception_addresses: BTreeSet::new(),
        };
        let mut other = request.clone();
        other.exception_addresses.insert(address(1));

        assert_eq!(request.id(), request.clone().id());
        assert_ne!(request.id(), other.id());
    }
}
