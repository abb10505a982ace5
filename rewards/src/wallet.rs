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
    chain::Transaction,
    primitives::{Amount, Id},
};

use crate::distribution::{Payout, PayoutCurrency};

/// Failures of the wallet while paying out a batch.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("Failed to create the payout transaction: {0}")]
    CreateTransaction(String),
    #[error("Failed to commit the payout transaction: {0}")]
    CommitTransaction(String),
    #[error("Network error: {0}")]
    Network(String),
}

/// The wallet paying rewards out.
pub trait PayoutWallet {
    fn coin_balance(&self) -> Amount;

    fn asset_balance(&self, asset: &str) -> Amount;

    /// Fee of a transaction paying `payouts` outputs, `None` if it can't be estimated.
    fn estimate_fee(&self, payouts: usize) -> Option<Amount>;

    /// Creates, signs and broadcasts a transaction paying `payouts`.
    fn send_batch(
        &mut self,
        currency: &PayoutCurrency,
        payouts: &[Payout],
    ) -> Result<Id<Transaction>, PayoutError>;
}

impl<W: PayoutWallet + ?Sized> PayoutWallet for &mut W {
    fn coin_balance(&self) -> Amount {
        (**self).coin_balance()
    }

    fn asset_balance(&self, asset: &str) -> Amount {
        (**self).asset_balance(asset)
    }

    fn estimate_fee(&self, payouts: usize) -> Option<Amount> {
        (**self).estimate_fee(payouts)
    }

    fn send_batch(
        &mut self,
        currency: &PayoutCurrency,
        payouts: &[Payout],
    ) -> Result<Id<Transaction>, PayoutError> {
        (**self).send_batch(currency, payouts)
    }
}
