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

use chainstate::{AssetIndexError, AssetTxError};
use chainstate_test_framework::TestFramework;
use common::{
    chain::{Destination, Transaction},
    primitives::{Amount, BlockHeight},
};
use test_utils::random_asset_name_chars;

mod reorg_tests;

#[ctor::ctor]
fn init() {
    logging::init_logging();
}

/// Mines `tx` alone in a new block on top of the tip.
fn process_tx(tf: &mut TestFramework, tx: Transaction) -> Result<BlockHeight, AssetIndexError> {
    tf.make_block_builder().add_transaction(tx).build_and_process()
}

/// The asset rule a rejected block broke.
fn rejection(result: Result<BlockHeight, AssetIndexError>) -> AssetTxError {
    match result {
        Err(AssetIndexError::TxRejected(_, e)) => e,
        other => panic!("expected a rejected transaction, got {other:?}"),
    }
}

fn random_root_name(rng: &mut impl rand::Rng) -> String {
    format!("TEST{}", random_asset_name_chars(rng, 3..10))
}

/// Issues a reissuable root asset with no decimals.
fn issue_root(tf: &mut TestFramework, issuer: Destination, name: &str, amount: Amount) {
    let tx = tf.issue_asset_tx(issuer, name, amount, 0, true);
    process_tx(tf, tx).unwrap();
}
