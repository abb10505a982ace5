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

use common::{
    chain::{assets::AssetOperation, Transaction},
    primitives::{Id, Idable},
};
use logging::log;
use utils::ensure;

use crate::{error::AssetTxError, tx_verifier};

/// Asset names claimed by transactions waiting in the mempool.
///
/// A name can be issued by one pending transaction only, and an asset can have one
/// pending reissuance only.
#[derive(Debug, Default, Clone)]
pub struct MempoolAssetTracker {
    pending_issues: BTreeMap<String, Id<Transaction>>,
    pending_reissues: BTreeMap<String, Id<Transaction>>,
}

struct Claims {
    issues: Vec<String>,
    reissues: Vec<String>,
}

fn claims_of(tx: &Transaction) -> Result<Claims, AssetTxError> {
    let mut claims = Claims {
        issues: Vec::new(),
        reissues: Vec::new(),
    };
    for output in tx_verifier::decode_asset_outputs(tx)? {
        claims.issues.extend(tx_verifier::issued_names(&output.operation));
        if output.operation.is_reissuance() {
            claims.reissues.push(output.operation.asset_name().to_owned());
        }
    }
    Ok(claims)
}

impl MempoolAssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_issue_pending(&self, name: &str) -> bool {
        self.pending_issues.contains_key(name)
    }

    pub fn pending_reissue(&self, name: &str) -> Option<Id<Transaction>> {
        self.pending_reissues.get(name).copied()
    }

    /// Rejects a transaction that claims a name another pending transaction holds.
    pub fn check_transaction(&self, tx: &Transaction) -> Result<(), AssetTxError> {
        let tx_id = tx.get_id();
        let claims = claims_of(tx)?;

        for name in claims.issues {
            let taken = self.pending_issues.get(&name).is_some_and(|id| *id != tx_id);
            ensure!(!taken, AssetTxError::AssetInMempool(name));
        }
        for name in claims.reissues {
            let taken = self.pending_reissues.get(&name).is_some_and(|id| *id != tx_id);
            ensure!(!taken, AssetTxError::ReissueChaining(name));
        }
        Ok(())
    }

    /// Records the claims of a transaction accepted to the mempool.
    pub fn add_transaction(&mut self, tx: &Transaction) -> Result<(), AssetTxError> {
        self.check_transaction(tx)?;

        let tx_id = tx.get_id();
        let claims = claims_of(tx)?;
        for name in claims.issues {
            self.pending_issues.insert(name, tx_id);
        }
        for name in claims.reissues {
            self.pending_reissues.insert(name, tx_id);
        }
        Ok(())
    }

    /// Drops the claims of a transaction that left the mempool.
    pub fn remove_transaction(&mut self, tx: &Transaction) {
        let tx_id = tx.get_id();
        self.pending_issues.retain(|_, id| *id != tx_id);
        self.pending_reissues.retain(|_, id| *id != tx_id);
    }

    /// Transactions of a connected block are no longer pending.
    pub fn remove_for_block<'a>(&mut self, txs: impl IntoIterator<Item = &'a Transaction>) {
        let before = self.pending_issues.len() + self.pending_reissues.len();
        for tx in txs {
            self.remove_transaction(tx);
        }
        let after = self.pending_issues.len() + self.pending_reissues.len();
        if before != after {
            log::debug!("Released {} pending asset claims", before - after);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending_issues.is_empty() && self.pending_reissues.is_empty()
    }
}
