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

//! Interfaces of the base ledger the asset rules run on top of.

use std::collections::{BTreeMap, BTreeSet};

use common::{
    chain::{Transaction, TxOutput, UtxoOutPoint},
    primitives::Idable,
};

/// Resolves the outputs spent by transaction inputs.
pub trait UtxoSource {
    /// The unspent output at `outpoint`, if any.
    fn utxo(&self, outpoint: &UtxoOutPoint) -> Option<TxOutput>;
}

impl UtxoSource for BTreeMap<UtxoOutPoint, TxOutput> {
    fn utxo(&self, outpoint: &UtxoOutPoint) -> Option<TxOutput> {
        self.get(outpoint).cloned()
    }
}

impl<T: UtxoSource + ?Sized> UtxoSource for &T {
    fn utxo(&self, outpoint: &UtxoOutPoint) -> Option<TxOutput> {
        (**self).utxo(outpoint)
    }
}

/// The base script and signature check of a single input.
pub trait InputScriptVerifier {
    fn verify_input(&self, tx: &Transaction, input_index: usize, spent: &TxOutput) -> bool;
}

/// Outputs created and spent by the transactions of a block connected so far, on top
/// of the UTXO set the block builds on.
pub struct UtxoOverlay<'a, U> {
    base: &'a U,
    created: BTreeMap<UtxoOutPoint, TxOutput>,
    spent: BTreeSet<UtxoOutPoint>,
}

impl<'a, U: UtxoSource> UtxoOverlay<'a, U> {
    pub fn new(base: &'a U) -> Self {
        Self {
            base,
            created: BTreeMap::new(),
            spent: BTreeSet::new(),
        }
    }

    pub fn apply_transaction(&mut self, tx: &Transaction) {
        for outpoint in tx.inputs().iter().filter_map(|input| input.utxo_outpoint()) {
            if self.created.remove(outpoint).is_none() {
                self.spent.insert(*outpoint);
            }
        }

        let tx_id = tx.get_id();
        for (index, output) in tx.outputs().iter().enumerate() {
            self.created.insert(UtxoOutPoint::new(tx_id, index as u32), output.clone());
        }
    }
}

impl<U: UtxoSource> UtxoSource for UtxoOverlay<'_, U> {
    fn utxo(&self, outpoint: &UtxoOutPoint) -> Option<TxOutput> {
        if self.spent.contains(outpoint) {
            return None;
        }
        self.created.get(outpoint).cloned().or_else(|| self.base.utxo(outpoint))
    }
}
