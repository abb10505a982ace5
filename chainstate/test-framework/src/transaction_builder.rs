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

use common::chain::{Destination, Transaction, TxInput, TxOutput, UtxoOutPoint};
use script::Script;

use crate::utils::input_unlock_script;

/// The transaction builder. Inputs added with a signer get a valid unlocking script.
#[derive(Default)]
pub struct TransactionBuilder {
    inputs: Vec<(UtxoOutPoint, Option<Destination>)>,
    outputs: Vec<TxOutput>,
    lock_time: u32,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spends `outpoint`, signing for `signer`.
    pub fn add_input(mut self, outpoint: UtxoOutPoint, signer: Destination) -> Self {
        self.inputs.push((outpoint, Some(signer)));
        self
    }

    pub fn add_unsigned_input(mut self, outpoint: UtxoOutPoint) -> Self {
        self.inputs.push((outpoint, None));
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<TxOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn add_output(mut self, output: TxOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn add_outputs(mut self, outputs: impl IntoIterator<Item = TxOutput>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    pub fn with_lock_time(mut self, lock_time: u32) -> Self {
        self.lock_time = lock_time;
        self
    }

    pub fn build(self) -> Transaction {
        let inputs = self
            .inputs
            .iter()
            .map(|(outpoint, signer)| TxInput::Utxo {
                outpoint: *outpoint,
                unlock: signer
                    .map(|signer| input_unlock_script(&self.outputs, outpoint, &signer))
                    .unwrap_or_else(Script::new),
            })
            .collect();
        Transaction::new(inputs, self.outputs).with_lock_time(self.lock_time)
    }
}
