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

use script::Script;
use serialization::{Decode, Encode};

use super::{
    assets::{decode_asset_script, AssetOperation, AssetScriptError, DecodedAssetScript},
    Destination,
};
use crate::primitives::{hash_encoded, Amount, BlockHeight, Id, Idable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct UtxoOutPoint {
    tx_id: Id<Transaction>,
    index: u32,
}

impl UtxoOutPoint {
    pub fn new(tx_id: Id<Transaction>, index: u32) -> Self {
        Self { tx_id, index }
    }

    pub fn tx_id(&self) -> Id<Transaction> {
        self.tx_id
    }

    pub fn output_index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for UtxoOutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum TxInput {
    /// Spends an output; the unlocking script is checked by the base script verifier.
    #[codec(index = 0)]
    Utxo { outpoint: UtxoOutPoint, unlock: Script },
    #[codec(index = 1)]
    Coinbase(BlockHeight),
}

impl TxInput {
    pub fn from_utxo(tx_id: Id<Transaction>, index: u32) -> Self {
        TxInput::Utxo {
            outpoint: UtxoOutPoint::new(tx_id, index),
            unlock: Script::new(),
        }
    }

    pub fn utxo_outpoint(&self) -> Option<&UtxoOutPoint> {
        match self {
            TxInput::Utxo { outpoint, .. } => Some(outpoint),
            TxInput::Coinbase(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TxOutput {
    value: Amount,
    script: Script,
}

impl TxOutput {
    pub fn new(value: Amount, script: Script) -> Self {
        Self { value, script }
    }

    /// A plain coin output.
    pub fn transfer(value: Amount, destination: Destination) -> Self {
        Self::new(value, destination.to_script())
    }

    /// An asset output held by `destination`; carries no coins.
    pub fn asset(destination: Destination, operation: &AssetOperation) -> Self {
        Self::new(Amount::ZERO, super::assets::asset_script(&destination, operation))
    }

    /// A null-data asset output (tags and freezes).
    pub fn null_asset(operation: &AssetOperation) -> Self {
        Self::new(Amount::ZERO, super::assets::null_asset_script(operation))
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The holder of this output. Null-data asset outputs have none.
    pub fn destination(&self) -> Option<Destination> {
        Destination::from_script(&self.script)
    }

    pub fn asset_operation(&self) -> Result<Option<DecodedAssetScript>, AssetScriptError> {
        decode_asset_script(&self.script)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Transaction {
    version: u32,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
    lock_time: u32,
}

impl Transaction {
    pub const CURRENT_VERSION: u32 = 2;

    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            inputs,
            outputs,
            lock_time: 0,
        }
    }

    pub fn with_lock_time(mut self, lock_time: u32) -> Self {
        self.lock_time = lock_time;
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    pub fn is_coinbase(&self) -> bool {
        matches!(self.inputs.as_slice(), [TxInput::Coinbase(_)])
    }

    pub fn outpoint(&self, index: u32) -> UtxoOutPoint {
        UtxoOutPoint::new(self.get_id(), index)
    }
}

impl Idable for Transaction {
    type Tag = Transaction;

    fn get_id(&self) -> Id<Transaction> {
        Id::new(hash_encoded(self))
    }
}
