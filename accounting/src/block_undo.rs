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

use common::{chain::Transaction, primitives::Id};
use serialization::{Decode, Encode};

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum BlockUndoError {
    #[error("Attempted to insert a transaction undo that already exists: `{0}`")]
    UndoAlreadyExists(Id<Transaction>),
}

/// Undo records of a single transaction, in the order they were produced.
#[derive(Default, Debug, Clone, Eq, PartialEq, Encode, Decode)]
pub struct TxUndo<U>(Vec<U>);

impl<U> TxUndo<U> {
    pub fn new(undos: Vec<U>) -> Self {
        Self(undos)
    }

    pub fn inner(&self) -> &[U] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<U> {
        self.0
    }

    pub fn push(&mut self, undo: U) {
        self.0.push(undo)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Encode, Decode)]
pub struct BlockUndo<U> {
    tx_undos: BTreeMap<Id<Transaction>, TxUndo<U>>,
}

impl<U> BlockUndo<U> {
    pub fn new(tx_undos: BTreeMap<Id<Transaction>, TxUndo<U>>) -> Self {
        Self { tx_undos }
    }

    pub fn is_empty(&self) -> bool {
        self.tx_undos.is_empty()
    }

    pub fn tx_undos(&self) -> &BTreeMap<Id<Transaction>, TxUndo<U>> {
        &self.tx_undos
    }

    pub fn insert_tx_undo(
        &mut self,
        tx_id: Id<Transaction>,
        tx_undo: TxUndo<U>,
    ) -> Result<(), BlockUndoError> {
        match self.tx_undos.entry(tx_id) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(tx_undo);
                Ok(())
            }
            std::collections::btree_map::Entry::Occupied(_) => {
                Err(BlockUndoError::UndoAlreadyExists(tx_id))
            }
        }
    }

    pub fn take_tx_undo(&mut self, tx_id: &Id<Transaction>) -> Option<TxUndo<U>> {
        self.tx_undos.remove(tx_id)
    }

    pub fn consume(self) -> BTreeMap<Id<Transaction>, TxUndo<U>> {
        self.tx_undos
    }
}

impl<U> Default for BlockUndo<U> {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::primitives::H256;

    #[test]
    fn insert_and_take() {
        let tx_id = Id::<Transaction>::new(H256::repeat_byte(1));
        let mut undo = BlockUndo::default();
        undo.insert_tx_undo(tx_id, TxUndo::new(vec![1u8, 2])).unwrap();
        assert_eq!(
            undo.insert_tx_undo(tx_id, TxUndo::new(vec![3])),
            Err(BlockUndoError::UndoAlreadyExists(tx_id))
        );
        assert_eq!(undo.take_tx_undo(&tx_id).map(TxUndo::into_inner), Some(vec![1, 2]));
        assert!(undo.is_empty());
    }
}
