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

use serialization::{Decode, Encode};
use utils::ensure;

use crate::error::Error;

/// A change of the value stored under some key, from `prev` to `next`.
///
/// `None` on either side means absence, so creation is `(None, Some)` and
/// deletion `(Some, None)`.
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct DataDelta<T> {
    prev: Option<T>,
    next: Option<T>,
}

impl<T> DataDelta<T> {
    pub fn new(prev: Option<T>, next: Option<T>) -> Self {
        Self { prev, next }
    }

    pub fn prev(&self) -> Option<&T> {
        self.prev.as_ref()
    }

    pub fn next(&self) -> Option<&T> {
        self.next.as_ref()
    }

    pub fn consume(self) -> (Option<T>, Option<T>) {
        (self.prev, self.next)
    }

    pub fn invert(self) -> Self {
        Self {
            prev: self.next,
            next: self.prev,
        }
    }
}

/// Undoing a merged delta is merging its inverse.
#[must_use]
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct DataDeltaUndo<T>(DataDelta<T>);

impl<T> DataDeltaUndo<T> {
    pub fn new(delta: DataDelta<T>) -> Self {
        Self(delta)
    }

    pub fn consume(self) -> DataDelta<T> {
        self.0
    }
}

/// The result of looking a key up in a delta collection.
#[derive(PartialEq, Eq, Debug)]
pub enum GetDataResult<T> {
    Present(T),
    Deleted,
    Missing,
}

#[must_use]
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct DeltaDataCollection<K: Ord, T> {
    data: BTreeMap<K, DataDelta<T>>,
}

impl<K: Ord + Clone, T: Clone + PartialEq> DeltaDataCollection<K, T> {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &BTreeMap<K, DataDelta<T>> {
        &self.data
    }

    pub fn consume(self) -> BTreeMap<K, DataDelta<T>> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get_data(&self, key: &K) -> GetDataResult<&T> {
        match self.data.get(key) {
            Some(delta) => match delta.next() {
                Some(d) => GetDataResult::Present(d),
                None => GetDataResult::Deleted,
            },
            None => GetDataResult::Missing,
        }
    }

    pub fn merge_delta_data(
        &mut self,
        other: Self,
    ) -> Result<DeltaDataUndoCollection<K, T>, Error> {
        let undo = other
            .data
            .into_iter()
            .map(|(key, delta)| {
                self.merge_delta_data_element(key.clone(), delta).map(|undo| (key, undo))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(DeltaDataUndoCollection { data: undo })
    }

    /// Merge `other` on top of the delta stored for `key`.
    ///
    /// `other` must start where the stored delta ends. A merge that nets out to no
    /// change removes the key.
    pub fn merge_delta_data_element(
        &mut self,
        key: K,
        other: DataDelta<T>,
    ) -> Result<DataDeltaUndo<T>, Error> {
        let undo = DataDeltaUndo(other.clone().invert());

        let combined = match self.data.remove(&key) {
            Some(current) => {
                ensure!(current.next == other.prev, Error::DeltaDataMismatch);
                DataDelta::new(current.prev, other.next)
            }
            None => other,
        };

        if combined.prev != combined.next {
            self.data.insert(key, combined);
        }

        Ok(undo)
    }

    pub fn undo_merge_delta_data(
        &mut self,
        undo: DeltaDataUndoCollection<K, T>,
    ) -> Result<(), Error> {
        undo.data
            .into_iter()
            .try_for_each(|(key, undo)| self.undo_merge_delta_data_element(key, undo))
    }

    pub fn undo_merge_delta_data_element(
        &mut self,
        key: K,
        undo: DataDeltaUndo<T>,
    ) -> Result<(), Error> {
        let _ = self.merge_delta_data_element(key, undo.0)?;
        Ok(())
    }
}

impl<K: Ord + Clone, T: Clone + PartialEq> Default for DeltaDataCollection<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, T> FromIterator<(K, DataDelta<T>)> for DeltaDataCollection<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, DataDelta<T>)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[must_use]
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct DeltaDataUndoCollection<K: Ord, T> {
    data: BTreeMap<K, DataDeltaUndo<T>>,
}

impl<K: Ord, T> DeltaDataUndoCollection<K, T> {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &BTreeMap<K, DataDeltaUndo<T>> {
        &self.data
    }

    pub fn consume(self) -> BTreeMap<K, DataDeltaUndo<T>> {
        self.data
    }
}

impl<K: Ord, T> Default for DeltaDataUndoCollection<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, T> FromIterator<(K, DataDeltaUndo<T>)> for DeltaDataUndoCollection<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, DataDeltaUndo<T>)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(items: &[(u32, Option<char>, Option<char>)]) -> DeltaDataCollection<u32, char> {
        items.iter().map(|&(k, prev, next)| (k, DataDelta::new(prev, next))).collect()
    }

    #[test]
    fn get_data() {
        let c = collection(&[(1, None, Some('a')), (2, Some('b'), None)]);
        assert_eq!(c.get_data(&1), GetDataResult::Present(&'a'));
        assert_eq!(c.get_data(&2), GetDataResult::Deleted);
        assert_eq!(c.get_data(&3), GetDataResult::Missing);
    }

    #[test]
    fn merge_chains_deltas() {
        let mut c = collection(&[(1, None, Some('a'))]);
        let _ = c.merge_delta_data_element(1, DataDelta::new(Some('a'), Some('b'))).unwrap();
        assert_eq!(c, collection(&[(1, None, Some('b'))]));

        // Create followed by delete nets out to nothing
        let _ = c.merge_delta_data_element(1, DataDelta::new(Some('b'), None)).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn merge_rejects_gaps() {
        let mut c = collection(&[(1, None, Some('a'))]);
        assert_eq!(
            c.merge_delta_data_element(1, DataDelta::new(Some('x'), Some('b'))),
            Err(Error::DeltaDataMismatch)
        );
        assert_eq!(
            c.merge_delta_data_element(1, DataDelta::new(None, Some('b'))),
            Err(Error::DeltaDataMismatch)
        );
    }

    #[test]
    fn merge_collections_then_undo() {
        let mut c1 = collection(&[
            (1, None, Some('a')),
            (2, Some('b'), Some('c')),
            (3, Some('d'), None),
            (4, None, Some('e')),
        ]);
        let origin = c1.clone();

        let c2 = collection(&[
            (1, Some('a'), Some('f')),
            (2, Some('c'), None),
            (3, None, Some('g')),
            (5, Some('h'), None),
        ]);

        let undo = c1.merge_delta_data(c2).unwrap();
        assert_eq!(
            c1,
            collection(&[
                (1, None, Some('f')),
                (2, Some('b'), None),
                (3, Some('d'), Some('g')),
                (4, None, Some('e')),
                (5, Some('h'), None),
            ])
        );

        c1.undo_merge_delta_data(undo).unwrap();
        assert_eq!(c1, origin);
    }

    #[test]
    fn undo_into_empty_collection() {
        let mut c1 = DeltaDataCollection::new();
        let undo = c1.merge_delta_data_element(7, DataDelta::new(Some('a'), Some('b'))).unwrap();

        // The undo carried elsewhere turns into the inverse delta
        let mut c2 = DeltaDataCollection::new();
        c2.undo_merge_delta_data_element(7, undo).unwrap();
        assert_eq!(c2, collection(&[(7, Some('b'), Some('a'))]));

        let _ = c1.merge_delta_data(c2).unwrap();
        assert!(c1.is_empty());
    }
}
