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

use common::primitives::{Amount, SignedAmount};
use serialization::{Decode, Encode};

use crate::error::Error;

/// Signed balance changes per key. Keys whose change nets to zero are dropped.
#[must_use]
#[derive(PartialEq, Eq, Clone, Encode, Decode, Debug)]
pub struct DeltaAmountCollection<K: Ord> {
    data: BTreeMap<K, SignedAmount>,
}

impl<K: Ord + Clone> DeltaAmountCollection<K> {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &BTreeMap<K, SignedAmount> {
        &self.data
    }

    pub fn consume(self) -> BTreeMap<K, SignedAmount> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn add_signed(&mut self, key: K, delta: SignedAmount) -> Result<(), Error> {
        let current = self.data.get(&key).copied().unwrap_or(SignedAmount::ZERO);
        let sum = (current + delta).ok_or(Error::ArithmeticErrorDeltaAdditionFailed)?;
        if sum == SignedAmount::ZERO {
            self.data.remove(&key);
        } else {
            self.data.insert(key, sum);
        }
        Ok(())
    }

    pub fn add_unsigned(&mut self, key: K, amount: Amount) -> Result<(), Error> {
        let delta = amount.into_signed().ok_or(Error::ArithmeticErrorToSignedFailed)?;
        self.add_signed(key, delta)
    }

    pub fn sub_unsigned(&mut self, key: K, amount: Amount) -> Result<(), Error> {
        let delta = amount
            .into_signed()
            .and_then(SignedAmount::checked_neg)
            .ok_or(Error::ArithmeticErrorToSignedFailed)?;
        self.add_signed(key, delta)
    }

    pub fn merge_delta_amounts(&mut self, other: Self) -> Result<(), Error> {
        other.data.into_iter().try_for_each(|(key, delta)| self.add_signed(key, delta))
    }

    /// The collection that cancels this one out.
    pub fn negated(&self) -> Result<Self, Error> {
        let data = self
            .data
            .iter()
            .map(|(key, delta)| {
                delta
                    .checked_neg()
                    .map(|neg| (key.clone(), neg))
                    .ok_or(Error::ArithmeticErrorDeltaAdditionFailed)
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { data })
    }
}

impl<K: Ord + Clone> Default for DeltaAmountCollection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<(K, SignedAmount)> for DeltaAmountCollection<K> {
    fn from_iter<I: IntoIterator<Item = (K, SignedAmount)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().filter(|(_, v)| *v != SignedAmount::ZERO).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_and_cancel() {
        let mut c = DeltaAmountCollection::new();
        c.add_unsigned("a", Amount::from_atoms(5)).unwrap();
        c.sub_unsigned("a", Amount::from_atoms(2)).unwrap();
        c.sub_unsigned("b", Amount::from_atoms(1)).unwrap();
        assert_eq!(c.data().get("a"), Some(&SignedAmount::from_atoms(3)));
        assert_eq!(c.data().get("b"), Some(&SignedAmount::from_atoms(-1)));

        let mut merged = c.clone();
        merged.merge_delta_amounts(c.negated().unwrap()).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn overflow() {
        let mut c = DeltaAmountCollection::new();
        assert_eq!(
            c.add_unsigned(1, Amount::MAX),
            Err(Error::ArithmeticErrorToSignedFailed)
        );
        c.add_signed(1, SignedAmount::MAX).unwrap();
        assert_eq!(
            c.add_signed(1, SignedAmount::from_atoms(1)),
            Err(Error::ArithmeticErrorDeltaAdditionFailed)
        );
    }
}
