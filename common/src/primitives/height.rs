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

use std::fmt;

use serialization::{Decode, Encode};

/// Height of a block in the chain, genesis at zero.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Encode,
    Decode,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct BlockHeight(#[codec(compact)] u64);

/// Signed difference between two heights.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct BlockDistance(i64);

impl BlockHeight {
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn into_int(self) -> u64 {
        self.0
    }

    pub fn next_height(&self) -> BlockHeight {
        BlockHeight(self.0.saturating_add(1))
    }

    pub fn prev_height(&self) -> Option<BlockHeight> {
        self.0.checked_sub(1).map(BlockHeight)
    }

    pub fn checked_add(&self, rhs: u64) -> Option<Self> {
        self.0.checked_add(rhs).map(BlockHeight)
    }

    pub fn checked_sub(&self, rhs: u64) -> Option<Self> {
        self.0.checked_sub(rhs).map(BlockHeight)
    }

    /// Distance from `other` to `self`.
    pub fn distance_from(&self, other: BlockHeight) -> Option<BlockDistance> {
        let this: i64 = self.0.try_into().ok()?;
        let other: i64 = other.0.try_into().ok()?;
        this.checked_sub(other).map(BlockDistance)
    }
}

impl BlockDistance {
    pub const fn new(distance: i64) -> Self {
        Self(distance)
    }

    pub fn to_int(self) -> i64 {
        self.0
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for BlockDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let h = BlockHeight::new(10);
        assert_eq!(h.next_height(), BlockHeight::new(11));
        assert_eq!(h.prev_height(), Some(BlockHeight::new(9)));
        assert_eq!(BlockHeight::zero().prev_height(), None);
        assert_eq!(h.checked_add(5), Some(BlockHeight::new(15)));
        assert_eq!(h.checked_sub(11), None);
        assert_eq!(
            h.distance_from(BlockHeight::new(70)),
            Some(BlockDistance::new(-60))
        );
        assert_eq!(BlockHeight::new(u64::MAX).distance_from(h), None);
    }
}
