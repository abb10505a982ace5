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

use serialization::{Decode, Encode};

pub type SignedIntType = i128;

/// A signed fixed-point amount, used for balance deltas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
#[must_use]
pub struct SignedAmount {
    val: SignedIntType,
}

impl SignedAmount {
    pub const ZERO: Self = Self::from_atoms(0);
    pub const MAX: Self = Self::from_atoms(SignedIntType::MAX);

    pub const fn from_atoms(v: SignedIntType) -> Self {
        SignedAmount { val: v }
    }

    pub const fn into_atoms(&self) -> SignedIntType {
        self.val
    }

    pub fn is_negative(&self) -> bool {
        self.val < 0
    }

    pub fn checked_neg(self) -> Option<Self> {
        self.val.checked_neg().map(Self::from_atoms)
    }
}

impl std::ops::Add for SignedAmount {
    type Output = Option<Self>;

    fn add(self, other: Self) -> Option<Self> {
        self.val.checked_add(other.val).map(Self::from_atoms)
    }
}

impl std::ops::Sub for SignedAmount {
    type Output = Option<Self>;

    fn sub(self, other: Self) -> Option<Self> {
        self.val.checked_sub(other.val).map(Self::from_atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Amount;

    #[test]
    fn conversions() {
        let positive = SignedAmount::from_atoms(10);
        assert_eq!(Amount::from_signed(positive), Some(Amount::from_atoms(10)));
        assert_eq!(Amount::from_signed(SignedAmount::from_atoms(-1)), None);
        assert_eq!(Amount::MAX.into_signed(), None);
        assert_eq!(positive.checked_neg(), Some(SignedAmount::from_atoms(-10)));
        assert!(SignedAmount::from_atoms(-10).is_negative());
        assert_eq!(SignedAmount::MAX + SignedAmount::from_atoms(1), None);
        assert_eq!(
            positive - SignedAmount::from_atoms(15),
            Some(SignedAmount::from_atoms(-5))
        );
    }
}
