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

// use only unsigned types
// if you need a signed amount, use SignedAmount

use std::iter::Sum;

use serialization::{Decode, Encode};

use super::SignedAmount;

pub type UnsignedIntType = u128;

/// Number of decimals of the base coin; asset `units` never exceed it.
pub const DECIMALS: u8 = 8;

/// Number of atoms in one whole coin (or one whole asset unit).
pub const COIN: UnsignedIntType = 100_000_000;

/// An unsigned fixed-point type for amounts
/// The smallest unit of count is called an atom
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
#[must_use]
pub struct Amount {
    #[codec(compact)]
    atoms: UnsignedIntType,
}

impl Amount {
    pub const MAX: Self = Self::from_atoms(UnsignedIntType::MAX);
    pub const ZERO: Self = Self::from_atoms(0);

    pub const fn from_atoms(v: UnsignedIntType) -> Self {
        Amount { atoms: v }
    }

    pub const fn into_atoms(&self) -> UnsignedIntType {
        self.atoms
    }

    /// Whole coins, saturating on overflow. Only meant for constants.
    pub const fn from_coins(coins: UnsignedIntType) -> Self {
        Self::from_atoms(coins.saturating_mul(COIN))
    }

    pub fn from_signed(amount: SignedAmount) -> Option<Self> {
        let atoms: UnsignedIntType = amount.into_atoms().try_into().ok()?;
        Some(Self::from_atoms(atoms))
    }

    pub fn into_signed(self) -> Option<SignedAmount> {
        Some(SignedAmount::from_atoms(self.atoms.try_into().ok()?))
    }

    /// Atoms per smallest representable step at the given precision.
    ///
    /// Returns `None` when `units` exceeds [DECIMALS].
    pub fn units_step(units: u8) -> Option<UnsignedIntType> {
        let zeros = DECIMALS.checked_sub(units)?;
        Some(10u128.pow(zeros as u32))
    }

    /// True if the amount is representable with `units` decimals.
    pub fn fits_units(&self, units: u8) -> bool {
        Self::units_step(units).is_some_and(|step| self.atoms % step == 0)
    }

    /// Truncates the amount down to a multiple of the `units` step.
    pub fn floor_to_units(self, units: u8) -> Option<Self> {
        let step = Self::units_step(units)?;
        Some(Self::from_atoms(self.atoms - self.atoms % step))
    }

    pub fn into_fixedpoint_str(self, decimals: u8) -> String {
        let decimals = decimals as usize;
        let atoms = self.atoms.to_string();
        let (whole, fraction) = if atoms.len() > decimals {
            atoms.split_at(atoms.len() - decimals)
        } else {
            ("0", atoms.as_str())
        };
        let fraction = format!("{fraction:0>decimals$}");
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_owned()
        } else {
            format!("{whole}.{fraction}")
        }
    }

    pub fn from_fixedpoint_str(amount_str: &str, decimals: u8) -> Option<Self> {
        let decimals = decimals as usize;
        let amount_str = amount_str.trim_matches(' ').replace('_', "");
        if amount_str.is_empty() || amount_str.len() > 100 {
            return None;
        }
        if !amount_str.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let (whole, fraction) = match amount_str.split_once('.') {
            Some((_, fraction)) if fraction.contains('.') => return None,
            Some((whole, fraction)) => (whole, fraction),
            None => (amount_str.as_str(), ""),
        };
        if fraction.len() > decimals || (whole.is_empty() && fraction.is_empty()) {
            return None;
        }
        let atoms_str = format!("{whole}{fraction:0<decimals$}");
        let atoms_str = atoms_str.trim_start_matches('0');
        if atoms_str.is_empty() {
            return Some(Amount::ZERO);
        }
        atoms_str.parse::<UnsignedIntType>().ok().map(Amount::from_atoms)
    }

    pub fn abs_diff(self, other: Amount) -> Amount {
        Amount::from_atoms(self.atoms.abs_diff(other.atoms))
    }
}

impl std::ops::Add for Amount {
    type Output = Option<Self>;

    fn add(self, other: Self) -> Option<Self> {
        self.atoms.checked_add(other.atoms).map(|n| Amount { atoms: n })
    }
}

impl std::ops::Sub for Amount {
    type Output = Option<Self>;

    fn sub(self, other: Self) -> Option<Self> {
        self.atoms.checked_sub(other.atoms).map(|n| Amount { atoms: n })
    }
}

impl std::ops::Mul<UnsignedIntType> for Amount {
    type Output = Option<Self>;

    fn mul(self, other: UnsignedIntType) -> Option<Self> {
        self.atoms.checked_mul(other).map(|n| Amount { atoms: n })
    }
}

impl std::ops::Div<UnsignedIntType> for Amount {
    type Output = Option<Amount>;

    fn div(self, other: UnsignedIntType) -> Option<Amount> {
        self.atoms.checked_div(other).map(|n| Amount { atoms: n })
    }
}

impl std::ops::Rem<UnsignedIntType> for Amount {
    type Output = Option<Self>;

    fn rem(self, other: UnsignedIntType) -> Option<Self> {
        self.atoms.checked_rem(other).map(|n| Amount { atoms: n })
    }
}

impl Sum<Amount> for Option<Amount> {
    fn sum<I>(mut iter: I) -> Self
    where
        I: Iterator<Item = Amount>,
    {
        iter.try_fold(Amount::ZERO, std::ops::Add::add)
    }
}

#[macro_export]
macro_rules! amount_sum {
    ($arg_1:expr, $($arg_n:expr),+) => {{
        let result = Some($arg_1);
        $(
            let result = match result {
                Some(v) => v + $arg_n,
                None => None,
            };
        )*
        result
    }}
}

mod json {
    use super::{Amount, UnsignedIntType};

    #[derive(serde::Serialize, serde::Deserialize)]
    #[serde(untagged)]
    enum StringOrUint {
        String(String),
        UInt(UnsignedIntType),
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    pub struct JsonAmount {
        atoms: StringOrUint,
    }

    impl From<Amount> for JsonAmount {
        fn from(amount: Amount) -> Self {
            JsonAmount {
                atoms: StringOrUint::String(amount.atoms.to_string()),
            }
        }
    }

    impl TryFrom<JsonAmount> for Amount {
        type Error = std::num::ParseIntError;

        fn try_from(json_amount: JsonAmount) -> Result<Self, Self::Error> {
            let atoms: UnsignedIntType = match json_amount.atoms {
                StringOrUint::String(s) => s.parse()?,
                StringOrUint::UInt(atoms) => atoms,
            };
            Ok(Amount { atoms })
        }
    }
}

impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json_amount: json::JsonAmount = (*self).into();
        json_amount.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let json_amount = json::JsonAmount::deserialize(deserializer)?;
        json_amount
            .try_into()
            .map_err(|e| D::Error::custom(format!("Failed to parse json amount to Amount: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", 8, Some(COIN))]
    #[case("0.1", 8, Some(COIN / 10))]
    #[case("1.30", 8, Some(130_000_000))]
    #[case("000.00000001", 8, Some(1))]
    #[case("1_000", 0, Some(1000))]
    #[case("0.5", 0, None)]
    #[case("1.000000001", 8, None)]
    #[case("1.2.3", 8, None)]
    #[case("-1", 8, None)]
    #[case(".", 8, None)]
    #[case("", 8, None)]
    fn parse_fixedpoint(#[case] s: &str, #[case] decimals: u8, #[case] atoms: Option<u128>) {
        assert_eq!(
            Amount::from_fixedpoint_str(s, decimals),
            atoms.map(Amount::from_atoms)
        );
    }

    #[rstest]
    #[case(0, "0")]
    #[case(1, "0.00000001")]
    #[case(130_000_000, "1.3")]
    #[case(100_000_000_000, "1000")]
    fn print_fixedpoint(#[case] atoms: u128, #[case] expected: &str) {
        let amount = Amount::from_atoms(atoms);
        assert_eq!(amount.into_fixedpoint_str(DECIMALS), expected);
        assert_eq!(Amount::from_fixedpoint_str(expected, DECIMALS), Some(amount));
    }

    #[rstest]
    #[case(COIN, 0, true)]
    #[case(COIN + 1, 0, false)]
    #[case(COIN + COIN / 10, 1, true)]
    #[case(COIN + COIN / 100, 1, false)]
    #[case(1, 8, true)]
    #[case(1, 9, false)]
    fn units(#[case] atoms: u128, #[case] unit_count: u8, #[case] fits: bool) {
        assert_eq!(Amount::from_atoms(atoms).fits_units(unit_count), fits);
    }

    #[test]
    fn floor_to_units() {
        let amount = Amount::from_atoms(133_333_333);
        assert_eq!(amount.floor_to_units(0), Some(Amount::from_coins(1)));
        assert_eq!(amount.floor_to_units(1), Some(Amount::from_atoms(130_000_000)));
        assert_eq!(amount.floor_to_units(8), Some(amount));
        assert_eq!(amount.floor_to_units(9), None);
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(Amount::MAX + Amount::from_atoms(1), None);
        assert_eq!(Amount::ZERO - Amount::from_atoms(1), None);
        assert_eq!(
            amount_sum!(Amount::from_atoms(1), Amount::from_atoms(2), Amount::from_atoms(3)),
            Some(Amount::from_atoms(6))
        );
        let total: Option<Amount> = [Amount::MAX, Amount::from_atoms(1)].into_iter().sum();
        assert_eq!(total, None);
        assert_eq!(Amount::from_atoms(3).abs_diff(Amount::from_atoms(5)), Amount::from_atoms(2));
    }

    #[test]
    fn json() {
        let amount = Amount::from_atoms(12345);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#"{"atoms":"12345"}"#);
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount);
        assert_eq!(
            serde_json::from_str::<Amount>(r#"{"atoms":7}"#).unwrap(),
            Amount::from_atoms(7)
        );
    }
}
