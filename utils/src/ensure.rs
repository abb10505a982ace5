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

/// Early exit if the given condition does not hold.
///
/// In a function returning `Option`, exits with `None`. With a second argument, exits
/// with `Err(err)` in a function returning `Result`. The error expression is only
/// evaluated when the condition fails.
///
/// ```
/// # use utils::ensure;
/// #[derive(PartialEq, Eq, Debug)]
/// enum UnitsError {
///     TooManyDecimals(u8),
///     NotAMultiple,
/// }
///
/// fn fit_to_units(atoms: u128, units: u8) -> Result<u128, UnitsError> {
///     ensure!(units <= 8, UnitsError::TooManyDecimals(units));
///     let step = 10u128.pow(8 - units as u32);
///     ensure!(atoms % step == 0, UnitsError::NotAMultiple);
///     Ok(atoms / step)
/// }
///
/// assert_eq!(fit_to_units(300_000_000, 0), Ok(3));
/// assert_eq!(fit_to_units(150_000_000, 1), Ok(15));
/// assert_eq!(fit_to_units(150_000_000, 0), Err(UnitsError::NotAMultiple));
/// assert_eq!(fit_to_units(1, 9), Err(UnitsError::TooManyDecimals(9)));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $cond.then(|| ())?
    };
    ($cond:expr, $err:expr $(,)?) => {
        $cond.then(|| ()).ok_or_else(|| $err)?
    };
}

/// Function style variants of [ensure!], for use in expression position.
pub mod func_style {
    /// Maps `true` to `Some(())`, `false` to `None`.
    #[must_use = "Result of ensure_some not used. Use the `?` operator for early exit."]
    pub fn ensure_some(cond: bool) -> Option<()> {
        cond.then_some(())
    }

    /// Maps `true` to `Ok(())`, `false` to `Err(err)`.
    #[must_use = "Result of ensure not used. Use the `?` operator for early exit."]
    pub fn ensure<E>(cond: bool, err: E) -> Result<(), E> {
        ensure_some(cond).ok_or(err)
    }
}

#[cfg(test)]
mod tests {
    use super::func_style::*;

    fn checked_half(x: u32) -> Option<u32> {
        ensure!(x % 2 == 0);
        Some(x / 2)
    }

    fn checked_half_res(x: u32) -> Result<u32, u32> {
        ensure!(x % 2 == 0, x);
        Ok(x / 2)
    }

    #[test]
    fn macro_style() {
        assert_eq!(checked_half(4), Some(2));
        assert_eq!(checked_half(5), None);
        assert_eq!(checked_half_res(8), Ok(4));
        assert_eq!(checked_half_res(7), Err(7));
    }

    #[test]
    fn func_style() {
        assert_eq!(ensure_some(true), Some(()));
        assert_eq!(ensure_some(false), None);
        assert_eq!(ensure(false, "odd"), Err("odd"));
        assert_eq!(ensure(true, "odd"), Ok(()));
    }
}
