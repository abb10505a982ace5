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

pub mod random;

use hex::ToHex;
use rand::{distributions::uniform::SampleRange, Rng};

/// Assert that the encoded object matches the expected hex string.
pub fn assert_encoded_eq<E: serialization::Encode>(to_encode: &E, expected_hex: &str) {
    assert_eq!(to_encode.encode().encode_hex::<String>(), expected_hex);
}

/// Get all variants of the object with single-bit flips (decoding may fail).
pub fn try_all_single_bit_mutations<T>(
    obj: &T,
) -> impl Iterator<Item = Result<T, serialization::Error>>
where
    T: serialization::DecodeAll + serialization::Encode,
{
    let obj_enc = obj.encode();
    (0..(obj_enc.len() * 8)).map(move |bit| {
        let (byte, bit) = (bit / 8, bit % 8);
        let mut mutated = obj_enc.clone();
        mutated[byte] ^= 1u8 << bit;
        T::decode_all(&mut mutated.as_slice())
    })
}

/// A random string made of the characters allowed in root asset names.
pub fn random_asset_name_chars<R: SampleRange<usize>>(rng: &mut impl Rng, range_len: R) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    if range_len.is_empty() {
        return String::new();
    }
    let len = rng.gen_range(range_len);
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[macro_export]
macro_rules! assert_matches_return_val {
    ($in:expr, $pattern:pat $(if $guard:expr)?, $out:expr) => {
        {
            let to_match = $in;
            match to_match {
                $pattern $(if $guard)? => $out,
                _ => {
                    panic!(
                        "Assertion failed: expression {:?} doesn't match pattern {}",
                        to_match,
                        stringify!($pattern)
                    )
                }
            }
        }
    };
}

#[macro_export]
macro_rules! assert_matches {
    ($in:expr, $pattern:pat $(if $guard:expr)?) => {
        $crate::assert_matches_return_val!($in, $pattern $(if $guard)?, ())
    };
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serialization::Encode;

    use super::*;
    use crate::random::{make_seedable_rng, Seed};

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn asset_name_chars_are_uppercase(#[case] seed: Seed) {
        let mut rng = make_seedable_rng(seed);
        let name = random_asset_name_chars(&mut rng, 3..20);
        assert!((3..20).contains(&name.len()));
        assert!(name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(random_asset_name_chars(&mut rng, 0..0).is_empty());
    }

    #[test]
    fn bit_mutations_never_panic() {
        let value = (7u32, "ABC".to_owned());
        let results: Vec<_> = try_all_single_bit_mutations(&value).collect();
        assert_eq!(results.len(), value.encode().len() * 8);
    }

    #[test]
    fn matches_macro() {
        assert_matches!(Some(3), Some(x) if x > 2);
        let v = assert_matches_return_val!(Ok::<u8, ()>(5), Ok(v), v);
        assert_eq!(v, 5);
    }
}
