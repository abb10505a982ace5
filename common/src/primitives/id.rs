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

use std::fmt::{Debug, Display, LowerHex};

use blake2::{digest::consts::U32, Blake2b, Digest};
use serialization::{Decode, Encode};

fixed_hash::construct_fixed_hash! {
    #[derive(Encode, Decode)]
    pub struct H256(32);
}

fixed_hash::construct_fixed_hash! {
    #[derive(Encode, Decode)]
    pub struct H160(20);
}

type Blake2b256 = Blake2b<U32>;

/// Hash of the SCALE encoding of a value.
pub fn hash_encoded<T: Encode>(value: &T) -> H256 {
    let mut hasher = Blake2b256::new();
    value.using_encoded(|bytes| hasher.update(bytes));
    H256(hasher.finalize().into())
}

macro_rules! impl_hex_serde {
    ($name:ident) => {
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&format!("{self:x}"))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_hex_serde!(H256);
impl_hex_serde!(H160);

#[derive(Encode, Decode)]
pub struct Id<T> {
    hash: H256,
    _shadow: std::marker::PhantomData<fn() -> T>,
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id<{}>{{{:x}}}", short_type_name::<T>(), self.hash)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

// Implementing Clone manually to avoid the Clone constraint on T
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.hash)
    }
}

impl<T> LowerHex for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(&self.hash, f)
    }
}

// Comparisons and hashing look at the hash only, so that they don't constrain T
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl<T> Eq for Id<T> {}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hash.cmp(&other.hash)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state)
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> From<H256> for Id<T> {
    fn from(hash: H256) -> Self {
        Self::new(hash)
    }
}

impl<T> Id<T> {
    pub const fn new(h: H256) -> Self {
        Self {
            hash: h,
            _shadow: std::marker::PhantomData,
        }
    }

    pub const fn to_hash(&self) -> H256 {
        self.hash
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.hash.serialize(s)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        H256::deserialize(d).map(Self::new)
    }
}

/// Objects that have an id derived from their content.
pub trait Idable {
    type Tag;
    fn get_id(&self) -> Id<Self::Tag>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    #[test]
    fn hashing_is_deterministic() {
        let a = hash_encoded(&(1u32, "ABC".to_owned()));
        let b = hash_encoded(&(1u32, "ABC".to_owned()));
        let c = hash_encoded(&(2u32, "ABC".to_owned()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn id_formatting() {
        let id: Id<Thing> = Id::new(H256::repeat_byte(0xab));
        assert_eq!(id.to_string(), "ab".repeat(32));
        assert_eq!(format!("{id:?}"), format!("Id<Thing>{{{}}}", "ab".repeat(32)));

        let json = serde_json::to_string(&H160::repeat_byte(1)).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(20)));
        assert_eq!(serde_json::from_str::<H160>(&json).unwrap(), H160::repeat_byte(1));
    }
}
