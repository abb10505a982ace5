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

use std::{fmt, str::FromStr};

use script::{Script, SpendTemplate};
use serialization::{Decode, Encode};

use crate::primitives::H160;

/// The address an output is paid to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub enum Destination {
    #[codec(index = 0)]
    PublicKeyHash(H160),
    #[codec(index = 1)]
    ScriptHash(H160),
}

impl Destination {
    pub fn to_script(&self) -> Script {
        SpendTemplate::from(*self).to_script()
    }

    /// The destination a script pays to, if it starts with a standard spend template.
    pub fn from_script(script: &Script) -> Option<Self> {
        script.spend_template().map(Into::into)
    }

    pub fn hash(&self) -> &H160 {
        match self {
            Destination::PublicKeyHash(hash) | Destination::ScriptHash(hash) => hash,
        }
    }
}

impl From<SpendTemplate> for Destination {
    fn from(template: SpendTemplate) -> Self {
        match template {
            SpendTemplate::PubKeyHash(hash) => Destination::PublicKeyHash(H160(hash)),
            SpendTemplate::ScriptHash(hash) => Destination::ScriptHash(H160(hash)),
        }
    }
}

impl From<Destination> for SpendTemplate {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::PublicKeyHash(hash) => SpendTemplate::PubKeyHash(hash.0),
            Destination::ScriptHash(hash) => SpendTemplate::ScriptHash(hash.0),
        }
    }
}

const PUBKEY_HASH_PREFIX: &str = "pkh";
const SCRIPT_HASH_PREFIX: &str = "sh";

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Destination::PublicKeyHash(_) => PUBKEY_HASH_PREFIX,
            Destination::ScriptHash(_) => SCRIPT_HASH_PREFIX,
        };
        write!(f, "{prefix}:{}", hex::encode(self.hash().as_bytes()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DestinationParseError {
    #[error("Unknown destination prefix in {0}")]
    UnknownPrefix(String),
    #[error("Invalid destination hash in {0}")]
    InvalidHash(String),
}

impl FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, hash) = s
            .split_once(':')
            .ok_or_else(|| DestinationParseError::UnknownPrefix(s.to_owned()))?;
        let bytes =
            hex::decode(hash).map_err(|_| DestinationParseError::InvalidHash(s.to_owned()))?;
        if bytes.len() != H160::len_bytes() {
            return Err(DestinationParseError::InvalidHash(s.to_owned()));
        }
        let hash = H160::from_slice(&bytes);
        match prefix {
            PUBKEY_HASH_PREFIX => Ok(Destination::PublicKeyHash(hash)),
            SCRIPT_HASH_PREFIX => Ok(Destination::ScriptHash(hash)),
            _ => Err(DestinationParseError::UnknownPrefix(s.to_owned())),
        }
    }
}

impl serde::Serialize for Destination {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Destination {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
