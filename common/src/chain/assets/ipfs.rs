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

use crate::primitives::H256;

pub const IPFS_MULTIHASH_LEN: usize = 34;
const SHA256_MULTIHASH_PREFIX: [u8; 2] = [0x12, 0x20];

/// Reference attached to an asset or a message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub enum IpfsHash {
    /// A sha2-256 multihash.
    #[codec(index = 0)]
    Multihash([u8; IPFS_MULTIHASH_LEN]),
    /// A transaction id; accepted only once messaging is active.
    #[codec(index = 1)]
    TxId(H256),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IpfsHashError {
    #[error("Invalid IPFS hash length {0}")]
    InvalidLength(usize),
    #[error("IPFS hash is not a sha2-256 multihash")]
    NotSha256Multihash,
}

impl IpfsHash {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IpfsHashError> {
        match bytes.len() {
            IPFS_MULTIHASH_LEN => {
                let mut hash = [0u8; IPFS_MULTIHASH_LEN];
                hash.copy_from_slice(bytes);
                let hash = IpfsHash::Multihash(hash);
                if !hash.is_well_formed() {
                    return Err(IpfsHashError::NotSha256Multihash);
                }
                Ok(hash)
            }
            32 => Ok(IpfsHash::TxId(H256::from_slice(bytes))),
            len => Err(IpfsHashError::InvalidLength(len)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IpfsHash::Multihash(hash) => hash,
            IpfsHash::TxId(hash) => hash.as_bytes(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            IpfsHash::Multihash(hash) => hash.starts_with(&SHA256_MULTIHASH_PREFIX),
            IpfsHash::TxId(_) => true,
        }
    }

    pub fn is_txid(&self) -> bool {
        matches!(self, IpfsHash::TxId(_))
    }
}

impl std::fmt::Display for IpfsHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.as_bytes()))
    }
}

impl serde::Serialize for IpfsHash {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn multihash(fill: u8) -> Vec<u8> {
        let mut bytes = vec![fill; IPFS_MULTIHASH_LEN];
        bytes[..2].copy_from_slice(&SHA256_MULTIHASH_PREFIX);
        bytes
    }

    #[test]
    fn accepted_forms() {
        let hash = IpfsHash::from_bytes(&multihash(3)).unwrap();
        assert!(!hash.is_txid());
        assert_eq!(hash.as_bytes(), multihash(3).as_slice());
        assert_eq!(hash.to_string(), hex::encode(multihash(3)));

        let txid = IpfsHash::from_bytes(&[7; 32]).unwrap();
        assert!(txid.is_txid());
    }

    #[rstest]
    #[case(vec![], IpfsHashError::InvalidLength(0))]
    #[case(vec![0x12; 33], IpfsHashError::InvalidLength(33))]
    #[case(vec![0x12; 34], IpfsHashError::NotSha256Multihash)]
    fn rejected_forms(#[case] bytes: Vec<u8>, #[case] error: IpfsHashError) {
        assert_eq!(IpfsHash::from_bytes(&bytes), Err(error));
    }
}
