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

use crate::{opcodes::all::*, Builder, Script};

const P2PKH_LEN: usize = 25;
const P2SH_LEN: usize = 23;

/// The standard spend templates an asset output may be locked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpendTemplate {
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
    PubKeyHash([u8; 20]),
    /// `OP_HASH160 <20 bytes> OP_EQUAL`
    ScriptHash([u8; 20]),
}

impl SpendTemplate {
    pub fn to_script(&self) -> Script {
        match self {
            SpendTemplate::PubKeyHash(hash) => Builder::new()
                .push_opcode(OP_DUP)
                .push_opcode(OP_HASH160)
                .push_slice(hash)
                .push_opcode(OP_EQUALVERIFY)
                .push_opcode(OP_CHECKSIG)
                .into_script(),
            SpendTemplate::ScriptHash(hash) => Builder::new()
                .push_opcode(OP_HASH160)
                .push_slice(hash)
                .push_opcode(OP_EQUAL)
                .into_script(),
        }
    }

    /// Match a spend template at the start of `bytes`, returning it with its length.
    pub fn match_prefix(bytes: &[u8]) -> Option<(Self, usize)> {
        let push20 = OP_PUSHBYTES_20.to_u8();
        if bytes.len() >= P2PKH_LEN
            && bytes[0] == OP_DUP.to_u8()
            && bytes[1] == OP_HASH160.to_u8()
            && bytes[2] == push20
            && bytes[23] == OP_EQUALVERIFY.to_u8()
            && bytes[24] == OP_CHECKSIG.to_u8()
        {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&bytes[3..23]);
            return Some((SpendTemplate::PubKeyHash(hash), P2PKH_LEN));
        }
        if bytes.len() >= P2SH_LEN
            && bytes[0] == OP_HASH160.to_u8()
            && bytes[1] == push20
            && bytes[22] == OP_EQUAL.to_u8()
        {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&bytes[2..22]);
            return Some((SpendTemplate::ScriptHash(hash), P2SH_LEN));
        }
        None
    }

    pub fn hash(&self) -> &[u8; 20] {
        match self {
            SpendTemplate::PubKeyHash(hash) | SpendTemplate::ScriptHash(hash) => hash,
        }
    }
}

impl Script {
    /// The spend template this script starts with, if any.
    pub fn spend_template(&self) -> Option<SpendTemplate> {
        SpendTemplate::match_prefix(self.as_bytes()).map(|(template, _)| template)
    }

    /// True if the whole script is exactly a standard spend template.
    pub fn is_standard_spend(&self) -> bool {
        SpendTemplate::match_prefix(self.as_bytes())
            .is_some_and(|(_, len)| len == self.as_bytes().len())
    }
}
