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

//! Opcodes used by output scripts.

use std::fmt;

/// A script opcode.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct All {
    code: u8,
}

impl All {
    pub const fn from_u8(code: u8) -> Self {
        All { code }
    }

    pub const fn to_u8(self) -> u8 {
        self.code
    }

    /// Classifies the opcode by what it does to a script parser.
    pub fn classify(self) -> Class {
        use all::*;
        match self {
            op if op.code < OP_PUSHDATA1.code => Class::PushBytes(op.code as u32),
            OP_PUSHDATA1 => Class::PushData(1),
            OP_PUSHDATA2 => Class::PushData(2),
            OP_PUSHDATA4 => Class::PushData(4),
            OP_1NEGATE => Class::PushNum(-1),
            op if (OP_1.code..=OP_16.code).contains(&op.code) => {
                Class::PushNum((op.code - OP_1.code + 1) as i32)
            }
            OP_RETURN => Class::ReturnOp,
            OP_ASSET => Class::AssetMarker,
            _ => Class::Ordinary(self),
        }
    }
}

impl From<u8> for All {
    fn from(code: u8) -> Self {
        All { code }
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use all::*;
        let name = match *self {
            OP_0 => "OP_0",
            OP_PUSHDATA1 => "OP_PUSHDATA1",
            OP_PUSHDATA2 => "OP_PUSHDATA2",
            OP_PUSHDATA4 => "OP_PUSHDATA4",
            OP_1NEGATE => "OP_1NEGATE",
            OP_RETURN => "OP_RETURN",
            OP_DROP => "OP_DROP",
            OP_DUP => "OP_DUP",
            OP_EQUAL => "OP_EQUAL",
            OP_EQUALVERIFY => "OP_EQUALVERIFY",
            OP_HASH160 => "OP_HASH160",
            OP_CHECKSIG => "OP_CHECKSIG",
            OP_ASSET => "OP_ASSET",
            op => return write!(f, "OP_UNKNOWN_{:#04x}", op.code),
        };
        f.write_str(name)
    }
}

/// Broad categories of opcodes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Class {
    /// Pushes the given number onto the stack.
    PushNum(i32),
    /// Pushes the given number of bytes that follow the opcode.
    PushBytes(u32),
    /// Pushes data whose length is encoded in the given number of bytes.
    PushData(u8),
    /// Fails the script, marks the output unspendable.
    ReturnOp,
    /// Starts an asset envelope.
    AssetMarker,
    /// Anything else.
    Ordinary(All),
}

pub mod all {
    use super::All;

    pub const OP_0: All = All::from_u8(0x00);
    pub const OP_PUSHBYTES_20: All = All::from_u8(0x14);
    pub const OP_PUSHDATA1: All = All::from_u8(0x4c);
    pub const OP_PUSHDATA2: All = All::from_u8(0x4d);
    pub const OP_PUSHDATA4: All = All::from_u8(0x4e);
    pub const OP_1NEGATE: All = All::from_u8(0x4f);
    pub const OP_1: All = All::from_u8(0x51);
    pub const OP_16: All = All::from_u8(0x60);
    pub const OP_RETURN: All = All::from_u8(0x6a);
    pub const OP_DROP: All = All::from_u8(0x75);
    pub const OP_DUP: All = All::from_u8(0x76);
    pub const OP_EQUAL: All = All::from_u8(0x87);
    pub const OP_EQUALVERIFY: All = All::from_u8(0x88);
    pub const OP_HASH160: All = All::from_u8(0xa9);
    pub const OP_CHECKSIG: All = All::from_u8(0xac);
    /// Asset envelope marker, followed by the envelope push and `OP_DROP`.
    pub const OP_ASSET: All = All::from_u8(0xc0);
}

#[cfg(test)]
mod tests {
    use super::{all::*, *};

    #[test]
    fn classification() {
        assert_eq!(OP_0.classify(), Class::PushBytes(0));
        assert_eq!(All::from(0x01).classify(), Class::PushBytes(1));
        assert_eq!(All::from(0x4b).classify(), Class::PushBytes(75));
        assert_eq!(OP_PUSHDATA2.classify(), Class::PushData(2));
        assert_eq!(OP_1.classify(), Class::PushNum(1));
        assert_eq!(OP_16.classify(), Class::PushNum(16));
        assert_eq!(OP_RETURN.classify(), Class::ReturnOp);
        assert_eq!(OP_ASSET.classify(), Class::AssetMarker);
        assert_eq!(OP_DROP.classify(), Class::Ordinary(OP_DROP));
    }

    #[test]
    fn debug_names() {
        assert_eq!(format!("{:?}", OP_HASH160), "OP_HASH160");
        assert_eq!(format!("{:?}", All::from(0xfe)), "OP_UNKNOWN_0xfe");
    }
}
