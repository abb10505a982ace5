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

use crate::{
    opcodes::{self, all::*},
    Error,
};

/// A serialized output script.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the script instructions.
    ///
    /// Non-minimal pushes are accepted; iteration stops after the first error.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            data: &self.0,
            enforce_minimal: false,
        }
    }

    /// Iterate over the script instructions, rejecting non-minimal pushes.
    pub fn instructions_minimal(&self) -> Instructions<'_> {
        Instructions {
            data: &self.0,
            enforce_minimal: true,
        }
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Script(")?;
        let mut first = true;
        for ins in self.instructions() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match ins {
                Ok(Instruction::PushBytes(data)) => write!(f, "<{}>", hex::encode(data))?,
                Ok(Instruction::Op(op)) => write!(f, "{op:?}")?,
                Err(_) => {
                    write!(f, "<unparsable>")?;
                    break;
                }
            }
        }
        f.write_str(")")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// A single script instruction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Instruction<'a> {
    /// Push a slice of bytes.
    PushBytes(&'a [u8]),
    /// Any opcode that is not a data push.
    Op(opcodes::All),
}

/// Iterator over script instructions.
pub struct Instructions<'a> {
    data: &'a [u8],
    enforce_minimal: bool,
}

impl<'a> Instructions<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Instructions {
            data,
            enforce_minimal: false,
        }
    }

    /// Bytes of the script that have not been parsed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }

    fn take_push(&mut self, offset: usize, len: usize) -> Result<Instruction<'a>, Error> {
        let end = offset.checked_add(len).ok_or(Error::NumericOverflow)?;
        if self.data.len() < end {
            self.data = &[];
            return Err(Error::EarlyEndOfScript);
        }
        let pushed = &self.data[offset..end];
        self.data = &self.data[end..];
        Ok(Instruction::PushBytes(pushed))
    }

    fn read_len(&mut self, size: usize) -> Result<usize, Error> {
        if self.data.len() < 1 + size {
            self.data = &[];
            return Err(Error::EarlyEndOfScript);
        }
        let len = self.data[1..1 + size]
            .iter()
            .rev()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);
        Ok(len)
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.data.first()?;
        let op = opcodes::All::from(first);
        let result = match op.classify() {
            opcodes::Class::PushBytes(n) => self.take_push(1, n as usize),
            opcodes::Class::PushData(size) => {
                let size = size as usize;
                match self.read_len(size) {
                    Ok(len) => {
                        if self.enforce_minimal && !is_minimal_push_data(size, len) {
                            self.data = &[];
                            return Some(Err(Error::NonMinimalPush(len)));
                        }
                        self.take_push(1 + size, len)
                    }
                    Err(e) => Err(e),
                }
            }
            _ => {
                self.data = &self.data[1..];
                Ok(Instruction::Op(op))
            }
        };
        Some(result)
    }
}

fn is_minimal_push_data(size_bytes: usize, len: usize) -> bool {
    match size_bytes {
        1 => len >= OP_PUSHDATA1.to_u8() as usize,
        2 => len > 0xff,
        _ => len > 0xffff,
    }
}

/// Script builder.
#[derive(Clone, Default, Debug)]
pub struct Builder(Vec<u8>);

impl Builder {
    pub fn new() -> Self {
        Builder(Vec::new())
    }

    #[must_use]
    pub fn push_opcode(mut self, op: opcodes::All) -> Self {
        self.0.push(op.to_u8());
        self
    }

    /// Push a slice using the shortest push opcode.
    #[must_use]
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1.to_u8() as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1.to_u8());
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2.to_u8());
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4.to_u8());
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Append raw script bytes, used to extend an existing script.
    #[must_use]
    pub fn append_script(mut self, script: &Script) -> Self {
        self.0.extend_from_slice(script.as_bytes());
        self
    }

    pub fn into_script(self) -> Script {
        Script(self.0)
    }
}

impl From<Script> for Builder {
    fn from(script: Script) -> Self {
        Builder(script.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use test_utils::random::{make_seedable_rng, Seed};

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(75)]
    #[case(76)]
    #[case(255)]
    #[case(256)]
    #[case(70000)]
    fn push_slice_then_iterate(#[case] len: usize) {
        let data = vec![0xab; len];
        let script = Builder::new().push_slice(&data).push_opcode(OP_DROP).into_script();

        let parsed: Vec<_> = script.instructions_minimal().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            parsed,
            vec![Instruction::PushBytes(&data), Instruction::Op(OP_DROP)]
        );
    }

    #[test]
    fn truncated_push() {
        let script = Script::from(vec![0x05, 1, 2]);
        let mut ins = script.instructions();
        assert_eq!(ins.next(), Some(Err(Error::EarlyEndOfScript)));
        assert_eq!(ins.next(), None);

        let script = Script::from(vec![OP_PUSHDATA2.to_u8(), 0x01]);
        assert_eq!(
            script.instructions().next(),
            Some(Err(Error::EarlyEndOfScript))
        );
    }

    #[test]
    fn non_minimal_push() {
        let script = Script::from(vec![OP_PUSHDATA1.to_u8(), 0x01, 0x07]);
        assert_eq!(
            script.instructions().next(),
            Some(Ok(Instruction::PushBytes(&[0x07])))
        );
        assert_eq!(
            script.instructions_minimal().next(),
            Some(Err(Error::NonMinimalPush(1)))
        );
    }

    #[test]
    fn debug_print() {
        let script = Builder::new()
            .push_opcode(OP_DUP)
            .push_slice(&[0x01, 0x02])
            .push_opcode(OP_DROP)
            .into_script();
        assert_eq!(format!("{script:?}"), "Script(OP_DUP <0102> OP_DROP)");
        assert_eq!(script.to_string(), "7602010275");
    }

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn random_bytes_never_panic(#[case] seed: Seed) {
        use rand::Rng;

        let mut rng = make_seedable_rng(seed);
        for _ in 0..200 {
            let len = rng.gen_range(0..64);
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let script = Script::from(bytes);
            let _ = script.instructions().count();
            let _ = format!("{script:?}");
        }
    }
}
