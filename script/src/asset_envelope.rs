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

//! The envelope carrying an asset operation inside an output script.
//!
//! Holder outputs: `<spend template> OP_ASSET <"yna" tag payload> OP_DROP`.
//! Null-data outputs (tags and freezes): `OP_ASSET <"yna" tag payload> OP_DROP`.
//!
//! `OP_ASSET` together with the three marker bytes forms the 4-byte asset marker.

use crate::{
    opcodes::{self, all::*},
    script::Instructions,
    Builder, Error, Instruction, Result, Script, SpendTemplate,
};

pub const ASSET_MARKER: &[u8; 3] = b"yna";

/// A parsed envelope, borrowing the payload from the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetEnvelope<'a> {
    /// `None` for null-data envelopes.
    pub spend: Option<SpendTemplate>,
    pub tag: u8,
    pub payload: &'a [u8],
}

pub fn build(spend: &SpendTemplate, tag: u8, payload: &[u8]) -> Script {
    envelope(Builder::from(spend.to_script()), tag, payload)
}

pub fn build_null(tag: u8, payload: &[u8]) -> Script {
    envelope(Builder::new(), tag, payload)
}

fn envelope(builder: Builder, tag: u8, payload: &[u8]) -> Script {
    let mut data = Vec::with_capacity(ASSET_MARKER.len() + 1 + payload.len());
    data.extend_from_slice(ASSET_MARKER);
    data.push(tag);
    data.extend_from_slice(payload);
    builder
        .push_opcode(OP_ASSET)
        .push_slice(&data)
        .push_opcode(OP_DROP)
        .into_script()
}

/// Split an output script into its asset envelope.
///
/// Returns `Ok(None)` for scripts that do not carry the asset marker at all, and an
/// error for scripts that carry it anywhere without forming a well-formed envelope.
pub fn split(script: &Script) -> Result<Option<AssetEnvelope<'_>>> {
    let bytes = script.as_bytes();
    let (spend, rest) = match SpendTemplate::match_prefix(bytes) {
        Some((template, len)) => (Some(template), &bytes[len..]),
        None => (None, bytes),
    };

    if rest.first() != Some(&OP_ASSET.to_u8()) {
        if contains_marker(rest) {
            return Err(Error::MalformedAssetEnvelope("marker out of place"));
        }
        return Ok(None);
    }

    let mut instructions = Instructions::new(&rest[1..]);
    let data = match instructions.next() {
        Some(Ok(Instruction::PushBytes(data))) => data,
        _ => return Err(Error::MalformedAssetEnvelope("missing envelope push")),
    };
    if data.len() < ASSET_MARKER.len() + 1 || &data[..ASSET_MARKER.len()] != ASSET_MARKER {
        return Err(Error::MalformedAssetEnvelope("missing marker bytes"));
    }
    match instructions.next() {
        Some(Ok(Instruction::Op(op))) if op == OP_DROP => (),
        _ => return Err(Error::MalformedAssetEnvelope("missing OP_DROP")),
    }
    if instructions.next().is_some() {
        return Err(Error::MalformedAssetEnvelope("data after OP_DROP"));
    }

    Ok(Some(AssetEnvelope {
        spend,
        tag: data[ASSET_MARKER.len()],
        payload: &data[ASSET_MARKER.len() + 1..],
    }))
}

/// True if the bytes contain `OP_ASSET` closely followed by the marker bytes.
pub fn contains_marker(bytes: &[u8]) -> bool {
    // The marker follows the opcode after at most a PUSHDATA4 header.
    const MAX_GAP: usize = 5;
    bytes.iter().enumerate().any(|(i, b)| {
        *b == OP_ASSET.to_u8() && {
            let window = &bytes[i + 1..bytes.len().min(i + 1 + MAX_GAP + ASSET_MARKER.len())];
            window.windows(ASSET_MARKER.len()).any(|w| w == ASSET_MARKER)
        }
    })
}

/// True if the script is a null-data asset script (no spend template).
pub fn is_null_asset_script(script: &Script) -> bool {
    script.as_bytes().first() == Some(&opcodes::all::OP_ASSET.to_u8())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some(SpendTemplate::PubKeyHash([3; 20])), b'o', vec![])]
    #[case(Some(SpendTemplate::ScriptHash([4; 20])), b't', vec![9; 300])]
    #[case(None, b'g', vec![1, 2, 3])]
    fn build_then_split(
        #[case] spend: Option<SpendTemplate>,
        #[case] tag: u8,
        #[case] payload: Vec<u8>,
    ) {
        let script = match &spend {
            Some(spend) => build(spend, tag, &payload),
            None => build_null(tag, &payload),
        };
        assert_eq!(is_null_asset_script(&script), spend.is_none());
        let envelope = split(&script).unwrap().unwrap();
        assert_eq!(
            envelope,
            AssetEnvelope {
                spend,
                tag,
                payload: &payload
            }
        );
    }

    #[test]
    fn plain_scripts_have_no_envelope() {
        let p2pkh = SpendTemplate::PubKeyHash([0xc0; 20]).to_script();
        assert_eq!(split(&p2pkh), Ok(None));
        assert_eq!(split(&Script::new()), Ok(None));
    }

    #[test]
    fn malformed_envelopes() {
        let spend = SpendTemplate::PubKeyHash([5; 20]);
        let good = build(&spend, b't', &[1, 2]);

        // Missing OP_DROP
        let mut bytes = good.clone().into_bytes();
        bytes.pop();
        assert!(split(&Script::from(bytes)).is_err());

        // Trailing opcode
        let with_trailer = Builder::from(good.clone()).push_opcode(OP_DUP).into_script();
        assert!(split(&with_trailer).is_err());

        // Wrong marker bytes
        let wrong_marker = Builder::from(spend.to_script())
            .push_opcode(OP_ASSET)
            .push_slice(b"ynbt")
            .push_opcode(OP_DROP)
            .into_script();
        assert!(split(&wrong_marker).is_err());

        // Marker bytes present after a non-standard prefix
        let misplaced = Builder::new()
            .push_opcode(OP_RETURN)
            .append_script(&build_null(b't', &[1]))
            .into_script();
        assert_eq!(
            split(&misplaced),
            Err(Error::MalformedAssetEnvelope("marker out of place"))
        );

        // Truncated push
        let mut bytes = good.into_bytes();
        bytes.truncate(28);
        assert!(split(&Script::from(bytes)).is_err());
    }

    proptest! {
        #[test]
        fn split_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..80)) {
            let _ = split(&Script::from(bytes));
        }
    }
}
