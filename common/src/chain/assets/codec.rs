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

//! Asset operations in output scripts.
//!
//! The SCALE encoding of an [AssetOperation] starts with the variant index, which is
//! written as the op tag byte of the envelope; the rest of the encoding is the payload.

use script::{asset_envelope, Script, SpendTemplate};
use serialization::{DecodeAll, Encode};
use utils::ensure;

use super::{ipfs::IpfsHash, AssetOperation};
use crate::chain::Destination;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetScriptError {
    #[error("Malformed asset envelope: {0}")]
    Envelope(#[from] script::Error),
    #[error("Malformed asset operation payload: {0}")]
    Payload(String),
    #[error("Null asset operation with a holder or holder operation without one")]
    HolderMismatch,
    #[error("Malformed IPFS hash in asset operation")]
    InvalidIpfsHash,
}

/// An asset operation decoded from a script, with the holder of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAssetScript {
    /// `None` for null-data operations.
    pub holder: Option<Destination>,
    pub operation: AssetOperation,
}

fn split_tag(operation: &AssetOperation) -> (u8, Vec<u8>) {
    let mut encoded = operation.encode();
    // Enum encodings always start with the variant index
    let tag = encoded.remove(0);
    (tag, encoded)
}

pub fn asset_script(holder: &Destination, operation: &AssetOperation) -> Script {
    let (tag, payload) = split_tag(operation);
    asset_envelope::build(&SpendTemplate::from(*holder), tag, &payload)
}

pub fn null_asset_script(operation: &AssetOperation) -> Script {
    let (tag, payload) = split_tag(operation);
    asset_envelope::build_null(tag, &payload)
}

/// Decode the asset operation of an output script.
///
/// `Ok(None)` means a plain output. Any script carrying the asset marker must decode
/// completely or it is an error.
pub fn decode_asset_script(
    script: &Script,
) -> Result<Option<DecodedAssetScript>, AssetScriptError> {
    let envelope = match asset_envelope::split(script)? {
        Some(envelope) => envelope,
        None => return Ok(None),
    };

    let mut encoded = Vec::with_capacity(1 + envelope.payload.len());
    encoded.push(envelope.tag);
    encoded.extend_from_slice(envelope.payload);
    let operation = AssetOperation::decode_all(&mut encoded.as_slice())
        .map_err(|e| AssetScriptError::Payload(e.to_string()))?;

    ensure!(
        operation.is_null() == envelope.spend.is_none(),
        AssetScriptError::HolderMismatch
    );
    ensure!(
        operation.ipfs_hashes().all(IpfsHash::is_well_formed),
        AssetScriptError::InvalidIpfsHash
    );

    Ok(Some(DecodedAssetScript {
        holder: envelope.spend.map(Destination::from),
        operation,
    }))
}
