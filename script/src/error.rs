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

/// Script parsing errors.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Push data runs past the end of the script")]
    EarlyEndOfScript,
    #[error("Push data length does not fit in memory")]
    NumericOverflow,
    #[error("Push of {0} bytes uses a non-minimal opcode")]
    NonMinimalPush(usize),
    #[error("Asset marker found but the envelope is malformed: {0}")]
    MalformedAssetEnvelope(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
