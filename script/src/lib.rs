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

//! Bitcoin-style output scripts.
//!
//! Scripts are never executed here. The crate parses and builds them: standard spend
//! templates (pay to public key hash, pay to script hash) and the asset envelope that
//! carries an asset operation after the spend template.
//!
//! ```
//! use script::{asset_envelope, SpendTemplate};
//!
//! let spend = SpendTemplate::PubKeyHash([7; 20]);
//! let script = asset_envelope::build(&spend, b't', &[1, 2, 3]);
//!
//! let envelope = asset_envelope::split(&script).unwrap().unwrap();
//! assert_eq!(envelope.spend, Some(spend));
//! assert_eq!(envelope.tag, b't');
//! assert_eq!(envelope.payload, &[1, 2, 3]);
//! ```

pub mod asset_envelope;
mod error;
pub mod opcodes;
pub mod script;
mod standard;

pub use crate::script::{Builder, Instruction, Instructions, Script};
pub use error::{Error, Result};
pub use standard::SpendTemplate;
