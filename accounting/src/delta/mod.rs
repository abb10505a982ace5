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

pub mod delta_amount_collection;
pub mod delta_data_collection;

use common::primitives::{Amount, SignedAmount};
use utils::ensure;

use crate::error::Error;

use self::delta_data_collection::DataDelta;

/// Apply a delta to a stored value. The delta must start from that value.
pub fn combine_data_with_delta<T: Clone + PartialEq>(
    base: Option<&T>,
    delta: Option<&DataDelta<T>>,
) -> Result<Option<T>, Error> {
    match delta {
        None => Ok(base.cloned()),
        Some(delta) => {
            ensure!(delta.prev() == base, Error::DataMismatch);
            Ok(delta.next().cloned())
        }
    }
}

/// Add a signed delta to an unsigned amount; the result must stay non-negative.
pub fn combine_amount_delta(base: Amount, delta: Option<SignedAmount>) -> Result<Amount, Error> {
    match delta {
        None => Ok(base),
        Some(delta) => {
            let base = base.into_signed().ok_or(Error::ArithmeticErrorToSignedFailed)?;
            let sum = (base + delta).ok_or(Error::ArithmeticErrorDeltaAdditionFailed)?;
            Amount::from_signed(sum).ok_or(Error::ArithmeticErrorSumToUnsignedFailed)
        }
    }
}
