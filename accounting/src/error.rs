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

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Signed to unsigned conversion failed")]
    ArithmeticErrorToUnsignedFailed,
    #[error("Unsigned to signed conversion failed")]
    ArithmeticErrorToSignedFailed,
    #[error("Delta addition failed")]
    ArithmeticErrorDeltaAdditionFailed,
    #[error("Negative result when converting a sum to unsigned")]
    ArithmeticErrorSumToUnsignedFailed,
    #[error("Delta does not start from the state the previous delta left")]
    DeltaDataMismatch,
    #[error("Delta does not start from the stored data")]
    DataMismatch,
}
