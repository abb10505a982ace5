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

/// Verifier string errors. The display form of each is its reject reason.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifierStringError {
    #[error("bad-txns-null-verifier-empty")]
    Empty,
    #[error("bad-txns-null-verifier-length-greater-than-max-length")]
    TooLong(usize),
    #[error("bad-txns-null-verifier-invalid-asset-name-{0}")]
    InvalidQualifierName(String),
    #[error("bad-txns-null-verifier-failed-syntax-check")]
    Syntax(SyntaxError),
    #[error("bad-txns-null-verifier-contains-non-issued-qualifier")]
    NonIssuedQualifier(String),
    #[error("bad-txns-null-verifier-address-failed-verification")]
    FailedVerification,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedCharacter(char, usize),
    #[error("Unexpected token at {0}")]
    UnexpectedToken(usize),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unbalanced parenthesis at {0}")]
    UnbalancedParenthesis(usize),
}

impl From<SyntaxError> for VerifierStringError {
    fn from(e: SyntaxError) -> Self {
        VerifierStringError::Syntax(e)
    }
}
