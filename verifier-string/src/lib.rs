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

//! Verifier strings: boolean expressions over qualifier tags that gate who may hold
//! a restricted asset.
//!
//! ```
//! # use verifier_string::{parse, strip_verifier_string};
//! assert_eq!(strip_verifier_string("#KYC && !#BANNED"), "KYC&&!BANNED");
//! let expr = parse("#KYC && (#USA || #CAN)").unwrap();
//! assert_eq!(expr.to_string(), "KYC&(USA|CAN)");
//! assert_eq!(expr.qualifiers().len(), 3);
//! ```

mod error;
mod expr;
mod parser;

use common::chain::{
    assets::name::{self, AssetKind, QUALIFIER_PREFIX},
    Destination,
};
use utils::ensure;

pub use error::{SyntaxError, VerifierStringError};
pub use expr::{qualifier_asset_name, Expr};

pub type Result<T> = core::result::Result<T, VerifierStringError>;

/// Maximum length of a verifier string after stripping.
pub const MAX_VERIFIER_STRING_LENGTH: usize = 80;

/// The verifier every address passes.
pub const TRUE_VERIFIER: &str = "true";

/// Tag assignments of addresses.
pub trait QualifierTags {
    /// True if `address` carries `qualifier` (full asset name, `#` included).
    fn has_tag(&self, qualifier: &str, address: &Destination) -> bool;
}

/// Issued qualifier assets.
pub trait QualifierExistence {
    fn qualifier_exists(&self, qualifier: &str) -> bool;
}

/// Removes whitespace and `#` characters; this is the form verifiers are stored in.
pub fn strip_verifier_string(verifier: &str) -> String {
    verifier
        .chars()
        .filter(|c| !c.is_whitespace() && *c != QUALIFIER_PREFIX)
        .collect()
}

/// Parse and check a verifier string without consulting chain state.
pub fn parse(verifier: &str) -> Result<Expr> {
    let stripped = strip_verifier_string(verifier);
    ensure!(!stripped.is_empty(), VerifierStringError::Empty);
    ensure!(
        stripped.len() <= MAX_VERIFIER_STRING_LENGTH,
        VerifierStringError::TooLong(stripped.len())
    );

    let expr = parser::parse_stripped(&stripped)?;

    for qualifier in expr.qualifiers() {
        if name::classify(&qualifier) != AssetKind::Qualifier {
            let bare = qualifier.trim_start_matches(QUALIFIER_PREFIX).to_owned();
            return Err(VerifierStringError::InvalidQualifierName(bare));
        }
    }

    Ok(expr)
}

/// Syntax check plus the check that every referenced qualifier was issued.
pub fn is_valid_verifier_string(
    verifier: &str,
    existence: &impl QualifierExistence,
) -> Result<Expr> {
    let expr = parse(verifier)?;
    if let Some(missing) =
        expr.qualifiers().into_iter().find(|q| !existence.qualifier_exists(q))
    {
        return Err(VerifierStringError::NonIssuedQualifier(missing));
    }
    Ok(expr)
}

/// Checks that `address` satisfies the verifier.
pub fn verify_address<V: QualifierTags + QualifierExistence>(
    verifier: &str,
    view: &V,
    address: &Destination,
) -> Result<()> {
    if verifier == TRUE_VERIFIER {
        return Ok(());
    }
    let expr = is_valid_verifier_string(verifier, view)?;
    ensure!(
        expr.evaluate(view, address),
        VerifierStringError::FailedVerification
    );
    logging::log::trace!("Address {address} passed verifier {verifier}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use common::primitives::H160;
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[derive(Default)]
    struct Tags {
        issued: BTreeSet<String>,
        tagged: BTreeSet<(String, Destination)>,
    }

    impl Tags {
        fn issue(mut self, qualifier: &str) -> Self {
            self.issued.insert(qualifier.to_owned());
            self
        }

        fn tag(mut self, qualifier: &str, address: Destination) -> Self {
            self.tagged.insert((qualifier.to_owned(), address));
            self
        }
    }

    impl QualifierTags for Tags {
        fn has_tag(&self, qualifier: &str, address: &Destination) -> bool {
            self.tagged.contains(&(qualifier.to_owned(), *address))
        }
    }

    impl QualifierExistence for Tags {
        fn qualifier_exists(&self, qualifier: &str) -> bool {
            self.issued.contains(qualifier)
        }
    }

    fn addr(n: u8) -> Destination {
        Destination::PublicKeyHash(H160::repeat_byte(n))
    }

    #[rstest]
    #[case("", VerifierStringError::Empty)]
    #[case("  # ", VerifierStringError::Empty)]
    #[case("KYC & (", VerifierStringError::Syntax(SyntaxError::UnexpectedEnd))]
    #[case("(KYC", VerifierStringError::Syntax(SyntaxError::UnbalancedParenthesis(0)))]
    #[case("#KY", VerifierStringError::InvalidQualifierName("KY".to_owned()))]
    #[case("KYC & _BAD", VerifierStringError::InvalidQualifierName("_BAD".to_owned()))]
    fn rejected(#[case] verifier: &str, #[case] error: VerifierStringError) {
        assert_eq!(parse(verifier), Err(error));
    }

    #[test]
    fn length_limit_applies_to_stripped_form() {
        let long = vec!["ABCDEFGHIJ"; 8].join(" | #");
        assert_eq!(strip_verifier_string(&long).len(), 87);
        assert_eq!(parse(&long), Err(VerifierStringError::TooLong(87)));

        let fits = vec!["ABCDEFGHI"; 8].join(" | #");
        assert_eq!(strip_verifier_string(&fits).len(), 79);
        assert!(parse(&fits).is_ok());
    }

    #[test]
    fn reject_reasons() {
        assert_eq!(
            VerifierStringError::InvalidQualifierName("KY".to_owned()).to_string(),
            "bad-txns-null-verifier-invalid-asset-name-KY"
        );
        assert_eq!(
            VerifierStringError::TooLong(81).to_string(),
            "bad-txns-null-verifier-length-greater-than-max-length"
        );
        assert_eq!(
            VerifierStringError::FailedVerification.to_string(),
            "bad-txns-null-verifier-address-failed-verification"
        );
    }

    #[test]
    fn existence() {
        let tags = Tags::default().issue("#KYC");
        assert!(is_valid_verifier_string("#KYC", &tags).is_ok());
        assert_eq!(
            is_valid_verifier_string("KYC & !BANNED", &tags),
            Err(VerifierStringError::NonIssuedQualifier("#BANNED".to_owned()))
        );
    }

    #[test]
    fn address_verification() {
        let tags = Tags::default()
            .issue("#KYC")
            .issue("#BANNED")
            .tag("#KYC", addr(1))
            .tag("#KYC", addr(2))
            .tag("#BANNED", addr(2));
        let verifier = "#KYC & !#BANNED";

        assert_eq!(verify_address(verifier, &tags, &addr(1)), Ok(()));
        assert_eq!(
            verify_address(verifier, &tags, &addr(2)),
            Err(VerifierStringError::FailedVerification)
        );
        assert_eq!(
            verify_address(verifier, &tags, &addr(3)),
            Err(VerifierStringError::FailedVerification)
        );
        assert_eq!(verify_address(TRUE_VERIFIER, &Tags::default(), &addr(3)), Ok(()));
        assert_eq!(
            verify_address("false", &Tags::default(), &addr(3)),
            Err(VerifierStringError::FailedVerification)
        );
    }

    proptest! {
        #[test]
        fn parse_never_panics(input in "[A-Z#!&|() ]{0,90}") {
            let _ = parse(&input);
        }

        #[test]
        fn display_reparses(input in "[A-D!&|()]{1,40}") {
            if let Ok(expr) = parser::parse_stripped(&input) {
                prop_assert_eq!(parser::parse_stripped(&expr.to_string()), Ok(expr));
            }
        }
    }
}
