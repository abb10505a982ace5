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

use common::chain::assets::{name, AssetKind};

/// The channel the holders of `asset` listen to.
///
/// Holding `NAME` (or `$NAME`) maps to the owner channel `NAME!`. Owner tokens, message
/// channels and qualifiers are channels themselves.
pub fn channel_for_asset(asset: &str) -> Option<String> {
    match name::classify(asset) {
        AssetKind::Root | AssetKind::Sub | AssetKind::Restricted => name::owner_name(asset),
        AssetKind::Owner | AssetKind::Channel | AssetKind::Qualifier | AssetKind::SubQualifier => {
            Some(asset.to_owned())
        }
        AssetKind::Unique | AssetKind::Vote | AssetKind::Invalid => None,
    }
}

pub fn is_channel(channel: &str) -> bool {
    matches!(
        name::classify(channel),
        AssetKind::Owner | AssetKind::Channel | AssetKind::Qualifier | AssetKind::SubQualifier
    )
}

/// True if messages can be sent on `channel`.
pub fn accepts_messages(channel: &str) -> bool {
    matches!(name::classify(channel), AssetKind::Owner | AssetKind::Channel)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ROOT", Some("ROOT!"))]
    #[case("ROOT/SUB", Some("ROOT/SUB!"))]
    #[case("$ROOT", Some("ROOT!"))]
    #[case("ROOT!", Some("ROOT!"))]
    #[case("ROOT~NEWS", Some("ROOT~NEWS"))]
    #[case("#KYC", Some("#KYC"))]
    #[case("#KYC/#US", Some("#KYC/#US"))]
    #[case("ROOT#TAG", None)]
    #[case("root", None)]
    fn channels(#[case] asset: &str, #[case] expected: Option<&str>) {
        assert_eq!(channel_for_asset(asset).as_deref(), expected);
        if let Some(channel) = expected {
            assert!(is_channel(channel));
        }
    }

    #[test]
    fn qualifiers_do_not_accept_messages() {
        assert!(accepts_messages("ROOT!"));
        assert!(accepts_messages("ROOT~NEWS"));
        assert!(!accepts_messages("#KYC"));
        assert!(!accepts_messages("ROOT"));
    }
}
