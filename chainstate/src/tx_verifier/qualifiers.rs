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

use assets_accounting::AssetsAccountingView;
use common::chain::Destination;
use utils::tap_log::TapLog;
use verifier_string::{QualifierExistence, QualifierTags};

/// Qualifier lookups of the verifier string engine served from an asset index view.
///
/// An address carries a root qualifier if it is tagged with the root itself or with any
/// of its sub-qualifiers. Failed lookups are logged and count as absent.
pub struct QualifierView<'a, V>(&'a V);

impl<'a, V: AssetsAccountingView> QualifierView<'a, V> {
    pub fn new(view: &'a V) -> Self {
        Self(view)
    }
}

impl<V: AssetsAccountingView> QualifierTags for QualifierView<'_, V> {
    fn has_tag(&self, qualifier: &str, address: &Destination) -> bool {
        let direct = self
            .0
            .get_qualifier_tag(qualifier, address)
            .log_err_pfx("Qualifier tag lookup")
            .ok()
            .flatten()
            .is_some_and(|record| record.assigned);
        direct
            || self
                .0
                .get_root_qualifier_tag(qualifier, address)
                .log_err_pfx("Root qualifier tag lookup")
                .ok()
                .flatten()
                .is_some_and(|record| record.is_assigned())
    }
}

impl<V: AssetsAccountingView> QualifierExistence for QualifierView<'_, V> {
    fn qualifier_exists(&self, qualifier: &str) -> bool {
        self.0
            .get_asset_data(qualifier)
            .log_err_pfx("Qualifier lookup")
            .ok()
            .flatten()
            .is_some()
    }
}
