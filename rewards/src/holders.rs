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

use std::collections::BTreeMap;

use chainstate::AssetIndex;
use common::{chain::Destination, primitives::Amount};
use utils::tap_log::TapLog;

/// The asset index state the rewards engine reads.
pub trait AssetHolders {
    /// Non-zero balances of `asset`, by holder.
    fn asset_holders(&self, asset: &str) -> BTreeMap<Destination, Amount>;

    /// Decimals of `asset`, `None` if it was never issued.
    fn asset_units(&self, asset: &str) -> Option<u8>;
}

impl AssetHolders for AssetIndex {
    fn asset_holders(&self, asset: &str) -> BTreeMap<Destination, Amount> {
        self.get_asset_holders(asset)
    }

    fn asset_units(&self, asset: &str) -> Option<u8> {
        self.get_asset_metadata(asset)
            .log_err_pfx("Asset metadata lookup")
            .ok()
            .flatten()
            .map(|data| data.units())
    }
}

impl<T: AssetHolders + ?Sized> AssetHolders for &T {
    fn asset_holders(&self, asset: &str) -> BTreeMap<Destination, Amount> {
        (**self).asset_holders(asset)
    }

    fn asset_units(&self, asset: &str) -> Option<u8> {
        (**self).asset_units(asset)
    }
}
