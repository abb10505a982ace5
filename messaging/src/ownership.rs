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

use std::collections::BTreeSet;

use common::chain::Destination;

/// The wallet addresses messages are collected for.
pub trait AddressOwnership {
    fn is_mine(&self, address: &Destination) -> bool;
}

impl AddressOwnership for BTreeSet<Destination> {
    fn is_mine(&self, address: &Destination) -> bool {
        self.contains(address)
    }
}

impl<T: AddressOwnership + ?Sized> AddressOwnership for &T {
    fn is_mine(&self, address: &Destination) -> bool {
        (**self).is_mine(address)
    }
}
