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

#![allow(clippy::unwrap_used)]

mod block_builder;
mod framework;
mod framework_builder;
mod helpers;
mod transaction_builder;
mod utils;

pub use {
    block_builder::BlockBuilder,
    framework::TestFramework,
    framework_builder::TestFrameworkBuilder,
    helpers::transfer_output,
    transaction_builder::TransactionBuilder,
    utils::{input_unlock_script, test_address, TestScriptVerifier},
};
