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

pub use log;

static INITIALIZE_LOGGER_ONCE_FLAG: std::sync::Once = std::sync::Once::new();

/// Initialize the global logger from the `RUST_LOG` environment variable.
///
/// Safe to call any number of times; only the first call has an effect.
pub fn init_logging() {
    INITIALIZE_LOGGER_ONCE_FLAG.call_once(env_logger::init);
}

/// Same as [init_logging], but for tests: output goes through the test harness capture
/// and a second initialization attempt is silently ignored.
pub fn init_test_logging() {
    INITIALIZE_LOGGER_ONCE_FLAG.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_twice() {
        init_logging();
        init_logging();
        init_test_logging();
        log::info!("logger initialized");
    }
}
