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

use std::fmt::Display;

use logging::log;

/// Log the error of a `Result` in passing, leaving the value untouched.
pub trait TapLog
where
    Self: Sized,
{
    fn log_err(self) -> Self;
    fn log_err_pfx(self, prefix: &str) -> Self;
    fn log_warn(self) -> Self;
    fn log_warn_pfx(self, prefix: &str) -> Self;
    fn log_lvl(self, log_level: log::Level) -> Self;
    fn log_lvl_pfx(self, log_level: log::Level, prefix: &str) -> Self;
}

// The default target would be the module path; keep it short.
const LOG_TARGET: &str = "TapLog";

impl<T, E: Display> TapLog for Result<T, E> {
    #[inline(always)]
    fn log_err(self) -> Self {
        self.log_lvl(log::Level::Error)
    }

    #[inline(always)]
    fn log_err_pfx(self, prefix: &str) -> Self {
        self.log_lvl_pfx(log::Level::Error, prefix)
    }

    #[inline(always)]
    fn log_warn(self) -> Self {
        self.log_lvl(log::Level::Warn)
    }

    #[inline(always)]
    fn log_warn_pfx(self, prefix: &str) -> Self {
        self.log_lvl_pfx(log::Level::Warn, prefix)
    }

    fn log_lvl(self, log_level: log::Level) -> Self {
        if let Err(ref err) = self {
            log::log!(target: LOG_TARGET, log_level, "{err}");
        }
        self
    }

    fn log_lvl_pfx(self, log_level: log::Level, prefix: &str) -> Self {
        if let Err(ref err) = self {
            log::log!(target: LOG_TARGET, log_level, "{prefix}: {err}");
        }
        self
    }
}
