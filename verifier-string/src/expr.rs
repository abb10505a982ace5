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

use std::{collections::BTreeSet, fmt};

use common::chain::{assets::name::QUALIFIER_PREFIX, Destination};

use crate::QualifierTags;

/// A parsed verifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Bool(bool),
    /// A qualifier reference, stored without the `#` prefix.
    Qualifier(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluates the expression for `address`: a qualifier holds when the address is tagged
    /// with it.
    pub fn evaluate(&self, tags: &impl QualifierTags, address: &Destination) -> bool {
        match self {
            Expr::Bool(b) => *b,
            Expr::Qualifier(name) => tags.has_tag(&qualifier_asset_name(name), address),
            Expr::Not(e) => !e.evaluate(tags, address),
            Expr::And(l, r) => l.evaluate(tags, address) && r.evaluate(tags, address),
            Expr::Or(l, r) => l.evaluate(tags, address) || r.evaluate(tags, address),
        }
    }

    /// Qualifier asset names referenced by the expression, `#` included.
    pub fn qualifiers(&self) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        self.collect_qualifiers(&mut result);
        result
    }

    fn collect_qualifiers(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Bool(_) => {}
            Expr::Qualifier(name) => {
                out.insert(qualifier_asset_name(name));
            }
            Expr::Not(e) => e.collect_qualifiers(out),
            Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_qualifiers(out);
                r.collect_qualifiers(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(_, _) => 0,
            Expr::And(_, _) => 1,
            Expr::Not(_) => 2,
            Expr::Bool(_) | Expr::Qualifier(_) => 3,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

pub fn qualifier_asset_name(name: &str) -> String {
    format!("{QUALIFIER_PREFIX}{name}")
}

/// The canonical stripped form, with the parentheses precedence requires.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Qualifier(name) => f.write_str(name),
            Expr::Not(e) => {
                f.write_str("!")?;
                e.fmt_operand(f, 2)
            }
            Expr::And(l, r) => {
                l.fmt_operand(f, 1)?;
                f.write_str("&")?;
                r.fmt_operand(f, 2)
            }
            Expr::Or(l, r) => {
                l.fmt_operand(f, 0)?;
                f.write_str("|")?;
                r.fmt_operand(f, 1)
            }
        }
    }
}
