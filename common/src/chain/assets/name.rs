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

//! Asset name grammar.
//!
//! Names are classified by their sigils: `/` sub asset, `#` unique asset (or qualifier
//! when leading), `$` restricted asset, `!` owner token, `~` message channel, `^` vote.
//! The grammar never consults chain state; whether a parent exists is a question for
//! the asset index.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SUB_NAME_DELIMITER: char = '/';
pub const UNIQUE_TAG_DELIMITER: char = '#';
pub const CHANNEL_DELIMITER: char = '~';
pub const VOTE_DELIMITER: char = '^';
pub const OWNER_TAG: char = '!';
pub const QUALIFIER_PREFIX: char = '#';
pub const RESTRICTED_PREFIX: char = '$';

/// Names longer than this are rejected before any parsing.
pub const MAX_RAW_NAME_LENGTH: usize = 40;
pub const MAX_NAME_LENGTH: usize = 31;
/// Root and sub asset names leave room for the owner tag.
pub const MAX_ROOT_OR_SUB_NAME_LENGTH: usize = MAX_NAME_LENGTH - 1;
pub const MAX_CHANNEL_NAME_LENGTH: usize = 12;

const RESERVED_NAMES: &[&str] = &["YNA", "YONA", "YONACOIN"];

fn regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => panic!("Invalid built-in asset name pattern {pattern}: {e}"),
    }
}

static ROOT_NAME_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^[A-Z0-9._]{3,}$"));
static SUB_NAME_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^[A-Z0-9._]+$"));
static UNIQUE_TAG_CHARACTERS: Lazy<Regex> =
    Lazy::new(|| regex(r"^[-A-Za-z0-9@$%&*()\[\]{}_.?:]+$"));
static CHANNEL_TAG_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^[A-Za-z0-9_]+$"));
static VOTE_TAG_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^[A-Z0-9._]+$"));
static QUALIFIER_NAME_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^#[A-Z0-9._]{3,}$"));
static SUB_QUALIFIER_NAME_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^#[A-Z0-9._]+$"));
static RESTRICTED_NAME_CHARACTERS: Lazy<Regex> = Lazy::new(|| regex(r"^\$[A-Z0-9._]{3,}$"));

static DOUBLE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| regex(r"[._]{2,}"));

static UNIQUE_INDICATOR: Lazy<Regex> = Lazy::new(|| regex(r"^[^^~#!]+#[^~#!/]+$"));
static CHANNEL_INDICATOR: Lazy<Regex> = Lazy::new(|| regex(r"^[^^~#!]+~[^~#!/]+$"));
static OWNER_INDICATOR: Lazy<Regex> = Lazy::new(|| regex(r"^[^^~#!]+!$"));
static VOTE_INDICATOR: Lazy<Regex> = Lazy::new(|| regex(r"^[^^~#!]+\^[^~#!/]+$"));

/// Kinds of asset names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetKind {
    Root,
    Sub,
    Unique,
    Qualifier,
    SubQualifier,
    Restricted,
    Owner,
    Channel,
    Vote,
    Invalid,
}

impl AssetKind {
    /// Kinds whose issuance also creates an owner token.
    pub fn has_owner_token(&self) -> bool {
        matches!(self, AssetKind::Root | AssetKind::Sub)
    }

    pub fn is_qualifier(&self) -> bool {
        matches!(self, AssetKind::Qualifier | AssetKind::SubQualifier)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetNameError {
    #[error("Name is greater than max length of {0}")]
    TooLong(usize),
    #[error("Name contains invalid characters (Valid characters are: A-Z 0-9 _ .) (special characters can't be the first or last characters)")]
    InvalidCharacters,
    #[error("Unique name contains invalid characters (Valid characters are: A-Z a-z 0-9 @ $ % & * ( ) [ ] {{ }} _ . ? : -)")]
    InvalidUniqueTag,
    #[error("Message Channel name contains invalid characters (Valid characters are: A-Z 0-9 _ .) (special characters can't be the first or last characters)")]
    InvalidChannelName,
    #[error("Channel name is greater than max length of {MAX_CHANNEL_NAME_LENGTH}")]
    ChannelNameTooLong,
    #[error("Vote name contains invalid characters (Valid characters are: A-Z 0-9 _ .) (special characters can't be the first or last characters)")]
    InvalidVoteName,
    #[error("Qualifier name contains invalid characters (Valid characters are: A-Z 0-9 _ .) (# must be the first character, _ . special characters can't be the first or last characters)")]
    InvalidQualifierName,
    #[error("Restricted name contains invalid characters (Valid characters are: A-Z 0-9 _ .) ($ must be the first character, _ . special characters can't be the first or last characters)")]
    InvalidRestrictedName,
    #[error("Name can't be a reserved name")]
    ReservedName,
}

fn has_bad_punctuation(part: &str) -> bool {
    DOUBLE_PUNCTUATION.is_match(part)
        || part.starts_with(['.', '_'])
        || part.ends_with(['.', '_'])
}

fn is_reserved(base: &str) -> bool {
    RESERVED_NAMES.contains(&base)
}

fn check_root_part(root: &str) -> Result<(), AssetNameError> {
    if !ROOT_NAME_CHARACTERS.is_match(root) || has_bad_punctuation(root) {
        return Err(AssetNameError::InvalidCharacters);
    }
    if is_reserved(root) {
        return Err(AssetNameError::ReservedName);
    }
    Ok(())
}

fn check_sub_part(sub: &str) -> Result<(), AssetNameError> {
    if !SUB_NAME_CHARACTERS.is_match(sub) || has_bad_punctuation(sub) {
        return Err(AssetNameError::InvalidCharacters);
    }
    Ok(())
}

/// Checks `ROOT` or `ROOT/SUB/...`, the part of a name that precedes any tag.
fn check_name_before_tag(name: &str) -> Result<AssetKind, AssetNameError> {
    let mut parts = name.split(SUB_NAME_DELIMITER);
    let root = parts.next().unwrap_or_default();
    check_root_part(root)?;
    let mut kind = AssetKind::Root;
    for sub in parts {
        check_sub_part(sub)?;
        kind = AssetKind::Sub;
    }
    Ok(kind)
}

fn check_qualifier_part(qualifier: &str, pattern: &Regex) -> Result<(), AssetNameError> {
    let base = qualifier.strip_prefix(QUALIFIER_PREFIX).unwrap_or(qualifier);
    if !pattern.is_match(qualifier) || has_bad_punctuation(base) {
        return Err(AssetNameError::InvalidQualifierName);
    }
    if is_reserved(base) {
        return Err(AssetNameError::ReservedName);
    }
    Ok(())
}

fn ensure_max_len(name: &str, max: usize) -> Result<(), AssetNameError> {
    if name.len() > max {
        return Err(AssetNameError::TooLong(max));
    }
    Ok(())
}

/// Validates an asset name and returns its kind.
pub fn validate(name: &str) -> Result<AssetKind, AssetNameError> {
    ensure_max_len(name, MAX_RAW_NAME_LENGTH)?;

    if UNIQUE_INDICATOR.is_match(name) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        let (before, tag) = name.rsplit_once(UNIQUE_TAG_DELIMITER).unwrap_or((name, ""));
        check_name_before_tag(before)?;
        if !UNIQUE_TAG_CHARACTERS.is_match(tag) {
            return Err(AssetNameError::InvalidUniqueTag);
        }
        return Ok(AssetKind::Unique);
    }

    if CHANNEL_INDICATOR.is_match(name) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        let (before, channel) = name.rsplit_once(CHANNEL_DELIMITER).unwrap_or((name, ""));
        check_name_before_tag(before)?;
        if channel.len() > MAX_CHANNEL_NAME_LENGTH {
            return Err(AssetNameError::ChannelNameTooLong);
        }
        if !CHANNEL_TAG_CHARACTERS.is_match(channel) || has_bad_punctuation(channel) {
            return Err(AssetNameError::InvalidChannelName);
        }
        return Ok(AssetKind::Channel);
    }

    if OWNER_INDICATOR.is_match(name) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        check_name_before_tag(&name[..name.len() - 1])?;
        return Ok(AssetKind::Owner);
    }

    if VOTE_INDICATOR.is_match(name) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        let (before, vote) = name.rsplit_once(VOTE_DELIMITER).unwrap_or((name, ""));
        check_name_before_tag(before)?;
        if !VOTE_TAG_CHARACTERS.is_match(vote) || has_bad_punctuation(vote) {
            return Err(AssetNameError::InvalidVoteName);
        }
        return Ok(AssetKind::Vote);
    }

    if name.starts_with(QUALIFIER_PREFIX) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        return match name.split_once(SUB_NAME_DELIMITER) {
            Some((qualifier, sub)) => {
                check_qualifier_part(qualifier, &QUALIFIER_NAME_CHARACTERS)?;
                check_qualifier_part(sub, &SUB_QUALIFIER_NAME_CHARACTERS)?;
                Ok(AssetKind::SubQualifier)
            }
            None => {
                check_qualifier_part(name, &QUALIFIER_NAME_CHARACTERS)?;
                Ok(AssetKind::Qualifier)
            }
        };
    }

    if let Some(base) = name.strip_prefix(RESTRICTED_PREFIX) {
        ensure_max_len(name, MAX_NAME_LENGTH)?;
        if !RESTRICTED_NAME_CHARACTERS.is_match(name) || has_bad_punctuation(base) {
            return Err(AssetNameError::InvalidRestrictedName);
        }
        if is_reserved(base) {
            return Err(AssetNameError::ReservedName);
        }
        return Ok(AssetKind::Restricted);
    }

    ensure_max_len(name, MAX_ROOT_OR_SUB_NAME_LENGTH)?;
    check_name_before_tag(name)
}

pub fn classify(name: &str) -> AssetKind {
    validate(name).unwrap_or(AssetKind::Invalid)
}

pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
}

pub fn is_owner_name(name: &str) -> bool {
    classify(name) == AssetKind::Owner
}

/// Removes the leading `$`/`#` and the trailing `!` sigils.
pub fn strip_sigils(name: &str) -> &str {
    let name = name.strip_prefix([RESTRICTED_PREFIX, QUALIFIER_PREFIX]).unwrap_or(name);
    name.strip_suffix(OWNER_TAG).unwrap_or(name)
}

/// The owner token that administers `name`.
///
/// Root and sub assets have their own owner token; a restricted asset `$X` is
/// administered by `X!`. Other kinds have no owner token.
pub fn owner_name(name: &str) -> Option<String> {
    match classify(name) {
        AssetKind::Root | AssetKind::Sub | AssetKind::Restricted | AssetKind::Owner => {
            Some(format!("{}{OWNER_TAG}", strip_sigils(name)))
        }
        AssetKind::Unique
        | AssetKind::Qualifier
        | AssetKind::SubQualifier
        | AssetKind::Channel
        | AssetKind::Vote
        | AssetKind::Invalid => None,
    }
}

/// The name one level up: `A/B` for `A/B/C`, `A` for `A#T`, `A~C`, `A^V` and `A!`,
/// `#A` for `#A/#B`. Root, qualifier and restricted names have no parent.
pub fn parent_name(name: &str) -> Option<String> {
    let parent = match classify(name) {
        AssetKind::Sub | AssetKind::SubQualifier => name.rsplit_once(SUB_NAME_DELIMITER)?.0,
        AssetKind::Unique => name.rsplit_once(UNIQUE_TAG_DELIMITER)?.0,
        AssetKind::Channel => name.rsplit_once(CHANNEL_DELIMITER)?.0,
        AssetKind::Vote => name.rsplit_once(VOTE_DELIMITER)?.0,
        AssetKind::Owner => &name[..name.len() - 1],
        AssetKind::Root | AssetKind::Qualifier | AssetKind::Restricted | AssetKind::Invalid => {
            return None
        }
    };
    Some(parent.to_owned())
}

/// The owner token required to create `name` under an existing parent.
///
/// Sub, unique, channel and vote names need the parent's owner token; restricted
/// `$X` needs `X!`. Sub qualifiers need the parent qualifier itself, which is returned
/// as is.
pub fn issuance_authority(name: &str) -> Option<String> {
    match classify(name) {
        AssetKind::Sub | AssetKind::Unique | AssetKind::Channel | AssetKind::Vote => {
            parent_name(name).and_then(|parent| owner_name(&parent))
        }
        AssetKind::Restricted => owner_name(name),
        AssetKind::SubQualifier => parent_name(name),
        AssetKind::Root
        | AssetKind::Qualifier
        | AssetKind::Owner
        | AssetKind::Invalid => None,
    }
}

/// The root a name hangs off: `FOO` for `FOO/BAR#T`, `$FOO` and `FOO!`; `#KYC` for `#KYC/#US`.
pub fn root_name(name: &str) -> Option<String> {
    match classify(name) {
        AssetKind::Invalid => None,
        AssetKind::Qualifier | AssetKind::SubQualifier => {
            Some(name.split(SUB_NAME_DELIMITER).next().unwrap_or(name).to_owned())
        }
        _ => {
            let name = strip_sigils(name);
            let end = name
                .find([SUB_NAME_DELIMITER, UNIQUE_TAG_DELIMITER, CHANNEL_DELIMITER, VOTE_DELIMITER])
                .unwrap_or(name.len());
            Some(name[..end].to_owned())
        }
    }
}

pub fn unique_name(parent: &str, tag: &str) -> String {
    format!("{parent}{UNIQUE_TAG_DELIMITER}{tag}")
}

pub fn channel_name(parent: &str, channel: &str) -> String {
    format!("{parent}{CHANNEL_DELIMITER}{channel}")
}
