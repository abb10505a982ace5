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

use common::chain::{
    assets::{
        name::{self},
        AssetKind, AssetOperation, FLAG_CLEAR, FLAG_SET, MAX_QUALIFIER_AMOUNT, MAX_UNITS,
        MIN_QUALIFIER_AMOUNT, MSG_CHANNEL_ASSET_AMOUNT, MSG_CHANNEL_ASSET_UNITS,
        OWNER_ASSET_AMOUNT, QUALIFIER_ASSET_UNITS, UNIQUE_ASSET_AMOUNT,
    },
    AssetBurnKind, ChainConfig, Transaction,
};
use common::primitives::Amount;
use utils::ensure;

use super::{decode_asset_outputs, has_burn_output, issue_burn_kind, AssetOutput};
use crate::error::AssetTxError;

/// Checks of the asset outputs that need no chain state.
pub fn check_transaction_assets(
    chain_config: &ChainConfig,
    tx: &Transaction,
) -> Result<(), AssetTxError> {
    let outputs = decode_asset_outputs(tx)?;
    if outputs.is_empty() {
        return Ok(());
    }

    ensure!(!tx.is_coinbase(), AssetTxError::CoinbaseContainsAssets);

    for output in &outputs {
        ensure!(
            output.value == Amount::ZERO,
            AssetTxError::AssetOutputWithValue(output.index)
        );
        check_output_format(&output.operation)?;
    }

    let transfers: BTreeSet<&str> = outputs
        .iter()
        .filter_map(|output| match &output.operation {
            AssetOperation::Transfer { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();

    check_null_operations(chain_config, tx, &outputs, &transfers)?;
    check_issuance_format(chain_config, tx, &outputs, &transfers)
}

fn check_flag(flag: u8) -> Result<(), AssetTxError> {
    ensure!(
        flag == FLAG_SET || flag == FLAG_CLEAR,
        AssetTxError::NullDataFlag(flag)
    );
    Ok(())
}

fn check_output_format(operation: &AssetOperation) -> Result<(), AssetTxError> {
    match operation {
        AssetOperation::Transfer {
            name,
            amount,
            memo,
            expire_time,
        } => {
            let kind = name::validate(name)
                .map_err(|_| AssetTxError::InvalidAssetName(name.clone()))?;
            ensure!(*amount > Amount::ZERO, AssetTxError::NonPositiveAmount(name.clone()));
            ensure!(
                expire_time.is_none() || memo.is_some(),
                AssetTxError::ExpireTimeWithoutMessage(name.clone())
            );
            match kind {
                AssetKind::Owner => ensure!(
                    *amount == OWNER_ASSET_AMOUNT,
                    AssetTxError::OwnerAmountNotOne(name.clone())
                ),
                AssetKind::Unique => ensure!(
                    *amount == UNIQUE_ASSET_AMOUNT,
                    AssetTxError::UniqueAmountNotOne(name.clone())
                ),
                AssetKind::Qualifier | AssetKind::SubQualifier => ensure!(
                    (MIN_QUALIFIER_AMOUNT..=MAX_QUALIFIER_AMOUNT).contains(amount),
                    AssetTxError::QualifierAmountOutOfRange(name.clone())
                ),
                AssetKind::Root
                | AssetKind::Sub
                | AssetKind::Restricted
                | AssetKind::Channel
                | AssetKind::Vote
                | AssetKind::Invalid => {}
            }
        }
        AssetOperation::Owner { name } => {
            ensure!(
                name::is_owner_name(name),
                AssetTxError::InvalidAssetName(name.clone())
            );
        }
        AssetOperation::Message { channel, .. } => {
            ensure!(
                matches!(name::classify(channel), AssetKind::Owner | AssetKind::Channel),
                AssetTxError::MessageOnNonChannel(channel.clone())
            );
        }
        AssetOperation::TagAddresses {
            qualifier,
            addresses,
            flag,
        } => {
            check_flag(*flag)?;
            ensure!(
                name::classify(qualifier).is_qualifier(),
                AssetTxError::NullDataOnWrongKind(qualifier.clone())
            );
            ensure!(
                !addresses.is_empty(),
                AssetTxError::NullDataWithoutAddresses(qualifier.clone())
            );
        }
        AssetOperation::FreezeAddresses {
            asset,
            addresses,
            flag,
        } => {
            check_flag(*flag)?;
            ensure!(
                name::classify(asset) == AssetKind::Restricted,
                AssetTxError::NullDataOnWrongKind(asset.clone())
            );
            ensure!(
                !addresses.is_empty(),
                AssetTxError::NullDataWithoutAddresses(asset.clone())
            );
        }
        AssetOperation::FreezeAsset { asset, flag } => {
            check_flag(*flag)?;
            ensure!(
                name::classify(asset) == AssetKind::Restricted,
                AssetTxError::NullDataOnWrongKind(asset.clone())
            );
        }
        AssetOperation::Issue { .. }
        | AssetOperation::Reissue { .. }
        | AssetOperation::IssueUnique { .. }
        | AssetOperation::IssueQualifier { .. }
        | AssetOperation::IssueRestricted { .. }
        | AssetOperation::ReissueRestricted { .. } => {}
    }
    Ok(())
}

/// Tags and freezes: one change per (asset, address), one global change per asset, the
/// administering token moved in the same transaction, and the burn for added tags.
fn check_null_operations(
    chain_config: &ChainConfig,
    tx: &Transaction,
    outputs: &[AssetOutput],
    transfers: &BTreeSet<&str>,
) -> Result<(), AssetTxError> {
    let mut address_changes = BTreeSet::new();
    let mut global_changes = BTreeSet::new();
    let mut tags_added: u128 = 0;

    let owner_moved = |asset: &str| {
        name::owner_name(asset).is_some_and(|owner| transfers.contains(owner.as_str()))
    };

    for output in outputs {
        match &output.operation {
            AssetOperation::TagAddresses {
                qualifier,
                addresses,
                flag,
            } => {
                for address in addresses {
                    ensure!(
                        address_changes.insert((qualifier.as_str(), *address)),
                        AssetTxError::NullDataDuplicateAddressChange(qualifier.clone(), *address)
                    );
                }
                ensure!(
                    transfers.contains(qualifier.as_str()),
                    AssetTxError::QualifierNullWithoutTransfer(qualifier.clone())
                );
                if *flag == FLAG_SET {
                    tags_added += addresses.len() as u128;
                }
            }
            AssetOperation::FreezeAddresses {
                asset, addresses, ..
            } => {
                for address in addresses {
                    ensure!(
                        address_changes.insert((asset.as_str(), *address)),
                        AssetTxError::NullDataDuplicateAddressChange(asset.clone(), *address)
                    );
                }
                ensure!(
                    owner_moved(asset),
                    AssetTxError::RestrictedNullWithoutOwnerTransfer(asset.clone())
                );
            }
            AssetOperation::FreezeAsset { asset, .. } => {
                ensure!(
                    global_changes.insert(asset.as_str()),
                    AssetTxError::NullDataDuplicateGlobalChange(asset.clone())
                );
                ensure!(
                    owner_moved(asset),
                    AssetTxError::GlobalNullWithoutTransfer(asset.clone())
                );
            }
            _ => {}
        }
    }

    if tags_added > 0 {
        let required = (chain_config.burn_amount(AssetBurnKind::AddTag) * tags_added)
            .ok_or(AssetTxError::AddTagBurnNotFound)?;
        ensure!(
            has_burn_output(chain_config, tx, AssetBurnKind::AddTag, required),
            AssetTxError::AddTagBurnNotFound
        );
    }

    Ok(())
}

/// At most one issuance or reissuance per transaction, with its owner outputs, parent
/// authorization and burn.
fn check_issuance_format(
    chain_config: &ChainConfig,
    tx: &Transaction,
    outputs: &[AssetOutput],
    transfers: &BTreeSet<&str>,
) -> Result<(), AssetTxError> {
    let issuances: Vec<&AssetOperation> = outputs
        .iter()
        .map(|output| &output.operation)
        .filter(|op| op.is_issuance())
        .collect();
    let reissuances: Vec<&AssetOperation> = outputs
        .iter()
        .map(|output| &output.operation)
        .filter(|op| op.is_reissuance())
        .collect();
    let owners: Vec<&str> = outputs
        .iter()
        .filter_map(|output| match &output.operation {
            AssetOperation::Owner { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();

    match (issuances.as_slice(), reissuances.as_slice()) {
        ([], []) => match owners.first() {
            Some(owner) => Err(AssetTxError::OwnerOutputWithoutIssue((*owner).to_owned())),
            None => Ok(()),
        },
        ([issue], []) => check_issue_format(chain_config, tx, issue, &owners, transfers),
        ([], [reissue]) => {
            ensure!(owners.is_empty(), AssetTxError::ReissueFormattingCheck);
            check_reissue_format(chain_config, tx, reissue, transfers)
        }
        ([], _) => Err(AssetTxError::ReissueFormattingCheck),
        (_, _) => Err(AssetTxError::IssueFormattingCheck),
    }
}

fn check_issue_parameters(
    chain_config: &ChainConfig,
    name: &str,
    amount: Amount,
    units: u8,
) -> Result<(), AssetTxError> {
    ensure!(
        units <= MAX_UNITS,
        AssetTxError::UnitsOutOfRange(name.to_owned(), units)
    );
    ensure!(
        amount > Amount::ZERO && amount <= chain_config.max_money(),
        AssetTxError::IssueAmountOutOfRange(name.to_owned())
    );
    ensure!(
        amount.fits_units(units),
        AssetTxError::IssueAmountNotMatchUnits(name.to_owned())
    );
    Ok(())
}

fn ensure_issue_burn(
    chain_config: &ChainConfig,
    tx: &Transaction,
    kind: AssetKind,
) -> Result<(), AssetTxError> {
    let burn_kind = issue_burn_kind(kind).ok_or(AssetTxError::IssueFormattingCheck)?;
    ensure!(
        has_burn_output(chain_config, tx, burn_kind, chain_config.burn_amount(burn_kind)),
        AssetTxError::IssueBurnNotFound(burn_kind)
    );
    Ok(())
}

fn check_issue_format(
    chain_config: &ChainConfig,
    tx: &Transaction,
    operation: &AssetOperation,
    owners: &[&str],
    transfers: &BTreeSet<&str>,
) -> Result<(), AssetTxError> {
    let name = operation.asset_name();
    let kind = name::validate(name).map_err(|_| AssetTxError::InvalidAssetName(name.to_owned()))?;

    match operation {
        AssetOperation::Issue {
            amount,
            units,
            reissuable,
            ..
        } => {
            check_issue_parameters(chain_config, name, *amount, *units)?;
            match kind {
                AssetKind::Root | AssetKind::Sub => {
                    let expected =
                        name::owner_name(name).ok_or(AssetTxError::IssueFormattingCheck)?;
                    match owners {
                        [owner] => ensure!(
                            *owner == expected,
                            AssetTxError::IssueOwnerNameMismatch {
                                expected,
                                found: (*owner).to_owned(),
                            }
                        ),
                        _ => return Err(AssetTxError::IssueFormattingCheck),
                    }
                }
                AssetKind::Channel => {
                    ensure!(owners.is_empty(), AssetTxError::IssueFormattingCheck);
                    ensure!(
                        *amount == MSG_CHANNEL_ASSET_AMOUNT
                            && *units == MSG_CHANNEL_ASSET_UNITS
                            && !reissuable,
                        AssetTxError::FixedIssueParameters(name.to_owned())
                    );
                }
                other => return Err(AssetTxError::IssueNameKindMismatch(name.to_owned(), other)),
            }

            if matches!(kind, AssetKind::Sub | AssetKind::Channel) {
                let authority =
                    name::issuance_authority(name).ok_or(AssetTxError::IssueFormattingCheck)?;
                ensure!(
                    transfers.contains(authority.as_str()),
                    AssetTxError::MissingOwnerToken(authority)
                );
            }

            ensure_issue_burn(chain_config, tx, kind)
        }
        AssetOperation::IssueUnique {
            root,
            tags,
            ipfs_hashes,
        } => {
            ensure!(
                matches!(kind, AssetKind::Root | AssetKind::Sub),
                AssetTxError::IssueNameKindMismatch(root.clone(), kind)
            );
            ensure!(owners.is_empty(), AssetTxError::IssueFormattingCheck);
            ensure!(
                !tags.is_empty() && tags.len() == ipfs_hashes.len(),
                AssetTxError::UniqueBadOutpointCount
            );

            let mut seen = BTreeSet::new();
            for tag in tags {
                let unique = name::unique_name(root, tag);
                ensure!(
                    name::classify(&unique) == AssetKind::Unique,
                    AssetTxError::InvalidAssetName(unique.clone())
                );
                ensure!(
                    seen.insert(unique.clone()),
                    AssetTxError::UniqueDuplicateName(unique)
                );
            }

            let owner = name::owner_name(root).ok_or(AssetTxError::IssueFormattingCheck)?;
            ensure!(
                transfers.contains(owner.as_str()),
                AssetTxError::MissingOwnerToken(owner)
            );

            let burn = (chain_config.burn_amount(AssetBurnKind::Unique) * tags.len() as u128)
                .ok_or(AssetTxError::UniqueBurnNotFound)?;
            ensure!(
                has_burn_output(chain_config, tx, AssetBurnKind::Unique, burn),
                AssetTxError::UniqueBurnNotFound
            );
            Ok(())
        }
        AssetOperation::IssueQualifier { amount, .. } => {
            ensure!(
                kind.is_qualifier(),
                AssetTxError::IssueNameKindMismatch(name.to_owned(), kind)
            );
            ensure!(owners.is_empty(), AssetTxError::IssueFormattingCheck);
            ensure!(
                (MIN_QUALIFIER_AMOUNT..=MAX_QUALIFIER_AMOUNT).contains(amount)
                    && amount.fits_units(QUALIFIER_ASSET_UNITS),
                AssetTxError::QualifierAmountOutOfRange(name.to_owned())
            );

            if kind == AssetKind::SubQualifier {
                let parent =
                    name::issuance_authority(name).ok_or(AssetTxError::IssueFormattingCheck)?;
                ensure!(
                    transfers.contains(parent.as_str()),
                    AssetTxError::SubQualifierParentNotFound(parent)
                );
            }

            ensure_issue_burn(chain_config, tx, kind)
        }
        AssetOperation::IssueRestricted {
            amount,
            units,
            verifier,
            ..
        } => {
            ensure!(
                kind == AssetKind::Restricted,
                AssetTxError::IssueNameKindMismatch(name.to_owned(), kind)
            );
            ensure!(owners.is_empty(), AssetTxError::IssueFormattingCheck);
            check_issue_parameters(chain_config, name, *amount, *units)?;
            verifier_string::parse(verifier)?;

            let owner = name::owner_name(name).ok_or(AssetTxError::IssueFormattingCheck)?;
            ensure!(
                transfers.contains(owner.as_str()),
                AssetTxError::RestrictedRootOwnerNotFound(owner)
            );

            ensure_issue_burn(chain_config, tx, kind)
        }
        _ => Err(AssetTxError::IssueFormattingCheck),
    }
}

fn check_reissue_format(
    chain_config: &ChainConfig,
    tx: &Transaction,
    operation: &AssetOperation,
    transfers: &BTreeSet<&str>,
) -> Result<(), AssetTxError> {
    let name = operation.asset_name();
    let kind = name::validate(name).map_err(|_| AssetTxError::InvalidAssetName(name.to_owned()))?;

    let (amount, new_units) = match operation {
        AssetOperation::Reissue {
            amount, new_units, ..
        } => {
            ensure!(
                matches!(kind, AssetKind::Root | AssetKind::Sub),
                AssetTxError::IssueNameKindMismatch(name.to_owned(), kind)
            );
            (*amount, *new_units)
        }
        AssetOperation::ReissueRestricted {
            amount,
            new_units,
            new_verifier,
            ..
        } => {
            ensure!(
                kind == AssetKind::Restricted,
                AssetTxError::IssueNameKindMismatch(name.to_owned(), kind)
            );
            if let Some(verifier) = new_verifier {
                verifier_string::parse(verifier)?;
            }
            (*amount, *new_units)
        }
        _ => return Err(AssetTxError::ReissueFormattingCheck),
    };

    ensure!(
        amount <= chain_config.max_money(),
        AssetTxError::ReissueAmountOutOfRange(name.to_owned())
    );
    if let Some(units) = new_units {
        ensure!(
            units <= MAX_UNITS,
            AssetTxError::UnitsOutOfRange(name.to_owned(), units)
        );
    }

    let owner = name::owner_name(name).ok_or(AssetTxError::ReissueFormattingCheck)?;
    ensure!(
        transfers.contains(owner.as_str()),
        AssetTxError::ReissueOwnerNotFound(owner)
    );

    ensure!(
        has_burn_output(
            chain_config,
            tx,
            AssetBurnKind::Reissue,
            chain_config.burn_amount(AssetBurnKind::Reissue)
        ),
        AssetTxError::ReissueBurnNotFound
    );
    Ok(())
}
