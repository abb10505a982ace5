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

use std::collections::{BTreeMap, BTreeSet};

use assets_accounting::AssetsAccountingView;
use common::{
    chain::{
        assets::{name, AssetKind, AssetOperation, FLAG_SET},
        ChainConfig, Destination, SoftFork, Transaction,
    },
    primitives::{Amount, BlockHeight},
};
use utils::ensure;
use verifier_string::{is_valid_verifier_string, verify_address};

use super::{
    decode_asset_outputs, issued_names, resolve_spent_assets, AssetOutput, QualifierView,
    SpentAsset,
};
use crate::{error::AssetTxError, mempool::MempoolAssetTracker, utxo::UtxoSource};

/// Checks of the asset outputs against the asset index and the spent outputs.
///
/// Expects [`super::check_transaction_assets`] to have passed.
pub fn check_tx_inputs_assets<V, U>(
    chain_config: &ChainConfig,
    view: &V,
    utxos: &U,
    tx: &Transaction,
    spend_height: BlockHeight,
    mempool: Option<&MempoolAssetTracker>,
) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
    U: UtxoSource,
{
    let outputs = decode_asset_outputs(tx)?;
    let spent = resolve_spent_assets(tx, utxos)?;
    if outputs.is_empty() && spent.is_empty() {
        return Ok(());
    }

    check_activation(chain_config, &outputs, spend_height)?;

    if let Some(mempool) = mempool {
        mempool.check_transaction(tx)?;
    }

    check_frozen_senders(view, &spent)?;

    for output in &outputs {
        check_operation(chain_config, view, output)?;
    }

    check_restricted_transfers(chain_config, view, tx, &outputs, &spent)?;
    check_conservation(&outputs, &spent)
}

fn check_activation(
    chain_config: &ChainConfig,
    outputs: &[AssetOutput],
    height: BlockHeight,
) -> Result<(), AssetTxError> {
    if outputs.is_empty() {
        return Ok(());
    }

    ensure!(
        chain_config.is_feature_active(SoftFork::Tokens, height),
        AssetTxError::AssetsNotActive
    );

    let messaging = chain_config.is_feature_active(SoftFork::MessagingRestricted, height);
    let p2sh = chain_config.is_feature_active(SoftFork::P2shTokens, height);

    for output in outputs {
        if matches!(output.holder, Some(Destination::ScriptHash(_))) {
            ensure!(p2sh, AssetTxError::P2shAssetsNotActive);
        }

        if messaging {
            continue;
        }

        let operation = &output.operation;
        ensure!(!operation.is_null(), AssetTxError::NullDataBeforeActivation);
        ensure!(
            !operation.ipfs_hashes().any(|hash| hash.is_txid()),
            AssetTxError::TxidIpfsBeforeActivation
        );

        let kind = name::classify(operation.asset_name());
        match operation {
            AssetOperation::IssueQualifier { .. } => {
                return Err(AssetTxError::QualifierBeforeActivation)
            }
            AssetOperation::IssueRestricted { .. } | AssetOperation::ReissueRestricted { .. } => {
                return Err(AssetTxError::RestrictedBeforeActivation)
            }
            AssetOperation::Issue { .. } if kind == AssetKind::Channel => {
                return Err(AssetTxError::MsgChannelBeforeActivation)
            }
            AssetOperation::Message { .. } => {
                return Err(AssetTxError::TransferMsgChannelBeforeActivation)
            }
            AssetOperation::Transfer { .. } => match kind {
                AssetKind::Qualifier | AssetKind::SubQualifier => {
                    return Err(AssetTxError::TransferQualifierBeforeActivation)
                }
                AssetKind::Restricted => {
                    return Err(AssetTxError::TransferRestrictedBeforeActivation)
                }
                AssetKind::Channel => {
                    return Err(AssetTxError::TransferMsgChannelBeforeActivation)
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}

fn is_address_frozen<V>(view: &V, asset: &str, holder: &Destination) -> Result<bool, AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    Ok(view.get_address_freeze(asset, holder)?.is_some_and(|record| record.frozen))
}

fn is_globally_frozen<V>(view: &V, asset: &str) -> Result<bool, AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    Ok(view.get_global_freeze(asset)?.is_some_and(|record| record.frozen))
}

fn check_frozen_senders<V>(view: &V, spent: &[SpentAsset]) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    for input in spent {
        if name::classify(&input.name) == AssetKind::Restricted {
            ensure!(
                !is_address_frozen(view, &input.name, &input.holder)?,
                AssetTxError::RestrictedFromFrozenAddress(input.name.clone(), input.holder)
            );
        }
    }
    Ok(())
}

fn check_operation<V>(
    chain_config: &ChainConfig,
    view: &V,
    output: &AssetOutput,
) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    match &output.operation {
        AssetOperation::Transfer { name, amount, .. } => {
            let data = view
                .get_asset_data(name)?
                .ok_or_else(|| AssetTxError::TransferAssetNotExist(name.clone()))?;
            ensure!(
                amount.fits_units(data.units()),
                AssetTxError::TransferAmountNotMatchUnits(name.clone())
            );
            if name::classify(name) == AssetKind::Restricted {
                ensure!(
                    !is_globally_frozen(view, name)?,
                    AssetTxError::RestrictedGloballyFrozen(name.clone())
                );
            }
        }
        AssetOperation::Message { channel, .. } => {
            ensure!(
                view.get_asset_data(channel)?.is_some(),
                AssetTxError::MessageChannelNotExist(channel.clone())
            );
        }
        AssetOperation::TagAddresses {
            qualifier,
            addresses,
            flag,
        } => {
            ensure!(
                view.get_asset_data(qualifier)?.is_some(),
                AssetTxError::NullDataAssetNotExist(qualifier.clone())
            );
            for address in addresses {
                let assigned = view
                    .get_qualifier_tag(qualifier, address)?
                    .is_some_and(|record| record.assigned);
                if *flag == FLAG_SET {
                    ensure!(
                        !assigned,
                        AssetTxError::AddQualifierWhenAssigned(qualifier.clone(), *address)
                    );
                } else {
                    ensure!(
                        assigned,
                        AssetTxError::RemoveQualifierWhenNotAssigned(qualifier.clone(), *address)
                    );
                }
            }
        }
        AssetOperation::FreezeAddresses {
            asset,
            addresses,
            flag,
        } => {
            ensure!(
                view.get_asset_data(asset)?.is_some(),
                AssetTxError::NullDataAssetNotExist(asset.clone())
            );
            for address in addresses {
                let frozen = is_address_frozen(view, asset, address)?;
                if *flag == FLAG_SET {
                    ensure!(
                        !frozen,
                        AssetTxError::FreezeAddressWhenFrozen(asset.clone(), *address)
                    );
                } else {
                    ensure!(
                        frozen,
                        AssetTxError::UnfreezeAddressWhenNotFrozen(asset.clone(), *address)
                    );
                }
            }
        }
        AssetOperation::FreezeAsset { asset, flag } => {
            ensure!(
                view.get_asset_data(asset)?.is_some(),
                AssetTxError::NullDataAssetNotExist(asset.clone())
            );
            let frozen = is_globally_frozen(view, asset)?;
            if *flag == FLAG_SET {
                ensure!(!frozen, AssetTxError::GlobalFreezeWhenFrozen(asset.clone()));
            } else {
                ensure!(frozen, AssetTxError::GlobalUnfreezeWhenNotFrozen(asset.clone()));
            }
        }
        AssetOperation::Issue { .. }
        | AssetOperation::Owner { .. }
        | AssetOperation::IssueUnique { .. }
        | AssetOperation::IssueQualifier { .. } => {
            check_names_unused(view, &output.operation)?;
        }
        AssetOperation::IssueRestricted { verifier, .. } => {
            check_names_unused(view, &output.operation)?;
            let qualifiers = QualifierView::new(view);
            is_valid_verifier_string(verifier, &qualifiers)?;
            if let Some(holder) = &output.holder {
                verify_address(verifier, &qualifiers, holder)?;
            }
        }
        AssetOperation::Reissue {
            name,
            amount,
            new_units,
            ..
        } => {
            check_reissue(chain_config, view, name, *amount, *new_units)?;
        }
        AssetOperation::ReissueRestricted {
            name,
            amount,
            new_units,
            new_verifier,
            ..
        } => {
            check_reissue(chain_config, view, name, *amount, *new_units)?;

            let qualifiers = QualifierView::new(view);
            let verifier = match new_verifier {
                Some(verifier) => {
                    is_valid_verifier_string(verifier, &qualifiers)?;
                    verifier_string::strip_verifier_string(verifier)
                }
                None => view
                    .get_verifier(name)?
                    .ok_or_else(|| AssetTxError::VerifierNotFound(name.clone()))?,
            };
            if *amount > Amount::ZERO {
                if let Some(holder) = &output.holder {
                    verify_address(&verifier, &qualifiers, holder)?;
                }
            }
        }
    }
    Ok(())
}

fn check_names_unused<V>(view: &V, operation: &AssetOperation) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    for name in issued_names(operation) {
        ensure!(
            view.get_asset_data(&name)?.is_none(),
            AssetTxError::AssetAlreadyExists(name)
        );
    }
    Ok(())
}

fn check_reissue<V>(
    chain_config: &ChainConfig,
    view: &V,
    name: &str,
    amount: Amount,
    new_units: Option<u8>,
) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    let data = view
        .get_asset_data(name)?
        .ok_or_else(|| AssetTxError::ReissueAssetNotExist(name.to_owned()))?;

    ensure!(
        data.is_reissuable(),
        AssetTxError::ReissueNotReissuable(name.to_owned())
    );
    if let Some(units) = new_units {
        ensure!(
            units >= data.units(),
            AssetTxError::ReissueUnitsDecrease(name.to_owned())
        );
    }
    ensure!(
        amount.fits_units(data.units()),
        AssetTxError::ReissueAmountNotMatchUnits(name.to_owned())
    );

    let supply = (data.amount() + amount)
        .ok_or_else(|| AssetTxError::ReissueAmountOutOfRange(name.to_owned()))?;
    ensure!(
        supply <= chain_config.max_money(),
        AssetTxError::ReissueAmountOutOfRange(name.to_owned())
    );
    Ok(())
}

/// Every address a restricted transfer touches has to pass the asset's verifier: the
/// senders, the recipients and the destinations of plain coin outputs, burns excluded.
fn check_restricted_transfers<V>(
    chain_config: &ChainConfig,
    view: &V,
    tx: &Transaction,
    outputs: &[AssetOutput],
    spent: &[SpentAsset],
) -> Result<(), AssetTxError>
where
    V: AssetsAccountingView<Error = assets_accounting::Error>,
{
    let restricted: BTreeSet<&str> = outputs
        .iter()
        .filter_map(|output| match &output.operation {
            AssetOperation::Transfer { name: asset, .. }
                if name::classify(asset) == AssetKind::Restricted =>
            {
                Some(asset.as_str())
            }
            _ => None,
        })
        .collect();
    if restricted.is_empty() {
        return Ok(());
    }

    let asset_indices: BTreeSet<u32> = outputs.iter().map(|output| output.index).collect();
    let change: BTreeSet<Destination> = tx
        .outputs()
        .iter()
        .enumerate()
        .filter(|(index, _)| !asset_indices.contains(&(*index as u32)))
        .filter_map(|(_, output)| output.destination())
        .filter(|destination| !chain_config.is_burn_address(destination))
        .collect();

    let qualifiers = QualifierView::new(view);

    for asset in restricted {
        let verifier = view
            .get_verifier(asset)?
            .ok_or_else(|| AssetTxError::VerifierNotFound(asset.to_owned()))?;

        let senders = spent.iter().filter(|input| input.name == asset).map(|input| input.holder);
        let recipients = outputs
            .iter()
            .filter(|output| match &output.operation {
                AssetOperation::Transfer { name, .. } => name == asset,
                _ => false,
            })
            .filter_map(|output| output.holder);

        let involved: BTreeSet<Destination> =
            senders.chain(recipients).chain(change.iter().copied()).collect();
        for address in &involved {
            verify_address(&verifier, &qualifiers, address)?;
        }
    }

    Ok(())
}

fn add_to(
    totals: &mut BTreeMap<String, Amount>,
    name: &str,
    amount: Amount,
) -> Result<(), AssetTxError> {
    let total = totals.entry(name.to_owned()).or_insert(Amount::ZERO);
    *total = (*total + amount).ok_or_else(|| AssetTxError::AmountOverflow(name.to_owned()))?;
    Ok(())
}

/// Per asset name, what the transaction moves out must equal what it spends.
fn check_conservation(outputs: &[AssetOutput], spent: &[SpentAsset]) -> Result<(), AssetTxError> {
    let mut input_totals = BTreeMap::new();
    for input in spent {
        add_to(&mut input_totals, &input.name, input.amount)?;
    }

    let mut output_totals = BTreeMap::new();
    for output in outputs {
        if matches!(
            output.operation,
            AssetOperation::Transfer { .. } | AssetOperation::Message { .. }
        ) {
            for (name, amount) in output.operation.holdings() {
                add_to(&mut output_totals, &name, amount)?;
            }
        }
    }

    for (name, amount) in &output_totals {
        let spent_amount = input_totals
            .get(name)
            .ok_or_else(|| AssetTxError::OutputWithoutInput(name.clone()))?;
        ensure!(
            spent_amount == amount,
            AssetTxError::AssetsWouldBeBurnt(name.clone())
        );
    }

    ensure!(
        input_totals.len() == output_totals.len(),
        AssetTxError::InputOutputNameCountMismatch
    );

    Ok(())
}
