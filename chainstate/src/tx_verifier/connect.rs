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

use accounting::TxUndo;
use assets_accounting::{
    AssetData, AssetsAccountingOperations, AssetsAccountingUndo, AssetsAccountingView,
};
use common::{
    chain::{
        assets::{
            name, AssetOperation, IpfsHash, FLAG_SET, OWNER_ASSET_AMOUNT, OWNER_ASSET_UNITS,
            QUALIFIER_ASSET_UNITS, UNIQUE_ASSET_AMOUNT, UNIQUE_ASSET_UNITS,
        },
        Transaction,
    },
    primitives::{Amount, BlockHeight, Idable},
};
use verifier_string::strip_verifier_string;

use super::{decode_asset_outputs, resolve_spent_assets};
use crate::{error::AssetTxError, utxo::UtxoSource};

/// Applies the asset effects of a validated transaction to `cache`.
///
/// Spent holdings are debited first, then every output is recorded in order.
pub fn connect_transaction_assets<C, U>(
    cache: &mut C,
    utxos: &U,
    tx: &Transaction,
    height: BlockHeight,
) -> Result<TxUndo<AssetsAccountingUndo>, AssetTxError>
where
    C: AssetsAccountingOperations + AssetsAccountingView<Error = assets_accounting::Error>,
    U: UtxoSource,
{
    let mut undos = Vec::new();

    for spent in resolve_spent_assets(tx, utxos)? {
        undos.push(cache.debit(&spent.name, spent.holder, spent.outpoint)?);
    }

    let tx_id = tx.get_id();
    for output in decode_asset_outputs(tx)? {
        record_operation(cache, &output.operation, height, &mut undos)?;

        let Some(holder) = output.holder else { continue };
        let outpoint = tx.outpoint(output.index);
        for (asset, amount) in output.operation.holdings() {
            if amount > Amount::ZERO {
                undos.push(cache.credit(&asset, holder, outpoint, amount)?);
            }
        }
    }

    logging::log::trace!("Connected assets of tx {tx_id}: {} changes", undos.len());

    Ok(TxUndo::new(undos))
}

fn record_operation<C>(
    cache: &mut C,
    operation: &AssetOperation,
    height: BlockHeight,
    undos: &mut Vec<AssetsAccountingUndo>,
) -> Result<(), AssetTxError>
where
    C: AssetsAccountingOperations + AssetsAccountingView<Error = assets_accounting::Error>,
{
    match operation {
        AssetOperation::Issue {
            name,
            amount,
            units,
            reissuable,
            ipfs_hash,
        } => {
            let data = AssetData::new(
                name.clone(),
                *amount,
                *units,
                *reissuable,
                ipfs_hash.clone(),
                height,
            );
            undos.push(cache.issue_asset(data)?);
        }
        AssetOperation::Owner { name } => {
            let data = AssetData::new(
                name.clone(),
                OWNER_ASSET_AMOUNT,
                OWNER_ASSET_UNITS,
                false,
                None,
                height,
            );
            undos.push(cache.issue_asset(data)?);
        }
        AssetOperation::IssueUnique {
            root,
            tags,
            ipfs_hashes,
        } => {
            for (tag, ipfs_hash) in tags.iter().zip(ipfs_hashes) {
                let data = AssetData::new(
                    name::unique_name(root, tag),
                    UNIQUE_ASSET_AMOUNT,
                    UNIQUE_ASSET_UNITS,
                    false,
                    ipfs_hash.clone(),
                    height,
                );
                undos.push(cache.issue_asset(data)?);
            }
        }
        AssetOperation::IssueQualifier {
            name,
            amount,
            ipfs_hash,
        } => {
            let data = AssetData::new(
                name.clone(),
                *amount,
                QUALIFIER_ASSET_UNITS,
                false,
                ipfs_hash.clone(),
                height,
            );
            undos.push(cache.issue_asset(data)?);
        }
        AssetOperation::IssueRestricted {
            name,
            amount,
            units,
            reissuable,
            ipfs_hash,
            verifier,
        } => {
            let data = AssetData::new(
                name.clone(),
                *amount,
                *units,
                *reissuable,
                ipfs_hash.clone(),
                height,
            );
            undos.push(cache.issue_asset(data)?);
            undos.push(cache.set_verifier(name, strip_verifier_string(verifier))?);
        }
        AssetOperation::Reissue {
            name,
            amount,
            reissuable,
            new_units,
            new_ipfs,
        } => {
            reissue(cache, name, *amount, *reissuable, *new_units, new_ipfs, height, undos)?;
        }
        AssetOperation::ReissueRestricted {
            name,
            amount,
            reissuable,
            new_units,
            new_ipfs,
            new_verifier,
        } => {
            reissue(cache, name, *amount, *reissuable, *new_units, new_ipfs, height, undos)?;
            if let Some(verifier) = new_verifier {
                undos.push(cache.set_verifier(name, strip_verifier_string(verifier))?);
            }
        }
        AssetOperation::TagAddresses {
            qualifier,
            addresses,
            flag,
        } => {
            for address in addresses {
                undos.push(cache.set_qualifier_tag(
                    qualifier,
                    *address,
                    *flag == FLAG_SET,
                    height,
                )?);
            }
        }
        AssetOperation::FreezeAddresses {
            asset,
            addresses,
            flag,
        } => {
            for address in addresses {
                undos.push(cache.set_address_freeze(asset, *address, *flag == FLAG_SET, height)?);
            }
        }
        AssetOperation::FreezeAsset { asset, flag } => {
            undos.push(cache.set_global_freeze(asset, *flag == FLAG_SET, height)?);
        }
        AssetOperation::Transfer { .. } | AssetOperation::Message { .. } => {}
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn reissue<C>(
    cache: &mut C,
    name: &str,
    amount: Amount,
    reissuable: bool,
    new_units: Option<u8>,
    new_ipfs: &Option<IpfsHash>,
    height: BlockHeight,
    undos: &mut Vec<AssetsAccountingUndo>,
) -> Result<(), AssetTxError>
where
    C: AssetsAccountingOperations + AssetsAccountingView<Error = assets_accounting::Error>,
{
    let current = cache
        .get_asset_data(name)?
        .ok_or_else(|| AssetTxError::ReissueAssetNotExist(name.to_owned()))?;
    let data = current
        .reissue(amount, reissuable, new_units, new_ipfs.clone(), height)
        .ok_or_else(|| AssetTxError::ReissueAmountOutOfRange(name.to_owned()))?;
    undos.push(cache.reissue_asset(data)?);
    Ok(())
}
