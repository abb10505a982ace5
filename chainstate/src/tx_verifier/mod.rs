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

//! Asset rules of transaction validation.
//!
//! Checks are split in three stages: [`check_transaction_assets`] looks at the
//! transaction alone, [`check_tx_inputs_assets`] checks it against the asset index and
//! the outputs it spends, and [`connect_transaction_assets`] applies it to a cache.

mod check_inputs;
mod check_transaction;
mod connect;
mod qualifiers;

use common::{
    chain::{
        assets::{name, AssetKind, AssetOperation},
        AssetBurnKind, ChainConfig, Destination, Transaction, UtxoOutPoint,
    },
    primitives::{Amount, BlockHeight},
};
use logging::log;

use crate::{
    error::AssetTxError,
    mempool::MempoolAssetTracker,
    utxo::{InputScriptVerifier, UtxoSource},
};

pub use self::{
    check_inputs::check_tx_inputs_assets, check_transaction::check_transaction_assets,
    connect::connect_transaction_assets, qualifiers::QualifierView,
};

/// An output carrying an asset operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOutput {
    pub index: u32,
    pub value: Amount,
    pub holder: Option<Destination>,
    pub operation: AssetOperation,
}

/// An asset amount held by a spent output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpentAsset {
    pub outpoint: UtxoOutPoint,
    pub holder: Destination,
    pub name: String,
    pub amount: Amount,
}

pub fn decode_asset_outputs(tx: &Transaction) -> Result<Vec<AssetOutput>, AssetTxError> {
    let mut result = Vec::new();
    for (index, output) in tx.outputs().iter().enumerate() {
        let index = index as u32;
        let decoded = output
            .asset_operation()
            .map_err(|e| AssetTxError::BadAssetScript(index, e))?;
        if let Some(decoded) = decoded {
            result.push(AssetOutput {
                index,
                value: output.value(),
                holder: decoded.holder,
                operation: decoded.operation,
            });
        }
    }
    Ok(result)
}

/// Asset amounts held by the outputs the transaction spends.
pub fn resolve_spent_assets(
    tx: &Transaction,
    utxos: &impl UtxoSource,
) -> Result<Vec<SpentAsset>, AssetTxError> {
    let mut result = Vec::new();
    for outpoint in tx.inputs().iter().filter_map(|input| input.utxo_outpoint()) {
        let spent = utxos.utxo(outpoint).ok_or(AssetTxError::MissingInput(*outpoint))?;
        let decoded = spent
            .asset_operation()
            .map_err(|e| AssetTxError::BadAssetScript(outpoint.output_index(), e))?;

        let Some(decoded) = decoded else { continue };
        let Some(holder) = decoded.holder else { continue };

        result.extend(
            decoded
                .operation
                .holdings()
                .into_iter()
                .filter(|(_, amount)| *amount > Amount::ZERO)
                .map(|(name, amount)| SpentAsset {
                    outpoint: *outpoint,
                    holder,
                    name,
                    amount,
                }),
        );
    }
    Ok(result)
}

/// Names an operation brings into existence.
pub fn issued_names(operation: &AssetOperation) -> Vec<String> {
    match operation {
        AssetOperation::Issue { name, .. }
        | AssetOperation::IssueQualifier { name, .. }
        | AssetOperation::IssueRestricted { name, .. } => vec![name.clone()],
        AssetOperation::Owner { name } => vec![name.clone()],
        AssetOperation::IssueUnique { root, tags, .. } => {
            tags.iter().map(|tag| name::unique_name(root, tag)).collect()
        }
        AssetOperation::Reissue { .. }
        | AssetOperation::ReissueRestricted { .. }
        | AssetOperation::Transfer { .. }
        | AssetOperation::TagAddresses { .. }
        | AssetOperation::FreezeAddresses { .. }
        | AssetOperation::FreezeAsset { .. }
        | AssetOperation::Message { .. } => Vec::new(),
    }
}

/// The burn an issuance of `name` has to pay.
fn issue_burn_kind(kind: AssetKind) -> Option<AssetBurnKind> {
    match kind {
        AssetKind::Root => Some(AssetBurnKind::Issue),
        AssetKind::Sub => Some(AssetBurnKind::SubAsset),
        AssetKind::Channel => Some(AssetBurnKind::MsgChannel),
        AssetKind::Qualifier => Some(AssetBurnKind::Qualifier),
        AssetKind::SubQualifier => Some(AssetBurnKind::SubQualifier),
        AssetKind::Restricted => Some(AssetBurnKind::Restricted),
        AssetKind::Unique => Some(AssetBurnKind::Unique),
        AssetKind::Owner | AssetKind::Vote | AssetKind::Invalid => None,
    }
}

/// True if some output pays exactly `amount` to the burn address of `kind`.
fn has_burn_output(
    chain_config: &ChainConfig,
    tx: &Transaction,
    kind: AssetBurnKind,
    amount: Amount,
) -> bool {
    let burn_address = chain_config.burn_address(kind);
    tx.outputs()
        .iter()
        .any(|output| output.value() == amount && output.destination() == Some(burn_address))
}

/// Full asset validation of a transaction about to enter the mempool or a block.
///
/// The base script check of every input runs first. The asset checks run even when
/// it fails, but a script failure is what gets reported.
#[allow(clippy::too_many_arguments)]
pub fn check_transaction<V, U, S>(
    chain_config: &ChainConfig,
    view: &V,
    utxos: &U,
    script_verifier: &S,
    tx: &Transaction,
    spend_height: BlockHeight,
    mempool: Option<&MempoolAssetTracker>,
) -> Result<(), AssetTxError>
where
    V: assets_accounting::AssetsAccountingView<Error = assets_accounting::Error>,
    U: UtxoSource,
    S: InputScriptVerifier,
{
    let script_result = check_input_scripts(utxos, script_verifier, tx);

    let assets_result = check_transaction_assets(chain_config, tx).and_then(|()| {
        check_tx_inputs_assets(chain_config, view, utxos, tx, spend_height, mempool)
    });

    match (script_result, assets_result) {
        (Err(script_err), Err(assets_err)) => {
            log::debug!(
                "Transaction fails both script ({script_err}) and asset ({assets_err}) checks"
            );
            Err(script_err)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn check_input_scripts(
    utxos: &impl UtxoSource,
    script_verifier: &impl InputScriptVerifier,
    tx: &Transaction,
) -> Result<(), AssetTxError> {
    for (index, input) in tx.inputs().iter().enumerate() {
        let Some(outpoint) = input.utxo_outpoint() else { continue };
        let spent = utxos.utxo(outpoint).ok_or(AssetTxError::MissingInput(*outpoint))?;
        if !script_verifier.verify_input(tx, index, &spent) {
            return Err(AssetTxError::InputScriptVerifyFailed(index));
        }
    }
    Ok(())
}
