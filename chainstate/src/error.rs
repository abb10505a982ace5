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

use common::chain::{
    assets::{AssetKind, AssetScriptError},
    AssetBurnKind, Block, Destination, UtxoOutPoint,
};
use common::primitives::Id;
use verifier_string::VerifierStringError;

/// Rejection of a transaction by the asset rules.
///
/// The display form of every variant is the stable reject reason reported to clients.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetTxError {
    // Structural
    #[error("bad-txns-bad-asset-transaction")]
    BadAssetScript(u32, AssetScriptError),
    #[error("bad-txns-coinbase-contains-asset-txes")]
    CoinbaseContainsAssets,
    #[error("bad-txns-asset-output-value-isn't-zero")]
    AssetOutputWithValue(u32),
    #[error("bad-txns-inputs-missing-or-spent")]
    MissingInput(UtxoOutPoint),
    #[error("mandatory-script-verify-flag-failed")]
    InputScriptVerifyFailed(usize),

    // Formatting
    #[error("bad-txns-transfer-asset-name-invalid")]
    InvalidAssetName(String),
    #[error("bad-txns-asset-amount-must-be-positive")]
    NonPositiveAmount(String),
    #[error("bad-txns-transfer-owner-amount-was-not-1")]
    OwnerAmountNotOne(String),
    #[error("bad-txns-transfer-unique-amount-was-not-1")]
    UniqueAmountNotOne(String),
    #[error("bad-txns-transfer-qualifier-amount-must be between 1 - 100")]
    QualifierAmountOutOfRange(String),
    #[error("bad-txns-transfer-expiration-without-message")]
    ExpireTimeWithoutMessage(String),
    #[error("bad-txns-message-on-non-channel-asset")]
    MessageOnNonChannel(String),
    #[error("bad-txns-failed-issue-asset-formatting-check")]
    IssueFormattingCheck,
    #[error("bad-txns-failed-reissue-asset-formatting-check")]
    ReissueFormattingCheck,
    #[error("bad-txns-issue-owner-name-doesn't-match")]
    IssueOwnerNameMismatch { expected: String, found: String },
    #[error("bad-txns-bad-owner")]
    OwnerOutputWithoutIssue(String),
    #[error("bad-txns-issue-name-kind-mismatch")]
    IssueNameKindMismatch(String, AssetKind),
    #[error("bad-txns-issue-units-out-of-range")]
    UnitsOutOfRange(String, u8),
    #[error("bad-txns-issue-amount-out-of-range")]
    IssueAmountOutOfRange(String),
    #[error("bad-txns-issue-amount-not-match-units")]
    IssueAmountNotMatchUnits(String),
    #[error("bad-txns-issue-fixed-parameters-mismatch")]
    FixedIssueParameters(String),
    #[error("bad-txns-issue-unique-asset-bad-outpoint-count")]
    UniqueBadOutpointCount,
    #[error("bad-txns-issue-unique-duplicate-name-in-same-tx")]
    UniqueDuplicateName(String),
    #[error("bad-txns-null-data-flag-must-be-0-or-1")]
    NullDataFlag(u8),
    #[error("bad-txns-null-data-without-addresses")]
    NullDataWithoutAddresses(String),
    #[error("bad-txns-null-asset-data-on-non-restricted-or-qualifier-asset")]
    NullDataOnWrongKind(String),
    #[error("bad-txns-null-data-only-one-change-per-asset-address")]
    NullDataDuplicateAddressChange(String, Destination),
    #[error("bad-txns-null-data-only-one-global-change-per-asset-name")]
    NullDataDuplicateGlobalChange(String),

    // Authorization
    #[error("bad-txns-issue-new-token-missing-owner-token")]
    MissingOwnerToken(String),
    #[error("bad-txns-issue-restricted-root-owner-token-outpoint-not-found")]
    RestrictedRootOwnerNotFound(String),
    #[error("bad-txns-issue-sub-qualifier-parent-outpoint-not-found")]
    SubQualifierParentNotFound(String),
    #[error("bad-txns-reissue-owner-outpoint-not-found")]
    ReissueOwnerNotFound(String),
    #[error("bad-txns-tx-contains-restricted-asset-null-tx-without-asset-transfer")]
    RestrictedNullWithoutOwnerTransfer(String),
    #[error("bad-txns-tx-contains-qualifier-asset-null-tx-without-asset-transfer")]
    QualifierNullWithoutTransfer(String),
    #[error("bad-txns-tx-contains-global-asset-null-tx-without-asset-transfer")]
    GlobalNullWithoutTransfer(String),

    // Burn
    #[error("bad-txns-issue-burn-not-found")]
    IssueBurnNotFound(AssetBurnKind),
    #[error("bad-txns-issue-unique-asset-burn-outpoints-not-found")]
    UniqueBurnNotFound,
    #[error("bad-txns-reissue-burn-outpoint-not-found")]
    ReissueBurnNotFound,
    #[error("bad-txns-tx-doesn't-contain-required-burn-fee-for-adding-tags")]
    AddTagBurnNotFound,

    // Accounting
    #[error("bad-txns-transfer-asset-not-exist")]
    TransferAssetNotExist(String),
    #[error("bad-txns-transfer-asset-amount-not-match-units")]
    TransferAmountNotMatchUnits(String),
    #[error("bad-txns-issue-asset-already-exists")]
    AssetAlreadyExists(String),
    #[error("bad-txns-reissue-asset-not-exist")]
    ReissueAssetNotExist(String),
    #[error("bad-txns-reissue-asset-not-reissuable")]
    ReissueNotReissuable(String),
    #[error("bad-txns-reissue-units-decrease")]
    ReissueUnitsDecrease(String),
    #[error("bad-txns-reissue-amount-greater-than-max-money")]
    ReissueAmountOutOfRange(String),
    #[error("bad-txns-reissue-amount-not-match-units")]
    ReissueAmountNotMatchUnits(String),
    #[error("bad-txns-null-data-asset-not-exist")]
    NullDataAssetNotExist(String),
    #[error("bad-txns-message-channel-not-exist")]
    MessageChannelNotExist(String),
    #[error(
        "bad-tx-inputs-outputs-mismatch Bad Transaction - Trying to create outpoint for token that you don't have: {0}"
    )]
    OutputWithoutInput(String),
    #[error("bad-tx-inputs-outputs-mismatch Bad Transaction - Assets would be burnt {0}")]
    AssetsWouldBeBurnt(String),
    #[error("bad-tx-asset-inputs-size-does-not-match-outputs-size")]
    InputOutputNameCountMismatch,
    #[error("bad-txns-asset-amount-overflow")]
    AmountOverflow(String),
    #[error("bad-txns-asset-index-failure: {0}")]
    AssetsAccounting(#[from] assets_accounting::Error),

    // Verifier
    #[error(transparent)]
    Verifier(#[from] VerifierStringError),
    #[error("bad-txns-restricted-asset-verifier-not-found")]
    VerifierNotFound(String),

    // Idempotency and restrictions
    #[error("bad-txns-transfer-restricted-asset-that-is-globally-restricted")]
    RestrictedGloballyFrozen(String),
    #[error("bad-txns-restricted-asset-transfer-from-frozen-address")]
    RestrictedFromFrozenAddress(String, Destination),
    #[error("bad-txns-null-data-add-qualifier-when-already-assigned")]
    AddQualifierWhenAssigned(String, Destination),
    #[error("bad-txns-null-data-removing-qualifier-when-not-assigned")]
    RemoveQualifierWhenNotAssigned(String, Destination),
    #[error("bad-txns-null-data-freeze-address-when-already-frozen")]
    FreezeAddressWhenFrozen(String, Destination),
    #[error("bad-txns-null-data-unfreeze-address-when-not-frozen")]
    UnfreezeAddressWhenNotFrozen(String, Destination),
    #[error("bad-txns-null-data-global-freeze-when-already-frozen")]
    GlobalFreezeWhenFrozen(String),
    #[error("bad-txns-null-data-global-unfreeze-when-not-frozen")]
    GlobalUnfreezeWhenNotFrozen(String),
    #[error("bad-txns-issue-asset-already-in-mempool")]
    AssetInMempool(String),
    #[error("bad-tx-reissue-chaining-not-allowed")]
    ReissueChaining(String),

    // Activation
    #[error("bad-txns-is-asset-and-asset-not-active")]
    AssetsNotActive,
    #[error("bad-tx-null-asset-data-before-restricted-assets-activated")]
    NullDataBeforeActivation,
    #[error("bad-txns-issue-qualifier-before-it-is-active")]
    QualifierBeforeActivation,
    #[error("bad-txns-issue-restricted-before-it-is-active")]
    RestrictedBeforeActivation,
    #[error("bad-txns-issue-msgchannel-before-messaging-is-active")]
    MsgChannelBeforeActivation,
    #[error("bad-txns-transfer-qualifier-before-it-is-active")]
    TransferQualifierBeforeActivation,
    #[error("bad-txns-transfer-restricted-before-it-is-active")]
    TransferRestrictedBeforeActivation,
    #[error("bad-txns-transfer-msgchannel-before-messaging-is-active")]
    TransferMsgChannelBeforeActivation,
    #[error("bad-txns-p2sh-assets-not-active")]
    P2shAssetsNotActive,
    #[error("bad-txns-ipfs-txid-before-messaging-is-active")]
    TxidIpfsBeforeActivation,
}

/// Classes of asset rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Structural,
    Formatting,
    Authorization,
    Accounting,
    Burn,
    Verifier,
    Idempotency,
    Resource,
    Timing,
    Activation,
}

impl AssetTxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssetTxError::BadAssetScript(_, _)
            | AssetTxError::CoinbaseContainsAssets
            | AssetTxError::AssetOutputWithValue(_)
            | AssetTxError::MissingInput(_)
            | AssetTxError::InputScriptVerifyFailed(_) => ErrorKind::Structural,

            AssetTxError::InvalidAssetName(_)
            | AssetTxError::NonPositiveAmount(_)
            | AssetTxError::OwnerAmountNotOne(_)
            | AssetTxError::UniqueAmountNotOne(_)
            | AssetTxError::QualifierAmountOutOfRange(_)
            | AssetTxError::ExpireTimeWithoutMessage(_)
            | AssetTxError::MessageOnNonChannel(_)
            | AssetTxError::IssueFormattingCheck
            | AssetTxError::ReissueFormattingCheck
            | AssetTxError::IssueOwnerNameMismatch { .. }
            | AssetTxError::OwnerOutputWithoutIssue(_)
            | AssetTxError::IssueNameKindMismatch(_, _)
            | AssetTxError::UnitsOutOfRange(_, _)
            | AssetTxError::IssueAmountOutOfRange(_)
            | AssetTxError::IssueAmountNotMatchUnits(_)
            | AssetTxError::FixedIssueParameters(_)
            | AssetTxError::UniqueBadOutpointCount
            | AssetTxError::UniqueDuplicateName(_)
            | AssetTxError::NullDataFlag(_)
            | AssetTxError::NullDataWithoutAddresses(_)
            | AssetTxError::NullDataOnWrongKind(_)
            | AssetTxError::NullDataDuplicateAddressChange(_, _)
            | AssetTxError::NullDataDuplicateGlobalChange(_) => ErrorKind::Formatting,

            AssetTxError::MissingOwnerToken(_)
            | AssetTxError::RestrictedRootOwnerNotFound(_)
            | AssetTxError::SubQualifierParentNotFound(_)
            | AssetTxError::ReissueOwnerNotFound(_)
            | AssetTxError::RestrictedNullWithoutOwnerTransfer(_)
            | AssetTxError::QualifierNullWithoutTransfer(_)
            | AssetTxError::GlobalNullWithoutTransfer(_)
            | AssetTxError::OutputWithoutInput(_) => ErrorKind::Authorization,

            AssetTxError::IssueBurnNotFound(_)
            | AssetTxError::UniqueBurnNotFound
            | AssetTxError::ReissueBurnNotFound
            | AssetTxError::AddTagBurnNotFound => ErrorKind::Burn,

            AssetTxError::TransferAssetNotExist(_)
            | AssetTxError::TransferAmountNotMatchUnits(_)
            | AssetTxError::AssetAlreadyExists(_)
            | AssetTxError::ReissueAssetNotExist(_)
            | AssetTxError::ReissueNotReissuable(_)
            | AssetTxError::ReissueUnitsDecrease(_)
            | AssetTxError::ReissueAmountOutOfRange(_)
            | AssetTxError::ReissueAmountNotMatchUnits(_)
            | AssetTxError::NullDataAssetNotExist(_)
            | AssetTxError::MessageChannelNotExist(_)
            | AssetTxError::AssetsWouldBeBurnt(_)
            | AssetTxError::InputOutputNameCountMismatch
            | AssetTxError::AmountOverflow(_)
            | AssetTxError::AssetsAccounting(_) => ErrorKind::Accounting,

            AssetTxError::Verifier(_) | AssetTxError::VerifierNotFound(_) => ErrorKind::Verifier,

            AssetTxError::RestrictedGloballyFrozen(_)
            | AssetTxError::RestrictedFromFrozenAddress(_, _)
            | AssetTxError::AddQualifierWhenAssigned(_, _)
            | AssetTxError::RemoveQualifierWhenNotAssigned(_, _)
            | AssetTxError::FreezeAddressWhenFrozen(_, _)
            | AssetTxError::UnfreezeAddressWhenNotFrozen(_, _)
            | AssetTxError::GlobalFreezeWhenFrozen(_)
            | AssetTxError::GlobalUnfreezeWhenNotFrozen(_)
            | AssetTxError::AssetInMempool(_)
            | AssetTxError::ReissueChaining(_) => ErrorKind::Idempotency,

            AssetTxError::AssetsNotActive
            | AssetTxError::NullDataBeforeActivation
            | AssetTxError::QualifierBeforeActivation
            | AssetTxError::RestrictedBeforeActivation
            | AssetTxError::MsgChannelBeforeActivation
            | AssetTxError::TransferQualifierBeforeActivation
            | AssetTxError::TransferRestrictedBeforeActivation
            | AssetTxError::TransferMsgChannelBeforeActivation
            | AssetTxError::P2shAssetsNotActive
            | AssetTxError::TxidIpfsBeforeActivation => ErrorKind::Activation,
        }
    }

    /// The stable reject reason.
    pub fn reject_reason(&self) -> String {
        self.to_string()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetIndexError {
    #[error("Transaction {0} rejected: {1}")]
    TxRejected(Id<common::chain::Transaction>, AssetTxError),
    #[error("Assets accounting error: {0}")]
    Accounting(#[from] assets_accounting::Error),
    #[error("Block {0} does not extend the current tip")]
    NotOnTip(Id<Block>),
    #[error("Block {0} is not the tip and can't be disconnected")]
    DisconnectNotTip(Id<Block>),
    #[error("Undo data of block {0} not found")]
    UndoNotFound(Id<Block>),
    #[error("Block undo error: {0}")]
    BlockUndo(#[from] accounting::BlockUndoError),
    #[error("Block height overflow")]
    HeightOverflow,
}

#[cfg(test)]
mod tests {
    use common::primitives::H160;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn reasons_are_stable() {
        assert_eq!(
            AssetTxError::OutputWithoutInput("FOO".to_owned()).to_string(),
            "bad-tx-inputs-outputs-mismatch Bad Transaction - Trying to create outpoint for token that you don't have: FOO"
        );
        assert_eq!(
            AssetTxError::AssetsWouldBeBurnt("FOO".to_owned()).to_string(),
            "bad-tx-inputs-outputs-mismatch Bad Transaction - Assets would be burnt FOO"
        );
        assert_eq!(
            AssetTxError::Verifier(VerifierStringError::FailedVerification).to_string(),
            "bad-txns-null-verifier-address-failed-verification"
        );
        assert_eq!(
            AssetTxError::FreezeAddressWhenFrozen(
                "$FOO".to_owned(),
                Destination::PublicKeyHash(H160::zero())
            )
            .reject_reason(),
            "bad-txns-null-data-freeze-address-when-already-frozen"
        );
    }

    #[test]
    fn kinds() {
        let samples = [
            AssetTxError::CoinbaseContainsAssets,
            AssetTxError::IssueFormattingCheck,
            AssetTxError::MissingOwnerToken("FOO!".to_owned()),
            AssetTxError::InputOutputNameCountMismatch,
            AssetTxError::UniqueBurnNotFound,
            AssetTxError::Verifier(VerifierStringError::Empty),
            AssetTxError::ReissueChaining("FOO".to_owned()),
            AssetTxError::AssetsNotActive,
        ];
        let kinds: Vec<ErrorKind> = samples.iter().map(AssetTxError::kind).collect();
        let expected: Vec<ErrorKind> = ErrorKind::iter()
            .filter(|k| !matches!(k, ErrorKind::Resource | ErrorKind::Timing))
            .collect();
        assert_eq!(kinds, expected);
        assert_eq!(ErrorKind::Idempotency.to_string(), "idempotency");
    }
}
