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

use accounting::{combine_amount_delta, DataDelta, DeltaDataCollection, GetDataResult};
use common::{
    chain::{
        assets::{name, AssetKind},
        Destination, UtxoOutPoint,
    },
    primitives::{Amount, BlockHeight},
};
use logging::log;
use utils::ensure;

use crate::{
    data::{
        AssetData, AssetsAccountingDeltaData, AssetsAccountingDeltaUndoData, FreezeRecord,
        RootTagRecord, TagRecord,
    },
    error::{Error, Result},
    operations::{
        AssetDataUndo, AssetsAccountingOperations, AssetsAccountingUndo, CreditUndo, DebitUndo,
        FreezeUndo, TagUndo, VerifierUndo,
    },
    view::{AssetsAccountingView, FlushableAssetsAccountingView},
};

/// Looks a key up in the local delta first, falling back to the parent view.
fn get_or_parent<K: Ord + Clone, T: Clone + PartialEq, E>(
    collection: &DeltaDataCollection<K, T>,
    key: &K,
    parent: impl FnOnce() -> std::result::Result<Option<T>, E>,
) -> Result<Option<T>> {
    match collection.get_data(key) {
        GetDataResult::Present(d) => Ok(Some(d.clone())),
        GetDataResult::Deleted => Ok(None),
        GetDataResult::Missing => parent().map_err(|_| Error::ViewFail),
    }
}

pub struct AssetsAccountingCache<P> {
    parent: P,
    data: AssetsAccountingDeltaData,
}

impl<P: AssetsAccountingView> AssetsAccountingCache<P> {
    pub fn new(parent: P) -> Self {
        Self {
            parent,
            data: AssetsAccountingDeltaData::new(),
        }
    }

    pub fn consume(self) -> AssetsAccountingDeltaData {
        self.data
    }

    pub fn data(&self) -> &AssetsAccountingDeltaData {
        &self.data
    }

    fn undo_issue_asset(&mut self, undo: AssetDataUndo) -> Result<()> {
        ensure!(
            self.get_asset_data(&undo.name)?.is_some(),
            Error::AssetDataNotFound(undo.name.clone())
        );
        self.data.asset_data.undo_merge_delta_data_element(undo.name, undo.undo_data)?;
        Ok(())
    }

    fn undo_credit(&mut self, undo: CreditUndo) -> Result<()> {
        ensure!(
            self.get_outpoint_amount(&undo.name, &undo.holder, &undo.outpoint)?
                == Some(undo.amount),
            Error::InvariantBalanceChangedForUndo(undo.name.clone())
        );
        self.data.balances.sub_unsigned((undo.name.clone(), undo.holder), undo.amount)?;
        self.data.outpoints.undo_merge_delta_data_element(
            (undo.name, undo.holder, undo.outpoint),
            undo.undo_data,
        )?;
        Ok(())
    }

    fn undo_debit(&mut self, undo: DebitUndo) -> Result<()> {
        ensure!(
            self.get_outpoint_amount(&undo.name, &undo.holder, &undo.outpoint)?.is_none(),
            Error::OutpointAlreadyCredited(undo.name.clone(), undo.holder, undo.outpoint)
        );
        self.data.balances.add_unsigned((undo.name.clone(), undo.holder), undo.amount)?;
        self.data.outpoints.undo_merge_delta_data_element(
            (undo.name, undo.holder, undo.outpoint),
            undo.undo_data,
        )?;
        Ok(())
    }

    fn undo_qualifier_tag(&mut self, undo: TagUndo) -> Result<()> {
        if let Some((root, root_undo)) = undo.root_undo {
            self.data
                .root_qualifier_tags
                .undo_merge_delta_data_element((root, undo.holder), root_undo)?;
        }
        self.data
            .qualifier_tags
            .undo_merge_delta_data_element((undo.qualifier, undo.holder), undo.undo_data)?;
        Ok(())
    }

    fn undo_freeze(&mut self, undo: FreezeUndo) -> Result<()> {
        match undo.holder {
            Some(holder) => self
                .data
                .address_freezes
                .undo_merge_delta_data_element((undo.asset, holder), undo.undo_data)?,
            None => self
                .data
                .global_freezes
                .undo_merge_delta_data_element(undo.asset, undo.undo_data)?,
        }
        Ok(())
    }

    fn undo_verifier(&mut self, undo: VerifierUndo) -> Result<()> {
        self.data.verifiers.undo_merge_delta_data_element(undo.asset, undo.undo_data)?;
        Ok(())
    }
}

impl<P: AssetsAccountingView> AssetsAccountingView for AssetsAccountingCache<P> {
    type Error = Error;

    fn get_asset_data(&self, name: &str) -> Result<Option<AssetData>> {
        get_or_parent(&self.data.asset_data, &name.to_owned(), || {
            self.parent.get_asset_data(name)
        })
    }

    fn get_verifier(&self, name: &str) -> Result<Option<String>> {
        get_or_parent(&self.data.verifiers, &name.to_owned(), || {
            self.parent.get_verifier(name)
        })
    }

    fn get_balance(&self, name: &str, holder: &Destination) -> Result<Amount> {
        let parent_balance = self.parent.get_balance(name, holder).map_err(|_| Error::ViewFail)?;
        let local_delta = self.data.balances.data().get(&(name.to_owned(), *holder)).cloned();
        combine_amount_delta(parent_balance, local_delta).map_err(Error::AccountingError)
    }

    fn get_outpoint_amount(
        &self,
        name: &str,
        holder: &Destination,
        outpoint: &UtxoOutPoint,
    ) -> Result<Option<Amount>> {
        get_or_parent(
            &self.data.outpoints,
            &(name.to_owned(), *holder, *outpoint),
            || self.parent.get_outpoint_amount(name, holder, outpoint),
        )
    }

    fn get_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<TagRecord>> {
        get_or_parent(
            &self.data.qualifier_tags,
            &(qualifier.to_owned(), *holder),
            || self.parent.get_qualifier_tag(qualifier, holder),
        )
    }

    fn get_root_qualifier_tag(
        &self,
        qualifier: &str,
        holder: &Destination,
    ) -> Result<Option<RootTagRecord>> {
        get_or_parent(
            &self.data.root_qualifier_tags,
            &(qualifier.to_owned(), *holder),
            || self.parent.get_root_qualifier_tag(qualifier, holder),
        )
    }

    fn get_address_freeze(
        &self,
        asset: &str,
        holder: &Destination,
    ) -> Result<Option<FreezeRecord>> {
        get_or_parent(
            &self.data.address_freezes,
            &(asset.to_owned(), *holder),
            || self.parent.get_address_freeze(asset, holder),
        )
    }

    fn get_global_freeze(&self, asset: &str) -> Result<Option<FreezeRecord>> {
        get_or_parent(&self.data.global_freezes, &asset.to_owned(), || {
            self.parent.get_global_freeze(asset)
        })
    }
}

impl<P: AssetsAccountingView> AssetsAccountingOperations for AssetsAccountingCache<P> {
    fn issue_asset(&mut self, data: AssetData) -> Result<AssetsAccountingUndo> {
        log::debug!("Issuing asset: {:?}", data);

        let name = data.name().to_owned();
        ensure!(
            self.get_asset_data(&name)?.is_none(),
            Error::AssetAlreadyExists(name.clone())
        );

        let undo_data = self
            .data
            .asset_data
            .merge_delta_data_element(name.clone(), DataDelta::new(None, Some(data)))?;

        Ok(AssetsAccountingUndo::IssueAsset(AssetDataUndo { name, undo_data }))
    }

    fn reissue_asset(&mut self, data: AssetData) -> Result<AssetsAccountingUndo> {
        log::debug!("Reissuing asset: {:?}", data);

        let name = data.name().to_owned();
        let current = self
            .get_asset_data(&name)?
            .ok_or_else(|| Error::AssetDataNotFound(name.clone()))?;

        let undo_data = self
            .data
            .asset_data
            .merge_delta_data_element(name.clone(), DataDelta::new(Some(current), Some(data)))?;

        Ok(AssetsAccountingUndo::ReissueAsset(AssetDataUndo { name, undo_data }))
    }

    fn credit(
        &mut self,
        name: &str,
        holder: Destination,
        outpoint: UtxoOutPoint,
        amount: Amount,
    ) -> Result<AssetsAccountingUndo> {
        ensure!(amount > Amount::ZERO, Error::ZeroAmountCredit(name.to_owned()));
        ensure!(
            self.get_outpoint_amount(name, &holder, &outpoint)?.is_none(),
            Error::OutpointAlreadyCredited(name.to_owned(), holder, outpoint)
        );

        let undo_data = self.data.outpoints.merge_delta_data_element(
            (name.to_owned(), holder, outpoint),
            DataDelta::new(None, Some(amount)),
        )?;
        self.data.balances.add_unsigned((name.to_owned(), holder), amount)?;

        Ok(AssetsAccountingUndo::Credit(CreditUndo {
            name: name.to_owned(),
            holder,
            outpoint,
            amount,
            undo_data,
        }))
    }

    fn debit(
        &mut self,
        name: &str,
        holder: Destination,
        outpoint: UtxoOutPoint,
    ) -> Result<AssetsAccountingUndo> {
        let amount = self
            .get_outpoint_amount(name, &holder, &outpoint)?
            .ok_or_else(|| Error::OutpointNotFound(name.to_owned(), holder, outpoint))?;

        let undo_data = self.data.outpoints.merge_delta_data_element(
            (name.to_owned(), holder, outpoint),
            DataDelta::new(Some(amount), None),
        )?;
        self.data.balances.sub_unsigned((name.to_owned(), holder), amount)?;

        Ok(AssetsAccountingUndo::Debit(DebitUndo {
            name: name.to_owned(),
            holder,
            outpoint,
            amount,
            undo_data,
        }))
    }

    fn set_qualifier_tag(
        &mut self,
        qualifier: &str,
        holder: Destination,
        assigned: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo> {
        log::debug!("Setting qualifier {qualifier} for {holder} to {assigned}");

        let record = TagRecord {
            assigned,
            changed_at: height,
        };

        let root_undo = match name::classify(qualifier) {
            AssetKind::SubQualifier => match name::root_name(qualifier) {
                Some(root) => {
                    let prev = self.get_root_qualifier_tag(&root, &holder)?;
                    let next = RootTagRecord::with_sub_qualifier(
                        prev.as_ref(),
                        qualifier,
                        assigned,
                        height,
                    );
                    let undo = self.data.root_qualifier_tags.merge_delta_data_element(
                        (root.clone(), holder),
                        DataDelta::new(prev, Some(next)),
                    )?;
                    Some((root, undo))
                }
                None => None,
            },
            _ => None,
        };

        let prev = self.get_qualifier_tag(qualifier, &holder)?;
        let undo_data = self.data.qualifier_tags.merge_delta_data_element(
            (qualifier.to_owned(), holder),
            DataDelta::new(prev, Some(record)),
        )?;

        Ok(AssetsAccountingUndo::QualifierTag(TagUndo {
            qualifier: qualifier.to_owned(),
            holder,
            undo_data,
            root_undo,
        }))
    }

    fn set_address_freeze(
        &mut self,
        asset: &str,
        holder: Destination,
        frozen: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo> {
        log::debug!("Setting freeze of {asset} for {holder} to {frozen}");

        let prev = self.get_address_freeze(asset, &holder)?;
        let undo_data = self.data.address_freezes.merge_delta_data_element(
            (asset.to_owned(), holder),
            DataDelta::new(
                prev,
                Some(FreezeRecord {
                    frozen,
                    changed_at: height,
                }),
            ),
        )?;

        Ok(AssetsAccountingUndo::AddressFreeze(FreezeUndo {
            asset: asset.to_owned(),
            holder: Some(holder),
            undo_data,
        }))
    }

    fn set_global_freeze(
        &mut self,
        asset: &str,
        frozen: bool,
        height: BlockHeight,
    ) -> Result<AssetsAccountingUndo> {
        log::debug!("Setting global freeze of {asset} to {frozen}");

        let prev = self.get_global_freeze(asset)?;
        let undo_data = self.data.global_freezes.merge_delta_data_element(
            asset.to_owned(),
            DataDelta::new(
                prev,
                Some(FreezeRecord {
                    frozen,
                    changed_at: height,
                }),
            ),
        )?;

        Ok(AssetsAccountingUndo::GlobalFreeze(FreezeUndo {
            asset: asset.to_owned(),
            holder: None,
            undo_data,
        }))
    }

    fn set_verifier(&mut self, asset: &str, verifier: String) -> Result<AssetsAccountingUndo> {
        log::debug!("Setting verifier of {asset} to `{verifier}`");

        let prev = self.get_verifier(asset)?;
        let undo_data = self
            .data
            .verifiers
            .merge_delta_data_element(asset.to_owned(), DataDelta::new(prev, Some(verifier)))?;

        Ok(AssetsAccountingUndo::Verifier(VerifierUndo {
            asset: asset.to_owned(),
            undo_data,
        }))
    }

    fn undo(&mut self, undo_data: AssetsAccountingUndo) -> Result<()> {
        log::debug!("Undo an asset operation: {:?}", undo_data);
        match undo_data {
            AssetsAccountingUndo::IssueAsset(undo) | AssetsAccountingUndo::ReissueAsset(undo) => {
                self.undo_issue_asset(undo)
            }
            AssetsAccountingUndo::Credit(undo) => self.undo_credit(undo),
            AssetsAccountingUndo::Debit(undo) => self.undo_debit(undo),
            AssetsAccountingUndo::QualifierTag(undo) => self.undo_qualifier_tag(undo),
            AssetsAccountingUndo::AddressFreeze(undo)
            | AssetsAccountingUndo::GlobalFreeze(undo) => self.undo_freeze(undo),
            AssetsAccountingUndo::Verifier(undo) => self.undo_verifier(undo),
        }
    }
}

impl<P> FlushableAssetsAccountingView for AssetsAccountingCache<P> {
    type Error = Error;

    fn batch_write_assets_data(
        &mut self,
        delta: AssetsAccountingDeltaData,
    ) -> Result<AssetsAccountingDeltaUndoData> {
        self.data.merge_with_delta(delta)
    }
}
