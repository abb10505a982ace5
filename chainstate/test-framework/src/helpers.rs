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

//! Builders of the typical asset transactions. Each one funds its burn from a coin of
//! the acting address and returns the coin change to it.

use common::{
    chain::{
        assets::{
            name, AssetKind, AssetOperation, IpfsHash, FLAG_SET, MSG_CHANNEL_ASSET_AMOUNT,
            MSG_CHANNEL_ASSET_UNITS, OWNER_ASSET_AMOUNT,
        },
        AssetBurnKind, Destination, Transaction, TxOutput,
    },
    primitives::Amount,
};

use crate::{TestFramework, TransactionBuilder};

impl TestFramework {
    fn burn_output(&self, kind: AssetBurnKind, times: u128) -> TxOutput {
        let amount = (self.chain_config.burn_amount(kind) * times).unwrap();
        TxOutput::transfer(amount, self.chain_config.burn_address(kind))
    }

    /// Spends a coin of `payer` covering `burn` and pays the burn plus the change.
    fn pay_burn(
        &self,
        builder: TransactionBuilder,
        payer: Destination,
        kind: AssetBurnKind,
        times: u128,
    ) -> TransactionBuilder {
        let burn = self.burn_output(kind, times);
        let (outpoint, value) = self.pick_coin(&payer, burn.value());
        let change = (value - burn.value()).unwrap();
        let builder = builder.add_input(outpoint, payer).add_output(burn);
        if change > Amount::ZERO {
            builder.add_output(TxOutput::transfer(change, payer))
        } else {
            builder
        }
    }

    /// Spends all of `holder`'s outputs of `name` and returns them to `holder`.
    fn pass_through(
        &self,
        builder: TransactionBuilder,
        holder: Destination,
        name: &str,
    ) -> TransactionBuilder {
        let outpoints = self.asset_outpoints(name, &holder);
        assert!(!outpoints.is_empty(), "{holder} holds no {name}");
        let total = outpoints
            .iter()
            .try_fold(Amount::ZERO, |acc, (_, amount)| acc + *amount)
            .unwrap();
        outpoints
            .into_iter()
            .fold(builder, |builder, (outpoint, _)| builder.add_input(outpoint, holder))
            .add_output(transfer_output(holder, name, total))
    }

    /// Root or sub asset issuance with its owner token.
    pub fn issue_asset_tx(
        &self,
        issuer: Destination,
        asset: &str,
        amount: Amount,
        units: u8,
        reissuable: bool,
    ) -> Transaction {
        let kind = name::classify(asset);
        let mut builder = TransactionBuilder::new();
        let burn_kind = if kind == AssetKind::Sub {
            let authority = name::issuance_authority(asset).unwrap();
            builder = self.pass_through(builder, issuer, &authority);
            AssetBurnKind::SubAsset
        } else {
            AssetBurnKind::Issue
        };

        self.pay_burn(builder, issuer, burn_kind, 1)
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::Owner {
                    name: name::owner_name(asset).unwrap(),
                },
            ))
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::Issue {
                    name: asset.to_owned(),
                    amount,
                    units,
                    reissuable,
                    ipfs_hash: None,
                },
            ))
            .build()
    }

    pub fn issue_unique_tx(&self, issuer: Destination, root: &str, tags: &[&str]) -> Transaction {
        let builder = self.pass_through(
            TransactionBuilder::new(),
            issuer,
            &name::owner_name(root).unwrap(),
        );
        self.pay_burn(builder, issuer, AssetBurnKind::Unique, tags.len() as u128)
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::IssueUnique {
                    root: root.to_owned(),
                    tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
                    ipfs_hashes: vec![None; tags.len()],
                },
            ))
            .build()
    }

    pub fn issue_channel_tx(
        &self,
        issuer: Destination,
        parent: &str,
        channel: &str,
    ) -> Transaction {
        let builder = self.pass_through(
            TransactionBuilder::new(),
            issuer,
            &name::owner_name(parent).unwrap(),
        );
        self.pay_burn(builder, issuer, AssetBurnKind::MsgChannel, 1)
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::Issue {
                    name: name::channel_name(parent, channel),
                    amount: MSG_CHANNEL_ASSET_AMOUNT,
                    units: MSG_CHANNEL_ASSET_UNITS,
                    reissuable: false,
                    ipfs_hash: None,
                },
            ))
            .build()
    }

    /// Qualifier or sub-qualifier issuance; a sub-qualifier moves its parent along.
    pub fn issue_qualifier_tx(
        &self,
        issuer: Destination,
        qualifier: &str,
        amount: Amount,
    ) -> Transaction {
        let mut builder = TransactionBuilder::new();
        let burn_kind = if name::classify(qualifier) == AssetKind::SubQualifier {
            let parent = name::issuance_authority(qualifier).unwrap();
            builder = self.pass_through(builder, issuer, &parent);
            AssetBurnKind::SubQualifier
        } else {
            AssetBurnKind::Qualifier
        };

        self.pay_burn(builder, issuer, burn_kind, 1)
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::IssueQualifier {
                    name: qualifier.to_owned(),
                    amount,
                    ipfs_hash: None,
                },
            ))
            .build()
    }

    pub fn issue_restricted_tx(
        &self,
        issuer: Destination,
        asset: &str,
        amount: Amount,
        units: u8,
        verifier: &str,
    ) -> Transaction {
        let builder = self.pass_through(
            TransactionBuilder::new(),
            issuer,
            &name::owner_name(asset).unwrap(),
        );
        self.pay_burn(builder, issuer, AssetBurnKind::Restricted, 1)
            .add_output(TxOutput::asset(
                issuer,
                &AssetOperation::IssueRestricted {
                    name: asset.to_owned(),
                    amount,
                    units,
                    reissuable: true,
                    ipfs_hash: None,
                    verifier: verifier.to_owned(),
                },
            ))
            .build()
    }

    /// Reissuance of a root, sub or restricted asset, paid to the owner.
    pub fn reissue_tx(
        &self,
        owner: Destination,
        asset: &str,
        amount: Amount,
        reissuable: bool,
        new_units: Option<u8>,
    ) -> Transaction {
        let builder = self.pass_through(
            TransactionBuilder::new(),
            owner,
            &name::owner_name(asset).unwrap(),
        );
        let operation = if name::classify(asset) == AssetKind::Restricted {
            AssetOperation::ReissueRestricted {
                name: asset.to_owned(),
                amount,
                reissuable,
                new_units,
                new_ipfs: None,
                new_verifier: None,
            }
        } else {
            AssetOperation::Reissue {
                name: asset.to_owned(),
                amount,
                reissuable,
                new_units,
                new_ipfs: None,
            }
        };
        self.pay_burn(builder, owner, AssetBurnKind::Reissue, 1)
            .add_output(TxOutput::asset(owner, &operation))
            .build()
    }

    /// Moves `amount` of `asset` from `from` to `to`, returning the rest to `from`.
    pub fn transfer_tx(
        &self,
        from: Destination,
        asset: &str,
        to: Destination,
        amount: Amount,
    ) -> Transaction {
        let mut builder = TransactionBuilder::new();
        let mut collected = Amount::ZERO;
        for (outpoint, held) in self.asset_outpoints(asset, &from) {
            if collected >= amount {
                break;
            }
            builder = builder.add_input(outpoint, from);
            collected = (collected + held).unwrap();
        }
        assert!(collected >= amount, "{from} holds less than {amount:?} of {asset}");

        builder = builder.add_output(transfer_output(to, asset, amount));
        let change = (collected - amount).unwrap();
        if change > Amount::ZERO {
            builder = builder.add_output(transfer_output(from, asset, change));
        }
        builder.build()
    }

    /// Tags or untags addresses; the qualifier goes back to its holder.
    pub fn tag_addresses_tx(
        &self,
        holder: Destination,
        qualifier: &str,
        addresses: Vec<Destination>,
        flag: u8,
    ) -> Transaction {
        let tagged = if flag == FLAG_SET {
            addresses.len() as u128
        } else {
            0
        };
        let mut builder = self.pass_through(TransactionBuilder::new(), holder, qualifier);
        if tagged > 0 {
            builder = self.pay_burn(builder, holder, AssetBurnKind::AddTag, tagged);
        }
        builder
            .add_output(TxOutput::null_asset(&AssetOperation::TagAddresses {
                qualifier: qualifier.to_owned(),
                addresses,
                flag,
            }))
            .build()
    }

    /// Freezes or unfreezes addresses of a restricted asset, moving its owner token.
    pub fn freeze_addresses_tx(
        &self,
        owner: Destination,
        asset: &str,
        addresses: Vec<Destination>,
        flag: u8,
    ) -> Transaction {
        self.pass_through(
            TransactionBuilder::new(),
            owner,
            &name::owner_name(asset).unwrap(),
        )
        .add_output(TxOutput::null_asset(&AssetOperation::FreezeAddresses {
            asset: asset.to_owned(),
            addresses,
            flag,
        }))
        .build()
    }

    pub fn freeze_asset_tx(&self, owner: Destination, asset: &str, flag: u8) -> Transaction {
        self.pass_through(
            TransactionBuilder::new(),
            owner,
            &name::owner_name(asset).unwrap(),
        )
        .add_output(TxOutput::null_asset(&AssetOperation::FreezeAsset {
            asset: asset.to_owned(),
            flag,
        }))
        .build()
    }

    /// A message on `channel`, returning the channel token to its holder.
    pub fn message_tx(
        &self,
        holder: Destination,
        channel: &str,
        ipfs_hash: IpfsHash,
        expire_time: Option<u64>,
    ) -> Transaction {
        let (outpoint, _) = self
            .asset_outpoints(channel, &holder)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("{holder} holds no {channel}"));
        TransactionBuilder::new()
            .add_input(outpoint, holder)
            .add_output(TxOutput::asset(
                holder,
                &AssetOperation::Message {
                    channel: channel.to_owned(),
                    ipfs_hash,
                    expire_time,
                },
            ))
            .build()
    }
}

/// A transfer output; owner tokens always move as a whole.
pub fn transfer_output(to: Destination, asset: &str, amount: Amount) -> TxOutput {
    let amount = if name::is_owner_name(asset) {
        OWNER_ASSET_AMOUNT
    } else {
        amount
    };
    TxOutput::asset(
        to,
        &AssetOperation::Transfer {
            name: asset.to_owned(),
            amount,
            memo: None,
            expire_time: None,
        },
    )
}
