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

use chainstate::InputScriptVerifier;
use common::{
    chain::{Destination, Transaction, TxInput, TxOutput, UtxoOutPoint},
    primitives::{hash_encoded, H160},
};
use script::{Builder, Script};

/// The address of the test key `n`.
pub fn test_address(n: u8) -> Destination {
    Destination::PublicKeyHash(H160::repeat_byte(n))
}

/// Unlocking script committing to the transaction outputs, the spent outpoint and
/// the key that owns it.
pub fn input_unlock_script(
    outputs: &[TxOutput],
    outpoint: &UtxoOutPoint,
    owner: &Destination,
) -> Script {
    let commitment = hash_encoded(&(outputs, outpoint, owner));
    Builder::new().push_slice(commitment.as_bytes()).into_script()
}

/// Accepts an input whose unlocking script is the one [`input_unlock_script`] makes for
/// the owner of the spent output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestScriptVerifier;

impl InputScriptVerifier for TestScriptVerifier {
    fn verify_input(&self, tx: &Transaction, input_index: usize, spent: &TxOutput) -> bool {
        let Some(TxInput::Utxo { outpoint, unlock }) = tx.inputs().get(input_index) else {
            return false;
        };
        let Some(owner) = spent.destination() else {
            return false;
        };
        *unlock == input_unlock_script(tx.outputs(), outpoint, &owner)
    }
}

#[cfg(test)]
mod tests {
    use common::primitives::{Amount, Id, Idable, H256};

    use super::*;
    use crate::TransactionBuilder;

    #[test]
    fn signatures_commit_to_outputs() {
        let owner = test_address(1);
        let spent = TxOutput::transfer(Amount::from_coins(10), owner);
        let outpoint = UtxoOutPoint::new(Id::new(H256::repeat_byte(3)), 0);

        let tx = TransactionBuilder::new()
            .add_input(outpoint, owner)
            .add_output(TxOutput::transfer(Amount::from_coins(10), test_address(2)))
            .build();
        assert!(TestScriptVerifier.verify_input(&tx, 0, &spent));

        // Someone else's output
        let foreign = TxOutput::transfer(Amount::from_coins(10), test_address(5));
        assert!(!TestScriptVerifier.verify_input(&tx, 0, &foreign));

        // Outputs swapped after signing
        let tampered = Transaction::new(
            tx.inputs().to_vec(),
            vec![TxOutput::transfer(Amount::from_coins(10), test_address(4))],
        );
        assert_ne!(tampered.get_id(), tx.get_id());
        assert!(!TestScriptVerifier.verify_input(&tampered, 0, &spent));
    }
}
