// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Assembly of order, cancel, and transfer messages from already-resolved values.
//!
//! Nothing here performs I/O. The only check is the good-til field guard, re-run on every
//! order and cancel right before the descriptor is built.

use indexmap::IndexMap;

use super::{
    good_til::validate_good_til_fields,
    types::{
        BatchCancelDescriptor, CancelDescriptor, DepositDescriptor, EncodedOrder, GoodTilFields,
        OrderBatch, OrderId, SubaccountId, TransferDescriptor, WithdrawDescriptor,
    },
};
use crate::{
    common::enums::{ConditionType, OrderFlags, ProtoOrderSide, ProtoTimeInForce},
    error::DydxResult,
};

/// Assembles an [`EncodedOrder`] for `MsgPlaceOrder`.
///
/// # Errors
///
/// Returns a good-til violation if `good_til` does not match the statefulness of
/// `order_flags`.
#[allow(clippy::too_many_arguments)]
pub fn compose_place_order(
    subaccount: &SubaccountId,
    client_id: u32,
    clob_pair_id: u32,
    order_flags: OrderFlags,
    good_til: GoodTilFields,
    side: ProtoOrderSide,
    quantums: u64,
    subticks: u64,
    time_in_force: ProtoTimeInForce,
    reduce_only: bool,
    client_metadata: u32,
    condition_type: ConditionType,
    conditional_order_trigger_subticks: u64,
) -> DydxResult<EncodedOrder> {
    good_til.validate(order_flags.is_stateful())?;

    Ok(EncodedOrder {
        order_id: OrderId::new(subaccount.clone(), client_id, order_flags, clob_pair_id),
        side,
        quantums,
        subticks,
        good_til_block: good_til.good_til_block,
        good_til_block_time: good_til.good_til_block_time,
        time_in_force,
        reduce_only,
        client_metadata,
        condition_type,
        conditional_order_trigger_subticks,
    })
}

/// Assembles a cancel for `order_id`.
///
/// Statefulness is taken from the order flags in `order_id`, so a cancel always uses the
/// same expiry field as the placement it targets.
///
/// # Errors
///
/// Returns a good-til violation if the fields do not match the order statefulness.
pub fn compose_cancel_order(
    order_id: OrderId,
    good_til_block: u32,
    good_til_block_time: u32,
) -> DydxResult<CancelDescriptor> {
    let is_stateful = order_id.order_flags.is_stateful();
    validate_good_til_fields(is_stateful, good_til_block, good_til_block_time)?;

    let good_til = GoodTilFields {
        good_til_block,
        good_til_block_time,
    }
    .one_of(is_stateful);

    Ok(CancelDescriptor { order_id, good_til })
}

/// Assembles a batch cancel of short-term orders, one batch per CLOB pair in input order.
#[must_use]
pub fn compose_batch_cancel(
    subaccount: &SubaccountId,
    cancels_by_clob_pair_id: &IndexMap<u32, Vec<u32>>,
    good_til_block: u32,
) -> BatchCancelDescriptor {
    let short_term_cancels = cancels_by_clob_pair_id
        .iter()
        .map(|(clob_pair_id, client_ids)| OrderBatch {
            clob_pair_id: *clob_pair_id,
            client_ids: client_ids.clone(),
        })
        .collect();

    BatchCancelDescriptor {
        subaccount_id: subaccount.clone(),
        short_term_cancels,
        good_til_block,
    }
}

#[must_use]
pub fn compose_transfer(
    subaccount: &SubaccountId,
    recipient: SubaccountId,
    asset_id: u32,
    amount: u64,
) -> TransferDescriptor {
    TransferDescriptor {
        sender: subaccount.clone(),
        recipient,
        asset_id,
        amount,
    }
}

/// Assembles a deposit from `sender_address` into `subaccount`.
#[must_use]
pub fn compose_deposit(
    subaccount: &SubaccountId,
    sender_address: impl Into<String>,
    asset_id: u32,
    quantums: u64,
) -> DepositDescriptor {
    DepositDescriptor {
        sender: sender_address.into(),
        recipient: subaccount.clone(),
        asset_id,
        quantums,
    }
}

/// Assembles a withdrawal from `subaccount` to `recipient_address`.
#[must_use]
pub fn compose_withdraw(
    subaccount: &SubaccountId,
    recipient_address: impl Into<String>,
    asset_id: u32,
    quantums: u64,
) -> WithdrawDescriptor {
    WithdrawDescriptor {
        sender: subaccount.clone(),
        recipient: recipient_address.into(),
        asset_id,
        quantums,
    }
}
