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

//! Value objects for dYdX v4 order composition.
//!
//! Everything here is constructed fresh per call and handed off to the signing layer; nothing
//! is mutated after construction.

use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::{
        consts::{DEFAULT_GOOD_TIL_TIME_SECS, SHORT_BLOCK_WINDOW},
        enums::{
            BroadcastMode, ConditionType, OrderFlags, OrderSide, OrderTimeInForce, OrderType,
            ProtoOrderSide, ProtoTimeInForce,
        },
    },
    error::DydxResult,
};

/// Per-market scaling parameters used to place sizes and prices on the order grid.
///
/// Fetched from the indexer per market. They may go stale between fetch and submission;
/// refreshing them is the caller's responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParams {
    /// CLOB pair the market trades on.
    pub clob_pair_id: u32,
    /// Power-of-ten exponent of one base quantum.
    pub atomic_resolution: i32,
    /// Minimum tradable size in base quantums; sizes are multiples of this.
    pub step_base_quantums: u64,
    /// Exponent converting quote quantums per base quantum into subticks.
    pub quantum_conversion_exponent: i32,
    /// Price increment in subticks; prices are multiples of this.
    pub subticks_per_tick: u32,
}

/// A subaccount owned by a wallet address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubaccountId {
    /// Bech32 wallet address (`dydx1...`).
    pub owner: String,
    /// Subaccount number under the owner.
    pub number: u32,
}

impl SubaccountId {
    /// Creates a new [`SubaccountId`].
    #[must_use]
    pub fn new(owner: impl Into<String>, number: u32) -> Self {
        Self {
            owner: owner.into(),
            number,
        }
    }
}

/// Unique identifier of an order on-chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId {
    pub subaccount_id: SubaccountId,
    pub client_id: u32,
    pub order_flags: OrderFlags,
    pub clob_pair_id: u32,
}

impl OrderId {
    /// Creates a new [`OrderId`].
    #[must_use]
    pub fn new(
        subaccount_id: SubaccountId,
        client_id: u32,
        order_flags: OrderFlags,
        clob_pair_id: u32,
    ) -> Self {
        Self {
            subaccount_id,
            client_id,
            order_flags,
            clob_pair_id,
        }
    }

    /// Creates an [`OrderId`] from a raw protocol order flag value.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidOrderFlag`](crate::error::DydxError::InvalidOrderFlag)
    /// if `raw_order_flags` is not 0, 32 or 64.
    pub fn from_raw(
        subaccount_id: SubaccountId,
        client_id: u32,
        raw_order_flags: u32,
        clob_pair_id: u32,
    ) -> DydxResult<Self> {
        Ok(Self::new(
            subaccount_id,
            client_id,
            OrderFlags::try_from(raw_order_flags)?,
            clob_pair_id,
        ))
    }
}

/// Human-readable trading intent.
///
/// Build with [`OrderIntentBuilder`]. Exactly one of `good_til_blocks` and
/// `good_til_time_secs` is used: the former for short-term orders, the latter for stateful
/// ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), derive(Debug))]
pub struct OrderIntent {
    pub side: OrderSide,
    pub order_type: OrderType,
    #[builder(default = "OrderTimeInForce::Gtt")]
    pub time_in_force: OrderTimeInForce,
    /// Limit price, or worst acceptable price for market-class orders.
    pub price: Decimal,
    pub size: Decimal,
    /// Required for conditional order types, ignored otherwise.
    #[builder(default, setter(strip_option))]
    pub trigger_price: Option<Decimal>,
    #[builder(default)]
    pub post_only: bool,
    #[builder(default)]
    pub reduce_only: bool,
    pub client_id: u32,
    /// Blocks past the current height a short-term order stays valid.
    #[builder(default = "SHORT_BLOCK_WINDOW")]
    pub good_til_blocks: u32,
    /// Seconds from now a stateful order stays valid.
    #[builder(default = "DEFAULT_GOOD_TIL_TIME_SECS")]
    pub good_til_time_secs: u32,
}

/// The protocol `good_til_oneof` of an order or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodTilOneof {
    /// Last block height a short-term order is valid for.
    GoodTilBlock(u32),
    /// Unix timestamp (seconds) a stateful order expires at.
    GoodTilBlockTime(u32),
}

/// Good-til-block / good-til-block-time pair as encoded in an order.
///
/// Exactly one field is nonzero once validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoodTilFields {
    pub good_til_block: u32,
    pub good_til_block_time: u32,
}

impl GoodTilFields {
    /// Fields for a short-term order expiring at `good_til_block`.
    #[must_use]
    pub const fn short_term(good_til_block: u32) -> Self {
        Self {
            good_til_block,
            good_til_block_time: 0,
        }
    }

    /// Fields for a stateful order expiring at `good_til_block_time`.
    #[must_use]
    pub const fn stateful(good_til_block_time: u32) -> Self {
        Self {
            good_til_block: 0,
            good_til_block_time,
        }
    }

    /// Returns the oneof the fields encode, given the order statefulness.
    #[must_use]
    pub const fn one_of(&self, is_stateful: bool) -> GoodTilOneof {
        if is_stateful {
            GoodTilOneof::GoodTilBlockTime(self.good_til_block_time)
        } else {
            GoodTilOneof::GoodTilBlock(self.good_til_block)
        }
    }
}

/// A fully encoded order, ready for `MsgPlaceOrder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedOrder {
    pub order_id: OrderId,
    pub side: ProtoOrderSide,
    pub quantums: u64,
    pub subticks: u64,
    /// Zero for stateful orders.
    pub good_til_block: u32,
    /// Zero for short-term orders.
    pub good_til_block_time: u32,
    pub time_in_force: ProtoTimeInForce,
    pub reduce_only: bool,
    /// 1 for market-class orders, else 0.
    pub client_metadata: u32,
    pub condition_type: ConditionType,
    /// Zero for non-conditional orders.
    pub conditional_order_trigger_subticks: u64,
}

impl EncodedOrder {
    #[must_use]
    pub fn clob_pair_id(&self) -> u32 {
        self.order_id.clob_pair_id
    }

    #[must_use]
    pub fn order_flags(&self) -> OrderFlags {
        self.order_id.order_flags
    }

    #[must_use]
    pub fn is_stateful(&self) -> bool {
        self.order_id.order_flags.is_stateful()
    }

    /// Returns the active expiry field.
    #[must_use]
    pub fn good_til(&self) -> GoodTilOneof {
        GoodTilFields {
            good_til_block: self.good_til_block,
            good_til_block_time: self.good_til_block_time,
        }
        .one_of(self.is_stateful())
    }
}

/// Cancel request for a single order (`MsgCancelOrder`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelDescriptor {
    pub order_id: OrderId,
    pub good_til: GoodTilOneof,
}

/// Short-term client IDs to cancel on one CLOB pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBatch {
    pub clob_pair_id: u32,
    pub client_ids: Vec<u32>,
}

/// Batch cancel of short-term orders (`MsgBatchCancel`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCancelDescriptor {
    pub subaccount_id: SubaccountId,
    pub short_term_cancels: Vec<OrderBatch>,
    pub good_til_block: u32,
}

/// Transfer between subaccounts (`MsgCreateTransfer`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDescriptor {
    pub sender: SubaccountId,
    pub recipient: SubaccountId,
    pub asset_id: u32,
    pub amount: u64,
}

/// Deposit from a wallet into a subaccount (`MsgDepositToSubaccount`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositDescriptor {
    pub sender: String,
    pub recipient: SubaccountId,
    pub asset_id: u32,
    pub quantums: u64,
}

/// Withdrawal from a subaccount to a wallet (`MsgWithdrawFromSubaccount`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawDescriptor {
    pub sender: SubaccountId,
    pub recipient: String,
    pub asset_id: u32,
    pub quantums: u64,
}

/// Any message this crate composes, as handed to the signing/broadcast layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DydxMsg {
    PlaceOrder(EncodedOrder),
    CancelOrder(CancelDescriptor),
    BatchCancel(BatchCancelDescriptor),
    Transfer(TransferDescriptor),
    Deposit(DepositDescriptor),
    Withdraw(WithdrawDescriptor),
}

impl DydxMsg {
    /// Returns the protobuf type URL of the message.
    #[must_use]
    pub const fn type_url(&self) -> &'static str {
        match self {
            Self::PlaceOrder(_) => "/dydxprotocol.clob.MsgPlaceOrder",
            Self::CancelOrder(_) => "/dydxprotocol.clob.MsgCancelOrder",
            Self::BatchCancel(_) => "/dydxprotocol.clob.MsgBatchCancel",
            Self::Transfer(_) => "/dydxprotocol.sending.MsgCreateTransfer",
            Self::Deposit(_) => "/dydxprotocol.sending.MsgDepositToSubaccount",
            Self::Withdraw(_) => "/dydxprotocol.sending.MsgWithdrawFromSubaccount",
        }
    }

    /// Returns the broadcast mode to use when the caller does not choose one.
    ///
    /// Stateful placements wait for commit so the order is known to be in state;
    /// everything else returns after `CheckTx`.
    #[must_use]
    pub fn default_broadcast_mode(&self) -> BroadcastMode {
        match self {
            Self::PlaceOrder(order) if order.is_stateful() => BroadcastMode::Commit,
            _ => BroadcastMode::Sync,
        }
    }
}

impl From<EncodedOrder> for DydxMsg {
    fn from(value: EncodedOrder) -> Self {
        Self::PlaceOrder(value)
    }
}

impl From<CancelDescriptor> for DydxMsg {
    fn from(value: CancelDescriptor) -> Self {
        Self::CancelOrder(value)
    }
}

impl From<BatchCancelDescriptor> for DydxMsg {
    fn from(value: BatchCancelDescriptor) -> Self {
        Self::BatchCancel(value)
    }
}

impl From<TransferDescriptor> for DydxMsg {
    fn from(value: TransferDescriptor) -> Self {
        Self::Transfer(value)
    }
}

impl From<DepositDescriptor> for DydxMsg {
    fn from(value: DepositDescriptor) -> Self {
        Self::Deposit(value)
    }
}

impl From<WithdrawDescriptor> for DydxMsg {
    fn from(value: WithdrawDescriptor) -> Self {
        Self::Withdraw(value)
    }
}
