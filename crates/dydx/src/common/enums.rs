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

//! Enumerations for dYdX order intent and their on-chain encodings.
//!
//! The "intent" enums ([`OrderType`], [`OrderTimeInForce`], [`OrderSide`]) describe what a
//! trader asks for. The protocol enums ([`ProtoOrderSide`], [`ProtoTimeInForce`],
//! [`ConditionType`], [`OrderFlags`]) carry the integer values the chain expects and must
//! never be confused with the former: GTT, for example, has no protocol counterpart and
//! encodes as `TIME_IN_FORCE_UNSPECIFIED`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    common::consts::{ORDER_FLAG_CONDITIONAL, ORDER_FLAG_LONG_TERM, ORDER_FLAG_SHORT_TERM},
    error::DydxError,
};

/// Order side of the trading intent.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

/// dYdX order type.
///
/// Every type is either market-class or limit-class; the four trigger types are
/// additionally conditional.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order (executed at best available price).
    Market,
    /// Limit order with specified price.
    Limit,
    /// Stop-market order (triggered at stop price, executed as market).
    StopMarket,
    /// Take-profit order (market).
    TakeProfitMarket,
    /// Stop-limit order (triggered at stop price, executed as limit).
    StopLimit,
    /// Take-profit order (limit).
    TakeProfitLimit,
}

impl OrderType {
    /// Returns true for types that execute against the book without a resting price.
    #[must_use]
    pub const fn is_market(&self) -> bool {
        matches!(self, Self::Market | Self::StopMarket | Self::TakeProfitMarket)
    }

    /// Returns true for types that rest at a limit price.
    #[must_use]
    pub const fn is_limit(&self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit | Self::TakeProfitLimit)
    }

    /// Returns true for trigger-price (stop or take-profit) types.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        self.is_stop() || self.is_take_profit()
    }

    /// Returns true for stop-loss types.
    #[must_use]
    pub const fn is_stop(&self) -> bool {
        matches!(self, Self::StopMarket | Self::StopLimit)
    }

    /// Returns true for take-profit types.
    #[must_use]
    pub const fn is_take_profit(&self) -> bool {
        matches!(self, Self::TakeProfitMarket | Self::TakeProfitLimit)
    }
}

impl FromStr for OrderType {
    type Err = DydxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(Self::Market),
            "LIMIT" => Ok(Self::Limit),
            "STOP_MARKET" => Ok(Self::StopMarket),
            "TAKE_PROFIT_MARKET" => Ok(Self::TakeProfitMarket),
            "STOP_LIMIT" => Ok(Self::StopLimit),
            "TAKE_PROFIT_LIMIT" => Ok(Self::TakeProfitLimit),
            // Trailing stops are listed by the indexer but not supported by the protocol
            other => Err(DydxError::InvalidOrderType(other.to_string())),
        }
    }
}

/// Time-in-force as requested by the trader.
///
/// Do not pass these directly into the order; see
/// [`resolve_time_in_force`](crate::execution::resolve::resolve_time_in_force).
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTimeInForce {
    /// Good-Til-Time (GTT) - order rests until its expiry time.
    Gtt,
    /// Good-Til-Time and post-only.
    Gtx,
    /// Immediate-Or-Cancel (IOC) - fill immediately, cancel remainder.
    Ioc,
    /// Fill-Or-Kill (FOK) - must fill completely immediately or cancel.
    Fok,
}

impl OrderTimeInForce {
    /// Returns true if the order must execute within the block it lands in.
    #[must_use]
    pub const fn requires_immediate_execution(&self) -> bool {
        matches!(self, Self::Ioc | Self::Fok)
    }
}

/// dYdX order flags as carried in the order ID.
///
/// Conditional and long-term orders are stateful (persisted on-chain, expire by block time);
/// short-term orders live only in the in-memory book and expire by block height.
#[repr(u32)]
#[derive(
    Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash, AsRefStr, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderFlags {
    /// Short-term order (flag 0).
    #[default]
    ShortTerm = ORDER_FLAG_SHORT_TERM,
    /// Conditional order (flag 32).
    Conditional = ORDER_FLAG_CONDITIONAL,
    /// Long-term order (flag 64).
    LongTerm = ORDER_FLAG_LONG_TERM,
}

impl OrderFlags {
    /// Returns the raw protocol value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Returns true if orders with these flags are persisted in chain state.
    #[must_use]
    pub const fn is_stateful(self) -> bool {
        !matches!(self, Self::ShortTerm)
    }
}

impl TryFrom<u32> for OrderFlags {
    type Error = DydxError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            ORDER_FLAG_SHORT_TERM => Ok(Self::ShortTerm),
            ORDER_FLAG_CONDITIONAL => Ok(Self::Conditional),
            ORDER_FLAG_LONG_TERM => Ok(Self::LongTerm),
            other => Err(DydxError::InvalidOrderFlag(other)),
        }
    }
}

impl From<OrderFlags> for u32 {
    fn from(value: OrderFlags) -> Self {
        value.as_u32()
    }
}

/// Protocol `Order.Side`.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtoOrderSide {
    Unspecified = 0,
    Buy = 1,
    Sell = 2,
}

impl From<OrderSide> for ProtoOrderSide {
    fn from(value: OrderSide) -> Self {
        match value {
            OrderSide::Buy => Self::Buy,
            OrderSide::Sell => Self::Sell,
        }
    }
}

/// Protocol `Order.TimeInForce`.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtoTimeInForce {
    /// Rests on the book until expiry (GTT).
    #[default]
    Unspecified = 0,
    /// Immediate-or-cancel.
    Ioc = 1,
    /// Rejected if it would cross the book.
    PostOnly = 2,
    /// Fill-or-kill.
    FillOrKill = 3,
}

/// Protocol `Order.ConditionType`.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    #[default]
    Unspecified = 0,
    StopLoss = 1,
    TakeProfit = 2,
}

macro_rules! impl_proto_value {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// Returns the protobuf enum value.
                #[must_use]
                pub const fn value(self) -> i32 {
                    self as i32
                }
            }
        )+
    };
}

impl_proto_value!(ProtoOrderSide, ProtoTimeInForce, ConditionType);

/// dYdX market status as reported by the indexer.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DydxMarketStatus {
    /// Market is active and trading.
    Active,
    /// Market is paused (no trading).
    Paused,
    /// Cancel-only mode (no new orders).
    CancelOnly,
    /// Post-only mode (only maker orders).
    PostOnly,
    /// Market is initializing.
    Initializing,
    /// Market is in final settlement.
    FinalSettlement,
}

impl DydxMarketStatus {
    /// Returns true if new orders of any kind are accepted.
    #[must_use]
    pub const fn accepts_orders(&self) -> bool {
        matches!(self, Self::Active | Self::PostOnly)
    }
}

/// How the broadcaster waits for a transaction.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
pub enum BroadcastMode {
    /// Return once the transaction passes `CheckTx`.
    Sync,
    /// Wait until the transaction is committed in a block.
    Commit,
}
