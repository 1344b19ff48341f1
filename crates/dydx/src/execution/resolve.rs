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

//! Resolution of order flags, protocol time-in-force, and condition type.
//!
//! Market-class orders only accept immediate execution. Limit-class orders additionally rest
//! on the book (GTT) or rest post-only (GTX, or GTT with `post_only`).

use super::types::OrderIntent;
use crate::{
    common::enums::{
        ConditionType, OrderFlags, OrderSide, OrderTimeInForce, OrderType, ProtoOrderSide,
        ProtoTimeInForce,
    },
    error::{DydxError, DydxResult},
};

/// Time-in-force accepted by market-class orders.
const MARKET_TIF_TABLE: [(OrderTimeInForce, ProtoTimeInForce); 2] = [
    (OrderTimeInForce::Ioc, ProtoTimeInForce::Ioc),
    (OrderTimeInForce::Fok, ProtoTimeInForce::FillOrKill),
];

/// Time-in-force accepted by limit-class orders.
const LIMIT_TIF_TABLE: [(OrderTimeInForce, ProtoTimeInForce); 4] = [
    (OrderTimeInForce::Gtt, ProtoTimeInForce::Unspecified),
    (OrderTimeInForce::Gtx, ProtoTimeInForce::PostOnly),
    (OrderTimeInForce::Ioc, ProtoTimeInForce::Ioc),
    (OrderTimeInForce::Fok, ProtoTimeInForce::FillOrKill),
];

/// Everything the resolver derives from an [`OrderIntent`] besides grid values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedOrder {
    pub side: ProtoOrderSide,
    pub order_flags: OrderFlags,
    pub time_in_force: ProtoTimeInForce,
    pub client_metadata: u32,
    pub condition_type: ConditionType,
}

impl ResolvedOrder {
    /// Resolves flags, time-in-force, metadata and condition type for `intent`.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidTimeInForceForOrderType`] if the time-in-force is not
    /// accepted for the order type.
    pub fn from_intent(intent: &OrderIntent) -> DydxResult<Self> {
        Ok(Self {
            side: resolve_side(intent.side),
            order_flags: resolve_flags(intent.order_type, intent.time_in_force),
            time_in_force: resolve_time_in_force(
                intent.order_type,
                intent.time_in_force,
                intent.post_only,
            )?,
            client_metadata: client_metadata(intent.order_type),
            condition_type: resolve_condition_type(intent.order_type),
        })
    }
}

/// Resolves the order flags.
///
/// Conditional types are always [`OrderFlags::Conditional`]; otherwise IOC/FOK are
/// short-term and everything else is long-term.
#[must_use]
pub const fn resolve_flags(order_type: OrderType, time_in_force: OrderTimeInForce) -> OrderFlags {
    if order_type.is_conditional() {
        OrderFlags::Conditional
    } else if time_in_force.requires_immediate_execution() {
        OrderFlags::ShortTerm
    } else {
        OrderFlags::LongTerm
    }
}

/// Resolves the protocol time-in-force.
///
/// GTX is the post-only alias of GTT. `post_only` only affects GTT; IOC and FOK orders
/// cannot rest and so ignore it.
///
/// # Errors
///
/// Returns [`DydxError::InvalidTimeInForceForOrderType`] if a market-class order asks for
/// GTT or GTX.
pub fn resolve_time_in_force(
    order_type: OrderType,
    time_in_force: OrderTimeInForce,
    post_only: bool,
) -> DydxResult<ProtoTimeInForce> {
    let table: &[(OrderTimeInForce, ProtoTimeInForce)] = if order_type.is_market() {
        &MARKET_TIF_TABLE
    } else {
        &LIMIT_TIF_TABLE
    };

    let proto = table
        .iter()
        .find(|(tif, _)| *tif == time_in_force)
        .map(|(_, proto)| *proto)
        .ok_or(DydxError::InvalidTimeInForceForOrderType {
            order_type,
            time_in_force,
        })?;

    if post_only && proto == ProtoTimeInForce::Unspecified {
        return Ok(ProtoTimeInForce::PostOnly);
    }
    Ok(proto)
}

/// Returns the client metadata: 1 for market-class orders, 0 otherwise.
#[must_use]
pub const fn client_metadata(order_type: OrderType) -> u32 {
    if order_type.is_market() { 1 } else { 0 }
}

/// Resolves the protocol condition type.
#[must_use]
pub const fn resolve_condition_type(order_type: OrderType) -> ConditionType {
    if order_type.is_stop() {
        ConditionType::StopLoss
    } else if order_type.is_take_profit() {
        ConditionType::TakeProfit
    } else {
        ConditionType::Unspecified
    }
}

/// Maps the order side onto the protocol side.
#[must_use]
pub fn resolve_side(side: OrderSide) -> ProtoOrderSide {
    ProtoOrderSide::from(side)
}
