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

//! Good-til field generation and validation.
//!
//! Short-term orders expire at a block height close to the current one; stateful orders
//! expire at a Unix timestamp. Exactly one of the two fields is set on any order.

use chrono::{DateTime, Duration, Utc};

use super::types::GoodTilFields;
use crate::{
    common::{consts::SHORT_BLOCK_WINDOW, enums::OrderFlags},
    error::{DydxError, DydxResult},
};

/// Generates the good-til fields for an order with `order_flags`, using the current clock.
///
/// `current_height` is only read for short-term orders.
///
/// # Errors
///
/// See [`generate_good_til_at`].
pub fn generate_good_til(
    order_flags: OrderFlags,
    good_til_blocks: u32,
    good_til_time_secs: u32,
    current_height: u64,
) -> DydxResult<GoodTilFields> {
    generate_good_til_at(
        order_flags,
        good_til_blocks,
        good_til_time_secs,
        current_height,
        Utc::now(),
    )
}

/// Generates the good-til fields relative to an explicit `now`.
///
/// Short-term: `good_til_block = current_height + good_til_blocks`, checked against the
/// block window. Stateful: `good_til_block_time = now + good_til_time_secs` in Unix seconds.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if the resulting block or timestamp does not fit in a
/// `u32`, or [`DydxError::GoodTilBlockOutOfWindow`] if a short-term block falls outside
/// [`validate_good_til_block`]'s window.
pub fn generate_good_til_at(
    order_flags: OrderFlags,
    good_til_blocks: u32,
    good_til_time_secs: u32,
    current_height: u64,
    now: DateTime<Utc>,
) -> DydxResult<GoodTilFields> {
    if order_flags.is_stateful() {
        let expiry = now + Duration::seconds(i64::from(good_til_time_secs));
        let timestamp = u32::try_from(expiry.timestamp()).map_err(|_| {
            DydxError::InvalidData(format!(
                "Good-til-block-time {} does not fit in u32",
                expiry.timestamp()
            ))
        })?;
        return Ok(GoodTilFields::stateful(timestamp));
    }

    let block = current_height
        .checked_add(u64::from(good_til_blocks))
        .and_then(|b| u32::try_from(b).ok())
        .ok_or_else(|| {
            DydxError::InvalidData(format!(
                "Good-til-block {current_height} + {good_til_blocks} does not fit in u32"
            ))
        })?;
    validate_good_til_block(u64::from(block), current_height)?;
    Ok(GoodTilFields::short_term(block))
}

/// Validates a short-term `good_til_block` against the current height.
///
/// Accepts `[current_height + 1, current_height + 1 + SHORT_BLOCK_WINDOW]`.
///
/// # Errors
///
/// Returns [`DydxError::GoodTilBlockOutOfWindow`] if the block falls outside the window.
pub fn validate_good_til_block(good_til_block: u64, current_height: u64) -> DydxResult<()> {
    let lower_bound = current_height.saturating_add(1);
    let upper_bound = lower_bound.saturating_add(u64::from(SHORT_BLOCK_WINDOW));

    if !(lower_bound..=upper_bound).contains(&good_til_block) {
        return Err(DydxError::GoodTilBlockOutOfWindow {
            good_til_block,
            lower_bound,
            upper_bound,
        });
    }
    Ok(())
}

/// Validates that exactly the field matching the order statefulness is set.
///
/// # Errors
///
/// Returns the good-til violation describing the first failed rule.
pub fn validate_good_til_fields(
    is_stateful: bool,
    good_til_block: u32,
    good_til_block_time: u32,
) -> DydxResult<()> {
    if is_stateful {
        if good_til_block_time == 0 {
            return Err(DydxError::StatefulOrderMissingGtbt);
        }
        if good_til_block != 0 {
            return Err(DydxError::StatefulOrderNonzeroGtb(good_til_block));
        }
    } else {
        if good_til_block == 0 {
            return Err(DydxError::ShortTermOrderMissingGtb);
        }
        if good_til_block_time != 0 {
            return Err(DydxError::ShortTermOrderNonzeroGtbt(good_til_block_time));
        }
    }
    Ok(())
}

impl GoodTilFields {
    /// Validates these fields for an order that is (or is not) stateful.
    ///
    /// # Errors
    ///
    /// See [`validate_good_til_fields`].
    pub fn validate(&self, is_stateful: bool) -> DydxResult<()> {
        validate_good_til_fields(is_stateful, self.good_til_block, self.good_til_block_time)
    }
}
