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

//! Fixed-point conversion of human-readable sizes and prices onto the dYdX order grid.
//!
//! All rounding truncates toward zero and then floors to a multiple of the grid step. Any
//! other rounding (nearest, ceiling) produces off-grid orders the chain rejects. Values below
//! one grid step are raised to exactly one step: the step doubles as the minimum order size
//! and minimum price, and this normalization is not an error.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use super::types::MarketParams;
use crate::{
    common::{consts::QUOTE_QUANTUMS_ATOMIC_RESOLUTION, enums::OrderType},
    error::{DydxError, DydxResult},
};

/// Computes base quantums for `size`.
///
/// `raw = size × 10^(-atomic_resolution)`, truncated, floored to a multiple of
/// `step_base_quantums`, and raised to at least `step_base_quantums`.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if `step_base_quantums` is zero or the scaled size
/// does not fit in a `u64`.
pub fn compute_quantums(
    size: Decimal,
    atomic_resolution: i32,
    step_base_quantums: u64,
) -> DydxResult<u64> {
    if step_base_quantums == 0 {
        return Err(DydxError::InvalidData(
            "step_base_quantums must be positive".to_string(),
        ));
    }

    let exponent = atomic_resolution.checked_neg().ok_or_else(|| {
        DydxError::InvalidData(format!("Invalid atomic resolution {atomic_resolution}"))
    })?;
    let raw = truncate_to_u64(scale_by_power_of_ten(size, exponent)?)?;
    let quantums = floor_to_multiple(raw, step_base_quantums);

    if quantums < step_base_quantums {
        tracing::warn!(
            "Size {size} below minimum, using step_base_quantums={step_base_quantums}"
        );
    }

    Ok(quantums.max(step_base_quantums))
}

/// Computes subticks for `price`.
///
/// `exponent = atomic_resolution - quantum_conversion_exponent - QUOTE_QUANTUMS_ATOMIC_RESOLUTION`,
/// `raw = price × 10^exponent`, truncated, floored to a multiple of `subticks_per_tick`, and
/// raised to at least `subticks_per_tick`.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if `subticks_per_tick` is zero or the scaled price
/// does not fit in a `u64`.
pub fn compute_subticks(
    price: Decimal,
    atomic_resolution: i32,
    quantum_conversion_exponent: i32,
    subticks_per_tick: u32,
) -> DydxResult<u64> {
    if subticks_per_tick == 0 {
        return Err(DydxError::InvalidData(
            "subticks_per_tick must be positive".to_string(),
        ));
    }

    let exponent = atomic_resolution
        .checked_sub(quantum_conversion_exponent)
        .and_then(|e| e.checked_sub(QUOTE_QUANTUMS_ATOMIC_RESOLUTION))
        .ok_or_else(|| {
            DydxError::InvalidData(format!(
                "Invalid exponents: atomic_resolution={atomic_resolution}, \
                 quantum_conversion_exponent={quantum_conversion_exponent}"
            ))
        })?;

    let step = u64::from(subticks_per_tick);
    let raw = truncate_to_u64(scale_by_power_of_ten(price, exponent)?)?;
    let subticks = floor_to_multiple(raw, step);

    if subticks < step {
        tracing::warn!("Price {price} below minimum, using subticks_per_tick={step}");
    }

    Ok(subticks.max(step))
}

/// Computes `conditional_order_trigger_subticks` for an order.
///
/// Returns 0 for non-conditional order types regardless of `trigger_price`.
///
/// # Errors
///
/// Returns [`DydxError::MissingTriggerPrice`] if the order type is conditional and no
/// trigger price is given, or any error of [`compute_subticks`].
pub fn compute_conditional_trigger_subticks(
    order_type: OrderType,
    trigger_price: Option<Decimal>,
    market: &MarketParams,
) -> DydxResult<u64> {
    if !order_type.is_conditional() {
        return Ok(0);
    }

    let trigger_price = trigger_price.ok_or(DydxError::MissingTriggerPrice(order_type))?;
    market.quantize_price(trigger_price)
}

/// Converts a USDC amount into quote quantums (1e-6 USDC), truncating any finer digits.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if `amount` is negative or too large.
pub fn quote_quantums(amount: Decimal) -> DydxResult<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DydxError::InvalidData(format!(
            "Amount must not be negative, was {amount}"
        )));
    }
    truncate_to_u64(scale_by_power_of_ten(
        amount,
        -QUOTE_QUANTUMS_ATOMIC_RESOLUTION,
    )?)
}

impl MarketParams {
    /// Returns `size` in base quantums on this market's grid.
    ///
    /// # Errors
    ///
    /// See [`compute_quantums`].
    pub fn quantize_size(&self, size: Decimal) -> DydxResult<u64> {
        compute_quantums(size, self.atomic_resolution, self.step_base_quantums)
    }

    /// Returns `price` in subticks on this market's grid.
    ///
    /// # Errors
    ///
    /// See [`compute_subticks`].
    pub fn quantize_price(&self, price: Decimal) -> DydxResult<u64> {
        compute_subticks(
            price,
            self.atomic_resolution,
            self.quantum_conversion_exponent,
            self.subticks_per_tick,
        )
    }
}

/// Largest power of ten a [`Decimal`] can represent or scale by.
const MAX_DECIMAL_EXPONENT: u32 = Decimal::MAX_SCALE;

/// Multiplies `value` by `10^exponent` exactly (within decimal precision).
fn scale_by_power_of_ten(value: Decimal, exponent: i32) -> DydxResult<Decimal> {
    let magnitude = exponent.unsigned_abs();
    if magnitude > MAX_DECIMAL_EXPONENT {
        return Err(DydxError::InvalidData(format!(
            "Exponent {exponent} exceeds decimal range of 10^{MAX_DECIMAL_EXPONENT}"
        )));
    }

    let scaled = if exponent >= 0 {
        value.checked_mul(Decimal::from_i128_with_scale(10_i128.pow(magnitude), 0))
    } else {
        value.checked_mul(Decimal::new(1, magnitude))
    };
    scaled.ok_or_else(|| DydxError::InvalidData(format!("{value} x 10^{exponent} is out of range")))
}

/// Truncates toward zero; non-positive values become 0.
fn truncate_to_u64(value: Decimal) -> DydxResult<u64> {
    let truncated = value.trunc();
    if truncated.is_sign_negative() || truncated.is_zero() {
        return Ok(0);
    }
    truncated
        .to_u64()
        .ok_or_else(|| DydxError::InvalidData(format!("{value} does not fit in u64")))
}

const fn floor_to_multiple(value: u64, base: u64) -> u64 {
    (value / base) * base
}
