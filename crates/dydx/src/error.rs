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

//! Error handling for the dYdX client.
//!
//! Validation variants are raised synchronously at the point of violation and are never
//! retryable: the caller must correct the input and resubmit. Collaborator failures (chain or
//! market queries) are wrapped in [`DydxError::Query`] and propagate unchanged.

use thiserror::Error;

use crate::common::enums::{OrderTimeInForce, OrderType};

/// Result type for dYdX operations.
pub type DydxResult<T> = Result<T, DydxError>;

/// The main error type for all dYdX client operations.
#[derive(Debug, Error)]
pub enum DydxError {
    /// The time-in-force is not accepted for the order type.
    #[error("Invalid time in force {time_in_force} for order type {order_type}")]
    InvalidTimeInForceForOrderType {
        order_type: OrderType,
        time_in_force: OrderTimeInForce,
    },

    /// Unknown or unsupported order type.
    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    /// Conditional order submitted without a trigger price.
    #[error("Trigger price is required for conditional order type {0}")]
    MissingTriggerPrice(OrderType),

    /// Stateful order has a zero good-til-block-time.
    #[error("Stateful orders must have a valid good-til-block-time, was 0")]
    StatefulOrderMissingGtbt,

    /// Stateful order has a nonzero good-til-block.
    #[error("Stateful orders use good-til-block-time, good-til-block must be zero, was {0}")]
    StatefulOrderNonzeroGtb(u32),

    /// Short-term order has a zero good-til-block.
    #[error("Short-term orders must have a valid good-til-block, was 0")]
    ShortTermOrderMissingGtb,

    /// Short-term order has a nonzero good-til-block-time.
    #[error("Short-term orders use good-til-block, good-til-block-time must be zero, was {0}")]
    ShortTermOrderNonzeroGtbt(u32),

    /// Short-term good-til-block falls outside the accepted block window.
    #[error(
        "Invalid short-term order good-til-block {good_til_block}, \
         must be in [{lower_bound}, {upper_bound}]"
    )]
    GoodTilBlockOutOfWindow {
        good_til_block: u64,
        lower_bound: u64,
        upper_bound: u64,
    },

    /// Unrecognized order flag value on a decode path.
    #[error("Invalid order flag: {0}")]
    InvalidOrderFlag(u32),

    /// Invalid data errors (zero grid sizes, unrepresentable values).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Parsing errors (e.g., string to number conversions).
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {message}")]
    Json {
        message: String,
        /// The raw JSON that failed to parse, if available.
        raw: Option<String>,
    },

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chain or market query collaborator failures.
    #[error("Query error: {0}")]
    Query(#[from] anyhow::Error),
}

impl From<serde_json::Error> for DydxError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
            raw: None,
        }
    }
}

impl DydxError {
    /// Returns true if this error is an input validation failure.
    ///
    /// Validation errors are deterministic: resubmitting the same input fails the same way.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Query(_) | Self::Config(_))
    }

    /// Returns true if this error is a good-til field violation.
    #[must_use]
    pub fn is_good_til_violation(&self) -> bool {
        matches!(
            self,
            Self::StatefulOrderMissingGtbt
                | Self::StatefulOrderNonzeroGtb(_)
                | Self::ShortTermOrderMissingGtb
                | Self::ShortTermOrderNonzeroGtbt(_)
                | Self::GoodTilBlockOutOfWindow { .. }
        )
    }
}
