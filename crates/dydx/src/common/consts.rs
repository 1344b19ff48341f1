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

//! Core constants for the dYdX v4 protocol.

/// Order flag for short-term orders (expire by block height).
pub const ORDER_FLAG_SHORT_TERM: u32 = 0;

/// Order flag for conditional orders (stop-loss, take-profit).
pub const ORDER_FLAG_CONDITIONAL: u32 = 32;

/// Order flag for long-term/stateful orders (expire by timestamp).
pub const ORDER_FLAG_LONG_TERM: u32 = 64;

/// Maximum number of blocks ahead of the next block a short-term order may expire.
///
/// A good-til-block is valid within `[height + 1, height + 1 + SHORT_BLOCK_WINDOW]`.
pub const SHORT_BLOCK_WINDOW: u32 = 20;

/// Atomic resolution of the USDC quote asset (quote quantums are 1e-6 USDC).
pub const QUOTE_QUANTUMS_ATOMIC_RESOLUTION: i32 = -6;

/// Asset ID of USDC, the only collateral asset.
pub const USDC_ASSET_ID: u32 = 0;

/// Bech32 human readable prefix for dYdX addresses.
pub const DYDX_BECH32_PREFIX: &str = "dydx";

/// Default lifetime in seconds for stateful orders when none is configured.
pub const DEFAULT_GOOD_TIL_TIME_SECS: u32 = 60;

/// Highest subaccount number the protocol accepts.
pub const MAX_SUBACCOUNT_NUMBER: u32 = 128_000;
