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

//! Order composition core for the [dYdX v4](https://dydx.exchange) chain.
//!
//! dYdX v4 is a Cosmos SDK chain running an on-chain central limit order book. Every order
//! message must carry integer-encoded sizes and prices on the market grid, together with the
//! order flags and expiry fields the matching engine expects. This crate converts
//! human-readable trading intent into that encoding:
//!
//! - `execution::quantize`: decimal price/size to subticks/quantums.
//! - `execution::resolve`: order flags, protocol time-in-force, condition type.
//! - `execution::good_til`: good-til-block / good-til-block-time generation and validation.
//! - `execution::composer`: place, cancel, batch-cancel and transfer message assembly.
//! - `execution::order_builder`: the above wired to chain and market query collaborators.
//!
//! Transport, signing and broadcasting live outside this crate and are reached only through
//! the traits in [`query`].

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod error;
pub mod execution;
pub mod http;
pub mod query;

pub use crate::{
    config::DydxClientConfig,
    error::{DydxError, DydxResult},
    execution::{
        EncodedOrder, MarketParams, OrderIntent, OrderIntentBuilder, OrderMessageBuilder,
        SubaccountId,
    },
};
