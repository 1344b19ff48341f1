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

//! Interfaces to the collaborators the order builder relies on.
//!
//! Transport, signing and broadcasting live outside this crate; implementors wrap a
//! validator gRPC client, an indexer HTTP client, or a test double.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    common::enums::BroadcastMode,
    execution::types::{DydxMsg, MarketParams},
};

/// Read access to chain state.
#[async_trait]
pub trait ChainQuery: Send + Sync + Debug {
    /// Returns the latest committed block height.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be reached or replies with an invalid height.
    async fn latest_block_height(&self) -> anyhow::Result<u64>;
}

/// Read access to per-market parameters.
#[async_trait]
pub trait MarketQuery: Send + Sync + Debug {
    /// Returns the parameters of the market trading as `ticker` (e.g. `BTC-USD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the market is unknown or the query fails.
    async fn get_market_params(&self, ticker: &str) -> anyhow::Result<MarketParams>;
}

/// Signs and broadcasts composed messages.
#[async_trait]
pub trait MessageBroadcaster: Send + Sync + Debug {
    /// Broadcasts `msg` and returns the transaction hash.
    ///
    /// # Errors
    ///
    /// Returns an error if signing or broadcasting fails.
    async fn broadcast(&self, msg: DydxMsg, mode: BroadcastMode) -> anyhow::Result<String>;
}

/// Broadcasts `msg` with its default broadcast mode.
///
/// # Errors
///
/// Returns any error from the broadcaster.
pub async fn broadcast_default(
    broadcaster: &dyn MessageBroadcaster,
    msg: DydxMsg,
) -> anyhow::Result<String> {
    let mode = msg.default_broadcast_mode();
    tracing::debug!("Broadcasting {} with mode {mode}", msg.type_url());
    broadcaster.broadcast(msg, mode).await
}
