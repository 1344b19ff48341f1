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

//! Data models for the dYdX v4 indexer `/v4/perpetualMarkets` endpoint.

use async_trait::async_trait;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::parse::{market_params_from, validate_market_active};
use crate::{common::enums::DydxMarketStatus, execution::types::MarketParams, query::MarketQuery};

/// Perpetual market definition from the indexer.
///
/// Only the fields needed to place orders are kept; the rest of the payload is ignored.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualMarket {
    /// CLOB pair ID, sent by the indexer as a string.
    #[serde_as(as = "DisplayFromStr")]
    pub clob_pair_id: u32,
    /// Market ticker (e.g. "BTC-USD").
    pub ticker: String,
    pub status: DydxMarketStatus,
    #[serde(default)]
    pub oracle_price: Option<Decimal>,
    /// Price increment in quote units.
    pub tick_size: Decimal,
    /// Size increment in base units.
    pub step_size: Decimal,
    pub atomic_resolution: i32,
    pub quantum_conversion_exponent: i32,
    pub step_base_quantums: u64,
    pub subticks_per_tick: u32,
}

/// Response body of `/v4/perpetualMarkets`, keyed by ticker in server order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerpetualMarketsResponse {
    pub markets: IndexMap<String, PerpetualMarket>,
}

impl From<&PerpetualMarket> for MarketParams {
    fn from(value: &PerpetualMarket) -> Self {
        Self {
            clob_pair_id: value.clob_pair_id,
            atomic_resolution: value.atomic_resolution,
            step_base_quantums: value.step_base_quantums,
            quantum_conversion_exponent: value.quantum_conversion_exponent,
            subticks_per_tick: value.subticks_per_tick,
        }
    }
}

/// A fetched market snapshot serves market parameters without further requests.
#[async_trait]
impl MarketQuery for PerpetualMarketsResponse {
    async fn get_market_params(&self, ticker: &str) -> anyhow::Result<MarketParams> {
        let market = self
            .markets
            .get(ticker)
            .ok_or_else(|| anyhow::anyhow!("Market '{ticker}' not found"))?;
        validate_market_active(ticker, market.status)?;
        Ok(market_params_from(market)?)
    }
}
