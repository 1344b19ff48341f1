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

//! Parsing of indexer market payloads into [`MarketParams`].

use super::models::{PerpetualMarket, PerpetualMarketsResponse};
use crate::{
    common::enums::DydxMarketStatus,
    error::{DydxError, DydxResult},
    execution::types::MarketParams,
};

/// Validates that a ticker has the correct format (BASE-QUOTE).
///
/// # Errors
///
/// Returns [`DydxError::Parse`] if the ticker is not in the format "BASE-QUOTE".
pub fn validate_ticker_format(ticker: &str) -> DydxResult<()> {
    match ticker.split_once('-') {
        Some((base, quote)) if !base.is_empty() && !quote.is_empty() && !quote.contains('-') => {
            Ok(())
        }
        _ => Err(DydxError::Parse(format!(
            "Invalid ticker format '{ticker}', expected 'BASE-QUOTE' (e.g., 'BTC-USD')"
        ))),
    }
}

/// Validates that a market accepts new orders.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if the market is paused, cancel-only, initializing
/// or settling.
pub fn validate_market_active(ticker: &str, status: DydxMarketStatus) -> DydxResult<()> {
    if !status.accepts_orders() {
        return Err(DydxError::InvalidData(format!(
            "Market '{ticker}' is not accepting orders (status: {status})"
        )));
    }
    Ok(())
}

/// Converts an indexer market into [`MarketParams`], rejecting an unusable grid.
///
/// # Errors
///
/// Returns [`DydxError::InvalidData`] if the step or tick size in quantums is zero.
pub fn market_params_from(market: &PerpetualMarket) -> DydxResult<MarketParams> {
    if market.step_base_quantums == 0 || market.subticks_per_tick == 0 {
        return Err(DydxError::InvalidData(format!(
            "Market '{}' has a zero grid: step_base_quantums={}, subticks_per_tick={}",
            market.ticker, market.step_base_quantums, market.subticks_per_tick
        )));
    }
    Ok(MarketParams::from(market))
}

/// Parses a `/v4/perpetualMarkets` response body.
///
/// # Errors
///
/// Returns [`DydxError::Json`] carrying the raw body if it does not deserialize.
pub fn parse_perpetual_markets(json: &str) -> DydxResult<PerpetualMarketsResponse> {
    serde_json::from_str(json).map_err(|e| DydxError::Json {
        message: e.to_string(),
        raw: Some(json.to_string()),
    })
}

/// Extracts the parameters of `ticker` from a `/v4/perpetualMarkets` response body.
///
/// # Errors
///
/// Returns an error if the body does not parse, the ticker is malformed or missing, or the
/// market is not accepting orders.
pub fn parse_market_params(json: &str, ticker: &str) -> DydxResult<MarketParams> {
    validate_ticker_format(ticker)?;
    let response = parse_perpetual_markets(json)?;
    let market = response
        .markets
        .get(ticker)
        .ok_or_else(|| DydxError::InvalidData(format!("Market '{ticker}' not found")))?;
    validate_market_active(ticker, market.status)?;
    market_params_from(market)
}
