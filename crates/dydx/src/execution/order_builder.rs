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

//! Order message builder for dYdX v4.
//!
//! [`OrderMessageBuilder`] runs the full pipeline for one subaccount: grid conversion,
//! flag and time-in-force resolution, good-til generation, and message assembly. It only
//! talks to the network to learn the current block height (short-term orders) or to fetch
//! market parameters it has not cached yet.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use ustr::Ustr;

use super::{
    block_height::BlockHeightMonitor,
    composer,
    good_til::{generate_good_til_at, validate_good_til_block},
    quantize::{compute_conditional_trigger_subticks, quote_quantums},
    resolve::ResolvedOrder,
    types::{
        BatchCancelDescriptor, CancelDescriptor, DepositDescriptor, EncodedOrder, MarketParams,
        OrderId, OrderIntent, SubaccountId, TransferDescriptor, WithdrawDescriptor,
    },
};
use crate::{
    common::consts::USDC_ASSET_ID,
    config::DydxClientConfig,
    error::{DydxError, DydxResult},
    query::{ChainQuery, MarketQuery},
};

/// Encodes `intent` into an order at a known height and time.
///
/// `current_height` is ignored for stateful orders. This is the synchronous core of
/// [`OrderMessageBuilder::compose_place_order`].
///
/// # Errors
///
/// Returns an error if the time-in-force is invalid for the order type, a conditional order
/// has no trigger price, the market grid is unusable, or the generated good-til block falls
/// outside the accepted window.
pub fn encode_order(
    subaccount: &SubaccountId,
    intent: &OrderIntent,
    market: &MarketParams,
    current_height: u64,
    now: DateTime<Utc>,
) -> DydxResult<EncodedOrder> {
    let resolved = ResolvedOrder::from_intent(intent)?;
    encode_resolved(subaccount, intent, &resolved, market, current_height, now)
}

fn encode_resolved(
    subaccount: &SubaccountId,
    intent: &OrderIntent,
    resolved: &ResolvedOrder,
    market: &MarketParams,
    current_height: u64,
    now: DateTime<Utc>,
) -> DydxResult<EncodedOrder> {
    let quantums = market.quantize_size(intent.size)?;
    let subticks = market.quantize_price(intent.price)?;
    let trigger_subticks =
        compute_conditional_trigger_subticks(intent.order_type, intent.trigger_price, market)?;

    let good_til = generate_good_til_at(
        resolved.order_flags,
        intent.good_til_blocks,
        intent.good_til_time_secs,
        current_height,
        now,
    )?;

    tracing::debug!(
        "Encoded {} {} order client_id={}: flags={}, quantums={quantums}, subticks={subticks}, \
         good_til_block={}, good_til_block_time={}",
        intent.order_type,
        intent.side,
        intent.client_id,
        resolved.order_flags,
        good_til.good_til_block,
        good_til.good_til_block_time,
    );

    composer::compose_place_order(
        subaccount,
        intent.client_id,
        market.clob_pair_id,
        resolved.order_flags,
        good_til,
        resolved.side,
        quantums,
        subticks,
        resolved.time_in_force,
        intent.reduce_only,
        resolved.client_metadata,
        resolved.condition_type,
        trigger_subticks,
    )
}

/// Builds dYdX messages for a single subaccount.
///
/// Market parameters are cached per ticker after the first fetch. Call
/// [`invalidate_market_params`](Self::invalidate_market_params) when a market's grid
/// changes.
#[derive(Debug)]
pub struct OrderMessageBuilder {
    chain: Arc<dyn ChainQuery>,
    markets: Arc<dyn MarketQuery>,
    subaccount: SubaccountId,
    block_height: Arc<BlockHeightMonitor>,
    market_params: DashMap<Ustr, MarketParams>,
}

impl OrderMessageBuilder {
    /// Creates a new [`OrderMessageBuilder`].
    #[must_use]
    pub fn new(
        chain: Arc<dyn ChainQuery>,
        markets: Arc<dyn MarketQuery>,
        subaccount: SubaccountId,
        block_height: Arc<BlockHeightMonitor>,
    ) -> Self {
        Self {
            chain,
            markets,
            subaccount,
            block_height,
            market_params: DashMap::new(),
        }
    }

    /// Creates a builder for the subaccount named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] if the configuration is invalid or has no wallet
    /// address.
    pub fn from_config(
        config: &DydxClientConfig,
        chain: Arc<dyn ChainQuery>,
        markets: Arc<dyn MarketQuery>,
    ) -> DydxResult<Self> {
        config.validate()?;
        Ok(Self::new(
            chain,
            markets,
            config.subaccount_id()?,
            Arc::new(BlockHeightMonitor::new()),
        ))
    }

    #[must_use]
    pub fn subaccount(&self) -> &SubaccountId {
        &self.subaccount
    }

    /// Returns the height cache, for the caller to feed with new blocks.
    #[must_use]
    pub fn block_height_monitor(&self) -> &Arc<BlockHeightMonitor> {
        &self.block_height
    }

    /// Resolves the current block height.
    ///
    /// Uses `current_height` when given, then a height the caller recorded in the
    /// [`BlockHeightMonitor`], then a fresh chain query. Fetched heights are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Query`] if the chain query fails.
    pub async fn resolve_height(&self, current_height: Option<u64>) -> DydxResult<u64> {
        if let Some(height) = current_height {
            return Ok(height);
        }
        if let Some(height) = self.block_height.current_height() {
            tracing::debug!("Using cached block height {height}");
            return Ok(height);
        }

        let height = self.chain.latest_block_height().await?;
        tracing::debug!("Fetched block height {height}");
        Ok(height)
    }

    /// Encodes `intent` on `market`.
    ///
    /// The height is only resolved for short-term orders; stateful orders never touch the
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns any validation error of [`encode_order`], or [`DydxError::Query`] if the
    /// height lookup fails.
    pub async fn compose_place_order(
        &self,
        intent: &OrderIntent,
        market: &MarketParams,
        current_height: Option<u64>,
    ) -> DydxResult<EncodedOrder> {
        let resolved = ResolvedOrder::from_intent(intent)?;
        let height = if resolved.order_flags.is_stateful() {
            current_height.unwrap_or_default()
        } else {
            self.resolve_height(current_height).await?
        };

        encode_resolved(
            &self.subaccount,
            intent,
            &resolved,
            market,
            height,
            Utc::now(),
        )
    }

    /// Encodes `intent` on the market trading as `ticker`, fetching its parameters if needed.
    ///
    /// # Errors
    ///
    /// See [`compose_place_order`](Self::compose_place_order) and
    /// [`market_params`](Self::market_params).
    pub async fn compose_place_order_for_market(
        &self,
        ticker: &str,
        intent: &OrderIntent,
        current_height: Option<u64>,
    ) -> DydxResult<EncodedOrder> {
        let market = self.market_params(ticker).await?;
        self.compose_place_order(intent, &market, current_height).await
    }

    /// Returns the parameters of `ticker`, from cache or the market query.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Query`] if the market query fails.
    pub async fn market_params(&self, ticker: &str) -> DydxResult<MarketParams> {
        let key = Ustr::from(ticker);
        if let Some(params) = self.market_params.get(&key) {
            return Ok(*params);
        }

        let params = self.markets.get_market_params(ticker).await?;
        tracing::debug!(
            "Cached market params for {ticker}: clob_pair_id={}",
            params.clob_pair_id
        );
        self.market_params.insert(key, params);
        Ok(params)
    }

    /// Inserts parameters for `ticker` without querying.
    pub fn cache_market_params(&self, ticker: &str, params: MarketParams) {
        self.market_params.insert(Ustr::from(ticker), params);
    }

    /// Drops cached parameters for `ticker`, returning true if any were cached.
    pub fn invalidate_market_params(&self, ticker: &str) -> bool {
        self.market_params.remove(&Ustr::from(ticker)).is_some()
    }

    /// Composes a cancel of one of this subaccount's orders.
    ///
    /// `order_flags` is the raw flag value of the order being cancelled. For short-term
    /// orders `good_til_block` must fall in the window above the current height.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidOrderFlag`] for an unknown flag value, a good-til
    /// violation, or [`DydxError::Query`] if the height lookup fails.
    pub async fn compose_cancel_order(
        &self,
        client_id: u32,
        clob_pair_id: u32,
        order_flags: u32,
        good_til_block: u32,
        good_til_block_time: u32,
        current_height: Option<u64>,
    ) -> DydxResult<CancelDescriptor> {
        let order_id =
            OrderId::from_raw(self.subaccount.clone(), client_id, order_flags, clob_pair_id)?;

        if !order_id.order_flags.is_stateful() && good_til_block != 0 {
            let height = self.resolve_height(current_height).await?;
            validate_good_til_block(u64::from(good_til_block), height)?;
        }

        composer::compose_cancel_order(order_id, good_til_block, good_til_block_time)
    }

    /// Composes a batch cancel of short-term orders, grouped by CLOB pair.
    ///
    /// # Errors
    ///
    /// Returns a good-til violation if `good_til_block` is zero or outside the window, or
    /// [`DydxError::Query`] if the height lookup fails.
    pub async fn compose_batch_cancel(
        &self,
        cancels_by_clob_pair_id: &IndexMap<u32, Vec<u32>>,
        good_til_block: u32,
        current_height: Option<u64>,
    ) -> DydxResult<BatchCancelDescriptor> {
        if good_til_block == 0 {
            return Err(DydxError::ShortTermOrderMissingGtb);
        }
        let height = self.resolve_height(current_height).await?;
        validate_good_til_block(u64::from(good_til_block), height)?;

        Ok(composer::compose_batch_cancel(
            &self.subaccount,
            cancels_by_clob_pair_id,
            good_til_block,
        ))
    }

    #[must_use]
    pub fn compose_transfer(
        &self,
        recipient: SubaccountId,
        asset_id: u32,
        amount: u64,
    ) -> TransferDescriptor {
        composer::compose_transfer(&self.subaccount, recipient, asset_id, amount)
    }

    #[must_use]
    pub fn compose_deposit(
        &self,
        sender_address: &str,
        asset_id: u32,
        quantums: u64,
    ) -> DepositDescriptor {
        composer::compose_deposit(&self.subaccount, sender_address, asset_id, quantums)
    }

    #[must_use]
    pub fn compose_withdraw(
        &self,
        recipient_address: &str,
        asset_id: u32,
        quantums: u64,
    ) -> WithdrawDescriptor {
        composer::compose_withdraw(&self.subaccount, recipient_address, asset_id, quantums)
    }

    /// Transfers `amount` USDC to another subaccount.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidData`] if `amount` is negative or too large.
    pub fn transfer_usdc(
        &self,
        recipient: SubaccountId,
        amount: Decimal,
    ) -> DydxResult<TransferDescriptor> {
        Ok(self.compose_transfer(recipient, USDC_ASSET_ID, quote_quantums(amount)?))
    }

    /// Deposits `amount` USDC from `sender_address` into this subaccount.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidData`] if `amount` is negative or too large.
    pub fn deposit_usdc(
        &self,
        sender_address: &str,
        amount: Decimal,
    ) -> DydxResult<DepositDescriptor> {
        Ok(self.compose_deposit(sender_address, USDC_ASSET_ID, quote_quantums(amount)?))
    }

    /// Withdraws `amount` USDC from this subaccount to `recipient_address`.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::InvalidData`] if `amount` is negative or too large.
    pub fn withdraw_usdc(
        &self,
        recipient_address: &str,
        amount: Decimal,
    ) -> DydxResult<WithdrawDescriptor> {
        Ok(self.compose_withdraw(recipient_address, USDC_ASSET_ID, quote_quantums(amount)?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        common::enums::{
            ConditionType, OrderFlags, OrderSide, OrderTimeInForce, OrderType, ProtoOrderSide,
            ProtoTimeInForce,
        },
        execution::types::OrderIntentBuilder,
    };

    const BTC_USD: MarketParams = MarketParams {
        clob_pair_id: 0,
        atomic_resolution: -10,
        step_base_quantums: 1_000_000,
        quantum_conversion_exponent: -9,
        subticks_per_tick: 100_000,
    };

    #[fixture]
    fn subaccount() -> SubaccountId {
        SubaccountId::new("dydx14zzueazeh0hj67cghhf9jypslcf9sh2n5k6art", 0)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[rstest]
    fn test_encode_market_ioc(subaccount: SubaccountId) {
        let intent = OrderIntentBuilder::default()
            .side(OrderSide::Buy)
            .order_type(OrderType::Market)
            .time_in_force(OrderTimeInForce::Ioc)
            .price(dec!(50000))
            .size(dec!(0.01))
            .client_id(1u32)
            .build()
            .unwrap();

        let order = encode_order(&subaccount, &intent, &BTC_USD, 1000, now()).unwrap();

        assert_eq!(order.order_flags(), OrderFlags::ShortTerm);
        assert_eq!(order.side, ProtoOrderSide::Buy);
        assert_eq!(order.quantums, 100_000_000);
        assert_eq!(order.subticks, 5_000_000_000);
        assert_eq!(order.good_til_block, 1020);
        assert_eq!(order.good_til_block_time, 0);
        assert_eq!(order.time_in_force, ProtoTimeInForce::Ioc);
        assert_eq!(order.client_metadata, 1);
        assert_eq!(order.conditional_order_trigger_subticks, 0);
    }

    #[rstest]
    fn test_encode_stop_limit(subaccount: SubaccountId) {
        let intent = OrderIntentBuilder::default()
            .side(OrderSide::Sell)
            .order_type(OrderType::StopLimit)
            .price(dec!(49000))
            .trigger_price(dec!(49500))
            .size(dec!(0.01))
            .client_id(2u32)
            .good_til_time_secs(3600u32)
            .build()
            .unwrap();

        let order = encode_order(&subaccount, &intent, &BTC_USD, 0, now()).unwrap();

        assert_eq!(order.order_flags(), OrderFlags::Conditional);
        assert_eq!(order.condition_type, ConditionType::StopLoss);
        assert_eq!(order.conditional_order_trigger_subticks, 4_950_000_000);
        assert_eq!(order.good_til_block, 0);
        assert_eq!(order.good_til_block_time, 1_704_070_800);
        assert_eq!(order.client_metadata, 0);
    }

    #[rstest]
    fn test_encode_rejects_blocks_beyond_window(subaccount: SubaccountId) {
        let intent = OrderIntentBuilder::default()
            .side(OrderSide::Buy)
            .order_type(OrderType::Limit)
            .time_in_force(OrderTimeInForce::Ioc)
            .price(dec!(50000))
            .size(dec!(0.01))
            .client_id(3u32)
            .good_til_blocks(25u32)
            .build()
            .unwrap();

        let err = encode_order(&subaccount, &intent, &BTC_USD, 1000, now()).unwrap_err();
        assert!(matches!(
            err,
            DydxError::GoodTilBlockOutOfWindow {
                good_til_block: 1025,
                ..
            }
        ));
    }

    #[rstest]
    fn test_encode_conditional_requires_trigger(subaccount: SubaccountId) {
        let intent = OrderIntentBuilder::default()
            .side(OrderSide::Sell)
            .order_type(OrderType::TakeProfitMarket)
            .time_in_force(OrderTimeInForce::Ioc)
            .price(dec!(51000))
            .size(dec!(0.01))
            .client_id(4u32)
            .build()
            .unwrap();

        let err = encode_order(&subaccount, &intent, &BTC_USD, 1000, now()).unwrap_err();
        assert!(matches!(
            err,
            DydxError::MissingTriggerPrice(OrderType::TakeProfitMarket)
        ));
    }
}
