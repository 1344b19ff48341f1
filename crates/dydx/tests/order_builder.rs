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

//! Integration tests for `OrderMessageBuilder` against mock chain and market collaborators.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use dydx_v4_client::{
    DydxClientConfig, DydxError, MarketParams, OrderMessageBuilder, SubaccountId,
    common::{
        consts::USDC_ASSET_ID,
        enums::{
            BroadcastMode, ConditionType, OrderFlags, OrderSide, OrderTimeInForce, OrderType,
            ProtoTimeInForce,
        },
    },
    execution::{BlockHeightMonitor, DydxMsg, GoodTilOneof, OrderIntent, OrderIntentBuilder},
    query::{ChainQuery, MarketQuery, MessageBroadcaster, broadcast_default},
};
use indexmap::IndexMap;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const WALLET: &str = "dydx14zzueazeh0hj67cghhf9jypslcf9sh2n5k6art";

const ETH_USD: MarketParams = MarketParams {
    clob_pair_id: 1,
    atomic_resolution: -9,
    step_base_quantums: 1_000_000,
    quantum_conversion_exponent: -9,
    subticks_per_tick: 10_000,
};

/// Reports `heights` in turn, repeating the last one; fails when empty.
#[derive(Debug)]
struct MockChain {
    heights: Vec<u64>,
    calls: AtomicUsize,
}

impl MockChain {
    fn at(height: u64) -> Arc<Self> {
        Self::advancing(&[height])
    }

    fn advancing(heights: &[u64]) -> Arc<Self> {
        Arc::new(Self {
            heights: heights.to_vec(),
            calls: AtomicUsize::new(0),
        })
    }

    fn unavailable() -> Arc<Self> {
        Self::advancing(&[])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainQuery for MockChain {
    async fn latest_block_height(&self) -> anyhow::Result<u64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.heights
            .get(call)
            .or_else(|| self.heights.last())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("validator unavailable"))
    }
}

#[derive(Debug, Default)]
struct MockMarkets {
    calls: AtomicUsize,
}

#[async_trait]
impl MarketQuery for MockMarkets {
    async fn get_market_params(&self, ticker: &str) -> anyhow::Result<MarketParams> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match ticker {
            "ETH-USD" => Ok(ETH_USD),
            other => anyhow::bail!("Unknown market {other}"),
        }
    }
}

#[derive(Debug, Default)]
struct RecordingBroadcaster {
    sent: Mutex<Vec<(String, BroadcastMode)>>,
}

#[async_trait]
impl MessageBroadcaster for RecordingBroadcaster {
    async fn broadcast(&self, msg: DydxMsg, mode: BroadcastMode) -> anyhow::Result<String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((msg.type_url().to_string(), mode));
        Ok(format!("TXHASH{}", sent.len()))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("dydx_v4_client=debug")
        .try_init();
}

#[fixture]
fn subaccount() -> SubaccountId {
    SubaccountId::new(WALLET, 0)
}

fn builder(chain: Arc<MockChain>, markets: Arc<MockMarkets>) -> OrderMessageBuilder {
    init_tracing();
    OrderMessageBuilder::new(
        chain,
        markets,
        SubaccountId::new(WALLET, 0),
        Arc::new(BlockHeightMonitor::new()),
    )
}

fn short_term_limit(client_id: u32) -> OrderIntent {
    OrderIntentBuilder::default()
        .side(OrderSide::Buy)
        .order_type(OrderType::Limit)
        .time_in_force(OrderTimeInForce::Ioc)
        .price(dec!(2500.55))
        .size(dec!(0.123))
        .client_id(client_id)
        .build()
        .unwrap()
}

fn long_term_limit(client_id: u32) -> OrderIntent {
    OrderIntentBuilder::default()
        .side(OrderSide::Sell)
        .order_type(OrderType::Limit)
        .time_in_force(OrderTimeInForce::Gtx)
        .price(dec!(2600))
        .size(dec!(1))
        .client_id(client_id)
        .good_til_time_secs(3600u32)
        .build()
        .unwrap()
}

#[rstest]
#[tokio::test]
async fn test_short_term_order_queries_chain_each_time() {
    let chain = MockChain::advancing(&[1_000, 5_000]);
    let builder = builder(chain.clone(), Arc::default());

    let first = builder
        .compose_place_order(&short_term_limit(1), &ETH_USD, None)
        .await
        .unwrap();
    let second = builder
        .compose_place_order(&short_term_limit(2), &ETH_USD, None)
        .await
        .unwrap();

    assert_eq!(chain.calls(), 2);
    assert_eq!(first.good_til(), GoodTilOneof::GoodTilBlock(1_020));
    assert_eq!(second.good_til_block, 5_020);
    assert_eq!(builder.block_height_monitor().current_height(), None);
    assert_eq!(first.quantums, 123_000_000);
    // 2500.55 * 10^(-9 + 9 + 6), floored to 10_000
    assert_eq!(first.subticks, 2_500_550_000);
    assert_eq!(first.time_in_force, ProtoTimeInForce::Ioc);
}

#[rstest]
#[tokio::test]
async fn test_explicit_height_skips_chain() {
    let chain = MockChain::unavailable();
    let builder = builder(chain.clone(), Arc::default());

    let order = builder
        .compose_place_order(&short_term_limit(1), &ETH_USD, Some(100))
        .await
        .unwrap();

    assert_eq!(chain.calls(), 0);
    assert_eq!(order.good_til_block, 120);
}

#[rstest]
#[tokio::test]
async fn test_cached_height_skips_chain() {
    let chain = MockChain::unavailable();
    let builder = builder(chain.clone(), Arc::default());
    builder.block_height_monitor().record_height(777);

    let order = builder
        .compose_place_order(&short_term_limit(1), &ETH_USD, None)
        .await
        .unwrap();

    assert_eq!(chain.calls(), 0);
    assert_eq!(order.good_til_block, 797);
}

#[rstest]
#[tokio::test]
async fn test_stateful_order_never_queries_chain() {
    let chain = MockChain::unavailable();
    let builder = builder(chain.clone(), Arc::default());

    let order = builder
        .compose_place_order(&long_term_limit(3), &ETH_USD, None)
        .await
        .unwrap();

    assert_eq!(chain.calls(), 0);
    assert_eq!(order.order_flags(), OrderFlags::LongTerm);
    assert_eq!(order.time_in_force, ProtoTimeInForce::PostOnly);
    assert_eq!(order.good_til_block, 0);
    assert!(order.good_til_block_time > 0);
    assert_eq!(
        DydxMsg::from(order).default_broadcast_mode(),
        BroadcastMode::Commit
    );
}

#[rstest]
#[tokio::test]
async fn test_chain_failure_propagates() {
    let builder = builder(MockChain::unavailable(), Arc::default());

    let err = builder
        .compose_place_order(&short_term_limit(1), &ETH_USD, None)
        .await
        .unwrap_err();

    assert!(matches!(err, DydxError::Query(_)));
    assert!(!err.is_validation());
}

#[rstest]
#[tokio::test]
async fn test_invalid_tif_rejected_before_height_lookup() {
    let chain = MockChain::at(10);
    let builder = builder(chain.clone(), Arc::default());
    let intent = OrderIntentBuilder::default()
        .side(OrderSide::Buy)
        .order_type(OrderType::Market)
        .time_in_force(OrderTimeInForce::Gtt)
        .price(dec!(2500))
        .size(dec!(1))
        .client_id(1u32)
        .build()
        .unwrap();

    let err = builder
        .compose_place_order(&intent, &ETH_USD, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DydxError::InvalidTimeInForceForOrderType { .. }
    ));
    assert_eq!(chain.calls(), 0);
}

#[rstest]
#[tokio::test]
async fn test_take_profit_market_order() {
    let builder = builder(MockChain::at(42), Arc::default());
    let intent = OrderIntentBuilder::default()
        .side(OrderSide::Sell)
        .order_type(OrderType::TakeProfitMarket)
        .time_in_force(OrderTimeInForce::Ioc)
        .price(dec!(2000))
        .trigger_price(dec!(2100))
        .size(dec!(0.5))
        .client_id(9u32)
        .build()
        .unwrap();

    let order = builder
        .compose_place_order(&intent, &ETH_USD, None)
        .await
        .unwrap();

    assert_eq!(order.order_flags(), OrderFlags::Conditional);
    assert_eq!(order.condition_type, ConditionType::TakeProfit);
    assert_eq!(order.client_metadata, 1);
    assert_eq!(order.conditional_order_trigger_subticks, 2_100_000_000);
    assert_eq!(order.good_til_block, 0);
}

#[rstest]
#[tokio::test]
async fn test_market_params_cached_per_ticker() {
    let markets = Arc::new(MockMarkets::default());
    let builder = builder(MockChain::at(1), markets.clone());

    for client_id in 0..3 {
        builder
            .compose_place_order_for_market("ETH-USD", &long_term_limit(client_id), None)
            .await
            .unwrap();
    }
    assert_eq!(markets.calls.load(Ordering::SeqCst), 1);

    assert!(builder.invalidate_market_params("ETH-USD"));
    builder.market_params("ETH-USD").await.unwrap();
    assert_eq!(markets.calls.load(Ordering::SeqCst), 2);

    let err = builder.market_params("SOL-USD").await.unwrap_err();
    assert!(matches!(err, DydxError::Query(_)));
}

#[rstest]
#[tokio::test]
async fn test_cancel_orders(subaccount: SubaccountId) {
    let builder = builder(MockChain::at(1_000), Arc::default());

    let short = builder
        .compose_cancel_order(7, 1, 0, 1_010, 0, None)
        .await
        .unwrap();
    assert_eq!(short.order_id.subaccount_id, subaccount);
    assert_eq!(short.good_til, GoodTilOneof::GoodTilBlock(1_010));

    let stateful = builder
        .compose_cancel_order(8, 1, 64, 0, 1_700_000_000, None)
        .await
        .unwrap();
    assert_eq!(stateful.good_til, GoodTilOneof::GoodTilBlockTime(1_700_000_000));

    let err = builder
        .compose_cancel_order(9, 1, 0, 1_025, 0, None)
        .await
        .unwrap_err();
    assert!(err.is_good_til_violation());

    let err = builder
        .compose_cancel_order(9, 1, 16, 0, 1_700_000_000, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DydxError::InvalidOrderFlag(16)));

    let err = builder
        .compose_cancel_order(9, 1, 32, 0, 0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DydxError::StatefulOrderMissingGtbt));
}

#[rstest]
#[tokio::test]
async fn test_batch_cancel() {
    let builder = builder(MockChain::at(1_000), Arc::default());
    let mut cancels = IndexMap::new();
    cancels.insert(3, vec![11, 12]);
    cancels.insert(1, vec![13]);

    let batch = builder
        .compose_batch_cancel(&cancels, 1_015, None)
        .await
        .unwrap();
    assert_eq!(batch.short_term_cancels.len(), 2);
    assert_eq!(batch.short_term_cancels[0].clob_pair_id, 3);
    assert_eq!(batch.short_term_cancels[1].client_ids, vec![13]);

    let err = builder
        .compose_batch_cancel(&cancels, 0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DydxError::ShortTermOrderMissingGtb));
}

#[rstest]
fn test_usdc_transfers(subaccount: SubaccountId) {
    let builder = builder(MockChain::unavailable(), Arc::default());
    let recipient = SubaccountId::new(WALLET, 1);

    let transfer = builder
        .transfer_usdc(recipient.clone(), dec!(12.3456789))
        .unwrap();
    assert_eq!(transfer.amount, 12_345_678);
    assert_eq!(transfer.asset_id, USDC_ASSET_ID);
    assert_eq!(transfer.sender, subaccount);
    assert_eq!(transfer.recipient, recipient);

    let deposit = builder.deposit_usdc(WALLET, dec!(100)).unwrap();
    assert_eq!(deposit.quantums, 100_000_000);
    assert_eq!(deposit.recipient, subaccount);

    let err = builder.withdraw_usdc(WALLET, dec!(-1)).unwrap_err();
    assert!(matches!(err, DydxError::InvalidData(_)));

    let withdraw = builder.withdraw_usdc(WALLET, Decimal::ZERO).unwrap();
    assert_eq!(withdraw.quantums, 0);
}

#[rstest]
fn test_from_config_requires_wallet() {
    let chain = MockChain::at(1);
    let markets = Arc::new(MockMarkets::default());

    let err = OrderMessageBuilder::from_config(
        &DydxClientConfig::default(),
        chain.clone(),
        markets.clone(),
    )
    .unwrap_err();
    assert!(matches!(err, DydxError::Config(_)));

    let config = DydxClientConfig {
        wallet_address: Some(WALLET.to_string()),
        subaccount_number: 2,
        ..DydxClientConfig::default()
    };
    let builder = OrderMessageBuilder::from_config(&config, chain, markets).unwrap();
    assert_eq!(builder.subaccount(), &SubaccountId::new(WALLET, 2));
}

#[rstest]
#[tokio::test]
async fn test_broadcast_default_modes() {
    let builder = builder(MockChain::at(50), Arc::default());
    let broadcaster = RecordingBroadcaster::default();

    let short = builder
        .compose_place_order(&short_term_limit(1), &ETH_USD, None)
        .await
        .unwrap();
    let long = builder
        .compose_place_order(&long_term_limit(2), &ETH_USD, None)
        .await
        .unwrap();
    let transfer = builder
        .transfer_usdc(SubaccountId::new(WALLET, 1), dec!(5))
        .unwrap();

    for msg in [
        DydxMsg::from(short),
        DydxMsg::from(long),
        DydxMsg::from(transfer),
    ] {
        broadcast_default(&broadcaster, msg).await.unwrap();
    }

    let sent = broadcaster.sent.lock().unwrap();
    assert_eq!(
        *sent,
        vec![
            (
                "/dydxprotocol.clob.MsgPlaceOrder".to_string(),
                BroadcastMode::Sync
            ),
            (
                "/dydxprotocol.clob.MsgPlaceOrder".to_string(),
                BroadcastMode::Commit
            ),
            (
                "/dydxprotocol.sending.MsgCreateTransfer".to_string(),
                BroadcastMode::Sync
            ),
        ]
    );
}
