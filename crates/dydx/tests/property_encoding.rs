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

//! Property-based tests for grid conversion and good-til generation.
//!
//! These hold for any market grid and any order intent:
//! - Quantums and subticks are positive multiples of the market step
//! - Grid conversion is monotonic in the input
//! - Exactly one good-til field is set, matching the order statefulness
//! - The block window accepts exactly `[h + 1, h + 21]`

use std::ops::RangeInclusive;

use chrono::{TimeZone, Utc};
use dydx_v4_client::{
    DydxError,
    common::{consts::SHORT_BLOCK_WINDOW, enums::OrderFlags},
    execution::{
        good_til::{generate_good_til_at, validate_good_til_block},
        quantize::{compute_quantums, compute_subticks},
    },
};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;

/// Generate non-negative decimals with up to `max_mantissa` units at the given scales.
fn decimal_strategy(
    max_mantissa: i64,
    scales: RangeInclusive<u32>,
) -> impl Strategy<Value = Decimal> {
    (0i64..=max_mantissa, scales).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn step_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![Just(1u64), Just(10), Just(1_000), Just(1_000_000), 1u64..=5_000_000]
}

fn flags_strategy() -> impl Strategy<Value = OrderFlags> {
    prop_oneof![
        Just(OrderFlags::ShortTerm),
        Just(OrderFlags::Conditional),
        Just(OrderFlags::LongTerm),
    ]
}

proptest! {
    /// Property: quantums are a positive multiple of the step size.
    #[rstest]
    fn quantums_on_grid(
        size in decimal_strategy(10_000_000, 2..=8),
        atomic_resolution in -10i32..=-5,
        step in step_strategy(),
    ) {
        let quantums = compute_quantums(size, atomic_resolution, step).unwrap();
        prop_assert_eq!(quantums % step, 0);
        prop_assert!(quantums >= step);
    }

    /// Property: subticks are a positive multiple of subticks-per-tick.
    #[rstest]
    fn subticks_on_grid(
        price in decimal_strategy(10_000_000, 1..=6),
        atomic_resolution in -10i32..=-5,
        quantum_conversion_exponent in -10i32..=-5,
        subticks_per_tick in prop_oneof![Just(1u32), Just(100), Just(100_000), 1u32..=1_000_000],
    ) {
        let subticks = compute_subticks(
            price,
            atomic_resolution,
            quantum_conversion_exponent,
            subticks_per_tick,
        )
        .unwrap();
        prop_assert_eq!(subticks % u64::from(subticks_per_tick), 0);
        prop_assert!(subticks >= u64::from(subticks_per_tick));
    }

    /// Property: a larger size never yields fewer quantums.
    #[rstest]
    fn quantums_monotonic(
        a in decimal_strategy(10_000_000, 2..=8),
        b in decimal_strategy(10_000_000, 2..=8),
        step in step_strategy(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let q_small = compute_quantums(small, -9, step).unwrap();
        let q_large = compute_quantums(large, -9, step).unwrap();
        prop_assert!(q_small <= q_large);
    }

    /// Property: generation either fails with a good-til or range error, or sets exactly one
    /// field that passes validation.
    #[rstest]
    fn good_til_mutually_exclusive(
        flags in flags_strategy(),
        good_til_blocks in any::<u32>(),
        good_til_time_secs in any::<u32>(),
        height in prop_oneof![0u64..=64, any::<u64>()],
        now_secs in 0i64..=i64::from(u32::MAX),
    ) {
        let now = Utc.timestamp_opt(now_secs, 0).unwrap();
        match generate_good_til_at(flags, good_til_blocks, good_til_time_secs, height, now) {
            Ok(fields) => {
                prop_assert!(fields.validate(flags.is_stateful()).is_ok());
                prop_assert!((fields.good_til_block == 0) != (fields.good_til_block_time == 0));
                if !flags.is_stateful() {
                    prop_assert!(
                        validate_good_til_block(u64::from(fields.good_til_block), height).is_ok()
                    );
                }
            }
            Err(e) => prop_assert!(
                matches!(
                    e,
                    DydxError::GoodTilBlockOutOfWindow { .. } | DydxError::InvalidData(_)
                ),
                "unexpected error: {e}"
            ),
        }
    }

    /// Property: short-term generation within the window always succeeds.
    #[rstest]
    fn good_til_short_term_in_window(
        good_til_blocks in 1u32..=SHORT_BLOCK_WINDOW + 1,
        height in 0u64..=u64::from(u32::MAX - SHORT_BLOCK_WINDOW - 1),
    ) {
        let fields =
            generate_good_til_at(OrderFlags::ShortTerm, good_til_blocks, 60, height, Utc::now())
                .unwrap();
        prop_assert_eq!(u64::from(fields.good_til_block), height + u64::from(good_til_blocks));
        prop_assert_eq!(fields.good_til_block_time, 0);
    }

    /// Property: the block window check accepts exactly `[h + 1, h + 1 + SHORT_BLOCK_WINDOW]`.
    #[rstest]
    fn good_til_block_window(
        height in 0u64..=1_000_000_000,
        offset in 0u64..=50,
    ) {
        let good_til_block = height + offset;
        let in_window = (1..=1 + u64::from(SHORT_BLOCK_WINDOW)).contains(&offset);
        prop_assert_eq!(validate_good_til_block(good_til_block, height).is_ok(), in_window);
    }
}
