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

//! Cached chain height for short-term good-til-block generation.
//!
//! A caller that already follows new blocks (for example over a websocket feed) records
//! each height here, and the order builder then skips the chain query on the hot path.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks the latest block height seen by the caller.
///
/// Heights only move forward: recording an older height (a replayed or out-of-order
/// update) leaves the cached value unchanged.
#[derive(Debug, Default)]
pub struct BlockHeightMonitor {
    /// Zero means no height recorded yet.
    current_height: AtomicU64,
}

impl BlockHeightMonitor {
    /// Creates a new empty [`BlockHeightMonitor`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a block height, returning true if it advanced the cached height.
    pub fn record_height(&self, height: u64) -> bool {
        let previous = self.current_height.fetch_max(height, Ordering::AcqRel);
        height > previous
    }

    /// Returns the cached height, or `None` if nothing was recorded since the last reset.
    #[must_use]
    pub fn current_height(&self) -> Option<u64> {
        match self.current_height.load(Ordering::Acquire) {
            0 => None,
            height => Some(height),
        }
    }

    /// Clears the cached height, e.g. after a feed disconnect.
    pub fn reset(&self) {
        self.current_height.store(0, Ordering::Release);
    }
}
