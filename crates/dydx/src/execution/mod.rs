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

//! Order-parameter translation and message composition for dYdX v4.

pub mod block_height;
pub mod composer;
pub mod good_til;
pub mod order_builder;
pub mod quantize;
pub mod resolve;
pub mod types;

pub use self::{
    block_height::BlockHeightMonitor,
    order_builder::{OrderMessageBuilder, encode_order},
    types::{
        DydxMsg, EncodedOrder, GoodTilFields, GoodTilOneof, MarketParams, OrderId, OrderIntent,
        OrderIntentBuilder, SubaccountId,
    },
};
