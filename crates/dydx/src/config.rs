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

//! Client configuration for the dYdX order composition core.

use serde::{Deserialize, Serialize};

use crate::{
    common::{
        consts::{
            DEFAULT_GOOD_TIL_TIME_SECS, DYDX_BECH32_PREFIX, MAX_SUBACCOUNT_NUMBER,
            SHORT_BLOCK_WINDOW,
        },
        network::{DydxNetwork, NetworkConfig},
    },
    error::{DydxError, DydxResult},
    execution::types::{OrderIntentBuilder, SubaccountId},
};

pub const ENV_NETWORK: &str = "DYDX_NETWORK";
pub const ENV_WALLET_ADDRESS: &str = "DYDX_WALLET_ADDRESS";
pub const ENV_SUBACCOUNT_NUMBER: &str = "DYDX_SUBACCOUNT_NUMBER";
pub const ENV_GOOD_TIL_TIME_SECS: &str = "DYDX_GOOD_TIL_TIME_SECS";
pub const ENV_GOOD_TIL_BLOCKS: &str = "DYDX_GOOD_TIL_BLOCKS";

/// Configuration for composing dYdX messages on behalf of one subaccount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DydxClientConfig {
    /// Network endpoints and chain parameters (default: testnet).
    pub network: NetworkConfig,
    /// Wallet address (`dydx1...`) owning the subaccount.
    pub wallet_address: Option<String>,
    /// Subaccount number under the wallet (default: 0).
    pub subaccount_number: u32,
    /// Default lifetime in seconds for stateful orders.
    pub good_til_time_secs: u32,
    /// Default lifetime in blocks for short-term orders.
    pub good_til_blocks: u32,
}

impl Default for DydxClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            wallet_address: None,
            subaccount_number: 0,
            good_til_time_secs: DEFAULT_GOOD_TIL_TIME_SECS,
            good_til_blocks: SHORT_BLOCK_WINDOW,
        }
    }
}

impl DydxClientConfig {
    /// Creates a configuration for `network` with default values.
    #[must_use]
    pub fn new(network: DydxNetwork) -> Self {
        Self {
            network: network.into(),
            ..Self::default()
        }
    }

    /// Loads a configuration from the process environment, reading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] if a variable is set but cannot be parsed.
    pub fn from_env() -> DydxResult<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!("Failed to load .env file: {e}");
        }
        Self::from_env_vars(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from variables returned by `lookup`.
    ///
    /// Unset or blank variables keep their default value.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] if a variable is set but cannot be parsed.
    pub fn from_env_vars<F>(lookup: F) -> DydxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(network) = lookup(ENV_NETWORK) {
            let network: DydxNetwork = network.trim().parse().map_err(|_| {
                DydxError::Config(format!("Invalid {ENV_NETWORK} '{network}'"))
            })?;
            config.network = network.into();
        }
        config.wallet_address = lookup(ENV_WALLET_ADDRESS).map(|s| s.trim().to_string());
        if let Some(value) = lookup(ENV_SUBACCOUNT_NUMBER) {
            config.subaccount_number = parse_env_u32(ENV_SUBACCOUNT_NUMBER, &value)?;
        }
        if let Some(value) = lookup(ENV_GOOD_TIL_TIME_SECS) {
            config.good_til_time_secs = parse_env_u32(ENV_GOOD_TIL_TIME_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_GOOD_TIL_BLOCKS) {
            config.good_til_blocks = parse_env_u32(ENV_GOOD_TIL_BLOCKS, &value)?;
        }

        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> DydxResult<()> {
        self.network.validate()?;

        if let Some(address) = &self.wallet_address
            && !address.starts_with(&format!("{DYDX_BECH32_PREFIX}1"))
        {
            return Err(DydxError::Config(format!(
                "Wallet address '{address}' must start with '{DYDX_BECH32_PREFIX}1'"
            )));
        }
        if self.subaccount_number > MAX_SUBACCOUNT_NUMBER {
            return Err(DydxError::Config(format!(
                "Subaccount number {} exceeds maximum {MAX_SUBACCOUNT_NUMBER}",
                self.subaccount_number
            )));
        }
        if !(1..=SHORT_BLOCK_WINDOW).contains(&self.good_til_blocks) {
            return Err(DydxError::Config(format!(
                "good_til_blocks must be in [1, {SHORT_BLOCK_WINDOW}], was {}",
                self.good_til_blocks
            )));
        }
        if self.good_til_time_secs == 0 {
            return Err(DydxError::Config(
                "good_til_time_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the configured subaccount.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] if no wallet address is configured.
    pub fn subaccount_id(&self) -> DydxResult<SubaccountId> {
        let owner = self
            .wallet_address
            .as_deref()
            .ok_or_else(|| DydxError::Config("Wallet address must be set".to_string()))?;
        Ok(SubaccountId::new(owner, self.subaccount_number))
    }

    /// Returns an [`OrderIntentBuilder`] pre-filled with the configured order lifetimes.
    #[must_use]
    pub fn intent_builder(&self) -> OrderIntentBuilder {
        let mut builder = OrderIntentBuilder::default();
        builder
            .good_til_blocks(self.good_til_blocks)
            .good_til_time_secs(self.good_til_time_secs);
        builder
    }
}

fn parse_env_u32(key: &str, value: &str) -> DydxResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|e| DydxError::Config(format!("Invalid {key} '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::common::{
        enums::{OrderSide, OrderType},
        network::DYDX_MAINNET_CHAIN_ID,
    };

    const WALLET: &str = "dydx14zzueazeh0hj67cghhf9jypslcf9sh2n5k6art";

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn test_default_config() {
        let config = DydxClientConfig::default();
        assert_eq!(config.network.env, "testnet");
        assert_eq!(config.good_til_blocks, 20);
        assert_eq!(config.good_til_time_secs, 60);
        assert!(config.validate().is_ok());
        assert!(config.subaccount_id().is_err());
    }

    #[rstest]
    fn test_from_env_vars() {
        let config = DydxClientConfig::from_env_vars(env(&[
            (ENV_NETWORK, "Mainnet"),
            (ENV_WALLET_ADDRESS, WALLET),
            (ENV_SUBACCOUNT_NUMBER, "3"),
            (ENV_GOOD_TIL_TIME_SECS, "120"),
            (ENV_GOOD_TIL_BLOCKS, " "),
        ]))
        .unwrap();

        assert_eq!(config.network.chain_id, DYDX_MAINNET_CHAIN_ID);
        assert_eq!(config.good_til_time_secs, 120);
        assert_eq!(config.good_til_blocks, SHORT_BLOCK_WINDOW);
        assert_eq!(config.subaccount_id().unwrap(), SubaccountId::new(WALLET, 3));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(ENV_NETWORK, "devnet")]
    #[case(ENV_SUBACCOUNT_NUMBER, "-1")]
    #[case(ENV_GOOD_TIL_BLOCKS, "twenty")]
    fn test_from_env_vars_invalid(#[case] key: &str, #[case] value: &str) {
        let result = DydxClientConfig::from_env_vars(env(&[(key, value)]));
        assert!(matches!(result, Err(DydxError::Config(msg)) if msg.contains(key)));
    }

    #[rstest]
    #[case::bad_prefix(|c: &mut DydxClientConfig| c.wallet_address = Some("cosmos1abc".to_string()))]
    #[case::subaccount(|c: &mut DydxClientConfig| c.subaccount_number = MAX_SUBACCOUNT_NUMBER + 1)]
    #[case::zero_blocks(|c: &mut DydxClientConfig| c.good_til_blocks = 0)]
    #[case::too_many_blocks(|c: &mut DydxClientConfig| c.good_til_blocks = SHORT_BLOCK_WINDOW + 1)]
    #[case::zero_time(|c: &mut DydxClientConfig| c.good_til_time_secs = 0)]
    fn test_validate_rejects(#[case] mutate: fn(&mut DydxClientConfig)) {
        let mut config = DydxClientConfig::default();
        mutate(&mut config);
        assert!(matches!(config.validate(), Err(DydxError::Config(_))));
    }

    #[rstest]
    fn test_deserialize_partial() {
        let config: DydxClientConfig =
            serde_json::from_str(&format!(r#"{{"wallet_address": "{WALLET}"}}"#)).unwrap();
        assert_eq!(config.wallet_address.as_deref(), Some(WALLET));
        assert_eq!(config.good_til_blocks, SHORT_BLOCK_WINDOW);
    }

    #[rstest]
    fn test_intent_builder_uses_configured_lifetimes() {
        let config = DydxClientConfig {
            good_til_blocks: 10,
            good_til_time_secs: 3600,
            ..DydxClientConfig::default()
        };

        let intent = config
            .intent_builder()
            .side(OrderSide::Buy)
            .order_type(OrderType::Limit)
            .price(dec!(100))
            .size(dec!(1))
            .client_id(9u32)
            .build()
            .unwrap();

        assert_eq!(intent.good_til_blocks, 10);
        assert_eq!(intent.good_til_time_secs, 3600);
    }
}
