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

//! Network presets for the dYdX v4 chain and its indexer.
//!
//! Endpoints follow the public node providers and indexer deployments for each environment.
//! A custom network can be built directly through [`NetworkConfig`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{DydxError, DydxResult};

pub const DYDX_MAINNET_CHAIN_ID: &str = "dydx-mainnet-1";
pub const DYDX_TESTNET_CHAIN_ID: &str = "dydx-testnet-4";

pub const DYDX_INDEXER_HTTP_URL: &str = "https://indexer.dydx.trade";
pub const DYDX_INDEXER_WS_URL: &str = "wss://indexer.dydx.trade/v4/ws";
pub const DYDX_TESTNET_INDEXER_HTTP_URL: &str = "https://indexer.v4testnet.dydx.exchange";
pub const DYDX_TESTNET_INDEXER_WS_URL: &str = "wss://indexer.v4testnet.dydx.exchange/v4/ws";
pub const DYDX_LOCALNET_INDEXER_HTTP_URL: &str = "http://localhost:3002";
pub const DYDX_LOCALNET_INDEXER_WS_URL: &str = "ws://localhost:3003/v4/ws";

pub const DYDX_GRPC_URL: &str = "dydx-ops-grpc.kingnodes.com:443";
pub const DYDX_TESTNET_GRPC_URL: &str = "test-dydx-grpc.kingnodes.com:443";
pub const DYDX_LOCALNET_GRPC_URL: &str = "localhost:9090";

pub const DYDX_TESTNET_FAUCET_URL: &str = "https://faucet.v4testnet.dydx.exchange";

const FEE_DENOM_MAINNET: &str =
    "ibc/8E27BA2D5493AF5636760E354E46004562C46AB7EC0CC4C1CA14E9E20E2545B5";
const FEE_DENOM_TESTNET: &str = "adv4tnt";
const STAKE_DENOM_MAINNET: &str = "adydx";
const STAKE_DENOM_TESTNET: &str = "adv4tnt";
const FEE_MINIMUM_MAINNET: u64 = 0;
const FEE_MINIMUM_TESTNET: u64 = 4_630_550_000_000_000;

/// Validator URL schemes understood by the transaction layer.
pub const VALIDATOR_URL_PREFIXES: [&str; 4] = ["grpc+https", "grpc+http", "rest+https", "rest+http"];

/// dYdX deployment environment.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DydxNetwork {
    Mainnet,
    #[default]
    Testnet,
    Localnet,
}

/// Endpoints and chain parameters for one deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Environment label (`mainnet`, `testnet`, `localnet` or a custom name).
    pub env: String,
    /// Cosmos chain ID.
    pub chain_id: String,
    /// Indexer REST endpoint, without trailing slash.
    pub indexer_http_url: String,
    /// Indexer WebSocket endpoint.
    pub indexer_ws_url: String,
    /// Validator URL with scheme prefix, e.g. `grpc+https://host:443`.
    pub validator_url: String,
    /// Minimum gas price in fee denom units.
    pub fee_minimum_gas_price: u64,
    /// Denomination used for fees.
    pub fee_denom: String,
    /// Denomination used for staking.
    pub stake_denom: String,
    /// Faucet endpoint, testnet only.
    pub faucet_url: Option<String>,
}

impl From<DydxNetwork> for NetworkConfig {
    fn from(network: DydxNetwork) -> Self {
        match network {
            DydxNetwork::Mainnet => Self::custom(
                network.as_ref(),
                DYDX_MAINNET_CHAIN_ID,
                DYDX_INDEXER_HTTP_URL,
                DYDX_INDEXER_WS_URL,
                DYDX_GRPC_URL,
                true,
                FEE_MINIMUM_MAINNET,
                FEE_DENOM_MAINNET,
                STAKE_DENOM_MAINNET,
                None,
            ),
            DydxNetwork::Testnet => Self::custom(
                network.as_ref(),
                DYDX_TESTNET_CHAIN_ID,
                DYDX_TESTNET_INDEXER_HTTP_URL,
                DYDX_TESTNET_INDEXER_WS_URL,
                DYDX_TESTNET_GRPC_URL,
                true,
                FEE_MINIMUM_TESTNET,
                FEE_DENOM_TESTNET,
                STAKE_DENOM_TESTNET,
                Some(DYDX_TESTNET_FAUCET_URL),
            ),
            // Localnet runs the mainnet chain ID and denoms against a local node
            DydxNetwork::Localnet => Self::custom(
                network.as_ref(),
                DYDX_MAINNET_CHAIN_ID,
                DYDX_LOCALNET_INDEXER_HTTP_URL,
                DYDX_LOCALNET_INDEXER_WS_URL,
                DYDX_LOCALNET_GRPC_URL,
                false,
                FEE_MINIMUM_MAINNET,
                FEE_DENOM_MAINNET,
                STAKE_DENOM_MAINNET,
                None,
            ),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        DydxNetwork::default().into()
    }
}

impl NetworkConfig {
    /// Creates a [`NetworkConfig`] for an arbitrary deployment.
    ///
    /// Trailing slashes are stripped from the REST and faucet endpoints and the validator
    /// host is prefixed with `grpc+https://` or `grpc+http://` depending on `ssl_enabled`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn custom(
        env: &str,
        chain_id: &str,
        indexer_http_url: &str,
        indexer_ws_url: &str,
        validator_host: &str,
        ssl_enabled: bool,
        fee_minimum_gas_price: u64,
        fee_denom: &str,
        stake_denom: &str,
        faucet_url: Option<&str>,
    ) -> Self {
        let scheme = if ssl_enabled { "grpc+https" } else { "grpc+http" };
        Self {
            env: env.to_string(),
            chain_id: chain_id.to_string(),
            indexer_http_url: indexer_http_url.trim_end_matches('/').to_string(),
            indexer_ws_url: indexer_ws_url.to_string(),
            validator_url: format!("{scheme}://{validator_host}"),
            fee_minimum_gas_price,
            fee_denom: fee_denom.to_string(),
            stake_denom: stake_denom.to_string(),
            faucet_url: faucet_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    /// Returns true if the validator connection uses TLS.
    #[must_use]
    pub fn ssl_enabled(&self) -> bool {
        self.validator_url.starts_with("grpc+https") || self.validator_url.starts_with("rest+https")
    }

    /// Validates the network configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DydxError::Config`] if the chain ID or validator URL is empty, or the
    /// validator URL does not start with one of [`VALIDATOR_URL_PREFIXES`].
    pub fn validate(&self) -> DydxResult<()> {
        if self.chain_id.is_empty() {
            return Err(DydxError::Config("Chain ID must be set".to_string()));
        }
        if self.validator_url.is_empty() {
            return Err(DydxError::Config("Validator URL must be set".to_string()));
        }
        if !VALIDATOR_URL_PREFIXES
            .iter()
            .any(|prefix| self.validator_url.starts_with(prefix))
        {
            return Err(DydxError::Config(format!(
                "Validator URL '{}' must start with one of {VALIDATOR_URL_PREFIXES:?}",
                self.validator_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    fn test_presets_are_valid() {
        for network in DydxNetwork::iter() {
            let config = NetworkConfig::from(network);
            assert!(config.validate().is_ok(), "{network}");
            assert_eq!(config.env, network.as_ref());
        }
    }

    #[rstest]
    fn test_mainnet_preset() {
        let config = NetworkConfig::from(DydxNetwork::Mainnet);
        assert_eq!(config.chain_id, "dydx-mainnet-1");
        assert_eq!(config.validator_url, "grpc+https://dydx-ops-grpc.kingnodes.com:443");
        assert!(config.ssl_enabled());
        assert!(config.faucet_url.is_none());
    }

    #[rstest]
    fn test_localnet_preset_is_plaintext() {
        let config = NetworkConfig::from(DydxNetwork::Localnet);
        assert_eq!(config.validator_url, "grpc+http://localhost:9090");
        assert!(!config.ssl_enabled());
    }

    #[rstest]
    fn test_custom_strips_trailing_slashes() {
        let config = NetworkConfig::custom(
            "customnet",
            "my-chain-1",
            "https://indexer.example.com/",
            "wss://indexer.example.com/v4/ws",
            "grpc.example.com:443",
            true,
            0,
            "adydx",
            "adydx",
            Some("https://faucet.example.com/"),
        );
        assert_eq!(config.indexer_http_url, "https://indexer.example.com");
        assert_eq!(config.faucet_url.as_deref(), Some("https://faucet.example.com"));
    }

    #[rstest]
    fn test_validate_rejects_unknown_scheme() {
        let mut config = NetworkConfig::default();
        config.validator_url = "https://grpc.example.com".to_string();
        assert!(matches!(config.validate(), Err(DydxError::Config(_))));
    }

    #[rstest]
    fn test_validate_rejects_empty_chain_id() {
        let mut config = NetworkConfig::default();
        config.chain_id.clear();
        assert!(matches!(config.validate(), Err(DydxError::Config(_))));
    }

    #[rstest]
    #[case("mainnet", DydxNetwork::Mainnet)]
    #[case("TESTNET", DydxNetwork::Testnet)]
    #[case("Localnet", DydxNetwork::Localnet)]
    fn test_network_from_str(#[case] input: &str, #[case] expected: DydxNetwork) {
        assert_eq!(input.parse::<DydxNetwork>().unwrap(), expected);
    }
}
