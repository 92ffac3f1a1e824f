//! Relayer configuration.

use farcaster_types::FarcasterNetwork;
use serde::Deserialize;

/// Configuration for the cast relayer.
///
/// Loaded once at startup from `relayer.toml` and `RELAYER_*` env vars;
/// every field falls back to a default.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Hub gRPC endpoint, `host:port`. Plaintext.
    #[serde(default = "defaults::hub_address")]
    pub hub_address: String,

    #[serde(default = "defaults::network")]
    pub network: String,

    /// OP Mainnet JSON-RPC provider.
    #[serde(default = "defaults::op_provider_url")]
    pub op_provider_url: String,

    #[serde(default = "defaults::chain_id")]
    pub chain_id: u64,

    #[serde(default = "defaults::key_gateway_address")]
    pub key_gateway_address: String,

    /// Wait after an on-chain key add before the key is used.
    #[serde(default = "defaults::hub_sync_delay_secs")]
    pub hub_sync_delay_secs: u64,

    /// Lifetime of a signed key request.
    #[serde(default = "defaults::key_request_ttl_secs")]
    pub key_request_ttl_secs: u64,

    /// `None` = dev mode, publish routes are unauthenticated.
    #[serde(default = "defaults::api_key")]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            hub_address: defaults::hub_address(),
            network: defaults::network(),
            op_provider_url: defaults::op_provider_url(),
            chain_id: defaults::chain_id(),
            key_gateway_address: defaults::key_gateway_address(),
            hub_sync_delay_secs: defaults::hub_sync_delay_secs(),
            key_request_ttl_secs: defaults::key_request_ttl_secs(),
            api_key: defaults::api_key(),
        }
    }
}

impl Config {
    /// Load from `relayer.toml` (optional) and `RELAYER_*` env vars.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from(config::Environment::with_prefix("RELAYER"))
    }

    /// Load from `relayer.toml` (optional) and the given environment source.
    /// Empty values count as unset, so `RELAYER_API_KEY=` keeps dev mode.
    pub fn load_from(environment: config::Environment) -> Result<Self, crate::Error> {
        let mut config: Self = config::Config::builder()
            .add_source(config::File::with_name("relayer").required(false))
            .add_source(environment.ignore_empty(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::Startup(format!("config: {e}")))?;
        config.api_key = config.api_key.filter(|k| !k.is_empty());
        Ok(config)
    }

    pub fn farcaster_network(&self) -> Result<FarcasterNetwork, crate::Error> {
        self.network.parse().map_err(crate::Error::Startup)
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3000".into()
    }

    pub fn hub_address() -> String {
        "34.172.154.21:2283".into()
    }

    pub fn network() -> String {
        "mainnet".into()
    }

    pub fn op_provider_url() -> String {
        // Priority: RELAYER_OP_PROVIDER_URL (via config) > OP_PROVIDER_URL > public endpoint
        match std::env::var("OP_PROVIDER_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => "https://mainnet.optimism.io".into(),
        }
    }

    pub fn chain_id() -> u64 {
        10
    }

    pub fn key_gateway_address() -> String {
        "0x00000000fC56947c7E7183f8Ca4B62398CaAdf0B".into()
    }

    pub fn hub_sync_delay_secs() -> u64 {
        30
    }

    pub fn key_request_ttl_secs() -> u64 {
        60 * 60
    }

    pub fn api_key() -> Option<String> {
        std::env::var("RELAYER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    }
}
