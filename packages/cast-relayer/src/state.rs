//! Application state shared across handlers.

use crate::config::Config;
use crate::hub::{GrpcHubClient, HubClient};
use crate::key_registry::{KeyRegistry, OnchainKeyRegistry};
use crate::publisher::Publisher;
use crate::signer::SignerResolver;
use farcaster_types::FarcasterNetwork;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub network: FarcasterNetwork,
    pub publisher: Publisher,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state with the hub and OP Mainnet clients named in
    /// `config`. Must run inside a tokio runtime.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let hub = GrpcHubClient::connect_insecure(&config.hub_address)?;
        let registry = OnchainKeyRegistry::new(
            &config.op_provider_url,
            &config.key_gateway_address,
            config.chain_id,
        )?;
        info!(
            hub = %config.hub_address,
            gateway = %registry.gateway(),
            chain_id = registry.chain_id(),
            "Clients configured"
        );
        Self::with_clients(config, Arc::new(hub), Arc::new(registry))
    }

    /// Create application state over caller-provided clients.
    pub fn with_clients(
        config: Config,
        hub: Arc<dyn HubClient>,
        registry: Arc<dyn KeyRegistry>,
    ) -> Result<Self, crate::Error> {
        let network = config.farcaster_network()?;
        let resolver = SignerResolver::new(
            registry,
            config.chain_id,
            Duration::from_secs(config.hub_sync_delay_secs),
            Duration::from_secs(config.key_request_ttl_secs),
        );
        Ok(Self {
            publisher: Publisher::new(resolver, hub, network),
            network,
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}
