//! # Cast Relayer
//!
//! Publishes casts to a Farcaster hub on behalf of a user. The caller
//! supplies either an existing Ed25519 signer key or the custody mnemonic of
//! the fid, in which case a new signer key is registered on OP Mainnet first.
//!
//! ## Endpoints
//! - `POST /` and `POST /casts` - Build, sign and submit a cast
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod config;
mod error;
mod handlers;
pub mod hub;
pub mod key_registry;
pub mod key_request;
pub mod metrics;
mod middleware;
pub mod publisher;
mod response;
mod router;
pub mod schemas;
pub mod signer;
mod state;

pub use config::Config;
pub use error::Error;
pub use publisher::{PublishOutcome, Publisher};
pub use router::create as create_router;
pub use signer::{SignerResolver, SigningMaterial};
pub use state::AppState;
