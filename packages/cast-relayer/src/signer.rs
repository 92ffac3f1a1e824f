//! Signer resolution: use a caller-supplied Ed25519 key, or provision a new
//! one on-chain from the caller's custody mnemonic.

use crate::key_registry::{AddKeyRequest, KeyRegistry};
use crate::key_request::{custody_account, signed_key_request_metadata};
use crate::metrics::METRICS;
use ed25519_dalek::SigningKey;
use farcaster_types::Ed25519Signer;
use rand::rngs::OsRng;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

/// Caller-supplied signing material. Empty strings count as absent.
#[derive(Clone, Default)]
pub struct SigningMaterial {
    /// `0x`-prefixed hex of a 32-byte Ed25519 private key.
    pub signer_private_key: Option<String>,
    /// Recovery phrase of the fid's custody account.
    pub mnemonic: Option<String>,
}

impl SigningMaterial {
    pub fn private_key(key: impl Into<String>) -> Self {
        Self {
            signer_private_key: Some(key.into()),
            mnemonic: None,
        }
    }

    pub fn mnemonic(phrase: impl Into<String>) -> Self {
        Self {
            signer_private_key: None,
            mnemonic: Some(phrase.into()),
        }
    }

    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }
}

impl std::fmt::Debug for SigningMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningMaterial")
            .field("signer_private_key", &self.signer_private_key.as_ref().map(|_| "<redacted>"))
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A usable signer and whether it was registered during this request.
#[derive(Debug, Clone)]
pub struct ResolvedSigner {
    pub signer: Ed25519Signer,
    pub provisioned: bool,
}

/// Parse a `0x`-prefixed (or bare) hex Ed25519 private key.
pub fn parse_private_key(hex_key: &str) -> Result<Ed25519Signer, crate::Error> {
    let stripped = hex_key.strip_prefix("0x").unwrap_or(hex_key);
    let bytes = hex::decode(stripped)
        .map_err(|e| crate::Error::InvalidRequest(format!("signerPrivateKey is not hex: {e}")))?;
    Ed25519Signer::from_bytes(&bytes)
        .map_err(|e| crate::Error::InvalidRequest(format!("signerPrivateKey: {e}")))
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Resolves signing material into an Ed25519 signer.
pub struct SignerResolver {
    registry: Arc<dyn KeyRegistry>,
    chain_id: u64,
    hub_sync_delay: Duration,
    key_request_ttl: Duration,
}

impl SignerResolver {
    pub fn new(
        registry: Arc<dyn KeyRegistry>,
        chain_id: u64,
        hub_sync_delay: Duration,
        key_request_ttl: Duration,
    ) -> Self {
        Self {
            registry,
            chain_id,
            hub_sync_delay,
            key_request_ttl,
        }
    }

    /// A supplied private key wins and never touches the network. Otherwise a
    /// new key is registered with the mnemonic's custody account.
    pub async fn resolve(
        &self,
        fid: u64,
        material: &SigningMaterial,
    ) -> Result<ResolvedSigner, crate::Error> {
        if let Some(hex_key) = SigningMaterial::present(&material.signer_private_key) {
            let signer = parse_private_key(hex_key)?;
            info!(public_key = %to_hex(&signer.public_key()), "Using existing signer");
            return Ok(ResolvedSigner {
                signer,
                provisioned: false,
            });
        }

        let Some(mnemonic) = SigningMaterial::present(&material.mnemonic) else {
            return Err(crate::Error::Configuration(
                "Either signerPrivateKey or mnemonic must be provided".into(),
            ));
        };

        let signer = self.provision(fid, mnemonic).await?;
        Ok(ResolvedSigner {
            signer,
            provisioned: true,
        })
    }

    /// Generate a key, register it through the key gateway, then give hubs
    /// time to index the on-chain event.
    async fn provision(&self, fid: u64, mnemonic: &str) -> Result<Ed25519Signer, crate::Error> {
        let custody = custody_account(mnemonic)?;

        let signer = Ed25519Signer::new(SigningKey::generate(&mut OsRng));
        let public_key = signer.public_key();
        info!(
            fid,
            custody = %custody.address(),
            public_key = %to_hex(&public_key),
            "Created new signer"
        );

        let deadline = unix_now()? + self.key_request_ttl.as_secs();
        let metadata =
            signed_key_request_metadata(&custody, fid, &public_key, deadline, self.chain_id)?;
        let request = AddKeyRequest {
            key: public_key,
            metadata,
        };

        let tx = self.registry.simulate_add(&custody, &request).await?;
        let tx_hash = self.registry.broadcast(&custody, tx).await?;
        info!(tx_hash = %tx_hash, "Waiting for signer add tx to confirm");
        self.registry.wait_for_receipt(tx_hash).await?;
        METRICS.signers_provisioned.fetch_add(1, Ordering::Relaxed);
        info!(public_key = %to_hex(&public_key), "Registered new signer");

        info!(
            delay_secs = self.hub_sync_delay.as_secs(),
            "Sleeping to allow hubs to pick up the signer tx"
        );
        tokio::time::sleep(self.hub_sync_delay).await;

        Ok(signer)
    }
}

fn unix_now() -> Result<u64, crate::Error> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| crate::Error::Chain(format!("system clock: {e}")))
}
