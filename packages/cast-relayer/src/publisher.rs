//! Cast publishing: resolve a signer, build the signed message, submit it.

use crate::hub::HubClient;
use crate::signer::{SignerResolver, SigningMaterial};
use farcaster_types::{
    make_cast_add, validate_cast_add_body, CastAddBody, FarcasterNetwork, MessageDataOptions,
};
use std::sync::Arc;
use tracing::info;

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub signer_public_key: [u8; 32],
    /// Set only when the key was registered during this request.
    pub signer_private_key: Option<[u8; 32]>,
    pub message_hash: Vec<u8>,
}

pub struct Publisher {
    resolver: SignerResolver,
    hub: Arc<dyn HubClient>,
    network: FarcasterNetwork,
}

impl Publisher {
    pub fn new(resolver: SignerResolver, hub: Arc<dyn HubClient>, network: FarcasterNetwork) -> Self {
        Self {
            resolver,
            hub,
            network,
        }
    }

    pub fn hub(&self) -> &dyn HubClient {
        self.hub.as_ref()
    }

    pub async fn publish_cast(
        &self,
        body: CastAddBody,
        fid: u64,
        material: &SigningMaterial,
    ) -> Result<PublishOutcome, crate::Error> {
        // Reject bad content before a mnemonic request registers a key on-chain.
        if fid == 0 {
            return Err(crate::Error::MessageConstruction(
                farcaster_types::MessageError::InvalidFid.to_string(),
            ));
        }
        validate_cast_add_body(&body)
            .map_err(|e| crate::Error::MessageConstruction(e.to_string()))?;

        let resolved = self.resolver.resolve(fid, material).await?;

        let options = MessageDataOptions {
            fid,
            network: self.network,
            timestamp: None,
        };
        let message = make_cast_add(body, &options, &resolved.signer)
            .map_err(|e| crate::Error::MessageConstruction(e.to_string()))?;
        let message_hash = message.hash.clone();

        self.hub.submit_message(message).await?;
        info!(
            fid,
            hash = %crate::signer::to_hex(&message_hash),
            "Cast published"
        );

        Ok(PublishOutcome {
            signer_public_key: resolved.signer.public_key(),
            signer_private_key: resolved.provisioned.then(|| resolved.signer.private_key()),
            message_hash,
        })
    }
}
