//! Response types for the relayer API.

use serde::Serialize;

/// Response from the publish endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    pub message: &'static str,
    pub signer_public_key: String,
    /// Present only when a signer was registered for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_private_key: Option<String>,
    pub message_hash: String,
}

/// Response from the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub hub: String,
    pub network: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
}
