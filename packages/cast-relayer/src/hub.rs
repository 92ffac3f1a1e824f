//! Hub RPC client.
//!
//! Hubs expose `HubService` over plaintext gRPC. Only `SubmitMessage` is used,
//! so the call is issued through tonic's generic client with a prost codec
//! instead of generated stubs.

use async_trait::async_trait;
use farcaster_types::Message;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

const SUBMIT_MESSAGE_PATH: &str = "/HubService/SubmitMessage";

/// Message submission to a hub.
#[async_trait]
pub trait HubClient: Send + Sync {
    /// Submit a signed message. Returns the hub's echo of the merged message.
    async fn submit_message(&self, message: Message) -> Result<Message, crate::Error>;

    /// Endpoint, for health reporting.
    fn address(&self) -> &str;
}

/// Insecure (non-TLS) gRPC hub client over a lazily connected channel.
pub struct GrpcHubClient {
    channel: Channel,
    address: String,
}

impl GrpcHubClient {
    /// `address` is `host:port`. Must be called inside a tokio runtime; no
    /// connection is made until the first submit.
    pub fn connect_insecure(address: &str) -> Result<Self, crate::Error> {
        let endpoint = Endpoint::from_shared(format!("http://{address}"))
            .map_err(|e| crate::Error::Startup(format!("invalid hub address {address}: {e}")))?;
        Ok(Self {
            channel: endpoint.connect_lazy(),
            address: address.to_string(),
        })
    }
}

#[async_trait]
impl HubClient for GrpcHubClient {
    async fn submit_message(&self, message: Message) -> Result<Message, crate::Error> {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready().await.map_err(|e| {
            crate::Error::Submission(format!("hub {} not ready: {e}", self.address))
        })?;

        debug!(hub = %self.address, "Submitting message");
        let codec: ProstCodec<Message, Message> = ProstCodec::default();
        let response = grpc
            .unary(
                tonic::Request::new(message),
                PathAndQuery::from_static(SUBMIT_MESSAGE_PATH),
                codec,
            )
            .await
            .map_err(|status| {
                crate::Error::Submission(format!("{:?}: {}", status.code(), status.message()))
            })?;

        Ok(response.into_inner())
    }

    fn address(&self) -> &str {
        &self.address
    }
}
