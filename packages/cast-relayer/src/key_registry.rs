//! Key gateway client: simulate, broadcast and confirm `add` transactions.

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// `keyType` for Ed25519 signer keys.
pub const KEY_TYPE_ED25519: u32 = 1;
/// `metadataType` for `SignedKeyRequestMetadata`.
pub const METADATA_TYPE_SIGNED_KEY_REQUEST: u8 = 1;

sol! {
    #[sol(rpc)]
    contract KeyGateway {
        function add(uint32 keyType, bytes calldata key, uint8 metadataType, bytes calldata metadata) external payable;
    }
}

/// Arguments of a `KeyGateway.add` call.
#[derive(Debug, Clone)]
pub struct AddKeyRequest {
    pub key: [u8; 32],
    pub metadata: Bytes,
}

/// On-chain key registration, one step per network round trip.
#[async_trait]
pub trait KeyRegistry: Send + Sync {
    /// Dry-run `add` as `custody`. Returns the validated transaction request.
    async fn simulate_add(
        &self,
        custody: &PrivateKeySigner,
        request: &AddKeyRequest,
    ) -> Result<TransactionRequest, crate::Error>;

    /// Sign the simulated request with `custody` and broadcast it.
    async fn broadcast(
        &self,
        custody: &PrivateKeySigner,
        tx: TransactionRequest,
    ) -> Result<TxHash, crate::Error>;

    /// Block until the transaction is mined. No deadline.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<(), crate::Error>;
}

/// Immutable chain descriptor for the key gateway.
#[derive(Debug, Clone)]
pub struct OnchainKeyRegistry {
    rpc_url: Url,
    gateway: Address,
    chain_id: u64,
}

impl OnchainKeyRegistry {
    pub fn new(rpc_url: &str, gateway: &str, chain_id: u64) -> Result<Self, crate::Error> {
        let rpc_url = rpc_url
            .parse()
            .map_err(|e| crate::Error::Startup(format!("invalid OP provider URL: {e}")))?;
        let gateway = gateway
            .parse()
            .map_err(|e| crate::Error::Startup(format!("invalid key gateway address: {e}")))?;
        Ok(Self {
            rpc_url,
            gateway,
            chain_id,
        })
    }

    pub fn gateway(&self) -> Address {
        self.gateway
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[async_trait]
impl KeyRegistry for OnchainKeyRegistry {
    async fn simulate_add(
        &self,
        custody: &PrivateKeySigner,
        request: &AddKeyRequest,
    ) -> Result<TransactionRequest, crate::Error> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let gateway = KeyGateway::new(self.gateway, &provider);
        let call = gateway
            .add(
                KEY_TYPE_ED25519,
                Bytes::copy_from_slice(&request.key),
                METADATA_TYPE_SIGNED_KEY_REQUEST,
                request.metadata.clone(),
            )
            .from(custody.address());

        call.call()
            .await
            .map_err(|e| crate::Error::Chain(format!("simulating KeyGateway.add: {e}")))?;
        debug!(custody = %custody.address(), "KeyGateway.add simulation ok");

        Ok(call.into_transaction_request().with_chain_id(self.chain_id))
    }

    async fn broadcast(
        &self,
        custody: &PrivateKeySigner,
        tx: TransactionRequest,
    ) -> Result<TxHash, crate::Error> {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(custody.clone()))
            .connect_http(self.rpc_url.clone());
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| crate::Error::Chain(format!("broadcasting KeyGateway.add: {e}")))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<(), crate::Error> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let receipt = PendingTransactionBuilder::new(provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| crate::Error::Chain(format!("waiting for {tx_hash}: {e}")))?;
        if !receipt.status() {
            return Err(crate::Error::Chain(format!(
                "KeyGateway.add {tx_hash} reverted"
            )));
        }
        Ok(())
    }
}
