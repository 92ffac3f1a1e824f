//! Custody account derivation and signed key-request metadata.
//!
//! The key gateway only accepts a new signer key when it comes with an EIP-712
//! `SignedKeyRequest` signed by the custody address of the requesting fid.

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use alloy::signers::SignerSync;
use alloy::sol;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct, SolValue};

/// `SignedKeyRequestValidator` on OP Mainnet.
pub const SIGNED_KEY_REQUEST_VALIDATOR: Address =
    address!("00000000fc700472606ed4fa22623acf62c60553");

sol! {
    #[derive(Debug)]
    struct SignedKeyRequest {
        uint256 requestFid;
        bytes key;
        uint256 deadline;
    }

    #[derive(Debug)]
    struct SignedKeyRequestMetadata {
        uint256 requestFid;
        address requestSigner;
        bytes signature;
        uint256 deadline;
    }
}

/// Derive the custody account from a BIP-39 phrase at `m/44'/60'/0'/0/0`.
pub fn custody_account(mnemonic: &str) -> Result<PrivateKeySigner, crate::Error> {
    MnemonicBuilder::<English>::default()
        .phrase(mnemonic.trim())
        .index(0)
        .and_then(|builder| builder.build())
        .map_err(|e| crate::Error::InvalidRequest(format!("cannot derive custody account: {e}")))
}

pub fn validator_domain(chain_id: u64) -> Eip712Domain {
    eip712_domain! {
        name: "Farcaster SignedKeyRequestValidator",
        version: "1",
        chain_id: chain_id,
        verifying_contract: SIGNED_KEY_REQUEST_VALIDATOR,
    }
}

/// ABI-encoded `SignedKeyRequestMetadata` authorizing `key` for `fid` until
/// `deadline` (Unix seconds).
pub fn signed_key_request_metadata(
    custody: &PrivateKeySigner,
    fid: u64,
    key: &[u8; 32],
    deadline: u64,
    chain_id: u64,
) -> Result<Bytes, crate::Error> {
    let request = SignedKeyRequest {
        requestFid: U256::from(fid),
        key: Bytes::copy_from_slice(key),
        deadline: U256::from(deadline),
    };
    let hash = request.eip712_signing_hash(&validator_domain(chain_id));
    let signature = custody
        .sign_hash_sync(&hash)
        .map_err(|e| crate::Error::Chain(format!("signing key request metadata: {e}")))?;

    let metadata = SignedKeyRequestMetadata {
        requestFid: request.requestFid,
        requestSigner: custody.address(),
        signature: Bytes::copy_from_slice(&signature.as_bytes()),
        deadline: request.deadline,
    };
    Ok(metadata.abi_encode().into())
}
