//! Ed25519 message signer and BLAKE3 message hashing.

use crate::MessageError;
use crate::proto::{HashScheme, Message, SignatureScheme};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use prost::Message as _;

const MESSAGE_HASH_BYTES: usize = 20;

/// BLAKE3 digest truncated to 20 bytes, the hub's message hash.
pub fn blake3_20(data: &[u8]) -> [u8; MESSAGE_HASH_BYTES] {
    let digest = blake3::hash(data);
    let mut out = [0u8; MESSAGE_HASH_BYTES];
    out.copy_from_slice(&digest.as_bytes()[..MESSAGE_HASH_BYTES]);
    out
}

/// Signs message hashes with a raw Ed25519 private key.
#[derive(Clone)]
pub struct Ed25519Signer {
    key: SigningKey,
}

impl Ed25519Signer {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Accepts exactly 32 secret-key bytes.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, MessageError> {
        let bytes: [u8; 32] = secret.try_into().map_err(|_| {
            MessageError::InvalidSigner(format!(
                "ed25519 private key must be 32 bytes, got {}",
                secret.len()
            ))
        })?;
        Ok(Self::new(SigningKey::from_bytes(&bytes)))
    }

    pub fn private_key(&self) -> [u8; 32] {
        self.key.to_bytes()
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    pub fn sign_message_hash(&self, hash: &[u8]) -> [u8; 64] {
        self.key.sign(hash).to_bytes()
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signer(0x")?;
        for b in self.public_key() {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

/// Check a message the way a hub does: hash over `data_bytes` (or the
/// re-encoded `data`), then the Ed25519 signature over that hash.
pub fn verify_message(message: &Message) -> Result<(), MessageError> {
    if message.hash_scheme != HashScheme::Blake3 as i32 {
        return Err(MessageError::HashMismatch);
    }
    if message.signature_scheme != SignatureScheme::Ed25519 as i32 {
        return Err(MessageError::SignatureInvalid);
    }

    let data_bytes = match (&message.data_bytes, &message.data) {
        (Some(bytes), _) => bytes.clone(),
        (None, Some(data)) => data.encode_to_vec(),
        (None, None) => return Err(MessageError::HashMismatch),
    };
    if blake3_20(&data_bytes).as_slice() != message.hash.as_slice() {
        return Err(MessageError::HashMismatch);
    }

    let pk: [u8; 32] = message
        .signer
        .as_slice()
        .try_into()
        .map_err(|_| MessageError::InvalidSigner("signer must be 32 bytes".into()))?;
    let verifying_key = VerifyingKey::from_bytes(&pk)
        .map_err(|e| MessageError::InvalidSigner(format!("bad signer key: {e}")))?;
    let signature =
        Signature::from_slice(&message.signature).map_err(|_| MessageError::SignatureInvalid)?;
    verifying_key
        .verify(&message.hash, &signature)
        .map_err(|_| MessageError::SignatureInvalid)
}
