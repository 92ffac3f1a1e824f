//! Signed message construction.

use crate::proto::message_data::Body;
use crate::proto::{
    CastAddBody, FarcasterNetwork, HashScheme, Message, MessageData, MessageType, SignatureScheme,
};
use crate::{Ed25519Signer, MessageError, blake3_20, farcaster_time_now, validate_cast_add_body};
use prost::Message as _;

/// Envelope fields shared by every message a relayer builds.
#[derive(Debug, Clone, Copy)]
pub struct MessageDataOptions {
    pub fid: u64,
    pub network: FarcasterNetwork,
    /// Farcaster time override. `None` = now.
    pub timestamp: Option<u32>,
}

/// Build and sign a cast-add message.
///
/// Fails without side effects when the body, fid, network or clock is
/// invalid; the caller must inspect the result before submitting anything.
pub fn make_cast_add(
    body: CastAddBody,
    options: &MessageDataOptions,
    signer: &Ed25519Signer,
) -> Result<Message, MessageError> {
    if options.fid == 0 {
        return Err(MessageError::InvalidFid);
    }
    if options.network == FarcasterNetwork::None {
        return Err(MessageError::InvalidNetwork);
    }
    validate_cast_add_body(&body)?;

    let timestamp = match options.timestamp {
        Some(ts) => ts,
        None => farcaster_time_now()?,
    };

    let data = MessageData {
        r#type: MessageType::CastAdd as i32,
        fid: options.fid,
        timestamp,
        network: options.network as i32,
        body: Some(Body::CastAddBody(body)),
    };
    let data_bytes = data.encode_to_vec();
    let hash = blake3_20(&data_bytes);
    let signature = signer.sign_message_hash(&hash);

    Ok(Message {
        data: Some(data),
        hash: hash.to_vec(),
        hash_scheme: HashScheme::Blake3 as i32,
        signature: signature.to_vec(),
        signature_scheme: SignatureScheme::Ed25519 as i32,
        signer: signer.public_key().to_vec(),
        data_bytes: Some(data_bytes),
    })
}
