//! Farcaster message types and pure-logic message construction.
//! No I/O, usable from the relayer service and from tests alike.

mod builder;
mod crypto;
mod error;
pub mod proto;
mod time;
mod validate;

pub use builder::{MessageDataOptions, make_cast_add};
pub use crypto::{Ed25519Signer, blake3_20, verify_message};
pub use error::MessageError;
pub use proto::{
    CastAddBody, CastId, CastType, Embed, FarcasterNetwork, HashScheme, Message, MessageData,
    MessageType, SignatureScheme,
};
pub use time::{FARCASTER_EPOCH_MS, farcaster_time_now, to_farcaster_time};
pub use validate::validate_cast_add_body;
