//! Protobuf messages accepted by hubs.
//!
//! Field tags mirror the hub's `message.proto`; only the cast-add subset is
//! modelled. Encoding goes through `prost`, so the bytes hashed and signed here
//! are the bytes a hub decodes.

/// Type of a message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MessageType {
    None = 0,
    CastAdd = 1,
    CastRemove = 2,
}

/// Deployment a message targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FarcasterNetwork {
    None = 0,
    Mainnet = 1,
    Testnet = 2,
    Devnet = 3,
}

impl FarcasterNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

impl std::str::FromStr for FarcasterNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(format!("unknown network '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum HashScheme {
    None = 0,
    Blake3 = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SignatureScheme {
    None = 0,
    Ed25519 = 1,
    Eip712 = 2,
}

/// Cast length class. Each class has its own text byte limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum CastType {
    Cast = 0,
    LongCast = 1,
    TenKCast = 2,
}

/// Reference to an existing cast.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CastId {
    #[prost(uint64, tag = "1")]
    pub fid: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Embed {
    #[prost(oneof = "embed::Embed", tags = "1, 2")]
    pub embed: Option<embed::Embed>,
}

pub mod embed {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Embed {
        #[prost(string, tag = "1")]
        Url(String),
        #[prost(message, tag = "2")]
        CastId(super::CastId),
    }
}

/// Body of a cast-add message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CastAddBody {
    #[prost(string, repeated, tag = "1")]
    pub embeds_deprecated: Vec<String>,
    #[prost(uint64, repeated, tag = "2")]
    pub mentions: Vec<u64>,
    #[prost(string, tag = "4")]
    pub text: String,
    #[prost(uint32, repeated, tag = "5")]
    pub mentions_positions: Vec<u32>,
    #[prost(message, repeated, tag = "6")]
    pub embeds: Vec<Embed>,
    #[prost(enumeration = "CastType", tag = "8")]
    pub r#type: i32,
    #[prost(oneof = "cast_add_body::Parent", tags = "3, 7")]
    pub parent: Option<cast_add_body::Parent>,
}

pub mod cast_add_body {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Parent {
        #[prost(message, tag = "3")]
        ParentCastId(super::CastId),
        #[prost(string, tag = "7")]
        ParentUrl(String),
    }
}

/// The signed part of a message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MessageData {
    #[prost(enumeration = "MessageType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub fid: u64,
    /// Farcaster time (seconds since 2021-01-01).
    #[prost(uint32, tag = "3")]
    pub timestamp: u32,
    #[prost(enumeration = "FarcasterNetwork", tag = "4")]
    pub network: i32,
    #[prost(oneof = "message_data::Body", tags = "5")]
    pub body: Option<message_data::Body>,
}

pub mod message_data {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "5")]
        CastAddBody(super::CastAddBody),
    }
}

/// Envelope submitted to a hub.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Message {
    #[prost(message, optional, tag = "1")]
    pub data: Option<MessageData>,
    /// BLAKE3 of `data_bytes`, truncated to 20 bytes.
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
    #[prost(enumeration = "HashScheme", tag = "3")]
    pub hash_scheme: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub signature: Vec<u8>,
    #[prost(enumeration = "SignatureScheme", tag = "5")]
    pub signature_scheme: i32,
    /// Ed25519 public key of the signer.
    #[prost(bytes = "vec", tag = "6")]
    pub signer: Vec<u8>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub data_bytes: Option<Vec<u8>>,
}
