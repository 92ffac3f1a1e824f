/// Message construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    InvalidFid,
    InvalidNetwork,
    InvalidBody(String),
    InvalidTimestamp(String),
    InvalidSigner(String),
    SignatureInvalid,
    HashMismatch,
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFid => write!(f, "fid is missing or zero"),
            Self::InvalidNetwork => write!(f, "network is missing"),
            Self::InvalidBody(msg) => write!(f, "invalid cast body: {msg}"),
            Self::InvalidTimestamp(msg) => write!(f, "invalid timestamp: {msg}"),
            Self::InvalidSigner(msg) => write!(f, "invalid signer: {msg}"),
            Self::SignatureInvalid => write!(f, "invalid ed25519 signature"),
            Self::HashMismatch => write!(f, "message hash does not match data"),
        }
    }
}

impl std::error::Error for MessageError {}
