//! Farcaster time: seconds since 2021-01-01T00:00:00Z.

use crate::MessageError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Farcaster epoch in Unix milliseconds.
pub const FARCASTER_EPOCH_MS: u64 = 1_609_459_200_000;

/// Convert a Unix timestamp (ms) to Farcaster time (s).
pub fn to_farcaster_time(unix_ms: u64) -> Result<u32, MessageError> {
    let since_epoch = unix_ms.checked_sub(FARCASTER_EPOCH_MS).ok_or_else(|| {
        MessageError::InvalidTimestamp(format!("{unix_ms} is before the Farcaster epoch"))
    })?;
    u32::try_from(since_epoch / 1000)
        .map_err(|_| MessageError::InvalidTimestamp(format!("{unix_ms} overflows u32 seconds")))
}

/// Current Farcaster time.
pub fn farcaster_time_now() -> Result<u32, MessageError> {
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| MessageError::InvalidTimestamp(format!("system clock: {e}")))?
        .as_millis();
    let unix_ms = u64::try_from(unix_ms)
        .map_err(|_| MessageError::InvalidTimestamp("system clock overflow".into()))?;
    to_farcaster_time(unix_ms)
}
