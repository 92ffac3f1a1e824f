//! Structural validation of cast bodies, matching what hubs enforce.

use crate::MessageError;
use crate::proto::cast_add_body::Parent;
use crate::proto::{CastAddBody, CastId, CastType, embed};

const MAX_CAST_TEXT_BYTES: usize = 320;
const MAX_LONG_CAST_TEXT_BYTES: usize = 1024;
const MAX_TEN_K_CAST_TEXT_BYTES: usize = 10_000;
const MAX_EMBEDS: usize = 2;
const MAX_MENTIONS: usize = 10;
const MAX_URL_BYTES: usize = 256;
const CAST_HASH_BYTES: usize = 20;

fn invalid(msg: impl Into<String>) -> MessageError {
    MessageError::InvalidBody(msg.into())
}

/// Validate a cast-add body. Lengths are UTF-8 byte lengths.
pub fn validate_cast_add_body(body: &CastAddBody) -> Result<(), MessageError> {
    let cast_type = CastType::try_from(body.r#type)
        .map_err(|_| invalid(format!("unknown cast type {}", body.r#type)))?;

    let text_len = body.text.len();
    match cast_type {
        CastType::Cast => {
            if text_len > MAX_CAST_TEXT_BYTES {
                return Err(invalid(format!("text > {MAX_CAST_TEXT_BYTES} bytes")));
            }
        }
        CastType::LongCast => {
            if text_len > MAX_LONG_CAST_TEXT_BYTES {
                return Err(invalid(format!(
                    "text > {MAX_LONG_CAST_TEXT_BYTES} bytes for long cast"
                )));
            }
            if text_len <= MAX_CAST_TEXT_BYTES {
                return Err(invalid("text too short for long cast"));
            }
        }
        CastType::TenKCast => {
            if text_len > MAX_TEN_K_CAST_TEXT_BYTES {
                return Err(invalid(format!(
                    "text > {MAX_TEN_K_CAST_TEXT_BYTES} bytes for 10k cast"
                )));
            }
            if text_len <= MAX_LONG_CAST_TEXT_BYTES {
                return Err(invalid("text too short for 10k cast"));
            }
        }
    }

    if !body.embeds.is_empty() && !body.embeds_deprecated.is_empty() {
        return Err(invalid("cannot use both embeds and string embeds"));
    }
    if body.embeds.len() > MAX_EMBEDS || body.embeds_deprecated.len() > MAX_EMBEDS {
        return Err(invalid(format!("embeds > {MAX_EMBEDS}")));
    }
    for embed in &body.embeds {
        match &embed.embed {
            Some(embed::Embed::Url(url)) => validate_url(url, "embed url")?,
            Some(embed::Embed::CastId(id)) => validate_cast_id(id)?,
            None => return Err(invalid("embed is empty")),
        }
    }
    for url in &body.embeds_deprecated {
        validate_url(url, "embed url")?;
    }

    match &body.parent {
        Some(Parent::ParentCastId(id)) => validate_cast_id(id)?,
        Some(Parent::ParentUrl(url)) => validate_url(url, "parent url")?,
        None => {}
    }

    validate_mentions(body, text_len)
}

fn validate_mentions(body: &CastAddBody, text_len: usize) -> Result<(), MessageError> {
    if body.mentions.len() > MAX_MENTIONS {
        return Err(invalid(format!("mentions > {MAX_MENTIONS}")));
    }
    if body.mentions.len() != body.mentions_positions.len() {
        return Err(invalid("mentions and mentions positions must match"));
    }
    if body.mentions.contains(&0) {
        return Err(invalid("mentioned fid must be non-zero"));
    }

    let mut previous = 0u32;
    for &position in &body.mentions_positions {
        if position as usize > text_len {
            return Err(invalid("mentions position must be within text"));
        }
        if position < previous {
            return Err(invalid("mentions positions must be ascending"));
        }
        previous = position;
    }
    Ok(())
}

fn validate_url(url: &str, what: &str) -> Result<(), MessageError> {
    if url.is_empty() {
        return Err(invalid(format!("{what} is missing")));
    }
    if url.len() > MAX_URL_BYTES {
        return Err(invalid(format!("{what} > {MAX_URL_BYTES} bytes")));
    }
    Ok(())
}

fn validate_cast_id(id: &CastId) -> Result<(), MessageError> {
    if id.fid == 0 {
        return Err(invalid("cast id fid is missing"));
    }
    if id.hash.len() != CAST_HASH_BYTES {
        return Err(invalid(format!("cast id hash must be {CAST_HASH_BYTES} bytes")));
    }
    Ok(())
}
