//! Request payloads for the publish endpoint.

use crate::signer::SigningMaterial;
use farcaster_types::proto::{cast_add_body, embed};
use farcaster_types::{CastAddBody, CastId, CastType, Embed};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub data: CastAddBodyJson,
    pub fid: u64,
    #[serde(default)]
    pub signer_private_key: Option<String>,
    #[serde(default)]
    pub mnemonic: Option<String>,
}

impl PublishRequest {
    pub fn signing_material(&self) -> SigningMaterial {
        SigningMaterial {
            signer_private_key: self.signer_private_key.clone(),
            mnemonic: self.mnemonic.clone(),
        }
    }
}

/// JSON form of a cast body. Hashes are `0x` hex.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastAddBodyJson {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub embeds: Vec<EmbedJson>,
    #[serde(default)]
    pub embeds_deprecated: Vec<String>,
    #[serde(default)]
    pub mentions: Vec<u64>,
    #[serde(default)]
    pub mentions_positions: Vec<u32>,
    #[serde(default)]
    pub parent_cast_id: Option<CastIdJson>,
    #[serde(default)]
    pub parent_url: Option<String>,
    #[serde(default, rename = "type")]
    pub cast_type: Option<CastTypeJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastIdJson {
    pub fid: u64,
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedJson {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub cast_id: Option<CastIdJson>,
}

/// Cast type by protocol number or by name (`CAST`, `LONG_CAST`, `TEN_K_CAST`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CastTypeJson {
    Number(i32),
    Name(String),
}

impl TryFrom<CastIdJson> for CastId {
    type Error = crate::Error;

    fn try_from(value: CastIdJson) -> Result<Self, Self::Error> {
        let stripped = value.hash.strip_prefix("0x").unwrap_or(&value.hash);
        let hash = hex::decode(stripped).map_err(|e| {
            crate::Error::InvalidRequest(format!("cast id hash is not hex: {e}"))
        })?;
        Ok(CastId {
            fid: value.fid,
            hash,
        })
    }
}

impl TryFrom<EmbedJson> for Embed {
    type Error = crate::Error;

    fn try_from(value: EmbedJson) -> Result<Self, Self::Error> {
        let embed = match (value.url, value.cast_id) {
            (Some(url), None) => Some(embed::Embed::Url(url)),
            (None, Some(cast_id)) => Some(embed::Embed::CastId(cast_id.try_into()?)),
            (None, None) => None,
            (Some(_), Some(_)) => {
                return Err(crate::Error::MessageConstruction(
                    "embed cannot have both url and castId".into(),
                ))
            }
        };
        Ok(Embed { embed })
    }
}

impl TryFrom<CastTypeJson> for CastType {
    type Error = crate::Error;

    fn try_from(value: CastTypeJson) -> Result<Self, Self::Error> {
        match value {
            CastTypeJson::Number(n) => CastType::try_from(n)
                .map_err(|_| crate::Error::InvalidRequest(format!("unknown cast type {n}"))),
            CastTypeJson::Name(name) => match name.as_str() {
                "CAST" => Ok(CastType::Cast),
                "LONG_CAST" => Ok(CastType::LongCast),
                "TEN_K_CAST" => Ok(CastType::TenKCast),
                other => Err(crate::Error::InvalidRequest(format!(
                    "unknown cast type {other}"
                ))),
            },
        }
    }
}

impl TryFrom<CastAddBodyJson> for CastAddBody {
    type Error = crate::Error;

    fn try_from(value: CastAddBodyJson) -> Result<Self, Self::Error> {
        let parent = match (value.parent_cast_id, value.parent_url) {
            (Some(_), Some(_)) => {
                return Err(crate::Error::MessageConstruction(
                    "cast cannot have both parentCastId and parentUrl".into(),
                ))
            }
            (Some(cast_id), None) => Some(cast_add_body::Parent::ParentCastId(cast_id.try_into()?)),
            (None, Some(url)) => Some(cast_add_body::Parent::ParentUrl(url)),
            (None, None) => None,
        };

        let embeds = value
            .embeds
            .into_iter()
            .map(Embed::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let cast_type = match value.cast_type {
            Some(t) => CastType::try_from(t)?,
            None => CastType::Cast,
        };

        Ok(CastAddBody {
            embeds_deprecated: value.embeds_deprecated,
            mentions: value.mentions,
            text: value.text,
            mentions_positions: value.mentions_positions,
            embeds,
            r#type: cast_type as i32,
            parent,
        })
    }
}
