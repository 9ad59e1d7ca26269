//! Serialization for [`Edge`] types.
//!
//! # Format
//!
//! An edge is encoded as:
//! - 1 byte format version
//! - 8 bytes edge ID (big-endian u64)
//! - 8 bytes source vertex ID (big-endian u64)
//! - 8 bytes target vertex ID (big-endian u64)
//! - 1 byte weight flag + 8 bytes weight (IEEE 754 f64) when present

use crate::error::CoreError;
use crate::types::{Edge, EdgeId, VertexId};

use super::traits::{Decoder, Encoder, FORMAT_VERSION};

impl Encoder for Edge {
    fn encode(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf)?;
        Ok(buf)
    }

    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&self.id.as_u64().to_be_bytes());
        buf.extend_from_slice(&self.source.as_u64().to_be_bytes());
        buf.extend_from_slice(&self.target.as_u64().to_be_bytes());

        match self.weight {
            Some(w) => {
                buf.push(1);
                buf.extend_from_slice(&w.to_be_bytes());
            }
            None => buf.push(0),
        }

        Ok(())
    }
}

impl Decoder for Edge {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::Encoding("unexpected end of input".to_owned()));
        }

        let version = bytes[0];
        if version != FORMAT_VERSION {
            return Err(CoreError::Encoding(format!(
                "unsupported format version: {version}, expected {FORMAT_VERSION}"
            )));
        }

        if bytes.len() < 26 {
            return Err(CoreError::Encoding("unexpected end of input".to_owned()));
        }

        let id_bytes: [u8; 8] = bytes[1..9]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read edge ID".to_owned()))?;
        let source_bytes: [u8; 8] = bytes[9..17]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read source ID".to_owned()))?;
        let target_bytes: [u8; 8] = bytes[17..25]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read target ID".to_owned()))?;

        let weight = match bytes[25] {
            0 => None,
            1 => {
                if bytes.len() < 34 {
                    return Err(CoreError::Encoding("unexpected end of input".to_owned()));
                }
                let weight_bytes: [u8; 8] = bytes[26..34]
                    .try_into()
                    .map_err(|_| CoreError::Encoding("failed to read weight".to_owned()))?;
                Some(f64::from_be_bytes(weight_bytes))
            }
            flag => {
                return Err(CoreError::Encoding(format!("invalid weight flag: {flag}")));
            }
        };

        Ok(Self {
            id: EdgeId::new(u64::from_be_bytes(id_bytes)),
            source: VertexId::new(u64::from_be_bytes(source_bytes)),
            target: VertexId::new(u64::from_be_bytes(target_bytes)),
            weight,
        })
    }
}
