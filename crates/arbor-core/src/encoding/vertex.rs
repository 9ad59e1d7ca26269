//! Serialization for [`Vertex`] types.
//!
//! # Format
//!
//! A vertex is encoded as:
//! - 1 byte format version
//! - 8 bytes internal vertex ID (big-endian u64)
//! - 8 bytes external vertex identifier (big-endian u64)
//! - 4 bytes property count
//! - For each property: 4 bytes key length + key bytes + encoded value

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::{Vertex, VertexId};

use super::traits::{Decoder, Encoder, FORMAT_VERSION};
use super::value::decode_value;

impl Encoder for Vertex {
    fn encode(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf)?;
        Ok(buf)
    }

    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&self.id.as_u64().to_be_bytes());
        buf.extend_from_slice(&self.vid.to_be_bytes());

        let prop_count = u32::try_from(self.properties.len())
            .map_err(|_| CoreError::Encoding("too many properties".to_owned()))?;
        buf.extend_from_slice(&prop_count.to_be_bytes());

        for (key, value) in &self.properties {
            let key_bytes = key.as_bytes();
            let key_len = u32::try_from(key_bytes.len())
                .map_err(|_| CoreError::Encoding("property key too long".to_owned()))?;
            buf.extend_from_slice(&key_len.to_be_bytes());
            buf.extend_from_slice(key_bytes);
            value.encode_to(buf)?;
        }

        Ok(())
    }
}

impl Decoder for Vertex {
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

        let mut offset = 1;

        if bytes.len() < offset + 8 {
            return Err(CoreError::Encoding("unexpected end of input".to_owned()));
        }
        let id_bytes: [u8; 8] = bytes[offset..offset + 8]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read vertex ID".to_owned()))?;
        let id = VertexId::new(u64::from_be_bytes(id_bytes));
        offset += 8;

        if bytes.len() < offset + 8 {
            return Err(CoreError::Encoding("unexpected end of input".to_owned()));
        }
        let vid_bytes: [u8; 8] = bytes[offset..offset + 8]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read external ID".to_owned()))?;
        let vid = u64::from_be_bytes(vid_bytes);
        offset += 8;

        if bytes.len() < offset + 4 {
            return Err(CoreError::Encoding("unexpected end of input".to_owned()));
        }
        let prop_count_bytes: [u8; 4] = bytes[offset..offset + 4]
            .try_into()
            .map_err(|_| CoreError::Encoding("failed to read property count".to_owned()))?;
        let prop_count = u32::from_be_bytes(prop_count_bytes) as usize;
        offset += 4;

        // Each property occupies at least 5 bytes (4-byte key length plus a
        // 1-byte value tag), so a count larger than the remaining buffer
        // allows is corrupt. Checking up front keeps the allocation below
        // honest for hostile inputs.
        if prop_count > (bytes.len() - offset) / 5 {
            return Err(CoreError::Encoding(format!(
                "property count {prop_count} exceeds remaining input"
            )));
        }

        let mut properties = HashMap::with_capacity(prop_count);
        for _ in 0..prop_count {
            if bytes.len() < offset + 4 {
                return Err(CoreError::Encoding("unexpected end of input".to_owned()));
            }
            let key_len_bytes: [u8; 4] = bytes[offset..offset + 4]
                .try_into()
                .map_err(|_| CoreError::Encoding("failed to read key length".to_owned()))?;
            let key_len = u32::from_be_bytes(key_len_bytes) as usize;
            offset += 4;

            if bytes.len() < offset + key_len {
                return Err(CoreError::Encoding("unexpected end of input".to_owned()));
            }
            let key = String::from_utf8(bytes[offset..offset + key_len].to_vec())
                .map_err(|e| CoreError::Encoding(format!("invalid key UTF-8: {e}")))?;
            offset += key_len;

            let (value, consumed) = decode_value(&bytes[offset..])?;
            properties.insert(key, value);
            offset += consumed;
        }

        Ok(Self { id, vid, properties })
    }
}
