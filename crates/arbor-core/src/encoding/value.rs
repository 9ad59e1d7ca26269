//! Binary codec for property [`Value`]s.
//!
//! Every value starts with a one-byte tag; the payload layout depends on
//! the variant:
//!
//! | Tag    | Variant  | Payload                          |
//! |--------|----------|----------------------------------|
//! | `0x00` | `Null`   | none                             |
//! | `0x01` | `Bool`   | one byte, `0x00` or `0x01`       |
//! | `0x02` | `Int`    | big-endian `i64`                 |
//! | `0x03` | `Float`  | IEEE 754 `f64`, big-endian bits  |
//! | `0x04` | `String` | big-endian `u32` length + UTF-8  |

use crate::error::CoreError;
use crate::types::Value;

use super::traits::{Decoder, Encoder};

mod tags {
    pub const NULL: u8 = 0x00;
    pub const BOOL: u8 = 0x01;
    pub const INT: u8 = 0x02;
    pub const FLOAT: u8 = 0x03;
    pub const STRING: u8 = 0x04;
}

impl Encoder for Value {
    fn encode(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf)?;
        Ok(buf)
    }

    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        match self {
            Self::Null => buf.push(tags::NULL),
            Self::Bool(b) => {
                buf.push(tags::BOOL);
                buf.push(u8::from(*b));
            }
            Self::Int(i) => {
                buf.push(tags::INT);
                buf.extend_from_slice(&i.to_be_bytes());
            }
            Self::Float(f) => {
                buf.push(tags::FLOAT);
                buf.extend_from_slice(&f.to_be_bytes());
            }
            Self::String(s) => {
                buf.push(tags::STRING);
                let bytes = s.as_bytes();
                let len = u32::try_from(bytes.len())
                    .map_err(|_| CoreError::Encoding("string too long".to_owned()))?;
                buf.extend_from_slice(&len.to_be_bytes());
                buf.extend_from_slice(bytes);
            }
        }
        Ok(())
    }
}

impl Decoder for Value {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let (value, _) = decode_value(bytes)?;
        Ok(value)
    }
}

/// Decode one value from the front of `bytes`, also reporting how many
/// bytes it occupied so callers can walk a concatenated sequence.
pub fn decode_value(bytes: &[u8]) -> Result<(Value, usize), CoreError> {
    let Some((&tag, rest)) = bytes.split_first() else {
        return Err(CoreError::Encoding("unexpected end of input".to_owned()));
    };

    match tag {
        tags::NULL => Ok((Value::Null, 1)),
        tags::BOOL => match rest.first() {
            Some(&b) => Ok((Value::Bool(b != 0), 2)),
            None => Err(CoreError::Encoding("unexpected end of input".to_owned())),
        },
        tags::INT => {
            let payload = read_fixed8(rest)?;
            Ok((Value::Int(i64::from_be_bytes(payload)), 9))
        }
        tags::FLOAT => {
            let payload = read_fixed8(rest)?;
            Ok((Value::Float(f64::from_be_bytes(payload)), 9))
        }
        tags::STRING => {
            if rest.len() < 4 {
                return Err(CoreError::Encoding("unexpected end of input".to_owned()));
            }
            let len_bytes: [u8; 4] = rest[..4]
                .try_into()
                .map_err(|_| CoreError::Encoding("failed to read length".to_owned()))?;
            let len = u32::from_be_bytes(len_bytes) as usize;
            if rest.len() < 4 + len {
                return Err(CoreError::Encoding("unexpected end of input".to_owned()));
            }
            let s = String::from_utf8(rest[4..4 + len].to_vec())
                .map_err(|e| CoreError::Encoding(format!("invalid UTF-8: {e}")))?;
            Ok((Value::String(s), 5 + len))
        }
        _ => Err(CoreError::Encoding(format!("unknown type tag: {tag:#x}"))),
    }
}

fn read_fixed8(rest: &[u8]) -> Result<[u8; 8], CoreError> {
    if rest.len() < 8 {
        return Err(CoreError::Encoding("unexpected end of input".to_owned()));
    }
    rest[..8]
        .try_into()
        .map_err(|_| CoreError::Encoding("failed to read 8-byte payload".to_owned()))
}
