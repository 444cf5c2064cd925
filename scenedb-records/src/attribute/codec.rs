use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use byteorder::{LittleEndian, ReadBytesExt};

use crate::RecordError;
use crate::attribute::types::{AttributeData, ElementType};

/// Decodes a tagged base64 blob into its typed payload.
///
/// Byte 0 of the decoded buffer selects the element type, the remainder is
/// read little-endian in the element width. Trailing bytes that do not fill
/// a whole element are dropped.
pub fn decode(encoded: &str) -> Result<AttributeData, RecordError> {
    let bytes = STANDARD.decode(encoded)?;
    let Some((&tag, payload)) = bytes.split_first() else {
        return Err(RecordError::EmptyBlob);
    };
    let element_type = ElementType::try_from(tag).map_err(|_| RecordError::UnknownElementType { tag })?;

    let count = payload.len() / element_type.width();
    let mut rdr = Cursor::new(payload);
    Ok(match element_type {
        ElementType::Int8 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_i8()?);
            }
            AttributeData::Int8(data)
        }
        ElementType::Uint8 => AttributeData::Uint8(payload[..count].to_vec()),
        ElementType::Uint8Clamped => AttributeData::Uint8Clamped(payload[..count].to_vec()),
        ElementType::Int16 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_i16::<LittleEndian>()?);
            }
            AttributeData::Int16(data)
        }
        ElementType::Uint16 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_u16::<LittleEndian>()?);
            }
            AttributeData::Uint16(data)
        }
        ElementType::Int32 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_i32::<LittleEndian>()?);
            }
            AttributeData::Int32(data)
        }
        ElementType::Uint32 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_u32::<LittleEndian>()?);
            }
            AttributeData::Uint32(data)
        }
        ElementType::Float32 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_f32::<LittleEndian>()?);
            }
            AttributeData::Float32(data)
        }
        ElementType::Float64 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(rdr.read_f64::<LittleEndian>()?);
            }
            AttributeData::Float64(data)
        }
    })
}

/// Exact inverse of [`decode`]: tag byte, little-endian payload, standard
/// base64 alphabet.
pub fn encode(data: &AttributeData) -> String {
    let mut bytes = Vec::with_capacity(1 + data.len() * data.element_type().width());
    bytes.push(data.element_type().into());
    match data {
        AttributeData::Int8(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Uint8(v) | AttributeData::Uint8Clamped(v) => bytes.extend_from_slice(v),
        AttributeData::Int16(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Uint16(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Int32(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Uint32(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Float32(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
        AttributeData::Float64(v) => {
            for &e in v {
                bytes.extend_from_slice(&e.to_le_bytes());
            }
        }
    }
    STANDARD.encode(bytes)
}
