use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::RecordError;
use crate::attribute::codec::{decode, encode};
use crate::attribute::types::{AttributeData, ElementType};

#[test]
fn round_trip_all_element_types() -> Result<(), anyhow::Error> {
    let cases = vec![
        AttributeData::Int8(vec![-128, -1, 0, 1, 127]),
        AttributeData::Uint8(vec![0, 1, 255]),
        AttributeData::Uint8Clamped(vec![0, 128, 255]),
        AttributeData::Int16(vec![i16::MIN, -3, 0, i16::MAX]),
        AttributeData::Uint16(vec![0, 12, u16::MAX]),
        AttributeData::Int32(vec![i32::MIN, 0, i32::MAX]),
        AttributeData::Uint32(vec![0, 1, u32::MAX]),
        AttributeData::Float32(vec![1.5, -0.25, 0.0]),
        AttributeData::Float64(vec![2.5, -1e9, 0.0625]),
    ];
    for data in cases {
        let decoded = decode(&encode(&data))?;
        assert_eq!(decoded, data);
    }
    Ok(())
}

#[test]
fn round_trip_zero_length_payloads() -> Result<(), anyhow::Error> {
    // A bare tag byte encodes to a 4-character group with two padding
    // characters, an Int8 with one element to a group with one.
    let empty = encode(&AttributeData::Int8(vec![]));
    assert!(empty.ends_with("=="));
    assert_eq!(decode(&empty)?, AttributeData::Int8(vec![]));

    let single = encode(&AttributeData::Int8(vec![7]));
    assert!(single.ends_with('=') && !single.ends_with("=="));
    assert_eq!(decode(&single)?, AttributeData::Int8(vec![7]));
    Ok(())
}

#[test]
fn float32_blob_decodes_to_expected_value() -> Result<(), anyhow::Error> {
    let mut bytes = vec![u8::from(ElementType::Float32)];
    bytes.extend_from_slice(&1.5f32.to_le_bytes());

    let decoded = decode(&STANDARD.encode(bytes))?;
    assert_eq!(decoded.element_type(), ElementType::Float32);
    assert_eq!(decoded, AttributeData::Float32(vec![1.5]));
    Ok(())
}

#[test]
fn unknown_tag_is_rejected() {
    let blob = STANDARD.encode([9u8, 0, 0, 0, 0]);
    let result = decode(&blob);
    assert!(matches!(result, Err(RecordError::UnknownElementType { tag: 9 })));
}

#[test]
fn empty_blob_is_rejected() {
    assert!(matches!(decode(""), Err(RecordError::EmptyBlob)));
}

#[test]
fn trailing_partial_element_is_dropped() -> Result<(), anyhow::Error> {
    // One full f32 plus two stray bytes.
    let mut bytes = vec![u8::from(ElementType::Float32)];
    bytes.extend_from_slice(&4.0f32.to_le_bytes());
    bytes.extend_from_slice(&[0xde, 0xad]);

    assert_eq!(decode(&STANDARD.encode(bytes))?, AttributeData::Float32(vec![4.0]));
    Ok(())
}

#[test]
fn widening_conversions() {
    let index = AttributeData::Uint16(vec![0, 1, 2, 513]);
    assert_eq!(index.to_u32(), vec![0, 1, 2, 513]);
    assert_eq!(index.to_f32(), vec![0.0, 1.0, 2.0, 513.0]);

    let signed = AttributeData::Int8(vec![-4, 4]);
    assert_eq!(signed.to_u32(), vec![0, 4]);
    assert_eq!(signed.to_f32(), vec![-4.0, 4.0]);

    let floats = AttributeData::Float64(vec![2.75]);
    assert_eq!(floats.to_u32(), vec![2]);
    assert_eq!(floats.to_f32(), vec![2.75]);
}
