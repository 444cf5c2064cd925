use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Element kind of a binary attribute payload. The discriminant is the tag
/// byte that prefixes every blob, in typed-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ElementType {
    Int8 = 0,
    Uint8 = 1,
    Uint8Clamped = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Float32 = 7,
    Float64 = 8,
}

impl ElementType {
    /// Width of one element in bytes.
    pub fn width(&self) -> usize {
        match self {
            ElementType::Int8 | ElementType::Uint8 | ElementType::Uint8Clamped => 1,
            ElementType::Int16 | ElementType::Uint16 => 2,
            ElementType::Int32 | ElementType::Uint32 | ElementType::Float32 => 4,
            ElementType::Float64 => 8,
        }
    }
}

/// A decoded attribute payload, one vector variant per element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl AttributeData {
    pub fn element_type(&self) -> ElementType {
        match self {
            AttributeData::Int8(_) => ElementType::Int8,
            AttributeData::Uint8(_) => ElementType::Uint8,
            AttributeData::Uint8Clamped(_) => ElementType::Uint8Clamped,
            AttributeData::Int16(_) => ElementType::Int16,
            AttributeData::Uint16(_) => ElementType::Uint16,
            AttributeData::Int32(_) => ElementType::Int32,
            AttributeData::Uint32(_) => ElementType::Uint32,
            AttributeData::Float32(_) => ElementType::Float32,
            AttributeData::Float64(_) => ElementType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttributeData::Int8(v) => v.len(),
            AttributeData::Uint8(v) => v.len(),
            AttributeData::Uint8Clamped(v) => v.len(),
            AttributeData::Int16(v) => v.len(),
            AttributeData::Uint16(v) => v.len(),
            AttributeData::Int32(v) => v.len(),
            AttributeData::Uint32(v) => v.len(),
            AttributeData::Float32(v) => v.len(),
            AttributeData::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen to f32, the in-memory format of vertex attribute channels.
    pub fn to_f32(&self) -> Vec<f32> {
        match self {
            AttributeData::Int8(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Uint8(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Uint8Clamped(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Int16(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Uint16(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Int32(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Uint32(v) => v.iter().map(|&e| e as f32).collect(),
            AttributeData::Float32(v) => v.clone(),
            AttributeData::Float64(v) => v.iter().map(|&e| e as f32).collect(),
        }
    }

    /// Convert to u32 for index buffers. Floats truncate, negative values
    /// saturate to zero.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            AttributeData::Int8(v) => v.iter().map(|&e| e.max(0) as u32).collect(),
            AttributeData::Uint8(v) => v.iter().map(|&e| e as u32).collect(),
            AttributeData::Uint8Clamped(v) => v.iter().map(|&e| e as u32).collect(),
            AttributeData::Int16(v) => v.iter().map(|&e| e.max(0) as u32).collect(),
            AttributeData::Uint16(v) => v.iter().map(|&e| e as u32).collect(),
            AttributeData::Int32(v) => v.iter().map(|&e| e.max(0) as u32).collect(),
            AttributeData::Uint32(v) => v.clone(),
            AttributeData::Float32(v) => v.iter().map(|&e| e as u32).collect(),
            AttributeData::Float64(v) => v.iter().map(|&e| e as u32).collect(),
        }
    }
}
