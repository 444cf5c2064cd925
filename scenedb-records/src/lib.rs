use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record is missing a non-empty _id field")]
    MissingId,

    #[error("record {id} is missing its type field")]
    MissingType { id: String },

    /// An attribute blob decoded to zero bytes, so there is not even a
    /// type tag to dispatch on.
    #[error("attribute blob contains no type tag")]
    EmptyBlob,

    #[error("unknown attribute element type tag {tag}")]
    UnknownElementType { tag: u8 },

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub mod attribute;
pub mod record;
