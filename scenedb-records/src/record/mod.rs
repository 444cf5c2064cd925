pub mod types;


pub use types::{BufferDescriptor, Patch, RawRecord, ReferenceValue};
