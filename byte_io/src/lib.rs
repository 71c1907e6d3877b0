//! Little-endian byte access for ROM images.
//!
//! [`Reader`] walks an immutable [`ByteSource`] with a base + cursor pair so that pointers
//! stored relative to an anchor can be followed without losing the anchor. [`ByteWriter`]
//! goes the other way and is mostly used to assemble buffers for tests.
mod reader;
mod writer;

pub use reader::{ByteSource, OutOfBounds, Reader};
pub use writer::ByteWriter;
