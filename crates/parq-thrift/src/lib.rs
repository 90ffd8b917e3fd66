//! Thrift compact protocol codec.
//!
//! Parquet serializes its footer metadata and page headers with the Thrift
//! compact protocol. This crate implements the subset the format needs:
//! varint/zigzag integers, delta-compressed field headers, lists, nested
//! structs, binary/string payloads, and skipping of unknown fields.

pub mod compact;
pub mod value;

pub use compact::{CompactReader, CompactType, CompactWriter};
pub use value::ThriftValue;
