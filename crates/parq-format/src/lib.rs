//! Minimal Parquet file format implementation.
//!
//! Supports flat schemas of required columns with PLAIN encoding, written as
//! one or more row groups of checksummed data pages, and reads back both the
//! footer metadata and the record data. The write entry point is
//! [`write_file`]; the read entry point is [`FileReader`].

pub mod metadata;
pub mod page;
pub mod reader;
pub mod record;
pub mod schema;
pub mod writer;

/// Magic bytes framing every Parquet file
pub const MAGIC: &[u8] = b"PAR1";

pub use metadata::{
    ColumnChunk, ColumnMetaData, CompressionCodec, DataPageHeader, Encoding, FileMetaData,
    PageHeader, PageType, RowGroup, SchemaElement, Statistics,
};
pub use reader::FileReader;
pub use record::{Record, RecordBatch, Value};
pub use schema::{ConvertedType, Field, PhysicalType, Repetition, Schema};
pub use writer::{write_file, FileWriter, WriterConfig};
