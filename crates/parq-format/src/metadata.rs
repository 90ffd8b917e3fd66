//! Footer and page header structures.
//!
//! These mirror the Thrift definitions in parquet.thrift, restricted to the
//! fields this implementation produces. Decoding skips unknown fields, so
//! footers written by richer implementations still parse as long as they use
//! features the reader understands.

use crate::schema::{ConvertedType, PhysicalType, Repetition};
use parq_common::{Error, Result};
use parq_thrift::{CompactReader, CompactType, CompactWriter};
use serde::Serialize;

/// Page kind codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageType {
    DataPage,
    IndexPage,
    DictionaryPage,
    DataPageV2,
}

impl PageType {
    pub fn to_i32(self) -> i32 {
        match self {
            PageType::DataPage => 0,
            PageType::IndexPage => 1,
            PageType::DictionaryPage => 2,
            PageType::DataPageV2 => 3,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(PageType::DataPage),
            1 => Ok(PageType::IndexPage),
            2 => Ok(PageType::DictionaryPage),
            3 => Ok(PageType::DataPageV2),
            _ => Err(Error::Thrift(format!("Unknown page type: {}", value))),
        }
    }
}

/// Value encoding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    Plain,
    PlainDictionary,
    Rle,
    BitPacked,
    DeltaBinaryPacked,
    DeltaLengthByteArray,
    DeltaByteArray,
    RleDictionary,
    ByteStreamSplit,
}

impl Encoding {
    pub fn to_i32(self) -> i32 {
        match self {
            Encoding::Plain => 0,
            Encoding::PlainDictionary => 2,
            Encoding::Rle => 3,
            Encoding::BitPacked => 4,
            Encoding::DeltaBinaryPacked => 5,
            Encoding::DeltaLengthByteArray => 6,
            Encoding::DeltaByteArray => 7,
            Encoding::RleDictionary => 8,
            Encoding::ByteStreamSplit => 9,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Encoding::Plain),
            2 => Ok(Encoding::PlainDictionary),
            3 => Ok(Encoding::Rle),
            4 => Ok(Encoding::BitPacked),
            5 => Ok(Encoding::DeltaBinaryPacked),
            6 => Ok(Encoding::DeltaLengthByteArray),
            7 => Ok(Encoding::DeltaByteArray),
            8 => Ok(Encoding::RleDictionary),
            9 => Ok(Encoding::ByteStreamSplit),
            _ => Err(Error::Thrift(format!("Unknown encoding: {}", value))),
        }
    }
}

/// Compression codec codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompressionCodec {
    Uncompressed,
    Snappy,
    Gzip,
    Lzo,
    Brotli,
    Lz4,
    Zstd,
    Lz4Raw,
}

impl CompressionCodec {
    pub fn to_i32(self) -> i32 {
        match self {
            CompressionCodec::Uncompressed => 0,
            CompressionCodec::Snappy => 1,
            CompressionCodec::Gzip => 2,
            CompressionCodec::Lzo => 3,
            CompressionCodec::Brotli => 4,
            CompressionCodec::Lz4 => 5,
            CompressionCodec::Zstd => 6,
            CompressionCodec::Lz4Raw => 7,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(CompressionCodec::Uncompressed),
            1 => Ok(CompressionCodec::Snappy),
            2 => Ok(CompressionCodec::Gzip),
            3 => Ok(CompressionCodec::Lzo),
            4 => Ok(CompressionCodec::Brotli),
            5 => Ok(CompressionCodec::Lz4),
            6 => Ok(CompressionCodec::Zstd),
            7 => Ok(CompressionCodec::Lz4Raw),
            _ => Err(Error::Thrift(format!("Unknown compression codec: {}", value))),
        }
    }
}

/// One element of the flattened schema tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaElement {
    pub physical_type: Option<PhysicalType>,
    pub repetition: Option<Repetition>,
    pub name: String,
    pub num_children: Option<i32>,
    pub converted_type: Option<ConvertedType>,
}

impl SchemaElement {
    fn write(&self, w: &mut CompactWriter) {
        if let Some(ty) = self.physical_type {
            w.write_i32_field(1, ty.to_i32());
        }
        if let Some(repetition) = self.repetition {
            w.write_i32_field(3, repetition.to_i32());
        }
        w.write_string_field(4, &self.name);
        if let Some(num_children) = self.num_children {
            w.write_i32_field(5, num_children);
        }
        if let Some(converted) = self.converted_type {
            w.write_i32_field(6, converted.to_i32());
        }
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut physical_type = None;
        let mut repetition = None;
        let mut name = None;
        let mut num_children = None;
        let mut converted_type = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::I32) => physical_type = Some(PhysicalType::from_i32(r.read_i32()?)?),
                (3, CompactType::I32) => repetition = Some(Repetition::from_i32(r.read_i32()?)?),
                (4, CompactType::Binary) => name = Some(r.read_string()?),
                (5, CompactType::I32) => num_children = Some(r.read_i32()?),
                (6, CompactType::I32) => converted_type = ConvertedType::from_i32(r.read_i32()?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            physical_type,
            repetition,
            name: name.ok_or_else(|| Error::Thrift("SchemaElement: missing name".into()))?,
            num_children,
            converted_type,
        })
    }
}

/// Min/max statistics of a column chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Plain-encoded minimum (byte arrays without the length prefix)
    pub min_value: Option<Vec<u8>>,
    pub max_value: Option<Vec<u8>>,
    pub null_count: Option<i64>,
}

impl Statistics {
    fn write(&self, w: &mut CompactWriter) {
        if let Some(null_count) = self.null_count {
            w.write_i64_field(3, null_count);
        }
        if let Some(max) = &self.max_value {
            w.write_binary_field(5, max);
        }
        if let Some(min) = &self.min_value {
            w.write_binary_field(6, min);
        }
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut legacy_max = None;
        let mut legacy_min = None;
        let mut null_count = None;
        let mut max_value = None;
        let mut min_value = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::Binary) => legacy_max = Some(r.read_binary()?),
                (2, CompactType::Binary) => legacy_min = Some(r.read_binary()?),
                (3, CompactType::I64) => null_count = Some(r.read_i64()?),
                (5, CompactType::Binary) => max_value = Some(r.read_binary()?),
                (6, CompactType::Binary) => min_value = Some(r.read_binary()?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            min_value: min_value.or(legacy_min),
            max_value: max_value.or(legacy_max),
            null_count,
        })
    }
}

/// Per-chunk column metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetaData {
    pub physical_type: PhysicalType,
    pub encodings: Vec<Encoding>,
    pub path_in_schema: Vec<String>,
    pub codec: CompressionCodec,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub data_page_offset: i64,
    pub statistics: Option<Statistics>,
}

impl ColumnMetaData {
    fn write(&self, w: &mut CompactWriter) {
        w.write_i32_field(1, self.physical_type.to_i32());

        w.write_field_begin(CompactType::List, 2);
        w.write_list_begin(CompactType::I32, self.encodings.len());
        for encoding in &self.encodings {
            w.write_i32_value(encoding.to_i32());
        }

        w.write_field_begin(CompactType::List, 3);
        w.write_list_begin(CompactType::Binary, self.path_in_schema.len());
        for part in &self.path_in_schema {
            w.write_binary(part.as_bytes());
        }

        w.write_i32_field(4, self.codec.to_i32());
        w.write_i64_field(5, self.num_values);
        w.write_i64_field(6, self.total_uncompressed_size);
        w.write_i64_field(7, self.total_compressed_size);
        w.write_i64_field(9, self.data_page_offset);

        if let Some(statistics) = &self.statistics {
            w.write_field_begin(CompactType::Struct, 12);
            w.struct_begin();
            statistics.write(w);
            w.struct_end();
        }
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut physical_type = None;
        let mut encodings = Vec::new();
        let mut path_in_schema = Vec::new();
        let mut codec = None;
        let mut num_values = None;
        let mut total_uncompressed_size = None;
        let mut total_compressed_size = None;
        let mut data_page_offset = None;
        let mut statistics = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::I32) => physical_type = Some(PhysicalType::from_i32(r.read_i32()?)?),
                (2, CompactType::List) => {
                    let list = r.read_list_header()?;
                    for _ in 0..list.size {
                        encodings.push(Encoding::from_i32(r.read_i32()?)?);
                    }
                }
                (3, CompactType::List) => {
                    let list = r.read_list_header()?;
                    for _ in 0..list.size {
                        path_in_schema.push(r.read_string()?);
                    }
                }
                (4, CompactType::I32) => codec = Some(CompressionCodec::from_i32(r.read_i32()?)?),
                (5, CompactType::I64) => num_values = Some(r.read_i64()?),
                (6, CompactType::I64) => total_uncompressed_size = Some(r.read_i64()?),
                (7, CompactType::I64) => total_compressed_size = Some(r.read_i64()?),
                (9, CompactType::I64) => data_page_offset = Some(r.read_i64()?),
                (12, CompactType::Struct) => statistics = Some(Statistics::read(r)?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            physical_type: physical_type
                .ok_or_else(|| Error::Thrift("ColumnMetaData: missing type".into()))?,
            encodings,
            path_in_schema,
            codec: codec.ok_or_else(|| Error::Thrift("ColumnMetaData: missing codec".into()))?,
            num_values: num_values
                .ok_or_else(|| Error::Thrift("ColumnMetaData: missing num_values".into()))?,
            total_uncompressed_size: total_uncompressed_size
                .ok_or_else(|| Error::Thrift("ColumnMetaData: missing uncompressed size".into()))?,
            total_compressed_size: total_compressed_size
                .ok_or_else(|| Error::Thrift("ColumnMetaData: missing compressed size".into()))?,
            data_page_offset: data_page_offset
                .ok_or_else(|| Error::Thrift("ColumnMetaData: missing data page offset".into()))?,
            statistics,
        })
    }
}

/// A column chunk within a row group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnChunk {
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

impl ColumnChunk {
    fn write(&self, w: &mut CompactWriter) {
        if let Some(path) = &self.file_path {
            w.write_string_field(1, path);
        }
        w.write_i64_field(2, self.file_offset);
        if let Some(meta) = &self.meta_data {
            w.write_field_begin(CompactType::Struct, 3);
            w.struct_begin();
            meta.write(w);
            w.struct_end();
        }
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut file_path = None;
        let mut file_offset = None;
        let mut meta_data = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::Binary) => file_path = Some(r.read_string()?),
                (2, CompactType::I64) => file_offset = Some(r.read_i64()?),
                (3, CompactType::Struct) => meta_data = Some(ColumnMetaData::read(r)?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            file_path,
            file_offset: file_offset
                .ok_or_else(|| Error::Thrift("ColumnChunk: missing file offset".into()))?,
            meta_data,
        })
    }
}

/// A horizontal slice of the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
}

impl RowGroup {
    fn write(&self, w: &mut CompactWriter) {
        w.write_field_begin(CompactType::List, 1);
        w.write_list_begin(CompactType::Struct, self.columns.len());
        for column in &self.columns {
            w.struct_begin();
            column.write(w);
            w.struct_end();
        }
        w.write_i64_field(2, self.total_byte_size);
        w.write_i64_field(3, self.num_rows);
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut columns = Vec::new();
        let mut total_byte_size = None;
        let mut num_rows = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::List) => {
                    let list = r.read_list_header()?;
                    for _ in 0..list.size {
                        columns.push(ColumnChunk::read(r)?);
                    }
                }
                (2, CompactType::I64) => total_byte_size = Some(r.read_i64()?),
                (3, CompactType::I64) => num_rows = Some(r.read_i64()?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            columns,
            total_byte_size: total_byte_size
                .ok_or_else(|| Error::Thrift("RowGroup: missing total byte size".into()))?,
            num_rows: num_rows.ok_or_else(|| Error::Thrift("RowGroup: missing num_rows".into()))?,
        })
    }
}

/// The footer: everything needed to locate and decode the column data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetaData {
    pub version: i32,
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub created_by: Option<String>,
}

impl FileMetaData {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CompactWriter::new();

        w.write_i32_field(1, self.version);

        w.write_field_begin(CompactType::List, 2);
        w.write_list_begin(CompactType::Struct, self.schema.len());
        for element in &self.schema {
            w.struct_begin();
            element.write(&mut w);
            w.struct_end();
        }

        w.write_i64_field(3, self.num_rows);

        w.write_field_begin(CompactType::List, 4);
        w.write_list_begin(CompactType::Struct, self.row_groups.len());
        for row_group in &self.row_groups {
            w.struct_begin();
            row_group.write(&mut w);
            w.struct_end();
        }

        if let Some(created_by) = &self.created_by {
            w.write_string_field(6, created_by);
        }

        w.write_stop();
        w.into_bytes()
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut r = CompactReader::new(buf);
        let mut version = None;
        let mut schema = Vec::new();
        let mut num_rows = None;
        let mut row_groups = Vec::new();
        let mut created_by = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::I32) => version = Some(r.read_i32()?),
                (2, CompactType::List) => {
                    let list = r.read_list_header()?;
                    for _ in 0..list.size {
                        schema.push(SchemaElement::read(&mut r)?);
                    }
                }
                (3, CompactType::I64) => num_rows = Some(r.read_i64()?),
                (4, CompactType::List) => {
                    let list = r.read_list_header()?;
                    for _ in 0..list.size {
                        row_groups.push(RowGroup::read(&mut r)?);
                    }
                }
                (6, CompactType::Binary) => created_by = Some(r.read_string()?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            version: version.ok_or_else(|| Error::Thrift("FileMetaData: missing version".into()))?,
            schema,
            num_rows: num_rows
                .ok_or_else(|| Error::Thrift("FileMetaData: missing num_rows".into()))?,
            row_groups,
            created_by,
        })
    }
}

/// Header preceding every page's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHeader {
    pub page_type: PageType,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub crc: Option<i32>,
    pub data_page_header: Option<DataPageHeader>,
}

impl PageHeader {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CompactWriter::new();
        w.write_i32_field(1, self.page_type.to_i32());
        w.write_i32_field(2, self.uncompressed_page_size);
        w.write_i32_field(3, self.compressed_page_size);
        if let Some(crc) = self.crc {
            w.write_i32_field(4, crc);
        }
        if let Some(data_header) = &self.data_page_header {
            w.write_field_begin(CompactType::Struct, 5);
            w.struct_begin();
            data_header.write(&mut w);
            w.struct_end();
        }
        w.write_stop();
        w.into_bytes()
    }

    /// Decode from a reader positioned at the header's first byte, leaving
    /// it positioned at the page data.
    pub fn read_from(r: &mut CompactReader) -> Result<Self> {
        let mut page_type = None;
        let mut uncompressed_page_size = None;
        let mut compressed_page_size = None;
        let mut crc = None;
        let mut data_page_header = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::I32) => page_type = Some(PageType::from_i32(r.read_i32()?)?),
                (2, CompactType::I32) => uncompressed_page_size = Some(r.read_i32()?),
                (3, CompactType::I32) => compressed_page_size = Some(r.read_i32()?),
                (4, CompactType::I32) => crc = Some(r.read_i32()?),
                (5, CompactType::Struct) => data_page_header = Some(DataPageHeader::read(r)?),
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            page_type: page_type.ok_or_else(|| Error::Thrift("PageHeader: missing type".into()))?,
            uncompressed_page_size: uncompressed_page_size
                .ok_or_else(|| Error::Thrift("PageHeader: missing uncompressed size".into()))?,
            compressed_page_size: compressed_page_size
                .ok_or_else(|| Error::Thrift("PageHeader: missing compressed size".into()))?,
            crc,
            data_page_header,
        })
    }
}

/// Data-page specifics nested inside [`PageHeader`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPageHeader {
    pub num_values: i32,
    pub encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub repetition_level_encoding: Encoding,
}

impl DataPageHeader {
    fn write(&self, w: &mut CompactWriter) {
        w.write_i32_field(1, self.num_values);
        w.write_i32_field(2, self.encoding.to_i32());
        w.write_i32_field(3, self.definition_level_encoding.to_i32());
        w.write_i32_field(4, self.repetition_level_encoding.to_i32());
    }

    fn read(r: &mut CompactReader) -> Result<Self> {
        let mut num_values = None;
        let mut encoding = None;
        let mut definition_level_encoding = None;
        let mut repetition_level_encoding = None;

        let mut last = 0i16;
        while let Some(header) = r.read_field_header(&mut last)? {
            match (header.id, header.ty) {
                (1, CompactType::I32) => num_values = Some(r.read_i32()?),
                (2, CompactType::I32) => encoding = Some(Encoding::from_i32(r.read_i32()?)?),
                (3, CompactType::I32) => {
                    definition_level_encoding = Some(Encoding::from_i32(r.read_i32()?)?)
                }
                (4, CompactType::I32) => {
                    repetition_level_encoding = Some(Encoding::from_i32(r.read_i32()?)?)
                }
                _ => r.skip(header.ty)?,
            }
        }

        Ok(Self {
            num_values: num_values
                .ok_or_else(|| Error::Thrift("DataPageHeader: missing num_values".into()))?,
            encoding: encoding
                .ok_or_else(|| Error::Thrift("DataPageHeader: missing encoding".into()))?,
            definition_level_encoding: definition_level_encoding.unwrap_or(Encoding::Rle),
            repetition_level_encoding: repetition_level_encoding.unwrap_or(Encoding::Rle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> FileMetaData {
        FileMetaData {
            version: 1,
            schema: vec![
                SchemaElement {
                    physical_type: None,
                    repetition: None,
                    name: "schema".into(),
                    num_children: Some(2),
                    converted_type: None,
                },
                SchemaElement {
                    physical_type: Some(PhysicalType::ByteArray),
                    repetition: Some(Repetition::Required),
                    name: "Text".into(),
                    num_children: None,
                    converted_type: Some(ConvertedType::Utf8),
                },
                SchemaElement {
                    physical_type: Some(PhysicalType::Int64),
                    repetition: Some(Repetition::Required),
                    name: "n".into(),
                    num_children: None,
                    converted_type: None,
                },
            ],
            num_rows: 5,
            row_groups: vec![RowGroup {
                columns: vec![ColumnChunk {
                    file_path: None,
                    file_offset: 4,
                    meta_data: Some(ColumnMetaData {
                        physical_type: PhysicalType::ByteArray,
                        encodings: vec![Encoding::Plain, Encoding::Rle],
                        path_in_schema: vec!["Text".into()],
                        codec: CompressionCodec::Uncompressed,
                        num_values: 5,
                        total_uncompressed_size: 64,
                        total_compressed_size: 64,
                        data_page_offset: 4,
                        statistics: Some(Statistics {
                            min_value: Some(b"text1".to_vec()),
                            max_value: Some(b"text5".to_vec()),
                            null_count: Some(0),
                        }),
                    }),
                }],
                total_byte_size: 64,
                num_rows: 5,
            }],
            created_by: Some("parq version 0.1.0".into()),
        }
    }

    #[test]
    fn test_file_metadata_roundtrip() {
        let metadata = sample_metadata();
        let bytes = metadata.encode();
        let decoded = FileMetaData::decode(&bytes).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_decode_skips_unknown_fields() {
        // A footer with fields this reader has never heard of
        let mut w = CompactWriter::new();
        w.write_i32_field(1, 2);
        w.write_field_begin(CompactType::List, 2);
        w.write_list_begin(CompactType::Struct, 1);
        w.struct_begin();
        w.write_string_field(4, "schema");
        w.write_i32_field(5, 0);
        // Unknown schema element field
        w.write_string_field(9, "ignored");
        w.struct_end();
        w.write_i64_field(3, 0);
        // key_value_metadata, which this reader skips
        w.write_field_begin(CompactType::List, 5);
        w.write_list_begin(CompactType::Struct, 1);
        w.struct_begin();
        w.write_string_field(1, "key");
        w.write_string_field(2, "value");
        w.struct_end();
        w.write_string_field(6, "someone else");
        w.write_stop();

        let decoded = FileMetaData::decode(&w.into_bytes()).unwrap();
        assert_eq!(decoded.version, 2);
        assert_eq!(decoded.num_rows, 0);
        assert_eq!(decoded.schema.len(), 1);
        assert_eq!(decoded.created_by.as_deref(), Some("someone else"));
    }

    #[test]
    fn test_decode_missing_required_field() {
        let mut w = CompactWriter::new();
        w.write_i32_field(1, 1);
        w.write_stop();
        let err = FileMetaData::decode(&w.into_bytes()).unwrap_err();
        assert!(err.to_string().contains("num_rows"));
    }

    #[test]
    fn test_page_header_roundtrip() {
        let header = PageHeader {
            page_type: PageType::DataPage,
            uncompressed_page_size: 128,
            compressed_page_size: 64,
            crc: Some(0x1234_5678),
            data_page_header: Some(DataPageHeader {
                num_values: 10,
                encoding: Encoding::Plain,
                definition_level_encoding: Encoding::Rle,
                repetition_level_encoding: Encoding::Rle,
            }),
        };
        let bytes = header.encode();
        let mut r = CompactReader::new(&bytes);
        let decoded = PageHeader::read_from(&mut r).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(r.position(), bytes.len());
    }

    #[test]
    fn test_legacy_statistics_fields() {
        let mut w = CompactWriter::new();
        w.write_binary_field(1, b"zzz");
        w.write_binary_field(2, b"aaa");
        w.write_stop();
        let bytes = w.into_bytes();
        let mut r = CompactReader::new(&bytes);
        let stats = Statistics::read(&mut r).unwrap();
        assert_eq!(stats.max_value.as_deref(), Some(&b"zzz"[..]));
        assert_eq!(stats.min_value.as_deref(), Some(&b"aaa"[..]));
        assert_eq!(stats.null_count, None);
    }
}
