//! Parquet file writer.
//!
//! [`FileWriter`] streams records into row groups of data pages, tracking
//! its own byte offset so any `Write` sink works. [`write_file`] is the
//! one-call entry point: hand it a path, a schema, and records, and it
//! produces a complete file.

use crate::metadata::{
    ColumnChunk, ColumnMetaData, CompressionCodec, Encoding, FileMetaData, RowGroup,
    SchemaElement, Statistics,
};
use crate::page::{self, stat_bytes};
use crate::record::{check_record, Record, RecordBatch, Value};
use crate::schema::{Repetition, Schema};
use crate::MAGIC;
use parq_common::Result;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writer configuration.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Stamped into the footer's created_by field
    pub created_by: String,
    /// Codec applied to every data page
    pub compression: CompressionCodec,
    /// Rows buffered before a row group is flushed
    pub row_group_rows: usize,
    /// Rows per data page within a column chunk
    pub data_page_rows: usize,
    /// Whether page headers carry a CRC32 of the page data
    pub page_checksums: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            created_by: concat!("parq version ", env!("CARGO_PKG_VERSION")).to_string(),
            compression: CompressionCodec::Uncompressed,
            row_group_rows: 65_536,
            data_page_rows: 16_384,
            page_checksums: true,
        }
    }
}

/// Streaming Parquet writer over any `Write` sink.
///
/// Records are buffered per column and flushed as row groups. The file is
/// only valid once [`FileWriter::finish`] has written the footer; dropping
/// the writer early leaves a truncated file.
pub struct FileWriter<W: Write> {
    sink: W,
    schema: Schema,
    config: WriterConfig,
    /// Bytes written so far; doubles as the next write's file offset
    offset: u64,
    columns: Vec<Vec<Value>>,
    buffered_rows: usize,
    row_groups: Vec<RowGroup>,
    num_rows: i64,
}

impl<W: Write> FileWriter<W> {
    pub fn new(sink: W, schema: Schema) -> Result<Self> {
        Self::with_config(sink, schema, WriterConfig::default())
    }

    pub fn with_config(mut sink: W, schema: Schema, config: WriterConfig) -> Result<Self> {
        schema.validate_for_write()?;
        sink.write_all(MAGIC)?;
        let columns = vec![Vec::new(); schema.len()];
        Ok(Self {
            sink,
            schema,
            config,
            offset: MAGIC.len() as u64,
            columns,
            buffered_rows: 0,
            row_groups: Vec::new(),
            num_rows: 0,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows accepted so far, buffered or flushed
    pub fn num_rows(&self) -> i64 {
        self.num_rows + self.buffered_rows as i64
    }

    /// Buffer one record, flushing a row group when the threshold is hit
    pub fn append(&mut self, record: Record) -> Result<()> {
        check_record(&self.schema, &record)?;
        for (column, value) in self.columns.iter_mut().zip(record.values) {
            column.push(value);
        }
        self.buffered_rows += 1;
        if self.buffered_rows >= self.config.row_group_rows {
            self.flush_row_group()?;
        }
        Ok(())
    }

    pub fn append_batch(&mut self, batch: RecordBatch) -> Result<()> {
        for record in batch.records {
            self.append(record)?;
        }
        Ok(())
    }

    fn flush_row_group(&mut self) -> Result<()> {
        if self.buffered_rows == 0 {
            return Ok(());
        }
        let rows = self.buffered_rows;

        let mut chunks = Vec::with_capacity(self.schema.len());
        let mut total_byte_size = 0i64;

        let fields = self.schema.fields().to_vec();
        let columns = std::mem::take(&mut self.columns);
        for (field, values) in fields.iter().zip(&columns) {
            let first_page_offset = self.offset as i64;
            let statistics = column_statistics(values);

            let mut total_uncompressed = 0i64;
            let mut total_compressed = 0i64;
            for page_values in values.chunks(self.config.data_page_rows) {
                let page = page::build_data_page(
                    field,
                    page_values,
                    self.config.compression,
                    self.config.page_checksums,
                )?;
                let header_len = page.bytes.len() as i64 - page.header.compressed_page_size as i64;
                total_uncompressed += header_len + page.header.uncompressed_page_size as i64;
                total_compressed += page.bytes.len() as i64;
                self.write_all(&page.bytes)?;
            }
            total_byte_size += total_uncompressed;

            chunks.push(ColumnChunk {
                file_path: None,
                file_offset: first_page_offset,
                meta_data: Some(ColumnMetaData {
                    physical_type: field.physical_type,
                    encodings: vec![Encoding::Plain, Encoding::Rle],
                    path_in_schema: vec![field.name.clone()],
                    codec: self.config.compression,
                    num_values: rows as i64,
                    total_uncompressed_size: total_uncompressed,
                    total_compressed_size: total_compressed,
                    data_page_offset: first_page_offset,
                    statistics,
                }),
            });
        }
        self.columns = vec![Vec::new(); self.schema.len()];

        self.row_groups.push(RowGroup {
            columns: chunks,
            total_byte_size,
            num_rows: rows as i64,
        });
        self.num_rows += rows as i64;
        self.buffered_rows = 0;
        debug!(rows, group = self.row_groups.len(), "flushed row group");
        Ok(())
    }

    /// Flush buffered rows, write the footer, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush_row_group()?;

        let metadata = FileMetaData {
            version: 1,
            schema: self.schema_elements(),
            num_rows: self.num_rows,
            row_groups: std::mem::take(&mut self.row_groups),
            created_by: Some(self.config.created_by.clone()),
        };
        let footer = metadata.encode();
        self.write_all(&footer)?;
        self.write_all(&(footer.len() as u32).to_le_bytes())?;
        self.write_all(MAGIC)?;
        self.sink.flush()?;
        debug!(
            rows = self.num_rows,
            bytes = self.offset,
            footer = footer.len(),
            "wrote file footer"
        );
        Ok(self.sink)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.sink.write_all(data)?;
        self.offset += data.len() as u64;
        Ok(())
    }

    /// The flat schema as its wire representation: a root group element
    /// followed by one leaf per column.
    fn schema_elements(&self) -> Vec<SchemaElement> {
        let mut elements = Vec::with_capacity(self.schema.len() + 1);
        elements.push(SchemaElement {
            physical_type: None,
            repetition: None,
            name: "schema".into(),
            num_children: Some(self.schema.len() as i32),
            converted_type: None,
        });
        for field in self.schema.fields() {
            elements.push(SchemaElement {
                physical_type: Some(field.physical_type),
                repetition: Some(Repetition::Required),
                name: field.name.clone(),
                num_children: None,
                converted_type: field.converted_type,
            });
        }
        elements
    }
}

/// Min/max statistics over one column chunk's values.
///
/// Dropped entirely if any comparison is undefined (NaN doubles), rather
/// than publishing a misleading range.
fn column_statistics(values: &[Value]) -> Option<Statistics> {
    let mut min: Option<&Value> = None;
    let mut max: Option<&Value> = None;
    for value in values {
        match min {
            None => min = Some(value),
            Some(current) => match stat_cmp(value, current)? {
                Ordering::Less => min = Some(value),
                _ => {}
            },
        }
        match max {
            None => max = Some(value),
            Some(current) => match stat_cmp(value, current)? {
                Ordering::Greater => max = Some(value),
                _ => {}
            },
        }
    }
    Some(Statistics {
        min_value: min.map(stat_bytes),
        max_value: max.map(stat_bytes),
        null_count: Some(0),
    })
}

fn stat_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
        (Value::Int32(x), Value::Int32(y)) => Some(x.cmp(y)),
        (Value::Int64(x), Value::Int64(y)) => Some(x.cmp(y)),
        (Value::Double(x), Value::Double(y)) => x.partial_cmp(y),
        _ => match (a.as_bytes(), b.as_bytes()) {
            (Some(x), Some(y)) => Some(x.cmp(y)),
            _ => None,
        },
    }
}

/// Write `records` to a new Parquet file at `path`.
///
/// This is the whole high-level API: schema in hand, records in, file out,
/// error back if anything failed.
pub fn write_file<P, I>(path: P, schema: &Schema, records: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Record>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = FileWriter::new(BufWriter::new(file), schema.clone())?;
    for record in records {
        writer.append(record)?;
    }
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::FileReader;
    use crate::schema::Field;
    use parq_common::Error;

    fn text_schema() -> Schema {
        Schema::new(vec![Field::utf8("Text")])
    }

    fn text_records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::from(vec![Value::Text(format!("text{}", i))]))
            .collect()
    }

    #[test]
    fn test_file_is_framed_by_magic() {
        let mut writer = FileWriter::new(Vec::new(), text_schema()).unwrap();
        for record in text_records(5) {
            writer.append(record).unwrap();
        }
        let bytes = writer.finish().unwrap();
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(&bytes[bytes.len() - 4..], MAGIC);
    }

    #[test]
    fn test_write_read_roundtrip_in_memory() {
        let mut writer = FileWriter::new(Vec::new(), text_schema()).unwrap();
        for record in text_records(5) {
            writer.append(record).unwrap();
        }
        assert_eq!(writer.num_rows(), 5);
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        assert_eq!(reader.metadata().num_rows, 5);
        assert_eq!(reader.read_records().unwrap(), text_records(5));
    }

    #[test]
    fn test_empty_file_is_valid() {
        let writer = FileWriter::new(Vec::new(), text_schema()).unwrap();
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        assert_eq!(reader.metadata().num_rows, 0);
        assert!(reader.metadata().row_groups.is_empty());
        assert!(reader.read_records().unwrap().is_empty());
    }

    #[test]
    fn test_small_row_groups_and_pages() {
        let config = WriterConfig {
            row_group_rows: 3,
            data_page_rows: 2,
            ..WriterConfig::default()
        };
        let mut writer = FileWriter::with_config(Vec::new(), text_schema(), config).unwrap();
        for record in text_records(8) {
            writer.append(record).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        // 8 rows in groups of 3 -> 3 row groups
        assert_eq!(reader.metadata().row_groups.len(), 3);
        assert_eq!(reader.read_records().unwrap(), text_records(8));
    }

    #[test]
    fn test_mismatched_record_is_rejected() {
        let mut writer = FileWriter::new(Vec::new(), text_schema()).unwrap();
        let err = writer
            .append(Record::from(vec![Value::Int32(1)]))
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_statistics_track_min_max() {
        let schema = Schema::new(vec![Field::int64("n")]);
        let mut writer = FileWriter::new(Vec::new(), schema).unwrap();
        for v in [5i64, -2, 9, 0] {
            writer.append(Record::from(vec![Value::Int64(v)])).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        let meta = reader.metadata().row_groups[0].columns[0]
            .meta_data
            .as_ref()
            .unwrap();
        let stats = meta.statistics.as_ref().unwrap();
        assert_eq!(stats.min_value.as_deref(), Some(&(-2i64).to_le_bytes()[..]));
        assert_eq!(stats.max_value.as_deref(), Some(&9i64.to_le_bytes()[..]));
        assert_eq!(stats.null_count, Some(0));
    }

    #[test]
    fn test_nan_drops_statistics() {
        let schema = Schema::new(vec![Field::double("x")]);
        let mut writer = FileWriter::new(Vec::new(), schema).unwrap();
        for v in [1.0, f64::NAN, 3.0] {
            writer.append(Record::from(vec![Value::Double(v)])).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        let meta = reader.metadata().row_groups[0].columns[0]
            .meta_data
            .as_ref()
            .unwrap();
        assert!(meta.statistics.is_none());
    }

    #[test]
    fn test_gzip_file_roundtrip() {
        let config = WriterConfig {
            compression: CompressionCodec::Gzip,
            ..WriterConfig::default()
        };
        let mut writer = FileWriter::with_config(Vec::new(), text_schema(), config).unwrap();
        for record in text_records(50) {
            writer.append(record).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let reader = FileReader::from_bytes(bytes.into()).unwrap();
        let meta = reader.metadata().row_groups[0].columns[0]
            .meta_data
            .as_ref()
            .unwrap();
        assert_eq!(meta.codec, CompressionCodec::Gzip);
        assert_eq!(reader.read_records().unwrap(), text_records(50));
    }
}
