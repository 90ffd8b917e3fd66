//! Parquet file reader.
//!
//! The reader buffers the whole file, validates the magic at both ends,
//! decodes the footer, and can walk the data pages back into records.

use crate::metadata::FileMetaData;
use crate::page;
use crate::record::{Record, Value};
use crate::schema::{Field, Repetition, Schema};
use crate::MAGIC;
use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Bytes;
use parq_common::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Leading magic, footer length, trailing magic
const MIN_FILE_SIZE: usize = MAGIC.len() + 4 + MAGIC.len();

/// A Parquet file held in memory with its decoded footer.
#[derive(Debug)]
pub struct FileReader {
    data: Bytes,
    metadata: FileMetaData,
    footer_start: usize,
    footer_len: u32,
}

impl FileReader {
    /// Read and validate the file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let reader = Self::from_bytes(data.into())?;
        debug!(
            path = %path.as_ref().display(),
            size = reader.file_size(),
            footer = reader.footer_length(),
            "opened Parquet file"
        );
        Ok(reader)
    }

    /// Validate and decode an in-memory file
    pub fn from_bytes(data: Bytes) -> Result<Self> {
        let len = data.len();
        if len < MIN_FILE_SIZE {
            return Err(Error::InvalidFile(format!(
                "File is {} bytes, smaller than any Parquet file",
                len
            )));
        }
        if &data[..MAGIC.len()] != MAGIC {
            return Err(Error::InvalidFile("Bad magic at start of file".into()));
        }
        if &data[len - MAGIC.len()..] != MAGIC {
            return Err(Error::InvalidFile("Bad magic at end of file".into()));
        }

        let mut length_bytes = &data[len - 8..len - 4];
        let footer_len = length_bytes.read_u32::<LittleEndian>()?;
        if footer_len as usize > len - MIN_FILE_SIZE {
            return Err(Error::InvalidFile(format!(
                "Footer length {} does not fit in a {} byte file",
                footer_len, len
            )));
        }
        let footer_start = len - 8 - footer_len as usize;

        let metadata = FileMetaData::decode(&data[footer_start..len - 8])?;
        Ok(Self {
            data,
            metadata,
            footer_start,
            footer_len,
        })
    }

    pub fn metadata(&self) -> &FileMetaData {
        &self.metadata
    }

    pub fn file_size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn footer_length(&self) -> u32 {
        self.footer_len
    }

    /// The undecoded footer bytes, for raw Thrift dumps
    pub fn raw_footer(&self) -> &[u8] {
        &self.data[self.footer_start..self.data.len() - 8]
    }

    /// Rebuild the flat schema from the footer's element list.
    pub fn schema(&self) -> Result<Schema> {
        let elements = &self.metadata.schema;
        let root = elements
            .first()
            .ok_or_else(|| Error::InvalidFile("Footer has an empty schema".into()))?;
        let children = root.num_children.unwrap_or(0);
        if children < 0 || elements.len() != children as usize + 1 {
            return Err(Error::Unsupported(
                "Nested schemas are not supported".into(),
            ));
        }

        let mut fields = Vec::with_capacity(children as usize);
        for element in &elements[1..] {
            if element.num_children.unwrap_or(0) > 0 {
                return Err(Error::Unsupported(
                    "Nested schemas are not supported".into(),
                ));
            }
            match element.repetition {
                Some(Repetition::Required) | None => {}
                Some(other) => {
                    return Err(Error::Unsupported(format!(
                        "Column '{}' is {:?}; only required columns are supported",
                        element.name, other
                    )))
                }
            }
            let physical_type = element.physical_type.ok_or_else(|| {
                Error::InvalidFile(format!("Column '{}' has no physical type", element.name))
            })?;
            fields.push(Field::new(
                element.name.clone(),
                physical_type,
                element.converted_type,
            ));
        }
        Ok(Schema::new(fields))
    }

    /// Decode every row group into records.
    pub fn read_records(&self) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(self.metadata.num_rows.max(0) as usize);
        for index in 0..self.metadata.row_groups.len() {
            records.extend(self.read_row_group(index)?);
        }
        Ok(records)
    }

    /// Decode one row group into records.
    pub fn read_row_group(&self, index: usize) -> Result<Vec<Record>> {
        let row_group = self.metadata.row_groups.get(index).ok_or_else(|| {
            Error::InvalidFile(format!("Row group {} out of range", index))
        })?;
        let schema = self.schema()?;
        if row_group.columns.len() != schema.len() {
            return Err(Error::InvalidFile(format!(
                "Row group {} has {} column chunks, schema has {} columns",
                index,
                row_group.columns.len(),
                schema.len()
            )));
        }

        let mut columns: Vec<Vec<Value>> = Vec::with_capacity(schema.len());
        for (field, chunk) in schema.fields().iter().zip(&row_group.columns) {
            let meta = chunk.meta_data.as_ref().ok_or_else(|| {
                Error::InvalidFile(format!("Column '{}' chunk has no metadata", field.name))
            })?;

            let mut pos = usize::try_from(meta.data_page_offset).map_err(|_| {
                Error::InvalidFile(format!(
                    "Column '{}' has negative data page offset",
                    field.name
                ))
            })?;
            if pos >= self.data.len() {
                return Err(Error::InvalidFile(format!(
                    "Column '{}' data page offset {} is past end of file",
                    field.name, pos
                )));
            }

            let mut values = Vec::with_capacity(meta.num_values.max(0) as usize);
            while (values.len() as i64) < meta.num_values {
                let (_, mut page_values, consumed) =
                    page::read_data_page(field, meta.codec, &self.data[pos..])?;
                if page_values.is_empty() {
                    return Err(Error::InvalidFile(format!(
                        "Empty data page in column '{}'",
                        field.name
                    )));
                }
                values.append(&mut page_values);
                pos += consumed;
            }
            if values.len() as i64 != meta.num_values {
                return Err(Error::InvalidFile(format!(
                    "Column '{}' pages hold {} values, chunk metadata says {}",
                    field.name,
                    values.len(),
                    meta.num_values
                )));
            }
            if values.len() as i64 != row_group.num_rows {
                return Err(Error::InvalidFile(format!(
                    "Column '{}' has {} values in a {} row group",
                    field.name,
                    values.len(),
                    row_group.num_rows
                )));
            }
            columns.push(values);
        }

        // Pivot column-major values back into rows
        let num_rows = row_group.num_rows as usize;
        let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let mut records = Vec::with_capacity(num_rows);
        for _ in 0..num_rows {
            let values = iters
                .iter_mut()
                .map(Iterator::next)
                .collect::<Option<Vec<Value>>>()
                .ok_or_else(|| Error::Internal("Column iterators out of step".into()))?;
            records.push(Record::new(values));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use crate::writer::FileWriter;

    fn sample_file() -> Vec<u8> {
        let schema = Schema::new(vec![Field::utf8("Text")]);
        let mut writer = FileWriter::new(Vec::new(), schema).unwrap();
        for i in 1..=5 {
            writer
                .append(Record::from(vec![Value::Text(format!("text{}", i))]))
                .unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_rejects_tiny_file() {
        let err = FileReader::from_bytes(Bytes::from_static(b"PAR1PAR")).unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
    }

    #[test]
    fn test_rejects_bad_leading_magic() {
        let mut bytes = sample_file();
        bytes[0] = b'X';
        let err = FileReader::from_bytes(bytes.into()).unwrap_err();
        assert!(err.to_string().contains("start of file"));
    }

    #[test]
    fn test_rejects_bad_trailing_magic() {
        let mut bytes = sample_file();
        let last = bytes.len() - 1;
        bytes[last] = b'X';
        let err = FileReader::from_bytes(bytes.into()).unwrap_err();
        assert!(err.to_string().contains("end of file"));
    }

    #[test]
    fn test_rejects_oversized_footer_length() {
        let mut bytes = sample_file();
        let len = bytes.len();
        bytes[len - 8..len - 4].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = FileReader::from_bytes(bytes.into()).unwrap_err();
        assert!(err.to_string().contains("Footer length"));
    }

    #[test]
    fn test_schema_reconstruction() {
        let reader = FileReader::from_bytes(sample_file().into()).unwrap();
        let schema = reader.schema().unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.fields()[0], Field::utf8("Text"));
    }

    #[test]
    fn test_metadata_surface() {
        let reader = FileReader::from_bytes(sample_file().into()).unwrap();
        assert_eq!(reader.metadata().version, 1);
        assert_eq!(reader.metadata().num_rows, 5);
        let created_by = reader.metadata().created_by.as_deref().unwrap();
        assert!(created_by.starts_with("parq version"));
        assert!(reader.footer_length() > 0);
        assert_eq!(
            reader.raw_footer().len() as u32,
            reader.footer_length()
        );
    }

    #[test]
    fn test_row_group_out_of_range() {
        let reader = FileReader::from_bytes(sample_file().into()).unwrap();
        assert!(reader.read_row_group(1).is_err());
    }
}
