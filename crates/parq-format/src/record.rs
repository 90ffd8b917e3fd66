//! In-memory records passed to the writer and returned by the reader.

use crate::schema::{Field, PhysicalType, Schema};
use parq_common::{Error, Result};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    /// Raw byte-array value
    Bytes(Vec<u8>),
    /// UTF-8 byte-array value
    Text(String),
}

impl Value {
    /// The physical type this value is stored as
    pub fn kind(&self) -> PhysicalType {
        match self {
            Value::Boolean(_) => PhysicalType::Boolean,
            Value::Int32(_) => PhysicalType::Int32,
            Value::Int64(_) => PhysicalType::Int64,
            Value::Double(_) => PhysicalType::Double,
            Value::Bytes(_) | Value::Text(_) => PhysicalType::ByteArray,
        }
    }

    /// Approximate encoded size, used for batch accounting
    pub fn size_bytes(&self) -> usize {
        match self {
            Value::Boolean(_) => 1,
            Value::Int32(_) => 4,
            Value::Int64(_) | Value::Double(_) => 8,
            Value::Bytes(b) => 4 + b.len(),
            Value::Text(s) => 4 + s.len(),
        }
    }

    /// The value's byte-array payload, for statistics and comparisons
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Bytes(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for byte in v {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
        }
    }
}

/// One row: values in schema order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Record {
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn size_bytes(&self) -> usize {
        self.values.iter().map(Value::size_bytes).sum()
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// A batch of rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecordBatch {
    pub records: Vec<Record>,
}

impl RecordBatch {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn size_bytes(&self) -> usize {
        self.records.iter().map(Record::size_bytes).sum()
    }
}

impl From<Vec<Record>> for RecordBatch {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Check a record against a schema before it is buffered.
pub(crate) fn check_record(schema: &Schema, record: &Record) -> Result<()> {
    if record.len() != schema.len() {
        return Err(Error::Schema(format!(
            "Record has {} values, schema has {} columns",
            record.len(),
            schema.len()
        )));
    }
    for (value, field) in record.values.iter().zip(schema.fields()) {
        check_value(field, value)?;
    }
    Ok(())
}

pub(crate) fn check_value(field: &Field, value: &Value) -> Result<()> {
    if value.kind() != field.physical_type {
        return Err(Error::Schema(format!(
            "Column '{}' expects {:?}, got {:?}",
            field.name,
            field.physical_type,
            value.kind()
        )));
    }
    Ok(())
}
