//! Column schema for flat Parquet files.
//!
//! Schemas here are a flat list of required leaf columns under the root
//! group. Nested groups and optional/repeated fields are recognized in
//! metadata but rejected before any data is touched.

use parq_common::{Error, Result};
use serde::Serialize;

/// Physical storage type of a column.
///
/// All codes of the format are represented so foreign footers decode; only
/// the types with a [`crate::record::Value`] counterpart can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray,
}

impl PhysicalType {
    pub fn to_i32(self) -> i32 {
        match self {
            PhysicalType::Boolean => 0,
            PhysicalType::Int32 => 1,
            PhysicalType::Int64 => 2,
            PhysicalType::Int96 => 3,
            PhysicalType::Float => 4,
            PhysicalType::Double => 5,
            PhysicalType::ByteArray => 6,
            PhysicalType::FixedLenByteArray => 7,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(PhysicalType::Boolean),
            1 => Ok(PhysicalType::Int32),
            2 => Ok(PhysicalType::Int64),
            3 => Ok(PhysicalType::Int96),
            4 => Ok(PhysicalType::Float),
            5 => Ok(PhysicalType::Double),
            6 => Ok(PhysicalType::ByteArray),
            7 => Ok(PhysicalType::FixedLenByteArray),
            _ => Err(Error::Thrift(format!("Unknown physical type: {}", value))),
        }
    }

    /// Whether this implementation can encode and decode column data of
    /// this type (the rest decode in metadata only)
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            PhysicalType::Boolean
                | PhysicalType::Int32
                | PhysicalType::Int64
                | PhysicalType::Double
                | PhysicalType::ByteArray
        )
    }
}

/// Repetition of a schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Repetition {
    Required,
    Optional,
    Repeated,
}

impl Repetition {
    pub fn to_i32(self) -> i32 {
        match self {
            Repetition::Required => 0,
            Repetition::Optional => 1,
            Repetition::Repeated => 2,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Repetition::Required),
            1 => Ok(Repetition::Optional),
            2 => Ok(Repetition::Repeated),
            _ => Err(Error::Thrift(format!("Unknown repetition: {}", value))),
        }
    }
}

/// Logical annotation on a physical type.
///
/// Only UTF-8 text is produced by this writer; unknown codes read from
/// foreign files are dropped rather than failing the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConvertedType {
    Utf8,
}

impl ConvertedType {
    pub fn to_i32(self) -> i32 {
        match self {
            ConvertedType::Utf8 => 0,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ConvertedType::Utf8),
            _ => None,
        }
    }
}

/// A leaf column: name, physical type and optional annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub physical_type: PhysicalType,
    pub converted_type: Option<ConvertedType>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        physical_type: PhysicalType,
        converted_type: Option<ConvertedType>,
    ) -> Self {
        Self {
            name: name.into(),
            physical_type,
            converted_type,
        }
    }

    /// A UTF-8 text column (byte array annotated as UTF8)
    pub fn utf8(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::ByteArray, Some(ConvertedType::Utf8))
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::Boolean, None)
    }

    pub fn int32(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::Int32, None)
    }

    pub fn int64(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::Int64, None)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::Double, None)
    }

    pub fn byte_array(name: impl Into<String>) -> Self {
        Self::new(name, PhysicalType::ByteArray, None)
    }
}

/// A flat schema of required columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reject schemas this writer cannot produce
    pub fn validate_for_write(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::Schema("Schema has no columns".into()));
        }
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(Error::Schema("Column with empty name".into()));
            }
            if !field.physical_type.is_supported() {
                return Err(Error::Unsupported(format!(
                    "Column '{}' has unwritable type {:?}",
                    field.name, field.physical_type
                )));
            }
        }
        Ok(())
    }
}
