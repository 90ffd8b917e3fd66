//! Generic decoded representation of compact-protocol data.
//!
//! Typed consumers match on field ids directly; this tree exists for tools
//! that want to show a footer without knowing its schema.

use crate::compact::{CompactReader, CompactType};
use parq_common::{Error, Result};

/// A single decoded Thrift value.
#[derive(Debug, Clone, PartialEq)]
pub enum ThriftValue {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    Binary(Vec<u8>),
    List(Vec<ThriftValue>),
    /// Field id, value pairs in wire order
    Struct(Vec<(i16, ThriftValue)>),
}

impl ThriftValue {
    /// The binary payload as text, if it is valid UTF-8
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ThriftValue::Binary(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl<'a> CompactReader<'a> {
    /// Decode a value of the given wire type into the generic tree.
    pub fn read_value(&mut self, ty: CompactType) -> Result<ThriftValue> {
        match ty {
            CompactType::Stop => Err(Error::Thrift("STOP is not a value".into())),
            CompactType::BooleanTrue => Ok(ThriftValue::Bool(true)),
            CompactType::BooleanFalse => Ok(ThriftValue::Bool(false)),
            CompactType::Byte => Ok(ThriftValue::Byte(self.read_byte()?)),
            CompactType::I16 => Ok(ThriftValue::I16(self.read_i16()?)),
            CompactType::I32 => Ok(ThriftValue::I32(self.read_i32()?)),
            CompactType::I64 => Ok(ThriftValue::I64(self.read_i64()?)),
            CompactType::Double => Ok(ThriftValue::Double(self.read_double()?)),
            CompactType::Binary => Ok(ThriftValue::Binary(self.read_binary()?)),
            CompactType::List | CompactType::Set => {
                let header = self.read_list_header()?;
                let mut elements = Vec::with_capacity(header.size.min(4096) as usize);
                for _ in 0..header.size {
                    elements.push(self.read_list_element(header.elem_ty)?);
                }
                Ok(ThriftValue::List(elements))
            }
            CompactType::Map => Err(Error::Thrift("Map values are not supported".into())),
            CompactType::Struct => self.read_struct(),
        }
    }

    /// Decode a struct body (fields until STOP) into the generic tree.
    pub fn read_struct(&mut self) -> Result<ThriftValue> {
        let mut fields = Vec::new();
        let mut last_field_id = 0i16;
        while let Some(header) = self.read_field_header(&mut last_field_id)? {
            let value = self.read_value(header.ty)?;
            fields.push((header.id, value));
        }
        Ok(ThriftValue::Struct(fields))
    }

    fn read_list_element(&mut self, ty: CompactType) -> Result<ThriftValue> {
        match ty {
            // In lists booleans take a full byte
            CompactType::BooleanTrue | CompactType::BooleanFalse => {
                Ok(ThriftValue::Bool(self.read_byte()? == 1))
            }
            other => self.read_value(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::CompactWriter;

    #[test]
    fn test_read_struct_tree() {
        let mut w = CompactWriter::new();
        w.write_i32_field(1, 1);
        w.write_field_begin(CompactType::List, 2);
        w.write_list_begin(CompactType::Binary, 2);
        w.write_binary(b"a");
        w.write_binary(b"b");
        w.write_i64_field(3, 5);
        w.write_string_field(6, "creator");
        w.write_stop();
        let bytes = w.into_bytes();

        let mut r = CompactReader::new(&bytes);
        let root = r.read_struct().unwrap();
        let ThriftValue::Struct(fields) = root else {
            panic!("expected struct");
        };
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], (1, ThriftValue::I32(1)));
        assert_eq!(
            fields[1],
            (
                2,
                ThriftValue::List(vec![
                    ThriftValue::Binary(b"a".to_vec()),
                    ThriftValue::Binary(b"b".to_vec()),
                ])
            )
        );
        assert_eq!(fields[2], (3, ThriftValue::I64(5)));
        assert_eq!(fields[3].1.as_text(), Some("creator"));
    }

    #[test]
    fn test_nested_struct_value() {
        let mut w = CompactWriter::new();
        w.write_field_begin(CompactType::Struct, 1);
        w.struct_begin();
        w.write_bool_field(1, true);
        w.struct_end();
        w.write_stop();
        let bytes = w.into_bytes();

        let mut r = CompactReader::new(&bytes);
        let root = r.read_struct().unwrap();
        assert_eq!(
            root,
            ThriftValue::Struct(vec![(
                1,
                ThriftValue::Struct(vec![(1, ThriftValue::Bool(true))])
            )])
        );
    }
}
