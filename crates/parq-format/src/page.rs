//! Data page encoding and decoding.
//!
//! A data page is a Thrift-encoded [`PageHeader`] followed by the page's
//! (optionally compressed) PLAIN-encoded values. The header carries a CRC32
//! of the compressed bytes; when present it is verified before decoding.

use crate::metadata::{
    CompressionCodec, DataPageHeader, Encoding, PageHeader, PageType,
};
use crate::record::{check_value, Value};
use crate::schema::{ConvertedType, Field, PhysicalType};
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use parq_common::{Error, Result};
use parq_thrift::CompactReader;
use std::io::{Cursor, Read, Write};

/// A fully assembled page: header bytes plus page data.
#[derive(Debug, Clone)]
pub struct EncodedPage {
    /// Header and compressed data, ready to append to the file
    pub bytes: Vec<u8>,
    pub header: PageHeader,
}

/// PLAIN-encode a column's values.
///
/// Booleans are bit-packed LSB first; numeric types are fixed-width
/// little-endian; byte arrays carry a u32 length prefix.
pub fn encode_plain(field: &Field, values: &[Value]) -> Result<Vec<u8>> {
    for value in values {
        check_value(field, value)?;
    }

    let mut buf = Vec::new();
    match field.physical_type {
        PhysicalType::Boolean => {
            buf.resize((values.len() + 7) / 8, 0u8);
            for (i, value) in values.iter().enumerate() {
                if let Value::Boolean(true) = value {
                    buf[i / 8] |= 1 << (i % 8);
                }
            }
        }
        PhysicalType::Int32 => {
            for value in values {
                if let Value::Int32(v) = value {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        PhysicalType::Int64 => {
            for value in values {
                if let Value::Int64(v) = value {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        PhysicalType::Double => {
            for value in values {
                if let Value::Double(v) = value {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
            }
        }
        PhysicalType::ByteArray => {
            for value in values {
                let bytes = value.as_bytes().unwrap_or_default();
                buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                buf.extend_from_slice(bytes);
            }
        }
        other => {
            return Err(Error::Unsupported(format!(
                "Cannot encode {:?} values",
                other
            )))
        }
    }
    Ok(buf)
}

/// Decode `num_values` PLAIN values; the buffer must contain exactly them.
pub fn decode_plain(field: &Field, num_values: usize, data: &[u8]) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(num_values);
    match field.physical_type {
        PhysicalType::Boolean => {
            let needed = (num_values + 7) / 8;
            if data.len() != needed {
                return Err(Error::InvalidFile(format!(
                    "Boolean page has {} bytes, expected {}",
                    data.len(),
                    needed
                )));
            }
            for i in 0..num_values {
                values.push(Value::Boolean(data[i / 8] & (1 << (i % 8)) != 0));
            }
        }
        PhysicalType::Int32 => {
            let mut cursor = Cursor::new(data);
            for _ in 0..num_values {
                let v = cursor
                    .read_i32::<LittleEndian>()
                    .map_err(|_| truncated(field))?;
                values.push(Value::Int32(v));
            }
            check_drained(field, &cursor, data)?;
        }
        PhysicalType::Int64 => {
            let mut cursor = Cursor::new(data);
            for _ in 0..num_values {
                let v = cursor
                    .read_i64::<LittleEndian>()
                    .map_err(|_| truncated(field))?;
                values.push(Value::Int64(v));
            }
            check_drained(field, &cursor, data)?;
        }
        PhysicalType::Double => {
            let mut cursor = Cursor::new(data);
            for _ in 0..num_values {
                let v = cursor
                    .read_f64::<LittleEndian>()
                    .map_err(|_| truncated(field))?;
                values.push(Value::Double(v));
            }
            check_drained(field, &cursor, data)?;
        }
        PhysicalType::ByteArray => {
            let is_text = field.converted_type == Some(ConvertedType::Utf8);
            let mut pos = 0usize;
            for _ in 0..num_values {
                if pos + 4 > data.len() {
                    return Err(truncated(field));
                }
                let len =
                    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
                        as usize;
                pos += 4;
                if pos + len > data.len() {
                    return Err(truncated(field));
                }
                let bytes = data[pos..pos + len].to_vec();
                pos += len;
                if is_text {
                    let text = String::from_utf8(bytes).map_err(|_| {
                        Error::InvalidFile(format!("Column '{}' has non-UTF-8 text", field.name))
                    })?;
                    values.push(Value::Text(text));
                } else {
                    values.push(Value::Bytes(bytes));
                }
            }
            if pos != data.len() {
                return Err(trailing(field));
            }
        }
        other => {
            return Err(Error::Unsupported(format!(
                "Cannot decode {:?} values",
                other
            )))
        }
    }
    Ok(values)
}

fn truncated(field: &Field) -> Error {
    Error::InvalidFile(format!("Column '{}' data page is truncated", field.name))
}

fn trailing(field: &Field) -> Error {
    Error::InvalidFile(format!(
        "Column '{}' data page has trailing bytes",
        field.name
    ))
}

fn check_drained(field: &Field, cursor: &Cursor<&[u8]>, data: &[u8]) -> Result<()> {
    if cursor.position() as usize != data.len() {
        return Err(trailing(field));
    }
    Ok(())
}

/// The value's PLAIN bytes for column statistics. Byte arrays drop the
/// length prefix, per the format's statistics rules.
pub fn stat_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::Boolean(v) => vec![*v as u8],
        Value::Int32(v) => v.to_le_bytes().to_vec(),
        Value::Int64(v) => v.to_le_bytes().to_vec(),
        Value::Double(v) => v.to_le_bytes().to_vec(),
        Value::Bytes(b) => b.clone(),
        Value::Text(s) => s.as_bytes().to_vec(),
    }
}

fn compress(codec: CompressionCodec, data: &[u8]) -> Result<Vec<u8>> {
    match codec {
        CompressionCodec::Uncompressed => Ok(data.to_vec()),
        CompressionCodec::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        other => Err(Error::Unsupported(format!(
            "Compression codec {:?} is not supported",
            other
        ))),
    }
}

fn decompress(codec: CompressionCodec, data: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
    match codec {
        CompressionCodec::Uncompressed => Ok(data.to_vec()),
        CompressionCodec::Gzip => {
            let mut decoder = GzDecoder::new(data);
            let mut out = Vec::with_capacity(uncompressed_size);
            decoder.read_to_end(&mut out)?;
            Ok(out)
        }
        other => Err(Error::Unsupported(format!(
            "Compression codec {:?} is not supported",
            other
        ))),
    }
}

/// Build a complete data page for one run of column values.
pub fn build_data_page(
    field: &Field,
    values: &[Value],
    codec: CompressionCodec,
    with_crc: bool,
) -> Result<EncodedPage> {
    let raw = encode_plain(field, values)?;
    let compressed = compress(codec, &raw)?;

    let crc = if with_crc {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&compressed);
        Some(hasher.finalize() as i32)
    } else {
        None
    };

    let header = PageHeader {
        page_type: PageType::DataPage,
        uncompressed_page_size: raw.len() as i32,
        compressed_page_size: compressed.len() as i32,
        crc,
        data_page_header: Some(DataPageHeader {
            num_values: values.len() as i32,
            encoding: Encoding::Plain,
            definition_level_encoding: Encoding::Rle,
            repetition_level_encoding: Encoding::Rle,
        }),
    };

    let mut bytes = header.encode();
    bytes.extend_from_slice(&compressed);
    Ok(EncodedPage { bytes, header })
}

/// Read one data page from the start of `buf`.
///
/// Returns the header, the decoded values, and the bytes consumed so the
/// caller can advance to the next page.
pub fn read_data_page(
    field: &Field,
    codec: CompressionCodec,
    buf: &[u8],
) -> Result<(PageHeader, Vec<Value>, usize)> {
    let mut r = CompactReader::new(buf);
    let header = PageHeader::read_from(&mut r)?;
    let header_len = r.position();

    if header.page_type != PageType::DataPage {
        return Err(Error::Unsupported(format!(
            "Page type {:?} is not supported",
            header.page_type
        )));
    }
    let data_header = header
        .data_page_header
        .as_ref()
        .ok_or_else(|| Error::InvalidFile("Data page without data page header".into()))?;
    if data_header.encoding != Encoding::Plain {
        return Err(Error::Unsupported(format!(
            "Encoding {:?} is not supported",
            data_header.encoding
        )));
    }
    if data_header.num_values < 0
        || header.compressed_page_size < 0
        || header.uncompressed_page_size < 0
    {
        return Err(Error::InvalidFile("Negative size in page header".into()));
    }

    let compressed_size = header.compressed_page_size as usize;
    if header_len + compressed_size > buf.len() {
        return Err(Error::InvalidFile(format!(
            "Page data for column '{}' extends past end of file",
            field.name
        )));
    }
    let compressed = &buf[header_len..header_len + compressed_size];

    if let Some(expected) = header.crc {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(compressed);
        let actual = hasher.finalize();
        if actual != expected as u32 {
            return Err(Error::InvalidFile(format!(
                "Page checksum mismatch for column '{}': expected {:08x}, got {:08x}",
                field.name, expected as u32, actual
            )));
        }
    }

    let raw = decompress(codec, compressed, header.uncompressed_page_size as usize)?;
    if raw.len() != header.uncompressed_page_size as usize {
        return Err(Error::InvalidFile(format!(
            "Page for column '{}' decompressed to {} bytes, header says {}",
            field.name,
            raw.len(),
            header.uncompressed_page_size
        )));
    }

    let values = decode_plain(field, data_header.num_values as usize, &raw)?;
    Ok((header, values, header_len + compressed_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn text_values(texts: &[&str]) -> Vec<Value> {
        texts.iter().map(|t| Value::Text((*t).into())).collect()
    }

    #[test]
    fn test_plain_roundtrip_text() {
        let field = Field::utf8("Text");
        let values = text_values(&["text1", "text2", "", "a longer value"]);
        let encoded = encode_plain(&field, &values).unwrap();
        let decoded = decode_plain(&field, values.len(), &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_plain_roundtrip_numeric() {
        let field = Field::int32("a");
        let values = vec![Value::Int32(i32::MIN), Value::Int32(0), Value::Int32(i32::MAX)];
        let encoded = encode_plain(&field, &values).unwrap();
        assert_eq!(encoded.len(), 12);
        assert_eq!(decode_plain(&field, 3, &encoded).unwrap(), values);

        let field = Field::int64("b");
        let values = vec![Value::Int64(i64::MIN), Value::Int64(i64::MAX)];
        let encoded = encode_plain(&field, &values).unwrap();
        assert_eq!(decode_plain(&field, 2, &encoded).unwrap(), values);

        let field = Field::double("c");
        let values = vec![Value::Double(-1.5), Value::Double(2.25)];
        let encoded = encode_plain(&field, &values).unwrap();
        assert_eq!(decode_plain(&field, 2, &encoded).unwrap(), values);
    }

    #[test]
    fn test_boolean_bit_packing() {
        let field = Field::boolean("flag");
        // 10 values: crosses a byte boundary
        let values: Vec<Value> = (0..10).map(|i| Value::Boolean(i % 3 == 0)).collect();
        let encoded = encode_plain(&field, &values).unwrap();
        assert_eq!(encoded.len(), 2);
        // true at 0, 3, 6 -> 0b01001001
        assert_eq!(encoded[0], 0b0100_1001);
        assert_eq!(decode_plain(&field, 10, &encoded).unwrap(), values);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let field = Field::int32("a");
        let mut encoded = encode_plain(&field, &[Value::Int32(1)]).unwrap();
        encoded.push(0);
        assert!(decode_plain(&field, 1, &encoded).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_byte_array() {
        let field = Field::byte_array("raw");
        let encoded = encode_plain(&field, &[Value::Bytes(vec![1, 2, 3])]).unwrap();
        assert!(decode_plain(&field, 1, &encoded[..encoded.len() - 1]).is_err());
    }

    #[test]
    fn test_data_page_roundtrip() {
        let field = Field::utf8("Text");
        let values = text_values(&["text1", "text2", "text3"]);
        let page =
            build_data_page(&field, &values, CompressionCodec::Uncompressed, true).unwrap();
        assert!(page.header.crc.is_some());

        let (header, decoded, consumed) =
            read_data_page(&field, CompressionCodec::Uncompressed, &page.bytes).unwrap();
        assert_eq!(consumed, page.bytes.len());
        assert_eq!(header, page.header);
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_data_page_gzip_roundtrip() {
        let field = Field::utf8("Text");
        let values = text_values(&["repeated", "repeated", "repeated", "repeated"]);
        let page = build_data_page(&field, &values, CompressionCodec::Gzip, true).unwrap();

        let (header, decoded, _) =
            read_data_page(&field, CompressionCodec::Gzip, &page.bytes).unwrap();
        assert_eq!(decoded, values);
        assert!(header.uncompressed_page_size >= header.compressed_page_size);
    }

    #[test]
    fn test_corrupted_page_fails_checksum() {
        let field = Field::int64("n");
        let values = vec![Value::Int64(1), Value::Int64(2)];
        let page =
            build_data_page(&field, &values, CompressionCodec::Uncompressed, true).unwrap();

        let mut corrupted = page.bytes.clone();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xFF;
        let err = read_data_page(&field, CompressionCodec::Uncompressed, &corrupted).unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_unsupported_codec_is_rejected() {
        let field = Field::int32("a");
        let err =
            build_data_page(&field, &[Value::Int32(1)], CompressionCodec::Snappy, false)
                .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_stat_bytes_drop_length_prefix() {
        assert_eq!(stat_bytes(&Value::Text("abc".into())), b"abc".to_vec());
        assert_eq!(stat_bytes(&Value::Int32(1)), 1i32.to_le_bytes().to_vec());
    }
}
