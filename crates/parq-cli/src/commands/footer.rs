//! Raw footer dumping.

use crate::output;
use anyhow::Result;
use parq_format::FileReader;
use parq_thrift::{CompactReader, ThriftValue};
use std::path::PathBuf;

/// Dump the footer as a raw Thrift structure, field ids and all
#[derive(Debug, clap::Parser)]
pub struct FooterCommand {
    /// Parquet file to read
    file: PathBuf,
}

impl FooterCommand {
    pub fn execute(&self) -> Result<()> {
        let reader = FileReader::open(&self.file)?;
        let footer = reader.raw_footer();
        output::print_info(&format!("{} byte footer", footer.len()));

        let mut r = CompactReader::new(footer);
        let root = r.read_struct().map_err(anyhow::Error::from)?;
        render(&root, 0);
        Ok(())
    }
}

fn render(value: &ThriftValue, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        ThriftValue::Struct(fields) => {
            println!("{}struct {{", pad);
            for (id, field_value) in fields {
                match field_value {
                    ThriftValue::Struct(_) | ThriftValue::List(_) => {
                        println!("{}  field {}:", pad, id);
                        render(field_value, indent + 2);
                    }
                    scalar => println!("{}  field {}: {}", pad, id, scalar_text(scalar)),
                }
            }
            println!("{}}}", pad);
        }
        ThriftValue::List(items) => {
            println!("{}list of {}", pad, items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    ThriftValue::Struct(_) | ThriftValue::List(_) => render(item, indent + 1),
                    scalar => println!("{}  [{}] {}", pad, i, scalar_text(scalar)),
                }
            }
        }
        scalar => println!("{}{}", pad, scalar_text(scalar)),
    }
}

fn scalar_text(value: &ThriftValue) -> String {
    match value {
        ThriftValue::Bool(v) => format!("bool {}", v),
        ThriftValue::Byte(v) => format!("byte {}", v),
        ThriftValue::I16(v) => format!("i16 {}", v),
        ThriftValue::I32(v) => format!("i32 {}", v),
        ThriftValue::I64(v) => format!("i64 {}", v),
        ThriftValue::Double(v) => format!("double {}", v),
        ThriftValue::Binary(bytes) => match value.as_text() {
            Some(text) if !text.chars().any(char::is_control) => {
                format!("string \"{}\"", text)
            }
            _ => format!("binary of {} bytes", bytes.len()),
        },
        ThriftValue::List(_) => "list".into(),
        ThriftValue::Struct(_) => "struct".into(),
    }
}
