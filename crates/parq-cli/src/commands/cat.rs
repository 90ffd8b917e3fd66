//! Record dumping.

use anyhow::Result;
use parq_format::{FileReader, Record, Schema};
use std::path::PathBuf;

/// Dump decoded records as JSON lines
#[derive(Debug, clap::Parser)]
pub struct CatCommand {
    /// Parquet file to read
    file: PathBuf,

    /// Stop after this many records
    #[arg(short, long)]
    limit: Option<usize>,
}

impl CatCommand {
    pub fn execute(&self) -> Result<()> {
        let reader = FileReader::open(&self.file)?;
        let schema = reader.schema()?;
        let records = reader.read_records()?;

        let limit = self.limit.unwrap_or(usize::MAX);
        for record in records.iter().take(limit) {
            println!("{}", record_to_json(&schema, record)?);
        }
        Ok(())
    }
}

/// One record as a JSON object keyed by column name
fn record_to_json(schema: &Schema, record: &Record) -> Result<String> {
    let mut object = serde_json::Map::new();
    for (field, value) in schema.fields().iter().zip(&record.values) {
        object.insert(field.name.clone(), serde_json::to_value(value)?);
    }
    Ok(serde_json::Value::Object(object).to_string())
}
