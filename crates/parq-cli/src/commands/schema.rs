//! Column schema listing.

use crate::{output, OutputFormat};
use anyhow::Result;
use parq_format::FileReader;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Show the column schema
#[derive(Debug, clap::Parser)]
pub struct SchemaCommand {
    /// Parquet file to read
    file: PathBuf,
}

#[derive(Serialize, Tabled)]
struct ColumnRow {
    name: String,
    #[tabled(rename = "type")]
    physical_type: String,
    #[tabled(rename = "logical")]
    converted_type: String,
}

impl SchemaCommand {
    pub fn execute(&self, format: OutputFormat) -> Result<()> {
        let reader = FileReader::open(&self.file)?;
        let schema = reader.schema()?;

        let rows: Vec<ColumnRow> = schema
            .fields()
            .iter()
            .map(|field| ColumnRow {
                name: field.name.clone(),
                physical_type: format!("{:?}", field.physical_type),
                converted_type: field
                    .converted_type
                    .map(|ty| format!("{:?}", ty))
                    .unwrap_or_else(|| "-".into()),
            })
            .collect();

        match format {
            OutputFormat::Json => println!("{}", output::to_json(&rows)?),
            OutputFormat::Table => output::print_table(rows),
        }

        Ok(())
    }
}
