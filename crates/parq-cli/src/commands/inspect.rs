//! File and footer summary.

use crate::{output, OutputFormat};
use anyhow::Result;
use parq_format::FileReader;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Show file size, footer length and footer contents
#[derive(Debug, clap::Parser)]
pub struct InspectCommand {
    /// Parquet file to inspect
    file: PathBuf,
}

#[derive(Serialize)]
struct InspectReport {
    file: String,
    file_size: u64,
    footer_length: u32,
    version: i32,
    num_rows: i64,
    created_by: Option<String>,
    columns: usize,
    row_groups: Vec<RowGroupSummary>,
}

#[derive(Serialize, Tabled)]
struct RowGroupSummary {
    #[tabled(rename = "group")]
    index: usize,
    rows: i64,
    columns: usize,
    #[tabled(rename = "uncompressed bytes")]
    total_byte_size: i64,
}

impl InspectCommand {
    pub fn execute(&self, format: OutputFormat) -> Result<()> {
        let reader = FileReader::open(&self.file)?;
        let metadata = reader.metadata();

        let report = InspectReport {
            file: self.file.display().to_string(),
            file_size: reader.file_size(),
            footer_length: reader.footer_length(),
            version: metadata.version,
            num_rows: metadata.num_rows,
            created_by: metadata.created_by.clone(),
            columns: metadata.schema.len().saturating_sub(1),
            row_groups: metadata
                .row_groups
                .iter()
                .enumerate()
                .map(|(index, group)| RowGroupSummary {
                    index,
                    rows: group.num_rows,
                    columns: group.columns.len(),
                    total_byte_size: group.total_byte_size,
                })
                .collect(),
        };

        match format {
            OutputFormat::Json => println!("{}", output::to_json(&report)?),
            OutputFormat::Table => {
                println!("File: {}", report.file);
                println!("Size: {} bytes", report.file_size);
                println!("Footer: {} bytes", report.footer_length);
                println!("Version: {}", report.version);
                println!("Rows: {}", report.num_rows);
                if let Some(created_by) = &report.created_by {
                    println!("Created by: {}", created_by);
                }
                println!("Columns: {}", report.columns);
                output::print_table(report.row_groups);
            }
        }

        Ok(())
    }
}
