//! Flat-file record store, the handoff point between the scout and the
//! publisher. The scout serializes enriched records; the publisher reads
//! them back schema-agnostically and mirrors whatever columns are present.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::types::InvestorRecord;

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write all records with the fixed header row, replacing any previous
    /// file contents.
    pub fn save(&self, records: &[InvestorRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("create {}", self.path.display()))?;
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("serialize record for {}", record.full_name))?;
        }
        writer.flush().context("flush CSV writer")?;
        info!(
            count = records.len(),
            path = %self.path.display(),
            "Saved records to CSV"
        );
        Ok(())
    }

    /// Read the file back as header-keyed string rows, in file order.
    pub fn load(&self) -> Result<CsvTable> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        let headers = reader
            .headers()
            .context("read CSV header")?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.context("read CSV row")?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(CsvTable { headers, rows })
    }
}

/// Ordered tabular view of the store file: a header row plus data rows,
/// with by-name cell lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zero-based column index of a field, if present.
    pub fn column(&self, field: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == field)
    }

    pub fn get(&self, row: usize, field: &str) -> Option<&str> {
        let col = self.column(field)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}
