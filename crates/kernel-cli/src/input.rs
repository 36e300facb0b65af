//! CSV signal tables.

use anyhow::{Context, Result};
use std::path::Path;

/// Named numeric columns read from (or written to) a CSV file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignalTable {
    /// Column names from the header row.
    pub headers: Vec<String>,

    /// Column data, one vector per header.
    pub columns: Vec<Vec<f64>>,
}

impl SignalTable {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Look up a column, failing with the available names.
    pub fn require(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Column '{}' not found (available: {})",
                name,
                self.headers.join(", ")
            )
        })
    }
}

/// Read a CSV table from disk.
pub fn read_table(path: &Path) -> Result<SignalTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signal file: {:?}", path))?;
    parse_table(&content).with_context(|| format!("Failed to parse signal file: {:?}", path))
}

/// Parse CSV text: a header line followed by rows of numbers.
///
/// Blank lines are skipped.
pub fn parse_table(content: &str) -> Result<SignalTable> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("Signal file is empty"))?;
    let headers: Vec<String> = header
        .split(',')
        .map(|h| h.trim().trim_matches('"').to_string())
        .collect();

    let mut columns = vec![Vec::new(); headers.len()];
    for (line_no, line) in lines {
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() != headers.len() {
            anyhow::bail!(
                "Line {}: expected {} columns, found {}",
                line_no,
                headers.len(),
                cells.len()
            );
        }
        for (col, cell) in cells.iter().enumerate() {
            let value: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "Line {}, column {} ('{}'): not a number: {:?}",
                    line_no,
                    col + 1,
                    headers[col],
                    cell.trim()
                )
            })?;
            columns[col].push(value);
        }
    }

    tracing::debug!(
        "Parsed {} columns x {} rows",
        headers.len(),
        columns.first().map_or(0, Vec::len)
    );
    Ok(SignalTable { headers, columns })
}
