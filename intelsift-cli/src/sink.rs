//! CSV sink for aggregated result sets.
//!
//! The header row is the union of every column seen across the set, in
//! first-seen order; records that lack a column leave the cell blank.

use anyhow::{Context, Result};
use intelsift_core::ResultSet;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes a result set to a CSV file at `path`.
pub fn write_csv(set: &ResultSet, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv_to(set, file)?;
    info!(path = %path.display(), records = set.len(), "Wrote CSV");
    Ok(())
}

/// Writes a result set as CSV to any writer.
fn write_csv_to<W: Write>(set: &ResultSet, writer: W) -> Result<()> {
    let columns = set.columns();
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&columns)?;

    for record in set {
        let fields: HashMap<&str, String> = record.fields().into_iter().collect();
        let row: Vec<String> = columns
            .iter()
            .map(|column| fields.get(column).cloned().unwrap_or_default())
            .collect();
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
