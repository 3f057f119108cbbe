use crate::models::{Cell, ChartDocument, FieldType, Metadata, Row};
use crate::viz::Frame;
use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Parse one CSV cell according to its column type.
///
/// Empty cells are null. Linear and time cells that do not parse as numbers
/// are kept as text, so classification can report the offending row.
pub fn parse_cell(raw: &str, ty: FieldType) -> Cell {
    let raw = raw.trim();
    if raw.is_empty() {
        return Cell::Null;
    }
    match ty {
        FieldType::Ordinal => Cell::Text(raw.to_string()),
        FieldType::Linear | FieldType::Time => raw
            .parse::<f64>()
            .map(Cell::Number)
            .unwrap_or_else(|_| Cell::Text(raw.to_string())),
    }
}

/// Load rows from a CSV file with a header row.
///
/// Columns are matched to `metadata.names` by header name, so the file may
/// order (or extend) its columns freely.
pub fn load_rows_csv<P: AsRef<Path>>(path: P, metadata: &Metadata) -> Result<Vec<Row>> {
    metadata.validate()?;
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.clone();
    let columns = metadata
        .names
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("column '{name}' missing from {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = columns
            .iter()
            .zip(&metadata.types)
            .map(|(col, ty)| parse_cell(record.get(*col).unwrap_or_default(), *ty))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Load metadata, config and initial rows from a JSON document.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<ChartDocument> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let doc: ChartDocument = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    if doc.config.charts.is_empty() {
        bail!("{}: config declares no charts", path.display());
    }
    Ok(doc)
}

/// Save a computed frame as pretty JSON.
pub fn save_frame_json<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(frame)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_columns_are_matched_by_name() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("rows.csv");
        fs::write(&p, "EngineType,torque,rpm\npiston,42,1\nrotary,,2\n").unwrap();
        let metadata = Metadata::new(
            ["rpm", "torque", "EngineType"],
            vec![FieldType::Linear, FieldType::Linear, FieldType::Ordinal],
        );
        let rows = load_rows_csv(&p, &metadata).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![Cell::Number(1.0), Cell::Number(42.0), Cell::Text("piston".into())]
        );
        assert_eq!(rows[1][1], Cell::Null);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("rows.csv");
        fs::write(&p, "rpm,torque\n1,2\n").unwrap();
        let metadata = Metadata::new(
            ["rpm", "torque", "EngineType"],
            vec![FieldType::Linear, FieldType::Linear, FieldType::Ordinal],
        );
        let err = load_rows_csv(&p, &metadata).unwrap_err();
        assert!(err.to_string().contains("EngineType"));
    }
}
