//! Delimited dataset writer

use crate::{Dataset, Error, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Write a dataset to a delimited file
///
/// The delimiter follows the output extension (`.csv` or `.tsv`). Column
/// order is preserved; missing cells serialize as empty fields and numeric
/// cells in canonical form, matching what the reader parses back.
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => b',',
        Some("tsv") => b'\t',
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "unsupported output extension: {}",
                other.unwrap_or("<none>")
            )))
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(file);

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|cell| cell.canonical()))?;
    }
    writer.flush()?;

    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        path = %path.display(),
        "wrote dataset"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, DelimitedReader};
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let ds = Dataset::new(
            vec!["age".to_string(), "city".to_string()],
            vec![
                vec![Cell::Numeric(25.0), Cell::Text("ny".to_string())],
                vec![Cell::Numeric(30.5), Cell::Text("la".to_string())],
            ],
        )
        .unwrap();

        write_dataset(&ds, &path).unwrap();
        let back = DelimitedReader::open(&path).unwrap().read_dataset().unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn test_canonical_numeric_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let ds = Dataset::new(
            vec!["n".to_string()],
            vec![vec![Cell::Numeric(25.0)], vec![Cell::Missing]],
        )
        .unwrap();
        write_dataset(&ds, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "n\n25\n\"\"\n");
    }

    #[test]
    fn test_unsupported_output_extension() {
        let ds = Dataset::empty();
        let result = write_dataset(&ds, "out.parquet");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
