//! Streaming delimited dataset reader
//!
//! Reads CSV and TSV files into the in-memory [`Dataset`] model with
//! automatic gzip decompression support. Cell typing happens here, once,
//! while rows stream in; later pipeline stages never re-parse raw text.

use crate::cell::{default_null_markers, parse_cell};
use crate::{Cell, Dataset, Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Configuration for the delimited reader
#[derive(Debug, Clone)]
pub struct DelimitedConfig {
    /// Markers treated as missing values (case-insensitive)
    pub null_markers: Vec<String>,
    /// Buffer size handed to the CSV parser
    pub buffer_size: usize,
}

impl Default for DelimitedConfig {
    fn default() -> Self {
        Self {
            null_markers: default_null_markers(),
            buffer_size: 64 * 1024,
        }
    }
}

/// Reader for header-delimited tabular files
pub struct DelimitedReader {
    reader: csv::Reader<Box<dyn Read>>,
    config: DelimitedConfig,
    rows_read: usize,
    missing_cells: usize,
    total_bytes: Option<u64>,
}

/// Pick the field delimiter from a file extension
fn delimiter_for(path: &Path) -> Option<u8> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Some(b','),
        Some("tsv") => Some(b'\t'),
        _ => None,
    }
}

impl DelimitedReader {
    /// Open a delimited file, auto-detecting gzip compression
    ///
    /// Supported inputs: `.csv`, `.tsv`, and their `.gz`-compressed forms
    /// (`data.csv.gz`). The delimiter comes from the inner extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("no file extension found".to_string()))?;

        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        match extension {
            "gz" => {
                // Delimiter from the inner extension: data.tsv.gz → tab
                let inner = path.file_stem().map(Path::new);
                let delimiter = inner.and_then(delimiter_for).unwrap_or(b',');
                debug!("Opening gzip-compressed delimited file: {:?}", path);
                let decoder: Box<dyn Read> = Box::new(GzDecoder::new(file));
                Ok(Self::from_reader(decoder, delimiter, None))
            }
            "csv" | "tsv" => {
                let delimiter = delimiter_for(path).unwrap_or(b',');
                debug!("Opening delimited file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(file);
                Ok(Self::from_reader(reader, delimiter, Some(total_bytes)))
            }
            other => Err(Error::UnsupportedFormat(format!(
                "unsupported file extension: {other}"
            ))),
        }
    }

    /// Build a reader over any byte source
    pub fn from_reader(source: Box<dyn Read>, delimiter: u8, total_bytes: Option<u64>) -> Self {
        let config = DelimitedConfig::default();
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .buffer_capacity(config.buffer_size)
            .flexible(false)
            .from_reader(source);
        Self {
            reader,
            config,
            rows_read: 0,
            missing_cells: 0,
            total_bytes,
        }
    }

    /// Override the null markers recognized on read
    pub fn with_null_markers(mut self, markers: Vec<String>) -> Self {
        self.config.null_markers = markers;
        self
    }

    /// Number of data rows read so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Number of cells parsed as missing so far
    pub fn missing_cells(&self) -> usize {
        self.missing_cells
    }

    /// Total file size in bytes, if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Read the whole file into a [`Dataset`]
    ///
    /// Any unparseable row (ragged width, invalid UTF-8) aborts the read
    /// with [`Error::Malformed`]; there is no partial result.
    pub fn read_dataset(mut self) -> Result<Dataset> {
        let headers = self
            .reader
            .headers()
            .map_err(|e| Error::Malformed(format!("header row: {e}")))?;
        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(Error::Malformed("missing header row".to_string()));
        }
        let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let width = columns.len();

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (idx, record) in self.reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let detail = match e.kind() {
                        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => Some(format!(
                            "row {}: has {} fields, expected {}",
                            idx + 1,
                            len,
                            expected_len
                        )),
                        csv::ErrorKind::Utf8 { .. } => {
                            Some(format!("row {}: invalid UTF-8", idx + 1))
                        }
                        _ => None,
                    };
                    return Err(match detail {
                        Some(detail) => Error::Malformed(detail),
                        None => Error::Csv(e),
                    });
                }
            };

            let mut cells = Vec::with_capacity(width);
            for field in record.iter() {
                let cell = parse_cell(field, &self.config.null_markers);
                if cell.is_missing() {
                    self.missing_cells += 1;
                }
                cells.push(cell);
            }
            self.rows_read += 1;
            rows.push(cells);
        }

        debug!(
            rows = self.rows_read,
            missing = self.missing_cells,
            "finished reading dataset"
        );
        Dataset::new(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn reader_from(data: &str) -> DelimitedReader {
        let cursor = std::io::Cursor::new(data.as_bytes().to_vec());
        DelimitedReader::from_reader(Box::new(cursor), b',', None)
    }

    #[test]
    fn test_read_basic_csv() {
        let data = "age,city\n25,NY\n30,LA\n";
        let ds = reader_from(data).read_dataset().unwrap();
        assert_eq!(ds.columns(), &["age".to_string(), "city".to_string()]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[0][0], Cell::Numeric(25.0));
        assert_eq!(ds.rows()[0][1], Cell::Text("NY".to_string()));
    }

    #[test]
    fn test_read_missing_cells() {
        let data = "age,city\n25,\nNA,LA\n";
        let ds = reader_from(data).read_dataset().unwrap();
        assert_eq!(ds.missing_count(), 2);
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let data = "a,b\n1,2\n3\n";
        let result = reader_from(data).read_dataset();
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_header_only_file() {
        let data = "a,b\n";
        let ds = reader_from(data).read_dataset().unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn test_open_unsupported_extension() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("parquet");
        std::fs::write(&path, "x").unwrap();
        let result = DelimitedReader::open(&path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_open_csv_file() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("csv");
        std::fs::write(&path, "a,b\n1,x\n").unwrap();

        let reader = DelimitedReader::open(&path).unwrap();
        assert!(reader.total_bytes().unwrap() > 0);
        let ds = reader.read_dataset().unwrap();
        assert_eq!(ds.row_count(), 1);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_open_gzip_csv() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("csv.gz");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "a,b").unwrap();
            writeln!(encoder, "1,compressed").unwrap();
            encoder.finish().unwrap();
        }

        let ds = DelimitedReader::open(&path).unwrap().read_dataset().unwrap();
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.rows()[0][1], Cell::Text("compressed".to_string()));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_tsv_delimiter() {
        let cursor = std::io::Cursor::new(b"a\tb\n1\tx\n".to_vec());
        let ds = DelimitedReader::from_reader(Box::new(cursor), b'\t', None)
            .read_dataset()
            .unwrap();
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.rows()[0][0], Cell::Numeric(1.0));
    }

    #[test]
    fn test_custom_null_markers() {
        let data = "a\nMISSING\n1\n";
        let ds = reader_from(data)
            .with_null_markers(vec!["missing".to_string()])
            .read_dataset()
            .unwrap();
        assert_eq!(ds.rows()[0][0], Cell::Missing);
        assert_eq!(ds.rows()[1][0], Cell::Numeric(1.0));
    }
}
