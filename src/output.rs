//! CSV output for generated tables.
//!
//! Tables are written as plain comma-separated text with a header row,
//! optionally gzip-compressed.

use crate::config::ConfigLoader;
use crate::error::ConfigResult;
use crate::generate::Dataset;
use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A row that can be written as CSV.
pub trait CsvRecord {
    /// Column names, in field order.
    const HEADER: &'static [&'static str];

    /// Field values, unescaped, in header order.
    fn fields(&self) -> Vec<String>;
}

/// Quote a field if it contains a comma, quote or newline.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Render records as CSV text, header first.
pub fn to_csv_string<R: CsvRecord>(records: &[R]) -> String {
    let mut csv = String::new();
    csv.push_str(&R::HEADER.join(","));
    csv.push('\n');
    for record in records {
        let fields = record.fields();
        let values: Vec<Cow<'_, str>> = fields.iter().map(|f| escape_field(f)).collect();
        csv.push_str(&values.join(","));
        csv.push('\n');
    }
    csv
}

/// File names for each table, from `data.files.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub customers: String,
    pub transactions: String,
    pub support_calls: String,
    pub usage_data: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            customers: "customers.csv".to_string(),
            transactions: "transactions.csv".to_string(),
            support_calls: "support_calls.csv".to_string(),
            usage_data: "usage_data.csv".to_string(),
        }
    }
}

impl OutputFiles {
    pub fn from_config(config: &ConfigLoader) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            customers: config.get_as_or("data.files.customers", defaults.customers)?,
            transactions: config.get_as_or("data.files.transactions", defaults.transactions)?,
            support_calls: config.get_as_or("data.files.support_calls", defaults.support_calls)?,
            usage_data: config.get_as_or("data.files.usage_data", defaults.usage_data)?,
        })
    }
}

/// Output directory from `data.raw_dir`, defaulting to `data/raw`.
pub fn raw_dir(config: &ConfigLoader) -> ConfigResult<PathBuf> {
    config
        .get_as_or("data.raw_dir", "data/raw".to_string())
        .map(PathBuf::from)
}

/// Writes tables into one directory.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    dir: PathBuf,
    gzip: bool,
}

impl CsvWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            gzip: false,
        }
    }

    /// Compress output and append `.gz` to file names.
    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final path for a table file.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        if self.gzip {
            self.dir.join(format!("{file_name}.gz"))
        } else {
            self.dir.join(file_name)
        }
    }

    /// Write one table, creating the directory if needed.
    pub fn write<R: CsvRecord>(&self, file_name: &str, records: &[R]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;

        let path = self.path_for(file_name);
        let csv = to_csv_string(records);

        if self.gzip {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(csv.as_bytes())?;
            encoder.finish()?;
        } else {
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        info!(path = %path.display(), rows = records.len(), "Saved table");
        Ok(path)
    }

    /// Write all four tables, returning the paths in table order.
    pub fn write_dataset(&self, dataset: &Dataset, files: &OutputFiles) -> Result<Vec<PathBuf>> {
        Ok(vec![
            self.write(&files.customers, &dataset.customers)?,
            self.write(&files.transactions, &dataset.transactions)?,
            self.write(&files.support_calls, &dataset.support_calls)?,
            self.write(&files.usage_data, &dataset.usage)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    struct Row(&'static str, u32);

    impl CsvRecord for Row {
        const HEADER: &'static [&'static str] = &["name", "count"];

        fn fields(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_to_csv_string() {
        let rows = [Row("North", 3), Row("South, East", 4)];
        assert_eq!(
            to_csv_string(&rows),
            "name,count\nNorth,3\n\"South, East\",4\n"
        );
    }

    #[test]
    fn test_empty_table_has_header() {
        let rows: [Row; 0] = [];
        assert_eq!(to_csv_string(&rows), "name,count\n");
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let writer = CsvWriter::new(temp.path().join("data").join("raw"));
        let path = writer.write("rows.csv", &[Row("a", 1)]).unwrap();

        assert_eq!(path, temp.path().join("data").join("raw").join("rows.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "name,count\na,1\n");
    }

    #[test]
    fn test_gzip_output_decompresses() {
        let temp = TempDir::new().unwrap();
        let writer = CsvWriter::new(temp.path()).with_gzip(true);
        let path = writer.write("rows.csv", &[Row("a", 1), Row("b", 2)]).unwrap();
        assert_eq!(path, temp.path().join("rows.csv.gz"));

        let file = std::fs::File::open(&path).unwrap();
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut text = String::new();
        decoder.read_to_string(&mut text).unwrap();
        assert_eq!(text, "name,count\na,1\nb,2\n");
    }
}
