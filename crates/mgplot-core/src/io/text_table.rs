//! Plain-text numeric matrix reader.
//!
//! Reads the files the multigrid solver writes: one matrix row per line,
//! fields separated by whitespace (or commas / tabs for `.csv` / `.tsv`),
//! `#` comments and blank lines ignored. Every data row must have the same
//! number of columns.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// Field separator of a numeric text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Runs of spaces or tabs.
    #[default]
    Whitespace,
    Comma,
    Tab,
}

impl Delimiter {
    /// Guess the delimiter from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        match ext.as_deref() {
            Some("csv") => Delimiter::Comma,
            Some("tsv") => Delimiter::Tab,
            _ => Delimiter::Whitespace,
        }
    }

    fn as_byte(self) -> Option<u8> {
        match self {
            Delimiter::Whitespace => None,
            Delimiter::Comma => Some(b','),
            Delimiter::Tab => Some(b'\t'),
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" | "ws" | "space" => Ok(Delimiter::Whitespace),
            "comma" | "csv" | "," => Ok(Delimiter::Comma),
            "tab" | "tsv" | "\t" => Ok(Delimiter::Tab),
            _ => Err(format!(
                "Unknown delimiter: {}. Expected one of: whitespace, comma, tab",
                s
            )),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Delimiter::Whitespace => "whitespace",
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
        };
        f.write_str(name)
    }
}

/// Configuration for reading numeric text tables.
#[derive(Debug, Clone)]
pub struct TableReaderConfig {
    pub delimiter: Delimiter,
    /// Byte that starts a comment running to the end of the line.
    pub comment: u8,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Whitespace,
            comment: b'#',
        }
    }
}

/// Read a numeric table, choosing the delimiter from the file extension.
pub fn read_numeric_table<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let config = TableReaderConfig {
        delimiter: Delimiter::from_path(&path),
        ..TableReaderConfig::default()
    };
    read_numeric_table_with_config(path, &config)
}

/// Read a numeric table using a custom configuration.
pub fn read_numeric_table_with_config<P: AsRef<Path>>(
    path: P,
    config: &TableReaderConfig,
) -> Result<Array2<f64>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PlotError::FileNotFound(path.to_path_buf()));
    }

    let mut builder = MatrixBuilder::new(path);
    match config.delimiter.as_byte() {
        None => read_whitespace(path, config.comment, &mut builder)?,
        Some(delimiter) => read_delimited(path, delimiter, config.comment, &mut builder)?,
    }

    let matrix = builder.finish()?;
    log::debug!(
        "Read {}x{} table from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(matrix)
}

fn read_whitespace(path: &Path, comment: u8, builder: &mut MatrixBuilder) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::InvalidData {
            PlotError::data_format(path, "file is not valid UTF-8 text")
        } else {
            PlotError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let comment = comment as char;
    for (line_idx, line) in content.lines().enumerate() {
        let data = match line.find(comment) {
            Some(idx) => &line[..idx],
            None => line,
        };
        builder.push_row(line_idx + 1, data.split_whitespace())?;
    }
    Ok(())
}

fn read_delimited(
    path: &Path,
    delimiter: u8,
    comment: u8,
    builder: &mut MatrixBuilder,
) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(comment))
        .trim(csv::Trim::All)
        .from_path(path)?;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|err| {
            let utf8_line = match err.kind() {
                csv::ErrorKind::Utf8 { pos, .. } => Some(
                    pos.as_ref()
                        .map(|p| p.line() as usize)
                        .unwrap_or(row_idx + 1),
                ),
                _ => None,
            };
            match utf8_line {
                Some(line) => {
                    PlotError::data_format(path, format!("line {}: not valid UTF-8 text", line))
                }
                None => PlotError::Csv(err),
            }
        })?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(row_idx + 1);
        let fields = uncommented_fields(&record, comment as char);
        builder.push_row(line, fields.into_iter())?;
    }
    Ok(())
}

/// Fields of `record` up to an inline comment.
fn uncommented_fields(record: &csv::StringRecord, comment: char) -> Vec<&str> {
    let mut fields = Vec::with_capacity(record.len());
    for field in record.iter() {
        if let Some(idx) = field.find(comment) {
            let head = field[..idx].trim();
            if !head.is_empty() {
                fields.push(head);
            }
            return fields;
        }
        fields.push(field);
    }
    // A lone trailing delimiter leaves an empty last field.
    if fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

/// Accumulates rows into a dense row-major buffer while checking widths.
struct MatrixBuilder<'a> {
    path: &'a Path,
    values: Vec<f64>,
    n_rows: usize,
    n_cols: Option<usize>,
}

impl<'a> MatrixBuilder<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            values: Vec::new(),
            n_rows: 0,
            n_cols: None,
        }
    }

    fn push_row<'f, I>(&mut self, line: usize, fields: I) -> Result<()>
    where
        I: Iterator<Item = &'f str>,
    {
        let start = self.values.len();
        for field in fields {
            let value = field.parse::<f64>().map_err(|_| {
                PlotError::data_format(
                    self.path,
                    format!("line {}: cannot parse '{}' as a number", line, field),
                )
            })?;
            self.values.push(value);
        }

        let width = self.values.len() - start;
        if width == 0 {
            return Ok(());
        }

        match self.n_cols {
            None => self.n_cols = Some(width),
            Some(expected) if expected != width => {
                return Err(PlotError::data_format(
                    self.path,
                    format!(
                        "line {}: expected {} columns, found {}",
                        line, expected, width
                    ),
                ));
            }
            Some(_) => {}
        }
        self.n_rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<Array2<f64>> {
        let n_cols = self
            .n_cols
            .ok_or_else(|| PlotError::data_format(self.path, "no numeric rows found"))?;
        Array2::from_shape_vec((self.n_rows, n_cols), self.values)
            .map_err(|e| PlotError::data_format(self.path, e.to_string()))
    }
}
