use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecordsIntoIter};

use crate::config::{ChartConfig, LoaderConfig};
use crate::error::{LoadError, Result};

use super::delimiter::sniff_file;
use super::model::{Chart, Delimiter, Record, Series};

// ---------------------------------------------------------------------------
// Row iteration
// ---------------------------------------------------------------------------

/// Lazy, single-pass iterator over the non-empty records of a file.
///
/// Restarting requires reading the file again with [`read_table`].
pub struct Rows {
    path: PathBuf,
    records: StringRecordsIntoIter<File>,
}

impl std::fmt::Debug for Rows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows").field("path", &self.path).finish_non_exhaustive()
    }
}

impl Iterator for Rows {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(LoadError::csv(&self.path, e))),
            };
            if record.is_empty() {
                continue;
            }
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Some(Ok(Record {
                line,
                fields: record.iter().map(str::to_string).collect(),
            }));
        }
    }
}

/// Open `path` with the given delimiter and split off the header.
///
/// The header is the first non-empty record; everything after it is data.
pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<(Vec<String>, Rows)> {
    let reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::csv(path, e))?;

    let mut rows = Rows {
        path: path.to_path_buf(),
        records: reader.into_records(),
    };

    let header = match rows.next() {
        Some(record) => record?.fields,
        None => {
            return Err(LoadError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };

    Ok((header, rows))
}

// ---------------------------------------------------------------------------
// Column extraction
// ---------------------------------------------------------------------------

/// Parse a cell as `f64`, yielding `NaN` for anything that is not a number.
///
/// Surrounding whitespace is ignored and single underscores between digits
/// are accepted as separators (`1_000`).
pub fn parse_cell(text: &str) -> f64 {
    let text = text.trim();
    if !text.contains('_') {
        return text.parse::<f64>().unwrap_or(f64::NAN);
    }

    let bytes = text.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return f64::NAN;
    }
    text.replace('_', "").parse::<f64>().unwrap_or(f64::NAN)
}

/// Materialise the `selected` columns of every row as numeric series.
///
/// Unparseable cells become `NaN`. A row that lacks one of the selected
/// columns aborts the whole extraction with [`LoadError::RowTooShort`].
pub fn extract_columns<I>(rows: I, selected: &[usize], headers: &[String]) -> Result<Vec<Series>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut series: Vec<Series> = selected
        .iter()
        .map(|&column| Series {
            column,
            label: Series::label_for(headers, column),
            values: Vec::new(),
        })
        .collect();

    for row in rows {
        let row = row?;
        for s in series.iter_mut() {
            let cell = row
                .fields
                .get(s.column)
                .ok_or_else(|| LoadError::RowTooShort {
                    line: row.line,
                    column: s.column,
                    fields: row.fields.len(),
                })?;
            s.values.push(parse_cell(cell));
        }
    }

    Ok(series)
}

// ---------------------------------------------------------------------------
// OpenTable – a file waiting for the user's column choice
// ---------------------------------------------------------------------------

/// A table whose header has been read; the data rows are still on disk.
#[derive(Debug)]
pub struct OpenTable {
    pub path: PathBuf,
    pub delimiter: Delimiter,
    /// True when the delimiter came from the file name rather than content.
    pub delimiter_from_extension: bool,
    pub headers: Vec<String>,
    rows: Rows,
}

impl OpenTable {
    /// Sniff (unless `delimiter` is given) and read the header of `path`.
    pub fn open(path: &Path, delimiter: Option<Delimiter>, config: &LoaderConfig) -> Result<Self> {
        let (delimiter, delimiter_from_extension) = match delimiter {
            Some(d) => (d, false),
            None => {
                let sniffed = sniff_file(path, config)?;
                (sniffed.delimiter, sniffed.from_extension)
            }
        };

        let (headers, rows) = read_table(path, delimiter)?;
        log::debug!(
            "Opened {} ({delimiter}-separated) with headers {headers:?}",
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            delimiter,
            delimiter_from_extension,
            headers,
            rows,
        })
    }

    /// Stream the remaining rows into a chart of the `selected` columns.
    pub fn into_chart(self, selected: &[usize], config: &ChartConfig) -> Result<Chart> {
        let series = extract_columns(self.rows, selected, &self.headers)?;
        let title = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Chart {
            title,
            subtitle: self.path.display().to_string(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            series,
        })
    }
}
