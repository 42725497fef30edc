use std::fmt;

// ---------------------------------------------------------------------------
// Delimiter – the field separator of a table
// ---------------------------------------------------------------------------

/// Field separators the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// The separator as a single byte, as the `csv` reader wants it.
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

// ---------------------------------------------------------------------------
// DelimiterGuess – outcome of sniffing
// ---------------------------------------------------------------------------

/// Result of [`detect_delimiter`](super::delimiter::detect_delimiter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterGuess {
    /// Content shows a stable, non-zero count on every sampled line.
    Detected(Delimiter),
    /// Content was inconclusive; chosen from the file name instead.
    Fallback(Delimiter),
    /// Nothing to go on.
    Undetermined,
}

// ---------------------------------------------------------------------------
// Record – one parsed data row
// ---------------------------------------------------------------------------

/// A non-empty record together with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source file.
    pub line: u64,
    pub fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// Series / Chart – what the renderer consumes
// ---------------------------------------------------------------------------

/// One selected column materialised as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Index of the column in the header.
    pub column: usize,
    /// Legend label; never empty.
    pub label: String,
    /// One value per data row, `NaN` where the cell is not a number.
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label shown for a header cell: its text, or `Column N` when blank.
    pub fn label_for(headers: &[String], column: usize) -> String {
        match headers.get(column) {
            Some(head) if !head.is_empty() => head.clone(),
            _ => format!("Column {}", column + 1),
        }
    }
}

/// A fully loaded chart, ready to hand to a presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// File name.
    pub title: String,
    /// Full path of the file.
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// Legend labels in series order.
    pub fn legend(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Number of data rows (all series have the same length).
    pub fn row_count(&self) -> usize {
        self.series.first().map(Series::len).unwrap_or(0)
    }
}
