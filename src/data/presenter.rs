use std::fmt;
use std::path::Path;

use crate::config::PlotterConfig;
use crate::error::Result;

use super::loader::OpenTable;
use super::model::{Chart, Delimiter};

// ---------------------------------------------------------------------------
// Advisory – non-blocking notices
// ---------------------------------------------------------------------------

/// A user-visible warning that does not abort the load by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Content was inconclusive; the delimiter was chosen from the extension.
    AmbiguousDelimiter { fallback: Delimiter },
    /// The column prompt was confirmed with nothing checked.
    NoColumnsSelected,
}

impl Advisory {
    pub fn title(&self) -> &'static str {
        match self {
            Advisory::AmbiguousDelimiter { .. } => "Unknown File Type",
            Advisory::NoColumnsSelected => "No columns selected",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::AmbiguousDelimiter { fallback } => write!(
                f,
                "Unable to deduce file type based on content, using extension ({fallback})"
            ),
            Advisory::NoColumnsSelected => write!(f, "You did not select any columns"),
        }
    }
}

// ---------------------------------------------------------------------------
// Presenter capabilities
// ---------------------------------------------------------------------------

/// What a front-end must offer for the loader to report to it.
pub trait TablePresenter {
    /// Show a non-blocking notice.
    fn advise(&mut self, advisory: Advisory);
    /// Display a finished chart.
    fn present(&mut self, chart: Chart);
}

/// A front-end that can ask for the columns synchronously.
pub trait ColumnPrompt {
    /// `None` means the prompt was cancelled; `Some(vec![])` means it was
    /// confirmed with nothing selected.
    fn select_columns(&mut self, headers: &[String]) -> Option<Vec<usize>>;
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// First half of a load: resolve the delimiter and read the header.
///
/// The returned table keeps the file open until the caller has a column
/// selection for [`finish_load`].
pub fn begin_load<P: TablePresenter + ?Sized>(
    presenter: &mut P,
    path: &Path,
    delimiter: Option<Delimiter>,
    config: &PlotterConfig,
) -> Result<OpenTable> {
    let table = OpenTable::open(path, delimiter, &config.loader)?;
    if table.delimiter_from_extension {
        let advisory = Advisory::AmbiguousDelimiter {
            fallback: table.delimiter,
        };
        log::warn!("{}: {advisory}", path.display());
        presenter.advise(advisory);
    }
    Ok(table)
}

/// Second half of a load: extract `selected` and hand the chart over.
///
/// Returns whether a chart was presented.
pub fn finish_load<P: TablePresenter + ?Sized>(
    presenter: &mut P,
    table: OpenTable,
    selected: &[usize],
    config: &PlotterConfig,
) -> Result<bool> {
    if selected.is_empty() {
        log::warn!("{}: no columns selected", table.path.display());
        presenter.advise(Advisory::NoColumnsSelected);
        return Ok(false);
    }

    let chart = table.into_chart(selected, &config.chart)?;
    log::info!(
        "Loaded {} rows of {:?} from {}",
        chart.row_count(),
        chart.legend(),
        chart.subtitle
    );
    presenter.present(chart);
    Ok(true)
}

/// Run a whole load against a presenter that can answer the column prompt
/// directly. Returns whether a chart was presented.
pub fn plot_file<P: TablePresenter + ColumnPrompt + ?Sized>(
    presenter: &mut P,
    path: &Path,
    delimiter: Option<Delimiter>,
    config: &PlotterConfig,
) -> Result<bool> {
    let table = begin_load(presenter, path, delimiter, config)?;
    let Some(selected) = presenter.select_columns(&table.headers) else {
        log::debug!("{}: column selection cancelled", path.display());
        return Ok(false);
    };
    finish_load(presenter, table, &selected, config)
}
