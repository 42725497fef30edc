//! Built-in defaults for loading and charting.

use crate::data::model::Delimiter;

/// Knobs of the delimiter sniffer.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of non-blank lines sampled when sniffing.
    pub sample_lines: usize,
    /// File name suffixes that imply tab separation when content is inconclusive.
    pub tab_suffixes: Vec<String>,
    /// Delimiter used when content is inconclusive and no tab suffix matches.
    /// `None` makes that case an error instead.
    pub fallback_delimiter: Option<Delimiter>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sample_lines: 10,
            tab_suffixes: vec![".txt".to_string(), ".xlm".to_string()],
            fallback_delimiter: Some(Delimiter::Comma),
        }
    }
}

/// Axis labelling of produced charts.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_label: "Sample".to_string(),
            y_label: "Value".to_string(),
        }
    }
}

/// Everything the application needs, bundled.
#[derive(Debug, Clone)]
pub struct PlotterConfig {
    pub loader: LoaderConfig,
    pub chart: ChartConfig,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Smallest allowed window size in points.
    pub min_window_size: [f32; 2],
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            chart: ChartConfig::default(),
            window_size: [800.0, 600.0],
            min_window_size: [400.0, 300.0],
        }
    }
}
