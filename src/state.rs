use std::collections::VecDeque;
use std::path::Path;

use eframe::egui::Color32;

use crate::color::{dimmed, generate_palette};
use crate::config::PlotterConfig;
use crate::data::loader::OpenTable;
use crate::data::model::{Chart, Delimiter};
use crate::data::presenter::{begin_load, finish_load, Advisory, TablePresenter};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Chart tabs
// ---------------------------------------------------------------------------

/// One loaded file shown as a notebook tab.
#[derive(Debug, Clone)]
pub struct ChartTab {
    /// Stable for the life of the tab; keys the plot's zoom memory.
    pub id: u64,
    pub chart: Chart,
    /// One colour per series.
    pub colors: Vec<Color32>,
    /// Per-series visibility, flipped from the legend and the series list.
    pub visible: Vec<bool>,
}

/// One legend row. Hidden series keep their row, drawn dimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry<'a> {
    pub series: usize,
    pub label: &'a str,
    pub color: Color32,
    pub visible: bool,
}

impl ChartTab {
    pub fn new(id: u64, chart: Chart) -> Self {
        let n = chart.series.len();
        Self {
            id,
            chart,
            colors: generate_palette(n),
            visible: vec![true; n],
        }
    }

    pub fn is_visible(&self, series: usize) -> bool {
        self.visible.get(series).copied().unwrap_or(false)
    }

    /// Flip the visibility of one series.
    pub fn toggle(&mut self, series: usize) {
        if let Some(v) = self.visible.get_mut(series) {
            *v = !*v;
        }
    }

    /// Every series in legend order, whether shown or not.
    pub fn legend_entries(&self) -> Vec<LegendEntry<'_>> {
        self.chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let visible = self.is_visible(i);
                let color = self.colors.get(i).copied().unwrap_or(Color32::LIGHT_BLUE);
                LegendEntry {
                    series: i,
                    label: &s.label,
                    color: if visible { color } else { dimmed(color) },
                    visible,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Column dialog
// ---------------------------------------------------------------------------

/// The column checklist shown between opening a file and plotting it.
#[derive(Debug)]
pub struct ColumnDialog {
    pub table: OpenTable,
    /// One checkbox per header cell, all unchecked initially.
    pub checked: Vec<bool>,
}

impl ColumnDialog {
    pub fn new(table: OpenTable) -> Self {
        let checked = vec![false; table.headers.len()];
        Self { table, checked }
    }

    /// Checked column indices, in header order.
    pub fn selection(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn set_all(&mut self, checked: bool) {
        self.checked.iter_mut().for_each(|c| *c = checked);
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// A message box waiting to be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PlotterConfig,

    /// Loaded charts, one per tab.
    pub tabs: Vec<ChartTab>,

    /// Index into `tabs` of the tab being shown.
    pub active_tab: Option<usize>,

    /// Pending column selection (Some while the dialog is open).
    pub column_dialog: Option<ColumnDialog>,

    /// Message boxes, oldest first.
    pub notices: VecDeque<Notice>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Id handed to the next chart tab.
    next_tab_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlotterConfig::default())
    }
}

impl TablePresenter for AppState {
    fn advise(&mut self, advisory: Advisory) {
        self.notices.push_back(Notice {
            title: advisory.title().to_string(),
            message: advisory.to_string(),
            is_error: false,
        });
    }

    fn present(&mut self, chart: Chart) {
        self.tabs.push(ChartTab::new(self.next_tab_id, chart));
        self.next_tab_id += 1;
        self.active_tab = Some(self.tabs.len() - 1);
    }
}

impl AppState {
    pub fn new(config: PlotterConfig) -> Self {
        Self {
            config,
            tabs: Vec::new(),
            active_tab: None,
            column_dialog: None,
            notices: VecDeque::new(),
            status_message: None,
            next_tab_id: 0,
        }
    }

    /// Start loading `path`; on success the column dialog opens.
    pub fn open_file(&mut self, path: &Path, delimiter: Option<Delimiter>) {
        let config = self.config.clone();
        self.status_message = None;
        match begin_load(self, path, delimiter, &config) {
            Ok(table) => self.column_dialog = Some(ColumnDialog::new(table)),
            Err(e) => self.report_error(&e),
        }
    }

    /// OK pressed in the column dialog.
    pub fn confirm_columns(&mut self) {
        let Some(dialog) = self.column_dialog.take() else {
            return;
        };
        let config = self.config.clone();
        let selected = dialog.selection();
        if let Err(e) = finish_load(self, dialog.table, &selected, &config) {
            self.report_error(&e);
        }
    }

    /// Cancel pressed (or the dialog closed): drop the open file.
    pub fn cancel_columns(&mut self) {
        if let Some(dialog) = self.column_dialog.take() {
            log::debug!("{}: column selection cancelled", dialog.table.path.display());
        }
    }

    /// Queue a blocking message box for a failed load.
    pub fn report_error(&mut self, err: &LoadError) {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(&format!(": {cause}"));
            source = cause.source();
        }
        log::error!("Failed to load file: {message}");
        self.status_message = Some(format!("Error: {message}"));
        self.notices.push_back(Notice {
            title: err.title().to_string(),
            message,
            is_error: true,
        });
    }

    /// Dismiss the oldest notice.
    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut ChartTab> {
        self.active_tab.and_then(|i| self.tabs.get_mut(i))
    }

    /// Close a tab, keeping a sensible neighbour selected.
    pub fn close_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.tabs.remove(index);
        self.active_tab = match self.active_tab {
            _ if self.tabs.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.tabs.len() - 1)),
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_file(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn chart(labels: &[&str]) -> Chart {
        Chart {
            title: "t".to_string(),
            subtitle: "s".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: labels
                .iter()
                .enumerate()
                .map(|(column, label)| crate::data::model::Series {
                    column,
                    label: label.to_string(),
                    values: vec![1.0],
                })
                .collect(),
        }
    }

    #[test]
    fn open_then_confirm_adds_a_tab() {
        let file = temp_file("time,value\n1,10\n2,x\n3,30\n", ".csv");
        let mut state = AppState::default();

        state.open_file(file.path(), None);
        let dialog = state.column_dialog.as_mut().unwrap();
        assert_eq!(dialog.table.headers, vec!["time", "value"]);
        dialog.checked[1] = true;
        state.confirm_columns();

        assert!(state.column_dialog.is_none());
        assert!(state.notices.is_empty());
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.active_tab, Some(0));
        assert_eq!(state.tabs[0].chart.legend(), vec!["value"]);
        assert_eq!(state.tabs[0].visible, vec![true]);
    }

    #[test]
    fn confirming_nothing_leaves_no_chart() {
        let file = temp_file("a,b\n1,2\n", ".csv");
        let mut state = AppState::default();

        state.open_file(file.path(), None);
        state.confirm_columns();

        assert!(state.tabs.is_empty());
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].title, "No columns selected");
        assert!(!state.notices[0].is_error);

        // The app stays usable afterwards.
        state.dismiss_notice();
        state.open_file(file.path(), None);
        assert!(state.column_dialog.is_some());
    }

    #[test]
    fn cancel_drops_the_table() {
        let file = temp_file("a,b\n1,2\n", ".csv");
        let mut state = AppState::default();
        state.open_file(file.path(), None);
        state.cancel_columns();
        assert!(state.column_dialog.is_none());
        assert!(state.tabs.is_empty());
        assert!(state.notices.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let mut state = AppState::default();
        state.open_file(Path::new("/definitely/not/here.csv"), None);

        assert!(state.column_dialog.is_none());
        let notice = state.notices.front().unwrap();
        assert!(notice.is_error);
        assert!(notice.message.contains("/definitely/not/here.csv"));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn blank_file_is_an_error_notice() {
        let file = temp_file("\n\n\n", ".csv");
        let mut state = AppState::default();
        state.open_file(file.path(), None);
        assert_eq!(state.notices.front().unwrap().title, "Empty File");
        assert!(state.column_dialog.is_none());
    }

    #[test]
    fn dialog_select_all_and_none() {
        let file = temp_file("a,b,c\n1,2,3\n", ".csv");
        let mut state = AppState::default();
        state.open_file(file.path(), None);
        let dialog = state.column_dialog.as_mut().unwrap();

        dialog.set_all(true);
        assert_eq!(dialog.selection(), vec![0, 1, 2]);
        dialog.set_all(false);
        assert!(dialog.selection().is_empty());
        dialog.checked[2] = true;
        dialog.checked[0] = true;
        assert_eq!(dialog.selection(), vec![0, 2]);
    }

    #[test]
    fn toggling_flips_visibility() {
        let mut tab = ChartTab::new(0, chart(&["a", "b"]));
        tab.toggle(1);
        assert!(tab.is_visible(0));
        assert!(!tab.is_visible(1));
        tab.toggle(1);
        assert!(tab.is_visible(1));
        tab.toggle(9);
        assert!(!tab.is_visible(9));
    }

    #[test]
    fn hidden_series_stays_in_the_legend() {
        let mut tab = ChartTab::new(0, chart(&["a", "b"]));
        let shown_color = tab.legend_entries()[0].color;

        tab.toggle(0);
        let entries = tab.legend_entries();
        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert!(!entries[0].visible);
        assert_eq!(entries[0].color, dimmed(shown_color));
        assert!(entries[1].visible);

        // Clicking the same entry again brings it back.
        tab.toggle(entries[0].series);
        let entries = tab.legend_entries();
        assert!(entries[0].visible);
        assert_eq!(entries[0].color, shown_color);
    }

    #[test]
    fn tab_ids_survive_closing() {
        let mut state = AppState::default();
        for name in ["a", "b", "c"] {
            state.present(chart(&[name]));
        }
        let ids: Vec<u64> = state.tabs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        state.close_tab(0);
        let ids: Vec<u64> = state.tabs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        state.present(chart(&["d"]));
        assert_eq!(state.tabs.last().unwrap().id, 3);
    }

    #[test]
    fn closing_tabs_keeps_selection_sane() {
        let mut state = AppState::default();
        for name in ["a", "b", "c"] {
            state.present(chart(&[name]));
        }
        assert_eq!(state.active_tab, Some(2));

        state.close_tab(0);
        assert_eq!(state.active_tab, Some(1));
        state.close_tab(1);
        assert_eq!(state.active_tab, Some(0));
        state.close_tab(0);
        assert_eq!(state.active_tab, None);
        state.close_tab(5);
        assert!(state.tabs.is_empty());
    }
}
