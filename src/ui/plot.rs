use eframe::egui::{self, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::state::{AppState, ChartTab};

// ---------------------------------------------------------------------------
// Line segmentation
// ---------------------------------------------------------------------------

/// Split a series into drawable runs of `[sample, value]` points.
///
/// Non-finite values (cells that were not numbers) break the line rather
/// than being drawn.
pub fn segments(values: &[f64]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            current.push([i as f64, v]);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ---------------------------------------------------------------------------
// Chart notebook (central panel)
// ---------------------------------------------------------------------------

/// Render the tab strip and the active chart.
pub fn chart_notebook(ui: &mut Ui, state: &mut AppState) {
    if state.tabs.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to plot columns  (File → Open…)");
        });
        return;
    }

    let mut close = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, tab) in state.tabs.iter().enumerate() {
            let selected = state.active_tab == Some(i);
            if ui.selectable_label(selected, &tab.chart.title).clicked() {
                state.active_tab = Some(i);
            }
            if ui.small_button("×").on_hover_text("Close tab").clicked() {
                close = Some(i);
            }
            ui.separator();
        }
    });
    if let Some(i) = close {
        state.close_tab(i);
    }
    ui.separator();

    if let Some(tab) = state.active_tab_mut() {
        chart_plot(ui, tab);
    }
}

/// Render one chart: title, subtitle and legend above an interactive line
/// plot. Clicking a legend entry hides or shows its series.
pub fn chart_plot(ui: &mut Ui, tab: &mut ChartTab) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&tab.chart.title).heading());
        ui.label(RichText::new(&tab.chart.subtitle).weak());
    });

    let mut toggled = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for entry in tab.legend_entries() {
            let text = RichText::new(format!("━ {}", entry.label)).color(entry.color);
            let text = if entry.visible { text } else { text.strikethrough() };
            if ui
                .add(egui::Label::new(text).sense(egui::Sense::click()))
                .on_hover_text("Click to hide / show")
                .clicked()
            {
                toggled = Some(entry.series);
            }
        }
    });
    if let Some(i) = toggled {
        tab.toggle(i);
    }

    let chart = &tab.chart;
    Plot::new(("chart", tab.id))
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, series) in chart.series.iter().enumerate() {
                if !tab.is_visible(i) {
                    continue;
                }
                let color = tab.colors.get(i).copied().unwrap_or(egui::Color32::LIGHT_BLUE);

                for run in segments(&series.values) {
                    let points: PlotPoints = run.into_iter().collect();
                    let line = Line::new(points)
                        .name(&series.label)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });
}
