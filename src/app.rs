use eframe::egui;

use crate::config::PlotterConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GeneralPlotterApp {
    pub state: AppState,
}

impl GeneralPlotterApp {
    pub fn new(config: PlotterConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for GeneralPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Shortcut: Ctrl+O ----
        let open_requested =
            ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::O));
        if open_requested && self.state.column_dialog.is_none() {
            panels::open_file_dialog(&mut self.state, None);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series visibility ----
        egui::SidePanel::left("series_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_notebook(ui, &mut self.state);
        });

        // ---- Floating windows ----
        panels::column_dialog(ctx, &mut self.state);
        panels::notices(ctx, &mut self.state);
    }
}
