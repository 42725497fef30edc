use eframe::egui::{self, Color32, Context, RichText, ScrollArea, Ui};

use crate::data::model::Delimiter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series list
// ---------------------------------------------------------------------------

/// Render the series list of the active chart. Each checkbox flips the same
/// visibility flag as the chart legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    let Some(tab) = state.active_tab_mut() else {
        ui.label("No chart open.");
        return;
    };

    ui.label(format!("{} rows", tab.chart.row_count()));
    ui.add_space(4.0);

    let mut toggled = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for entry in tab.legend_entries() {
                let mut checked = entry.visible;
                let text = RichText::new(entry.label).color(entry.color);
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(entry.series);
                }
            }
        });

    if let Some(i) = toggled {
        tab.toggle(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add(egui::Button::new("Open…").shortcut_text("Ctrl+O"))
                .clicked()
            {
                open_file_dialog(state, None);
                ui.close_menu();
            }
            if ui.button("Open as CSV…").clicked() {
                open_file_dialog(state, Some(Delimiter::Comma));
                ui.close_menu();
            }
            if ui.button("Open as TSV…").clicked() {
                open_file_dialog(state, Some(Delimiter::Tab));
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} chart(s) open", state.tabs.len()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Column selection dialog
// ---------------------------------------------------------------------------

/// Render the column checklist while a table is waiting for a selection.
pub fn column_dialog(ctx: &Context, state: &mut AppState) {
    let Some(dialog) = state.column_dialog.as_mut() else {
        return;
    };

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Select columns to plot")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(dialog.table.path.display().to_string()).weak());
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    dialog.set_all(true);
                }
                if ui.small_button("None").clicked() {
                    dialog.set_all(false);
                }
            });
            ui.separator();

            ScrollArea::vertical()
                .max_height(300.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    for (name, checked) in dialog.table.headers.iter().zip(dialog.checked.iter_mut()) {
                        ui.checkbox(checked, name.as_str());
                    }
                });

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_columns();
    } else if cancelled || !open {
        state.cancel_columns();
    }
}

// ---------------------------------------------------------------------------
// Message boxes
// ---------------------------------------------------------------------------

/// Render the oldest pending notice as a message box.
pub fn notices(ctx: &Context, state: &mut AppState) {
    let Some(notice) = state.notices.front() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(&notice.title)
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
        .show(ctx, |ui: &mut Ui| {
            let color = if notice.is_error {
                Color32::RED
            } else {
                Color32::YELLOW
            };
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(if notice.is_error { "⛔" } else { "⚠" }).color(color));
                ui.label(&notice.message);
            });
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        state.dismiss_notice();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for a file and start loading it, optionally forcing the delimiter.
pub fn open_file_dialog(state: &mut AppState, delimiter: Option<Delimiter>) {
    let file = rfd::FileDialog::new()
        .set_title("Open Data File")
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["txt", "xlm"])
        .add_filter("All Files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path, delimiter);
    }
}
