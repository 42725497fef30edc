use eframe::egui;
use general_plotter::app::GeneralPlotterApp;
use general_plotter::config::PlotterConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = PlotterConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "General Plotter",
        options,
        Box::new(|_cc| Ok(Box::new(GeneralPlotterApp::new(config)))),
    )
}
