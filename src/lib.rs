//! General Plotter - plot selected columns of CSV/TSV files.
//!
//! The data layer is toolkit-agnostic: [`data::presenter::plot_file`] drives a
//! whole load against any [`data::presenter::TablePresenter`], while the egui
//! front-end in [`app`] splits the same pipeline around its column dialog.
//!
//! ```ignore
//! use general_plotter::config::PlotterConfig;
//! use general_plotter::data::presenter::plot_file;
//!
//! let shown = plot_file(&mut my_presenter, Path::new("run.csv"), None, &PlotterConfig::default())?;
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::{LoadError, Result};
