//! Dashboard Pendidikan - Indonesian education indicator dashboard
//!
//! Loads the indicator CSV once and renders descriptive-statistics views for
//! the selected indicator, year and provinces.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::anyhow;
use clap::Parser;
use config::Args;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let columns = args.csv_columns();
    let settings = args.view_settings();

    // A missing file is shown in the window instead of aborting startup
    let loaded = DataLoader::load_csv(&args.data, &columns);
    if let Err(e) = &loaded {
        log::error!("{}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Dashboard Pendidikan Indonesia"),
        ..Default::default()
    };

    let path = args.data.clone();
    eframe::run_native(
        "Dashboard Pendidikan Indonesia",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc, path, loaded, columns, settings,
            )))
        }),
    )
    .map_err(|e| anyhow!("Failed to start dashboard window: {}", e))
}
