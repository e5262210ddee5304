//! Dashboard Main Application
//! Main window with control panel and dashboard views.

use crate::data::{CsvColumns, DataLoader, Dataset, LoaderError};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use crate::stats::{Aggregator, DatasetOverview, ViewSettings};
use egui::{Color32, RichText, SidePanel};
use std::path::{Path, PathBuf};

/// Loaded data and everything derived once from it.
struct LoadedData {
    dataset: Dataset,
    overview: DatasetOverview,
    control_panel: ControlPanel,
}

impl LoadedData {
    fn new(dataset: Dataset) -> Self {
        Self {
            overview: Aggregator::overview(&dataset),
            control_panel: ControlPanel::new(&dataset),
            dataset,
        }
    }
}

enum DataState {
    Ready(LoadedData),
    Failed { path: PathBuf, message: String },
}

/// Main application window.
pub struct DashboardApp {
    state: DataState,
    columns: CsvColumns,
    settings: ViewSettings,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        path: PathBuf,
        loaded: Result<Dataset, LoaderError>,
        columns: CsvColumns,
        settings: ViewSettings,
    ) -> Self {
        let state = match loaded {
            Ok(dataset) => DataState::Ready(LoadedData::new(dataset)),
            Err(e) => DataState::Failed {
                path,
                message: e.to_string(),
            },
        };
        Self {
            state,
            columns,
            settings,
        }
    }

    /// Let the user locate the CSV after the startup load failed.
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        self.state = match DataLoader::load_csv(&path, &self.columns) {
            Ok(dataset) => DataState::Ready(LoadedData::new(dataset)),
            Err(e) => {
                log::error!("{}", e);
                DataState::Failed {
                    path,
                    message: e.to_string(),
                }
            }
        };
    }

    fn show_load_error(ctx: &egui::Context, path: &Path, message: &str) -> bool {
        let mut browse = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(
                    RichText::new("❌ Data could not be loaded")
                        .size(22.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(10.0);
                ui.label(message);
                ui.label(
                    RichText::new(format!(
                        "Make sure '{}' is in the working directory.",
                        path.display()
                    ))
                    .color(Color32::GRAY),
                );
                ui.add_space(15.0);
                if ui.button("📂 Browse").clicked() {
                    browse = true;
                }
            });
        });
        browse
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let DataState::Failed { path, message } = &self.state {
            if Self::show_load_error(ctx, path, message) {
                self.handle_browse_csv();
            }
            return;
        }
        let DataState::Ready(loaded) = &mut self.state else {
            return;
        };

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = loaded.control_panel.show(ui, &loaded.dataset);
                    if action == ControlPanelAction::SelectionChanged {
                        log::debug!("Selection changed: {:?}", loaded.control_panel.selection);
                    }
                });
            });

        let selection = &loaded.control_panel.selection;
        let views = Aggregator::compute_views(&loaded.dataset, selection, &self.settings);

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            Dashboard::show(ui, &loaded.overview, selection, &views);
        });
    }
}
