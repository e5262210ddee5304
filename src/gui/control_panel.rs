//! Control Panel Widget
//! Left side panel with the indicator, year and province selectors.

use crate::data::{Dataset, ProvinceFilter, Selection, ALL_PROVINCES};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::BTreeSet;

/// Left side control panel.
pub struct ControlPanel {
    pub selection: Selection,
    /// Raw multi-select state, may contain [`ALL_PROVINCES`].
    checked_provinces: BTreeSet<String>,
}

impl ControlPanel {
    /// Start on the first indicator, the first year and every province.
    pub fn new(dataset: &Dataset) -> Self {
        let checked_provinces: BTreeSet<String> = [ALL_PROVINCES.to_string()].into();
        Self {
            selection: Selection {
                indicator: dataset.indicators().first().cloned().unwrap_or_default(),
                year: dataset.years().first().cloned().unwrap_or_default(),
                provinces: ProvinceFilter::from_selection(checked_provinces.iter().cloned()),
            },
            checked_provinces,
        }
    }

    fn sync_province_filter(&mut self) {
        self.selection.provinces =
            ProvinceFilter::from_selection(self.checked_provinces.iter().cloned());
    }

    fn toggle_province(&mut self, province: &str, checked: bool) {
        if checked {
            self.checked_provinces.insert(province.to_string());
        } else {
            self.checked_provinces.remove(province);
        }
        self.sync_province_filter();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &Dataset) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📚 Dashboard Pendidikan")
                    .size(20.0)
                    .color(Color32::from_rgb(102, 126, 234)),
            );
            ui.label(
                RichText::new("Indonesian education indicators")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        let label_width = 80.0;
        let combo_width = 200.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("📊 Indicator:"));
            ComboBox::from_id_salt("indicator")
                .width(combo_width)
                .selected_text(&self.selection.indicator)
                .show_ui(ui, |ui| {
                    for indicator in dataset.indicators() {
                        if ui
                            .selectable_label(self.selection.indicator == *indicator, indicator)
                            .clicked()
                        {
                            self.selection.indicator = indicator.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("📅 Year:"));
            ComboBox::from_id_salt("year")
                .width(combo_width)
                .selected_text(&self.selection.year)
                .show_ui(ui, |ui| {
                    for year in dataset.years() {
                        if ui
                            .selectable_label(self.selection.year == *year, year)
                            .clicked()
                        {
                            self.selection.year = year.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("🏛️ Provinces").size(14.0).strong());
        ui.label(
            RichText::new("Leave empty or keep \"Semua\" checked to include every province")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        let mut toggled: Option<(String, bool)> = None;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    let names = std::iter::once(ALL_PROVINCES).chain(
                        dataset.provinces().iter().map(String::as_str),
                    );
                    for name in names {
                        let mut checked = self.checked_provinces.contains(name);
                        if ui.checkbox(&mut checked, name).changed() {
                            toggled = Some((name.to_string(), checked));
                        }
                    }
                });
            });

        if let Some((name, checked)) = toggled {
            self.toggle_province(&name, checked);
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.checked_provinces = [ALL_PROVINCES.to_string()].into();
                self.sync_province_filter();
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.checked_provinces.clear();
                self.sync_province_filter();
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(10.0);
        let status = match &self.selection.provinces {
            ProvinceFilter::All => "Showing all provinces".to_string(),
            ProvinceFilter::Only(set) => format!("Showing {} selected provinces", set.len()),
        };
        ui.label(RichText::new(status).size(11.0).color(Color32::GRAY));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn dataset() -> Dataset {
        Dataset::from_observations(&[
            Observation::new("Bali", "2021", "Rata-rata Lama Sekolah", Some(9.0)),
            Observation::new("Aceh", "2020", "Harapan Lama Sekolah", Some(14.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let panel = ControlPanel::new(&dataset());
        assert_eq!(panel.selection.indicator, "Rata-rata Lama Sekolah");
        assert_eq!(panel.selection.year, "2020");
        assert!(panel.selection.provinces.is_all());
    }

    #[test]
    fn test_province_toggles() {
        let mut panel = ControlPanel::new(&dataset());
        panel.toggle_province("Aceh", true);
        assert!(panel.selection.provinces.is_all());

        panel.toggle_province(ALL_PROVINCES, false);
        assert_eq!(
            panel.selection.provinces,
            ProvinceFilter::from_selection(["Aceh"])
        );

        panel.toggle_province("Aceh", false);
        assert!(panel.selection.provinces.is_all());
    }
}
