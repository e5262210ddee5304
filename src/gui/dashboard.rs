//! Dashboard Widget
//! Central scrollable panel: KPI strip followed by one card per view.

use crate::charts::{format_value, ChartPlotter, PRIMARY, SECONDARY};
use crate::data::Selection;
use crate::stats::{DashboardViews, DatasetOverview, SummaryStats};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;

/// Renders one pass of [`DashboardViews`].
pub struct Dashboard;

impl Dashboard {
    pub fn show(
        ui: &mut egui::Ui,
        overview: &DatasetOverview,
        selection: &Selection,
        views: &DashboardViews,
    ) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_header(ui);
                Self::draw_overview(ui, overview);
                ui.add_space(CARD_SPACING);

                Self::card(ui, format!("📈 {} over time", selection.indicator), |ui| {
                    if views.time_series.points.is_empty() {
                        ChartPlotter::draw_notice(ui, "No data available for the trend chart.");
                        return;
                    }
                    ChartPlotter::draw_trend_chart(ui, &views.time_series);
                    let years = &views.time_series.points;
                    if let (Some(first), Some(last)) = (years.first(), years.last()) {
                        ChartPlotter::draw_insight(
                            ui,
                            &format!(
                                "Change in the mean {} from {} to {}: {:+.2}",
                                selection.indicator,
                                first.year,
                                last.year,
                                views.time_series.trend_change()
                            ),
                        );
                    }
                });

                ui.columns(2, |columns| {
                    Self::card(
                        &mut columns[0],
                        format!(
                            "🏆 Top {} provinces - {} ({})",
                            views.top.len(),
                            selection.indicator,
                            selection.year
                        ),
                        |ui| {
                            if views.top.is_empty() {
                                ChartPlotter::draw_notice(ui, "No data for this year.");
                            } else {
                                ChartPlotter::draw_ranking_chart(ui, "top_ranking", &views.top, PRIMARY);
                            }
                        },
                    );
                    Self::card(
                        &mut columns[1],
                        format!(
                            "📉 Bottom {} provinces - {} ({})",
                            views.bottom.len(),
                            selection.indicator,
                            selection.year
                        ),
                        |ui| {
                            if views.bottom.is_empty() {
                                ChartPlotter::draw_notice(ui, "No data for this year.");
                            } else {
                                ChartPlotter::draw_ranking_chart(
                                    ui,
                                    "bottom_ranking",
                                    &views.bottom,
                                    SECONDARY,
                                );
                            }
                        },
                    );
                });

                let heatmap = &views.heatmap;
                Self::card(
                    ui,
                    format!("🗺️ {} by province and year", selection.indicator),
                    |ui| {
                        if heatmap.is_truncated() {
                            ui.label(
                                RichText::new(format!(
                                    "Showing the {} highest of {} provinces",
                                    heatmap.rows.len(),
                                    heatmap.total_provinces
                                ))
                                .size(11.0)
                                .color(Color32::GRAY),
                            );
                        }
                        ChartPlotter::draw_heatmap(ui, heatmap);
                    },
                );

                Self::card(
                    ui,
                    "📊 Correlation: expected vs mean years of schooling".to_string(),
                    |ui| match &views.correlation {
                        None => ChartPlotter::draw_notice(
                            ui,
                            "Indicators 'Harapan Lama Sekolah' and 'Rata-rata Lama Sekolah' were not found in the data.",
                        ),
                        Some(view) if view.points.is_empty() => ChartPlotter::draw_notice(
                            ui,
                            "No province has both indicators for the current filter.",
                        ),
                        Some(view) => {
                            ChartPlotter::draw_correlation_chart(ui, view);
                            let text = match (view.coefficient, view.strength()) {
                                (Some(r), Some(strength)) => format!(
                                    "Correlation: {:.3}, a {} correlation between expected and mean years of schooling",
                                    r, strength
                                ),
                                _ => "Correlation is undefined for the current points".to_string(),
                            };
                            ChartPlotter::draw_insight(ui, &text);
                        }
                    },
                );

                Self::card(ui, format!("📦 Box plot - {}", selection.indicator), |ui| {
                    match &views.distribution {
                        Some(distribution) => ChartPlotter::draw_box_plot(ui, distribution),
                        None => ChartPlotter::draw_notice(ui, "No data available for the box plot."),
                    }
                });

                Self::card(ui, "📊 Summary statistics".to_string(), |ui| {
                    match &views.summary {
                        Some(summary) => Self::draw_summary(ui, summary),
                        None => {
                            ui.label(
                                RichText::new("⚠ No data available for this indicator.")
                                    .color(Color32::from_rgb(200, 120, 0)),
                            );
                        }
                    }
                });

                ui.add_space(CARD_SPACING);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("📚 Dashboard Pendidikan Indonesia | Kelompok 7")
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                });
            });
    }

    fn draw_header(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📚 Indonesian Education Data Dashboard")
                    .size(24.0)
                    .strong()
                    .color(PRIMARY),
            );
            ui.label(
                RichText::new("Descriptive analysis of national education indicators")
                    .size(13.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
    }

    fn draw_overview(ui: &mut egui::Ui, overview: &DatasetOverview) {
        let year_range = overview
            .year_range
            .as_ref()
            .map(|(first, last)| format!("{} - {}", first, last))
            .unwrap_or_else(|| "-".to_string());

        ui.horizontal_wrapped(|ui| {
            ChartPlotter::draw_metric_card(
                ui,
                "🏛️ Provinces",
                &overview.province_count.to_string(),
                None,
            );
            ChartPlotter::draw_metric_card(ui, "📅 Years", &year_range, None);
            ChartPlotter::draw_metric_card(
                ui,
                "📊 Indicators",
                &overview.indicator_count.to_string(),
                None,
            );
            ChartPlotter::draw_metric_card(
                ui,
                "📋 Records",
                &overview.record_count.to_string(),
                None,
            );
        });
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &SummaryStats) {
        let spread = format!("±{}", format_value(summary.std));
        let cv = match summary.cv {
            Some(cv) => format!("{:.1}%", cv),
            None => "n/a".to_string(),
        };
        let count = format!("{} values", summary.count);

        ui.horizontal_wrapped(|ui| {
            ChartPlotter::draw_metric_card(
                ui,
                "📏 Mean",
                &format_value(Some(summary.mean)),
                Some(&spread),
            );
            ChartPlotter::draw_metric_card(ui, "📐 Median", &format_value(Some(summary.median)), None);
            ChartPlotter::draw_metric_card(
                ui,
                "📊 Min - Max",
                &format!("{:.2} - {:.2}", summary.min, summary.max),
                Some(&count),
            );
            ChartPlotter::draw_metric_card(ui, "📈 Coef. of variation", &cv, None);
        });
    }

    /// Framed section with a heading.
    fn card(ui: &mut egui::Ui, title: String, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().panel_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
        ui.add_space(CARD_SPACING);
    }
}
