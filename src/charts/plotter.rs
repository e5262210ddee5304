//! Chart Plotter Module
//! Draws every dashboard view with egui_plot and the egui painter.

use crate::stats::{CorrelationView, Distribution, Heatmap, ProvinceRank, TimeSeries};
use egui::{Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
    Polygon,
};
use std::collections::BTreeMap;

pub const PRIMARY: Color32 = Color32::from_rgb(102, 126, 234);
pub const SECONDARY: Color32 = Color32::from_rgb(165, 180, 252);
const BAND_FILL: Color32 = Color32::from_rgba_premultiplied(12, 15, 28, 31);
const INSIGHT_FILL: Color32 = Color32::from_rgb(214, 240, 240);
const NOTICE_FILL: Color32 = Color32::from_rgb(225, 236, 252);

/// Sequential blues for per-year scatter colours (light to dark).
pub const YEAR_PALETTE: [Color32; 6] = [
    Color32::from_rgb(158, 202, 225),
    Color32::from_rgb(107, 174, 214),
    Color32::from_rgb(66, 146, 198),
    Color32::from_rgb(33, 113, 181),
    Color32::from_rgb(8, 81, 156),
    Color32::from_rgb(8, 48, 107),
];

/// One grid mark per category index.
fn category_marks(count: usize) -> Vec<GridMark> {
    (0..count)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Map `t` in [0, 1] onto a white-to-navy scale.
fn blues(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(lerp(247, 8), lerp(251, 48), lerp(255, 107))
}

pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "n/a".to_string(),
    }
}

/// Draws dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Yearly mean line with a ±1 std band.
    ///
    /// Years whose std is undefined leave a gap in the band.
    pub fn draw_trend_chart(ui: &mut egui::Ui, series: &TimeSeries) {
        let labels: Vec<String> = series.points.iter().map(|p| p.year.clone()).collect();
        let count = labels.len();

        Plot::new(format!("trend_{}", series.indicator))
            .height(320.0)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Value")
            .x_grid_spacer(move |_input| category_marks(count))
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, pair) in series.points.windows(2).enumerate() {
                    let (a, b) = (&pair[0], &pair[1]);
                    let (Some(sa), Some(sb)) = (a.std, b.std) else {
                        continue;
                    };
                    let (x0, x1) = (i as f64, (i + 1) as f64);
                    let band = vec![
                        [x0, a.mean + sa],
                        [x1, b.mean + sb],
                        [x1, b.mean - sb],
                        [x0, a.mean - sa],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(band))
                            .fill_color(BAND_FILL)
                            .stroke(Stroke::NONE)
                            .name("±1 Std Dev"),
                    );
                }

                let means: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| [i as f64, p.mean])
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(means.clone()))
                        .color(PRIMARY)
                        .width(3.0)
                        .name("Mean"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(means))
                        .radius(4.0)
                        .color(PRIMARY)
                        .name("Mean"),
                );
            });
    }

    /// Horizontal bar chart, first entry at the top.
    pub fn draw_ranking_chart(ui: &mut egui::Ui, id: &str, ranks: &[ProvinceRank], color: Color32) {
        let count = ranks.len();
        let labels: Vec<String> = ranks.iter().rev().map(|r| r.province.clone()).collect();

        let bars: Vec<Bar> = ranks
            .iter()
            .enumerate()
            .map(|(i, rank)| {
                Bar::new((count - 1 - i) as f64, rank.mean)
                    .name(&rank.province)
                    .fill(color)
            })
            .collect();

        Plot::new(id)
            .height(300.0)
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label("Value")
            .y_grid_spacer(move |_input| category_marks(count))
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7).color(color));
            });
    }

    /// Province x year grid coloured by value.
    pub fn draw_heatmap(ui: &mut egui::Ui, heatmap: &Heatmap) {
        let Some((lo, hi)) = heatmap.value_range() else {
            Self::draw_notice(ui, "No data available for the heatmap.");
            return;
        };
        let span = if hi > lo { hi - lo } else { 1.0 };

        let label_width = 180.0;
        let cell_height = 20.0;
        let columns = heatmap.years.len().max(1) as f32;
        let cell_width = ((ui.available_width() - label_width) / columns - 1.0).clamp(28.0, 90.0);
        let empty_fill = ui.visuals().extreme_bg_color;

        ui.spacing_mut().item_spacing = egui::vec2(1.0, 1.0);

        ui.horizontal(|ui| {
            ui.add_space(label_width);
            for year in &heatmap.years {
                ui.add_sized(
                    [cell_width, cell_height],
                    egui::Label::new(RichText::new(year).size(11.0).strong()),
                );
            }
        });

        for row in &heatmap.rows {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [label_width, cell_height],
                    egui::Label::new(RichText::new(&row.province).size(11.0)).truncate(),
                );
                for (year, cell) in heatmap.years.iter().zip(&row.cells) {
                    let (rect, response) = ui.allocate_exact_size(
                        egui::vec2(cell_width, cell_height),
                        egui::Sense::hover(),
                    );
                    let fill = match cell {
                        Some(v) => blues(((v - lo) / span) as f32),
                        None => empty_fill,
                    };
                    ui.painter().rect_filled(rect, 2.0, fill);
                    response.on_hover_text(format!(
                        "{} ({}): {}",
                        row.province,
                        year,
                        format_value(*cell)
                    ));
                }
            });
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{:.2}", lo)).size(11.0));
            for step in 0..=10 {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 10.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 0.0, blues(step as f32 / 10.0));
            }
            ui.label(RichText::new(format!("{:.2}", hi)).size(11.0));
        });
    }

    /// Scatter coloured by year with the OLS trend line.
    pub fn draw_correlation_chart(ui: &mut egui::Ui, view: &CorrelationView) {
        let mut by_year: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for point in &view.points {
            by_year
                .entry(point.year.as_str())
                .or_default()
                .push([point.x, point.y]);
        }

        let x_min = view.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = view
            .points
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);

        Plot::new("correlation_chart")
            .height(360.0)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(view.x_indicator.clone())
            .y_axis_label(view.y_indicator.clone())
            .show(ui, |plot_ui| {
                for (i, (year, points)) in by_year.into_iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(4.0)
                            .color(YEAR_PALETTE[i % YEAR_PALETTE.len()])
                            .name(year),
                    );
                }

                if let Some(fit) = view.trend {
                    if x_min.is_finite() && x_max.is_finite() {
                        let line = vec![[x_min, fit.predict(x_min)], [x_max, fit.predict(x_max)]];
                        plot_ui.line(
                            Line::new(PlotPoints::from(line))
                                .color(Color32::from_rgb(231, 76, 60))
                                .width(2.0)
                                .name("OLS trend"),
                        );
                    }
                }
            });
    }

    /// Single box with whiskers and outlier points.
    pub fn draw_box_plot(ui: &mut egui::Ui, distribution: &Distribution) {
        let summary = &distribution.summary;

        Plot::new(format!("box_{}", distribution.indicator))
            .height(260.0)
            .allow_scroll(false)
            .show_x(false)
            .y_axis_label("Value")
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                let box_elem = BoxElem::new(
                    0.0,
                    BoxSpread::new(
                        summary.whisker_low,
                        summary.q1,
                        summary.median,
                        summary.q3,
                        summary.whisker_high,
                    ),
                )
                .box_width(0.5)
                .fill(PRIMARY.gamma_multiply(0.3))
                .stroke(Stroke::new(1.5, PRIMARY));

                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(&distribution.indicator));

                if !summary.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> =
                        summary.outliers.iter().map(|&v| [0.0, v]).collect();
                    plot_ui.points(
                        Points::new(PlotPoints::from(outliers))
                            .radius(3.0)
                            .color(PRIMARY)
                            .name("Outliers"),
                    );
                }
            });
    }

    /// Small titled card holding one number.
    pub fn draw_metric_card(ui: &mut egui::Ui, title: &str, value: &str, detail: Option<&str>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(150.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(22.0).strong());
                    if let Some(detail) = detail {
                        ui.label(RichText::new(detail).size(11.0).color(PRIMARY));
                    }
                });
            });
    }

    pub fn draw_insight(ui: &mut egui::Ui, text: &str) {
        egui::Frame::none()
            .fill(INSIGHT_FILL)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("💡 {}", text)).color(Color32::from_rgb(51, 51, 51)));
            });
    }

    /// Placeholder shown instead of a chart that has no data.
    pub fn draw_notice(ui: &mut egui::Ui, text: &str) {
        egui::Frame::none()
            .fill(NOTICE_FILL)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("ℹ {}", text)).color(Color32::from_rgb(30, 60, 120)));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_integer_marks() {
        let labels = vec!["2019".to_string(), "2020".to_string()];
        assert_eq!(category_label(&labels, 1.0), "2020");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 5.0), "");
    }

    #[test]
    fn test_blues_scale_endpoints() {
        assert_eq!(blues(0.0), Color32::from_rgb(247, 251, 255));
        assert_eq!(blues(1.0), Color32::from_rgb(8, 48, 107));
        assert_eq!(blues(7.0), blues(1.0));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(3.14159)), "3.14");
        assert_eq!(format_value(None), "n/a");
        assert_eq!(format_value(Some(f64::NAN)), "n/a");
    }
}
