//! Aggregation Pipeline Module
//! Turns the raw observation table plus the current selection into the
//! derived tables behind every dashboard view.
//!
//! Every function is pure and re-filters the dataset itself, so each view is
//! computed independently from the same immutable [`Dataset`].

use super::descriptive::{self, BoxSummary, LinearFit};
use crate::data::{Dataset, Observation, ProvinceFilter, Selection};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Indicator plotted on the x axis of the correlation view.
pub const EXPECTED_YEARS_OF_SCHOOLING: &str = "Harapan Lama Sekolah";
/// Indicator plotted on the y axis of the correlation view.
pub const MEAN_YEARS_OF_SCHOOLING: &str = "Rata-rata Lama Sekolah";

/// Tunable sizes of the ranking and heatmap views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub top_n: usize,
    pub heatmap_limit: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            heatmap_limit: 20,
        }
    }
}

/// Mean and spread of one indicator in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: String,
    pub count: usize,
    pub mean: f64,
    /// `None` when the year has a single sample.
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub indicator: String,
    /// Ordered by year as text.
    pub points: Vec<YearSummary>,
}

impl TimeSeries {
    /// Change of the yearly mean between the first and last year.
    pub fn trend_change(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => last.mean - first.mean,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceRank {
    pub province: String,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub province: String,
    /// One cell per entry of [`Heatmap::years`].
    pub cells: Vec<Option<f64>>,
    /// Mean of the present cells.
    pub row_mean: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub indicator: String,
    pub years: Vec<String>,
    pub rows: Vec<HeatmapRow>,
    /// Number of provinces before the row limit was applied.
    pub total_provinces: usize,
}

impl Heatmap {
    pub fn is_truncated(&self) -> bool {
        self.total_provinces > self.rows.len()
    }

    /// Smallest and largest cell value, for the colour scale.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let cells: Vec<f64> = self
            .rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten().copied())
            .collect();
        Some((descriptive::min(&cells)?, descriptive::max(&cells)?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub province: String,
    pub year: String,
    pub x: f64,
    pub y: f64,
}

/// Qualitative reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r > 0.8 {
            CorrelationStrength::VeryStrong
        } else if r > 0.6 {
            CorrelationStrength::Strong
        } else if r > 0.4 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CorrelationStrength::VeryStrong => "very strong",
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationView {
    pub x_indicator: String,
    pub y_indicator: String,
    pub points: Vec<CorrelationPoint>,
    /// Pearson r, `None` when undefined for the current points.
    pub coefficient: Option<f64>,
    pub trend: Option<LinearFit>,
}

impl CorrelationView {
    pub fn strength(&self) -> Option<CorrelationStrength> {
        self.coefficient.map(CorrelationStrength::from_coefficient)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub indicator: String,
    pub values: Vec<f64>,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Coefficient of variation in percent.
    pub cv: Option<f64>,
}

/// Headline numbers over the whole, unfiltered dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOverview {
    pub province_count: usize,
    pub year_range: Option<(String, String)>,
    pub indicator_count: usize,
    pub record_count: usize,
}

/// Every derived view of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub time_series: TimeSeries,
    pub top: Vec<ProvinceRank>,
    pub bottom: Vec<ProvinceRank>,
    pub heatmap: Heatmap,
    /// `None` when either correlation indicator is missing from the dataset.
    pub correlation: Option<CorrelationView>,
    /// `None` when the indicator has no usable value.
    pub distribution: Option<Distribution>,
    /// `None` when every value of the indicator is absent.
    pub summary: Option<SummaryStats>,
}

/// Computes the dashboard views.
pub struct Aggregator;

impl Aggregator {
    /// Run the whole pipeline for one selection.
    pub fn compute_views(
        dataset: &Dataset,
        selection: &Selection,
        settings: &ViewSettings,
    ) -> DashboardViews {
        let filter = &selection.provinces;
        let indicator = selection.indicator.as_str();

        DashboardViews {
            time_series: Self::time_series(dataset, filter, indicator),
            top: Self::ranking(
                dataset,
                filter,
                indicator,
                &selection.year,
                settings.top_n,
                RankOrder::Top,
            ),
            bottom: Self::ranking(
                dataset,
                filter,
                indicator,
                &selection.year,
                settings.top_n,
                RankOrder::Bottom,
            ),
            heatmap: Self::heatmap(dataset, filter, indicator, settings.heatmap_limit),
            correlation: Self::correlation(dataset, filter),
            distribution: Self::distribution(dataset, filter, indicator),
            summary: Self::summary(dataset, filter, indicator),
        }
    }

    pub fn overview(dataset: &Dataset) -> DatasetOverview {
        let years = dataset.years();
        DatasetOverview {
            province_count: dataset.provinces().len(),
            year_range: years.first().cloned().zip(years.last().cloned()),
            indicator_count: dataset.indicators().len(),
            record_count: dataset.record_count(),
        }
    }

    /// Present values of the indicator, in row order.
    fn indicator_values(dataset: &Dataset, filter: &ProvinceFilter, indicator: &str) -> Vec<f64> {
        dataset
            .select(filter, Some(indicator), None)
            .into_iter()
            .filter_map(|row| row.value)
            .collect()
    }

    /// Group present values by a key, keys in sorted order.
    fn group_values<K, F>(rows: &[Observation], key: F) -> BTreeMap<K, Vec<f64>>
    where
        K: Ord,
        F: Fn(&Observation) -> K,
    {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for row in rows {
            if let Some(value) = row.value {
                groups.entry(key(row)).or_default().push(value);
            }
        }
        groups
    }

    /// Yearly mean and standard deviation of one indicator.
    pub fn time_series(dataset: &Dataset, filter: &ProvinceFilter, indicator: &str) -> TimeSeries {
        let rows = dataset.select(filter, Some(indicator), None);
        let points = Self::group_values(&rows, |row| row.year.clone())
            .into_iter()
            .filter_map(|(year, values)| {
                Some(YearSummary {
                    count: values.len(),
                    mean: descriptive::mean(&values)?,
                    std: descriptive::sample_std(&values),
                    year,
                })
            })
            .collect();

        TimeSeries {
            indicator: indicator.to_string(),
            points,
        }
    }

    /// Provinces ranked by their mean for one indicator and year.
    pub fn ranking(
        dataset: &Dataset,
        filter: &ProvinceFilter,
        indicator: &str,
        year: &str,
        n: usize,
        order: RankOrder,
    ) -> Vec<ProvinceRank> {
        let rows = dataset.select(filter, Some(indicator), Some(year));
        let mut ranks: Vec<ProvinceRank> = Self::group_values(&rows, |row| row.province.clone())
            .into_iter()
            .filter_map(|(province, values)| {
                Some(ProvinceRank {
                    mean: descriptive::mean(&values)?,
                    province,
                })
            })
            .collect();

        ranks.sort_by(|a, b| {
            let ord = a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal);
            match order {
                RankOrder::Top => ord.reverse(),
                RankOrder::Bottom => ord,
            }
        });
        ranks.truncate(n);
        ranks
    }

    /// Province x year matrix of mean values, capped at `limit` provinces.
    pub fn heatmap(
        dataset: &Dataset,
        filter: &ProvinceFilter,
        indicator: &str,
        limit: usize,
    ) -> Heatmap {
        let rows = dataset.select(filter, Some(indicator), None);
        let cells = Self::group_values(&rows, |row| (row.province.clone(), row.year.clone()));

        let years: Vec<String> = cells
            .keys()
            .map(|(_, year)| year.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut by_province: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for ((province, year), values) in &cells {
            if let Some(mean) = descriptive::mean(values) {
                by_province
                    .entry(province.clone())
                    .or_default()
                    .insert(year.clone(), mean);
            }
        }

        let mut heat_rows: Vec<HeatmapRow> = by_province
            .into_iter()
            .map(|(province, year_means)| {
                let present: Vec<f64> = year_means.values().copied().collect();
                HeatmapRow {
                    cells: years.iter().map(|y| year_means.get(y).copied()).collect(),
                    row_mean: descriptive::mean(&present).unwrap_or(f64::NAN),
                    province,
                }
            })
            .collect();

        let total_provinces = heat_rows.len();
        if total_provinces > limit {
            heat_rows.sort_by(|a, b| {
                b.row_mean
                    .partial_cmp(&a.row_mean)
                    .unwrap_or(Ordering::Equal)
            });
            heat_rows.truncate(limit);
            log::debug!(
                "Heatmap for '{}' limited to {} of {} provinces",
                indicator,
                limit,
                total_provinces
            );
        }

        Heatmap {
            indicator: indicator.to_string(),
            years,
            rows: heat_rows,
            total_provinces,
        }
    }

    /// Expected vs mean years of schooling, one point per province and year.
    pub fn correlation(dataset: &Dataset, filter: &ProvinceFilter) -> Option<CorrelationView> {
        if !dataset.has_indicator(EXPECTED_YEARS_OF_SCHOOLING)
            || !dataset.has_indicator(MEAN_YEARS_OF_SCHOOLING)
        {
            log::debug!("Correlation view skipped: indicator pair not in dataset");
            return None;
        }

        let rows = dataset.select(filter, None, None);
        let by_province_year = |indicator: &str| {
            let subset: Vec<Observation> = rows
                .iter()
                .filter(|row| row.indicator == indicator)
                .cloned()
                .collect();
            Self::group_values(&subset, |row| (row.province.clone(), row.year.clone()))
        };
        let x_groups = by_province_year(EXPECTED_YEARS_OF_SCHOOLING);
        let y_groups = by_province_year(MEAN_YEARS_OF_SCHOOLING);

        let points: Vec<CorrelationPoint> = x_groups
            .iter()
            .filter_map(|((province, year), xs)| {
                let ys = y_groups.get(&(province.clone(), year.clone()))?;
                Some(CorrelationPoint {
                    province: province.clone(),
                    year: year.clone(),
                    x: descriptive::mean(xs)?,
                    y: descriptive::mean(ys)?,
                })
            })
            .collect();

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        Some(CorrelationView {
            x_indicator: EXPECTED_YEARS_OF_SCHOOLING.to_string(),
            y_indicator: MEAN_YEARS_OF_SCHOOLING.to_string(),
            coefficient: descriptive::pearson(&xs, &ys),
            trend: LinearFit::ols(&xs, &ys),
            points,
        })
    }

    /// Raw values of the indicator for the box plot.
    pub fn distribution(
        dataset: &Dataset,
        filter: &ProvinceFilter,
        indicator: &str,
    ) -> Option<Distribution> {
        let values = Self::indicator_values(dataset, filter, indicator);
        let summary = BoxSummary::from_values(&values)?;
        Some(Distribution {
            indicator: indicator.to_string(),
            values,
            summary,
        })
    }

    /// Summary metrics over every present value of the indicator.
    pub fn summary(
        dataset: &Dataset,
        filter: &ProvinceFilter,
        indicator: &str,
    ) -> Option<SummaryStats> {
        let values = Self::indicator_values(dataset, filter, indicator);
        let mean = descriptive::mean(&values)?;
        let std = descriptive::sample_std(&values);
        let cv = if mean == 0.0 {
            Some(0.0)
        } else {
            std.map(|std| std / mean * 100.0)
        };

        Some(SummaryStats {
            count: values.len(),
            mean,
            std,
            median: descriptive::median(&values)?,
            min: descriptive::min(&values)?,
            max: descriptive::max(&values)?,
            cv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(province: &str, year: &str, indicator: &str, value: Option<f64>) -> Observation {
        Observation::new(province, year, indicator, value)
    }

    fn dataset(rows: &[Observation]) -> Dataset {
        Dataset::from_observations(rows).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// `count` provinces with one value each for indicator "X" in 2020.
    fn provinces(count: usize) -> Dataset {
        let rows: Vec<Observation> = (0..count)
            .map(|i| obs(&format!("P{:02}", i), "2020", "X", Some(i as f64)))
            .collect();
        dataset(&rows)
    }

    #[test]
    fn test_time_series_example() {
        let ds = dataset(&[
            obs("ProvA", "2020", "X", Some(10.0)),
            obs("ProvA", "2021", "X", Some(20.0)),
            obs("ProvB", "2020", "X", Some(30.0)),
        ]);
        let ts = Aggregator::time_series(&ds, &ProvinceFilter::All, "X");

        assert_eq!(ts.points.len(), 2);
        assert_eq!(ts.points[0].year, "2020");
        assert!(approx(ts.points[0].mean, 20.0));
        assert!(approx(ts.points[0].std.unwrap(), 200f64.sqrt()));
        assert_eq!(ts.points[1].year, "2021");
        assert!(approx(ts.points[1].mean, 20.0));
        assert_eq!(ts.points[1].std, None);
        assert!(approx(ts.trend_change(), 0.0));
    }

    #[test]
    fn test_time_series_years_are_exactly_those_with_values() {
        let ds = dataset(&[
            obs("A", "2019", "X", None),
            obs("A", "2020", "X", Some(1.0)),
            obs("A", "2021", "Y", Some(2.0)),
            obs("B", "2022", "X", Some(3.0)),
        ]);
        let ts = Aggregator::time_series(&ds, &ProvinceFilter::All, "X");
        let years: Vec<&str> = ts.points.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, ["2020", "2022"]);
        assert!(approx(ts.trend_change(), 2.0));
    }

    #[test]
    fn test_time_series_orders_years_as_text() {
        let ds = dataset(&[
            obs("A", "2020", "X", Some(1.0)),
            obs("A", "999", "X", Some(2.0)),
        ]);
        let ts = Aggregator::time_series(&ds, &ProvinceFilter::All, "X");
        let years: Vec<&str> = ts.points.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, ["2020", "999"]);
    }

    #[test]
    fn test_ranking_averages_duplicates() {
        let ds = dataset(&[
            obs("A", "2020", "X", Some(1.0)),
            obs("A", "2020", "X", Some(3.0)),
            obs("B", "2020", "X", Some(5.0)),
            obs("C", "2020", "X", None),
            obs("D", "2021", "X", Some(9.0)),
        ]);
        let top = Aggregator::ranking(&ds, &ProvinceFilter::All, "X", "2020", 10, RankOrder::Top);
        assert_eq!(
            top,
            vec![
                ProvinceRank { province: "B".into(), mean: 5.0 },
                ProvinceRank { province: "A".into(), mean: 2.0 },
            ]
        );
        let bottom =
            Aggregator::ranking(&ds, &ProvinceFilter::All, "X", "2020", 1, RankOrder::Bottom);
        assert_eq!(bottom[0].province, "A");
    }

    #[test]
    fn test_top_and_bottom_disjoint_with_many_provinces() {
        let ds = provinces(34);
        let top = Aggregator::ranking(&ds, &ProvinceFilter::All, "X", "2020", 10, RankOrder::Top);
        let bottom =
            Aggregator::ranking(&ds, &ProvinceFilter::All, "X", "2020", 10, RankOrder::Bottom);

        assert_eq!(top.len(), 10);
        assert_eq!(bottom.len(), 10);
        let top_names: BTreeSet<&str> = top.iter().map(|r| r.province.as_str()).collect();
        let bottom_names: BTreeSet<&str> = bottom.iter().map(|r| r.province.as_str()).collect();
        assert_eq!(top_names.len(), 10);
        assert_eq!(bottom_names.len(), 10);
        assert!(top_names.is_disjoint(&bottom_names));
        assert_eq!(top[0].province, "P33");
        assert_eq!(bottom[0].province, "P00");
    }

    #[test]
    fn test_ranking_ties_do_not_panic() {
        let ds = dataset(&[
            obs("A", "2020", "X", Some(1.0)),
            obs("B", "2020", "X", Some(1.0)),
            obs("C", "2020", "X", Some(1.0)),
        ]);
        let top = Aggregator::ranking(&ds, &ProvinceFilter::All, "X", "2020", 2, RankOrder::Top);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_heatmap_keeps_highest_provinces() {
        let ds = provinces(34);
        let heatmap = Aggregator::heatmap(&ds, &ProvinceFilter::All, "X", 20);
        assert_eq!(heatmap.rows.len(), 20);
        assert_eq!(heatmap.total_provinces, 34);
        assert!(heatmap.is_truncated());
        assert_eq!(heatmap.rows[0].province, "P33");
        assert_eq!(heatmap.rows[19].province, "P14");
        assert_eq!(heatmap.value_range(), Some((14.0, 33.0)));
    }

    #[test]
    fn test_heatmap_matrix_cells() {
        let ds = dataset(&[
            obs("B", "2020", "X", Some(2.0)),
            obs("A", "2020", "X", Some(1.0)),
            obs("A", "2021", "X", Some(3.0)),
            obs("A", "2021", "X", Some(5.0)),
        ]);
        let heatmap = Aggregator::heatmap(&ds, &ProvinceFilter::All, "X", 20);
        assert!(!heatmap.is_truncated());
        assert_eq!(heatmap.years, ["2020", "2021"]);
        assert_eq!(heatmap.rows[0].province, "A");
        assert_eq!(heatmap.rows[0].cells, vec![Some(1.0), Some(4.0)]);
        assert!(approx(heatmap.rows[0].row_mean, 2.5));
        assert_eq!(heatmap.rows[1].cells, vec![Some(2.0), None]);
    }

    #[test]
    fn test_correlation_skipped_without_indicator_pair() {
        let ds = dataset(&[obs("A", "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(12.0))]);
        assert!(Aggregator::correlation(&ds, &ProvinceFilter::All).is_none());
    }

    #[test]
    fn test_correlation_identical_indicators() {
        let mut rows = Vec::new();
        for (i, province) in ["A", "B", "C", "D"].iter().enumerate() {
            let v = 10.0 + i as f64 * 1.5;
            rows.push(obs(province, "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(v)));
            rows.push(obs(province, "2020", MEAN_YEARS_OF_SCHOOLING, Some(v)));
        }
        // Dropped: the pair is incomplete.
        rows.push(obs("E", "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(99.0)));
        rows.push(obs("E", "2020", MEAN_YEARS_OF_SCHOOLING, None));

        let view = Aggregator::correlation(&dataset(&rows), &ProvinceFilter::All).unwrap();
        assert_eq!(view.points.len(), 4);
        assert_eq!(view.coefficient, Some(1.0));
        assert_eq!(view.strength(), Some(CorrelationStrength::VeryStrong));
        let trend = view.trend.unwrap();
        assert!(approx(trend.slope, 1.0));
        assert!(approx(trend.intercept, 0.0));
    }

    #[test]
    fn test_correlation_pair_checked_on_whole_dataset() {
        let ds = dataset(&[
            obs("A", "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(12.0)),
            obs("B", "2020", MEAN_YEARS_OF_SCHOOLING, Some(8.0)),
        ]);
        let filter = ProvinceFilter::from_selection(["A"]);
        let view = Aggregator::correlation(&ds, &filter).unwrap();
        assert!(view.points.is_empty());
        assert_eq!(view.coefficient, None);
        assert_eq!(view.strength(), None);
    }

    #[test]
    fn test_correlation_strength_thresholds() {
        assert_eq!(CorrelationStrength::from_coefficient(-0.9), CorrelationStrength::VeryStrong);
        assert_eq!(CorrelationStrength::from_coefficient(0.8), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.5), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.4), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::Moderate.to_string(), "moderate");
    }

    #[test]
    fn test_distribution_and_summary_empty() {
        let ds = dataset(&[obs("A", "2020", "X", None), obs("A", "2020", "Y", Some(1.0))]);
        assert!(Aggregator::distribution(&ds, &ProvinceFilter::All, "X").is_none());
        assert!(Aggregator::summary(&ds, &ProvinceFilter::All, "X").is_none());
        assert!(Aggregator::distribution(&ds, &ProvinceFilter::All, "Z").is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let ds = dataset(&[
            obs("A", "2020", "X", Some(2.0)),
            obs("B", "2020", "X", Some(4.0)),
            obs("C", "2021", "X", Some(6.0)),
            obs("D", "2021", "X", None),
        ]);
        let summary = Aggregator::summary(&ds, &ProvinceFilter::All, "X").unwrap();
        assert_eq!(summary.count, 3);
        assert!(approx(summary.mean, 4.0));
        assert!(approx(summary.std.unwrap(), 2.0));
        assert_eq!(summary.median, 4.0);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 6.0);
        assert!(approx(summary.cv.unwrap(), 50.0));
    }

    #[test]
    fn test_summary_cv_guarded_for_zero_mean() {
        let ds = dataset(&[obs("A", "2020", "X", Some(-1.0)), obs("B", "2020", "X", Some(1.0))]);
        let summary = Aggregator::summary(&ds, &ProvinceFilter::All, "X").unwrap();
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.cv, Some(0.0));

        let single = dataset(&[obs("A", "2020", "X", Some(5.0))]);
        let summary = Aggregator::summary(&single, &ProvinceFilter::All, "X").unwrap();
        assert_eq!(summary.std, None);
        assert_eq!(summary.cv, None);
    }

    #[test]
    fn test_province_filter_applies_to_every_view() {
        let ds = dataset(&[
            obs("ProvA", "2020", "X", Some(10.0)),
            obs("ProvA", "2021", "X", Some(20.0)),
            obs("ProvB", "2020", "X", Some(30.0)),
            obs("ProvA", "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(12.0)),
            obs("ProvA", "2020", MEAN_YEARS_OF_SCHOOLING, Some(8.0)),
            obs("ProvB", "2020", EXPECTED_YEARS_OF_SCHOOLING, Some(13.0)),
            obs("ProvB", "2020", MEAN_YEARS_OF_SCHOOLING, Some(9.0)),
        ]);
        let selection = Selection {
            indicator: "X".into(),
            year: "2020".into(),
            provinces: ProvinceFilter::from_selection(["ProvA"]),
        };
        let views = Aggregator::compute_views(&ds, &selection, &ViewSettings::default());

        assert!(approx(views.time_series.points[0].mean, 10.0));
        assert!(views.top.iter().all(|r| r.province == "ProvA"));
        assert!(views.bottom.iter().all(|r| r.province == "ProvA"));
        assert!(views.heatmap.rows.iter().all(|r| r.province == "ProvA"));
        let correlation = views.correlation.unwrap();
        assert!(correlation.points.iter().all(|p| p.province == "ProvA"));
        assert_eq!(views.distribution.unwrap().values, vec![10.0, 20.0]);
        assert!(approx(views.summary.unwrap().mean, 15.0));
    }

    #[test]
    fn test_overview_uses_whole_dataset() {
        let ds = dataset(&[
            obs("A", "2021", "X", Some(1.0)),
            obs("B", "2019", "Y", None),
            obs("A", "2020", "X", Some(2.0)),
        ]);
        let overview = Aggregator::overview(&ds);
        assert_eq!(overview.province_count, 2);
        assert_eq!(overview.indicator_count, 2);
        assert_eq!(overview.record_count, 3);
        assert_eq!(
            overview.year_range,
            Some(("2019".to_string(), "2021".to_string()))
        );
    }
}
