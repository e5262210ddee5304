//! Stats module - aggregation pipeline and descriptive statistics

mod calculator;
mod descriptive;

pub use calculator::{
    Aggregator, CorrelationView, DashboardViews, DatasetOverview, Distribution, Heatmap,
    ProvinceRank, SummaryStats, TimeSeries, ViewSettings,
};
