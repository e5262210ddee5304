//! Command-line configuration.
//!
//! Every option can also be supplied through an `EDU_DASHBOARD_*` environment
//! variable, which is how the dashboard is usually launched from a desktop
//! shortcut.

use crate::data::CsvColumns;
use crate::stats::ViewSettings;
use clap::Parser;
use std::path::PathBuf;

/// Indonesian education indicator dashboard
///
/// Loads the indicator CSV once and renders trend, ranking, heatmap,
/// correlation, distribution and summary views for the chosen indicator.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the indicator CSV
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "Data_Visdat.csv",
        env = "EDU_DASHBOARD_DATA"
    )]
    pub data: PathBuf,

    /// Number of provinces in the top and bottom rankings
    #[arg(long, default_value = "10", value_name = "COUNT", env = "EDU_DASHBOARD_TOP_N")]
    pub top_n: usize,

    /// Maximum number of provinces shown in the heatmap
    #[arg(
        long,
        default_value = "20",
        value_name = "COUNT",
        env = "EDU_DASHBOARD_HEATMAP_LIMIT"
    )]
    pub heatmap_limit: usize,

    /// CSV column holding the province name
    #[arg(long, default_value = "nama_provinsi", value_name = "COLUMN")]
    pub province_col: String,

    /// CSV column holding the year
    #[arg(long, default_value = "tahun", value_name = "COLUMN")]
    pub year_col: String,

    /// CSV column holding the indicator name
    #[arg(long, default_value = "indikator", value_name = "COLUMN")]
    pub indicator_col: String,

    /// CSV column holding the indicator value
    #[arg(long, default_value = "nilai", value_name = "COLUMN")]
    pub value_col: String,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Source column names as configured.
    pub fn csv_columns(&self) -> CsvColumns {
        CsvColumns {
            province: self.province_col.clone(),
            year: self.year_col.clone(),
            indicator: self.indicator_col.clone(),
            value: self.value_col.clone(),
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            top_n: self.top_n,
            heatmap_limit: self.heatmap_limit,
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
