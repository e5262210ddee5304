//! CSV Data Loader Module
//! Loads the indicator CSV once with Polars and exposes it as an immutable
//! [`Dataset`].

use super::filter::ProvinceFilter;
use super::model::{CsvColumns, Observation, INDICATOR, PROVINCE, VALUE, YEAR};
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Column '{0}' is missing from the CSV")]
    MissingColumn(String),
}

/// Loads the source CSV.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and normalise it to the
    /// `[province, year, indicator, value]` schema.
    ///
    /// `year` is cast to text and `value` to float; cells that do not parse
    /// as numbers become null instead of failing the load.
    pub fn load_csv(path: &Path, columns: &CsvColumns) -> Result<Dataset, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        log::info!("Loading {}", path.display());

        let raw = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        for name in [
            &columns.province,
            &columns.year,
            &columns.indicator,
            &columns.value,
        ] {
            if raw.column(name.as_str()).is_err() {
                return Err(LoaderError::MissingColumn(name.clone()));
            }
        }

        let df = raw
            .lazy()
            .select([
                col(columns.province.as_str())
                    .cast(DataType::String)
                    .alias(PROVINCE),
                col(columns.year.as_str()).cast(DataType::String).alias(YEAR),
                col(columns.indicator.as_str())
                    .cast(DataType::String)
                    .alias(INDICATOR),
                col(columns.value.as_str())
                    .cast(DataType::Float64)
                    .alias(VALUE),
            ])
            .collect()?;

        let dataset = Dataset::from_frame(df)?;
        log::info!(
            "Loaded {} records: {} provinces, {} years, {} indicators",
            dataset.record_count(),
            dataset.provinces().len(),
            dataset.years().len(),
            dataset.indicators().len()
        );
        Ok(dataset)
    }
}

/// The full observation table, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    indicators: Vec<String>,
    years: Vec<String>,
    provinces: Vec<String>,
}

impl Dataset {
    /// Wrap a normalised frame and compute the selector domains.
    fn from_frame(df: DataFrame) -> Result<Self, LoaderError> {
        let mut seen = HashSet::new();
        let indicators: Vec<String> = df
            .column(INDICATOR)?
            .str()?
            .into_iter()
            .flatten()
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect();

        let years: BTreeSet<String> = df
            .column(YEAR)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let provinces: BTreeSet<String> = df
            .column(PROVINCE)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self {
            df,
            indicators,
            years: years.into_iter().collect(),
            provinces: provinces.into_iter().collect(),
        })
    }

    /// Build a dataset from in-memory observations.
    #[cfg(test)]
    pub fn from_observations(rows: &[Observation]) -> Result<Self, LoaderError> {
        let df = DataFrame::new(vec![
            Column::new(
                PROVINCE.into(),
                rows.iter().map(|r| r.province.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                YEAR.into(),
                rows.iter().map(|r| r.year.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                INDICATOR.into(),
                rows.iter().map(|r| r.indicator.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                VALUE.into(),
                rows.iter().map(|r| r.value).collect::<Vec<Option<f64>>>(),
            ),
        ])?;
        Self::from_frame(df)
    }

    /// Distinct indicator names in order of first appearance.
    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    /// Distinct years, sorted as text.
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Distinct provinces, sorted by name.
    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    pub fn has_indicator(&self, name: &str) -> bool {
        self.indicators.iter().any(|i| i == name)
    }

    pub fn record_count(&self) -> usize {
        self.df.height()
    }

    /// Rows passing the province filter, optionally restricted to one
    /// indicator and one year.
    ///
    /// A polars failure here is logged and yields no rows, so the affected
    /// view degrades to its placeholder.
    pub fn select(
        &self,
        provinces: &ProvinceFilter,
        indicator: Option<&str>,
        year: Option<&str>,
    ) -> Vec<Observation> {
        let mut predicate = provinces.to_expr();
        if let Some(indicator) = indicator {
            predicate = Some(and_also(predicate, col(INDICATOR).eq(lit(indicator))));
        }
        if let Some(year) = year {
            predicate = Some(and_also(predicate, col(YEAR).eq(lit(year))));
        }

        let frame = match predicate {
            Some(predicate) => self.df.clone().lazy().filter(predicate).collect(),
            None => Ok(self.df.clone()),
        };

        match frame.and_then(|df| Self::collect_observations(&df)) {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!("Row selection failed, view will be empty: {}", e);
                Vec::new()
            }
        }
    }

    fn collect_observations(df: &DataFrame) -> PolarsResult<Vec<Observation>> {
        let provinces = df.column(PROVINCE)?.str()?;
        let years = df.column(YEAR)?.str()?;
        let indicators = df.column(INDICATOR)?.str()?;
        let values = df.column(VALUE)?.f64()?;

        let rows = provinces
            .into_iter()
            .zip(years.into_iter())
            .zip(indicators.into_iter())
            .zip(values.into_iter())
            .filter_map(|(((province, year), indicator), value)| {
                Some(Observation::new(province?, year?, indicator?, value))
            })
            .collect();
        Ok(rows)
    }
}

fn and_also(acc: Option<Expr>, next: Expr) -> Expr {
    match acc {
        Some(acc) => acc.and(next),
        None => next,
    }
}
