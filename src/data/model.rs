//! Observation record and normalised column names.

/// Normalised column names of the in-memory table.
pub const PROVINCE: &str = "province";
pub const YEAR: &str = "year";
pub const INDICATOR: &str = "indicator";
pub const VALUE: &str = "value";

/// One (province, year, indicator, value) record.
///
/// `year` stays textual so display order follows the source. `value` is
/// `None` when the cell was missing or not a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub province: String,
    pub year: String,
    pub indicator: String,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(
        province: impl Into<String>,
        year: impl Into<String>,
        indicator: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            province: province.into(),
            year: year.into(),
            indicator: indicator.into(),
            value: value.filter(|v| v.is_finite()),
        }
    }
}

/// Source CSV column names mapped onto the normalised schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumns {
    pub province: String,
    pub year: String,
    pub indicator: String,
    pub value: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            province: "nama_provinsi".to_string(),
            year: "tahun".to_string(),
            indicator: "indikator".to_string(),
            value: "nilai".to_string(),
        }
    }
}
