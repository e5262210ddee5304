//! Province filter applied before every derived view.

use super::model::PROVINCE;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Label of the "every province" entry in the province selector.
pub const ALL_PROVINCES: &str = "Semua";

/// Which provinces a view is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProvinceFilter {
    /// No row is excluded.
    #[default]
    All,
    /// Only rows whose province is in the set. Never empty.
    Only(BTreeSet<String>),
}

impl ProvinceFilter {
    /// Build a filter from the raw selector state.
    ///
    /// An empty selection, or one containing [`ALL_PROVINCES`], means no
    /// filtering.
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: BTreeSet<String> = selection.into_iter().map(Into::into).collect();
        if selected.is_empty() || selected.contains(ALL_PROVINCES) {
            ProvinceFilter::All
        } else {
            ProvinceFilter::Only(selected)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ProvinceFilter::All)
    }

    pub fn includes(&self, province: &str) -> bool {
        match self {
            ProvinceFilter::All => true,
            ProvinceFilter::Only(set) => set.contains(province),
        }
    }

    /// Row predicate for polars, `None` when every row passes.
    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            ProvinceFilter::All => None,
            ProvinceFilter::Only(set) => set
                .iter()
                .map(|name| col(PROVINCE).eq(lit(name.as_str())))
                .reduce(|acc, e| acc.or(e)),
        }
    }
}

/// The user's current choice in the control panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub indicator: String,
    pub year: String,
    pub provinces: ProvinceFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_means_all() {
        let filter = ProvinceFilter::from_selection(Vec::<String>::new());
        assert!(filter.is_all());
        assert!(filter.to_expr().is_none());
    }

    #[test]
    fn test_sentinel_overrides_named_provinces() {
        let filter = ProvinceFilter::from_selection([ALL_PROVINCES, "Aceh"]);
        assert_eq!(filter, ProvinceFilter::All);
        assert!(filter.includes("Papua"));
    }

    #[test]
    fn test_named_selection() {
        let filter = ProvinceFilter::from_selection(["Aceh", "Bali"]);
        assert!(filter.includes("Aceh"));
        assert!(filter.includes("Bali"));
        assert!(!filter.includes("Papua"));
        assert!(filter.to_expr().is_some());
    }
}
