//! Charts module - Chart rendering

mod plotter;

pub use plotter::{format_value, ChartPlotter, PRIMARY, SECONDARY};
