//! Descriptive statistics primitives shared by every view.

use statrs::statistics::Statistics;
use std::cmp::Ordering;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(Statistics::mean(values.iter()))
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// Undefined for fewer than two values; callers render that as a gap.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        None
    } else {
        Some(Statistics::std_dev(values.iter()))
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(Statistics::min(values.iter()))
    }
}

pub fn max(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(Statistics::max(values.iter()))
    }
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile(&sorted(values), 50.0)
}

/// Percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted_values[0]);
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        Some(sorted_values[lower])
    } else {
        Some(sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac)
    }
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest value not above `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = percentile(&sorted, 25.0)?;
        let median = percentile(&sorted, 50.0)?;
        let q3 = percentile(&sorted, 75.0)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Pearson correlation of paired samples.
///
/// `None` for fewer than two pairs or when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn ols(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return None;
        }
        let (xs, ys) = (&xs[..n], &ys[..n]);
        let mx = mean(xs)?;
        let my = mean(ys)?;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (x, y) in xs.iter().zip(ys) {
            sxy += (x - mx) * (y - my);
            sxx += (x - mx) * (x - mx);
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: my - slope * mx,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sample_std_undefined_for_single_value() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[4.0]), None);
        let std = sample_std(&[10.0, 30.0]).unwrap();
        assert!(approx(std, 200f64.sqrt()));
    }

    #[test]
    fn test_median_and_percentile() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 25.0), Some(2.0));
    }

    #[test]
    fn test_box_summary_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = BoxSummary::from_values(&values).unwrap();
        assert!(approx(summary.q1, 2.25));
        assert!(approx(summary.median, 3.5));
        assert!(approx(summary.q3, 4.75));
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_pearson_identical_columns() {
        let xs = [12.1, 13.4, 11.9, 14.2];
        assert_eq!(pearson(&xs, &xs), Some(1.0));
    }

    #[test]
    fn test_pearson_bounds_and_degenerate() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!(approx(r, -1.0));
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 1.0, 4.0, 3.0]).unwrap();
        assert!((-1.0..=1.0).contains(&r));
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
    }

    #[test]
    fn test_ols_fit() {
        let fit = LinearFit::ols(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!(approx(fit.slope, 2.0));
        assert!(approx(fit.intercept, 1.0));
        assert!(approx(fit.predict(3.0), 7.0));
        assert!(LinearFit::ols(&[2.0, 2.0], &[1.0, 3.0]).is_none());
    }
}
