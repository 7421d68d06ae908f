//! Density histograms.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tabstat_core::errors::{ComputeError, ConfigError};

use crate::stats::{sorted_finite, Quartiles};

/// How the number of bins is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinRule {
    /// `floor(sqrt(n))` bins, at least one.
    #[default]
    Sqrt,
    /// Bin width `2 * IQR / cbrt(n)`. Falls back to `Sqrt` when the IQR is
    /// zero or the width would give more bins than values.
    FreedmanDiaconis,
}

impl BinRule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::FreedmanDiaconis => "fd",
        }
    }

    /// Number of bins for `sorted` (ascending, finite, non-empty).
    fn bin_count(&self, sorted: &[f64]) -> usize {
        let n = sorted.len();
        let sqrt = ((n as f64).sqrt().floor() as usize).max(1);
        match self {
            Self::Sqrt => sqrt,
            Self::FreedmanDiaconis => {
                let iqr = Quartiles::from_sorted(sorted).iqr();
                let range = sorted[n - 1] - sorted[0];
                if iqr <= 0.0 || range <= 0.0 {
                    return sqrt;
                }
                let width = 2.0 * iqr / (n as f64).cbrt();
                let count = (range / width).ceil();
                if !count.is_finite() || count > n as f64 {
                    return sqrt;
                }
                (count as usize).max(1)
            }
        }
    }
}

impl fmt::Display for BinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqrt" => Ok(Self::Sqrt),
            "fd" | "freedman-diaconis" => Ok(Self::FreedmanDiaconis),
            _ => Err(ConfigError::UnknownBinRule(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub density: f64,
}

/// Equal-width bins over `[min, max]`, normalized so the bar areas sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub rule: BinRule,
    pub width: f64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Build a density histogram from `values`. Non-finite values are
    /// ignored. Every bin is half-open except the last, which includes
    /// the maximum. A constant input is centred in `[v - 0.5, v + 0.5]`.
    pub fn build(column: &str, values: &[f64], rule: BinRule) -> Result<Self, ComputeError> {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return Err(ComputeError::EmptyHistogram(column.to_string()));
        }

        let n = sorted.len();
        let bin_count = rule.bin_count(&sorted);
        let (lo, hi) = match (sorted[0], sorted[n - 1]) {
            (min, max) if min == max => (min - 0.5, max + 0.5),
            range => range,
        };
        let width = (hi - lo) / bin_count as f64;

        let mut counts = vec![0usize; bin_count];
        for v in &sorted {
            let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count,
                density: count as f64 / (n as f64 * width),
            })
            .collect();

        Ok(Self { rule, width, bins })
    }

    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_rule() {
        let h = Histogram::build("x", &[1.0, 2.0, 3.0, 4.0], BinRule::Sqrt).unwrap();
        assert_eq!(h.bins.len(), 2);
        assert_eq!(h.width, 1.5);
        assert_eq!(h.bins[0].count, 2);
        assert_eq!(h.bins[1].count, 2);
        assert_eq!(h.bins[1].end, 4.0);
    }

    #[test]
    fn test_density_integrates_to_one() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        for rule in [BinRule::Sqrt, BinRule::FreedmanDiaconis] {
            let h = Histogram::build("x", &values, rule).unwrap();
            let area: f64 = h.bins.iter().map(|b| b.density * (b.end - b.start)).sum();
            assert!((area - 1.0).abs() < 1e-9, "{rule}: {area}");
            assert_eq!(h.total_count(), 50);
        }
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let h = Histogram::build("x", &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], BinRule::Sqrt).unwrap();
        assert_eq!(h.bins.len(), 3);
        assert_eq!(h.bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![3, 3, 3]);
    }

    #[test]
    fn test_freedman_diaconis() {
        // IQR 3.5, cbrt(8) = 2, width 3.5 over a range of 7.
        let values: Vec<f64> = (1..=8).map(f64::from).collect();
        let h = Histogram::build("x", &values, BinRule::FreedmanDiaconis).unwrap();
        assert_eq!(h.bins.len(), 2);
        assert_eq!(h.width, 3.5);
    }

    #[test]
    fn test_freedman_diaconis_zero_iqr_falls_back() {
        let values = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 9.0];
        let h = Histogram::build("x", &values, BinRule::FreedmanDiaconis).unwrap();
        assert_eq!(h.bins.len(), 3);
    }

    #[test]
    fn test_freedman_diaconis_tiny_iqr_wide_range_falls_back() {
        let values = [0.0, 0.0, 0.0, 1e-9, 1e-9, 1e-9, 1e9];
        let h = Histogram::build("x", &values, BinRule::FreedmanDiaconis).unwrap();
        assert_eq!(h.bins.len(), 2);
        assert_eq!(h.total_count(), 7);
    }

    #[test]
    fn test_constant_values() {
        let h = Histogram::build("x", &[2.0, 2.0, 2.0, 2.0], BinRule::Sqrt).unwrap();
        assert_eq!(h.bins[0].start, 1.5);
        assert_eq!(h.bins.last().unwrap().end, 2.5);
        assert_eq!(h.total_count(), 4);
    }

    #[test]
    fn test_empty_input() {
        let err = Histogram::build("x", &[f64::NAN], BinRule::Sqrt).unwrap_err();
        assert!(matches!(err, ComputeError::EmptyHistogram(ref c) if c == "x"));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!("sqrt".parse::<BinRule>().unwrap(), BinRule::Sqrt);
        assert_eq!("FD".parse::<BinRule>().unwrap(), BinRule::FreedmanDiaconis);
        assert!(matches!("scott".parse::<BinRule>(), Err(ConfigError::UnknownBinRule(_))));
    }
}
