//! Representative widths of a font's glyphs.

use std::{collections::HashMap, fmt};

/// Statistic used to reduce a font's advance widths to one width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthStatistic {
    #[default]
    Average,
    Median,
    MostCommon,
}

impl WidthStatistic {
    /// Apply the statistic; `None` when `widths` is empty.
    pub fn compute(self, widths: &[u32]) -> Option<u32> {
        match self {
            Self::Average => average_width(widths),
            Self::Median => median_width(widths),
            Self::MostCommon => most_common_width(widths),
        }
    }
}

impl fmt::Display for WidthStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Average => "average",
            Self::Median => "median",
            Self::MostCommon => "most common",
        })
    }
}

/// `1 + floor(mean)`, an upper bound on the mean width.
pub fn average_width(widths: &[u32]) -> Option<u32> {
    if widths.is_empty() {
        return None;
    }
    let sum: u64 = widths.iter().map(|&w| w as u64).sum();
    Some(1 + (sum / widths.len() as u64) as u32)
}

/// The upper median: element `len / 2` of the sorted widths.
pub fn median_width(widths: &[u32]) -> Option<u32> {
    let mut sorted = widths.to_vec();
    sorted.sort_unstable();
    sorted.get(sorted.len() / 2).copied()
}

/// The most frequent width; ties go to the larger width.
pub fn most_common_width(widths: &[u32]) -> Option<u32> {
    width_histogram(widths, 1).first().map(|&(width, _)| width)
}

/// The `n` most frequent widths with their counts, most frequent first.
///
/// Widths with equal counts are ordered largest first.
pub fn width_histogram(widths: &[u32], n: usize) -> Vec<(u32, usize)> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &width in widths {
        *counts.entry(width).or_default() += 1;
    }
    let mut histogram: Vec<(u32, usize)> = counts.into_iter().collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    histogram.truncate(n);
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_width() {
        assert_eq!(average_width(&[500, 600, 700]), Some(601));
        assert_eq!(average_width(&[500, 501]), Some(501));
        assert_eq!(average_width(&[0]), Some(1));
    }

    #[test]
    fn test_average_width_bounds_mean() {
        let widths = [0, 250, 600, 600, 613, 1200, 1201];
        let mean = widths.iter().sum::<u32>() as f64 / widths.len() as f64;
        let average = average_width(&widths).unwrap() as f64;
        assert!(mean.floor() <= average && average <= mean.floor() + 1.0);
    }

    #[test]
    fn test_median_width() {
        assert_eq!(median_width(&[700, 500, 600]), Some(600));
        assert_eq!(median_width(&[400, 100, 300, 200]), Some(300));
        assert_eq!(median_width(&[42]), Some(42));
    }

    #[test]
    fn test_median_is_an_element() {
        let widths = [3, 1, 4, 1, 5, 9, 2, 6];
        assert!(widths.contains(&median_width(&widths).unwrap()));
    }

    #[test]
    fn test_most_common_width() {
        assert_eq!(most_common_width(&[600, 600, 600, 0, 1200]), Some(600));
    }

    #[test]
    fn test_most_common_width_tie_prefers_larger() {
        assert_eq!(most_common_width(&[500, 600, 500, 600]), Some(600));
    }

    #[test]
    fn test_empty_widths() {
        for statistic in [WidthStatistic::Average, WidthStatistic::Median, WidthStatistic::MostCommon]
        {
            assert_eq!(statistic.compute(&[]), None);
        }
    }

    #[test]
    fn test_width_histogram() {
        let histogram = width_histogram(&[600, 600, 0, 0, 0, 1200, 300], 3);
        assert_eq!(histogram, vec![(0, 3), (600, 2), (1200, 1)]);
    }
}
