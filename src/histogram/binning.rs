//! Equal-width binning over a sample's own range.

use log::debug;

/// Bin edges and counts of one series
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal-width bins
    ///
    /// The range is `[min, max]` of the finite values, widened to
    /// `[v - 0.5, v + 0.5]` when every value is equal. The last bin is
    /// closed on the right. Returns `None` when there are no finite values
    /// or `bins` is zero.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }

        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<(f64, f64)>, &v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        let skipped = values.iter().filter(|v| !v.is_finite()).count();
        if skipped > 0 {
            debug!("Skipping {} non-finite values", skipped);
        }

        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / bins as f64;

        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        if let Some(last) = edges.last_mut() {
            *last = hi;
        }

        let mut counts = vec![0u64; bins];
        for v in values.iter().filter(|v| v.is_finite()) {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            if let Some(count) = counts.get_mut(idx) {
                *count += 1;
            }
        }

        Some(Self { edges, counts })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Leftmost and rightmost edge
    pub fn range(&self) -> (f64, f64) {
        let lo = self.edges.first().copied().unwrap_or(0.0);
        let hi = self.edges.last().copied().unwrap_or(0.0);
        (lo, hi)
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Outline of the histogram as a closed step path starting and ending at zero
    pub fn step_outline(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.counts.len() * 2 + 2);
        let (lo, hi) = self.range();

        points.push((lo, 0.0));
        for (edge, count) in self.edges.windows(2).zip(&self.counts) {
            let height = *count as f64;
            points.push((edge[0], height));
            points.push((edge[1], height));
        }
        points.push((hi, 0.0));

        points
    }
}
