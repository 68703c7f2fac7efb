use serde::{Deserialize, Serialize};

/// Half-open range of grid indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    /// First index inside the range.
    pub start: usize,
    /// One past the last index inside the range.
    pub end: usize,
}

impl IndexRange {
    /// Creates `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no index.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` lies inside the range.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Common part of two ranges; ranges that only touch do not intersect.
    pub fn intersect(&self, other: &IndexRange) -> Option<IndexRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| IndexRange::new(start, end))
    }
}

/// Marks every value within `[mean - sigma_low, mean + sigma_up]`, both bounds
/// included. `NaN` values are never in range.
pub fn values_in_range(values: &[f64], mean: f64, sigma_low: f64, sigma_up: f64) -> Vec<bool> {
    let (low, high) = (mean - sigma_low, mean + sigma_up);
    values
        .iter()
        .map(|&value| low <= value && value <= high)
        .collect()
}

/// Maximal runs of `true`, scanned left to right.
pub fn find_true_intervals(mask: &[bool]) -> Vec<IndexRange> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    for (idx, &flag) in mask.iter().enumerate() {
        match (flag, open) {
            (true, None) => open = Some(idx),
            (false, Some(start)) => {
                ranges.push(IndexRange::new(start, idx));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        ranges.push(IndexRange::new(start, mask.len()));
    }
    ranges
}

/// Pairwise intersections of two range lists in A-major, B-minor order.
///
/// Each emitted range is `a` when it lies inside `b`, `[a.start, b.end)` or
/// `[b.start, a.end)` for partial overlaps and `b` when `a` contains it.
/// Zero-width intersections are skipped.
pub fn find_interval_overlaps(ranges_a: &[IndexRange], ranges_b: &[IndexRange]) -> Vec<IndexRange> {
    ranges_a
        .iter()
        .flat_map(|a| ranges_b.iter().filter_map(move |b| a.intersect(b)))
        .collect()
}
