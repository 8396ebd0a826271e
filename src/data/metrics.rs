use std::collections::BTreeMap;

use super::filter::FilteredView;

/// Fixed bucket count of the months-contributed histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Pie slices start at 12 o'clock and run counter-clockwise.
const PIE_START_DEG: f64 = 90.0;

// ---------------------------------------------------------------------------
// Headline counts
// ---------------------------------------------------------------------------

/// The three scalar metrics at the top of the dashboard.
///
/// `receive` is a plain sum of the outcome column and `non_receive` its
/// complement, so outcome values outside `{0, 1}` skew both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub total: usize,
    pub receive: i64,
    pub non_receive: i64,
}

impl Metrics {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let total = view.len();
        // Wrapping arithmetic: dirty outcome values mis-tally, they never panic.
        let receive = view
            .records()
            .map(|r| r.outcome())
            .fold(0i64, i64::wrapping_add);
        Metrics {
            total,
            receive,
            non_receive: (total as i64).wrapping_sub(receive),
        }
    }
}

// ---------------------------------------------------------------------------
// Two-category benefit distribution (bar + pie)
// ---------------------------------------------------------------------------

/// Counts of outcome `0` and outcome `1`, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BenefitDistribution {
    pub no_receive: usize,
    pub receive: usize,
}

/// One wedge of the benefit pie chart. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Position in [`BenefitDistribution::values`].
    pub category: usize,
    pub fraction: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

impl BenefitDistribution {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let mut dist = BenefitDistribution::default();
        for record in view.records() {
            match record.outcome() {
                0 => dist.no_receive += 1,
                1 => dist.receive += 1,
                _ => {}
            }
        }
        dist
    }

    /// Category counts in label order: "No Reciben", "Reciben".
    pub fn values(&self) -> [usize; 2] {
        [self.no_receive, self.receive]
    }

    pub fn total(&self) -> usize {
        self.no_receive + self.receive
    }

    /// Wedges for the non-empty categories. Empty when both counts are zero.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        let mut start = PIE_START_DEG;
        self.values()
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(category, &count)| {
                let fraction = count as f64 / total as f64;
                let end = start + fraction * 360.0;
                let slice = PieSlice {
                    category,
                    fraction,
                    start_deg: start,
                    end_deg: end,
                };
                start = end;
                slice
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary plus outliers, matplotlib style (whiskers at 1.5 IQR).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let mut lower_whisker = q1;
        let mut upper_whisker = q3;
        let mut outliers = Vec::new();
        for &v in &sorted {
            if v < low_fence || v > high_fence {
                outliers.push(v);
            } else {
                lower_whisker = lower_whisker.min(v);
                upper_whisker = upper_whisker.max(v);
            }
        }

        Some(BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
            count: sorted.len(),
        })
    }
}

/// Linear-interpolation quantile of an already sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Ages of one outcome category.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBox {
    pub outcome: i64,
    pub stats: BoxStats,
}

/// Age distribution grouped by outcome value, ascending.
pub fn age_by_outcome(view: &FilteredView<'_>) -> Vec<AgeBox> {
    let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for record in view.records() {
        groups
            .entry(record.outcome())
            .or_default()
            .push(record.age as f64);
    }
    groups
        .into_iter()
        .filter_map(|(outcome, ages)| {
            BoxStats::from_values(&ages).map(|stats| AgeBox { outcome, stats })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning min..=max.
    ///
    /// The last bin is closed on the right. A constant sample is widened to
    /// `v ± 0.5`; an empty sample yields zero counts over `[0, 1]`.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if values.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Histogram { edges, counts }
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram of `months_contributed` over the view.
pub fn months_histogram(view: &FilteredView<'_>) -> Histogram {
    let months: Vec<f64> = view
        .records()
        .map(|r| r.months_contributed as f64)
        .collect();
    Histogram::new(&months, HISTOGRAM_BINS)
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// (age, months_contributed) points sharing one outcome value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub outcome: i64,
    pub points: Vec<[f64; 2]>,
}

/// Age vs. months points, one series per outcome value, ascending.
pub fn age_months_scatter(view: &FilteredView<'_>) -> Vec<ScatterSeries> {
    let mut groups: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for record in view.records() {
        groups
            .entry(record.outcome())
            .or_default()
            .push([record.age as f64, record.months_contributed as f64]);
    }
    groups
        .into_iter()
        .map(|(outcome, points)| ScatterSeries { outcome, points })
        .collect()
}
