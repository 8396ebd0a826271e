use std::fmt;
use std::ops::RangeInclusive;

use super::model::{Dataset, Record};

/// Slider bounds for both age widgets.
pub const AGE_BOUNDS: RangeInclusive<i64> = 18..=90;
/// Slider bounds for the months-contributed widget.
pub const MONTHS_BOUNDS: RangeInclusive<i64> = 0..=500;

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SexFilter {
    #[default]
    Any,
    Female,
    Male,
}

impl SexFilter {
    pub const ALL: [SexFilter; 3] = [SexFilter::Any, SexFilter::Female, SexFilter::Male];

    /// The normalized `sexo` value this choice keeps, `None` for "any".
    pub fn code(self) -> Option<&'static str> {
        match self {
            SexFilter::Any => None,
            SexFilter::Female => Some("F"),
            SexFilter::Male => Some("M"),
        }
    }
}

impl fmt::Display for SexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("Todos"))
    }
}

/// The user's current filter choices. All predicates are AND-ed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub sex: SexFilter,
    pub age_min: i64,
    pub age_max: i64,
    pub months_min: i64,
    pub pensioners_only: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            sex: SexFilter::Any,
            age_min: 65,
            age_max: 90,
            months_min: 0,
            pensioners_only: true,
        }
    }
}

impl FilterParams {
    /// Widest settings the widgets allow; keeps every in-range record.
    #[cfg(test)]
    pub fn identity() -> Self {
        Self {
            sex: SexFilter::Any,
            age_min: *AGE_BOUNDS.start(),
            age_max: *AGE_BOUNDS.end(),
            months_min: *MONTHS_BOUNDS.start(),
            pensioners_only: false,
        }
    }

    /// Whether a single record passes every active predicate.
    ///
    /// `age_min > age_max` is not reordered, so it rejects everything.
    pub fn matches(&self, record: &Record) -> bool {
        if record.age < self.age_min || record.age > self.age_max {
            return false;
        }
        if record.months_contributed < self.months_min {
            return false;
        }
        if let Some(code) = self.sex.code() {
            if record.sex != code {
                return false;
            }
        }
        if self.pensioners_only && !record.is_pensioner() {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// A subset of a [`Dataset`], as ascending indices into its records.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Original row indices of the kept records.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Kept records in original order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

/// Apply `params` to `dataset`, preserving row order.
pub fn apply<'a>(dataset: &'a Dataset, params: &FilterParams) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| params.matches(record))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(age: i64, months: i64, sex: &str, pensioner: i64, benefit: i64) -> Record {
        Record {
            age,
            months_contributed: months,
            sex: sex.to_string(),
            is_pensioner: pensioner,
            will_request_benefit: benefit,
        }
    }

    /// Four-row dataset used across the data-layer tests.
    pub(crate) fn sample() -> Dataset {
        Dataset::new(
            vec![
                record(70, 120, "F", 1, 1),
                record(20, 10, "M", 0, 0),
                record(80, 300, "F", 1, 0),
                record(65, 200, "M", 1, 1),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn scenario_pensioners_over_sixty() {
        let ds = sample();
        let params = FilterParams {
            sex: SexFilter::Any,
            age_min: 60,
            age_max: 90,
            months_min: 50,
            pensioners_only: true,
        };
        let view = apply(&ds, &params);
        assert_eq!(view.indices(), &[0, 2, 3]);
    }

    #[test]
    fn identity_keeps_everything() {
        let ds = sample();
        let view = apply(&ds, &FilterParams::identity());
        assert_eq!(view.indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn inverted_age_range_is_empty() {
        let ds = sample();
        for sex in SexFilter::ALL {
            let params = FilterParams {
                sex,
                age_min: 80,
                age_max: 70,
                months_min: 0,
                pensioners_only: false,
            };
            assert!(apply(&ds, &params).is_empty());
        }
    }

    #[test]
    fn sex_filter_matches_normalized_code() {
        let ds = sample();
        let params = FilterParams {
            sex: SexFilter::Male,
            ..FilterParams::identity()
        };
        assert_eq!(apply(&ds, &params).indices(), &[1, 3]);

        let params = FilterParams {
            sex: SexFilter::Female,
            ..FilterParams::identity()
        };
        assert_eq!(apply(&ds, &params).indices(), &[0, 2]);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let ds = sample();
        let params = FilterParams {
            age_min: 65,
            age_max: 70,
            ..FilterParams::identity()
        };
        assert_eq!(apply(&ds, &params).indices(), &[0, 3]);
    }

    #[test]
    fn months_minimum_is_inclusive() {
        let ds = sample();
        let params = FilterParams {
            months_min: 200,
            ..FilterParams::identity()
        };
        assert_eq!(apply(&ds, &params).indices(), &[2, 3]);
    }

    #[test]
    fn pensioner_flag_must_equal_one() {
        let ds = Dataset::new(vec![record(70, 0, "F", 2, 0), record(70, 0, "F", 1, 0)], Vec::new());
        let params = FilterParams {
            pensioners_only: true,
            ..FilterParams::identity()
        };
        assert_eq!(apply(&ds, &params).indices(), &[1]);
    }

    #[test]
    fn view_is_subset_and_deterministic() {
        let ds = sample();
        let params = FilterParams::default();
        let a = apply(&ds, &params);
        let b = apply(&ds, &params);
        assert_eq!(a.indices(), b.indices());
        assert!(a.indices().iter().all(|&i| i < ds.len()));
        assert!(a.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sex_labels() {
        assert_eq!(SexFilter::Any.to_string(), "Todos");
        assert_eq!(SexFilter::Female.to_string(), "F");
        assert_eq!(SexFilter::Male.to_string(), "M");
    }
}
