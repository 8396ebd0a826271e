use super::filter::{apply, FilterParams};
use super::metrics::{
    age_by_outcome, age_months_scatter, months_histogram, AgeBox, BenefitDistribution,
    Histogram, Metrics, ScatterSeries,
};
use super::model::Dataset;

/// Everything the central panel draws for one set of filter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub params: FilterParams,
    pub metrics: Metrics,
    pub benefit: BenefitDistribution,
    pub age_boxes: Vec<AgeBox>,
    pub months_histogram: Histogram,
    pub scatter: Vec<ScatterSeries>,
    /// Original indices of the filtered rows; the table re-numbers them from 0.
    pub rows: Vec<usize>,
}

/// Recompute the whole dashboard for `params`. Pure and deterministic.
pub fn on_filters_changed(dataset: &Dataset, params: &FilterParams) -> RenderModel {
    let view = apply(dataset, params);
    if view.is_empty() {
        log::debug!("Filters {:?} match no records", params);
    } else {
        log::debug!(
            "Filters {:?} kept {} of {} records",
            params,
            view.len(),
            dataset.len()
        );
    }

    RenderModel {
        params: *params,
        metrics: Metrics::compute(&view),
        benefit: BenefitDistribution::compute(&view),
        age_boxes: age_by_outcome(&view),
        months_histogram: months_histogram(&view),
        scatter: age_months_scatter(&view),
        rows: view.indices().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::sample;
    use crate::data::filter::SexFilter;
    use crate::data::metrics::HISTOGRAM_BINS;

    #[test]
    fn scenario_model() {
        let ds = sample();
        let params = FilterParams {
            sex: SexFilter::Any,
            age_min: 60,
            age_max: 90,
            months_min: 50,
            pensioners_only: true,
        };
        let model = on_filters_changed(&ds, &params);
        assert_eq!(model.rows, vec![0, 2, 3]);
        assert_eq!(model.metrics.receive, 2);
        assert_eq!(model.metrics.non_receive, 1);
        assert_eq!(model.benefit.values(), [1, 2]);
        assert_eq!(model.months_histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(model.months_histogram.total(), 3);
    }

    #[test]
    fn identical_inputs_give_identical_models() {
        let ds = sample();
        let params = FilterParams::default();
        assert_eq!(on_filters_changed(&ds, &params), on_filters_changed(&ds, &params));
    }

    #[test]
    fn empty_view_renders_zeroes() {
        let ds = sample();
        let params = FilterParams {
            age_min: 85,
            age_max: 20,
            ..FilterParams::identity()
        };
        let model = on_filters_changed(&ds, &params);
        assert!(model.rows.is_empty());
        assert_eq!(model.metrics.total, 0);
        assert_eq!(model.benefit.values(), [0, 0]);
        assert!(model.age_boxes.is_empty());
        assert!(model.scatter.is_empty());
    }
}
