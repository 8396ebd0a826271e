use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

use crate::color::{OutcomeColors, BENEFIT_COLORS, SKYBLUE};
use crate::data::metrics::{AgeBox, BenefitDistribution, Histogram, ScatterSeries};
use crate::data::model::{outcome_label, OUTCOME_LABELS};
use crate::data::render::RenderModel;

const CHART_HEIGHT: f32 = 300.0;

/// Arc segments per full turn when drawing pie wedges.
const PIE_SEGMENTS: f64 = 120.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render all five charts for the current model, two per row.
pub fn charts(ui: &mut Ui, model: &RenderModel, scatter_colors: &OutcomeColors) {
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Gráfico 1: Distribución de beneficio (barras)");
        benefit_bars(&mut cols[0], &model.benefit);
        cols[1].strong("Gráfico 2: Distribución de beneficio (torta)");
        benefit_pie(&mut cols[1], &model.benefit);
    });
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Gráfico 3: Edad por condición de beneficio");
        age_boxes(&mut cols[0], &model.age_boxes);
        cols[1].strong("Gráfico 4: Histograma de meses cotizados");
        months_histogram(&mut cols[1], &model.months_histogram);
    });
    ui.add_space(8.0);

    ui.strong("Gráfico 5: Dispersión Edad vs. Meses Cotizados");
    age_months_scatter(ui, &model.scatter, scatter_colors);
}

/// Axis formatter that names integer ticks with `labels` and hides the rest.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if v.fract() != 0.0 || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn benefit_bars(ui: &mut Ui, dist: &BenefitDistribution) {
    let bars: Vec<Bar> = dist
        .values()
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(i as f64, count as f64)
                .name(OUTCOME_LABELS[i])
                .fill(BENEFIT_COLORS[i])
                .width(0.6)
        })
        .collect();

    let labels = OUTCOME_LABELS.iter().map(|s| s.to_string()).collect();
    Plot::new("benefit_bars")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn benefit_pie(ui: &mut Ui, dist: &BenefitDistribution) {
    let slices = dist.pie_slices();

    Plot::new("benefit_pie")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.3)
        .include_y(1.3)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for slice in &slices {
                let span = slice.end_deg - slice.start_deg;
                let steps = ((span / 360.0) * PIE_SEGMENTS).ceil().max(1.0) as usize;
                let mut points = vec![[0.0, 0.0]];
                points.extend((0..=steps).map(|k| {
                    let deg = slice.start_deg + span * k as f64 / steps as f64;
                    let rad = deg.to_radians();
                    [rad.cos(), rad.sin()]
                }));

                let color = BENEFIT_COLORS[slice.category];
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(points))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(OUTCOME_LABELS[slice.category]),
                );

                let mid = slice.mid_deg().to_radians();
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    slice.percent_label(),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                    OUTCOME_LABELS[slice.category],
                ));
            }
        });
}

fn age_boxes(ui: &mut Ui, boxes: &[AgeBox]) {
    let labels = boxes.iter().map(|b| outcome_label(b.outcome)).collect();

    Plot::new("age_boxes")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Edad")
        .show(ui, |plot_ui| {
            let elems: Vec<BoxElem> = boxes
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let s = &b.stats;
                    BoxElem::new(
                        i as f64,
                        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                    )
                    .name(outcome_label(b.outcome))
                    .box_width(0.5)
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(elems));

            let outliers: Vec<[f64; 2]> = boxes
                .iter()
                .enumerate()
                .flat_map(|(i, b)| b.stats.outliers.iter().map(move |&y| [i as f64, y]))
                .collect();
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(outliers))
                        .radius(2.5)
                        .color(Color32::GRAY),
                );
            }
        });
}

fn months_histogram(ui: &mut Ui, hist: &Histogram) {
    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .zip(hist.edges.iter())
        .map(|(&count, &left)| {
            Bar::new(left + width / 2.0, count as f64)
                .width(width)
                .fill(SKYBLUE)
        })
        .collect();

    Plot::new("months_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(format!("Meses Cotizados (n = {})", hist.total()))
        .y_axis_label("Cantidad")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn age_months_scatter(ui: &mut Ui, series: &[ScatterSeries], colors: &OutcomeColors) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("consultara_beneficio:");
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new(format!("● {label}")).color(color));
        }
    });

    Plot::new("age_months_scatter")
        .height(CHART_HEIGHT + 80.0)
        .x_axis_label("edad")
        .y_axis_label("meses_cotizados")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(s.points.clone()))
                        .radius(3.0)
                        .filled(true)
                        .color(colors.color_for(s.outcome))
                        .name(outcome_label(s.outcome)),
                );
            }
        });
}
