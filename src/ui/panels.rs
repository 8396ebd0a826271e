use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{SexFilter, AGE_BOUNDS, MONTHS_BOUNDS};
use crate::data::metrics::Metrics;
use crate::data::model::{
    Dataset, COL_AGE, COL_BENEFIT, COL_MONTHS, COL_PENSIONER, COL_SEX,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter widgets; any change recomputes the dashboard at once.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    let params = &mut state.params;
    let mut changed = false;

    ui.strong("Sexo");
    egui::ComboBox::from_id_salt("sex_filter")
        .selected_text(params.sex.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in SexFilter::ALL {
                changed |= ui
                    .selectable_value(&mut params.sex, option, option.to_string())
                    .changed();
            }
        });
    ui.add_space(6.0);

    changed |= ui
        .add(egui::Slider::new(&mut params.age_min, AGE_BOUNDS).text("Edad mínima"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut params.age_max, AGE_BOUNDS).text("Edad máxima"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut params.months_min, MONTHS_BOUNDS).text("Meses cotizados mínimos"))
        .changed();
    changed |= ui
        .checkbox(&mut params.pensioners_only, "Solo pensionados")
        .changed();

    if changed {
        state.on_filters_changed();
    }

    ui.separator();
    ui.label(format!("{} registros cargados", state.load.dataset.len()));
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// Render the three headline numbers side by side.
pub fn metrics_row(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Personas filtradas", metrics.total.to_string());
        metric(&mut cols[1], "Reciben beneficio", metrics.receive.to_string());
        metric(&mut cols[2], "No reciben", metrics.non_receive.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Filtered rows table
// ---------------------------------------------------------------------------

const TABLE_HEADERS: [&str; 6] = ["", COL_AGE, COL_MONTHS, COL_SEX, COL_PENSIONER, COL_BENEFIT];

/// Render the filtered records; the first column is a 0-based display index.
pub fn records_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0), TABLE_HEADERS.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(420.0)
        .header(20.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let display_idx = row.index();
                let record = &dataset.records[rows[display_idx]];
                let cells = [
                    display_idx.to_string(),
                    record.age.to_string(),
                    record.months_contributed.to_string(),
                    record.sex.clone(),
                    record.is_pensioner.to_string(),
                    record.will_request_benefit.to_string(),
                ];
                for text in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
