use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Load failure: message only, nothing else renders ----
        if let Some(msg) = &self.state.load.error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Simulador de Beneficio Estatal - AFP");
                ui.label(RichText::new(msg).color(Color32::RED));
            });
            return;
        }
        if self.state.model.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Simulador de Beneficio Estatal - AFP");
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(model) = &self.state.model else {
                return;
            };
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Simulador de Beneficio Estatal - AFP");
                    panels::metrics_row(ui, &model.metrics);
                    ui.separator();

                    plot::charts(ui, model, &self.state.scatter_colors);
                    ui.separator();

                    ui.heading("Tabla de personas filtradas");
                    panels::records_table(ui, &self.state.load.dataset, &model.rows);
                });
        });
    }
}
