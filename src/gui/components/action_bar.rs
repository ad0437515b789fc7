// src/gui/components/action_bar.rs

use eframe::egui;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let scrape_btn = ui.add_enabled(!app.running, egui::Button::new("Scrape site"));
        if scrape_btn.clicked() {
            actions::scrape(app);
        }

        let export_btn = ui.add_enabled(
            app.tables.is_some() && !app.running,
            egui::Button::new("Export matches"),
        );
        if export_btn.clicked() {
            actions::export(app);
        }

        ui.separator();

        let status = app.status.lock().unwrap().clone();
        ui.label(status);
    });
}
