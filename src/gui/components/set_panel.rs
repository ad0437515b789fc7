// src/gui/components/set_panel.rs
//
// Renders the left relic-set list and applies selection changes directly
// to `app`. The ignore toggle keeps the list visible but grays it out of
// the query.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Relic Sets");

    if ui
        .checkbox(&mut app.state.gui.ignore_sets, "I don't care about relic sets")
        .changed()
    {
        logf!("UI: Ignore sets → {}", app.state.gui.ignore_sets);
    }

    ui.separator();

    let names: Vec<String> = match &app.tables {
        Some(t) => t.relic_set_names().iter().map(|s| s!(*s)).collect(),
        None => Vec::new(),
    };
    if names.is_empty() {
        ui.label("No relic sets yet.");
        return;
    }

    // Match the scroll bar aesthetics used in the results table
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        s.foreground_color = true;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    egui::ScrollArea::vertical()
        .id_salt("set_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);
            ui.set_width(w);

            for name in &names {
                let is_selected = app.state.gui.selected_set.as_deref() == Some(name.as_str());
                let resp = ui.selectable_label(is_selected, name);
                if resp.clicked() && !app.running {
                    app.state.gui.selected_set = Some(name.clone());
                    logf!("UI: Relic set → {}", name);
                }
            }
        });
}
