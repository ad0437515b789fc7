// src/gui/components/filter_panel.rs
//
// Draws the query controls: selected-set summary, piece selector,
// main-stat radio (constrained to the piece's pool), substat checkboxes
// and their advisory warnings.

use eframe::egui;

use crate::config::consts::SITE_ROOT;
use crate::gui::app::App;
use crate::query;
use crate::stats::{main_stat_candidates, MainStat, Piece, Stat, ALL_PIECES, SUBSTATS};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    draw_set_summary(ui, app);
    draw_piece_row(ui, app);
    draw_main_stat_row(ui, app);
    draw_substat_row(ui, app);

    for warning in query::advisories(&app.current_query()) {
        ui.colored_label(ui.visuals().warn_fg_color, warning);
    }
}

fn draw_set_summary(ui: &mut egui::Ui, app: &App) {
    if app.state.gui.ignore_sets {
        return;
    }
    let (Some(tables), Some(selected)) = (&app.tables, &app.state.gui.selected_set) else {
        return;
    };

    ui.heading(selected);
    if let Some(lines) = tables.relics_to_desc.get(selected) {
        for line in lines {
            ui.label(line);
        }
    }
    if let Some(img) = tables.relics_to_imgs.get(selected) {
        ui.hyperlink_to("Set image", join!(SITE_ROOT, img));
    }
    ui.separator();
}

fn draw_piece_row(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Relic piece:");
        let piece = &mut app.state.gui.piece;
        ui.selectable_value(piece, None, "Any");
        for p in ALL_PIECES {
            ui.selectable_value(piece, Some(p), p.name());
        }
    });
}

fn draw_main_stat_row(ui: &mut egui::Ui, app: &mut App) {
    let choices: Vec<MainStat> = match app.state.gui.piece {
        // Piece-locked: the stat is fixed, the radio collapses to a note.
        Some(Piece::Head) => vec![MainStat::Stat(Stat::Hp)],
        Some(Piece::Hands) => vec![MainStat::Stat(Stat::Atk)],
        Some(p) => std::iter::once(MainStat::Anything)
            .chain(p.main_stats().iter().map(|&s| MainStat::Stat(s)))
            .collect(),
        None => std::iter::once(MainStat::Anything)
            .chain(main_stat_candidates().into_iter().map(MainStat::Stat))
            .collect(),
    };

    // Piece switches can strand a stat outside the new pool; snap back.
    if !choices.contains(&app.state.gui.main_stat) {
        app.state.gui.main_stat = choices[0];
    }

    ui.label("Main stat:");
    if choices.len() == 1 {
        ui.horizontal(|ui| {
            ui.radio_value(&mut app.state.gui.main_stat, choices[0], choices[0].name());
            ui.weak("(fixed for this piece)");
        });
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for choice in choices {
            ui.radio_value(&mut app.state.gui.main_stat, choice, choice.name());
        }
    });
}

fn draw_substat_row(ui: &mut egui::Ui, app: &mut App) {
    ui.checkbox(&mut app.state.gui.filter_by_substats, "Filter by substats");

    let enabled = app.state.gui.filter_by_substats;
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal_wrapped(|ui| {
            for st in SUBSTATS {
                let mut on = app.state.gui.substats.contains(&st);
                if ui.checkbox(&mut on, st.name()).changed() {
                    toggle(&mut app.state.gui.substats, st, on);
                }
            }
        });
    });
}

fn toggle(set: &mut std::collections::BTreeSet<Stat>, st: Stat, on: bool) {
    if on {
        set.insert(st);
    } else {
        set.remove(&st);
    }
}
