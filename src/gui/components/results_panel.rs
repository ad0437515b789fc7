// src/gui/components/results_panel.rs
//
// Resolves the current query against the loaded snapshot and renders the
// matching characters. Resolution is a pure lookup over in-memory maps, so
// running it every frame is fine at this data size.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::config::consts::SITE_ROOT;
use crate::data::Tables;
use crate::gui::app::App;
use crate::query;
use crate::stats::Piece;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(tables) = &app.tables else {
        ui.label("No local data yet — use Scrape to build the tables.");
        return;
    };

    let q = app.current_query();
    let matches = match query::resolve(tables, &q) {
        Ok(m) => m,
        Err(e) => {
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            return;
        }
    };

    if matches.is_empty() {
        ui.label("There are no characters that have been found to want this relic.");
        return;
    }

    ui.strong(format!("{} matching character(s)", matches.len()));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(220.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| { ui.strong("Character"); });
            header.col(|ui| { ui.strong("Main stats"); });
            header.col(|ui| { ui.strong("Preferred substats"); });
        })
        .body(|mut body| {
            for name in &matches {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        match tables.characters_to_urls.get(name) {
                            Some(url) => {
                                ui.hyperlink_to(name, join!(SITE_ROOT, url));
                            }
                            None => {
                                ui.label(name);
                            }
                        }
                    });
                    row.col(|ui| {
                        ui.label(main_stat_summary(tables, name, q.piece));
                    });
                    row.col(|ui| {
                        let label = ui.label(substat_summary(tables, name));
                        // raw site text on hover, e.g. priorities and breakpoints
                        if let Some(desc) = tables.characters_to_substat_desc.get(name) {
                            if !desc.is_empty() {
                                let _ = label.on_hover_text(desc);
                            }
                        }
                    });
                });
            }
        });
}

/// The character's stored main stats within the queried piece scope.
fn main_stat_summary(tables: &Tables, name: &str, piece: Option<Piece>) -> String {
    let Some(by_piece) = tables.characters_to_main_stats.get(name) else {
        return s!();
    };
    match piece {
        Some(p) => by_piece
            .get(&p)
            .map(|stats| stats.join(", "))
            .unwrap_or_default(),
        None => {
            let mut all: Vec<&str> = by_piece
                .values()
                .flatten()
                .map(String::as_str)
                .collect();
            all.sort_unstable();
            all.dedup();
            all.join(", ")
        }
    }
}

fn substat_summary(tables: &Tables, name: &str) -> String {
    tables
        .characters_to_substats
        .get(name)
        .map(|subs| {
            let names: Vec<&str> = subs.iter().map(|s| s.name()).collect();
            names.join(", ")
        })
        .unwrap_or_default()
}
