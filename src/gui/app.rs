// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::state::AppState,
    data::Tables,
    query::Query,
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Relic Filter",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // load-once snapshot of the canonical tables; replaced only by
    // reload_tables() after a scrape
    pub tables: Option<Tables>,

    // status line (scrape progress writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        let (tables, status) = match Tables::load() {
            Ok(t) => {
                logf!(
                    "Tables: Loaded {} characters, {} relic sets",
                    t.character_names().len(),
                    t.relic_set_names().len()
                );
                (Some(t), s!("Loaded local tables"))
            }
            Err(e) => {
                logd!("Tables: No local data ({})", e);
                (None, s!("No local tables — use Scrape to build them"))
            }
        };

        // Default to the first known relic set so the panel has a selection.
        if state.gui.selected_set.is_none() {
            if let Some(t) = &tables {
                state.gui.selected_set = t.relic_set_names().iter().next().map(|s| s!(*s));
            }
        }

        Self {
            state,
            tables,
            status: Arc::new(Mutex::new(status)),
            running: false,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    /// The query the current control state describes.
    pub fn current_query(&self) -> Query {
        let gui = &self.state.gui;
        Query {
            relic_set: if gui.ignore_sets { None } else { gui.selected_set.clone() },
            piece: gui.piece,
            main_stat: gui.main_stat,
            substats: gui.substats.clone(),
            filter_by_substats: gui.filter_by_substats,
        }
    }

    /// Explicit snapshot invalidation: re-read the tables from disk.
    pub fn reload_tables(&mut self) {
        match Tables::load() {
            Ok(t) => {
                let selected_still_known = self
                    .state
                    .gui
                    .selected_set
                    .as_deref()
                    .is_some_and(|s| t.knows_relic_set(s));
                if !selected_still_known {
                    self.state.gui.selected_set =
                        t.relic_set_names().iter().next().map(|s| s!(*s));
                }
                self.tables = Some(t);
            }
            Err(e) => {
                loge!("Tables: Reload failed: {}", e);
                self.tables = None;
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("relic_sets")
            .resizable(false)
            .show(ctx, |ui| {
                crate::gui::components::set_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::action_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::filter_panel::draw(ui, self);

            ui.separator();

            crate::gui::components::results_panel::draw(ui, self);
        });
    }
}
