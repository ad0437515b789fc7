// src/gui/actions/scrape.rs
use crate::{
    gui::app::App,
    gui::progress::GuiProgress,
    scrape,
};

pub fn scrape(app: &mut App) {
    logf!(
        "Scrape: Begin characters={:?} relic_sets={}",
        app.state.options.scrape.characters,
        app.state.options.scrape.relic_sets
    );

    app.running = true;
    let mut prog = GuiProgress::new(app.status.clone());

    // → This is where the scrape happens ←
    let result = scrape::run(&app.state.options.scrape, Some(&mut prog));

    match result {
        Ok(summary) => {
            logf!(
                "Scrape: OK — {} characters, {} relic sets",
                summary.characters, summary.relic_sets
            );

            // fresh tables on disk → invalidate the in-memory snapshot
            app.reload_tables();
            app.status(format!("Ready — {} characters loaded", summary.characters));
        }
        Err(e) => {
            loge!("Scrape: Error: {}", e);
            app.status(format!("Error: {e}"));
        }
    }
    app.running = false;
}
