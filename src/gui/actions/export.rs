// src/gui/actions/export.rs
use crate::{
    file,
    gui::app::App,
    query,
};

/// Write the current result set to the configured export path.
pub fn export(app: &mut App) {
    let Some(tables) = &app.tables else {
        app.status("Nothing to export — no local tables");
        return;
    };

    let q = app.current_query();
    let matches = match query::resolve(tables, &q) {
        Ok(m) => m,
        Err(e) => {
            app.status(format!("{e}"));
            return;
        }
    };

    let headers = Some(vec![s!("Character"), s!("URL"), s!("IMG")]);
    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|name| {
            vec![
                name.clone(),
                tables.characters_to_urls.get(name).cloned().unwrap_or_default(),
                tables.characters_to_imgs.get(name).cloned().unwrap_or_default(),
            ]
        })
        .collect();

    match file::write_export(&app.state.options.export, &headers, &rows) {
        Ok(path) => {
            logf!("Export: {} rows → {}", rows.len(), path.display());
            app.status(format!("Exported {} character(s) → {}", rows.len(), path.display()));
        }
        Err(e) => {
            loge!("Export: Failed: {}", e);
            app.status(format!("Export failed: {e}"));
        }
    }
}
