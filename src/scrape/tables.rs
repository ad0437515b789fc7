// src/scrape/tables.rs
//
// Turns collected records into the canonical relations and persists them.
// Row building is a pure fold over the batch, sorted and de-duplicated,
// so an identical batch always produces byte-identical tables.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::PathBuf;

use crate::config::options::{CharacterSelector, ScrapeOptions};
use crate::progress::Progress;
use crate::specs::relic_sets::RelicSetBundle;
use crate::stats::ALL_PIECES;
use crate::store::{self, DataSet, TableKind};

use super::characters::{collect_characters, collect_relic_sets, CharacterRecord};

pub struct ScrapeSummary {
    pub characters: usize,
    pub relic_sets: usize,
    pub files: Vec<PathBuf>,
}

/// The six character relations. A duplicate display name keeps the last
/// record; rows come out sorted per relation.
pub fn build_character_tables(records: &[CharacterRecord]) -> Vec<(TableKind, DataSet)> {
    let by_name: BTreeMap<&str, &CharacterRecord> = records
        .iter()
        .map(|r| (r.bundle.name.as_str(), r))
        .collect();

    let mut relics = Vec::new();
    let mut mains = Vec::new();
    let mut subs = Vec::new();
    let mut urls = Vec::new();
    let mut imgs = Vec::new();
    let mut descs = Vec::new();

    for (name, r) in by_name {
        for set in &r.bundle.relic_sets {
            relics.push(vec![s!(name), set.clone()]);
        }
        for (piece, stats) in &r.bundle.main_stats {
            for st in stats {
                mains.push(vec![s!(name), s!(piece.name()), s!(st.name())]);
            }
        }
        for st in &r.bundle.substats {
            subs.push(vec![s!(name), s!(st.name())]);
        }
        urls.push(vec![s!(name), r.url.clone()]);
        imgs.push(vec![s!(name), r.img.clone()]);
        descs.push(vec![s!(name), r.bundle.substat_desc.clone()]);
    }

    vec![
        (TableKind::CharactersToRelics, dataset(TableKind::CharactersToRelics, relics)),
        (TableKind::CharactersToMainStats, dataset(TableKind::CharactersToMainStats, mains)),
        (TableKind::CharactersToSubstats, dataset(TableKind::CharactersToSubstats, subs)),
        (TableKind::CharactersToUrls, dataset(TableKind::CharactersToUrls, urls)),
        (TableKind::CharactersToImgs, dataset(TableKind::CharactersToImgs, imgs)),
        (TableKind::CharactersToSubstatDesc, dataset(TableKind::CharactersToSubstatDesc, descs)),
    ]
}

/// The two relic-set relations (description lines joined into one cell).
pub fn build_relic_tables(sets: &[RelicSetBundle]) -> Vec<(TableKind, DataSet)> {
    let mut imgs = Vec::new();
    let mut descs = Vec::new();
    for set in sets {
        imgs.push(vec![set.name.clone(), set.img.clone()]);
        descs.push(vec![set.name.clone(), set.desc_lines.join("\n")]);
    }
    vec![
        (TableKind::RelicsToImgs, dataset(TableKind::RelicsToImgs, imgs)),
        (TableKind::RelicsToDesc, dataset(TableKind::RelicsToDesc, descs)),
    ]
}

/// Static piece → main-stat pool dump; travels with every run.
pub fn piece_table() -> (TableKind, DataSet) {
    let mut rows = Vec::new();
    for piece in ALL_PIECES {
        for st in piece.main_stats() {
            rows.push(vec![s!(piece.name()), s!(st.name())]);
        }
    }
    (TableKind::PieceToMainStat, DataSet::new(TableKind::PieceToMainStat.headers(), rows))
}

fn dataset(kind: TableKind, mut rows: Vec<Vec<String>>) -> DataSet {
    rows.sort();
    rows.dedup();
    DataSet::new(kind.headers(), rows)
}

/// Partial-scrape merge: keep existing rows for characters outside this
/// run, replace rows for the ones it covered.
fn merge_into_existing(kind: TableKind, new: DataSet, scraped: &BTreeSet<String>) -> DataSet {
    match store::load_dataset(kind) {
        Ok(existing) => {
            let mut rows = existing.rows;
            rows.retain(|r| r.first().is_some_and(|c| !scraped.contains(c)));
            rows.extend(new.rows);
            rows.sort();
            rows.dedup();
            DataSet { headers: new.headers, rows }
        }
        Err(_) => new,
    }
}

/// Full pipeline: collect, normalize, persist every relation.
pub fn run(
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeSummary, Box<dyn Error>> {
    let records = collect_characters(scrape, progress.as_deref_mut())?;
    let partial = !matches!(scrape.characters, CharacterSelector::All);
    let scraped: BTreeSet<String> =
        records.iter().map(|r| r.bundle.name.clone()).collect();

    let mut files = Vec::new();
    for (kind, ds) in build_character_tables(&records) {
        let ds = if partial {
            merge_into_existing(kind, ds, &scraped)
        } else {
            ds
        };
        let path = store::save_dataset(kind, &ds)?;
        logf!("Store: Saved {:?} → {} ({} rows)", kind, path.display(), ds.row_count());
        files.push(path);
    }

    let mut set_count = 0usize;
    if scrape.relic_sets {
        let sets = collect_relic_sets(progress.as_deref_mut())?;
        set_count = sets.len();
        for (kind, ds) in build_relic_tables(&sets) {
            let path = store::save_dataset(kind, &ds)?;
            logf!("Store: Saved {:?} → {} ({} rows)", kind, path.display(), ds.row_count());
            files.push(path);
        }
    }

    let (kind, ds) = piece_table();
    files.push(store::save_dataset(kind, &ds)?);

    logf!(
        "Scrape: Done — {} characters, {} relic sets, {} files",
        records.len(), set_count, files.len()
    );

    Ok(ScrapeSummary {
        characters: records.len(),
        relic_sets: set_count,
        files,
    })
}
