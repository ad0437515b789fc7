// src/data.rs
//
// Load-once immutable snapshot of the canonical tables.
//
// Loaded once per process from the table store; the query layer only ever
// borrows it. A fresh scrape does not mutate a live snapshot; the caller
// reloads explicitly (GUI after a scrape action, CLI by restart).

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::Path;

use crate::config::consts::TABLES_DIR;
use crate::stats::{Piece, Stat};
use crate::store::{self, DataSet, TableKind};

#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub characters_to_relics: BTreeMap<String, BTreeSet<String>>,
    pub characters_to_main_stats: BTreeMap<String, BTreeMap<Piece, Vec<String>>>,
    pub characters_to_substats: BTreeMap<String, BTreeSet<Stat>>,
    pub characters_to_urls: BTreeMap<String, String>,
    pub characters_to_imgs: BTreeMap<String, String>,
    pub relics_to_imgs: BTreeMap<String, String>,
    /// Description lines per set; 1 line = planar ornament, 2 = cavern relic.
    pub relics_to_desc: BTreeMap<String, Vec<String>>,
    pub piece_to_main_stat: BTreeMap<Piece, Vec<String>>,
    pub characters_to_substat_desc: BTreeMap<String, String>,
}

impl Tables {
    pub fn load() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(TABLES_DIR))
    }

    pub fn load_from(dir: &Path) -> Result<Self, Box<dyn Error>> {
        let mut tables = Self::default();
        for kind in store::ALL_TABLES {
            let ds = store::load_dataset_in(dir, kind)?;
            tables.absorb(kind, &ds);
        }
        Ok(tables)
    }

    /// Ingest one relation. Rows with cells outside the taxonomy are logged
    /// and skipped; one bad row must not block the snapshot.
    pub fn absorb(&mut self, kind: TableKind, ds: &DataSet) {
        for row in &ds.rows {
            let (key, value) = match (row.first(), row.get(1)) {
                (Some(k), Some(v)) => (k.clone(), v.clone()),
                _ => {
                    loge!("Tables: {:?}: short row {:?}", kind, row);
                    continue;
                }
            };
            match kind {
                TableKind::CharactersToRelics => {
                    self.characters_to_relics.entry(key).or_default().insert(value);
                }
                TableKind::CharactersToMainStats => {
                    let Some(stat) = row.get(2) else {
                        loge!("Tables: {:?}: short row {:?}", kind, row);
                        continue;
                    };
                    match Piece::from_name(&value) {
                        Some(piece) => {
                            self.characters_to_main_stats
                                .entry(key)
                                .or_default()
                                .entry(piece)
                                .or_default()
                                .push(stat.clone());
                        }
                        None => loge!("Tables: {:?}: unknown piece {:?}", kind, value),
                    }
                }
                TableKind::CharactersToSubstats => match Stat::from_name(&value) {
                    Some(stat) => {
                        self.characters_to_substats.entry(key).or_default().insert(stat);
                    }
                    None => loge!("Tables: {:?}: unknown substat {:?}", kind, value),
                },
                TableKind::CharactersToUrls => {
                    self.characters_to_urls.insert(key, value);
                }
                TableKind::CharactersToImgs => {
                    self.characters_to_imgs.insert(key, value);
                }
                TableKind::RelicsToImgs => {
                    self.relics_to_imgs.insert(key, value);
                }
                TableKind::RelicsToDesc => {
                    let lines = value.lines().map(|l| s!(l)).collect();
                    self.relics_to_desc.insert(key, lines);
                }
                TableKind::PieceToMainStat => match Piece::from_name(&key) {
                    Some(piece) => {
                        self.piece_to_main_stat.entry(piece).or_default().push(value);
                    }
                    None => loge!("Tables: {:?}: unknown piece {:?}", kind, key),
                },
                TableKind::CharactersToSubstatDesc => {
                    self.characters_to_substat_desc.insert(key, value);
                }
            }
        }
    }

    /// Relic set names known to the snapshot, from the set guide tables
    /// with a fallback to sets seen on character pages.
    pub fn relic_set_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = self.relics_to_desc.keys().map(String::as_str).collect();
        names.extend(self.relics_to_imgs.keys().map(String::as_str));
        names.extend(
            self.characters_to_relics
                .values()
                .flat_map(|sets| sets.iter().map(String::as_str)),
        );
        names
    }

    pub fn knows_relic_set(&self, name: &str) -> bool {
        self.relics_to_desc.contains_key(name)
            || self.relics_to_imgs.contains_key(name)
            || self
                .characters_to_relics
                .values()
                .any(|sets| sets.contains(name))
    }

    pub fn character_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> =
            self.characters_to_main_stats.keys().map(String::as_str).collect();
        names.extend(self.characters_to_relics.keys().map(String::as_str));
        names
    }
}
