// src/store.rs
//
// Durable table store: one CSV per relation under TABLES_DIR, header row
// first. A scrape run rewrites the whole file; readers load it back as-is.

use std::{
    error::Error,
    fs, io,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{STORE_SEP, TABLES_DIR};
use crate::csv::{parse_rows, write_row};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Some(headers.iter().map(|h| s!(*h)).collect()),
            rows,
        }
    }

    pub fn row_count(&self) -> usize { self.rows.len() }
    pub fn header_count(&self) -> usize { self.headers.as_ref().map(|h| h.len()).unwrap_or(0) }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// One stored relation. Column shapes are fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    CharactersToRelics,
    CharactersToMainStats,
    CharactersToSubstats,
    CharactersToUrls,
    CharactersToImgs,
    RelicsToImgs,
    RelicsToDesc,
    PieceToMainStat,
    CharactersToSubstatDesc,
}

use TableKind::*;

pub const ALL_TABLES: [TableKind; 9] = [
    CharactersToRelics,
    CharactersToMainStats,
    CharactersToSubstats,
    CharactersToUrls,
    CharactersToImgs,
    RelicsToImgs,
    RelicsToDesc,
    PieceToMainStat,
    CharactersToSubstatDesc,
];

impl TableKind {
    pub fn file_stem(self) -> &'static str {
        match self {
            CharactersToRelics => "characters_to_relics",
            CharactersToMainStats => "characters_to_main_stats",
            CharactersToSubstats => "characters_to_substats",
            CharactersToUrls => "characters_to_urls",
            CharactersToImgs => "characters_to_imgs",
            RelicsToImgs => "relics_to_imgs",
            RelicsToDesc => "relics_to_desc",
            PieceToMainStat => "piece_to_main_stat",
            CharactersToSubstatDesc => "characters_to_substat_desc",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            CharactersToRelics => &["Character", "Relic Set"],
            CharactersToMainStats => &["Character", "Relic Piece", "Main Stat"],
            CharactersToSubstats => &["Character", "Substat"],
            CharactersToUrls => &["Character", "URL"],
            CharactersToImgs => &["Character", "IMG"],
            RelicsToImgs => &["Relic Set", "IMG"],
            RelicsToDesc => &["Relic Set", "DESCRIPTION"],
            PieceToMainStat => &["Relic Piece", "Main Stat"],
            CharactersToSubstatDesc => &["Character", "Substat INFO"],
        }
    }
}

pub fn table_path(kind: TableKind) -> PathBuf {
    table_path_in(Path::new(TABLES_DIR), kind)
}

pub fn table_path_in(dir: &Path, kind: TableKind) -> PathBuf {
    dir.join(format!("{}.csv", kind.file_stem()))
}

pub fn load_dataset(kind: TableKind) -> Result<DataSet, Box<dyn Error>> {
    load_dataset_in(Path::new(TABLES_DIR), kind)
}

/// Load one table, verifying the header row matches the kind's shape.
pub fn load_dataset_in(dir: &Path, kind: TableKind) -> Result<DataSet, Box<dyn Error>> {
    let path = table_path_in(dir, kind);
    let text = fs::read_to_string(&path)?;
    let mut rows = parse_rows(&text, STORE_SEP);

    if rows.is_empty() {
        return Err(format!("{}: empty table file", path.display()).into());
    }
    let header = rows.remove(0);
    let expected = kind.headers();
    let matches = header.len() == expected.len()
        && header.iter().zip(expected).all(|(a, b)| a.eq_ignore_ascii_case(b));
    if !matches {
        return Err(format!(
            "{}: unexpected header {:?} (want {:?})",
            path.display(), header, expected
        ).into());
    }

    Ok(DataSet { headers: Some(header), rows })
}

pub fn save_dataset(kind: TableKind, ds: &DataSet) -> io::Result<PathBuf> {
    save_dataset_in(Path::new(TABLES_DIR), kind, ds)
}

/// Write one table: header row first, then records. Overwrites in full.
pub fn save_dataset_in(dir: &Path, kind: TableKind, ds: &DataSet) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = table_path_in(dir, kind);

    let file = fs::File::create(&path)?;
    let mut out = BufWriter::new(file);

    match &ds.headers {
        Some(h) => write_row(&mut out, h, STORE_SEP)?,
        None => {
            let h: Vec<String> = kind.headers().iter().map(|s| s!(*s)).collect();
            write_row(&mut out, &h, STORE_SEP)?;
        }
    }
    for row in &ds.rows {
        write_row(&mut out, row, STORE_SEP)?;
    }

    out.flush()?;
    Ok(path)
}
