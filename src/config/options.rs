// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::{DEFAULT_OUT_DIR, DEFAULT_RESULTS_STEM};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// Which character pages a scrape run visits.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CharacterSelector {
    #[default]
    All,
    One(String),
    Slugs(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub characters: CharacterSelector,
    /// Also refresh the relic-set guide page (images + descriptions).
    pub relic_sets: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            characters: CharacterSelector::All,
            relic_sets: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

/// Where and how filter results get written (CLI `-o`, GUI export button).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    dir: PathBuf,
    file_stem: OsString, // without extension
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_RESULTS_STEM),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let stem = self.file_stem.to_string_lossy();
        self.dir.join(join!(stem, ".", self.format.ext()))
    }

    /// Parse user text into dir + stem. A pasted extension is ignored;
    /// the format setting controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                self.dir = parent.to_path_buf();
            }
        }
        if let Some(stem) = p.file_stem() {
            self.file_stem = stem.to_os_string();
        }
    }
}
