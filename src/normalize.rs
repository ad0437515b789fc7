// src/normalize.rs
//! Turns noisy scraped stat text into taxonomy members.
//!
//! Free-text main-stat labels go through closest-string matching against the
//! candidate pool; substat description paragraphs are rewritten through a
//! fixed synonym table and then substring-scanned. Text that resolves to
//! nothing is dropped, never raised; one bad label must not sink a batch.

use std::collections::BTreeMap;

use crate::config::consts::MAIN_STAT_CUTOFF;
use crate::core::sanitize::normalize_ws;
use crate::core::similar::{self, NormalizedEdit, Similarity};
use crate::stats::{self, MainStat, Piece, Stat};

/// Abbreviations and bare stat names the site uses in substat paragraphs,
/// rewritten (uppercased text, in this order) before substring matching.
/// Bare HP/DEF/ATK fold into their percent variants.
const SUBSTAT_SYNONYMS: &[(&str, &str)] = &[
    ("HP", "HP%"),
    ("DEF", "DEF%"),
    ("ATK", "ATK%"),
    ("SPEED", "SPD"),
    ("EFF RES", "EFFECT RES"),
    ("EHR", "EFFECT HIT RATE"),
    ("BREAK EFF", "BREAK EFFECT"),
];

/// Resolve a free-text main-stat label with the default strategy.
pub fn resolve_main_stat(raw: &str) -> Option<MainStat> {
    resolve_main_stat_with(raw, &NormalizedEdit, MAIN_STAT_CUTOFF)
}

/// Resolve with an explicit similarity strategy and cutoff.
///
/// The literal "anything" bypasses matching entirely. Everything else is
/// matched against the free-text candidate pool; a best score below the
/// cutoff means the label carries no usable stat and yields None.
pub fn resolve_main_stat_with(
    raw: &str,
    sim: &dyn Similarity,
    cutoff: f64,
) -> Option<MainStat> {
    let clean = normalize_ws(raw);
    if clean.is_empty() {
        return None;
    }
    if clean.eq_ignore_ascii_case(stats::ANYTHING) {
        return Some(MainStat::Anything);
    }

    let candidates = stats::main_stat_candidates();
    let names: Vec<&'static str> = candidates.iter().map(|s| s.name()).collect();
    similar::closest(sim, &clean, &names, cutoff)
        .and_then(Stat::from_name)
        .map(MainStat::Stat)
}

/// Substats whose canonical name appears in the rewritten description text.
/// Candidates are the non-flat pool; output is sorted by name, set semantics.
pub fn resolve_substats(description: &str, candidates: &[Stat]) -> Vec<Stat> {
    let mut text = description.to_ascii_uppercase();
    for (from, to) in SUBSTAT_SYNONYMS {
        text = text.replace(from, to);
    }

    let mut out: Vec<Stat> = candidates
        .iter()
        .copied()
        .filter(|s| text.contains(&s.name().to_ascii_uppercase()))
        .collect();
    out.sort_by_key(|s| s.name());
    out.dedup();
    out
}

/// Set-union merge of partial piece → main-stat records.
///
/// Multiple "main stats" blocks on one page each contribute a partial map;
/// the union per piece is sorted by canonical name and de-duplicated, so
/// merging in any order produces the same result.
pub fn merge_main_stats(
    parts: &[BTreeMap<Piece, Vec<MainStat>>],
) -> BTreeMap<Piece, Vec<MainStat>> {
    let mut merged: BTreeMap<Piece, Vec<MainStat>> = BTreeMap::new();
    for part in parts {
        for (piece, stats) in part {
            merged.entry(*piece).or_default().extend(stats.iter().copied());
        }
    }
    for list in merged.values_mut() {
        list.sort_by_key(|m| m.name());
        list.dedup();
    }
    merged
}
