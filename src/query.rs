// src/query.rs
//! Filter resolution over a loaded snapshot.
//!
//! A query is a conjunction of independent set-membership predicates over
//! the character domain, evaluated as a pure function (no I/O, no state).

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

use crate::config::consts::SUBSTAT_SOFT_CAP;
use crate::data::Tables;
use crate::stats::{MainStat, Piece, Stat};

#[derive(Clone, Debug)]
pub struct Query {
    /// Exact set name to require; None skips the predicate entirely.
    pub relic_set: Option<String>,
    /// None = any piece (match against the union of all piece records).
    pub piece: Option<Piece>,
    pub main_stat: MainStat,
    pub substats: BTreeSet<Stat>,
    /// Off = the substat set is ignored completely.
    pub filter_by_substats: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            relic_set: None,
            piece: None,
            main_stat: MainStat::Anything,
            substats: BTreeSet::new(),
            filter_by_substats: false,
        }
    }
}

/// Invalid query, as opposed to a valid query with no matches.
#[derive(Debug, PartialEq, Eq)]
pub enum QueryError {
    UnknownRelicSet(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownRelicSet(name) => write!(f, "Unknown relic set: {}", name),
        }
    }
}

impl Error for QueryError {}

/// Characters satisfying every active predicate. Empty is a valid outcome.
///
/// Predicate order: (1) piece + main stat, (2) relic set, (3) substats.
/// The conjunction commutes; the order is just cheapest-first.
pub fn resolve(tables: &Tables, q: &Query) -> Result<BTreeSet<String>, QueryError> {
    // (1) main stat within the piece scope
    let mut matched: BTreeSet<String> = tables
        .characters_to_main_stats
        .iter()
        .filter(|(_, by_piece)| main_stat_matches(by_piece, q.piece, q.main_stat))
        .map(|(name, _)| name.clone())
        .collect();

    // (2) relic set, unless bypassed
    if let Some(set) = &q.relic_set {
        if !tables.knows_relic_set(set) {
            return Err(QueryError::UnknownRelicSet(set.clone()));
        }
        matched.retain(|c| {
            tables
                .characters_to_relics
                .get(c)
                .is_some_and(|sets| sets.contains(set))
        });
    }

    // (3) substat overlap: at least one preferred substat selected
    if q.filter_by_substats {
        matched.retain(|c| {
            tables
                .characters_to_substats
                .get(c)
                .is_some_and(|subs| subs.iter().any(|s| q.substats.contains(s)))
        });
    }

    Ok(matched)
}

/// Piece-scoped main-stat membership.
///
/// Head and Hands lock the main stat (HP / ATK), so any record for the piece
/// satisfies the predicate no matter what stat the query carries. A query of
/// "Anything" matches the site's stat-agnostic tag by plain membership.
fn main_stat_matches(
    by_piece: &BTreeMap<Piece, Vec<String>>,
    piece: Option<Piece>,
    want: MainStat,
) -> bool {
    match piece {
        Some(Piece::Head) => by_piece.contains_key(&Piece::Head),
        Some(Piece::Hands) => by_piece.contains_key(&Piece::Hands),
        Some(p) => by_piece
            .get(&p)
            .is_some_and(|stats| stats.iter().any(|s| s == want.name())),
        None => by_piece.values().flatten().any(|s| s == want.name()),
    }
}

/// Advisory warnings for the UI. Never rejects a query.
pub fn advisories(q: &Query) -> Vec<String> {
    let mut out = Vec::new();
    if q.substats.len() > SUBSTAT_SOFT_CAP {
        out.push(format!("Selected more than {} substats!", SUBSTAT_SOFT_CAP));
    }
    if let MainStat::Stat(ms) = q.main_stat {
        if q.substats.contains(&ms) {
            out.push(format!("{} is both the main stat and a selected substat.", ms.name()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat::*;
    use crate::store::{DataSet, TableKind};

    fn sample_tables() -> Tables {
        let mut t = Tables::default();
        t.absorb(
            TableKind::CharactersToMainStats,
            &DataSet::new(
                TableKind::CharactersToMainStats.headers(),
                vec![
                    vec![s!("Asta"), s!("Head"), s!("HP")],
                    vec![s!("Asta"), s!("Body"), s!("CRIT Rate")],
                    vec![s!("Asta"), s!("Feet"), s!("SPD")],
                    vec![s!("Bronya"), s!("Body"), s!("ATK%")],
                    vec![s!("Bronya"), s!("Link Rope"), s!("Anything")],
                ],
            ),
        );
        t.absorb(
            TableKind::CharactersToRelics,
            &DataSet::new(
                TableKind::CharactersToRelics.headers(),
                vec![
                    vec![s!("Asta"), s!("Musketeer of Wild Wheat")],
                    vec![s!("Bronya"), s!("Musketeer of Wild Wheat")],
                    vec![s!("Bronya"), s!("Messenger Traversing Hackerspace")],
                ],
            ),
        );
        t.absorb(
            TableKind::CharactersToSubstats,
            &DataSet::new(
                TableKind::CharactersToSubstats.headers(),
                vec![
                    vec![s!("Asta"), s!("SPD")],
                    vec![s!("Asta"), s!("CRIT DMG")],
                    vec![s!("Bronya"), s!("SPD")],
                ],
            ),
        );
        t
    }

    #[test]
    fn head_forces_hp_and_ignores_supplied_stat() {
        let t = sample_tables();
        let q = Query {
            piece: Some(Piece::Head),
            main_stat: MainStat::Stat(CritDmg), // ignored
            ..Query::default()
        };
        let got = resolve(&t, &q).unwrap();
        assert_eq!(got, BTreeSet::from([s!("Asta")]));
    }

    #[test]
    fn any_piece_matches_against_piece_union() {
        let t = sample_tables();
        let q = Query { main_stat: MainStat::Stat(Spd), ..Query::default() };
        assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s!("Asta")]));
    }

    #[test]
    fn anything_query_matches_stat_agnostic_tag() {
        let t = sample_tables();
        let q = Query { main_stat: MainStat::Anything, ..Query::default() };
        assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s!("Bronya")]));
    }

    #[test]
    fn substat_set_is_inert_when_toggle_off() {
        let t = sample_tables();
        let base = Query { main_stat: MainStat::Stat(CritRate), piece: Some(Piece::Body), ..Query::default() };
        let with_subs = Query { substats: BTreeSet::from([EffectRes]), ..base.clone() };
        assert_eq!(resolve(&t, &base).unwrap(), resolve(&t, &with_subs).unwrap());
    }

    #[test]
    fn unknown_relic_set_is_rejected() {
        let t = sample_tables();
        let q = Query { relic_set: Some(s!("No Such Set")), ..Query::default() };
        assert_eq!(
            resolve(&t, &q).unwrap_err(),
            QueryError::UnknownRelicSet(s!("No Such Set"))
        );
    }

    #[test]
    fn no_match_is_a_valid_empty_result() {
        let t = sample_tables();
        let q = Query {
            piece: Some(Piece::Body),
            main_stat: MainStat::Stat(OutgoingHealingBoost),
            ..Query::default()
        };
        assert!(resolve(&t, &q).unwrap().is_empty());
    }

    #[test]
    fn advisories_warn_without_rejecting() {
        let q = Query {
            main_stat: MainStat::Stat(Spd),
            substats: BTreeSet::from([Spd, CritRate, CritDmg, AtkPct, EffectRes]),
            filter_by_substats: true,
            ..Query::default()
        };
        let warnings = advisories(&q);
        assert_eq!(warnings.len(), 2);
    }
}
