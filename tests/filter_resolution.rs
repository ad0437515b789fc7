// tests/filter_resolution.rs
//
// End-to-end filter behavior over an in-memory snapshot.

use std::collections::BTreeSet;

use relic_scrape::data::Tables;
use relic_scrape::query::{advisories, resolve, Query, QueryError};
use relic_scrape::stats::{MainStat, Piece, Stat};
use relic_scrape::store::{DataSet, TableKind};

fn s(v: &str) -> String { v.to_string() }

/// Two characters sharing a set, split by Body main stat.
fn snapshot() -> Tables {
    let mut t = Tables::default();
    t.absorb(
        TableKind::CharactersToMainStats,
        &DataSet::new(
            TableKind::CharactersToMainStats.headers(),
            vec![
                vec![s("A"), s("Head"), s("HP")],
                vec![s("A"), s("Body"), s("CRIT Rate")],
                vec![s("B"), s("Body"), s("ATK%")],
            ],
        ),
    );
    t.absorb(
        TableKind::CharactersToRelics,
        &DataSet::new(
            TableKind::CharactersToRelics.headers(),
            vec![
                vec![s("A"), s("Musketeer of Wild Wheat")],
                vec![s("B"), s("Musketeer of Wild Wheat")],
            ],
        ),
    );
    t.absorb(
        TableKind::CharactersToSubstats,
        &DataSet::new(
            TableKind::CharactersToSubstats.headers(),
            vec![
                vec![s("A"), s("SPD")],
                vec![s("A"), s("CRIT DMG")],
                vec![s("B"), s("SPD")],
            ],
        ),
    );
    t
}

#[test]
fn full_query_narrows_to_the_main_stat_match() {
    let t = snapshot();
    let q = Query {
        relic_set: Some(s("Musketeer of Wild Wheat")),
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::CritRate),
        substats: BTreeSet::from([Stat::Spd]),
        filter_by_substats: true,
    };
    // B has the set and the substat but the wrong Body main stat.
    assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s("A")]));
}

#[test]
fn substat_filter_is_inclusive_or_not_subset() {
    let t = snapshot();
    let q = Query {
        relic_set: Some(s("Musketeer of Wild Wheat")),
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::CritRate),
        // A prefers SPD and CRIT DMG; selecting only CRIT DMG still matches.
        substats: BTreeSet::from([Stat::CritDmg]),
        filter_by_substats: true,
    };
    assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s("A")]));
}

#[test]
fn disabling_the_toggle_makes_the_substat_set_irrelevant() {
    let t = snapshot();
    let base = Query {
        relic_set: Some(s("Musketeer of Wild Wheat")),
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::AtkPct),
        substats: BTreeSet::new(),
        filter_by_substats: false,
    };
    let expected = resolve(&t, &base).unwrap();
    assert_eq!(expected, BTreeSet::from([s("B")]));

    // Vary the substat set arbitrarily; the result must not move.
    for subs in [
        BTreeSet::new(),
        BTreeSet::from([Stat::EffectRes]),
        BTreeSet::from([Stat::Spd, Stat::CritRate, Stat::CritDmg]),
    ] {
        let q = Query { substats: subs, ..base.clone() };
        assert_eq!(resolve(&t, &q).unwrap(), expected);
    }
}

#[test]
fn head_query_is_vacuous_on_main_stat() {
    let t = snapshot();
    for supplied in [
        MainStat::Anything,
        MainStat::Stat(Stat::CritDmg),
        MainStat::Stat(Stat::Hp),
    ] {
        let q = Query {
            piece: Some(Piece::Head),
            main_stat: supplied,
            ..Query::default()
        };
        // Only A has a Head record at all.
        assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s("A")]));
    }
}

#[test]
fn ignoring_sets_skips_the_set_predicate() {
    let t = snapshot();
    let q = Query {
        relic_set: None,
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::AtkPct),
        ..Query::default()
    };
    assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s("B")]));
}

#[test]
fn unknown_set_is_an_invalid_query_not_an_empty_result() {
    let t = snapshot();
    let q = Query {
        relic_set: Some(s("Band of Nonexistence")),
        ..Query::default()
    };
    assert_eq!(
        resolve(&t, &q).unwrap_err(),
        QueryError::UnknownRelicSet(s("Band of Nonexistence"))
    );
}

#[test]
fn advisory_warnings_never_block_resolution() {
    let t = snapshot();
    let q = Query {
        relic_set: Some(s("Musketeer of Wild Wheat")),
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::CritRate),
        substats: BTreeSet::from([
            Stat::CritRate, Stat::CritDmg, Stat::Spd, Stat::AtkPct, Stat::EffectHitRate,
        ]),
        filter_by_substats: true,
    };
    assert!(!advisories(&q).is_empty());
    // Still resolves: A prefers SPD and CRIT DMG, both selected.
    assert_eq!(resolve(&t, &q).unwrap(), BTreeSet::from([s("A")]));
}
