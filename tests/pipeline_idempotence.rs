// tests/pipeline_idempotence.rs
//
// The normalizer batch is a pure fold: identical raw input must produce
// byte-identical tables, regardless of record order, and the tables must
// survive a disk round trip into a queryable snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use relic_scrape::csv::rows_to_string;
use relic_scrape::data::Tables;
use relic_scrape::query::{resolve, Query};
use relic_scrape::scrape::{
    build_character_tables, build_relic_tables, piece_table, CharacterRecord,
};
use relic_scrape::specs::character::CharacterBundle;
use relic_scrape::specs::relic_sets::RelicSetBundle;
use relic_scrape::stats::{MainStat, Piece, Stat};
use relic_scrape::store;

fn s(v: &str) -> String { v.to_string() }

fn record(name: &str, slug: &str, body_stat: Stat, substats: &[Stat]) -> CharacterRecord {
    CharacterRecord {
        slug: s(slug),
        url: format!("/star-rail/characters/{slug}"),
        img: format!("/{slug}.png"),
        bundle: CharacterBundle {
            name: s(name),
            relic_sets: BTreeSet::from([s("Musketeer of Wild Wheat")]),
            main_stats: BTreeMap::from([
                (Piece::Head, vec![MainStat::Stat(Stat::Hp)]),
                (Piece::Body, vec![MainStat::Stat(body_stat)]),
            ]),
            substat_desc: s("Speed, Crit Rate"),
            substats: substats.to_vec(),
        },
    }
}

fn batch() -> Vec<CharacterRecord> {
    vec![
        record("Seele", "seele", Stat::CritRate, &[Stat::CritDmg, Stat::CritRate, Stat::Spd]),
        record("Asta", "asta", Stat::AtkPct, &[Stat::Spd]),
        record("Bronya", "bronya", Stat::CritDmg, &[Stat::CritDmg, Stat::Spd]),
    ]
}

fn serialize(tables: &[(store::TableKind, store::DataSet)]) -> String {
    let mut out = String::new();
    for (kind, ds) in tables {
        out.push_str(kind.file_stem());
        out.push('\n');
        out.push_str(&rows_to_string(&ds.rows, &ds.headers, ','));
    }
    out
}

#[test]
fn rebuilding_from_identical_input_is_byte_identical() {
    let first = serialize(&build_character_tables(&batch()));
    let second = serialize(&build_character_tables(&batch()));
    assert_eq!(first, second);
}

#[test]
fn record_order_does_not_change_the_tables() {
    let forward = serialize(&build_character_tables(&batch()));

    let mut reversed = batch();
    reversed.reverse();
    assert_eq!(forward, serialize(&build_character_tables(&reversed)));

    let mut rotated = batch();
    rotated.rotate_left(1);
    assert_eq!(forward, serialize(&build_character_tables(&rotated)));
}

#[test]
fn tables_round_trip_into_a_queryable_snapshot() {
    let dir: PathBuf = std::env::temp_dir()
        .join(format!("relic_scrape_pipeline_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let sets = vec![
        RelicSetBundle {
            name: s("Musketeer of Wild Wheat"),
            img: s("/musketeer.png"),
            desc_lines: vec![s("(2) ATK +12%."), s("(4) SPD +6%.")],
        },
        RelicSetBundle {
            name: s("Space Sealing Station"),
            img: s("/station.png"),
            desc_lines: vec![s("(2) ATK +12%; more at 120 SPD.")],
        },
    ];

    for (kind, ds) in build_character_tables(&batch())
        .into_iter()
        .chain(build_relic_tables(&sets))
        .chain(std::iter::once(piece_table()))
    {
        store::save_dataset_in(&dir, kind, &ds).unwrap();
    }

    let tables = Tables::load_from(&dir).unwrap();

    // Description line counts distinguish cavern relics from ornaments.
    assert_eq!(tables.relics_to_desc[&s("Musketeer of Wild Wheat")].len(), 2);
    assert_eq!(tables.relics_to_desc[&s("Space Sealing Station")].len(), 1);

    let q = Query {
        relic_set: Some(s("Musketeer of Wild Wheat")),
        piece: Some(Piece::Body),
        main_stat: MainStat::Stat(Stat::CritRate),
        substats: BTreeSet::from([Stat::CritDmg]),
        filter_by_substats: true,
    };
    assert_eq!(resolve(&tables, &q).unwrap(), BTreeSet::from([s("Seele")]));

    let _ = fs::remove_dir_all(&dir);
}
