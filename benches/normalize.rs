// benches/normalize.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use relic_scrape::normalize::{resolve_main_stat, resolve_substats};
use relic_scrape::stats::SUBSTATS;

const LABELS: &[&str] = &[
    "CRIT Rate",
    "crit dmg",
    "Energy Regeneration Rate",
    "Outgoing Healing Boost",
    "Imaginary DMG Boost",
    "Anything",
    "Speed",
    "xyz_not_a_stat",
];

const DESCRIPTION: &str =
    "Speed until 134, then Crit Rate and Crit Dmg. EHR to taste, Break Eff \
     for the superbreak variant, ATK otherwise.";

fn bench_main_stat(c: &mut Criterion) {
    c.bench_function("resolve_main_stat_mixed", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for label in LABELS {
                if resolve_main_stat(black_box(label)).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_substats(c: &mut Criterion) {
    c.bench_function("resolve_substats_paragraph", |b| {
        b.iter(|| {
            let subs = resolve_substats(black_box(DESCRIPTION), black_box(&SUBSTATS));
            black_box(subs.len())
        })
    });
}

criterion_group!(benches, bench_main_stat, bench_substats);
criterion_main!(benches);
