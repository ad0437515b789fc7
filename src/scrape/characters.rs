// src/scrape/characters.rs
//
// Batch collection of character pages. The index is fetched once; pages are
// then pulled by a small worker pool with a politeness pause. One failed or
// unreleased page is logged and skipped; the batch always finishes.

use std::{
    error::Error,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use crate::config::consts::{CHARACTER_PAGE_PREFIX, JITTER_MS, REQUEST_PAUSE_MS, WORKERS};
use crate::config::options::{CharacterSelector, ScrapeOptions};
use crate::progress::Progress;
use crate::specs::character::{self, CharacterBundle, CharacterPage};
use crate::specs::relic_sets::{self, RelicSetBundle};
use crate::specs::roster::{self, RosterEntry};

/// One character's fully extracted build data plus index-page context.
#[derive(Clone, Debug)]
pub struct CharacterRecord {
    pub slug: String,
    pub url: String,
    pub img: String,
    pub bundle: CharacterBundle,
}

fn select_entries(all: Vec<RosterEntry>, sel: &CharacterSelector) -> Vec<RosterEntry> {
    match sel {
        CharacterSelector::All => all,
        CharacterSelector::One(slug) => {
            all.into_iter().filter(|e| e.slug == *slug).collect()
        }
        CharacterSelector::Slugs(slugs) => {
            all.into_iter().filter(|e| slugs.contains(&e.slug)).collect()
        }
    }
}

/// Collect character records according to the selection.
pub fn collect_characters(
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<CharacterRecord>, Box<dyn Error>> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching character index…");
    }
    let entries = select_entries(roster::fetch()?, &scrape.characters);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(entries.len());
    }

    // Concurrency
    type FetchOk = (RosterEntry, CharacterPage);
    type FetchErr = (String, String);

    let entries_arc = Arc::new(entries);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(entries_arc.len()).max(1);

    // Spawn workers

    for _ in 0..workers {
        let entries = Arc::clone(&entries_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= entries.len() {
                    break;
                }
                let entry = entries[i].clone();
                let result = match character::fetch_and_extract(&entry.slug) {
                    Ok(page) => Ok((entry, page)),
                    Err(e) => Err((entries[i].slug.clone(), e.to_string())),
                };
                let _ = tx.send(result);
                let jitter = (i as u64) % JITTER_MS;
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut records: Vec<CharacterRecord> = Vec::new();

    for _ in 0..entries_arc.len() {
        match res_rx.recv() {
            Ok(Ok((entry, CharacterPage::Ready(bundle)))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&entry.slug);
                }
                records.push(CharacterRecord {
                    url: join!(CHARACTER_PAGE_PREFIX, &entry.slug),
                    slug: entry.slug,
                    img: entry.img,
                    bundle,
                });
            }
            Ok(Ok((entry, CharacterPage::NotAvailable))) => {
                logd!("Character {}: build not available yet, skipping", entry.slug);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&entry.slug);
                }
            }
            Ok(Err((slug, msg))) => {
                loge!("Character {}: {}", slug, msg);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&slug);
                }
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Sort by display name so downstream tables come out stable
    records.sort_by(|a, b| a.bundle.name.cmp(&b.bundle.name));

    Ok(records)
}

/// Fetch the relic-set guide (images + descriptions). Single page.
pub fn collect_relic_sets(
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<RelicSetBundle>, Box<dyn Error>> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching relic set guide…");
    }
    let mut sets = relic_sets::fetch()?;
    sets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sets)
}
