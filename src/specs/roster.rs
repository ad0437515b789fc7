// src/specs/roster.rs
//! Scraping *spec* for the character index.
//!
//! Parses the tier-list page and extracts `(slug, portrait)` pairs from
//! every anchor pointing at a character page. The slug feeds the per-page
//! fetch loop; the portrait is the third `<img>` inside the anchor (the
//! first two are card background and element icon).

use std::error::Error;

use crate::config::consts::{CHARACTER_INDEX_PATH, CHARACTER_PAGE_PREFIX};
use crate::core::html::{next_opener_ci, tag_attr, to_lower};
use crate::core::net;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub slug: String,
    pub img: String,
}

pub fn fetch() -> Result<Vec<RosterEntry>, Box<dyn Error>> {
    let html_doc = net::http_get(CHARACTER_INDEX_PATH)?;
    let entries = parse_doc(&html_doc);
    if entries.is_empty() {
        return Err("no character links found on index page".into());
    }
    Ok(entries)
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str) -> Vec<RosterEntry> {
    let lc = to_lower(doc);
    let mut out: Vec<RosterEntry> = Vec::new();

    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_opener_ci(doc, "<a", pos) {
        pos = a_e;

        let Some(href) = tag_attr(&doc[a_s..a_e], "href") else { continue };
        let Some(slug) = href.strip_prefix(CHARACTER_PAGE_PREFIX) else { continue };
        if slug.is_empty() || slug.contains('/') {
            continue;
        }

        let Some(close_rel) = lc[a_e..].find("</a>") else { continue };
        let inner = &doc[a_e..a_e + close_rel];
        pos = a_e + close_rel + "</a>".len();

        // Portrait: third <img> in the anchor; fall back to the last one.
        let mut srcs: Vec<String> = Vec::new();
        let mut img_pos = 0usize;
        while let Some((img_s, img_e)) = next_opener_ci(inner, "<img", img_pos) {
            if let Some(src) = tag_attr(&inner[img_s..img_e], "src") {
                srcs.push(src);
            }
            img_pos = img_e;
        }
        let img = srcs
            .get(2)
            .or_else(|| srcs.last())
            .cloned()
            .unwrap_or_default();

        out.push(RosterEntry { slug: slug.to_string(), img });
    }

    // tidy
    out.sort_by(|a, b| a.slug.cmp(&b.slug));
    out.dedup_by(|a, b| a.slug == b.slug);
    out
}
