// src/specs/character.rs
//! Scraping *spec* for a single character build page.
//!
//! Ground truth locations:
//! - display name: first `<strong>` inside `div.character-top`;
//! - relic sets: `img` `alt` texts inside every `div.build-relics` widget;
//! - main stats: each `div.box` inside each `div.main-stats` widget; the
//!   first text node is the piece label, the rest are stat labels;
//! - substat priorities: inside the third `div.tab-inside` block, the
//!   `div.sub-stats` paragraphs starting with "Substats:".
//!
//! Raw label text is handed to `normalize`; unresolvable labels drop out
//! here rather than polluting the tables. Pages still waiting for build
//! data short-circuit to [`CharacterPage::NotAvailable`].

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use crate::config::consts::CHARACTER_PAGE_PREFIX;
use crate::core::html::{
    next_div_block_ci, next_opener_ci, next_tag_block_ci,
    strip_blocks_ci, strip_tags, tag_attr, text_nodes, to_lower,
};
use crate::core::net;
use crate::core::sanitize::strip_prefix_ci;
use crate::normalize::{merge_main_stats, resolve_main_stat, resolve_substats};
use crate::stats::{MainStat, Piece, Stat, SUBSTATS};

/// Shown on pages for characters whose guide hasn't been written yet.
const NOT_AVAILABLE_NOTICE: &str =
    "build information aren't available yet. They will be added when the character is released.";

const SUBSTATS_LABEL: &str = "substats:";

pub enum CharacterPage {
    Ready(CharacterBundle),
    NotAvailable,
}

/// One character's extracted build data. Missing page sections leave the
/// matching field empty; they never abort the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterBundle {
    pub name: String,
    pub relic_sets: BTreeSet<String>,
    pub main_stats: BTreeMap<Piece, Vec<MainStat>>,
    pub substat_desc: String,
    pub substats: Vec<Stat>,
}

pub fn fetch_and_extract(slug: &str) -> Result<CharacterPage, Box<dyn Error>> {
    let path = join!(CHARACTER_PAGE_PREFIX, slug);
    let html_doc = net::http_get(&path)?;
    parse_doc(&html_doc)
}

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str) -> Result<CharacterPage, Box<dyn Error>> {
    // Scripts and styles carry text nodes of their own; drop them first.
    let doc = strip_blocks_ci(&strip_blocks_ci(html_doc, "script"), "style");

    if strip_tags(&doc).contains(NOT_AVAILABLE_NOTICE) {
        return Ok(CharacterPage::NotAvailable);
    }

    let name = extract_name(&doc).ok_or("character name not found")?;

    let bundle = CharacterBundle {
        name,
        relic_sets: extract_relic_sets(&doc),
        main_stats: extract_main_stats(&doc),
        substat_desc: extract_substat_desc(&doc),
        ..CharacterBundle::default()
    };

    // Substat resolution runs over the raw description; the description
    // itself is kept verbatim for display.
    let substats = resolve_substats(&bundle.substat_desc, &SUBSTATS);
    Ok(CharacterPage::Ready(CharacterBundle { substats, ..bundle }))
}

/* ---------- helpers ---------- */

fn extract_name(doc: &str) -> Option<String> {
    let (top_s, top_e) = next_div_block_ci(doc, "character-top", 0)?;
    let top = &doc[top_s..top_e];
    let (st_s, st_e) = next_tag_block_ci(top, "<strong", "</strong>", 0)?;
    let name = strip_tags(&top[st_s..st_e]);
    if name.is_empty() { None } else { Some(name) }
}

/// Every `img` `alt` inside every build-relics widget; blanks discarded.
fn extract_relic_sets(doc: &str) -> BTreeSet<String> {
    let mut sets = BTreeSet::new();
    let mut pos = 0usize;
    while let Some((d_s, d_e)) = next_div_block_ci(doc, "build-relics", pos) {
        let block = &doc[d_s..d_e];
        pos = d_e;

        let mut img_pos = 0usize;
        while let Some((i_s, i_e)) = next_opener_ci(block, "<img", img_pos) {
            if let Some(alt) = tag_attr(&block[i_s..i_e], "alt") {
                if !alt.is_empty() {
                    sets.insert(alt);
                }
            }
            img_pos = i_e;
        }
    }
    sets
}

/// Each main-stats widget contributes one partial piece → stats map; the
/// union across widgets is the character's record.
fn extract_main_stats(doc: &str) -> BTreeMap<Piece, Vec<MainStat>> {
    let mut partials: Vec<BTreeMap<Piece, Vec<MainStat>>> = Vec::new();

    let mut pos = 0usize;
    while let Some((w_s, w_e)) = next_div_block_ci(doc, "main-stats", pos) {
        let widget = &doc[w_s..w_e];
        pos = w_e;

        let mut part: BTreeMap<Piece, Vec<MainStat>> = BTreeMap::new();
        let mut box_pos = 0usize;
        while let Some((b_s, b_e)) = next_div_block_ci(widget, "box", box_pos) {
            let lines = text_nodes(&widget[b_s..b_e]);
            box_pos = b_e;

            let Some((label, stat_lines)) = lines.split_first() else { continue };
            let Some(piece) = Piece::from_name(label) else {
                logd!("Character: unrecognized piece label {:?}", label);
                continue;
            };
            let resolved = stat_lines.iter().filter_map(|l| resolve_main_stat(l));
            part.entry(piece).or_default().extend(resolved);
        }
        if !part.is_empty() {
            partials.push(part);
        }
    }

    merge_main_stats(&partials)
}

/// Substat paragraphs live in the third tab of the build section.
fn extract_substat_desc(doc: &str) -> String {
    let mut tabs: Vec<(usize, usize)> = Vec::new();
    let mut pos = 0usize;
    while let Some((t_s, t_e)) = next_div_block_ci(doc, "tab-inside", pos) {
        tabs.push((t_s, t_e));
        pos = t_e;
    }
    let Some(&(t_s, t_e)) = tabs.get(2) else { return s!() };
    let tab = &doc[t_s..t_e];

    let mut lines: Vec<String> = Vec::new();
    let mut bs_pos = 0usize;
    while let Some((b_s, b_e)) = next_div_block_ci(tab, "build-stats", bs_pos) {
        let build_stats = &tab[b_s..b_e];
        bs_pos = b_e;

        let mut ss_pos = 0usize;
        while let Some((s_s, s_e)) = next_div_block_ci(build_stats, "sub-stats", ss_pos) {
            let text = strip_tags(&build_stats[s_s..s_e]);
            ss_pos = s_e;

            if to_lower(&text).starts_with(SUBSTATS_LABEL) {
                lines.push(s!(strip_prefix_ci(&text, SUBSTATS_LABEL)));
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Piece::*;
    use crate::stats::Stat::*;

    fn sample_page() -> &'static str {
        r#"
        <html><body>
          <div class="character-top"><p><strong>Seele</strong></p></div>

          <div class="build-relics">
            <div class="relics"><img src="/g.png" alt="Genius of Brilliant Stars"></div>
            <div class="relics"><img src="/m.png" alt="Musketeer of Wild Wheat"><img src="/x.png" alt=""></div>
          </div>

          <div class="main-stats">
            <div class="box"><span>Body</span><span>CRIT Rate</span><span>CRIT DMG</span></div>
            <div class="box"><span>Feet</span><span>SPD</span></div>
          </div>
          <div class="main-stats">
            <div class="box"><span>Body</span><span>CRIT Rate</span></div>
            <div class="box"><span>Link Rope</span><span>Anything</span></div>
          </div>

          <div class="tab-inside">first tab</div>
          <div class="tab-inside">second tab</div>
          <div class="tab-inside">
            <div class="build-stats">
              <div class="sub-stats">Substats: Speed, Crit Rate, Crit Dmg</div>
              <div class="sub-stats">Something else entirely</div>
            </div>
          </div>
        </body></html>
        "#
    }

    #[test]
    fn parses_a_full_build_page() {
        let CharacterPage::Ready(b) = parse_doc(sample_page()).unwrap() else {
            panic!("expected a ready page");
        };
        assert_eq!(b.name, "Seele");
        assert_eq!(
            b.relic_sets,
            BTreeSet::from([s!("Genius of Brilliant Stars"), s!("Musketeer of Wild Wheat")])
        );
        assert_eq!(
            b.main_stats[&Body],
            vec![MainStat::Stat(CritDmg), MainStat::Stat(CritRate)]
        );
        assert_eq!(b.main_stats[&Feet], vec![MainStat::Stat(Spd)]);
        assert_eq!(b.main_stats[&LinkRope], vec![MainStat::Anything]);
        assert_eq!(b.substat_desc, "Speed, Crit Rate, Crit Dmg");
        assert_eq!(b.substats, vec![CritDmg, CritRate, Spd]);
    }

    #[test]
    fn unreleased_page_short_circuits() {
        let doc = r#"
          <div class="character-top"><strong>Future Unit</strong></div>
          <p>Sadly, the build information aren't available yet. They will be
          added when the character is released.</p>
        "#;
        assert!(matches!(parse_doc(doc).unwrap(), CharacterPage::NotAvailable));
    }

    #[test]
    fn missing_sections_yield_empty_fields() {
        let doc = r#"<div class="character-top"><strong>Bare Bones</strong></div>"#;
        let CharacterPage::Ready(b) = parse_doc(doc).unwrap() else {
            panic!("expected a ready page");
        };
        assert_eq!(b.name, "Bare Bones");
        assert!(b.relic_sets.is_empty());
        assert!(b.main_stats.is_empty());
        assert!(b.substat_desc.is_empty());
        assert!(b.substats.is_empty());
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(parse_doc("<div class='build-relics'></div>").is_err());
    }

    #[test]
    fn garbage_stat_labels_drop_out() {
        let doc = r#"
          <div class="character-top"><strong>Test</strong></div>
          <div class="main-stats">
            <div class="box"><span>Body</span><span>xyz_not_a_stat</span><span>ATK%</span></div>
          </div>
        "#;
        let CharacterPage::Ready(b) = parse_doc(doc).unwrap() else {
            panic!("expected a ready page");
        };
        assert_eq!(b.main_stats[&Body], vec![MainStat::Stat(AtkPct)]);
    }
}
