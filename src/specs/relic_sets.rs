// src/specs/relic_sets.rs
//! Scraping *spec* for the relic-set guide page.
//!
//! Each `div.hsr-relic-box` is one set: name from the first `<h4>`, image
//! from the third `<img>` inside `div.hsr-relic-image`, and one description
//! line per child `<div>` of `div.hsr-set-description`. Planar ornaments
//! carry one description line, cavern relics two.

use std::error::Error;

use crate::config::consts::RELIC_SETS_PATH;
use crate::core::html::{
    next_any_div_block_ci, next_div_block_ci, next_opener_ci, next_tag_block_ci,
    strip_tags, tag_attr,
};
use crate::core::net;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelicSetBundle {
    pub name: String,
    pub img: String,
    pub desc_lines: Vec<String>,
}

pub fn fetch() -> Result<Vec<RelicSetBundle>, Box<dyn Error>> {
    let html_doc = net::http_get(RELIC_SETS_PATH)?;
    let sets = parse_doc(&html_doc);
    if sets.is_empty() {
        return Err("no relic boxes found on guide page".into());
    }
    Ok(sets)
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str) -> Vec<RelicSetBundle> {
    let mut out = Vec::new();

    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_div_block_ci(doc, "hsr-relic-box", pos) {
        let block = &doc[b_s..b_e];
        pos = b_e;

        let Some(name) = extract_name(block) else {
            logd!("Relic sets: box without <h4> name, skipping");
            continue;
        };

        out.push(RelicSetBundle {
            name,
            img: extract_image(block),
            desc_lines: extract_desc_lines(block),
        });
    }

    out
}

/* ---------- helpers ---------- */

fn extract_name(block: &str) -> Option<String> {
    let (h_s, h_e) = next_tag_block_ci(block, "<h4", "</h4>", 0)?;
    let name = strip_tags(&block[h_s..h_e]);
    if name.is_empty() { None } else { Some(name) }
}

/// Third `<img>` of the image widget; fall back to the last one.
fn extract_image(block: &str) -> String {
    let Some((d_s, d_e)) = next_div_block_ci(block, "hsr-relic-image", 0) else {
        return s!();
    };
    let widget = &block[d_s..d_e];

    let mut srcs: Vec<String> = Vec::new();
    let mut pos = 0usize;
    while let Some((i_s, i_e)) = next_opener_ci(widget, "<img", pos) {
        if let Some(src) = tag_attr(&widget[i_s..i_e], "src") {
            srcs.push(src);
        }
        pos = i_e;
    }
    srcs.get(2).or_else(|| srcs.last()).cloned().unwrap_or_default()
}

/// One line per top-level child div of the description widget.
fn extract_desc_lines(block: &str) -> Vec<String> {
    let Some((d_s, d_e)) = next_div_block_ci(block, "hsr-set-description", 0) else {
        return Vec::new();
    };
    let widget = &block[d_s..d_e];
    let inner_start = match widget.find('>') {
        Some(e) => e + 1,
        None => return Vec::new(),
    };

    let mut lines = Vec::new();
    let mut pos = inner_start;
    while let Some((c_s, c_e)) = next_any_div_block_ci(widget, pos) {
        if c_e > widget.len() - "</div>".len() {
            break; // ran past the widget's own close
        }
        let text = strip_tags(&widget[c_s..c_e]);
        if !text.is_empty() {
            lines.push(text);
        }
        pos = c_e;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> &'static str {
        r#"
        <div class="hsr-relic-box">
          <h4>Musketeer of Wild Wheat</h4>
          <div class="hsr-relic-image">
            <img src="/ph1.png"><img src="/ph2.png"><img src="/musketeer.png">
          </div>
          <div class="hsr-set-description">
            <div>(2) ATK increases by 12%.</div>
            <div>(4) SPD increases by 6% and Basic ATK DMG increases by 10%.</div>
          </div>
        </div>
        <div class="hsr-relic-box">
          <h4>Space Sealing Station</h4>
          <div class="hsr-relic-image"><img src="/station.png"></div>
          <div class="hsr-set-description">
            <div>(2) Increases the wearer's ATK by 12%.</div>
          </div>
        </div>
        "#
    }

    #[test]
    fn parses_boxes_with_line_counts() {
        let sets = parse_doc(sample_page());
        assert_eq!(sets.len(), 2);

        // Cavern relic: two description lines
        assert_eq!(sets[0].name, "Musketeer of Wild Wheat");
        assert_eq!(sets[0].img, "/musketeer.png");
        assert_eq!(sets[0].desc_lines.len(), 2);
        assert!(sets[0].desc_lines[0].starts_with("(2)"));

        // Planar ornament: one line, image falls back to the only <img>
        assert_eq!(sets[1].name, "Space Sealing Station");
        assert_eq!(sets[1].img, "/station.png");
        assert_eq!(sets[1].desc_lines.len(), 1);
    }

    #[test]
    fn box_without_name_is_skipped() {
        let doc = r#"<div class="hsr-relic-box"><div class="hsr-set-description"><div>x</div></div></div>"#;
        assert!(parse_doc(doc).is_empty());
    }
}
