// src/core/html.rs
use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Attribute value from a tag opener; tolerates double/single/no quotes.
/// The attribute name must be preceded by whitespace (so `src` won't hit `data-src`).
pub fn tag_attr(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let needle = join!(to_lower(name), "=");
    let mut search = 0usize;
    loop {
        let hp = lc.get(search..)?.find(&needle)? + search;
        if hp == 0 || !lc.as_bytes()[hp - 1].is_ascii_whitespace() {
            search = hp + needle.len();
            continue;
        }
        let val = &opener[hp + needle.len()..];
        let (quote, start_off) = match val.as_bytes().first() {
            Some(b'"') => ('"', 1),
            Some(b'\'') => ('\'', 1),
            _ => ('\0', 0),
        };
        let end = if quote != '\0' {
            val[start_off..].find(quote).map(|e| start_off + e)
        } else {
            val.find(|c: char| c.is_ascii_whitespace() || c == '>')
        }
        .unwrap_or(val.len());
        return Some(val[start_off..end].to_string());
    }
}

/// True when the opener's class attribute contains `token` as a whole class name.
pub fn has_class(opener: &str, token: &str) -> bool {
    match tag_attr(opener, "class") {
        Some(v) => v.split_whitespace().any(|c| c.eq_ignore_ascii_case(token)),
        None => false,
    }
}

/// Next `<div class="…token…">…</div>` block, nesting-aware.
/// Returns (start of opener, end just past the matching close).
pub fn next_div_block_ci(s: &str, class_token: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let mut pos = from;
    loop {
        let start = lc.get(pos..)?.find("<div")? + pos;
        // Require a delimiter after the tag name
        match lc.as_bytes().get(start + 4) {
            Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                pos = start + 4;
                continue;
            }
        }
        let open_end = match s[start..].find('>') {
            Some(e) => start + e,
            None => return None,
        };
        if !has_class(&s[start..=open_end], class_token) {
            pos = open_end + 1;
            continue;
        }

        // Depth scan to the matching close
        let mut depth = 1usize;
        let mut scan = open_end + 1;
        while depth > 0 {
            let next_open = lc[scan..].find("<div");
            let next_close = lc[scan..].find("</div");
            match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    scan += o + 4;
                }
                (_, Some(c)) => {
                    depth -= 1;
                    scan += c + 5;
                }
                // Unbalanced markup; treat as not found
                _ => return None,
            }
        }
        let end = lc[scan..].find('>')? + scan + 1;
        return Some((start, end));
    }
}

/// Next `<div>…</div>` block regardless of class, nesting-aware.
pub fn next_any_div_block_ci(s: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let start = lc.get(from..)?.find("<div")? + from;
    match lc.as_bytes().get(start + 4) {
        Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
        _ => return next_any_div_block_ci(s, start + 4),
    }
    let open_end = start + s[start..].find('>')?;

    let mut depth = 1usize;
    let mut scan = open_end + 1;
    while depth > 0 {
        let next_open = lc[scan..].find("<div");
        let next_close = lc[scan..].find("</div");
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                scan += o + 4;
            }
            (_, Some(c)) => {
                depth -= 1;
                scan += c + 5;
            }
            _ => return None,
        }
    }
    let end = lc[scan..].find('>')? + scan + 1;
    Some((start, end))
}

/// Next void-tag opener like `<img …>`; returns (start, end past '>').
pub fn next_opener_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(tag);
    let mut pos = from;
    loop {
        let start = lc.get(pos..)?.find(&ol)? + pos;
        match lc.as_bytes().get(start + ol.len()) {
            Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                pos = start + ol.len();
                continue;
            }
        }
        let end = lc[start..].find('>')? + start + 1;
        return Some((start, end));
    }
}

/// Text nodes between tags, each entity- and whitespace-normalized; empties dropped.
/// Mirrors walking the DOM and collecting every string child.
pub fn text_nodes(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => {
                in_tag = true;
                let clean = normalize_ws(&normalize_entities(&buf));
                if !clean.is_empty() {
                    out.push(clean);
                }
                buf.clear();
            }
            '>' => in_tag = false,
            _ if !in_tag => buf.push(ch),
            _ => {}
        }
    }
    let clean = normalize_ws(&normalize_entities(&buf));
    if !clean.is_empty() {
        out.push(clean);
    }
    out
}

/// Remove every `<tag …>…</tag>` span (scripts, styles) before text inspection.
pub fn strip_blocks_ci(s: &str, tag: &str) -> String {
    let open = join!("<", tag);
    let close = join!("</", tag, ">");
    let lc = to_lower(s);
    let open_lc = to_lower(&open);
    let close_lc = to_lower(&close);

    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some(o) = lc[pos..].find(&open_lc) {
        let o_abs = pos + o;
        out.push_str(&s[pos..o_abs]);
        match lc[o_abs..].find(&close_lc) {
            Some(c) => pos = o_abs + c + close_lc.len(),
            None => {
                // unterminated; drop the rest
                return out;
            }
        }
    }
    out.push_str(&s[pos..]);
    out
}
