// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). std-only.
/// Quoted cells may carry embedded separators and newlines; relic set
/// descriptions are stored as one multi-line cell.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !row.is_empty() && !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Convenience: stringify rows as-is ---------------- */

pub fn rows_to_string(rows: &[Vec<String>], headers: &Option<Vec<String>>, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_cell_keeps_embedded_newline() {
        let text = "Relic Set,DESCRIPTION\nBand of Sizzling Thunder,\"2pc: x\n4pc: y\"\n";
        let rows = parse_rows(text, ',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "2pc: x\n4pc: y");
    }

    #[test]
    fn write_quotes_only_when_needed() {
        let row = vec![s!("A, B"), s!("plain")];
        let mut buf = Vec::new();
        write_row(&mut buf, &row, ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"A, B\",plain\n");
    }

    #[test]
    fn round_trips_through_string() {
        let headers = Some(vec![s!("Character"), s!("Substat")]);
        let rows = vec![vec![s!("Seele"), s!("CRIT Rate")]];
        let text = rows_to_string(&rows, &headers, ',');
        let back = parse_rows(&text, ',');
        assert_eq!(back[0], vec![s!("Character"), s!("Substat")]);
        assert_eq!(back[1], rows[0]);
    }
}
