// src/csv.rs
use std::io::{self, Write};

use crate::config::consts::CSV_HEADERS;
use crate::extract::ChampionAbilityChange;

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

/* ---------------- Records → rows ---------------- */

/// One row per change item: Champion, Link, Ability, Label, Description.
/// A record without items still gets one row (blank label/description)
/// so the ability shows up.
pub fn records_to_rows(records: &[ChampionAbilityChange]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for r in records {
        let link = r.champion_link.as_deref().unwrap_or("");
        if r.changes.is_empty() {
            rows.push(row![r.champion, link, r.ability, "", ""]);
        }
        for c in &r.changes {
            rows.push(row![r.champion, link, r.ability, c.label, c.description]);
        }
    }
    rows
}

/// Full export string for the table formats.
pub fn to_export_string(records: &[ChampionAbilityChange], include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, &CSV_HEADERS.map(String::from), sep);
    }
    for r in records_to_rows(records) {
        let _ = write_row(&mut buf, &r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
