// src/render.rs
// Records → output text, per export format. No I/O here.

use std::fmt::Write as _;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv;
use crate::error::Result;
use crate::extract::ChampionAbilityChange;

pub fn render(records: &[ChampionAbilityChange], export: &ExportOptions) -> Result<String> {
    match export.format {
        ExportFormat::Text => Ok(to_text(records)),
        ExportFormat::Json => to_json(records),
        ExportFormat::Csv | ExportFormat::Tsv => {
            let sep = export.format.delimiter().unwrap_or(',');
            Ok(csv::to_export_string(records, export.include_headers, sep))
        }
    }
}

/// Human summary, one block per (champion, ability).
pub fn to_text(records: &[ChampionAbilityChange]) -> String {
    if records.is_empty() {
        return s!("No champion ability changes found.\n");
    }
    let mut out = s!("Champion ability changes:\n");
    for r in records {
        let _ = writeln!(out, "- {} [{}]", r.champion, r.ability);
        if r.changes.is_empty() {
            let _ = writeln!(out, "    (no itemized changes)");
        }
        for c in &r.changes {
            if c.description == c.label || c.description.starts_with(&c.label) {
                let _ = writeln!(out, "    {}", c.description);
            } else {
                let _ = writeln!(out, "    {}: {}", c.label, c.description);
            }
        }
    }
    out
}

pub fn to_json(records: &[ChampionAbilityChange]) -> Result<String> {
    let mut s = serde_json::to_string_pretty(records)?;
    s.push('\n');
    Ok(s)
}
