// src/extract/champion.rs
// Outer loop: champion markers → name heading → ability headings → blocks.

use std::collections::HashSet;

use scraper::{ElementRef, Html};
use url::Url;

use crate::config::{MarkerRole, MarkerTable};
use crate::core::html::{
    attr, contains, find_all, find_first_descendant, is_heading, scan_siblings_until, spaced_text, text,
};
use crate::progress::Progress;

use super::ability::{find_change_list, parse_counted};
use super::types::{ChampionAbilityChange, ExtractStats, Extraction};
use super::{ExtractOptions, is_boundary};

/// Records only.
pub fn extract_records(doc: &Html, opts: &ExtractOptions) -> Vec<ChampionAbilityChange> {
    extract(doc, opts).records
}

pub fn extract(doc: &Html, opts: &ExtractOptions) -> Extraction {
    extract_with_progress(doc, opts, None)
}

/// Walk the whole document once. Output order is champion-marker order, then
/// ability order within each champion. Never fails; an empty result means
/// nothing matched the markers (see `stats.champions_found`).
pub fn extract_with_progress(
    doc: &Html,
    opts: &ExtractOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Extraction {
    let markers = &opts.markers;
    let mut stats = ExtractStats::default();
    let mut records = Vec::new();

    let sections = find_all(doc.root_element(), markers.get(MarkerRole::ChampionSection));
    stats.champions_found = sections.len();
    logd!("{} champion markers", sections.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(sections.len());
    }

    for (ix, section) in sections.into_iter().enumerate() {
        let Some(name_el) = locate_name(section, markers) else {
            stats.champions_skipped += 1;
            logd!("champion marker #{ix}: no name heading, skipped");
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(ix, "no champion name");
            }
            continue;
        };

        let champion = text(name_el, true);
        if champion.is_empty() {
            stats.champions_skipped += 1;
            logd!("champion marker #{ix}: empty name, skipped");
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(ix, "empty champion name");
            }
            continue;
        }
        let link = champion_link(name_el, opts.base_url.as_ref());

        for heading in ability_headings(section, name_el, markers, &mut stats) {
            stats.abilities_found += 1;

            let Some(list) = find_change_list(heading, markers) else {
                stats.abilities_without_list += 1;
                logd!("{champion}: ability heading {:?} has no change list, skipped", spaced_text(heading));
                continue;
            };

            match parse_counted(heading, Some(list), markers, &mut stats) {
                Ok(block) => records.push(ChampionAbilityChange::new(&champion, link.clone(), block)),
                Err(e) => {
                    stats.ability_errors += 1;
                    logw!("{champion}: {e}");
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(ix, &champion);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!(
        "extracted {} records from {} champions ({} skipped)",
        records.len(),
        stats.champions_found,
        stats.champions_skipped
    );

    Extraction { records, stats }
}

/// The marker itself, else its first matching descendant, else the next
/// matching sibling before the following champion region.
fn locate_name<'a>(section: ElementRef<'a>, markers: &MarkerTable) -> Option<ElementRef<'a>> {
    let name = markers.get(MarkerRole::ChampionName);
    if name.matches(&section) {
        return Some(section);
    }
    if let Some(inner) = find_first_descendant(section, name) {
        return Some(inner);
    }
    let section_marker = markers.get(MarkerRole::ChampionSection);
    scan_siblings_until(section, |s| name.matches(s), |s| contains(*s, section_marker))
        .into_iter()
        .next()
}

/// Ability headings in this champion's region.
///
/// When the name sits inside the marker, the siblings of the name and of each
/// of its ancestors up to the marker's child are scanned first, then the
/// marker's own siblings. Every scan stops at the next champion region.
/// Headings lacking the ability token are counted and ignored.
fn ability_headings<'a>(
    section: ElementRef<'a>,
    name_el: ElementRef<'a>,
    markers: &MarkerTable,
    stats: &mut ExtractStats,
) -> Vec<ElementRef<'a>> {
    let mut anchors = Vec::new();
    let nested = name_el.id() != section.id()
        && name_el.ancestors().any(|a| a.id() == section.id());
    if nested {
        anchors.push(name_el);
        anchors.extend(
            name_el
                .ancestors()
                .take_while(|a| a.id() != section.id())
                .filter_map(ElementRef::wrap),
        );
    }
    anchors.push(section);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for anchor in anchors {
        let headings = scan_siblings_until(
            anchor,
            |s| is_heading(s) || markers.is(MarkerRole::AbilityTitle, s),
            |s| is_boundary(markers, s, Some(name_el)),
        );
        for h in headings {
            if h.id() == name_el.id() || !seen.insert(h.id()) {
                continue;
            }
            if markers.is(MarkerRole::AbilityTitle, &h) {
                out.push(h);
            } else {
                stats.headings_ignored += 1;
            }
        }
    }
    out
}

fn champion_link(name_el: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
    let href = name_el
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "a")
        .find_map(|a| attr(a, "href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())?;

    match base.map(|b| b.join(href)) {
        Some(Ok(u)) => Some(u.to_string()),
        _ => Some(s!(href)),
    }
}
