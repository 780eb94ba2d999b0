// src/core/html.rs
// Tree queries over `scraper`'s DOM, restricted to what the extractor needs:
// find-all, first descendant, text, attribute, and the bounded sibling
// scan, which also stands in for find-next-sibling. Text/comment nodes are never returned.

use scraper::ElementRef;

use crate::config::Marker;
use super::sanitize::normalize_ws;

/// All elements under `root` (root included) matching `marker`, document order.
pub fn find_all<'a>(root: ElementRef<'a>, marker: &Marker) -> Vec<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| marker.matches(el))
        .collect()
}

/// First strict descendant of `el` matching `marker`.
pub fn find_first_descendant<'a>(el: ElementRef<'a>, marker: &Marker) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|d| marker.matches(d))
}

/// Following sibling *elements* of `el`, in order.
pub fn next_sibling_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// `el` itself or any descendant matches `marker`.
pub fn contains(el: ElementRef<'_>, marker: &Marker) -> bool {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .any(|d| marker.matches(&d))
}

/// Walk following siblings of `start`, collecting those where `is_match`
/// holds, until `is_stop` holds (that sibling is not collected) or the
/// sibling list ends.
pub fn scan_siblings_until<'a, M, S>(start: ElementRef<'a>, mut is_match: M, mut is_stop: S) -> Vec<ElementRef<'a>>
where
    M: FnMut(&ElementRef<'a>) -> bool,
    S: FnMut(&ElementRef<'a>) -> bool,
{
    let mut out = Vec::new();
    for sib in next_sibling_elements(start) {
        if is_stop(&sib) {
            break;
        }
        if is_match(&sib) {
            out.push(sib);
        }
    }
    out
}

/// Text content. Text nodes are concatenated as-is; with `normalize`,
/// whitespace is collapsed and trimmed. Child elements without text
/// (icons, images) contribute nothing.
pub fn text(el: ElementRef<'_>, normalize: bool) -> String {
    let raw: String = el.text().collect();
    if normalize { normalize_ws(&raw) } else { raw }
}

/// Text with a space between every text node, then normalized, so
/// `<strong>Damage</strong>increased` reads "Damage increased".
pub fn spaced_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

pub fn is_heading(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
