// src/extract/ability.rs
//! One ability block: heading text plus the items of the list that follows it.
//!
//! Item shape on the live page:
//! `<li><strong>Damage</strong>: 40/65/90 ⇒ 50/75/100</li>`
//! The first bold token is the label. The description is whatever follows the
//! first colon, or the whole line when there is no colon.

use scraper::{ElementRef, Html};

use crate::config::{MarkerRole, MarkerTable};
use crate::core::html::{find_first_descendant, is_heading, scan_siblings_until, spaced_text, text};
use crate::core::sanitize::split_first_colon;
use crate::error::StructureError;

use super::is_boundary;
use super::types::{AbilityBlock, ChangeItem, ExtractStats};

/// Parse a (heading, list) pair.
///
/// Fails only when `heading` is not an ability heading or has no text.
/// Items without a label are left out.
pub fn parse_ability_block(
    heading: ElementRef<'_>,
    list: ElementRef<'_>,
    markers: &MarkerTable,
) -> Result<AbilityBlock, StructureError> {
    parse_counted(heading, Some(list), markers, &mut ExtractStats::default())
}

/// Parse an HTML fragment holding one ability heading and its list.
/// A fragment with a heading but no list yields a block with no changes.
pub fn parse_ability_fragment(fragment: &str, markers: &MarkerTable) -> Result<AbilityBlock, StructureError> {
    let doc = Html::parse_fragment(fragment);
    let heading = find_first_descendant(doc.root_element(), markers.get(MarkerRole::AbilityTitle))
        .ok_or(StructureError::MissingAbilityHeading)?;
    let list = find_change_list(heading, markers);
    parse_counted(heading, list, markers, &mut ExtractStats::default())
}

/// The change list belonging to `heading`: the first following sibling
/// matching the list marker, looking no further than the next heading,
/// ability title or champion boundary.
pub fn find_change_list<'a>(heading: ElementRef<'a>, markers: &MarkerTable) -> Option<ElementRef<'a>> {
    let list = markers.get(MarkerRole::ChangeList);
    scan_siblings_until(
        heading,
        |s| list.matches(s),
        |s| is_heading(s) || markers.is(MarkerRole::AbilityTitle, s) || is_boundary(markers, s, None),
    )
    .into_iter()
    .next()
}

pub(super) fn parse_counted(
    heading: ElementRef<'_>,
    list: Option<ElementRef<'_>>,
    markers: &MarkerTable,
    stats: &mut ExtractStats,
) -> Result<AbilityBlock, StructureError> {
    if !markers.is(MarkerRole::AbilityTitle, &heading) {
        return Err(StructureError::MissingAbilityHeading);
    }
    let ability = spaced_text(heading);
    if ability.is_empty() {
        return Err(StructureError::EmptyAbilityName);
    }

    let mut changes = Vec::new();
    if let Some(list) = list {
        let items = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| c.value().name() == "li");
        for (i, li) in items.enumerate() {
            match parse_item(li, markers) {
                Some(item) => changes.push(item),
                None => {
                    stats.items_skipped += 1;
                    logd!("{ability}: item #{i} has no label, skipped");
                }
            }
        }
    }

    Ok(AbilityBlock { ability, changes })
}

fn parse_item(li: ElementRef<'_>, markers: &MarkerTable) -> Option<ChangeItem> {
    let label_el = find_first_descendant(li, markers.get(MarkerRole::ChangeLabel))?;
    let label = text(label_el, true);
    if label.is_empty() {
        return None;
    }

    let full = spaced_text(li);
    let description = match split_first_colon(&full) {
        Some((_, rest)) => rest.trim().to_string(),
        None => full,
    };
    Some(ChangeItem { label, description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::find_all;

    fn item(label: &str, description: &str) -> ChangeItem {
        ChangeItem { label: s!(label), description: s!(description) }
    }

    #[test]
    fn fireball_fragment() {
        let frag = r#"<h4 class="change-detail-title ability-title">Q - Fireball</h4><ul><li><strong>Damage</strong>: 80 → 100</li><li><strong>Cooldown</strong> reduced</li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.ability, "Q - Fireball");
        assert_eq!(block.changes, vec![
            item("Damage", "80 → 100"),
            item("Cooldown", "Cooldown reduced"),
        ]);
    }

    #[test]
    fn only_first_colon_splits() {
        let frag = r#"<h4 class="ability-title">R</h4>
            <ul><li><strong>Ratio</strong>: 0.5 AP: now 0.6 AP</li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.changes, vec![item("Ratio", "0.5 AP: now 0.6 AP")]);
    }

    #[test]
    fn label_colon_inside_strong() {
        let frag = r#"<h4 class="ability-title">W</h4>
            <ul><li><b>Mana cost:</b> 60 ⇒ 50</li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.changes, vec![item("Mana cost:", "60 ⇒ 50")]);
    }

    #[test]
    fn unlabeled_items_dropped_without_touching_siblings() {
        let frag = r#"<h4 class="ability-title">E</h4>
            <ul>
              <li><strong>Range</strong>: 500 → 550</li>
              <li>Bug fix: no longer stutters</li>
              <li><strong>   </strong>: blank label</li>
              <li><strong>Speed</strong>: 1200</li>
            </ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.changes, vec![item("Range", "500 → 550"), item("Speed", "1200")]);
    }

    #[test]
    fn counted_skips() {
        let doc = Html::parse_fragment(r#"<h4 class="ability-title">E</h4><ul><li>x</li><li>y</li></ul>"#);
        let m = MarkerTable::default();
        let heading = find_all(doc.root_element(), m.get(MarkerRole::AbilityTitle))[0];
        let list = find_change_list(heading, &m);
        let mut stats = ExtractStats::default();
        let block = parse_counted(heading, list, &m, &mut stats).unwrap();
        assert!(block.changes.is_empty());
        assert_eq!(stats.items_skipped, 2);
    }

    #[test]
    fn icon_markup_stripped_from_name() {
        let frag = r#"<h4 class="change-detail-title ability-title">
              <img class="change-detail-title-icon" src="https://x.test/q.png"> Q - Orb of
              Deception</h4>
            <ul><li><strong>Damage</strong>: 40 ⇒ 50</li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.ability, "Q - Orb of Deception");
    }

    #[test]
    fn line_break_in_name_keeps_words_apart() {
        let frag = r#"<h4 class="ability-title">Q<br>Fireball</h4><ul><li><strong>Damage</strong>: 80</li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.ability, "Q Fireball");
    }

    #[test]
    fn nested_list_items_are_not_direct() {
        let frag = r#"<h4 class="ability-title">P</h4>
            <ul><li><strong>Passive</strong>: reworked
                <ul><li><strong>Stacks</strong>: 3</li></ul>
            </li></ul>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert_eq!(block.changes.len(), 1);
        assert_eq!(block.changes[0].label, "Passive");
        assert!(block.changes[0].description.starts_with("reworked"));
    }

    #[test]
    fn missing_heading_is_structure_error() {
        let frag = r#"<h4 class="change-detail-title">Base Stats</h4><ul><li><strong>HP</strong>: 600</li></ul>"#;
        assert_eq!(
            parse_ability_fragment(frag, &MarkerTable::default()),
            Err(StructureError::MissingAbilityHeading)
        );
    }

    #[test]
    fn wrong_heading_passed_directly() {
        let doc = Html::parse_fragment(r#"<h4 class="change-detail-title">Base</h4><ul><li><b>a</b></li></ul>"#);
        let m = MarkerTable::default();
        let h4 = find_all(doc.root_element(), &crate::config::Marker::new(&["h4"], None))[0];
        let ul = find_all(doc.root_element(), m.get(MarkerRole::ChangeList))[0];
        assert_eq!(parse_ability_block(h4, ul, &m), Err(StructureError::MissingAbilityHeading));
    }

    #[test]
    fn empty_heading_is_structure_error() {
        let frag = r#"<h4 class="ability-title"><img src="x.png"></h4><ul></ul>"#;
        assert_eq!(
            parse_ability_fragment(frag, &MarkerTable::default()),
            Err(StructureError::EmptyAbilityName)
        );
    }

    #[test]
    fn heading_without_list_has_no_changes() {
        let frag = r#"<h4 class="ability-title">Q</h4><p>Text only.</p>"#;
        let block = parse_ability_fragment(frag, &MarkerTable::default()).unwrap();
        assert!(block.changes.is_empty());
    }

    #[test]
    fn list_search_stops_at_next_heading() {
        let doc = Html::parse_fragment(
            r#"<h4 class="ability-title">Q</h4><h4 class="ability-title">W</h4><ul><li><b>x</b></li></ul>"#,
        );
        let m = MarkerTable::default();
        let hs = find_all(doc.root_element(), m.get(MarkerRole::AbilityTitle));
        assert!(find_change_list(hs[0], &m).is_none());
        assert!(find_change_list(hs[1], &m).is_some());
    }
}
