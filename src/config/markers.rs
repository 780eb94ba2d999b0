// src/config/markers.rs
//! Marker taxonomy for the patch-notes layout.
//!
//! Every tag/class token the extractor relies on lives here, so a layout
//! change on the site is a one-table edit. Roles:
//!
//! - `ChampionSection`: anchors one champion's block (`div.patch-change-block`).
//! - `ChampionName`: heading holding the champion name (`h3.change-title`).
//! - `AbilityTitle`: ability heading; only headings carrying this token count
//!   (`h4.ability-title`, usually alongside `change-detail-title`).
//! - `ChangeList`: list of change items following an ability heading.
//! - `ChangeLabel`: bold token that starts a change item.

use scraper::ElementRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    ChampionSection,
    ChampionName,
    AbilityTitle,
    ChangeList,
    ChangeLabel,
}

/// One role's concrete tokens: any of `tags` (empty = any tag) and, if set,
/// the `class` token among the element's classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub tags: Vec<String>,
    pub class: Option<String>,
}

impl Marker {
    pub fn new(tags: &[&str], class: Option<&str>) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
            class: class.map(str::to_string),
        }
    }

    pub fn matches(&self, el: &ElementRef<'_>) -> bool {
        let v = el.value();
        let tag_ok = self.tags.is_empty()
            || self.tags.iter().any(|t| v.name().eq_ignore_ascii_case(t));
        if !tag_ok {
            return false;
        }
        match &self.class {
            Some(class) => v.classes().any(|c| c == class),
            None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerTable {
    pub champion_section: Marker,
    pub champion_name: Marker,
    pub ability_title: Marker,
    pub change_list: Marker,
    pub change_label: Marker,
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self {
            champion_section: Marker::new(&["div"], Some("patch-change-block")),
            champion_name: Marker::new(&["h3"], Some("change-title")),
            ability_title: Marker::new(&["h4"], Some("ability-title")),
            change_list: Marker::new(&["ul", "ol"], None),
            change_label: Marker::new(&["strong", "b"], None),
        }
    }
}

impl MarkerTable {
    pub fn get(&self, role: MarkerRole) -> &Marker {
        match role {
            MarkerRole::ChampionSection => &self.champion_section,
            MarkerRole::ChampionName => &self.champion_name,
            MarkerRole::AbilityTitle => &self.ability_title,
            MarkerRole::ChangeList => &self.change_list,
            MarkerRole::ChangeLabel => &self.change_label,
        }
    }

    pub fn set(&mut self, role: MarkerRole, marker: Marker) {
        match role {
            MarkerRole::ChampionSection => self.champion_section = marker,
            MarkerRole::ChampionName => self.champion_name = marker,
            MarkerRole::AbilityTitle => self.ability_title = marker,
            MarkerRole::ChangeList => self.change_list = marker,
            MarkerRole::ChangeLabel => self.change_label = marker,
        }
    }

    /// Convenience for `self.get(role).matches(el)`.
    pub fn is(&self, role: MarkerRole, el: &ElementRef<'_>) -> bool {
        self.get(role).matches(el)
    }
}
