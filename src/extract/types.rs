// src/extract/types.rs
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// One bullet under an ability: the bold label and what follows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub label: String,
    pub description: String,
}

/// An ability heading and the items of its list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBlock {
    pub ability: String,
    pub changes: Vec<ChangeItem>,
}

/// The emitted record: one per (champion, ability) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionAbilityChange {
    pub champion: String,
    pub champion_link: Option<String>,
    pub ability: String,
    pub changes: Vec<ChangeItem>,
}

impl ChampionAbilityChange {
    pub fn new(champion: &str, champion_link: Option<String>, block: AbilityBlock) -> Self {
        Self {
            champion: s!(champion),
            champion_link,
            ability: block.ability,
            changes: block.changes,
        }
    }
}

/// Counters for everything skipped on the way. None of these are failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStats {
    pub champions_found: usize,
    pub champions_skipped: usize,
    pub abilities_found: usize,
    pub abilities_without_list: usize,
    pub ability_errors: usize,
    pub headings_ignored: usize,
    pub items_skipped: usize,
}

impl ExtractStats {
    /// Anything at all was left out.
    pub fn has_omissions(&self) -> bool {
        self.champions_skipped
            + self.abilities_without_list
            + self.ability_errors
            + self.items_skipped
            > 0
    }
}

impl AddAssign for ExtractStats {
    fn add_assign(&mut self, o: Self) {
        self.champions_found += o.champions_found;
        self.champions_skipped += o.champions_skipped;
        self.abilities_found += o.abilities_found;
        self.abilities_without_list += o.abilities_without_list;
        self.ability_errors += o.ability_errors;
        self.headings_ignored += o.headings_ignored;
        self.items_skipped += o.items_skipped;
    }
}

/// Records plus what was skipped producing them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ChampionAbilityChange>,
    pub stats: ExtractStats,
}
