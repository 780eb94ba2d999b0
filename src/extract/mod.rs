//! # Extraction
//!
//! Turns a parsed patch-notes page into `ChampionAbilityChange` records.
//!
//! The page has no container per ability: a champion name heading is followed
//! by sibling `h4.ability-title` headings, each followed by a sibling `<ul>`.
//! Grouping is recovered from document order alone:
//!
//! ```text
//! div.patch-change-block            ← champion section marker
//!   div
//!     h3.change-title > a           ← champion name (+ link)
//!     h4.ability-title              ← ability heading
//!     ul > li > strong              ← change items
//!     h4.change-detail-title        ← not an ability (Base Stats …): ignored
//!     …
//! div.patch-change-block            ← next champion: scans stop here
//! ```
//!
//! Anything missing is skipped at the smallest unit (champion, ability,
//! item, field) and counted in `ExtractStats`. The only hard error is an
//! ability fragment without an ability heading, and it only fails that one
//! block.
//!
//! All tag/class tokens come from `config::markers`.

use scraper::ElementRef;
use url::Url;

use crate::config::{MarkerRole, MarkerTable};

pub mod ability;
pub mod champion;
pub mod types;

pub use ability::{find_change_list, parse_ability_block, parse_ability_fragment};
pub use champion::{extract, extract_records, extract_with_progress};
pub use types::{AbilityBlock, ChampionAbilityChange, ChangeItem, ExtractStats, Extraction};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub markers: MarkerTable,
    /// Relative champion links are resolved against this.
    pub base_url: Option<Url>,
}

impl ExtractOptions {
    pub fn new(markers: MarkerTable) -> Self {
        Self { markers, base_url: None }
    }

    /// Set the page URL. An unparsable URL leaves links unresolved.
    pub fn with_base_url(mut self, url: Option<&str>) -> Self {
        self.base_url = url.and_then(|u| match Url::parse(u) {
            Ok(u) => Some(u),
            Err(e) => {
                logw!("base url {u:?} not usable: {e}");
                None
            }
        });
        self
    }
}

/// `el` is, or contains, the start of a champion region: a section marker,
/// or a name heading other than `current`.
pub(crate) fn is_boundary(markers: &MarkerTable, el: &ElementRef<'_>, current: Option<ElementRef<'_>>) -> bool {
    el.descendants().filter_map(ElementRef::wrap).any(|d| {
        markers.is(MarkerRole::ChampionSection, &d)
            || (markers.is(MarkerRole::ChampionName, &d) && Some(d.id()) != current.map(|c| c.id()))
    })
}
