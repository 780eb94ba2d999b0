// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod extract;

pub mod csv;
pub mod file;
pub mod progress;
pub mod render;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, FetchError, Result, StructureError};
pub use extract::{
    AbilityBlock, ChampionAbilityChange, ChangeItem, ExtractOptions, ExtractStats, Extraction,
    extract, extract_records, parse_ability_block, parse_ability_fragment,
};
