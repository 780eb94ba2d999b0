// src/config/consts.rs

// Net config
pub const DEFAULT_URL: &str =
    "https://www.leagueoflegends.com/en-us/news/game-updates/patch-26-2-notes/";
pub const USER_AGENT: &str = concat!("patch_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const PAGES_SUBDIR: &str = "pages";

// Export
pub const DEFAULT_FILE: &str = "champion_changes";
pub const CSV_HEADERS: [&str; 5] = ["Champion", "Link", "Ability", "Label", "Description"];

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 100; // extra 0..100 ms
