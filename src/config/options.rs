// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use super::markers::MarkerTable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// Where a page comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http(s)://…` is a URL; anything else is a local file path.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lc = t.to_ascii_lowercase();
        if lc.starts_with("http://") || lc.starts_with("https://") {
            Source::Url(s!(t))
        } else {
            Source::File(PathBuf::from(t))
        }
    }

    /// Base for resolving relative links. Files have none.
    pub fn base_url(&self) -> Option<&str> {
        match self {
            Source::Url(u) => Some(u),
            Source::File(_) => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Source::Url(u) => u.clone(),
            Source::File(p) => p.display().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub sources: Vec<Source>,
    /// Read pages from the local store when present.
    pub use_cache: bool,
    /// Save fetched pages to the local store (best-effort).
    pub write_cache: bool,
    pub timeout: Duration,
    pub markers: MarkerTable,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            sources: vec![Source::Url(s!(DEFAULT_URL))],
            use_cache: false,
            write_cache: true,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            markers: MarkerTable::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }

    /// Field separator for table formats.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// `None` → stdout.
    pub out: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Text,
            out: None,
            include_headers: false,
        }
    }
}

impl ExportOptions {
    /// Resolve the file to write, if any.
    /// A directory (existing, or hinted by a trailing separator) gets
    /// `champion_changes.<ext>` inside it.
    pub fn out_path(&self) -> Option<PathBuf> {
        let p = self.out.as_ref()?;
        if p.is_dir() || looks_like_dir_hint(p) {
            Some(p.join(join!(DEFAULT_FILE, ".", self.format.ext())))
        } else {
            Some(p.clone())
        }
    }
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
