// src/store.rs
// Local page cache: raw HTML per URL under `.store/pages/`.

use std::{fs, io, path::PathBuf};

use crate::config::consts::{PAGES_SUBDIR, STORE_DIR};
use crate::core::sanitize::sanitize_filename;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    root: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self { root: PathBuf::from(STORE_DIR) }
    }
}

impl Store {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn page_path(&self, url: &str) -> PathBuf {
        self.root
            .join(PAGES_SUBDIR)
            .join(join!(&sanitize_filename(url), ".html"))
    }

    pub fn save_page(&self, url: &str, html: &str) -> io::Result<PathBuf> {
        let p = self.page_path(url);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&p, html)?;
        Ok(p)
    }

    /// `Ok(None)` when nothing is cached for `url`.
    pub fn load_page(&self, url: &str) -> io::Result<Option<String>> {
        let p = self.page_path(url);
        match fs::read_to_string(&p) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
