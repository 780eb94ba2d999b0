// src/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use reqwest::blocking::Client;
use scraper::Html;

use crate::{
    config::consts::{ WORKERS, REQUEST_PAUSE_MS, JITTER_MS },
    config::options::{ ScrapeOptions, Source },
    core::net,
    error::FetchError,
    extract::{ self, ExtractOptions, Extraction },
    progress::Progress,
    store::Store,
};

/// Result of a multi-page run: everything that extracted, in source order,
/// plus the sources that could not be fetched.
#[derive(Debug, Default)]
pub struct Collected {
    pub extraction: Extraction,
    pub failures: Vec<(String, FetchError)>,
}

/// Get the raw page for one source.
/// URLs go through the store: read when `use_cache` and present, written
/// after a fetch when `write_cache` (best-effort). Files are read as-is.
pub fn load_source(
    source: &Source,
    client: &Client,
    opts: &ScrapeOptions,
    store: &Store,
) -> Result<(String, bool), FetchError> {
    match source {
        Source::File(path) => {
            let html = std::fs::read_to_string(path)
                .map_err(|e| FetchError::Io { path: path.clone(), source: e })?;
            Ok((html, false))
        }
        Source::Url(url) => {
            if opts.use_cache {
                match store.load_page(url) {
                    Ok(Some(html)) => {
                        logd!("cache hit for {url}");
                        return Ok((html, false));
                    }
                    Ok(None) => logd!("cache miss for {url}"),
                    Err(e) => logw!("cache read failed for {url}: {e}"),
                }
            }
            let html = net::http_get(client, url)?;
            if opts.write_cache {
                // cache, but ignore any IO error (best-effort)
                if let Err(e) = store.save_page(url, &html) {
                    logw!("cache write failed for {url}: {e}");
                }
            }
            Ok((html, true))
        }
    }
}

/// Parse + extract one page already in memory.
pub fn extract_page(html: &str, source: &Source, opts: &ScrapeOptions) -> Extraction {
    let doc = Html::parse_document(html);
    let eopts = ExtractOptions::new(opts.markers.clone()).with_base_url(source.base_url());
    extract::extract(&doc, &eopts)
}

/// Fetch and extract one source.
pub fn collect_one(source: &Source, opts: &ScrapeOptions) -> Result<Extraction, FetchError> {
    let client = net::client(opts.timeout)?;
    let (html, _) = load_source(source, &client, opts, &Store::default())?;
    Ok(extract_page(&html, source, opts))
}

/// Collect every source in `opts.sources`.
///
/// Several sources are fetched by a small worker pool; records are
/// concatenated in source order regardless of completion order. A source
/// that fails is logged, reported and left out. Fails only when every
/// source failed.
pub fn collect(
    opts: &ScrapeOptions,
    store: &Store,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Collected, FetchError> {
    let n = opts.sources.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(n);
    }

    let client = net::client(opts.timeout)?;

    // Concurrency
    type FetchOk = (usize, Extraction);
    type FetchErr = (usize, FetchError);

    let shared = Arc::new(opts.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(n).max(1);

    // Spawn workers

    for _ in 0..workers {
        let opts = Arc::clone(&shared);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let client = client.clone();
        let store = store.clone();

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= opts.sources.len() {
                        break;
                    }
                    let source = &opts.sources[i];
                    let (result, fetched) = match load_source(source, &client, &opts, &store) {
                        Ok((html, fetched)) => (Ok((i, extract_page(&html, source, &opts))), fetched),
                        Err(e) => (Err((i, e)), matches!(source, Source::Url(_))),
                    };
                    let _ = tx.send(result);
                    if fetched {
                        let jitter = (i as u64 * 37) % JITTER_MS;
                        thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                    }
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut per_source: Vec<FetchOk> = Vec::with_capacity(n);
    let mut failed: Vec<FetchErr> = Vec::new();

    for _ in 0..n {
        match res_rx.recv() {
            Ok(Ok((i, ex))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(i, &opts.sources[i].label());
                }
                per_source.push((i, ex));
            }
            Ok(Err((i, e))) => {
                loge!("{}: {e}", opts.sources[i].label());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, &e.to_string());
                }
                failed.push((i, e));
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    failed.sort_by_key(|(i, _)| *i);
    if per_source.is_empty() && !failed.is_empty() {
        let (_, first) = failed.remove(0);
        return Err(first);
    }

    // Sort
    per_source.sort_by_key(|(i, _)| *i);
    let mut out = Collected::default();
    for (_, mut ex) in per_source {
        out.extraction.records.append(&mut ex.records);
        out.extraction.stats += ex.stats;
    }
    out.failures = failed
        .into_iter()
        .map(|(i, e)| (opts.sources[i].label(), e))
        .collect();

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn page(champ: &str, ability: &str) -> String {
        format!(
            r#"<html><body><div class="patch-change-block"><div>
                <h3 class="change-title">{champ}</h3>
                <h4 class="change-detail-title ability-title">{ability}</h4>
                <ul><li><strong>Damage</strong>: up</li></ul>
            </div></div></body></html>"#
        )
    }

    fn write_tmp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("patch_scrape_collect");
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join(name);
        fs::write(&p, contents).unwrap();
        p
    }

    fn opts_for(sources: Vec<Source>) -> ScrapeOptions {
        ScrapeOptions { sources, write_cache: false, ..ScrapeOptions::default() }
    }

    #[test]
    fn files_collected_in_source_order() {
        let sources: Vec<Source> = (0..6)
            .map(|i| Source::File(write_tmp(&format!("p{i}.html"), &page(&format!("Champ{i}"), "Q"))))
            .collect();
        let got = collect(&opts_for(sources), &Store::default(), None).unwrap();
        let names: Vec<_> = got.extraction.records.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(names, vec!["Champ0", "Champ1", "Champ2", "Champ3", "Champ4", "Champ5"]);
        assert_eq!(got.extraction.stats.champions_found, 6);
        assert!(got.failures.is_empty());
    }

    #[test]
    fn missing_file_reported_others_kept() {
        let ok = Source::File(write_tmp("ok.html", &page("Lux", "E")));
        let missing = Source::File(PathBuf::from("definitely/not/here.html"));
        let got = collect(&opts_for(vec![missing, ok]), &Store::default(), None).unwrap();
        assert_eq!(got.extraction.records.len(), 1);
        assert_eq!(got.failures.len(), 1);
        assert!(matches!(got.failures[0].1, FetchError::Io { .. }));
    }

    #[test]
    fn all_failed_is_error() {
        let missing = Source::File(PathBuf::from("definitely/not/here.html"));
        assert!(collect(&opts_for(vec![missing]), &Store::default(), None).is_err());
    }

    #[test]
    fn cached_url_served_without_network() {
        let root = std::env::temp_dir().join("patch_scrape_collect_store");
        let store = Store::at(&root);
        let url = "https://example.invalid/patch-9-9-notes/";
        store.save_page(url, &page("Sion", "R - Unstoppable Onslaught")).unwrap();

        let mut opts = opts_for(vec![Source::Url(s!(url))]);
        opts.use_cache = true;
        let got = collect(&opts, &store, None).unwrap();
        assert_eq!(got.extraction.records[0].champion, "Sion");
    }

    #[test]
    fn collect_one_reads_file() {
        let src = Source::File(write_tmp("one.html", &page("Nami", "W - Ebb and Flow")));
        let ex = collect_one(&src, &opts_for(vec![])).unwrap();
        assert_eq!(ex.records.len(), 1);
        assert_eq!(ex.records[0].ability, "W - Ebb and Flow");
    }
}
