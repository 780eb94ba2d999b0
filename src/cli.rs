// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{DEFAULT_URL, REQUEST_TIMEOUT_SECS};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions, ScrapeOptions, Source};
use crate::extract::ExtractStats;
use crate::progress::Progress;
use crate::store::Store;
use crate::{file, log, render, scrape};

#[derive(Parser, Debug)]
#[command(name = "patch_scrape")]
#[command(version, about = "Champion ability changes from League of Legends patch notes", long_about = None)]
#[command(after_help = "EXAMPLES:
    patch_scrape                                   Current patch, text summary
    patch_scrape <URL> -f json -o out/             JSON into out/champion_changes.json
    patch_scrape saved_page.html -f csv --include-headers
    patch_scrape <URL1> <URL2> --cached --stats    Several patches, reuse cached pages")]
pub struct Args {
    /// Patch-notes URLs or saved HTML files (default: the current patch)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Output file, or directory ending in '/' (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Write a header row (csv/tsv)
    #[arg(long)]
    pub include_headers: bool,

    /// Use cached pages from .store/ when present
    #[arg(long)]
    pub cached: bool,

    /// Do not save fetched pages to .store/
    #[arg(long)]
    pub no_cache: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print skip counters to stderr
    #[arg(long)]
    pub stats: bool,

    /// No progress lines on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => ExportFormat::Text,
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let sources = if self.sources.is_empty() {
            vec![Source::Url(s!(DEFAULT_URL))]
        } else {
            self.sources.iter().map(|s| Source::parse(s)).collect()
        };
        AppOptions {
            scrape: ScrapeOptions {
                sources,
                use_cache: self.cached,
                write_cache: !self.no_cache,
                timeout: Duration::from_secs(self.timeout),
                ..ScrapeOptions::default()
            },
            export: ExportOptions {
                format: self.format.into(),
                out: self.out.clone(),
                include_headers: self.include_headers,
            },
        }
    }
}

/// Status lines on stderr while pages are collected.
struct CliProgress {
    done: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, _index: usize, name: &str) {
        self.done += 1;
        self.log(&format!("Fetched {} ({}/{})", name, self.done, self.total));
    }
    fn item_failed(&mut self, _index: usize, reason: &str) {
        self.done += 1;
        self.log(&format!("Failed ({}/{}): {}", self.done, self.total, reason));
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    log::init(log::level_from_verbosity(args.verbose), args.log_file.as_deref())
        .wrap_err("cannot open log file")?;

    let opts = args.to_options();
    let mut progress = CliProgress { done: 0, total: 0 };
    let sink: Option<&mut dyn Progress> = if !args.quiet && opts.scrape.sources.len() > 1 {
        Some(&mut progress)
    } else {
        None
    };

    let collected = scrape::collect(&opts.scrape, &Store::default(), sink)?;

    for (label, e) in &collected.failures {
        eprintln!("Warning: skipped {label}: {e}");
    }
    let stats = &collected.extraction.stats;
    if args.stats {
        eprintln!("{}", stats_line(stats));
    } else if stats.has_omissions() {
        logf!("some entries were skipped; rerun with --stats for counts");
    }

    let contents = render::render(&collected.extraction.records, &opts.export)?;
    if let Some(path) = file::write_export(&opts.export, &contents)? {
        if !args.quiet {
            eprintln!("Wrote {} records to {}", collected.extraction.records.len(), path.display());
        }
    }
    Ok(())
}

fn stats_line(s: &ExtractStats) -> String {
    format!(
        "champions: {} found, {} skipped | abilities: {} found, {} without list, {} malformed | headings ignored: {} | items skipped: {}",
        s.champions_found,
        s.champions_skipped,
        s.abilities_found,
        s.abilities_without_list,
        s.ability_errors,
        s.headings_ignored,
        s.items_skipped,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_patch_text_stdout() {
        let args = Args::parse_from(["patch_scrape"]);
        let opts = args.to_options();
        assert_eq!(opts.scrape.sources, vec![Source::Url(s!(DEFAULT_URL))]);
        assert_eq!(opts.export.format, ExportFormat::Text);
        assert_eq!(opts.export.out, None);
        assert!(opts.scrape.write_cache);
        assert!(!opts.scrape.use_cache);
    }

    #[test]
    fn flags_map_onto_options() {
        let args = Args::parse_from([
            "patch_scrape", "a.html", "https://x.test/p", "-f", "tsv", "-o", "out/", "--include-headers",
            "--cached", "--no-cache", "--timeout", "3", "-vv",
        ]);
        assert_eq!(args.verbose, 2);
        let opts = args.to_options();
        assert_eq!(opts.scrape.sources, vec![
            Source::File(PathBuf::from("a.html")),
            Source::Url(s!("https://x.test/p")),
        ]);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(opts.export.include_headers);
        assert!(opts.scrape.use_cache);
        assert!(!opts.scrape.write_cache);
        assert_eq!(opts.scrape.timeout, Duration::from_secs(3));
    }

    #[test]
    fn stats_line_lists_every_counter() {
        let s = ExtractStats { champions_found: 3, items_skipped: 2, ..ExtractStats::default() };
        let line = stats_line(&s);
        assert!(line.starts_with("champions: 3 found, 0 skipped"));
        assert!(line.ends_with("items skipped: 2"));
    }
}
