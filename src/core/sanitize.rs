// src/core/sanitize.rs

/// Collapse whitespace runs (incl. NBSP) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Filesystem-safe stem for a URL or title: ASCII alnum and `-` kept, runs of
/// anything else become one `_`. Empty input falls back to `page`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("page") } else { out }
}

/// Split on the first `:` only. `None` when there is no colon.
pub fn split_first_colon(s: &str) -> Option<(&str, &str)> {
    let ix = s.find(':')?;
    Some((&s[..ix], &s[ix + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_nbsp_and_newlines() {
        assert_eq!(normalize_ws("  Q -\n\u{a0} Orb\t"), "Q - Orb");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn sanitize_url_stem() {
        assert_eq!(
            sanitize_filename("https://www.leagueoflegends.com/en-us/news/patch-26-2-notes/"),
            "https_www_leagueoflegends_com_en-us_news_patch-26-2-notes"
        );
        assert_eq!(sanitize_filename("///"), "page");
    }

    #[test]
    fn first_colon_only() {
        assert_eq!(split_first_colon("a: b: c"), Some(("a", " b: c")));
        assert_eq!(split_first_colon("no colon"), None);
    }
}
