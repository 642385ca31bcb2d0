//! Digest presentation: Markdown document or standalone HTML page.
//!
//! The ranking engine emits no formatting; everything user-facing about
//! the digest lives here.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use jobhunt_search::{Digest, DigestStats, ScoredEntry};

use crate::config::DigestFormat;
use crate::error::Result;

/// Heading used by both output formats.
pub const DIGEST_TITLE: &str = "Daily Jobs Digest";

/// Context printed alongside the entries.
#[derive(Debug, Clone)]
pub struct DigestMeta {
    pub generated_at: DateTime<Utc>,
    /// The query text, if the digest came from a live search.
    pub query: Option<String>,
}

impl DigestMeta {
    pub fn now(query: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            query,
        }
    }
}

/// Render the digest as Markdown.
///
/// One block per entry: a bullet with the linked title, the sites it was
/// found on and its score, then the snippet on a continuation line.
pub fn render_markdown(digest: &Digest, meta: &DigestMeta) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {DIGEST_TITLE}\n");

    let mut header = format!(
        "_Generated {}",
        meta.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(query) = &meta.query {
        let _ = write!(header, " for \"{}\"", escape_markdown(query));
    }
    let _ = write!(header, ": {} posting", digest.entries.len());
    if digest.entries.len() != 1 {
        header.push('s');
    }
    header.push_str("._");
    let _ = writeln!(out, "{header}\n");

    if digest.entries.is_empty() {
        let _ = writeln!(out, "No matching postings.\n");
    }
    for entry in &digest.entries {
        render_entry(&mut out, entry);
    }

    let _ = writeln!(out, "---\n\n{}", stats_line(&digest.stats));
    out
}

fn render_entry(out: &mut String, entry: &ScoredEntry) {
    let result = &entry.result;
    let title = if result.title.is_empty() {
        "Untitled".to_string()
    } else {
        escape_markdown(&result.title)
    };
    let link = result.link.replace('<', "%3C").replace('>', "%3E");
    let _ = write!(out, "* [{title}](<{link}>)");
    if !result.sources.is_empty() {
        let _ = write!(out, " - {}", escape_markdown(&result.sources.join(", ")));
    }
    let _ = write!(out, " (score {:.2})", entry.score);
    if result.snippet.is_empty() {
        out.push_str("\n\n");
    } else {
        let _ = write!(out, "  \n  {}\n\n", escape_markdown(&result.snippet));
    }
}

fn stats_line(stats: &DigestStats) -> String {
    format!(
        "_{} results received: {} duplicates merged, {} excluded, {} filtered, \
         {} below the required-keyword gate, {} malformed._",
        stats.received,
        stats.duplicates,
        stats.excluded,
        stats.filtered,
        stats.gated,
        stats.malformed
    )
}

/// Render the digest as a standalone HTML page.
///
/// The Markdown rendering is converted with `pulldown-cmark`; all user text
/// was escaped on the way in, so snippets cannot inject markup.
pub fn render_html(digest: &Digest, meta: &DigestMeta) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let markdown = render_markdown(digest, meta);
    let parser = Parser::new_ext(&markdown, Options::empty());
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, parser);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{DIGEST_TITLE}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Render in the requested format.
pub fn render(digest: &Digest, meta: &DigestMeta, format: DigestFormat) -> String {
    match format {
        DigestFormat::Markdown => render_markdown(digest, meta),
        DigestFormat::Html => render_html(digest, meta),
    }
}

/// Write rendered output to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn save_digest(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Backslash-escape characters that Markdown or raw HTML would interpret.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        let leading_marker = i == 0 && matches!(c, '-' | '+' | '=');
        if leading_marker
            || matches!(
                c,
                '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '&' | '~' | '!'
            )
        {
            out.push('\\');
        }
        out.push(c);
    }
    escape_ordered_marker(out)
}

/// A leading `12.` or `3)` would start an ordered list; escape its punctuation.
fn escape_ordered_marker(text: String) -> String {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return text;
    }
    match text[digits..].chars().next() {
        Some('.' | ')') => format!("{}\\{}", &text[..digits], &text[digits..]),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jobhunt_search::{rank_results, KeywordProfile, RankingOptions, RawResult};

    fn meta() -> DigestMeta {
        DigestMeta {
            generated_at: Utc
                .with_ymd_and_hms(2026, 10, 19, 8, 30, 0)
                .single()
                .expect("valid timestamp"),
            query: Some("ESG Tel Aviv".into()),
        }
    }

    fn digest(raw: Vec<RawResult>) -> Digest {
        let profile =
            KeywordProfile::new(vec!["esg"], vec!["partnerships"], vec!["tel aviv"], vec![])
                .expect("valid profile");
        rank_results(raw, &RankingOptions::new(profile)).expect("rank")
    }

    #[test]
    fn markdown_has_heading_header_and_entries() {
        let d = digest(vec![
            RawResult::new("ESG Partnerships Lead", "https://a.org/1", "Full-time role")
                .with_source("a.org"),
            RawResult::new("Other", "https://b.org/2", ""),
        ]);
        let md = render_markdown(&d, &meta());
        assert!(md.starts_with("# Daily Jobs Digest\n"));
        assert!(md.contains("_Generated 2026-10-19 08:30 UTC for \"ESG Tel Aviv\": 2 postings._"));
        assert!(md.contains(
            "* [ESG Partnerships Lead](<https://a.org/1>) - a.org (score 13.00)  \n  Full-time role\n"
        ));
        assert!(md.contains("* [Other](<https://b.org/2>) (score 0.00)\n"));
    }

    #[test]
    fn empty_digest_says_so() {
        let md = render_markdown(&digest(vec![]), &meta());
        assert!(md.contains("0 postings"));
        assert!(md.contains("No matching postings."));
    }

    #[test]
    fn stats_footer_reports_drops() {
        let d = digest(vec![
            RawResult::new("ESG", "https://a.org/1", ""),
            RawResult::new("ESG", "https://a.org/1/", ""),
            RawResult::new("ESG", "nope", ""),
        ]);
        let md = render_markdown(&d, &meta());
        assert!(md.contains("_3 results received: 1 duplicates merged"));
        assert!(md.contains("1 malformed._"));
    }

    #[test]
    fn markup_in_titles_and_snippets_is_escaped() {
        assert_eq!(escape_markdown("[ESG] *lead*"), "\\[ESG\\] \\*lead\\*");
        assert_eq!(escape_markdown("<script>"), "\\<script\\>");
        assert_eq!(escape_markdown("- bullet"), "\\- bullet");
        assert_eq!(escape_markdown("a-b"), "a-b");
        assert_eq!(escape_markdown("1. first"), "1\\. first");
        assert_eq!(escape_markdown("2026 role"), "2026 role");
    }

    #[test]
    fn html_wraps_rendered_markdown() {
        let d = digest(vec![RawResult::new(
            "ESG Lead",
            "https://a.org/1?x=1&y=2",
            "Apply <b>now</b>",
        )]);
        let page = render_html(&d, &meta());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Daily Jobs Digest</title>"));
        assert!(page.contains("<h1>Daily Jobs Digest</h1>"));
        assert!(page.contains("href=\"https://a.org/1?x=1&amp;y=2\""));
        assert!(page.contains("&lt;b&gt;now&lt;/b&gt;"));
        assert!(!page.contains("<b>now</b>"));
    }

    #[test]
    fn html_never_links_script_urls() {
        let d = digest(vec![
            RawResult::new("ESG Lead", "javascript://example.com/%0Aalert(document.cookie)", "x"),
            RawResult::new("ESG Analyst", "https://a.org/2", "x"),
        ]);
        assert_eq!(d.stats.malformed, 1);
        let page = render_html(&d, &meta());
        assert!(!page.contains("href=\"javascript:"));
        assert!(page.contains("href=\"https://a.org/2\""));
    }

    #[test]
    fn render_dispatches_on_format() {
        let d = digest(vec![]);
        assert!(render(&d, &meta(), DigestFormat::Markdown).starts_with("# "));
        assert!(render(&d, &meta(), DigestFormat::Html).starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn save_digest_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("daily_jobs.md");
        save_digest(&path, "# Daily Jobs Digest\n").expect("save");
        let written = std::fs::read_to_string(&path).expect("read");
        assert_eq!(written, "# Daily Jobs Digest\n");
    }
}
