//! `@font-face` `src` descriptor parsing

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One `url()` entry of a `src` descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub url: String,
    /// Format hint from a following `format()`
    pub format: Option<String>,
}

fn source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^'")\s]+))\s*\)"#,
            r#"(?:\s*format\(\s*(?:"([^"]*)"|'([^']*)'|([^'")\s]+))\s*\))?"#,
        ))
        .expect("src pattern is valid")
    })
}

/// Extract every `url()` source, with its format hint, in order
///
/// `local()` entries and empty URLs are skipped.
pub fn parse_src(input: &str) -> Vec<FontSource> {
    source_pattern()
        .captures_iter(input)
        .filter_map(|captures| {
            let first = |groups: [usize; 3]| {
                groups
                    .into_iter()
                    .find_map(|i| captures.get(i))
                    .map(|m| m.as_str().to_string())
            };
            let url = first([1, 2, 3]).filter(|url| !url.is_empty())?;
            Some(FontSource {
                url,
                format: first([4, 5, 6]),
            })
        })
        .collect()
}
