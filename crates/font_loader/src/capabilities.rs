//! Rendering engine capabilities
//!
//! Derived once from the environment identity when the engine is built and
//! shared by reference with every session.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Last WebKit build with the fallback width bug
const WEBKIT_FALLBACK_BUG_MAX: (u32, u32) = (536, 11);

fn webkit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"AppleWeb[kK]it/([0-9]+)\.([0-9]+)").expect("WebKit version pattern is valid")
    })
}

/// Known quirks of the host rendering engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCapabilities {
    /// WebKit 536.11 and earlier render an unloaded web font with the last
    /// resort font instead of the listed fallback, so both probes collapse
    /// onto one width
    pub webkit_fallback_bug: bool,
}

impl EngineCapabilities {
    /// Evaluate the engine quirks for a user agent string
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            webkit_fallback_bug: webkit_version(user_agent)
                .is_some_and(|version| version <= WEBKIT_FALLBACK_BUG_MAX),
        }
    }

    pub fn with_webkit_fallback_bug(mut self, value: bool) -> Self {
        self.webkit_fallback_bug = value;
        self
    }
}

/// `(major, minor)` WebKit build from a user agent string
pub fn webkit_version(user_agent: &str) -> Option<(u32, u32)> {
    let captures = webkit_pattern().captures(user_agent)?;
    let major = captures[1].parse().ok()?;
    let minor = captures[2].parse().ok()?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAFARI_5: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_7_3) AppleWebKit/534.53.11 (KHTML, like Gecko) Version/5.1.3 Safari/534.53.10";
    const SAFARI_6: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_8) AppleWebKit/536.25 (KHTML, like Gecko) Version/6.0 Safari/536.25";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

    #[test]
    fn test_webkit_version() {
        assert_eq!(webkit_version(SAFARI_5), Some((534, 53)));
        assert_eq!(webkit_version("AppleWebkit/536.11"), Some((536, 11)));
        assert_eq!(webkit_version("AppleWebKit/536"), None);
        assert_eq!(webkit_version(FIREFOX), None);
    }

    #[test]
    fn test_fallback_bug_detection() {
        assert!(EngineCapabilities::from_user_agent(SAFARI_5).webkit_fallback_bug);
        assert!(EngineCapabilities::from_user_agent("AppleWebKit/536.11").webkit_fallback_bug);
        assert!(!EngineCapabilities::from_user_agent("AppleWebKit/536.12").webkit_fallback_bug);
        assert!(!EngineCapabilities::from_user_agent(SAFARI_6).webkit_fallback_bug);
        assert!(!EngineCapabilities::from_user_agent("AppleWebKit/537.36").webkit_fallback_bug);
        assert!(!EngineCapabilities::from_user_agent(FIREFOX).webkit_fallback_bug);
        assert!(!EngineCapabilities::from_user_agent("").webkit_fallback_bug);
    }
}
