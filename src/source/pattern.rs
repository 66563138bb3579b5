//! Glob pattern matching for file URIs

use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};

/// `*` and `?` stay within one path segment; only `**` crosses `/`
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Matches URIs against a set of glob patterns
///
/// Supported syntax: `*` (any run of characters except `/`), `**` (any
/// number of path segments), `?` (one character except `/`), `[abc]` and
/// `[!abc]` character classes. An empty set of patterns matches everything.
#[derive(Debug, Clone, Default)]
pub struct GlobMatcher {
    patterns: Vec<Pattern>,
}

impl GlobMatcher {
    /// Compile a set of glob patterns
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Result<Self> {
        let patterns = globs
            .iter()
            .map(|glob| compile(glob.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Matcher accepting every URI
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Check whether a URI matches any pattern
    pub fn is_match(&self, uri: &str) -> bool {
        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|pattern| pattern.matches_with(uri, MATCH_OPTIONS))
    }
}

fn compile(glob: &str) -> Result<Pattern> {
    if glob.is_empty() {
        return Err(Error::glob(glob, "pattern is empty"));
    }
    Pattern::new(glob).map_err(|e| Error::glob(glob, e.to_string()))
}
