//! Join keys shared by the affinity side and the funnel side.
//!
//! Product titles are slugified; landing-page paths are assumed to already
//! be URL-handle shaped and only their last segment is taken. A title that
//! does not slugify to the storefront's handle (e.g. `"Abaya (Black)"` vs
//! `/products/black-abaya`) never matches; see `JoinDiagnostics`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatchKey(String);

impl MatchKey {
    /// Affinity-side key: `slug(title)`.
    pub fn from_product_title(title: &str) -> Self {
        MatchKey(slug(title))
    }

    /// Funnel-side key: text after the final `/`, or the whole path.
    pub fn from_landing_path(path: &str) -> Self {
        MatchKey(path_tail(path).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, trim, keep `[a-z0-9]` and whitespace, then turn every
/// whitespace run into one hyphen.
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for c in lowered.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_space = false;
        }
    }
    out
}

pub fn path_tail(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
