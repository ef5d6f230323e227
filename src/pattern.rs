//! Path and verb pattern matching for access rules
//!
//! Patterns are parsed once when a rule is constructed and matched as plain
//! segment comparisons per request. No regex compilation happens on the
//! request path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verb portion of an access rule pattern
///
/// Either the sentinel `*` (any verb) or an exact, case-sensitive verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum VerbPattern {
    /// Matches any verb (stored pattern `*`)
    Any,
    /// Matches one verb exactly, case-sensitive
    Exact(String),
}

impl VerbPattern {
    /// Parse a stored verb pattern
    pub fn parse(s: &str) -> Self {
        if s == "*" {
            Self::Any
        } else {
            Self::Exact(s.to_string())
        }
    }

    /// Check a request verb against this pattern
    pub fn matches(&self, verb: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(v) => v == verb,
        }
    }

    /// The stored pattern string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Exact(v) => v,
        }
    }
}

impl From<String> for VerbPattern {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<VerbPattern> for String {
    fn from(p: VerbPattern) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for VerbPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed segment of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Matches only the identical literal segment
    Literal(String),
    /// `*` - matches exactly one non-empty segment
    Wildcard,
}

/// Parsed form of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternForm {
    /// Segment-wise matching, optionally with a trailing `**` glob
    Segments {
        segments: Vec<Segment>,
        trailing_glob: bool,
    },
    /// Unparseable pattern: requires a character-identical path.
    /// Anything with a wildcard glued to other text (`foo*`) or a `**`
    /// before the last segment lands here. Fail-closed: never a
    /// match-everything fallback.
    Verbatim,
}

/// Path portion of an access rule pattern
///
/// Supported forms, per `/`-delimited segment:
/// - a literal segment matches only itself
/// - `*` matches exactly one arbitrary segment
/// - a trailing `**` matches zero or more remaining segments
///
/// Callers must hand in normalized paths (no duplicate separators); empty
/// segments are not treated specially here.
///
/// # Examples
///
/// ```
/// use hrms_authz::pattern::PathPattern;
///
/// let p = PathPattern::parse("/api/users/**");
/// assert!(p.matches("/api/users"));
/// assert!(p.matches("/api/users/1/payslips"));
/// assert!(!p.matches("/api/departments"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct PathPattern {
    /// Original pattern string
    raw: String,
    /// Parsed form
    form: PatternForm,
}

impl PathPattern {
    /// Parse a stored path pattern
    ///
    /// Parsing is infallible: a pattern that does not fit the supported
    /// wildcard grammar degrades to a verbatim literal.
    pub fn parse(s: &str) -> Self {
        let form = Self::parse_form(s);
        Self {
            raw: s.to_string(),
            form,
        }
    }

    fn parse_form(s: &str) -> PatternForm {
        let raw_segments: Vec<&str> = split_segments(s);
        let mut segments = Vec::with_capacity(raw_segments.len());
        let mut trailing_glob = false;

        let last = raw_segments.len().saturating_sub(1);
        for (idx, seg) in raw_segments.iter().enumerate() {
            match *seg {
                "*" => segments.push(Segment::Wildcard),
                "**" => {
                    if idx == last {
                        trailing_glob = true;
                    } else {
                        // `**` is only defined as a trailing segment
                        return PatternForm::Verbatim;
                    }
                }
                other => {
                    if other.contains('*') {
                        // wildcards must be standalone segments
                        return PatternForm::Verbatim;
                    }
                    segments.push(Segment::Literal(other.to_string()));
                }
            }
        }

        PatternForm::Segments {
            segments,
            trailing_glob,
        }
    }

    /// The stored pattern string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern degraded to a verbatim literal
    pub fn is_verbatim(&self) -> bool {
        matches!(self.form, PatternForm::Verbatim)
    }

    /// Check a concrete request path against this pattern
    ///
    /// Pure function: no I/O, no shared state.
    pub fn matches(&self, path: &str) -> bool {
        match &self.form {
            PatternForm::Verbatim => self.raw == path,
            PatternForm::Segments {
                segments,
                trailing_glob,
            } => {
                let path_segments = split_segments(path);

                if *trailing_glob {
                    // prefix must match; anything after, including nothing,
                    // is accepted
                    if path_segments.len() < segments.len() {
                        return false;
                    }
                } else if path_segments.len() != segments.len() {
                    return false;
                }

                segments
                    .iter()
                    .zip(path_segments.iter())
                    .all(|(pat, seg)| match pat {
                        Segment::Wildcard => !seg.is_empty(),
                        Segment::Literal(lit) => lit == seg,
                    })
            }
        }
    }
}

impl From<String> for PathPattern {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PathPattern> for String {
    fn from(p: PathPattern) -> Self {
        p.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Split a path into its non-anchor segments
///
/// Leading and trailing `/` produce no segments; `/api/users` and
/// `api/users` split identically.
fn split_segments(s: &str) -> Vec<&str> {
    s.split('/').filter(|seg| !seg.is_empty()).collect()
}
