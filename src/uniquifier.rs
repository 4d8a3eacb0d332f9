//! Deterministic unique-name generation.
//!
//! A [`SuffixPattern`] describes how a number is appended to a base name,
//! e.g. `" {num:03d}"` turns `Wall` into `Wall 001`. [`next_unique_name`]
//! searches for the first unused candidate, remembering per base name where
//! the previous search stopped so later calls never rescan from the start.

use crate::document::FALLBACK_NAME;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SUFFIX_PATTERN: &str = " {num:03d}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("suffix pattern must contain a {{num}} placeholder")]
    MissingPlaceholder,

    #[error("suffix pattern may contain only one {{num}} placeholder")]
    MultiplePlaceholders,

    #[error("unknown placeholder '{{{0}}}', expected {{num}}")]
    UnknownPlaceholder(String),

    #[error("invalid number format '{0}', expected e.g. 03d")]
    InvalidFormat(String),

    #[error("unclosed '{{' in suffix pattern")]
    Unclosed,

    #[error("unmatched '}}' in suffix pattern, use '}}}}' for a literal brace")]
    UnmatchedClose,
}

/// Template turning a number into a name suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPattern {
    source: String,
    before: String,
    after: String,
    width: usize,
    zero_pad: bool,
}

impl SuffixPattern {
    pub fn render(&self, n: u32) -> String {
        let digits = if self.zero_pad {
            format!("{:0width$}", n, width = self.width)
        } else {
            format!("{:width$}", n, width = self.width)
        };
        format!("{}{}{}", self.before, digits, self.after)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for SuffixPattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_SUFFIX_PATTERN.to_string(),
            before: " ".to_string(),
            after: String::new(),
            width: 3,
            zero_pad: true,
        }
    }
}

impl fmt::Display for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for SuffixPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut before = String::new();
        let mut after = String::new();
        let mut spec: Option<(usize, bool)> = None;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    '{'
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    '}'
                }
                '}' => return Err(PatternError::UnmatchedClose),
                '{' => {
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => inner.push(ch),
                            None => return Err(PatternError::Unclosed),
                        }
                    }
                    if spec.is_some() {
                        return Err(PatternError::MultiplePlaceholders);
                    }
                    spec = Some(parse_placeholder(&inner)?);
                    continue;
                }
                other => other,
            };

            if spec.is_some() {
                after.push(literal);
            } else {
                before.push(literal);
            }
        }

        let (width, zero_pad) = spec.ok_or(PatternError::MissingPlaceholder)?;
        Ok(Self {
            source: s.to_string(),
            before,
            after,
            width,
            zero_pad,
        })
    }
}

/// Parses `num`, `num:d`, `num:3`, `num:03`, `num:3d` or `num:03d`.
fn parse_placeholder(inner: &str) -> Result<(usize, bool), PatternError> {
    let (key, format) = match inner.split_once(':') {
        Some((key, format)) => (key, format),
        None => (inner, ""),
    };
    if key != "num" {
        return Err(PatternError::UnknownPlaceholder(key.to_string()));
    }

    let digits = format.strip_suffix('d').unwrap_or(format);
    if digits.is_empty() {
        return Ok((0, false));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PatternError::InvalidFormat(format.to_string()));
    }

    let zero_pad = digits.starts_with('0');
    let width = digits
        .parse()
        .map_err(|_| PatternError::InvalidFormat(format.to_string()))?;
    Ok((width, zero_pad))
}

/// Every name taken in the document, plus names handed out during the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedNames(HashSet<String>);

impl UsedNames {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Marks `name` as taken. Returns false if it already was.
    pub fn reserve(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for UsedNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for UsedNames {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Next suffix number to try, per base name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixCursor(HashMap<String, u32>);

impl SuffixCursor {
    pub fn get(&self, base: &str) -> Option<u32> {
        self.0.get(base).copied()
    }
}

/// Returns `base` if unused, otherwise the first `base + pattern(n)` not in
/// `used`, starting at the cursor for `base` (or `start_at` on first use).
///
/// The returned name is reserved in `used`. Blank bases are replaced by the
/// fallback name.
pub fn next_unique_name(
    base: &str,
    pattern: &SuffixPattern,
    used: &mut UsedNames,
    cursor: &mut SuffixCursor,
    start_at: u32,
) -> String {
    let base = if base.is_empty() { FALLBACK_NAME } else { base };

    if used.reserve(base) {
        return base.to_string();
    }

    let next = cursor.0.entry(base.to_string()).or_insert(start_at);
    let mut n = *next;
    loop {
        let candidate = format!("{}{}", base, pattern.render(n));
        if used.reserve(candidate.as_str()) {
            *next = n + 1;
            return candidate;
        }
        n += 1;
    }
}
