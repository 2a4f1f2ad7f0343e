//! SIGMA string values with wildcard and placeholder support.
//!
//! Rule values use `*` for multi-character wildcards and `?` for
//! single-character wildcards. Backslash escapes `*`, `?` and itself; before
//! any other character it is kept literally so Windows paths such as
//! `C:\Windows\` survive parsing untouched.

use crate::error::{ModifierError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Wildcard characters that can appear in a [`SigmaString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecialChar {
    /// Multi-character wildcard (`*`)
    WildcardMulti,
    /// Single-character wildcard (`?`)
    WildcardSingle,
}

impl SpecialChar {
    pub fn as_char(self) -> char {
        match self {
            SpecialChar::WildcardMulti => '*',
            SpecialChar::WildcardSingle => '?',
        }
    }
}

/// Named placeholder (`%name%`) resolved by a later processing stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}%", self.name)
    }
}

/// One part of a [`SigmaString`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StringPart {
    Plain(String),
    Special(SpecialChar),
    Placeholder(Placeholder),
}

/// A SIGMA string value split into plain text, wildcards and placeholders.
///
/// Equality only considers the parts; the original text is kept so the
/// `re` modifier can recover exactly what the rule author wrote.
#[derive(Debug, Clone, Serialize)]
pub struct SigmaString {
    parts: Vec<StringPart>,
    original: String,
}

const PLACEHOLDER_PATTERN: &str = r"%(\w+)%";

fn placeholder_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN))
        .as_ref()
        .map_err(|e| ModifierError::InvalidRegex {
            pattern: PLACEHOLDER_PATTERN.to_string(),
            reason: e.to_string(),
        })
}

impl SigmaString {
    /// Parse a string, interpreting `*` and `?` as wildcards and `\` as escape.
    pub fn new(s: &str) -> Self {
        let mut parts: Vec<StringPart> = Vec::new();
        let mut acc = String::new();
        let mut escaped = false;

        for c in s.chars() {
            if escaped {
                if !matches!(c, '*' | '?' | '\\') {
                    acc.push('\\');
                }
                acc.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if let Some(special) = match c {
                '*' => Some(SpecialChar::WildcardMulti),
                '?' => Some(SpecialChar::WildcardSingle),
                _ => None,
            } {
                if !acc.is_empty() {
                    parts.push(StringPart::Plain(std::mem::take(&mut acc)));
                }
                parts.push(StringPart::Special(special));
            } else {
                acc.push(c);
            }
        }

        if escaped {
            acc.push('\\');
        }
        if !acc.is_empty() {
            parts.push(StringPart::Plain(acc));
        }

        SigmaString {
            parts,
            original: s.to_string(),
        }
    }

    /// Build a string from parts. Adjacent plain parts are merged and empty
    /// ones dropped; the original text becomes the canonical rendering.
    pub fn from_parts(parts: impl IntoIterator<Item = StringPart>) -> Self {
        let mut merged: Vec<StringPart> = Vec::new();
        for part in parts {
            match part {
                StringPart::Plain(s) if s.is_empty() => {}
                StringPart::Plain(s) => match merged.last_mut() {
                    Some(StringPart::Plain(prev)) => prev.push_str(&s),
                    _ => merged.push(StringPart::Plain(s)),
                },
                other => merged.push(other),
            }
        }

        let original = render(&merged);
        SigmaString {
            parts: merged,
            original,
        }
    }

    pub fn parts(&self) -> &[StringPart] {
        &self.parts
    }

    /// Text the string was parsed from, or its canonical rendering.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Length in characters, counting each wildcard as one.
    pub fn len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                StringPart::Plain(s) => s.chars().count(),
                StringPart::Special(_) => 1,
                StringPart::Placeholder(p) => p.name.chars().count() + 2,
            })
            .sum()
    }

    pub fn starts_with_wildcard(&self) -> bool {
        matches!(
            self.parts.first(),
            Some(StringPart::Special(SpecialChar::WildcardMulti))
        )
    }

    pub fn ends_with_wildcard(&self) -> bool {
        matches!(
            self.parts.last(),
            Some(StringPart::Special(SpecialChar::WildcardMulti))
        )
    }

    pub fn prepend_wildcard(self) -> Self {
        let mut parts = Vec::with_capacity(self.parts.len() + 1);
        parts.push(StringPart::Special(SpecialChar::WildcardMulti));
        parts.extend(self.parts);
        SigmaString::from_parts(parts)
    }

    pub fn append_wildcard(self) -> Self {
        let mut parts = self.parts;
        parts.push(StringPart::Special(SpecialChar::WildcardMulti));
        SigmaString::from_parts(parts)
    }

    /// Returns `true` if any wildcard or placeholder part is present.
    pub fn contains_special(&self) -> bool {
        self.parts
            .iter()
            .any(|p| !matches!(p, StringPart::Plain(_)))
    }

    pub fn contains_placeholder(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, StringPart::Placeholder(_)))
    }

    /// Get the plain string content. Returns `None` if special parts are present.
    pub fn as_plain(&self) -> Option<String> {
        if self.contains_special() {
            return None;
        }
        Some(self.literal_text())
    }

    /// UTF-8 bytes of the unescaped text.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.literal_text().into_bytes()
    }

    /// Replace every `%name%` token in plain text with a placeholder part.
    pub fn insert_placeholders(self) -> Result<Self> {
        let pattern = placeholder_pattern()?;
        let mut parts = Vec::with_capacity(self.parts.len());

        for part in self.parts {
            let text = match part {
                StringPart::Plain(text) => text,
                other => {
                    parts.push(other);
                    continue;
                }
            };

            let mut last = 0;
            for caps in pattern.captures_iter(&text) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                parts.push(StringPart::Plain(text[last..whole.start()].to_string()));
                parts.push(StringPart::Placeholder(Placeholder {
                    name: name.as_str().to_string(),
                }));
                last = whole.end();
            }
            parts.push(StringPart::Plain(text[last..].to_string()));
        }

        Ok(SigmaString::from_parts(parts))
    }

    fn literal_text(&self) -> String {
        let mut out = String::with_capacity(self.original.len());
        for part in &self.parts {
            match part {
                StringPart::Plain(s) => out.push_str(s),
                StringPart::Special(c) => out.push(c.as_char()),
                StringPart::Placeholder(p) => out.push_str(&p.to_string()),
            }
        }
        out
    }
}

fn render(parts: &[StringPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            StringPart::Plain(s) => {
                for c in s.chars() {
                    if matches!(c, '*' | '?' | '\\') {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
            StringPart::Special(c) => out.push(c.as_char()),
            StringPart::Placeholder(p) => out.push_str(&p.to_string()),
        }
    }
    out
}

impl PartialEq for SigmaString {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for SigmaString {}

impl fmt::Display for SigmaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl From<&str> for SigmaString {
    fn from(s: &str) -> Self {
        SigmaString::new(s)
    }
}
