//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

const MARKER: &str = "---";

/// A single front-matter value
///
/// Values are typed by a fixed set of heuristics rather than a YAML parser,
/// see [`FrontValue::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontValue {
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Str(String),
}

impl FrontValue {
    /// Type a raw value string.
    ///
    /// Applied in order: `[a, b]` lists, `true`/`false`, all-digit integers,
    /// and finally plain strings with surrounding quotes removed.
    ///
    /// Empty list items are kept (`[a,,b]` has three items); only a blank
    /// `[]` yields an empty list.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
            let inner = &raw[1..raw.len() - 1];
            if inner.trim().is_empty() {
                return FrontValue::List(Vec::new());
            }
            let items = inner
                .split(',')
                .map(|item| strip_quotes(item.trim()).to_string())
                .collect();
            return FrontValue::List(items);
        }

        match raw {
            "true" => return FrontValue::Bool(true),
            "false" => return FrontValue::Bool(false),
            _ => {}
        }

        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return FrontValue::Int(n);
            }
        }

        FrontValue::Str(strip_quotes(raw).to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FrontValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Scalar text form of a string or integer value
    pub fn as_text(&self) -> Option<String> {
        match self {
            FrontValue::Str(s) => Some(s.clone()),
            FrontValue::Int(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for FrontValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontValue::Bool(b) => write!(f, "{}", b),
            FrontValue::Int(n) => write!(f, "{}", n),
            FrontValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FrontValue::Str(s) => {
                // Quote strings that would otherwise be re-typed on the way back in
                if FrontValue::parse(s) == FrontValue::Str(s.clone()) && s.trim() == s {
                    f.write_str(s)
                } else {
                    write!(f, "\"{}\"", s)
                }
            }
        }
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontValue>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// The block must open on the very first line with `---` and close on
    /// the next line that is exactly `---` followed by a line break. The body
    /// after a block is trimmed. Without that pair the whole input is the
    /// body, unchanged.
    pub fn parse(content: &str) -> (Self, &str) {
        match split_block(content) {
            Some((block, body)) => (Self::parse_block(block), body.trim()),
            None => (FrontMatter::default(), content),
        }
    }

    fn parse_block(block: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), FrontValue::parse(value));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Non-empty string field
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(FrontValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Non-empty string or integer field as text
    pub fn text_field(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(FrontValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Serialize back into a `---` delimited block
    pub fn to_block(&self) -> String {
        let mut out = String::from(MARKER);
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str(MARKER);
        out.push('\n');
        out
    }
}

/// Split `content` into the raw block text and everything after the closing marker
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (first, rest) = next_line(content)?;
    if first != MARKER {
        return None;
    }

    let mut offset = 0;
    let mut remaining = rest;
    while let Some((line, after)) = next_line(remaining) {
        let consumed = remaining.len() - after.len();
        // The closing marker needs its own line break
        if line == MARKER && remaining[..consumed].ends_with('\n') {
            return Some((&rest[..offset], after));
        }
        offset += consumed;
        remaining = after;
    }

    None
}

/// Returns the next line (without `\r\n`/`\n`) and the text after it
fn next_line(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    let (line, rest) = match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    };
    Some((line.strip_suffix('\r').unwrap_or(line), rest))
}

/// Strip a single leading and a single trailing quote character
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}
