//! Extraction primitives shared by the locator and the class extractor.
//!
//! Markup lookups (header fields, summary-table rows) operate on a parsed
//! [`Html`] tree; text patterns operate on plain strings so they can be
//! tested without any markup around them.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::error::ExtractError;
use crate::model::{MethodParam, Modifier};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+((?-u:\w)+)").unwrap());
// The type token only takes closed bracket groups, so description text joined
// right after it (`Number[read-only] ...`) is not swallowed.
static PROPERTY_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?-u:\w)+)\s*:\s*((?-u:[\w.<>])+(?:\[[^\]\s]*\])*)").unwrap()
});
static METHOD_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?-u:\w)+)\((.*?)\)\s*:\s*((?-u:\w)+)").unwrap());
static ARRAY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\[[^\]]*\])+$").unwrap());

/// Outcome of a single extraction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    Found(T),
    /// The markup region the rule looks at does not exist.
    Absent,
    /// The region exists but its text does not fit the pattern; carries that text.
    Unmatched(String),
}

impl<T> Extracted<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Extracted::Found(v) => Some(v),
            Extracted::Absent | Extracted::Unmatched(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Found(v) => Extracted::Found(f(v)),
            Extracted::Absent => Extracted::Absent,
            Extracted::Unmatched(raw) => Extracted::Unmatched(raw),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Extracted<U>) -> Extracted<U> {
        match self {
            Extracted::Found(v) => f(v),
            Extracted::Absent => Extracted::Absent,
            Extracted::Unmatched(raw) => Extracted::Unmatched(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<MethodParam>,
    pub return_type: String,
}

pub fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::InvalidSelector(css.to_string()))
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn next_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Looks up a labelled header value: for every cell matched by `cells` whose
/// text contains `label`, the text of the following element is taken.
/// Values from several matching cells are joined in document order.
pub fn header_field(doc: &Html, cells: &Selector, label: &str) -> Extracted<String> {
    let mut seen_label = false;
    let mut value = String::new();
    for cell in doc.select(cells) {
        if !element_text(cell).contains(label) {
            continue;
        }
        seen_label = true;
        if let Some(next) = next_element(cell) {
            value.push_str(&element_text(next));
        }
    }

    if seen_label {
        Extracted::Found(value)
    } else {
        Extracted::Absent
    }
}

/// Body rows of the table with the given id; the header row is skipped.
/// A missing table yields no rows.
pub fn summary_rows<'a>(doc: &'a Html, table_id: &str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let rows = selector(&format!("#{table_id} tr"))?;
    Ok(doc.select(&rows).skip(1).collect())
}

pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn match_class_name(text: &str) -> Extracted<String> {
    match CLASS_NAME.captures(text) {
        Some(caps) => Extracted::Found(caps[1].to_string()),
        None => Extracted::Unmatched(text.trim().to_string()),
    }
}

/// Matches `name : type` in whitespace-normalized signature text.
pub fn match_property(text: &str) -> Extracted<PropertySignature> {
    match PROPERTY_SIGNATURE.captures(text) {
        Some(caps) => Extracted::Found(PropertySignature {
            name: caps[1].to_string(),
            type_name: strip_array_suffix(&caps[2]),
        }),
        None => Extracted::Unmatched(text.to_string()),
    }
}

/// Matches `name(params) : returnType` in raw signature text.
pub fn match_method(text: &str) -> Extracted<MethodSignature> {
    match METHOD_SIGNATURE.captures(text) {
        Some(caps) => Extracted::Found(MethodSignature {
            name: caps[1].to_string(),
            params: split_params(&caps[2]),
            return_type: caps[3].to_string(),
        }),
        None => Extracted::Unmatched(text.to_string()),
    }
}

/// Drops trailing `[...]` groups from a type token. Empty results become `None`.
pub fn strip_array_suffix(type_token: &str) -> Option<String> {
    let stripped = ARRAY_SUFFIX.replace(type_token, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

pub fn split_params(list: &str) -> Vec<MethodParam> {
    if list.trim().is_empty() {
        return Vec::new();
    }

    list.split(',')
        .map(|piece| {
            let mut parts = piece.split(':').map(str::trim);
            let name = parts.next().unwrap_or_default().to_string();
            let type_name = parts.next().map(str::to_string);
            MethodParam { name, type_name }
        })
        .collect()
}

/// Splits a `Self > Parent > Root` chain and returns the ancestors only.
pub fn split_chain(text: &str) -> Vec<String> {
    text.split('>')
        .map(str::trim)
        .skip(1)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn modifiers_in(text: &str) -> Vec<Modifier> {
    Modifier::ALL
        .into_iter()
        .filter(|m| text.contains(m.marker()))
        .collect()
}
