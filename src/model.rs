use serde::{Deserialize, Serialize};

/// A class entry found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReference {
    pub relative_href: String,
    pub class_name: String,
    pub package: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    Override,
    WriteOnly,
    ReadOnly,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::Override, Modifier::WriteOnly, Modifier::ReadOnly];

    /// Literal marker the generator renders next to the member.
    pub fn marker(self) -> &'static str {
        match self {
            Modifier::Override => "[override]",
            Modifier::WriteOnly => "[write-only]",
            Modifier::ReadOnly => "[read-only]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub visibility: Visibility,
    pub modifiers: Vec<Modifier>,
    pub has_asdoc: bool,
    pub asdoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSummary {
    pub name: Option<String>,
    pub return_type: Option<String>,
    pub params: Vec<MethodParam>,
    pub visibility: Visibility,
    pub has_asdoc: bool,
    pub asdoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub package: String,
    pub inheritance: Vec<String>,
    pub properties: Vec<PropertySummary>,
    pub methods: Vec<MethodSummary>,
}

/// Splits description text into the `(hasAsdoc, asdoc)` pair stored on members.
pub fn asdoc_fields(text: &str) -> (bool, Option<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        (false, None)
    } else {
        (true, Some(trimmed.to_string()))
    }
}
