use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ExtractError;
use crate::model::{ClassRecord, MethodSummary, PropertySummary, Visibility, asdoc_fields};
use crate::rules::{
    Extracted, element_text, has_class, header_field, match_class_name, match_method,
    match_property, modifiers_in, next_element, normalize_whitespace, split_chain,
    strip_whitespace, summary_rows,
};

pub const PUBLIC_PROPERTY_TABLE: &str = "summaryTableProperty";
pub const PROTECTED_PROPERTY_TABLE: &str = "summaryTableProtectedProperty";
pub const PUBLIC_METHOD_TABLE: &str = "summaryTableMethod";
pub const PROTECTED_METHOD_TABLE: &str = "summaryTableProtectedMethod";

const DESCRIPTION_CLASS: &str = "summaryTableDescription";

static HEADER_CELLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".classHeaderTable td").unwrap());
static HEADER_LABELS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".classHeaderTableLabel").unwrap());
static INHERITANCE_CELLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.inheritanceList").unwrap());
static PROPERTY_SIGNATURE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".summaryTableSignatureCol").unwrap());
static METHOD_SIGNATURE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".summarySignature").unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".summaryTableDescription").unwrap());

/// Parses one class page into a [`ClassRecord`].
///
/// Fails only when the class header carries no `class <Name>` signature;
/// every other missing region degrades to an empty or `null` field.
pub fn extract_class(html: &str) -> Result<ClassRecord, ExtractError> {
    let doc = Html::parse_document(html);

    let name = class_name(&doc).found().ok_or(ExtractError::MissingClassSignature)?;
    let package = package_name(&doc).found().unwrap_or_default();
    let inheritance = inheritance_chain(&doc);

    let mut properties = extract_properties(&doc, PUBLIC_PROPERTY_TABLE, Visibility::Public)?;
    properties.extend(extract_properties(
        &doc,
        PROTECTED_PROPERTY_TABLE,
        Visibility::Protected,
    )?);

    let mut methods = extract_methods(&doc, PUBLIC_METHOD_TABLE, Visibility::Public)?;
    methods.extend(extract_methods(
        &doc,
        PROTECTED_METHOD_TABLE,
        Visibility::Protected,
    )?);

    Ok(ClassRecord {
        name,
        package,
        inheritance,
        properties,
        methods,
    })
}

pub fn class_name(doc: &Html) -> Extracted<String> {
    header_field(doc, &HEADER_CELLS, "Class").and_then(|text| match_class_name(&text))
}

pub fn package_name(doc: &Html) -> Extracted<String> {
    header_field(doc, &HEADER_LABELS, "Package").map(|text| strip_whitespace(&text))
}

pub fn inheritance_chain(doc: &Html) -> Vec<String> {
    doc.select(&INHERITANCE_CELLS)
        .flat_map(|cell| split_chain(&element_text(cell)))
        .collect()
}

pub fn extract_properties(
    doc: &Html,
    table_id: &str,
    visibility: Visibility,
) -> Result<Vec<PropertySummary>, ExtractError> {
    let rows = summary_rows(doc, table_id)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| property_row(row, visibility))
        .collect())
}

fn property_row(row: ElementRef<'_>, visibility: Visibility) -> Option<PropertySummary> {
    let cell = row.select(&PROPERTY_SIGNATURE_CELL).next()?;
    let text = normalize_whitespace(&element_text(cell));

    let signature = match match_property(&text) {
        Extracted::Found(sig) => Some(sig),
        other => {
            debug!(?other, "property signature did not match");
            None
        }
    };
    let description: String = cell.select(&DESCRIPTION).map(element_text).collect();
    let (has_asdoc, asdoc) = asdoc_fields(&description);

    let (name, type_name) = match signature {
        Some(sig) => (Some(sig.name), sig.type_name),
        None => (None, None),
    };

    Some(PropertySummary {
        name,
        type_name,
        visibility,
        modifiers: modifiers_in(&text),
        has_asdoc,
        asdoc,
    })
}

pub fn extract_methods(
    doc: &Html,
    table_id: &str,
    visibility: Visibility,
) -> Result<Vec<MethodSummary>, ExtractError> {
    let rows = summary_rows(doc, table_id)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| method_row(row, visibility))
        .collect())
}

// Rows whose signature does not match stay in the output as placeholders so
// that row order and count follow the source table.
fn method_row(row: ElementRef<'_>, visibility: Visibility) -> Option<MethodSummary> {
    let signature_el = row.select(&METHOD_SIGNATURE).next()?;
    let raw = element_text(signature_el);

    let description = next_element(signature_el)
        .filter(|el| has_class(*el, DESCRIPTION_CLASS))
        .map(element_text)
        .unwrap_or_default();
    let (has_asdoc, asdoc) = asdoc_fields(&description);

    let summary = match match_method(raw.trim()) {
        Extracted::Found(sig) => MethodSummary {
            name: Some(sig.name),
            return_type: Some(sig.return_type),
            params: sig.params,
            visibility,
            has_asdoc,
            asdoc,
        },
        other => {
            debug!(?other, "method signature did not match, keeping placeholder");
            MethodSummary {
                name: None,
                return_type: None,
                params: Vec::new(),
                visibility,
                has_asdoc,
                asdoc,
            }
        }
    };

    Some(summary)
}
