use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::model::ClassReference;

static CLASS_LINKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td > a").unwrap());

/// Enumerates the class pages linked from the listing page, in document order.
///
/// Anchors without an `href`, or whose `title` does not resolve to both a
/// package and a class name, are skipped.
pub fn locate_classes(listing_html: &str) -> Vec<ClassReference> {
    let doc = Html::parse_document(listing_html);

    doc.select(&CLASS_LINKS)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href").map(str::trim).unwrap_or_default();
            let title = anchor.value().attr("title").map(str::trim).unwrap_or_default();
            let (package, class_name) = split_qualified_name(title);

            if href.is_empty() || class_name.is_empty() || package.is_empty() {
                debug!(href, title, "skipping unresolvable listing entry");
                return None;
            }

            Some(ClassReference {
                relative_href: href.to_string(),
                class_name: class_name.to_string(),
                package: package.to_string(),
            })
        })
        .collect()
}

/// Splits `a.b.C` into `("a.b", "C")`; a bare name has an empty package.
pub fn split_qualified_name(title: &str) -> (&str, &str) {
    match title.rsplit_once('.') {
        Some((package, class_name)) => (package, class_name),
        None => ("", title),
    }
}
