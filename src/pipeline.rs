use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{RunConfig, check_listing, prepare_output_root};
use crate::error::SourceError;
use crate::extract::extract_class;
use crate::locate::locate_classes;
use crate::model::ClassReference;
use crate::sink::{FsRecordSink, RecordSink, record_output_path};
use crate::source::{DocumentSource, FsDocumentSource};
use crate::tree::ContentTree;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Missing,
    Unreadable,
    Unparsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedClass {
    pub href: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassOutcome {
    Written {
        package: String,
        class_name: String,
        output_path: String,
    },
    Skipped(SkippedClass),
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub references: usize,
    pub written: usize,
    pub skipped: Vec<SkippedClass>,
    pub packages: usize,
    pub duration_ms: u64,
}

/// Reads, extracts and stores one class page.
///
/// Missing, unreadable or unparseable pages are reported as skipped; only a
/// failing sink is an error.
pub fn process_reference(
    reference: &ClassReference,
    source: &dyn DocumentSource,
    sink: &dyn RecordSink,
) -> Result<ClassOutcome> {
    let href = reference.relative_href.as_str();
    let skipped = |reason| {
        ClassOutcome::Skipped(SkippedClass {
            href: href.to_string(),
            reason,
        })
    };

    let html = match source.read(href) {
        Ok(html) => html,
        Err(SourceError::NotFound(_)) => {
            warn!(href, "Skipping missing class file");
            return Ok(skipped(SkipReason::Missing));
        }
        Err(e) => {
            warn!(href, error = %e, "Skipping unreadable class file");
            return Ok(skipped(SkipReason::Unreadable));
        }
    };

    let record = match extract_class(&html) {
        Ok(record) => record,
        Err(e) => {
            warn!(href, error = %e, "Failed to parse");
            return Ok(skipped(SkipReason::Unparsed));
        }
    };

    let output_path = record_output_path(&reference.package, &reference.class_name);
    sink.put_record(&output_path, &record)
        .with_context(|| format!("Failed to write record for {href}"))?;
    debug!(href, output = %output_path, "class written");

    Ok(ClassOutcome::Written {
        package: reference.package.clone(),
        class_name: reference.class_name.clone(),
        output_path,
    })
}

/// Converts every class linked from `listing_html` and writes the content tree.
pub fn convert(
    listing_html: &str,
    source: &dyn DocumentSource,
    sink: &dyn RecordSink,
    jobs: Option<usize>,
) -> Result<RunSummary> {
    let start = Instant::now();
    let references = locate_classes(listing_html);
    info!(count = references.len(), "class references located");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;
    let outcomes: Vec<ClassOutcome> = pool.install(|| {
        references
            .par_iter()
            .map(|reference| process_reference(reference, source, sink))
            .collect::<Result<Vec<_>>>()
    })?;

    let (tree, skipped) = fold_outcomes(outcomes);
    sink.put_tree(&tree).context("Failed to write content tree")?;

    if !skipped.is_empty() {
        warn!(skipped = skipped.len(), "some classes were skipped");
    }

    Ok(RunSummary {
        references: references.len(),
        written: tree.len(),
        skipped,
        packages: tree.package_count(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

pub fn fold_outcomes(outcomes: Vec<ClassOutcome>) -> (ContentTree, Vec<SkippedClass>) {
    let mut tree = ContentTree::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            ClassOutcome::Written {
                package,
                class_name,
                output_path,
            } => {
                tree.insert(package, class_name, output_path);
            }
            ClassOutcome::Skipped(s) => skipped.push(s),
        }
    }
    (tree, skipped)
}

/// Full filesystem run: precondition checks, conversion, content tree.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let listing_path = check_listing(config)?;
    prepare_output_root(&config.output_root, config.clean)?;

    let listing_bytes = std::fs::read(&listing_path)
        .with_context(|| format!("Failed to read listing: {}", listing_path.display()))?;
    let listing_html = String::from_utf8_lossy(&listing_bytes);

    let source = FsDocumentSource::new(&config.input_root);
    let sink = FsRecordSink::new(&config.output_root);
    let summary = convert(&listing_html, &source, &sink, config.jobs)?;

    info!(
        written = summary.written,
        skipped = summary.skipped.len(),
        duration_ms = summary.duration_ms,
        "JSON export complete"
    );
    Ok(summary)
}
