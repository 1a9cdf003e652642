use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::ClassRecord;
use crate::tree::ContentTree;

pub const CONTENT_TREE_FILE: &str = "contentTree.json";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Persists class records and the final content tree.
pub trait RecordSink: Sync {
    fn put_record(&self, relative_output: &str, record: &ClassRecord) -> Result<()>;
    fn put_tree(&self, tree: &ContentTree) -> Result<()>;
}

/// Output location of a class record: package segments as directories.
pub fn record_output_path(package: &str, class_name: &str) -> String {
    let mut parts: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    let file_name = format!("{class_name}.json");
    parts.push(&file_name);
    parts.join("/")
}

#[derive(Debug, Clone)]
pub struct FsRecordSink {
    root: PathBuf,
}

impl FsRecordSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        confined_join(&self.root, relative)
    }
}

impl RecordSink for FsRecordSink {
    fn put_record(&self, relative_output: &str, record: &ClassRecord) -> Result<()> {
        write_json(&self.resolve(relative_output), record)
    }

    fn put_tree(&self, tree: &ContentTree) -> Result<()> {
        write_json(&self.root.join(CONTENT_TREE_FILE), tree)
    }
}

/// Joins `relative` onto `root`, keeping only plain path segments so the
/// result never leaves `root`.
pub fn confined_join(root: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|seg| matches!(Path::new(seg).components().next(), Some(Component::Normal(_))))
        .fold(root.to_path_buf(), |acc, seg| acc.join(seg))
}

/// Writes pretty JSON through a sibling temp file and renames it into place.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    // Each write gets its own temp file; duplicate records may be written concurrently.
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut tmp_os = path.as_os_str().to_os_string();
    tmp_os.push(format!(".{}.{seq}.tmp", std::process::id()));
    let tmp = PathBuf::from(tmp_os);
    std::fs::write(&tmp, content)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move file into place: {}", path.display()))?;
    Ok(())
}
