use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::Cli;

pub const DEFAULT_LISTING: &str = "all-classes.html";
pub const LISTING_ENV: &str = "ASDOC_JSON_LISTING";
pub const JOBS_ENV: &str = "ASDOC_JSON_JOBS";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub listing: String,
    pub clean: bool,
    pub jobs: Option<usize>,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            input_root: cli.input.clone(),
            output_root: cli.output.clone(),
            listing: resolve_listing(cli),
            clean: cli.clean,
            jobs: resolve_jobs(cli)?,
        })
    }

    pub fn listing_path(&self) -> PathBuf {
        self.input_root.join(&self.listing)
    }
}

pub fn resolve_listing(cli: &Cli) -> String {
    if let Some(name) = cli.listing.clone() {
        return name;
    }

    if let Ok(name) = env::var(LISTING_ENV)
        && !name.trim().is_empty()
    {
        return name;
    }

    DEFAULT_LISTING.to_string()
}

pub fn resolve_jobs(cli: &Cli) -> Result<Option<usize>> {
    if let Some(n) = cli.jobs {
        return Ok(Some(n.max(1)));
    }

    match env::var(JOBS_ENV) {
        Ok(raw) => {
            let n: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{JOBS_ENV} is not a number: {raw}"))?;
            Ok(Some(n.max(1)))
        }
        Err(_) => Ok(None),
    }
}

/// Fails unless the listing page exists.
pub fn check_listing(config: &RunConfig) -> Result<PathBuf> {
    let listing = config.listing_path();
    if !listing.is_file() {
        anyhow::bail!(
            "Missing {} in input folder: {}",
            config.listing,
            config.input_root.display()
        );
    }
    Ok(listing)
}

/// Makes sure the output root exists and is empty.
///
/// A non-empty root is an error unless `clean` is set, in which case its
/// contents are removed and the root itself is kept.
pub fn prepare_output_root(output_root: &Path, clean: bool) -> Result<()> {
    if !output_root.exists() {
        std::fs::create_dir_all(output_root).with_context(|| {
            format!("Failed to create output folder: {}", output_root.display())
        })?;
        return Ok(());
    }

    let entries: Vec<PathBuf> = std::fs::read_dir(output_root)
        .with_context(|| format!("Failed to read output folder: {}", output_root.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;

    if entries.is_empty() {
        return Ok(());
    }

    if !clean {
        anyhow::bail!(
            "Output folder \"{}\" is not empty. Use --clean to overwrite.",
            output_root.display()
        );
    }

    info!(output = %output_root.display(), "cleaning output folder");
    for path in entries {
        remove_path(&path)?;
    }
    Ok(())
}

fn remove_path(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.with_context(|| format!("Failed to remove: {}", path.display()))
}
