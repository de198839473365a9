use std::path::{Path, PathBuf};

use crate::copier::CopyOutcome;

/// Outcome counters for one extension.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ExtensionStats {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes_copied: u64,
}

impl ExtensionStats {
    pub fn record(&mut self, outcome: &CopyOutcome) {
        match outcome {
            CopyOutcome::Copied { bytes } => {
                self.copied += 1;
                self.bytes_copied += bytes;
            }
            CopyOutcome::Skipped => self.skipped += 1,
            CopyOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.copied + self.skipped + self.failed
    }
}

impl std::ops::Add for ExtensionStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            copied: self.copied + rhs.copied,
            skipped: self.skipped + rhs.skipped,
            failed: self.failed + rhs.failed,
            bytes_copied: self.bytes_copied + rhs.bytes_copied,
        }
    }
}

impl std::iter::Sum for ExtensionStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, stats| acc + stats)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ExtensionSummary {
    pub extension: String,
    pub found: usize,
    pub destination: Option<PathBuf>,
    pub stats: ExtensionStats,
}

/// Everything the final screen shows, also written out by `--report`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Summary {
    pub source: PathBuf,
    pub extensions: Vec<ExtensionSummary>,
    pub total: ExtensionStats,
}

impl Summary {
    pub fn new(source: PathBuf, extensions: Vec<ExtensionSummary>) -> Self {
        let total: ExtensionStats = extensions.iter().map(|summary| summary.stats).sum();
        Self {
            source,
            extensions,
            total,
        }
    }

    pub fn to_file(&self, dest: &Path) -> crate::error::Result<()> {
        let out_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(dest)
            .map_err(|source| crate::error::Error::Io {
                path: dest.to_owned(),
                when: "opening report file",
                source,
            })?;
        serde_json::to_writer_pretty(out_file, self)?;
        Ok(())
    }
}
