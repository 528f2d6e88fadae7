//! Include/exclude evaluation for file names.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

/// Compiled include/exclude patterns of a job.
///
/// Patterns match the file name only, ignoring case. Excludes always win;
/// an empty include list accepts everything that is not excluded.
#[derive(Debug, Clone)]
pub struct FileFilter {
    includes: Option<GlobSet>,
    excludes: GlobSet,
}

impl FileFilter {
    pub fn new(includes: &[String], excludes: &[String]) -> Result<Self> {
        let includes = if includes.is_empty() {
            None
        } else {
            Some(build_globset(includes)?)
        };
        Ok(Self {
            includes,
            excludes: build_globset(excludes)?,
        })
    }

    pub fn is_indexable(&self, filename: &str) -> bool {
        if self.excludes.is_match(filename) {
            return false;
        }
        match &self.includes {
            Some(set) => set.is_match(filename),
            None => true,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| Error::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })
}
