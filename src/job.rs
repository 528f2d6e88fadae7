//! Job definitions on disk.
//!
//! Every job has its own directory below the config dir. The directory
//! holds `_settings.toml` and, optionally, mapping overrides laid out as
//! `<major version>/<doc|folder>.json`. Bundled defaults live in `_default`.
//!
//! ```text
//! ~/.fscrawler/
//!   _default/5/doc.json
//!   docs/_settings.toml
//!   docs/5/doc.json        (override for job "docs")
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mapping::{self, JobMappings};
use crate::percentage::Percentage;
use crate::settings::Fs;
use crate::time_value::TimeValue;

pub const SETTINGS_FILE: &str = "_settings.toml";
pub const DEFAULT_MAPPINGS_DIR: &str = "_default";

/// Schema version used when neither the job nor the caller names one.
pub const DEFAULT_ES_VERSION: &str = "5";

/// A loaded crawl job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub fs: Fs,
    pub elasticsearch: ElasticsearchSettings,
    dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticsearchSettings {
    /// Backend version, either full (`"5.6.3"`) or major only (`"5"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ElasticsearchSettings {
    pub fn major_version(&self) -> Option<&str> {
        self.version.as_deref().map(mapping::major_version)
    }
}

#[derive(Debug, Deserialize)]
struct JobFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fs: FsSection,
    #[serde(default)]
    elasticsearch: ElasticsearchSettings,
}

#[derive(Debug, Default, Deserialize)]
struct FsSection {
    url: Option<String>,
    update_rate: Option<TimeValue>,
    includes: Option<Vec<String>>,
    excludes: Option<Vec<String>>,
    json_support: Option<bool>,
    filename_as_id: Option<bool>,
    add_filesize: Option<bool>,
    remove_deleted: Option<bool>,
    store_source: Option<bool>,
    index_content: Option<bool>,
    indexed_chars: Option<Percentage>,
    attributes_support: Option<bool>,
}

impl FsSection {
    fn into_fs(self) -> Fs {
        let mut builder = Fs::builder();

        if let Some(url) = self.url {
            builder.url(url);
        }
        if let Some(rate) = self.update_rate {
            builder.update_rate(rate);
        }
        if let Some(includes) = self.includes {
            builder.includes(Vec::new());
            for pattern in includes {
                builder.add_include(pattern);
            }
        }
        if let Some(excludes) = self.excludes {
            builder.excludes(Vec::new());
            for pattern in excludes {
                builder.add_exclude(pattern);
            }
        }
        if let Some(v) = self.json_support {
            builder.json_support(v);
        }
        if let Some(v) = self.filename_as_id {
            builder.filename_as_id(v);
        }
        if let Some(v) = self.add_filesize {
            builder.add_filesize(v);
        }
        if let Some(v) = self.remove_deleted {
            builder.remove_deleted(v);
        }
        if let Some(v) = self.store_source {
            builder.store_source(v);
        }
        if let Some(v) = self.index_content {
            builder.index_content(v);
        }
        if let Some(limit) = self.indexed_chars {
            builder.indexed_chars(limit);
        }
        if let Some(v) = self.attributes_support {
            builder.attributes_support(v);
        }

        builder.build()
    }
}

impl Job {
    /// The job's private mapping root.
    pub fn mapping_dir(&self) -> &Path {
        &self.dir
    }

    /// Schema version to resolve: `requested` if given, else the job's
    /// configured backend version, else [`DEFAULT_ES_VERSION`].
    pub fn schema_version<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(mapping::major_version)
            .or_else(|| self.elasticsearch.major_version())
            .unwrap_or(DEFAULT_ES_VERSION)
    }

    /// Resolve both mappings for this job against the bundled defaults of
    /// `config_dir`.
    pub fn mappings(&self, config_dir: &Path, requested: Option<&str>) -> Result<JobMappings> {
        mapping::resolve_job_mappings(
            &self.dir,
            &bundled_root(config_dir),
            self.schema_version(requested),
        )
    }
}

/// Directory holding the bundled default mappings.
pub fn bundled_root(config_dir: &Path) -> PathBuf {
    config_dir.join(DEFAULT_MAPPINGS_DIR)
}

pub fn job_dir(config_dir: &Path, name: &str) -> PathBuf {
    config_dir.join(name)
}

/// Load `<config_dir>/<name>/_settings.toml`.
pub fn load_job(config_dir: &Path, name: &str) -> Result<Job> {
    let dir = job_dir(config_dir, name);
    let path = dir.join(SETTINGS_FILE);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::Config(format!(
                "job [{}] has no settings file at {}",
                name,
                path.display()
            )))
        }
        Err(e) => return Err(Error::io(&path, e)),
    };

    debug!(job = name, path = %path.display(), "loading job settings");
    parse_job(&content, name, dir)
}

/// Parse a job definition. `name` is used when the file does not set one.
pub fn parse_job(content: &str, name: &str, dir: PathBuf) -> Result<Job> {
    let file: JobFile = toml::from_str(content)
        .map_err(|e| Error::Config(format!("failed to parse settings for job [{}]: {}", name, e)))?;

    let job_name = match file.name {
        Some(declared) if declared != name => {
            warn!(
                job = name,
                declared = %declared,
                "settings declare a different job name; using the declared one"
            );
            declared
        }
        Some(declared) => declared,
        None => name.to_string(),
    };

    let fs = file.fs.into_fs();
    if !fs.index_content() && fs.indexed_chars().is_some() {
        warn!(
            job = %job_name,
            "indexed_chars is set but index_content is disabled; the limit has no effect"
        );
    }

    Ok(Job {
        name: job_name,
        fs,
        elasticsearch: file.elasticsearch,
        dir,
    })
}

/// Default location of job definitions, before tilde expansion.
pub const DEFAULT_CONFIG_DIR: &str = "~/.fscrawler";

/// Resolve a `--config-dir` value, expanding a leading `~` against `$HOME`.
///
/// Without `$HOME` the path is returned unchanged.
pub fn expand_tilde(config_dir: &Path) -> PathBuf {
    expand_with_home(config_dir, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_with_home(config_dir: &Path, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return config_dir.to_path_buf();
    };
    match config_dir.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => config_dir.to_path_buf(),
    }
}
