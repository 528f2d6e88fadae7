//! Crawl job settings.
//!
//! [`Fs`] is an immutable snapshot of every per-job crawl option. It is only
//! produced by [`FsBuilder::build`], which copies the builder state so that a
//! builder kept around after `build()` can never reach into a snapshot
//! already handed to crawl workers.
//!
//! ```
//! use fs_crawler::settings::Fs;
//! use fs_crawler::time_value::TimeValue;
//!
//! let fs = Fs::builder()
//!     .url("/data/docs")
//!     .update_rate(TimeValue::minutes(5))
//!     .add_include("*.pdf")
//!     .add_include("*.pdf")
//!     .build();
//!
//! assert_eq!(fs.includes(), Some(&["*.pdf".to_string()][..]));
//! ```

use serde::Serialize;

use crate::filter::FileFilter;
use crate::percentage::Percentage;
use crate::time_value::TimeValue;
use crate::Result;

/// Directory scanned when a job does not name one.
pub const DEFAULT_DIR: &str = "/tmp/es";

/// Interval between two scans when a job does not name one.
pub const DEFAULT_UPDATE_RATE: TimeValue = TimeValue::minutes(15);

/// Immutable crawl settings for one job.
///
/// Two snapshots are equal (and hash equally) only when every field is equal;
/// an unset pattern list is distinct from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fs {
    url: String,
    update_rate: TimeValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    includes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excludes: Option<Vec<String>>,
    json_support: bool,
    filename_as_id: bool,
    add_filesize: bool,
    remove_deleted: bool,
    store_source: bool,
    index_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    indexed_chars: Option<Percentage>,
    attributes_support: bool,
}

impl Fs {
    pub fn builder() -> FsBuilder {
        FsBuilder::new()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn update_rate(&self) -> TimeValue {
        self.update_rate
    }

    pub fn includes(&self) -> Option<&[String]> {
        self.includes.as_deref()
    }

    pub fn excludes(&self) -> Option<&[String]> {
        self.excludes.as_deref()
    }

    pub fn json_support(&self) -> bool {
        self.json_support
    }

    pub fn filename_as_id(&self) -> bool {
        self.filename_as_id
    }

    pub fn add_filesize(&self) -> bool {
        self.add_filesize
    }

    pub fn remove_deleted(&self) -> bool {
        self.remove_deleted
    }

    pub fn store_source(&self) -> bool {
        self.store_source
    }

    pub fn index_content(&self) -> bool {
        self.index_content
    }

    pub fn indexed_chars(&self) -> Option<Percentage> {
        self.indexed_chars
    }

    pub fn attributes_support(&self) -> bool {
        self.attributes_support
    }

    /// Compile the include/exclude patterns into a matcher.
    pub fn file_filter(&self) -> Result<FileFilter> {
        FileFilter::new(
            self.includes.as_deref().unwrap_or_default(),
            self.excludes.as_deref().unwrap_or_default(),
        )
    }
}

impl Default for Fs {
    /// Settings used when a job only says "crawl something": [`DEFAULT_DIR`]
    /// every [`DEFAULT_UPDATE_RATE`].
    fn default() -> Self {
        Fs::builder().build()
    }
}

/// Mutable accumulator for [`Fs`].
///
/// Setters never fail and perform no cross-field validation. A builder can
/// be reused after `build()`; later changes do not affect earlier snapshots.
#[derive(Debug, Clone)]
pub struct FsBuilder {
    url: String,
    update_rate: TimeValue,
    includes: Option<Vec<String>>,
    excludes: Option<Vec<String>>,
    json_support: bool,
    filename_as_id: bool,
    add_filesize: bool,
    remove_deleted: bool,
    store_source: bool,
    index_content: bool,
    indexed_chars: Option<Percentage>,
    attributes_support: bool,
}

impl Default for FsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBuilder {
    pub fn new() -> Self {
        Self {
            url: DEFAULT_DIR.to_string(),
            update_rate: DEFAULT_UPDATE_RATE,
            includes: None,
            excludes: None,
            json_support: false,
            filename_as_id: false,
            add_filesize: true,
            remove_deleted: true,
            store_source: false,
            index_content: true,
            indexed_chars: None,
            attributes_support: false,
        }
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    pub fn update_rate(&mut self, update_rate: TimeValue) -> &mut Self {
        self.update_rate = update_rate;
        self
    }

    /// Replace the include patterns wholesale. Duplicates are kept as given.
    pub fn includes(&mut self, includes: Vec<String>) -> &mut Self {
        self.includes = Some(includes);
        self
    }

    /// Append an include pattern unless it is already present.
    pub fn add_include(&mut self, pattern: impl Into<String>) -> &mut Self {
        push_unique(&mut self.includes, pattern.into());
        self
    }

    /// Replace the exclude patterns wholesale. Duplicates are kept as given.
    pub fn excludes(&mut self, excludes: Vec<String>) -> &mut Self {
        self.excludes = Some(excludes);
        self
    }

    /// Append an exclude pattern unless it is already present.
    pub fn add_exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        push_unique(&mut self.excludes, pattern.into());
        self
    }

    pub fn json_support(&mut self, enabled: bool) -> &mut Self {
        self.json_support = enabled;
        self
    }

    pub fn filename_as_id(&mut self, enabled: bool) -> &mut Self {
        self.filename_as_id = enabled;
        self
    }

    pub fn add_filesize(&mut self, enabled: bool) -> &mut Self {
        self.add_filesize = enabled;
        self
    }

    pub fn remove_deleted(&mut self, enabled: bool) -> &mut Self {
        self.remove_deleted = enabled;
        self
    }

    pub fn store_source(&mut self, enabled: bool) -> &mut Self {
        self.store_source = enabled;
        self
    }

    pub fn index_content(&mut self, enabled: bool) -> &mut Self {
        self.index_content = enabled;
        self
    }

    pub fn indexed_chars(&mut self, limit: Percentage) -> &mut Self {
        self.indexed_chars = Some(limit);
        self
    }

    pub fn attributes_support(&mut self, enabled: bool) -> &mut Self {
        self.attributes_support = enabled;
        self
    }

    pub fn build(&self) -> Fs {
        Fs {
            url: self.url.clone(),
            update_rate: self.update_rate,
            includes: self.includes.clone(),
            excludes: self.excludes.clone(),
            json_support: self.json_support,
            filename_as_id: self.filename_as_id,
            add_filesize: self.add_filesize,
            remove_deleted: self.remove_deleted,
            store_source: self.store_source,
            index_content: self.index_content,
            indexed_chars: self.indexed_chars,
            attributes_support: self.attributes_support,
        }
    }
}

fn push_unique(list: &mut Option<Vec<String>>, pattern: String) {
    let list = list.get_or_insert_with(Vec::new);
    if !list.contains(&pattern) {
        list.push(pattern);
    }
}
