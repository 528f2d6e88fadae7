//! Versioned index mapping resolution.
//!
//! Mapping documents are opaque schema text laid out as
//! `<root>/<major version>/<doc|folder>.json`. Two roots are searched in
//! precedence order:
//!
//! ```text
//! <job dir>/2/doc.json         (job override, wins)
//! <config dir>/_default/2/doc.json   (bundled default)
//! ```
//!
//! The version is an exact token. There is no fallback to a nearby version:
//! a version without a resource in either root is unsupported, even when
//! other versions are present. Nothing is cached; every call reads the
//! store again.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// The two document shapes a crawl job sends to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    /// One document per indexed file.
    Doc,
    /// One document per indexed directory.
    Folder,
}

impl DocKind {
    pub const ALL: [DocKind; 2] = [DocKind::Doc, DocKind::Folder];

    pub fn name(self) -> &'static str {
        match self {
            DocKind::Doc => "doc",
            DocKind::Folder => "folder",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Resolution
// ═══════════════════════════════════════════════════════════════════════

/// Return the mapping text for `kind` at schema `version`.
///
/// `job_root` is checked first, then `bundled_root`. A resource that exists
/// but cannot be read is an [`Error::Io`], never reported as an unsupported
/// version.
pub fn read_mapping(
    job_root: &Path,
    bundled_root: &Path,
    version: &str,
    kind: DocKind,
) -> Result<String> {
    let unsupported = || Error::UnsupportedVersion {
        version: version.to_string(),
        kind,
    };

    if !is_version_token(version) {
        return Err(unsupported());
    }

    for (origin, root) in [("job", job_root), ("default", bundled_root)] {
        let path = resource_path(root, version, kind);
        if let Some(mapping) = read_if_present(&path)? {
            debug!(
                version,
                kind = %kind,
                origin,
                path = %path.display(),
                "resolved mapping"
            );
            return Ok(mapping);
        }
    }

    Err(unsupported())
}

/// Resolved mappings for both document kinds of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMappings {
    pub doc: String,
    pub folder: String,
}

impl JobMappings {
    pub fn get(&self, kind: DocKind) -> &str {
        match kind {
            DocKind::Doc => &self.doc,
            DocKind::Folder => &self.folder,
        }
    }
}

/// Resolve both kinds, failing on the first one that is missing.
pub fn resolve_job_mappings(
    job_root: &Path,
    bundled_root: &Path,
    version: &str,
) -> Result<JobMappings> {
    Ok(JobMappings {
        doc: read_mapping(job_root, bundled_root, version, DocKind::Doc)?,
        folder: read_mapping(job_root, bundled_root, version, DocKind::Folder)?,
    })
}

/// Major version token of a backend version string: `"5.6.3"` gives `"5"`.
pub fn major_version(version: &str) -> &str {
    let version = version.trim();
    version.split('.').next().unwrap_or(version)
}

pub fn resource_path(root: &Path, version: &str, kind: DocKind) -> PathBuf {
    root.join(version).join(kind.file_name())
}

/// Longest file name component accepted by common filesystems.
const MAX_VERSION_LEN: usize = 255;

// A version names exactly one directory below a root.
fn is_version_token(version: &str) -> bool {
    !version.is_empty()
        && version.len() <= MAX_VERSION_LEN
        && version != "."
        && version != ".."
        && !version.contains(['/', '\\', '\0'])
}

fn read_if_present(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bundled defaults
// ═══════════════════════════════════════════════════════════════════════

struct BundledMapping {
    version: &'static str,
    kind: DocKind,
    body: &'static str,
}

const BUNDLE: &[BundledMapping] = &[
    BundledMapping {
        version: "1",
        kind: DocKind::Doc,
        body: include_str!("../resources/_default/1/doc.json"),
    },
    BundledMapping {
        version: "1",
        kind: DocKind::Folder,
        body: include_str!("../resources/_default/1/folder.json"),
    },
    BundledMapping {
        version: "2",
        kind: DocKind::Doc,
        body: include_str!("../resources/_default/2/doc.json"),
    },
    BundledMapping {
        version: "2",
        kind: DocKind::Folder,
        body: include_str!("../resources/_default/2/folder.json"),
    },
    BundledMapping {
        version: "5",
        kind: DocKind::Doc,
        body: include_str!("../resources/_default/5/doc.json"),
    },
    BundledMapping {
        version: "5",
        kind: DocKind::Folder,
        body: include_str!("../resources/_default/5/folder.json"),
    },
];

/// Major versions shipped with the binary, ascending.
pub fn bundled_versions() -> Vec<&'static str> {
    let mut versions: Vec<&'static str> = BUNDLE.iter().map(|m| m.version).collect();
    versions.dedup();
    versions
}

pub fn bundled_mapping(version: &str, kind: DocKind) -> Option<&'static str> {
    BUNDLE
        .iter()
        .find(|m| m.version == version && m.kind == kind)
        .map(|m| m.body)
}

/// Write the shipped mappings below `bundled_root`.
///
/// Existing files are left untouched so operators can edit them. Returns
/// the files that were written.
pub fn install_default_mappings(bundled_root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for mapping in BUNDLE {
        let path = resource_path(bundled_root, mapping.version, mapping.kind);
        if path.exists() {
            debug!(path = %path.display(), "keeping existing mapping");
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, mapping.body).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }

    info!(
        root = %bundled_root.display(),
        written = written.len(),
        "default mappings installed"
    );
    Ok(written)
}

/// Version directories present directly below `root`, numeric ones first.
pub fn available_versions(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut versions = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            versions.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    versions.sort_by_key(|v| (v.parse::<u64>().unwrap_or(u64::MAX), v.clone()));
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn kind_names() {
        assert_eq!(DocKind::Doc.file_name(), "doc.json");
        assert_eq!(DocKind::Folder.file_name(), "folder.json");
        assert_eq!(DocKind::Folder.to_string(), "folder");
    }

    #[test]
    fn major_version_extraction() {
        assert_eq!(major_version("5.6.3"), "5");
        assert_eq!(major_version("2"), "2");
        assert_eq!(major_version(" 7.10.1 "), "7");
    }

    #[test]
    fn job_override_wins() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(job.path(), "2/doc.json", "{ // doc }");
        write(bundled.path(), "2/doc.json", "{ \"bundled\": true }");

        let mapping = read_mapping(job.path(), bundled.path(), "2", DocKind::Doc).unwrap();
        assert_eq!(mapping, "{ // doc }");
    }

    #[test]
    fn falls_back_to_bundled() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(bundled.path(), "2/folder.json", "{ \"folder\": 2 }\n");

        let mapping = read_mapping(job.path(), bundled.path(), "2", DocKind::Folder).unwrap();
        assert_eq!(mapping, "{ \"folder\": 2 }\n");
    }

    #[test]
    fn override_of_one_kind_leaves_other_on_default() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(job.path(), "2/doc.json", "job doc");
        write(bundled.path(), "2/doc.json", "default doc");
        write(bundled.path(), "2/folder.json", "default folder");

        let mappings = resolve_job_mappings(job.path(), bundled.path(), "2").unwrap();
        assert_eq!(mappings.get(DocKind::Doc), "job doc");
        assert_eq!(mappings.get(DocKind::Folder), "default folder");
    }

    #[test]
    fn no_nearest_version_fallback() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(bundled.path(), "2/doc.json", "v2");
        write(bundled.path(), "5/doc.json", "v5");

        for version in ["3", "0", "6", "2.0"] {
            let err = read_mapping(job.path(), bundled.path(), version, DocKind::Doc).unwrap_err();
            assert!(err.is_unsupported_version(), "{version}: {err}");
            assert!(err.to_string().contains(&format!("[{version}]")));
        }
    }

    #[test]
    fn path_like_versions_are_unsupported() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(bundled.path(), "doc.json", "top level");

        for version in ["", ".", "..", "../2", "a/b"] {
            let err = read_mapping(job.path(), bundled.path(), version, DocKind::Doc).unwrap_err();
            assert!(err.is_unsupported_version(), "{version:?}: {err}");
        }
    }

    #[test]
    fn unrepresentable_versions_are_unsupported() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(bundled.path(), "2/doc.json", "v2");

        let too_long = "9".repeat(300);
        for version in ["2\0", "\0", too_long.as_str()] {
            let err = read_mapping(job.path(), bundled.path(), version, DocKind::Doc).unwrap_err();
            assert!(err.is_unsupported_version(), "{version:?}: {err}");
            assert!(!matches!(err, Error::Io { .. }));
        }
    }

    #[test]
    fn unreadable_resource_is_io_error() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text.
        std::fs::create_dir_all(job.path().join("2").join("doc.json")).unwrap();
        write(bundled.path(), "2/doc.json", "default");

        let err = read_mapping(job.path(), bundled.path(), "2", DocKind::Doc).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err}");
        assert!(!err.is_unsupported_version());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        write(bundled.path(), "5/doc.json", "same bytes\r\n");

        let first = read_mapping(job.path(), bundled.path(), "5", DocKind::Doc).unwrap();
        let second = read_mapping(job.path(), bundled.path(), "5", DocKind::Doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bundle_covers_every_version_and_kind() {
        let versions = bundled_versions();
        assert_eq!(versions, vec!["1", "2", "5"]);
        for version in versions {
            for kind in DocKind::ALL {
                let body = bundled_mapping(version, kind).unwrap();
                assert!(body.trim_start().starts_with('{'));
            }
        }
        assert!(bundled_mapping("0", DocKind::Doc).is_none());
    }

    #[test]
    fn install_writes_once_and_keeps_edits() {
        let root = TempDir::new().unwrap();
        let written = install_default_mappings(root.path()).unwrap();
        assert_eq!(written.len(), 6);

        let doc = resource_path(root.path(), "5", DocKind::Doc);
        std::fs::write(&doc, "edited").unwrap();

        let written = install_default_mappings(root.path()).unwrap();
        assert!(written.is_empty());
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), "edited");
    }

    #[test]
    fn installed_defaults_resolve_verbatim() {
        let job = TempDir::new().unwrap();
        let bundled = TempDir::new().unwrap();
        install_default_mappings(bundled.path()).unwrap();

        let folder = read_mapping(job.path(), bundled.path(), "2", DocKind::Folder).unwrap();
        assert_eq!(folder, bundled_mapping("2", DocKind::Folder).unwrap());
    }

    #[test]
    fn lists_version_directories() {
        let root = TempDir::new().unwrap();
        write(root.path(), "10/doc.json", "");
        write(root.path(), "2/doc.json", "");
        write(root.path(), "5/folder.json", "");
        write(root.path(), "README.md", "not a version");

        assert_eq!(available_versions(root.path()).unwrap(), vec!["2", "5", "10"]);
        assert!(available_versions(&root.path().join("missing"))
            .unwrap()
            .is_empty());
    }
}
