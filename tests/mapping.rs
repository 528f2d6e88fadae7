use std::fs;
use std::path::Path;

use fs_crawler::mapping::{self, bundled_mapping, resolve_job_mappings};
use fs_crawler::{read_mapping, DocKind, Error};
use tempfile::TempDir;

const JOB_DOC: &str = "{\n  // This is a doc mapping\n}\n";
const JOB_FOLDER: &str = "{\n  // This is a folder mapping\n}\n";

/// Config dir with the bundled defaults installed and a `jobtest` job that
/// overrides both version 2 mappings.
fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    mapping::install_default_mappings(&tmp.path().join("_default")).unwrap();

    let job_dir = tmp.path().join("jobtest").join("2");
    fs::create_dir_all(&job_dir).unwrap();
    fs::write(job_dir.join("doc.json"), JOB_DOC).unwrap();
    fs::write(job_dir.join("folder.json"), JOB_FOLDER).unwrap();
    tmp
}

fn defaults(root: &Path) -> std::path::PathBuf {
    root.join("_default")
}

#[test]
fn files_version_2_uses_bundled_default() {
    let tmp = setup();
    let empty_job = TempDir::new().unwrap();

    let mapping = read_mapping(empty_job.path(), &defaults(tmp.path()), "2", DocKind::Doc).unwrap();
    assert_eq!(mapping, bundled_mapping("2", DocKind::Doc).unwrap());
    assert!(mapping.starts_with("{\n  \"_source\": {\n    \"excludes\": [\n      \"attachment\"\n"));
    assert!(mapping.ends_with("  }\n}\n"));
}

#[test]
fn folders_version_2_uses_bundled_default() {
    let tmp = setup();
    let empty_job = TempDir::new().unwrap();

    let mapping =
        read_mapping(empty_job.path(), &defaults(tmp.path()), "2", DocKind::Folder).unwrap();
    assert_eq!(mapping, bundled_mapping("2", DocKind::Folder).unwrap());
    assert!(mapping.contains("\"name\": {\n      \"type\": \"string\",\n      \"store\": true,\n      \"index\": \"not_analyzed\"\n    }"));
}

#[test]
fn unsupported_version_for_both_kinds() {
    let tmp = setup();
    let job = tmp.path().join("jobtest");

    for kind in DocKind::ALL {
        let err = read_mapping(&job, &defaults(tmp.path()), "0", kind).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { .. }));
        let message = err.to_string();
        assert!(message.contains("does not exist for elasticsearch version"));
        assert!(message.contains("[0]"));
        assert!(message.contains(kind.name()));
    }
}

#[test]
fn job_specific_mappings_win() {
    let tmp = setup();
    let job = tmp.path().join("jobtest");

    assert_eq!(
        read_mapping(&job, &defaults(tmp.path()), "2", DocKind::Doc).unwrap(),
        JOB_DOC
    );
    assert_eq!(
        read_mapping(&job, &defaults(tmp.path()), "2", DocKind::Folder).unwrap(),
        JOB_FOLDER
    );
}

#[test]
fn job_override_only_applies_to_its_version() {
    let tmp = setup();
    let job = tmp.path().join("jobtest");

    let mappings = resolve_job_mappings(&job, &defaults(tmp.path()), "5").unwrap();
    assert_eq!(mappings.doc, bundled_mapping("5", DocKind::Doc).unwrap());
    assert_eq!(mappings.folder, bundled_mapping("5", DocKind::Folder).unwrap());
}

#[test]
fn job_only_version_resolves_without_default() {
    let tmp = setup();
    let job = tmp.path().join("jobtest");
    fs::create_dir_all(job.join("9")).unwrap();
    fs::write(job.join("9").join("doc.json"), "custom v9").unwrap();

    assert_eq!(
        read_mapping(&job, &defaults(tmp.path()), "9", DocKind::Doc).unwrap(),
        "custom v9"
    );
    let err = read_mapping(&job, &defaults(tmp.path()), "9", DocKind::Folder).unwrap_err();
    assert!(err.is_unsupported_version());
}

#[test]
fn missing_roots_mean_unsupported() {
    let tmp = TempDir::new().unwrap();
    let err = read_mapping(
        &tmp.path().join("no-job"),
        &tmp.path().join("no-defaults"),
        "2",
        DocKind::Doc,
    )
    .unwrap_err();
    assert!(err.is_unsupported_version());
}

#[test]
fn concurrent_resolution_is_consistent() {
    let tmp = setup();
    let job = tmp.path().join("jobtest");
    let bundled = defaults(tmp.path());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let job = &job;
                let bundled = &bundled;
                scope.spawn(move || {
                    let kind = if i % 2 == 0 { DocKind::Doc } else { DocKind::Folder };
                    (kind, read_mapping(job, bundled, "2", kind).unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (kind, mapping) = handle.join().unwrap();
            let expected = match kind {
                DocKind::Doc => JOB_DOC,
                DocKind::Folder => JOB_FOLDER,
            };
            assert_eq!(mapping, expected);
        }
    });
}
