//! # FS Crawler CLI (`fscrawler`)
//!
//! Inspect crawl jobs and the index mappings they resolve to.
//!
//! ## Usage
//!
//! ```bash
//! fscrawler --config-dir ~/.fscrawler <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fscrawler init` | Install the bundled default mappings into `<config-dir>/_default` |
//! | `fscrawler show <job>` | Print the effective settings of a job |
//! | `fscrawler mapping <job>` | Print the mapping a job resolves to |
//! | `fscrawler versions` | List bundled and installed schema versions |
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=fs_crawler=debug`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fs_crawler::job::{self, ElasticsearchSettings};
use fs_crawler::mapping::{self, DocKind};
use fs_crawler::Fs;

/// FS Crawler: crawl job settings and index mapping resolution.
///
/// Jobs live in `<config-dir>/<job>/_settings.toml`. Mapping overrides for
/// a job go in `<config-dir>/<job>/<version>/<doc|folder>.json`.
#[derive(Parser)]
#[command(name = "fscrawler", version)]
struct Cli {
    /// Directory holding job definitions and `_default` mappings.
    #[arg(long, global = true, default_value = job::DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the bundled default mappings.
    ///
    /// Files that already exist are kept as they are.
    Init,

    /// Print the effective settings of a job as TOML.
    Show {
        /// Job name.
        job: String,
    },

    /// Print the mapping a job resolves to.
    ///
    /// The job's own mapping wins over the bundled default for the same
    /// version. There is no fallback to another version.
    Mapping {
        /// Job name.
        job: String,

        /// Document kind.
        #[arg(long, value_enum, default_value_t = KindArg::Doc)]
        kind: KindArg,

        /// Backend version (full or major). Defaults to the job's
        /// `elasticsearch.version`, then to the latest bundled version.
        #[arg(long)]
        es_version: Option<String>,
    },

    /// List bundled schema versions and those installed on disk.
    Versions,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Doc,
    Folder,
}

impl From<KindArg> for DocKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Doc => DocKind::Doc,
            KindArg::Folder => DocKind::Folder,
        }
    }
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    name: &'a str,
    fs: &'a Fs,
    elasticsearch: &'a ElasticsearchSettings,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = job::expand_tilde(&cli.config_dir);
    let bundled_root = job::bundled_root(&config_dir);

    match cli.command {
        Commands::Init => {
            let written = mapping::install_default_mappings(&bundled_root)
                .with_context(|| format!("Failed to install mappings in {}", bundled_root.display()))?;
            if written.is_empty() {
                println!("Default mappings already installed in {}", bundled_root.display());
            }
            for path in written {
                println!("{}", path.display());
            }
        }
        Commands::Show { job: name } => {
            let job = job::load_job(&config_dir, &name)?;
            let output = ShowOutput {
                name: &job.name,
                fs: &job.fs,
                elasticsearch: &job.elasticsearch,
            };
            let rendered =
                toml::to_string_pretty(&output).context("Failed to render job settings")?;
            print!("{}", rendered);
        }
        Commands::Mapping {
            job: name,
            kind,
            es_version,
        } => {
            let job = job::load_job(&config_dir, &name)?;
            let version = job.schema_version(es_version.as_deref());
            let mapping = mapping::read_mapping(job.mapping_dir(), &bundled_root, version, kind.into())
                .with_context(|| format!("Failed to resolve mapping for job [{}]", job.name))?;
            print!("{}", mapping);
        }
        Commands::Versions => {
            println!("bundled:   {}", mapping::bundled_versions().join(", "));
            let installed = mapping::available_versions(&bundled_root)?;
            if installed.is_empty() {
                println!("installed: none (run `fscrawler init`)");
            } else {
                println!("installed: {}", installed.join(", "));
            }
        }
    }

    Ok(())
}
