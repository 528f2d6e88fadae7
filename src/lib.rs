//! # FS Crawler settings
//!
//! Crawl job configuration and index mapping resolution for a
//! filesystem-to-search-index crawler.
//!
//! A job describes which directory tree to scan, which files to include or
//! exclude, and how much of each file is indexed. Before the crawl starts,
//! the job resolves the mapping documents (one for files, one for folders)
//! that the search backend needs for its major version.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────────┐
//! │ _settings    │──▶│ FsBuilder   │──▶│ Fs (immutable)   │──▶ crawler
//! │ .toml        │   └─────────────┘   └──────────────────┘
//! └──────────────┘
//! ┌──────────────┐   ┌─────────────┐
//! │ job dir /    │──▶│ read_mapping│──▶ mapping text ──▶ index manager
//! │ _default dir │   └─────────────┘
//! └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | `Fs` snapshot and its builder |
//! | [`time_value`] | Compact time intervals (`15m`) |
//! | [`percentage`] | Indexed character limits (`10%`, `10000`) |
//! | [`mapping`] | Versioned mapping resolution and bundled defaults |
//! | [`job`] | Job definitions on disk |
//! | [`filter`] | Include/exclude matching |
//! | [`ident`] | Document ids |
//! | [`error`] | Error type |

pub mod error;
pub mod filter;
pub mod ident;
pub mod job;
pub mod mapping;
pub mod percentage;
pub mod settings;
pub mod time_value;

pub use error::{Error, Result};
pub use mapping::{read_mapping, DocKind};
pub use percentage::Percentage;
pub use settings::{Fs, FsBuilder};
pub use time_value::{TimeUnit, TimeValue};
