//! Morph core library — UI-agnostic file-conversion logic.
//!
//! `morph-core` provides the format catalog, the conversion dispatcher, and
//! the target-selection flow for building a file-conversion frontend. It is
//! intentionally decoupled from any UI framework: the CLI frontend
//! (`morph-cli`) and a future graphical shell share the same logic.
//!
//! # Modules
//!
//! - [`catalog`] — the fixed source-extension → target-format routing table.
//! - [`dispatch`] — the [`Dispatcher`]: family dispatch, session lifecycle, target-path derivation.
//! - [`backend`] — the office-suite capability traits and the headless-LibreOffice implementation.
//! - [`raster`] — in-process raster conversions, including the image→PDF page writer.
//! - [`flow`] — interactive target selection behind the [`FormatPrompt`] seam.
//! - [`config`] — TOML configuration.
//! - [`error`] — unified error type ([`ConvertError`]) and result alias ([`ConvertResult`]).

pub mod backend;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod raster;

pub use backend::soffice::{SofficeBackend, SofficeConfig};
pub use backend::{OfficeBackend, OfficeSession, SessionGuard, SessionOptions, Suite};
pub use catalog::{normalize_extension, supported_targets, FormatFamily, TargetFormat};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{ConvertError, ConvertResult};
pub use flow::{choose_target, FormatPrompt};
