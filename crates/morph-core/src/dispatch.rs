//! Conversion dispatcher — routes one source file to the backend that owns
//! its format family.
//!
//! Dispatch is keyed on the *source* extension (one backend per source
//! type), not the target. The dispatcher validates preconditions, derives
//! the target path, drives the suite session through its
//! open → save-as → close lifecycle inside a [`SessionGuard`], and converts
//! every backend fault into a typed error. Exactly one conversion is in
//! flight at a time; the call blocks until the backend finishes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{codes, OfficeBackend, SaveFormat, SessionGuard, SessionOptions, Suite};
use crate::catalog::{normalize_extension, FormatFamily};
use crate::error::{ConvertError, ConvertResult};
use crate::raster;

/// Wait after opening a PDF in the document suite before saving. Some
/// automation hosts race on their PDF import and save an empty document
/// without it.
const PDF_IMPORT_STABILIZATION: Duration = Duration::from_millis(500);

/// Format-aware conversion dispatcher.
///
/// Owns the office backend used for the document, spreadsheet, and
/// presentation families; the raster family is converted in-process.
pub struct Dispatcher {
    backend: Box<dyn OfficeBackend>,
    refuse_overwrite: bool,
}

impl Dispatcher {
    /// Creates a dispatcher over the given office backend.
    ///
    /// By default an existing target file is overwritten, matching suite
    /// save-as behavior. Use [`Dispatcher::refuse_overwrite`] to fail
    /// instead.
    pub fn new(backend: Box<dyn OfficeBackend>) -> Self {
        Self {
            backend,
            refuse_overwrite: false,
        }
    }

    /// Makes `convert` fail with [`ConvertError::TargetExists`] when the
    /// target file already exists, instead of overwriting it.
    pub fn refuse_overwrite(mut self) -> Self {
        self.refuse_overwrite = true;
        self
    }

    /// Converts `source` into the format named by `target_extension`.
    ///
    /// Returns the target path: the source path with its extension
    /// replaced. The source file is never modified.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::NotFound`] / [`ConvertError::NotAFile`] — bad source path.
    /// - [`ConvertError::UnsupportedFormat`] — the source family is
    ///   unrecognised, or the target is not routable within it. No backend
    ///   is touched in this case.
    /// - [`ConvertError::TargetExists`] — overwrite refused (see
    ///   [`Dispatcher::refuse_overwrite`]).
    /// - [`ConvertError::BackendUnavailable`] — the suite cannot be started.
    /// - [`ConvertError::ConversionFailed`] — backend or codec fault; the
    ///   backend message is passed through verbatim. The session is
    ///   released regardless.
    pub fn convert(&self, source: &Path, target_extension: &str) -> ConvertResult<PathBuf> {
        if !source.exists() {
            return Err(ConvertError::NotFound(source.to_path_buf()));
        }
        if !source.is_file() {
            return Err(ConvertError::NotAFile(source.to_path_buf()));
        }

        let source_ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension)
            .unwrap_or_default();
        let family = FormatFamily::of(&source_ext)
            .ok_or_else(|| ConvertError::UnsupportedFormat(source_ext.clone()))?;

        let target_ext = normalize_extension(target_extension);
        let target = target_path(source, &target_ext);
        if self.refuse_overwrite && target.exists() {
            return Err(ConvertError::TargetExists(target));
        }

        tracing::info!(
            source = %source.display(),
            target = %target.display(),
            ?family,
            "starting conversion"
        );

        match family {
            FormatFamily::Document => self.run_suite(
                Suite::Document,
                SessionOptions::default(),
                source,
                &target,
                resolve_code(Suite::Document, &target_ext)?,
                None,
            )?,
            FormatFamily::Spreadsheet => self.run_suite(
                Suite::Spreadsheet,
                SessionOptions::default(),
                source,
                &target,
                resolve_code(Suite::Spreadsheet, &target_ext)?,
                None,
            )?,
            FormatFamily::Presentation => self.run_suite(
                Suite::Presentation,
                SessionOptions::default(),
                source,
                &target,
                resolve_code(Suite::Presentation, &target_ext)?,
                None,
            )?,
            FormatFamily::RasterImage => {
                if target_ext == ".pdf" {
                    raster::image_to_pdf(source, &target)?;
                } else {
                    raster::convert_image(source, &target, &target_ext)?;
                }
            }
            // The document suite's own PDF import: fragile on some hosts,
            // so alerts are suppressed and the save waits for the import
            // to settle.
            FormatFamily::Pdf => self.run_suite(
                Suite::Document,
                SessionOptions {
                    suppress_alerts: true,
                },
                source,
                &target,
                resolve_code(Suite::Document, &target_ext)?,
                Some(PDF_IMPORT_STABILIZATION),
            )?,
        }

        tracing::info!(target = %target.display(), "conversion finished");
        Ok(target)
    }

    /// Drives one suite session through open → save-as → close. The guard
    /// releases the session on success, failure, and unwind alike.
    fn run_suite(
        &self,
        suite: Suite,
        options: SessionOptions,
        source: &Path,
        target: &Path,
        format: SaveFormat,
        settle: Option<Duration>,
    ) -> ConvertResult<()> {
        let mut session = SessionGuard::new(self.backend.acquire(suite, options)?);
        let outcome = (|| {
            session.open(source)?;
            if let Some(delay) = settle {
                std::thread::sleep(delay);
            }
            session.save_as(target, format)?;
            session.close()
        })();
        session.release();
        if let Err(ref e) = outcome {
            tracing::warn!(source = %source.display(), error = %e, "suite conversion failed");
        }
        outcome
    }
}

/// Replaces the source extension with the (normalised, dotted) target one.
fn target_path(source: &Path, target_extension: &str) -> PathBuf {
    source.with_extension(target_extension.trim_start_matches('.'))
}

/// Looks up the native save format, reporting an unroutable target as
/// [`ConvertError::UnsupportedFormat`].
fn resolve_code(suite: Suite, target_extension: &str) -> ConvertResult<SaveFormat> {
    codes::save_format(suite, target_extension)
        .ok_or_else(|| ConvertError::UnsupportedFormat(target_extension.to_string()))
}
