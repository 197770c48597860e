//! Headless LibreOffice backend.
//!
//! Implements the [`OfficeSession`] contract by shelling out to
//! `soffice --headless --convert-to`. Each session gets a throwaway user
//! profile directory so concurrent-looking invocations from other tools on
//! the host never fight over the shared profile lock, and `release` deletes
//! it together with anything the suite left behind.
//!
//! The external call is bounded by a configurable timeout; on expiry the
//! child is killed and the conversion reported as failed.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use crate::backend::codes::{
    FormatCode, PP_SAVE_AS_JPG, PP_SAVE_AS_PDF, PP_SAVE_AS_PNG, SaveFormat, WD_FORMAT_HTML,
    WD_FORMAT_PDF, WD_FORMAT_RTF, WD_FORMAT_TEXT, WD_FORMAT_XML_DOCUMENT, XL_CSV,
    XL_TEXT_WINDOWS,
};
use crate::backend::{OfficeBackend, OfficeSession, SessionOptions, Suite};
use crate::error::{ConvertError, ConvertResult};

/// How long a child process is polled between liveness checks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Settings for the LibreOffice backend.
#[derive(Debug, Clone)]
pub struct SofficeConfig {
    /// Binary name or path (`soffice` on PATH by default).
    pub binary: PathBuf,
    /// Upper bound for one external conversion call.
    pub timeout: Duration,
}

impl Default for SofficeConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("soffice"),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Backend producing [`SofficeSession`]s.
pub struct SofficeBackend {
    config: SofficeConfig,
}

impl SofficeBackend {
    pub fn new(config: SofficeConfig) -> Self {
        Self { config }
    }
}

impl OfficeBackend for SofficeBackend {
    fn acquire(
        &self,
        suite: Suite,
        options: SessionOptions,
    ) -> ConvertResult<Box<dyn OfficeSession>> {
        let binary = resolve_binary(&self.config.binary).ok_or_else(|| {
            ConvertError::BackendUnavailable(format!(
                "office suite binary not found: {}",
                self.config.binary.display()
            ))
        })?;

        let profile = TempDir::new().map_err(|e| {
            ConvertError::BackendUnavailable(format!("cannot create suite profile dir: {e}"))
        })?;

        tracing::debug!(?suite, binary = %binary.display(), "acquired soffice session");

        Ok(Box::new(SofficeSession {
            binary,
            timeout: self.config.timeout,
            suite,
            suppress_alerts: options.suppress_alerts,
            profile: Some(profile),
            opened: None,
        }))
    }
}

/// One LibreOffice invocation scope.
pub struct SofficeSession {
    binary: PathBuf,
    timeout: Duration,
    suite: Suite,
    suppress_alerts: bool,
    profile: Option<TempDir>,
    opened: Option<PathBuf>,
}

impl OfficeSession for SofficeSession {
    fn open(&mut self, source: &Path) -> ConvertResult<()> {
        if !source.is_file() {
            return Err(ConvertError::NotFound(source.to_path_buf()));
        }
        self.opened = Some(source.to_path_buf());
        Ok(())
    }

    fn save_as(&mut self, target: &Path, format: SaveFormat) -> ConvertResult<()> {
        let source = self
            .opened
            .clone()
            .ok_or_else(|| ConvertError::ConversionFailed("no document open".to_string()))?;
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| ConvertError::ConversionFailed("session already released".to_string()))?;

        let (convert_ext, filter) = filter_for(self.suite, format).ok_or_else(|| {
            ConvertError::ConversionFailed(format!(
                "no export filter for {:?} target {}",
                self.suite, format.extension
            ))
        })?;

        let outdir = target.parent().unwrap_or_else(|| Path::new("."));

        let mut cmd = Command::new(&self.binary);
        cmd.arg("--headless")
            .arg("--norestore")
            .arg(format!(
                "-env:UserInstallation=file://{}",
                profile.path().display()
            ));
        if self.suppress_alerts {
            // PDF import otherwise pops an interactive filter dialog.
            cmd.arg("--infilter=writer_pdf_import");
        }
        cmd.arg("--convert-to")
            .arg(format!("{convert_ext}:{filter}"))
            .arg("--outdir")
            .arg(outdir)
            .arg(&source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            source = %source.display(),
            target = %target.display(),
            filter,
            "running soffice --convert-to"
        );

        let (status, stderr) = run_with_timeout(cmd, self.timeout)?;
        if !status.success() {
            let detail = if stderr.trim().is_empty() {
                format!("soffice exited with {status}")
            } else {
                stderr.trim().to_string()
            };
            return Err(ConvertError::ConversionFailed(detail));
        }

        // soffice names the output <source stem>.<convert_ext>; rename when
        // the requested target extension differs (e.g. spreadsheet text
        // export goes through the csv filter).
        let stem = source
            .file_stem()
            .ok_or_else(|| ConvertError::ConversionFailed("source has no file stem".to_string()))?;
        let produced = outdir.join(stem).with_extension(convert_ext);
        if !produced.is_file() {
            return Err(ConvertError::ConversionFailed(format!(
                "suite reported success but produced no file at {}",
                produced.display()
            )));
        }
        if produced != target {
            std::fs::rename(&produced, target)?;
        }
        Ok(())
    }

    fn close(&mut self) -> ConvertResult<()> {
        // Nothing stays open between invocations; dropping the handle is
        // the close-without-saving semantics.
        self.opened = None;
        Ok(())
    }

    fn release(&mut self) {
        self.opened = None;
        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.close() {
                tracing::warn!("failed to remove suite profile dir: {e}");
            }
        }
    }
}

impl Drop for SofficeSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Maps a native save format onto a LibreOffice `--convert-to` argument:
/// `(output extension, filter name)`.
fn filter_for(suite: Suite, format: SaveFormat) -> Option<(&'static str, &'static str)> {
    match (suite, format.code) {
        (Suite::Document, FormatCode::Native(code)) => match code {
            WD_FORMAT_PDF => Some(("pdf", "writer_pdf_Export")),
            WD_FORMAT_TEXT => Some(("txt", "Text")),
            WD_FORMAT_RTF => Some(("rtf", "Rich Text Format")),
            WD_FORMAT_HTML => Some(("html", "HTML (StarWriter)")),
            WD_FORMAT_XML_DOCUMENT => Some(("docx", "MS Word 2007 XML")),
            _ => None,
        },
        (Suite::Spreadsheet, FormatCode::PdfExport) => Some(("pdf", "calc_pdf_Export")),
        (Suite::Spreadsheet, FormatCode::Native(code)) => match code {
            // Text export from the spreadsheet suite rides the csv filter;
            // save_as renames the produced file to the requested .txt.
            XL_CSV | XL_TEXT_WINDOWS => Some(("csv", "Text - txt - csv (StarCalc)")),
            _ => None,
        },
        (Suite::Presentation, FormatCode::Native(code)) => match code {
            PP_SAVE_AS_PDF => Some(("pdf", "impress_pdf_Export")),
            PP_SAVE_AS_JPG => Some(("jpg", "impress_jpg_Export")),
            PP_SAVE_AS_PNG => Some(("png", "impress_png_Export")),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves a binary name against PATH, or verifies an explicit path.
fn resolve_binary(binary: &Path) -> Option<PathBuf> {
    if binary.components().count() > 1 {
        return binary.is_file().then(|| binary.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(binary);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Runs the command, killing it if it outlives `timeout`.
///
/// stderr is drained on a separate thread while the child runs: a chatty
/// child that fills the OS pipe buffer would otherwise block forever and
/// get killed at the deadline.
fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> ConvertResult<(std::process::ExitStatus, String)> {
    let mut child = cmd
        .spawn()
        .map_err(|e| ConvertError::BackendUnavailable(format!("cannot launch suite: {e}")))?;

    let mut stderr_reader = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            pipe.read_to_string(&mut buf).map(|_| buf)
        })
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                child.kill()?;
                child.wait()?;
                // Killing the child closes the pipe, so the reader finishes.
                if let Some(handle) = stderr_reader.take() {
                    let _ = handle.join();
                }
                return Err(ConvertError::ConversionFailed(format!(
                    "suite call timed out after {}s",
                    timeout.as_secs()
                )));
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    };

    let stderr = match stderr_reader {
        Some(handle) => handle.join().map_err(|_| {
            ConvertError::ConversionFailed("stderr reader thread panicked".to_string())
        })??,
        None => String::new(),
    };
    Ok((status, stderr))
}
