//! Office-suite backend capability layer.
//!
//! The dispatcher never talks to an automation host directly. It sees only
//! the four-operation session contract — open, save-as, close, release —
//! behind [`OfficeSession`], obtained from an [`OfficeBackend`]. The
//! production implementation ([`soffice::SofficeBackend`]) shells out to
//! headless LibreOffice; tests plug in mock sessions.
//!
//! Leaked automation sessions are the dominant real-world failure mode of
//! this kind of code, so acquisition is always scoped: [`SessionGuard`]
//! releases the session exactly once on every exit path, including unwinds.

pub mod codes;
pub mod soffice;

use std::path::Path;

use crate::error::ConvertResult;

pub use codes::{FormatCode, SaveFormat};

/// Which suite application a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// Word-processing documents (also hosts the PDF import path).
    Document,
    /// Spreadsheets.
    Spreadsheet,
    /// Slide decks.
    Presentation,
}

/// Per-session behavior switches passed at acquisition time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Suppress the suite's interactive alerts (needed for the PDF import
    /// path, where the host would otherwise pop a conversion dialog).
    pub suppress_alerts: bool,
}

/// One automation session, exclusively owned for the duration of one
/// conversion.
///
/// Call order is `open` → `save_as` → `close`, then `release` exactly once.
/// `close` discards unsaved changes to the opened document, so reading a
/// spreadsheet for export never mutates the source workbook.
pub trait OfficeSession {
    /// Opens the source document in the suite.
    fn open(&mut self, source: &Path) -> ConvertResult<()>;

    /// Saves the open document at `target` in the given native format.
    fn save_as(&mut self, target: &Path, format: SaveFormat) -> ConvertResult<()>;

    /// Closes the open document without saving changes to it.
    fn close(&mut self) -> ConvertResult<()>;

    /// Quits the suite and frees all session resources. Must be idempotent;
    /// must never fail.
    fn release(&mut self);
}

/// Factory for automation sessions.
pub trait OfficeBackend {
    /// Acquires a fresh session for the given suite.
    ///
    /// # Errors
    ///
    /// [`crate::ConvertError::BackendUnavailable`] when the suite cannot be
    /// instantiated (not installed, binary missing).
    fn acquire(&self, suite: Suite, options: SessionOptions)
        -> ConvertResult<Box<dyn OfficeSession>>;
}

/// Scoped ownership of an [`OfficeSession`].
///
/// The guard forwards the session operations and guarantees that
/// [`OfficeSession::release`] runs exactly once: explicitly via
/// [`SessionGuard::release`], or from `Drop` if the owner unwound first.
pub struct SessionGuard {
    session: Box<dyn OfficeSession>,
    released: bool,
}

impl SessionGuard {
    /// Takes ownership of a freshly acquired session.
    pub fn new(session: Box<dyn OfficeSession>) -> Self {
        Self {
            session,
            released: false,
        }
    }

    /// See [`OfficeSession::open`].
    pub fn open(&mut self, source: &Path) -> ConvertResult<()> {
        self.session.open(source)
    }

    /// See [`OfficeSession::save_as`].
    pub fn save_as(&mut self, target: &Path, format: SaveFormat) -> ConvertResult<()> {
        self.session.save_as(target, format)
    }

    /// See [`OfficeSession::close`].
    pub fn close(&mut self) -> ConvertResult<()> {
        self.session.close()
    }

    /// Releases the underlying session. Safe to call more than once; only
    /// the first call reaches the backend.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.session.release();
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct CountingSession {
        releases: Arc<Mutex<usize>>,
    }

    impl OfficeSession for CountingSession {
        fn open(&mut self, _source: &Path) -> ConvertResult<()> {
            Ok(())
        }

        fn save_as(&mut self, _target: &Path, _format: SaveFormat) -> ConvertResult<()> {
            Ok(())
        }

        fn close(&mut self) -> ConvertResult<()> {
            Ok(())
        }

        fn release(&mut self) {
            *self.releases.lock().unwrap() += 1;
        }
    }

    fn counting_session() -> (Box<dyn OfficeSession>, Arc<Mutex<usize>>) {
        let releases = Arc::new(Mutex::new(0));
        let session = CountingSession {
            releases: Arc::clone(&releases),
        };
        (Box::new(session), releases)
    }

    #[test]
    fn guard_releases_on_drop() {
        let (session, releases) = counting_session();
        {
            let _guard = SessionGuard::new(session);
        }
        assert_eq!(*releases.lock().unwrap(), 1);
    }

    #[test]
    fn explicit_release_then_drop_releases_once() {
        let (session, releases) = counting_session();
        {
            let mut guard = SessionGuard::new(session);
            guard.release();
            guard.release();
        }
        assert_eq!(*releases.lock().unwrap(), 1);
    }

    #[test]
    fn guard_releases_on_unwind() {
        let (session, releases) = counting_session();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SessionGuard::new(session);
            panic!("backend fault");
        }));
        assert!(result.is_err());
        assert_eq!(*releases.lock().unwrap(), 1);
    }

    #[test]
    fn session_options_default_is_quiet_alerts_off() {
        let options = SessionOptions::default();
        assert!(!options.suppress_alerts);
    }
}
