//! Interactive target-format selection flow.
//!
//! [`choose_target`] asks the catalog for the source file's options and a
//! [`FormatPrompt`] implementation to pick one. The prompt is the UI seam:
//! the CLI frontend backs it with a modal list selection, tests script it.

use std::path::Path;

use crate::catalog::{normalize_extension, supported_targets, TargetFormat};
use crate::error::{ConvertError, ConvertResult};

/// UI capability for picking one target format out of a non-empty list.
pub trait FormatPrompt {
    /// Presents `options` for `source` and blocks until the user picks an
    /// entry (`Ok(Some(index))`) or cancels (`Ok(None)`).
    ///
    /// Never called with an empty list.
    fn select(&mut self, source: &Path, options: &[TargetFormat]) -> ConvertResult<Option<usize>>;
}

/// Asks the user to choose a target format for `source`.
///
/// Returns `Ok(None)` when the user cancels — a cancelled selection is an
/// explicit decision, not an error.
///
/// # Errors
///
/// [`ConvertError::NoFormatsAvailable`] when the catalog has no targets for
/// the source extension; the prompt is never shown in that case.
pub fn choose_target(
    source: &Path,
    prompt: &mut dyn FormatPrompt,
) -> ConvertResult<Option<TargetFormat>> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
        .unwrap_or_default();

    let options = supported_targets(&ext);
    if options.is_empty() {
        return Err(ConvertError::NoFormatsAvailable(ext));
    }

    match prompt.select(source, &options)? {
        Some(index) if index < options.len() => Ok(Some(options[index].clone())),
        _ => Ok(None),
    }
}
