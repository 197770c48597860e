//! Native save-format identifiers.
//!
//! Automation hosts identify save formats by opaque numeric constants, not
//! by extension. The values here are the documented constants of the
//! Microsoft Office automation model; a backend bridging to a different
//! provider (as [`super::soffice`] does) maps them onto its own filter
//! names and must not reinterpret the numbers.

use crate::backend::Suite;
use crate::catalog::normalize_extension;

/// Word save formats (`WdSaveFormat`).
pub const WD_FORMAT_TEXT: i32 = 2;
pub const WD_FORMAT_RTF: i32 = 6;
pub const WD_FORMAT_HTML: i32 = 8;
pub const WD_FORMAT_XML_DOCUMENT: i32 = 16;
pub const WD_FORMAT_PDF: i32 = 17;

/// Excel file formats (`XlFileFormat`).
pub const XL_CSV: i32 = 6;
pub const XL_TEXT_WINDOWS: i32 = 20;

/// PowerPoint save formats (`PpSaveAsFileType`).
pub const PP_SAVE_AS_JPG: i32 = 17;
pub const PP_SAVE_AS_PNG: i32 = 18;
pub const PP_SAVE_AS_PDF: i32 = 32;

/// How a target format is produced by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    /// Regular save-as with a native numeric format identifier.
    Native(i32),
    /// The suite's fixed-format (PDF) export path, used by the spreadsheet
    /// suite where PDF is not a save-as format.
    PdfExport,
}

/// A resolved save format: the canonical target extension plus the way the
/// suite produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveFormat {
    /// Canonical target extension with leading dot.
    pub extension: &'static str,
    /// Native production path for the owning suite.
    pub code: FormatCode,
}

const fn native(extension: &'static str, code: i32) -> SaveFormat {
    SaveFormat {
        extension,
        code: FormatCode::Native(code),
    }
}

/// Resolves the save format for `(suite, target extension)`.
///
/// Returns `None` when the suite cannot produce the target — the caller
/// reports that as an unsupported format.
pub fn save_format(suite: Suite, target_extension: &str) -> Option<SaveFormat> {
    let ext = normalize_extension(target_extension);
    match suite {
        Suite::Document => match ext.as_str() {
            ".pdf" => Some(native(".pdf", WD_FORMAT_PDF)),
            ".txt" => Some(native(".txt", WD_FORMAT_TEXT)),
            ".rtf" => Some(native(".rtf", WD_FORMAT_RTF)),
            ".html" => Some(native(".html", WD_FORMAT_HTML)),
            ".docx" => Some(native(".docx", WD_FORMAT_XML_DOCUMENT)),
            _ => None,
        },
        Suite::Spreadsheet => match ext.as_str() {
            ".pdf" => Some(SaveFormat {
                extension: ".pdf",
                code: FormatCode::PdfExport,
            }),
            ".csv" => Some(native(".csv", XL_CSV)),
            ".txt" => Some(native(".txt", XL_TEXT_WINDOWS)),
            _ => None,
        },
        Suite::Presentation => match ext.as_str() {
            ".pdf" => Some(native(".pdf", PP_SAVE_AS_PDF)),
            ".jpg" => Some(native(".jpg", PP_SAVE_AS_JPG)),
            ".png" => Some(native(".png", PP_SAVE_AS_PNG)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_suite_codes() {
        assert_eq!(
            save_format(Suite::Document, ".pdf").unwrap().code,
            FormatCode::Native(17)
        );
        assert_eq!(
            save_format(Suite::Document, ".txt").unwrap().code,
            FormatCode::Native(2)
        );
        assert_eq!(
            save_format(Suite::Document, ".rtf").unwrap().code,
            FormatCode::Native(6)
        );
        assert_eq!(
            save_format(Suite::Document, ".html").unwrap().code,
            FormatCode::Native(8)
        );
        assert_eq!(
            save_format(Suite::Document, ".docx").unwrap().code,
            FormatCode::Native(16)
        );
    }

    #[test]
    fn spreadsheet_pdf_uses_fixed_format_export() {
        assert_eq!(
            save_format(Suite::Spreadsheet, ".pdf").unwrap().code,
            FormatCode::PdfExport
        );
        assert_eq!(
            save_format(Suite::Spreadsheet, ".csv").unwrap().code,
            FormatCode::Native(6)
        );
        assert_eq!(
            save_format(Suite::Spreadsheet, ".txt").unwrap().code,
            FormatCode::Native(20)
        );
    }

    #[test]
    fn presentation_suite_codes() {
        assert_eq!(
            save_format(Suite::Presentation, ".pdf").unwrap().code,
            FormatCode::Native(32)
        );
        assert_eq!(
            save_format(Suite::Presentation, ".jpg").unwrap().code,
            FormatCode::Native(17)
        );
        assert_eq!(
            save_format(Suite::Presentation, ".png").unwrap().code,
            FormatCode::Native(18)
        );
    }

    #[test]
    fn unroutable_target_is_none() {
        assert!(save_format(Suite::Document, ".csv").is_none());
        assert!(save_format(Suite::Spreadsheet, ".html").is_none());
        assert!(save_format(Suite::Presentation, ".txt").is_none());
    }

    #[test]
    fn target_extension_is_normalised() {
        let fmt = save_format(Suite::Document, "PDF").unwrap();
        assert_eq!(fmt.extension, ".pdf");
    }
}
