//! Format catalog — the fixed routing table from source extension to
//! supported target formats.
//!
//! The catalog is a pure lookup: [`supported_targets`] never touches the
//! filesystem and never fails. An extension it does not know about simply
//! yields an empty list.

/// A conversion target offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFormat {
    /// Human-readable name for presentation ("PDF Document").
    pub display_name: &'static str,
    /// Canonical target extension with leading dot (".pdf").
    pub extension: &'static str,
}

impl TargetFormat {
    const fn new(display_name: &'static str, extension: &'static str) -> Self {
        Self {
            display_name,
            extension,
        }
    }
}

/// The group of source extensions that share one conversion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    /// doc, docx — word-processing documents.
    Document,
    /// xls, xlsx — spreadsheets.
    Spreadsheet,
    /// ppt, pptx — slide decks.
    Presentation,
    /// jpg, jpeg, png, gif, bmp — raster images.
    RasterImage,
    /// pdf — routed through the document suite's PDF import.
    Pdf,
}

const DOCUMENT_EXTENSIONS: &[&str] = &[".doc", ".docx"];
const SPREADSHEET_EXTENSIONS: &[&str] = &[".xls", ".xlsx"];
const PRESENTATION_EXTENSIONS: &[&str] = &[".ppt", ".pptx"];
const RASTER_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp"];

const DOCUMENT_TARGETS: &[TargetFormat] = &[
    TargetFormat::new("PDF Document", ".pdf"),
    TargetFormat::new("Plain Text", ".txt"),
    TargetFormat::new("Rich Text Format", ".rtf"),
    TargetFormat::new("HTML Document", ".html"),
];

const PRESENTATION_TARGETS: &[TargetFormat] = &[
    TargetFormat::new("PDF Document", ".pdf"),
    TargetFormat::new("PNG Image", ".png"),
    TargetFormat::new("JPEG Image", ".jpg"),
];

const SPREADSHEET_TARGETS: &[TargetFormat] = &[
    TargetFormat::new("PDF Document", ".pdf"),
    TargetFormat::new("CSV (Comma Separated)", ".csv"),
    TargetFormat::new("Plain Text", ".txt"),
];

const RASTER_TARGETS: &[TargetFormat] = &[
    TargetFormat::new("JPEG Image", ".jpg"),
    TargetFormat::new("PNG Image", ".png"),
    TargetFormat::new("Bitmap Image", ".bmp"),
    TargetFormat::new("GIF Image", ".gif"),
    TargetFormat::new("PDF Document", ".pdf"),
];

const PDF_TARGETS: &[TargetFormat] = &[TargetFormat::new("Word Document", ".docx")];

/// Normalises an extension to canonical form: lower-case with leading dot.
///
/// Accepts `"PDF"`, `".pdf"`, `"pdf"` — all become `".pdf"`. An empty
/// input stays empty (and will match no family).
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim_start_matches('.');
    let mut normalized = String::with_capacity(trimmed.len() + 1);
    normalized.push('.');
    normalized.extend(trimmed.chars().map(|c| c.to_ascii_lowercase()));
    if normalized == "." {
        String::new()
    } else {
        normalized
    }
}

impl FormatFamily {
    /// Returns the family for a source extension, or `None` when the
    /// extension is not routable. Input is normalised before matching.
    pub fn of(extension: &str) -> Option<Self> {
        let ext = normalize_extension(extension);
        if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Document)
        } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Spreadsheet)
        } else if PRESENTATION_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Presentation)
        } else if RASTER_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::RasterImage)
        } else if ext == ".pdf" {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

/// Returns the ordered set of supported target formats for a source
/// extension.
///
/// The order is fixed and presentation-ready: the most common target comes
/// first. Unknown extensions yield an empty slice, not an error.
///
/// # Examples
///
/// ```
/// use morph_core::supported_targets;
///
/// let targets = supported_targets(".docx");
/// assert_eq!(targets[0].extension, ".pdf");
///
/// assert!(supported_targets(".xyz").is_empty());
/// ```
pub fn supported_targets(extension: &str) -> Vec<TargetFormat> {
    let table: &[TargetFormat] = match FormatFamily::of(extension) {
        Some(FormatFamily::Document) => DOCUMENT_TARGETS,
        Some(FormatFamily::Spreadsheet) => SPREADSHEET_TARGETS,
        Some(FormatFamily::Presentation) => PRESENTATION_TARGETS,
        Some(FormatFamily::RasterImage) => RASTER_TARGETS,
        Some(FormatFamily::Pdf) => PDF_TARGETS,
        None => &[],
    };
    table.to_vec()
}
