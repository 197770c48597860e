//! Raster-image conversions.
//!
//! The raster family is handled entirely in-process: `image` decodes and
//! re-encodes between the pixel formats, and image→PDF builds a one-page
//! document with `lopdf`, embedding the picture as a JPEG stream scaled to
//! fit the page and centered on both axes.
//!
//! The decoded image buffer lives only inside [`convert_image`] /
//! [`image_to_pdf`] and is dropped on every path.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::catalog::normalize_extension;
use crate::error::{ConvertError, ConvertResult};

/// Page-size ceiling in points (A4-equivalent).
pub const PAGE_MAX_WIDTH: f32 = 595.0;
/// Page-size ceiling in points (A4-equivalent).
pub const PAGE_MAX_HEIGHT: f32 = 842.0;

/// Computed geometry for placing an image on a PDF page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Page width: `min(PAGE_MAX_WIDTH, image width)`.
    pub page_width: f32,
    /// Page height: `min(PAGE_MAX_HEIGHT, image height)`.
    pub page_height: f32,
    /// Drawn image width after scale-to-fit.
    pub draw_width: f32,
    /// Drawn image height after scale-to-fit.
    pub draw_height: f32,
    /// Horizontal centering offset.
    pub offset_x: f32,
    /// Vertical centering offset.
    pub offset_y: f32,
}

/// Computes page size and image placement for an image of `width` × `height`
/// pixels (treated as points).
///
/// The page is capped at 595×842; the image is scaled to fit while
/// preserving aspect ratio and centered on both axes.
pub fn place_on_page(width: u32, height: u32) -> PagePlacement {
    let img_w = width.max(1) as f32;
    let img_h = height.max(1) as f32;
    let page_width = img_w.min(PAGE_MAX_WIDTH);
    let page_height = img_h.min(PAGE_MAX_HEIGHT);

    let scale = (page_width / img_w).min(page_height / img_h);
    let draw_width = img_w * scale;
    let draw_height = img_h * scale;

    PagePlacement {
        page_width,
        page_height,
        draw_width,
        draw_height,
        offset_x: (page_width - draw_width) / 2.0,
        offset_y: (page_height - draw_height) / 2.0,
    }
}

/// Re-encodes the image at `source` into the raster format named by
/// `target_extension`, writing the result to `target`.
///
/// # Errors
///
/// [`ConvertError::UnsupportedFormat`] for a non-raster target extension,
/// [`ConvertError::ConversionFailed`] when decoding or encoding fails.
pub fn convert_image(source: &Path, target: &Path, target_extension: &str) -> ConvertResult<()> {
    let format = raster_format(target_extension)
        .ok_or_else(|| ConvertError::UnsupportedFormat(normalize_extension(target_extension)))?;

    let img = load(source)?;
    let encode_result = match format {
        // JPEG has no alpha channel; flatten first.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(target, format),
        _ => img.save_with_format(target, format),
    };
    encode_result.map_err(|e| ConvertError::ConversionFailed(format!("image encode error: {e}")))
}

/// Writes a single-page PDF at `target` containing the image at `source`.
///
/// The image is re-encoded to an intermediate JPEG buffer and embedded as a
/// `DCTDecode` XObject with the geometry from [`place_on_page`].
pub fn image_to_pdf(source: &Path, target: &Path) -> ConvertResult<()> {
    let img = load(source)?;
    let placement = place_on_page(img.width(), img.height());

    // Intermediate JPEG buffer for the DCTDecode stream.
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    drop(img);
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .map_err(|e| ConvertError::ConversionFailed(format!("image encode error: {e}")))?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(placement.draw_width),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(placement.draw_height),
                    Object::Real(placement.offset_x),
                    Object::Real(placement.offset_y),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content
        .encode()
        .map_err(|e| ConvertError::ConversionFailed(format!("PDF content error: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(placement.page_width),
            Object::Real(placement.page_height),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(target)
        .map_err(|e| ConvertError::ConversionFailed(format!("PDF write error: {e}")))?;
    Ok(())
}

fn load(source: &Path) -> ConvertResult<DynamicImage> {
    image::open(source).map_err(|e| ConvertError::ConversionFailed(format!("image error: {e}")))
}

/// Raster encoding formats addressable as conversion targets.
fn raster_format(extension: &str) -> Option<ImageFormat> {
    match normalize_extension(extension).as_str() {
        ".jpg" | ".jpeg" => Some(ImageFormat::Jpeg),
        ".png" => Some(ImageFormat::Png),
        ".gif" => Some(ImageFormat::Gif),
        ".bmp" => Some(ImageFormat::Bmp),
        _ => None,
    }
}
