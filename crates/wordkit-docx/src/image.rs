//! Image probing and display sizing for embedded pictures
//!
//! Pictures are stored verbatim under `word/media/`; only the pixel size and
//! the container format are read from the bytes.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::drawing::Extent;
use crate::error::{DocxError, Result};
use crate::units::A4_EMU_MAX_WIDTH;

/// Formats that can be embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageKind {
    /// File extension used for the media part name
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    pub fn content_type(self) -> &'static str {
        content_type_for_extension(self.extension())
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// Result of probing image bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pub kind: ImageKind,
}

impl ImageInfo {
    /// Display size of a picture placed on an A4 page
    pub fn display_extent(&self) -> Extent {
        display_extent(self.width, self.height)
    }
}

/// Read the pixel size and format of image bytes without decoding pixels
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DocxError::BadImage(format!("Failed to read image format: {}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| DocxError::BadImage("Could not determine image format".to_string()))?;
    let kind = ImageKind::from_format(format)
        .ok_or_else(|| DocxError::BadImage(format!("Unsupported image format {:?}", format)))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DocxError::BadImage(format!("Failed to read image size: {}", e)))?;
    if width == 0 || height == 0 {
        return Err(DocxError::BadImage(format!(
            "Image has no area ({width}x{height})"
        )));
    }

    Ok(ImageInfo {
        width,
        height,
        kind,
    })
}

/// Display size in EMUs for a `width` x `height` pixel image
///
/// Wide images (aspect ratio above 1.2) take the full A4 text width, others
/// half of it; the height keeps the aspect ratio.
pub fn display_extent(width: u32, height: u32) -> Extent {
    let (w, h) = (i64::from(width.max(1)), i64::from(height));
    if w * 5 > h * 6 {
        Extent {
            cx: A4_EMU_MAX_WIDTH,
            cy: A4_EMU_MAX_WIDTH * h / w,
        }
    } else {
        Extent {
            cx: A4_EMU_MAX_WIDTH / 2,
            cy: A4_EMU_MAX_WIDTH * h / w / 2,
        }
    }
}

/// MIME type of a media part by extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
