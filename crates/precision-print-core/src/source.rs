//! Image sources for the placement.
//!
//! The core never displays images; it only keeps an opaque reference the
//! renderer can resolve (a URL or a `data:` URL) plus the natural size when
//! it is known. Uploaded bytes are sniffed for their format and dimensions
//! without decoding pixel data.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while turning user input into an [`ImageSource`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The URL field was empty or whitespace.
    #[error("Image URL is empty")]
    EmptyUrl,

    /// The URL uses a scheme that cannot reference an image.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The uploaded file contained no bytes.
    #[error("Uploaded file is empty")]
    EmptyPayload,

    /// The bytes are not an image format we can recognize.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but the header could not be read.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A local file read into a data URL.
    Upload,
    /// A URL typed by the user.
    Url,
    /// Returned by the image generation service.
    Generated,
}

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size in millimeters at scale 1.
    ///
    /// One natural pixel is taken as one millimeter. This is a deliberate
    /// simplification, not a DPI conversion.
    pub fn as_mm(self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

/// Opaque reference to a loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    /// Anything an `<img src>` accepts.
    pub uri: String,
    pub kind: SourceKind,
    /// Known once the bytes were probed or the renderer reported it.
    pub natural_size: Option<ImageSize>,
}

impl ImageSource {
    /// Build a source from a user-entered URL.
    ///
    /// Surrounding whitespace is trimmed. `javascript:` and `vbscript:`
    /// URLs are refused, including ones split by tab or newline characters; everything else is handed to the renderer as-is.
    pub fn from_url(url: &str) -> Result<Self, LoadError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(LoadError::EmptyUrl);
        }

        if let Some((scheme, _)) = url.split_once(':') {
            // Browsers drop tab and newline anywhere in a URL before parsing it.
            let scheme: String = scheme
                .chars()
                .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
                .collect::<String>()
                .to_ascii_lowercase();
            if scheme == "javascript" || scheme == "vbscript" {
                return Err(LoadError::UnsupportedScheme(scheme));
            }
        }

        Ok(Self {
            uri: url.to_string(),
            kind: SourceKind::Url,
            natural_size: None,
        })
    }

    /// Build a source from an uploaded file's bytes.
    ///
    /// The format is guessed from the magic bytes and only the header is
    /// read to obtain the natural size. The bytes are embedded as a base64
    /// `data:` URL.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let (format, size) = probe_image(bytes)?;
        Ok(Self {
            uri: data_url(format.to_mime_type(), bytes),
            kind: SourceKind::Upload,
            natural_size: Some(size),
        })
    }

    /// Attach the natural size reported by the renderer once the image decoded.
    pub fn with_natural_size(mut self, width: u32, height: u32) -> Self {
        self.natural_size = Some(ImageSize::new(width, height));
        self
    }

    /// True for sources whose bytes are embedded in the URI.
    pub fn is_inline(&self) -> bool {
        self.uri.starts_with("data:")
    }
}

/// Guess the image format and read the dimensions from the header.
pub fn probe_image(bytes: &[u8]) -> Result<(ImageFormat, ImageSize), LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyPayload);
    }

    let format = image::guess_format(bytes).map_err(|_| LoadError::InvalidFormat)?;
    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| LoadError::CorruptedFile(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(LoadError::CorruptedFile(format!(
            "image reports zero size ({width}x{height})"
        )));
    }

    Ok((format, ImageSize::new(width, height)))
}

/// Encode bytes as a `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    /// Encode a solid gray PNG of the given size.
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn test_from_url_trims() {
        let src = ImageSource::from_url("  https://picsum.photos/800/600 ").unwrap();
        assert_eq!(src.uri, "https://picsum.photos/800/600");
        assert_eq!(src.kind, SourceKind::Url);
        assert!(src.natural_size.is_none());
        assert!(!src.is_inline());
    }

    #[test]
    fn test_from_url_empty() {
        assert_eq!(ImageSource::from_url(""), Err(LoadError::EmptyUrl));
        assert_eq!(ImageSource::from_url("   \t"), Err(LoadError::EmptyUrl));
    }

    #[test]
    fn test_from_url_rejects_script_scheme() {
        let err = ImageSource::from_url("JavaScript:alert(1)").unwrap_err();
        assert_eq!(err, LoadError::UnsupportedScheme("javascript".to_string()));
    }

    #[test]
    fn test_from_url_rejects_scheme_split_by_control_chars() {
        for url in ["java\tscript:alert(1)", "java\nscript:alert(1)", "vb\r\nscript:msgbox(1)"] {
            assert!(
                matches!(ImageSource::from_url(url), Err(LoadError::UnsupportedScheme(_))),
                "{url:?} should be refused"
            );
        }
    }

    #[test]
    fn test_from_url_accepts_relative_and_data() {
        assert!(ImageSource::from_url("images/cat.png").is_ok());
        assert!(ImageSource::from_url("data:image/png;base64,AAAA").is_ok());
    }

    #[test]
    fn test_from_bytes_png() {
        let bytes = png_bytes(40, 30);
        let src = ImageSource::from_bytes(&bytes).unwrap();
        assert_eq!(src.kind, SourceKind::Upload);
        assert_eq!(src.natural_size, Some(ImageSize::new(40, 30)));
        assert!(src.uri.starts_with("data:image/png;base64,"));
        assert!(src.is_inline());
    }

    #[test]
    fn test_from_bytes_empty() {
        assert_eq!(ImageSource::from_bytes(&[]), Err(LoadError::EmptyPayload));
    }

    #[test]
    fn test_from_bytes_garbage() {
        let err = ImageSource::from_bytes(b"definitely not an image").unwrap_err();
        assert_eq!(err, LoadError::InvalidFormat);
    }

    #[test]
    fn test_from_bytes_truncated_png() {
        let bytes = png_bytes(10, 10);
        // PNG signature only, header chunk cut off
        let err = ImageSource::from_bytes(&bytes[..12]).unwrap_err();
        assert!(matches!(err, LoadError::CorruptedFile(_)));
    }

    #[test]
    fn test_with_natural_size() {
        let src = ImageSource::from_url("a.png").unwrap().with_natural_size(800, 600);
        assert_eq!(src.natural_size, Some(ImageSize::new(800, 600)));
        assert_eq!(src.natural_size.unwrap().as_mm(), (800.0, 600.0));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_load_error_display() {
        assert_eq!(LoadError::EmptyUrl.to_string(), "Image URL is empty");
        assert_eq!(
            LoadError::UnsupportedScheme("javascript".into()).to_string(),
            "Unsupported URL scheme: javascript"
        );
    }
}
