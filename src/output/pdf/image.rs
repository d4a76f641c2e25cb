use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader};
use tracing::debug;

use crate::error::{ReportError, Result};

/// How the pixel data of a [`LogoImage`] is stored in the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoEncoding {
    /// The original JPEG bytes, embedded as-is (`DCTDecode`).
    Dct,
    /// Raw 8-bit samples, compressed with `FlateDecode` when written.
    Raw,
}

/// A decoded logo ready to be embedded as an image XObject.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub bits_per_component: u8,
    pub encoding: LogoEncoding,
    pub data: Vec<u8>,
}

impl LogoImage {
    /// Read a logo from disk. Any format the `image` crate decodes is
    /// accepted (PNG, JPEG, GIF among them); failures are
    /// [`ReportError::Render`].
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            ReportError::render(format!("cannot read logo {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
            .map_err(|reason| ReportError::render(format!("logo {}: {}", path.display(), reason)))
    }

    pub fn from_bytes(data: Vec<u8>) -> std::result::Result<Self, String> {
        let reader = ImageReader::new(Cursor::new(data.as_slice()))
            .with_guessed_format()
            .map_err(|e| format!("failed to detect image format: {}", e))?;
        let format = reader
            .format()
            .ok_or_else(|| "unrecognized image format".to_string())?;
        let decoder = reader
            .into_decoder()
            .map_err(|e| format!("failed to decode image: {}", e))?;
        let original = decoder.original_color_type();
        let decoded = DynamicImage::from_decoder(decoder)
            .map_err(|e| format!("failed to decode image: {}", e))?;

        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err("image has zero width or height".to_string());
        }
        debug!("Logo: {:?} {}x{} ({:?})", format, width, height, original);

        // JPEG passthrough only where the PDF colour space matches the file
        let passthrough = match (format, original) {
            (ImageFormat::Jpeg, ExtendedColorType::L8) => Some(1),
            (ImageFormat::Jpeg, ExtendedColorType::Rgb8) => Some(3),
            _ => None,
        };

        Ok(match passthrough {
            Some(components) => Self {
                width,
                height,
                components,
                bits_per_component: 8,
                encoding: LogoEncoding::Dct,
                data,
            },
            None => Self {
                width,
                height,
                components: 3,
                bits_per_component: 8,
                encoding: LogoEncoding::Raw,
                data: decoded.to_rgb8().into_raw(),
            },
        })
    }

    pub fn color_space(&self) -> &'static str {
        match self.components {
            1 => "DeviceGray",
            _ => "DeviceRGB",
        }
    }

    /// Displayed height for a given displayed width, keeping the aspect ratio.
    pub fn height_for_width(&self, width: f32) -> f32 {
        width * self.height as f32 / self.width as f32
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    pub(crate) fn tiny_jpeg(width: u32, height: u32) -> Vec<u8> {
        let pixels = RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        encode(DynamicImage::ImageRgb8(pixels), ImageFormat::Jpeg)
    }

    pub(crate) fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = RgbaImage::from_pixel(width, height, image::Rgba([0, 90, 160, 255]));
        encode(DynamicImage::ImageRgba8(pixels), ImageFormat::Png)
    }

    #[test]
    fn test_jpeg_is_passed_through() {
        let bytes = tiny_jpeg(40, 10);
        let logo = LogoImage::from_bytes(bytes.clone()).unwrap();
        assert_eq!((logo.width, logo.height), (40, 10));
        assert_eq!(logo.encoding, LogoEncoding::Dct);
        assert_eq!(logo.components, 3);
        assert_eq!(logo.color_space(), "DeviceRGB");
        assert_eq!(logo.data, bytes);
        assert_eq!(logo.height_for_width(40.0), 10.0);
    }

    #[test]
    fn test_grey_jpeg_keeps_one_component() {
        let grey = GrayImage::from_pixel(8, 8, image::Luma([128]));
        let logo = LogoImage::from_bytes(encode(DynamicImage::ImageLuma8(grey), ImageFormat::Jpeg))
            .unwrap();
        assert_eq!(logo.encoding, LogoEncoding::Dct);
        assert_eq!(logo.color_space(), "DeviceGray");
    }

    #[test]
    fn test_png_becomes_raw_rgb() {
        let logo = LogoImage::from_bytes(tiny_png(4, 2)).unwrap();
        assert_eq!((logo.width, logo.height), (4, 2));
        assert_eq!(logo.encoding, LogoEncoding::Raw);
        assert_eq!(logo.data.len(), 4 * 2 * 3);
        assert_eq!(&logo.data[..3], &[0, 90, 160]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(LogoImage::from_bytes(b"not an image at all".to_vec()).is_err());
    }

    #[test]
    fn test_rejects_truncated() {
        let mut bytes = tiny_png(10, 10);
        bytes.truncate(20);
        assert!(LogoImage::from_bytes(bytes).is_err());
    }

    #[test]
    fn test_unreadable_logo_is_render_error() {
        let err = LogoImage::load(Path::new("/no/such/logo.jpg")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Render);
    }
}
