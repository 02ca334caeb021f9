//! Texture loading for fabric swatches

use crate::error::{PreviewError, PreviewResult};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Decoded RGBA8 (sRGB) texture data
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub name: String,
}

impl TextureData {
    /// Load texture from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PreviewResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let img = image::open(path).map_err(|source| PreviewError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(img, &name))
    }

    /// Load texture from encoded bytes
    pub fn from_bytes(bytes: &[u8], name: &str) -> PreviewResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|source| PreviewError::TextureDecode {
            name: name.to_string(),
            source,
        })?;
        Ok(Self::from_image(img, name))
    }

    fn from_image(img: DynamicImage, name: &str) -> Self {
        let (width, height) = img.dimensions();
        let data = img.to_rgba8().into_raw();

        Self {
            width,
            height,
            data,
            name: name.to_string(),
        }
    }

    /// Create a 1x1 texture of a single color
    pub fn solid_color(color: [u8; 4], name: &str) -> Self {
        Self {
            width: 1,
            height: 1,
            data: color.to_vec(),
            name: name.to_string(),
        }
    }

    /// Size of the pixel data in bytes
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn test_missing_file_is_error() {
        let err = TextureData::from_file("/definitely/not/here/denim.png").unwrap_err();
        assert!(matches!(err, PreviewError::TextureLoad { .. }));
        assert!(err.to_string().contains("denim.png"));
    }

    #[test]
    fn test_garbage_bytes_is_error() {
        let err = TextureData::from_bytes(b"not an image", "garbage").unwrap_err();
        assert!(matches!(err, PreviewError::TextureDecode { .. }));
    }

    #[test]
    fn test_from_png_bytes() {
        let img = RgbaImage::from_pixel(2, 3, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let tex = TextureData::from_bytes(&bytes, "swatch").unwrap();
        assert_eq!((tex.width, tex.height), (2, 3));
        assert_eq!(tex.byte_len(), 2 * 3 * 4);
        assert_eq!(&tex.data[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_solid_color() {
        let tex = TextureData::solid_color([255, 0, 0, 255], "red");
        assert_eq!(tex.width, 1);
        assert_eq!(tex.data, vec![255, 0, 0, 255]);
    }
}
