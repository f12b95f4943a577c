//! Decoded RGBA8 texture images.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// CPU-side pixels ready for upload, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// 1x1 opaque white. Sampling it leaves the material colour unchanged.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Self::decode(&bytes)?;
        tracing::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Load a texture, degrading to [`TextureImage::white`] on any failure.
    pub fn load_or_white(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using a plain white texture");
            Self::white()
        })
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path) -> PathBuf {
        let path = dir.join("logo.png");
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn loads_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let tex = TextureImage::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (2, 3));
        assert_eq!(tex.rgba.len(), 2 * 3 * 4);
        assert_eq!(&tex.rgba[4..8], &[10, 20, 30, 255]);
        assert_eq!(tex.bytes_per_row(), 8);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureImage::load(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            TextureImage::decode(b"not an image"),
            Err(TextureError::Decode(_))
        ));
    }

    #[test]
    fn fallback_is_white() {
        let dir = tempfile::tempdir().unwrap();
        let tex = TextureImage::load_or_white(&dir.path().join("missing.png"));
        assert_eq!(tex, TextureImage::white());
    }
}
