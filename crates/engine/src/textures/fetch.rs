//! Texture fetch primitive.
//!
//! Downloads an image over plain HTTPS, decodes it, and extracts raw
//! RGBA pixels in row-major order. Capes are rescaled onto a fixed
//! 64x32 canvas before extraction. Every network or decode failure is
//! an error value here; callers translate it into the documented
//! default texture.

use std::time::Duration;

use async_trait::async_trait;
use image::imageops::FilterType;
use reqwest::Client;
use thiserror::Error;

use causeway_domain::{CAPE_HEIGHT, CAPE_WIDTH};

/// What is being fetched; capes get the fixed-canvas treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Skin,
    Cape,
}

/// Failure of the fetch primitive. Never escapes the texture service
/// as anything other than a default value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Non-success status: {0}")]
    Status(u16),

    #[error("Image decode failed: {0}")]
    Decode(String),
}

/// Source of decoded texture pixels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextureFetcher: Send + Sync {
    /// Fetch and decode `url`, returning row-major RGBA pixels.
    async fn fetch_image(&self, url: &str, kind: FetchKind) -> Result<Vec<u8>, FetchError>;
}

/// HTTPS fetcher used in production.
#[derive(Clone)]
pub struct HttpTextureFetcher {
    client: Client,
}

impl HttpTextureFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

#[async_trait]
impl TextureFetcher for HttpTextureFetcher {
    async fn fetch_image(&self, url: &str, kind: FetchKind) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        decode_pixels(&bytes, kind)
    }
}

/// Decode image bytes into the raw pixel plane the target protocol
/// expects.
pub fn decode_pixels(bytes: &[u8], kind: FetchKind) -> Result<Vec<u8>, FetchError> {
    let mut image =
        image::load_from_memory(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;

    if kind == FetchKind::Cape {
        image = image.resize_exact(CAPE_WIDTH, CAPE_HEIGHT, FilterType::Triangle);
    }

    Ok(image.to_rgba8().into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("png encode");
        bytes.into_inner()
    }

    #[test]
    fn skin_pixels_are_row_major_rgba() {
        let pixels = decode_pixels(&png_bytes(2, 2), FetchKind::Skin).expect("decode");
        assert_eq!(pixels.len(), 2 * 2 * 4);
        assert_eq!(&pixels[0..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn cape_is_normalized_to_fixed_canvas() {
        let pixels = decode_pixels(&png_bytes(22, 17), FetchKind::Cape).expect("decode");
        assert_eq!(pixels.len(), (CAPE_WIDTH * CAPE_HEIGHT * 4) as usize);
    }

    #[test]
    fn undecodable_bytes_are_an_error() {
        let result = decode_pixels(b"not an image", FetchKind::Skin);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
