//! Width-bounded image downscaling
//!
//! Images wider than the requested width are scaled down to exactly that
//! width, keeping the aspect ratio, and re-encoded in their source format.
//! Narrower images are forwarded byte for byte.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

/// JPEG quality used when a resized image is re-encoded
pub const JPEG_QUALITY: u8 = 80;

#[derive(Debug, thiserror::Error)]
pub enum ImageTransformError {
    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("image task failed: {0}")]
    Task(String),
}

/// Result of [`ImageTransformer::fit_to_width`]
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub data: Bytes,
    pub original_width: u32,
    pub original_height: u32,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub resized: bool,
}

pub struct ImageTransformer;

impl ImageTransformer {
    /// Scale `data` down so it is at most `target_width` pixels wide.
    ///
    /// Dimensions come from the header. The input is still fully decoded, so
    /// corrupt images fail here even when no resize is needed.
    pub fn fit_to_width(
        data: Bytes,
        target_width: u32,
    ) -> Result<TransformedImage, ImageTransformError> {
        let reader = ImageReader::new(Cursor::new(data.as_ref())).with_guessed_format()?;
        let format = match reader.format() {
            Some(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => f,
            Some(other) => {
                return Err(ImageTransformError::UnsupportedFormat(format!("{:?}", other)))
            }
            None => {
                return Err(ImageTransformError::UnsupportedFormat(
                    "unrecognized image data".to_string(),
                ))
            }
        };

        let (width, height) = ImageReader::with_format(Cursor::new(data.as_ref()), format)
            .into_dimensions()?;
        let img = reader.decode()?;

        if width <= target_width {
            tracing::debug!(width, height, target_width, "Image within width, not resizing");
            return Ok(TransformedImage {
                data,
                original_width: width,
                original_height: height,
                width,
                height,
                format,
                resized: false,
            });
        }

        let new_height = scaled_height(width, height, target_width);
        let resized = img.resize_exact(target_width, new_height, FilterType::Lanczos3);
        let encoded = encode(&resized, format)?;

        tracing::debug!(
            original_width = width,
            original_height = height,
            width = target_width,
            height = new_height,
            size_bytes = encoded.len(),
            "Image resized"
        );

        Ok(TransformedImage {
            data: encoded,
            original_width: width,
            original_height: height,
            width: target_width,
            height: new_height,
            format,
            resized: true,
        })
    }

    /// [`fit_to_width`](Self::fit_to_width) on the blocking thread pool.
    pub async fn fit_to_width_blocking(
        data: Bytes,
        target_width: u32,
    ) -> Result<TransformedImage, ImageTransformError> {
        // Decoding and resampling are CPU-bound.
        tokio::task::spawn_blocking(move || Self::fit_to_width(data, target_width))
            .await
            .map_err(|e| ImageTransformError::Task(e.to_string()))?
    }
}

/// Height keeping the aspect ratio at `target_width`, never below one pixel.
fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as f64 * target_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Bytes, ImageTransformError> {
    let (width, height) = img.dimensions();
    let mut buffer = Vec::with_capacity((width * height * 3) as usize);

    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
        }
        other => {
            img.write_to(&mut Cursor::new(&mut buffer), other)?;
        }
    }

    Ok(Bytes::from(buffer))
}
