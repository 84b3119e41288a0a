use image::{imageops, DynamicImage, GenericImageView, RgbImage};
use tract_onnx::prelude::*;

/// Per-channel normalization applied after scaling pixels to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl ChannelStats {
    pub const IDENTITY: ChannelStats = ChannelStats {
        mean: [0.0, 0.0, 0.0],
        std: [1.0, 1.0, 1.0],
    };
}

/// Fits the image inside `width` x `height` keeping its aspect ratio and pads
/// the remainder black, centered.
pub fn letterbox(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let (w, h) = image.dimensions();

    if u64::from(w) * u64::from(height) == u64::from(h) * u64::from(width) {
        return image
            .resize_exact(width, height, imageops::FilterType::Triangle)
            .to_rgb8();
    }

    let scale = (width as f32 / w as f32).min(height as f32 / h as f32);
    let new_w = ((w as f32 * scale) as u32).clamp(1, width);
    let new_h = ((h as f32 * scale) as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::overlay(&mut padded, &scaled, i64::from(x_offset), i64::from(y_offset));

    padded
}

/// NCHW `f32` tensor of shape `[1, 3, height, width]`.
pub fn image_to_tensor(rgb: &RgbImage, stats: ChannelStats) -> Tensor {
    let (width, height) = rgb.dimensions();

    tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let value = rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
            (value - stats.mean[c]) / stats.std[c]
        },
    )
    .into_tensor()
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    stats: ChannelStats,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(format!("cannot build an input tensor from a {}x{} image", w, h).into());
    }
    if width == 0 || height == 0 {
        return Err(format!("invalid model input shape {}x{}", width, height).into());
    }
    if stats.std.iter().any(|s| *s == 0.0) {
        return Err("channel std must be non-zero".into());
    }

    let resized = letterbox(image, width, height);

    Ok(image_to_tensor(&resized, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn filled(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let img = ImageBuffer::from_pixel(width, height, Rgb(color));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_image_to_tensor_square() {
        let image = filled(100, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224, ChannelStats::IDENTITY).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[224 * 224], 0.0);
        assert_eq!(slice[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_image_to_tensor_rectangle_is_centered() {
        let image = filled(200, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 64, 64, ChannelStats::IDENTITY).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 64, 64]);

        let slice = tensor.as_slice::<f32>().unwrap();
        // red at the center, black padding at the top row
        assert_eq!(slice[32 * 64 + 32], 1.0);
        assert_eq!(slice[0], 0.0);
    }

    #[test]
    fn test_image_to_tensor_normalization() {
        let image = filled(10, 10, [128, 128, 128]);
        let stats = ChannelStats {
            mean: [0.5, 0.5, 0.5],
            std: [0.25, 0.25, 0.25],
        };

        let tensor = resize_image_to_tensor(&image, 8, 8, stats).unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = (128.0 / 255.0 - 0.5) / 0.25;
        assert!((slice[0] - expected).abs() < 0.0001);
        assert!((slice[64] - expected).abs() < 0.0001);
        assert!((slice[128] - expected).abs() < 0.0001);
    }

    #[test]
    fn test_resize_image_to_tensor_rejects_empty_image() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(resize_image_to_tensor(&image, 8, 8, ChannelStats::IDENTITY).is_err());
    }
}
