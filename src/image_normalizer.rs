//! Geometric corrections applied to every captured frame before it is
//! classified and logged.
//!
//! Both transforms are total: when a transform cannot be produced the input
//! image is handed back untouched.

use image::{DynamicImage, GenericImageView};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
enum TransformError {
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("crop side is zero for a {width}x{height} image")]
    ZeroCrop { width: u32, height: u32 },
}

/// Rotates the raw sensor image 90 degrees clockwise so a portrait-held
/// device gets an upright image.
pub fn fix_orientation(image: DynamicImage) -> DynamicImage {
    match try_fix_orientation(&image) {
        Ok(rotated) => rotated,
        Err(_) => image,
    }
}

/// Crops the square of side `min(width, height / 2)` anchored at the origin.
pub fn crop_to_top_square(image: DynamicImage) -> DynamicImage {
    match try_crop_to_top_square(&image) {
        Ok(cropped) => cropped,
        Err(_) => image,
    }
}

/// Orientation fix followed by the top-square crop.
pub fn normalize(image: DynamicImage) -> DynamicImage {
    crop_to_top_square(fix_orientation(image))
}

/// Side of the square `crop_to_top_square` cuts from a `width` x `height` image.
pub fn top_square_side(width: u32, height: u32) -> u32 {
    width.min(height / 2)
}

fn try_fix_orientation(image: &DynamicImage) -> Result<DynamicImage, TransformError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::Empty { width, height });
    }

    Ok(image.rotate90())
}

fn try_crop_to_top_square(image: &DynamicImage) -> Result<DynamicImage, TransformError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::Empty { width, height });
    }

    let side = top_square_side(width, height);
    if side == 0 {
        return Err(TransformError::ZeroCrop { width, height });
    }

    Ok(image.crop_imm(0, 0, side, side))
}
