//! Compositing a rendered cloud with its mask: word pixels take the mask's
//! color, background pixels stay as rendered.

use crate::{Error, Result};
use image::{Rgba, RgbaImage};

/// Channel values above this are treated as background. Anything darker in
/// any channel is considered part of a rendered word.
const NEAR_WHITE: u8 = 250;

/// For every pixel: if any of the cloud's r, g, b channels is at or below
/// the near-white threshold, the output takes the mask pixel's RGB at full
/// opacity; otherwise the cloud pixel passes through unchanged.
///
/// The images must have identical dimensions.
pub fn overlay(cloud: &RgbaImage, mask: &RgbaImage) -> Result<RgbaImage> {
    if cloud.dimensions() != mask.dimensions() {
        return Err(Error::Image(format!(
            "cloud is {}x{} but mask is {}x{}",
            cloud.width(),
            cloud.height(),
            mask.width(),
            mask.height()
        )));
    }

    let mut out = cloud.clone();
    for y in 0..cloud.height() {
        for x in 0..cloud.width() {
            let c = cloud.get_pixel(x, y);
            if c[0] <= NEAR_WHITE || c[1] <= NEAR_WHITE || c[2] <= NEAR_WHITE {
                let m = mask.get_pixel(x, y);
                out.put_pixel(x, y, Rgba([m[0], m[1], m[2], 255]));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_pixels_take_the_mask_color_at_full_opacity() {
        let cloud = RgbaImage::from_pixel(4, 4, Rgba([30, 60, 90, 255]));
        let mask = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 128]));

        let out = overlay(&cloud, &mask).unwrap();
        for p in out.pixels() {
            assert_eq!(*p, Rgba([200, 10, 10, 255]));
        }
    }

    #[test]
    fn background_pixels_pass_through_unchanged() {
        let cloud = RgbaImage::from_pixel(4, 4, Rgba([251, 252, 253, 255]));
        let mask = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]));

        let out = overlay(&cloud, &mask).unwrap();
        for p in out.pixels() {
            assert_eq!(*p, Rgba([251, 252, 253, 255]));
        }
    }

    #[test]
    fn one_dark_channel_is_enough_to_count_as_a_word() {
        // 250 in a single channel crosses the threshold.
        let cloud = RgbaImage::from_pixel(1, 1, Rgba([255, 250, 255, 255]));
        let mask = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));

        let out = overlay(&cloud, &mask).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn mixed_image_is_composited_per_pixel() {
        let cloud = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255]) // word pixel
            } else {
                Rgba([255, 255, 255, 255]) // background
            }
        });
        let mask = RgbaImage::from_pixel(2, 1, Rgba([9, 8, 7, 255]));

        let out = overlay(&cloud, &mask).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([9, 8, 7, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let cloud = RgbaImage::new(4, 4);
        let mask = RgbaImage::new(4, 5);
        let err = overlay(&cloud, &mask).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }
}
