//! Mask images: the silhouette a cloud is packed into and the color source
//! words are recolored from.

use crate::{Error, Result};
use image::{imageops::FilterType, Rgba, RgbaImage};
use std::path::Path;
use tiny_skia::Pixmap;

/// Built-in mask silhouettes, shipped as SVG assets.
#[derive(Debug, Clone, Copy, Default)]
pub enum MaskShape {
    #[default]
    Circle,
    Cloud,
    Heart,
    Star,
    Triangle,
}

impl MaskShape {
    pub fn bytes(&self) -> &'static [u8] {
        match self {
            MaskShape::Circle => include_bytes!("../assets/circle.svg"),
            MaskShape::Cloud => include_bytes!("../assets/cloud.svg"),
            MaskShape::Heart => include_bytes!("../assets/heart.svg"),
            MaskShape::Star => include_bytes!("../assets/star.svg"),
            MaskShape::Triangle => include_bytes!("../assets/triangle.svg"),
        }
    }
}

/// A decoded mask. Pixels decide placement (near-white or transparent areas
/// block words) and supply the colors used when a cloud is recolored.
#[derive(Debug, Clone)]
pub struct Mask {
    pixels: RgbaImage,
}

impl Mask {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decodes SVG first (rendered at its intrinsic size onto a white
    /// background, so transparent SVG regions read as blocked), then falls
    /// back to raster formats.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let opt = usvg::Options::default();
        if let Ok(tree) = usvg::Tree::from_data(bytes, &opt) {
            let size = tree.size().to_int_size();
            let mut pixmap = Pixmap::new(size.width(), size.height())
                .ok_or_else(|| Error::Render("Failed to create mask buffer".into()))?;
            pixmap.fill(tiny_skia::Color::WHITE);
            resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

            let mut pixels = RgbaImage::new(size.width(), size.height());
            for y in 0..size.height() {
                for x in 0..size.width() {
                    if let Some(p) = pixmap.pixel(x, y) {
                        let c = p.demultiply();
                        pixels.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
                    }
                }
            }
            return Ok(Self { pixels });
        }

        if let Ok(img) = image::load_from_memory(bytes) {
            return Ok(Self {
                pixels: img.to_rgba8(),
            });
        }

        Err(Error::Image(
            "The mask format could not be determined".into(),
        ))
    }

    pub fn preset(shape: MaskShape) -> Result<Self> {
        Self::from_bytes(shape.bytes())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Placement rule: a pixel blocks words when it is transparent
    /// (alpha < 128) or near-white (r + g + b >= 750). White background is
    /// the conventional "outside the shape" region of a mask image.
    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        if x >= self.width() || y >= self.height() {
            return true;
        }
        let p = self.pixels.get_pixel(x, y);
        let sum = p[0] as u16 + p[1] as u16 + p[2] as u16;
        p[3] < 128 || sum >= 750
    }

    /// Nearest-neighbor resample, used when the canvas differs from the
    /// mask's intrinsic size.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self {
            pixels: image::imageops::resize(&self.pixels, width, height, FilterType::Nearest),
        }
    }

    /// Average RGB of the given rectangle, clamped to the mask bounds,
    /// as a `#rrggbb` hex string. Used to recolor a word from the mask
    /// region under its layout box.
    pub fn region_color(&self, x: i32, y: i32, width: u32, height: u32) -> String {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = ((x + width as i32).max(0) as u32).min(self.width());
        let y1 = ((y + height as i32).max(0) as u32).min(self.height());

        if x0 >= x1 || y0 >= y1 {
            return "#000000".to_string();
        }

        let mut sum = [0u64; 3];
        for py in y0..y1 {
            for px in x0..x1 {
                let p = self.pixels.get_pixel(px, py);
                sum[0] += p[0] as u64;
                sum[1] += p[1] as u64;
                sum[2] += p[2] as u64;
            }
        }

        let count = ((x1 - x0) * (y1 - y0)) as u64;
        format!(
            "#{:02x}{:02x}{:02x}",
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8
        )
    }

    pub(crate) fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
