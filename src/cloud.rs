//! The laid-out cloud and its output formats.

use crate::color::parse_hex_color;
use crate::mask::Mask;
use crate::{Error, Result};
use log::debug;
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};

/// Pixel rectangle a placed word's sprite occupies on the canvas. Used to
/// sample the mask region under a word when recoloring.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A word with its final size, position, rotation and color.
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub color: String,
    pub layout_box: LayoutBox,
}

#[derive(Debug)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
    pub(crate) font_data: Vec<u8>,
    pub(crate) font_family: String,
}

impl WordCloud {
    /// Replaces every word's palette color with the average color of the
    /// mask region under its layout box.
    pub fn recolor(&mut self, mask: &Mask) {
        let sized = mask.resized(self.width, self.height);
        for word in &mut self.words {
            let b = word.layout_box;
            word.color = sized.region_color(b.x, b.y, b.width, b.height);
        }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(8192);

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.background
        ));

        svg.push_str(&format!(
            r#"<style>text{{font-family:'{}',Arial,sans-serif}}</style>"#,
            escape_xml(&self.font_family)
        ));

        for word in &self.words {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" fill="{}" font-size="{:.1}" transform="rotate({:.1} {:.1} {:.1})">{}</text>"#,
                word.x,
                word.y,
                word.color,
                word.font_size,
                word.rotation,
                word.x,
                word.y,
                escape_xml(&word.text)
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// Rasterizes the cloud to PNG bytes. `scale` multiplies the canvas
    /// size; 1.0 keeps the on-disk dimensions equal to the layout canvas.
    pub fn to_png(&self, scale: f32) -> Result<Vec<u8>> {
        let svg_content = self.to_svg();
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_font_source(usvg::fontdb::Source::Binary(Arc::new(
            self.font_data.clone(),
        )));

        debug!("rendering SVG with font family {:?}", self.font_family);

        let options = usvg::Options {
            font_family: self.font_family.clone(),
            fontdb: Arc::new(fontdb),
            ..Default::default()
        };

        let tree =
            usvg::Tree::from_str(&svg_content, &options).map_err(|e| Error::Svg(e.to_string()))?;
        let size = tree.size().to_int_size();
        let out_width = (size.width() as f32 * scale).max(1.0) as u32;
        let out_height = (size.height() as f32 * scale).max(1.0) as u32;

        let mut pixmap = Pixmap::new(out_width, out_height)
            .ok_or_else(|| Error::Render("Failed to create pixel buffer".into()))?;

        if let Some(color) = parse_hex_color(&self.background) {
            pixmap.fill(color);
        }

        let transform = Transform::from_scale(scale, scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| Error::Render(e.to_string()))
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cloud() -> WordCloud {
        WordCloud {
            width: 200,
            height: 100,
            background: "#FFFFFF".into(),
            words: vec![PlacedWord {
                text: "a<b".into(),
                font_size: 24.0,
                x: 50.0,
                y: 60.0,
                rotation: 0.0,
                color: "#264653".into(),
                layout_box: LayoutBox {
                    x: 40,
                    y: 40,
                    width: 40,
                    height: 30,
                },
            }],
            font_data: Vec::new(),
            font_family: "Test".into(),
        }
    }

    #[test]
    fn svg_escapes_word_text() {
        let svg = sample_cloud().to_svg();
        assert!(svg.contains("a&lt;b"));
        assert!(!svg.contains(">a<b<"));
    }

    #[test]
    fn svg_carries_canvas_and_background() {
        let svg = sample_cloud().to_svg();
        assert!(svg.contains(r#"width="200" height="100""#));
        assert!(svg.contains(r##"fill="#FFFFFF""##));
    }

    #[test]
    fn recolor_samples_the_mask_region() {
        use image::{Rgba, RgbaImage};
        use std::io::Cursor;

        let img = RgbaImage::from_pixel(200, 100, Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let mask = Mask::from_bytes(&buf.into_inner()).unwrap();

        let mut cloud = sample_cloud();
        cloud.recolor(&mask);
        assert_eq!(cloud.words[0].color, "#0a141e");
    }
}
