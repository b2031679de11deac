//! Word cloud configuration and the placement loop.

use crate::cloud::{LayoutBox, PlacedWord, WordCloud};
use crate::color::ColorScheme;
use crate::font;
use crate::layout::{rasterize_word, ArchimedeanSpiral, OccupancyGrid};
use crate::mask::Mask;
use crate::{Error, Result, WordInput};
use fontdue::{Font, FontSettings};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// When a word does not fit at its weight-proportional size, retry at
/// geometrically smaller sizes before giving up on it.
const SHRINK_FACTOR: f32 = 0.8;

pub struct WordCloudBuilder {
    width: u32,
    height: u32,
    background: String,
    colors: Vec<String>,
    font_data: Option<Vec<u8>>,
    mask: Option<Mask>,
    padding: u32,
    min_font_size: f32,
    max_font_size: f32,
    angles: Vec<f32>,
    seed: Option<u64>,
    word_spacing: f32,
}

impl Default for WordCloudBuilder {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: "#FFFFFF".into(),
            colors: ColorScheme::Ocean
                .colors()
                .into_iter()
                .map(String::from)
                .collect(),
            font_data: None,
            mask: None,
            padding: 2,
            min_font_size: 14.0,
            max_font_size: 120.0,
            angles: vec![0.0],
            seed: None,
            word_spacing: 4.0,
        }
    }
}

impl WordCloudBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(100);
        self.height = height.max(100);
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    pub fn color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.colors = scheme.colors().into_iter().map(String::from).collect();
        self
    }

    pub fn colors(mut self, colors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.colors = colors.into_iter().map(|c| c.into()).collect();
        if self.colors.is_empty() {
            self.colors = ColorScheme::Ocean
                .colors()
                .into_iter()
                .map(String::from)
                .collect();
        }
        self
    }

    /// Font bytes used for both layout and rendering. Without this the
    /// first sans-serif face of the system font database is used.
    pub fn font(mut self, font_data: Vec<u8>) -> Self {
        self.font_data = Some(font_data);
        self
    }

    /// Shapes the cloud: words are only placed where the mask is not
    /// blocked. The mask is resampled to the canvas size if it differs.
    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn font_size_range(mut self, min: f32, max: f32) -> Self {
        self.min_font_size = min.max(8.0);
        self.max_font_size = max.max(self.min_font_size);
        self
    }

    pub fn angles(mut self, angles: Vec<f32>) -> Self {
        self.angles = if angles.is_empty() { vec![0.0] } else { angles };
        self
    }

    pub fn word_spacing(mut self, spacing: f32) -> Self {
        self.word_spacing = spacing.max(0.0);
        self
    }

    /// Fixes the RNG so the layout is reproducible for identical input.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self, words: &[WordInput]) -> Result<WordCloud> {
        if words.is_empty() {
            return Err(Error::Input("Word list cannot be empty".into()));
        }

        let valid_words: Vec<_> = words
            .iter()
            .filter(|w| !w.text.trim().is_empty() && w.weight > 0.0)
            .cloned()
            .collect();

        if valid_words.is_empty() {
            return Err(Error::Input("No valid words provided".into()));
        }

        let font_info = font::resolve(self.font_data.clone())?;
        let font = Font::from_bytes(font_info.data.as_slice(), FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;

        let mut grid = OccupancyGrid::new(self.width, self.height);

        if let Some(mask) = &self.mask {
            self.apply_mask(&mut grid, mask);
        }

        let mut rng = match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };

        // Heaviest words first, so they claim the central area.
        let mut sorted_words = valid_words;
        sorted_words.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());

        let max_weight = sorted_words.first().map(|w| w.weight).unwrap_or(1.0);
        let min_weight = sorted_words.last().map(|w| w.weight).unwrap_or(1.0);
        let weight_range = max_weight - min_weight;

        let mut placed_words = Vec::with_capacity(sorted_words.len());
        let effective_padding = self.padding + (self.word_spacing / 2.0) as u32;

        for word in &sorted_words {
            let normalized = if weight_range > 0.0 {
                (word.weight - min_weight) / weight_range
            } else {
                1.0
            };

            let target_size =
                self.min_font_size + normalized * (self.max_font_size - self.min_font_size);

            let angle = self.angles[rng.random_range(0..self.angles.len())];

            // Shrink-to-fit: step the size down until the word fits or
            // falls under the minimum.
            let mut font_size = target_size;
            let placement = loop {
                if let Some(p) = self.try_place_word(
                    &word.text,
                    font_size,
                    angle,
                    &font,
                    &mut grid,
                    effective_padding,
                    &mut rng,
                ) {
                    break Some(p);
                }
                font_size *= SHRINK_FACTOR;
                if font_size < self.min_font_size {
                    break None;
                }
            };

            match placement {
                Some(p) => {
                    let color = self.colors[rng.random_range(0..self.colors.len())].clone();
                    placed_words.push(PlacedWord {
                        text: word.text.clone(),
                        font_size,
                        x: p.x,
                        y: p.y,
                        rotation: angle,
                        color,
                        layout_box: p.layout_box,
                    });
                }
                None => debug!("no room for {:?}, skipped", word.text),
            }
        }

        if placed_words.is_empty() {
            return Err(Error::Render("Could not place any words".into()));
        }

        debug!(
            "placed {} of {} words on a {}x{} canvas",
            placed_words.len(),
            sorted_words.len(),
            self.width,
            self.height
        );

        Ok(WordCloud {
            width: self.width,
            height: self.height,
            background: self.background,
            words: placed_words,
            font_data: font_info.data,
            font_family: font_info.family_name,
        })
    }

    /// Seeds the occupancy grid from the mask: blocked mask pixels are
    /// unavailable for placement.
    fn apply_mask(&self, grid: &mut OccupancyGrid, mask: &Mask) {
        let sized = mask.resized(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if sized.is_blocked(x, y) {
                    grid.set(x as i32, y as i32);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_place_word(
        &self,
        text: &str,
        font_size: f32,
        angle: f32,
        font: &Font,
        grid: &mut OccupancyGrid,
        padding: u32,
        rng: &mut ChaCha8Rng,
    ) -> Option<Placement> {
        let sprite = rasterize_word(text, font_size, angle, font, padding);

        let start_x = grid.width as i32 / 2;
        let start_y = grid.height as i32 / 2;

        // Random winding direction keeps the layout from drifting one way.
        let dt = if rng.random_bool(0.5) { 1 } else { -1 };

        let spiral = ArchimedeanSpiral::new(grid.width as i32, grid.height as i32, dt);
        let max_iter = 10000;

        for (dx, dy) in spiral.take(max_iter) {
            let current_x = start_x + dx - (sprite.bbox_width as i32 / 2);
            let current_y = start_y + dy - (sprite.bbox_height as i32 / 2);

            if !grid.check_collision(&sprite, current_x, current_y) {
                grid.write_sprite(&sprite, current_x, current_y);

                return Some(Placement {
                    x: current_x as f32 + sprite.anchor_x,
                    y: current_y as f32 + sprite.anchor_y,
                    layout_box: LayoutBox {
                        x: current_x,
                        y: current_y,
                        width: sprite.bbox_width,
                        height: sprite.bbox_height,
                    },
                });
            }
        }

        None
    }
}

struct Placement {
    /// Baseline origin, where the SVG `<text>` element is anchored.
    x: f32,
    y: f32,
    layout_box: LayoutBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_list_is_rejected() {
        let err = WordCloudBuilder::new().build(&[]).unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn zero_weight_words_are_rejected() {
        let words = vec![WordInput::new("ghost", 0.0), WordInput::new("  ", 5.0)];
        let err = WordCloudBuilder::new().build(&words).unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn size_is_clamped_to_a_sane_minimum() {
        let builder = WordCloudBuilder::new().size(10, 10);
        assert_eq!((builder.width, builder.height), (100, 100));
    }

    #[test]
    fn font_size_range_keeps_min_below_max() {
        let builder = WordCloudBuilder::new().font_size_range(50.0, 20.0);
        assert!(builder.min_font_size <= builder.max_font_size);
    }
}
