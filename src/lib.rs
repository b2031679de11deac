/*!
 * ciyun — 词云
 *
 * Renders word-frequency cloud images from text files. A cloud can be
 * shaped and colored by a mask image (SVG, PNG or JPEG), and Chinese
 * text is segmented with jieba before frequency counting.
 *
 * The high-level entry point is [`pipeline::run`], which drives the whole
 * text-to-PNG flow. The lower layers are usable on their own:
 * [`WordCloudBuilder`] lays out pre-weighted words, [`Mask`] decodes
 * silhouette/color sources and [`compose::overlay`] composites a rendered
 * cloud with its mask.
 */

use std::path::PathBuf;
use thiserror::Error;

pub mod builder;
pub mod chinese;
pub mod cloud;
pub mod color;
pub mod compose;
mod font;
mod layout;
pub mod mask;
pub mod pipeline;
pub mod text;

pub use builder::WordCloudBuilder;
pub use chinese::ChineseTokenizer;
pub use cloud::{LayoutBox, PlacedWord, WordCloud};
pub use color::ColorScheme;
pub use mask::{Mask, MaskShape};
pub use pipeline::{CloudOutput, CloudTask, Language};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Error)]
pub enum Error {
    #[error("text path is not a file: {}", .0.display())]
    TextPath(PathBuf),
    #[error("a Chinese font file is required when the language is Chinese")]
    ChineseFont,
    #[error("font path is not a file: {}", .0.display())]
    FontPath(PathBuf),
    #[error("mask path is not a file: {}", .0.display())]
    MaskPath(PathBuf),
    #[error("save path is not a directory: {}", .0.display())]
    SaveDir(PathBuf),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("SVG error: {0}")]
    Svg(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// =============================================================================
// Public Data Types
// =============================================================================

/// A word with its frequency weight, ready for layout.
#[derive(Debug, Clone)]
pub struct WordInput {
    pub text: String,
    pub weight: f32,
}

impl WordInput {
    pub fn new(text: impl Into<String>, weight: f32) -> Self {
        Self {
            text: text.into(),
            weight: weight.max(0.0),
        }
    }
}

/// Lay out a slice of `(word, weight)` pairs with default settings.
pub fn generate(words: &[(&str, f32)]) -> Result<WordCloud> {
    let inputs: Vec<WordInput> = words
        .iter()
        .map(|(text, weight)| WordInput::new(*text, *weight))
        .collect();

    WordCloudBuilder::new().build(&inputs)
}
