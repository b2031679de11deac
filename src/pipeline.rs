//! The text-file-to-PNG pipeline: validate paths, prepare text, lay out the
//! cloud, recolor from the mask, write `words.png` and, with a mask, the
//! composited `wordcloud.png`.

use crate::builder::WordCloudBuilder;
use crate::chinese::ChineseTokenizer;
use crate::color::ColorScheme;
use crate::mask::Mask;
use crate::{compose, text, Error, Result};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Text language, selecting the preparation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Segment with jieba before frequency counting. Requires a font file.
    Chinese,
    /// Use the file contents as-is.
    #[default]
    English,
}

impl Language {
    /// `"cn"` selects Chinese; any other code is the plain branch.
    pub fn from_code(code: &str) -> Self {
        if code == "cn" {
            Language::Chinese
        } else {
            Language::English
        }
    }
}

/// One cloud-rendering job. Every invocation owns its word lists, so
/// nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct CloudTask {
    pub text_path: PathBuf,
    pub mask_path: Option<PathBuf>,
    /// Canvas size, used only when no mask is given.
    pub width: u32,
    pub height: u32,
    pub language: Language,
    /// Required (and must exist) for Chinese; optional otherwise.
    pub font_path: Option<PathBuf>,
    /// Terms the segmenter must keep as single tokens.
    pub keep_words: Vec<String>,
    /// Words excluded from the cloud.
    pub stop_words: Vec<String>,
    pub output_dir: PathBuf,
    pub seed: u64,
    pub max_words: usize,
    pub max_font_size: f32,
    /// Palette for unmasked clouds; a mask's colors take precedence.
    pub color_scheme: ColorScheme,
}

impl Default for CloudTask {
    fn default() -> Self {
        Self {
            text_path: PathBuf::new(),
            mask_path: None,
            width: 400,
            height: 400,
            language: Language::English,
            font_path: None,
            keep_words: Vec::new(),
            stop_words: Vec::new(),
            output_dir: PathBuf::from("."),
            seed: 42,
            max_words: 1000,
            max_font_size: 400.0,
            color_scheme: ColorScheme::default(),
        }
    }
}

impl CloudTask {
    pub fn new(text_path: impl Into<PathBuf>) -> Self {
        Self {
            text_path: text_path.into(),
            ..Self::default()
        }
    }
}

/// What a successful run wrote.
#[derive(Debug)]
pub struct CloudOutput {
    pub words_png: PathBuf,
    /// Present when a mask was used.
    pub wordcloud_png: Option<PathBuf>,
    pub placed_words: usize,
}

/// Runs the whole pipeline. The output directory is checked only when the
/// first file is written, so with an invalid directory everything up to and
/// including rendering still executes and the result is then discarded.
pub fn run(task: &CloudTask) -> Result<CloudOutput> {
    if !task.text_path.is_file() {
        return Err(Error::TextPath(task.text_path.clone()));
    }

    // Text preparation and font selection, by language.
    let (prepared, font_data) = match task.language {
        Language::Chinese => {
            let font_path = match &task.font_path {
                Some(p) if p.is_file() => p,
                _ => return Err(Error::ChineseFont),
            };
            let raw = fs::read_to_string(&task.text_path)?;
            let tokenizer = ChineseTokenizer::new(&task.keep_words, &task.stop_words);
            let prepared = tokenizer.prepare(&raw);
            debug!(
                "segmented {} chars into {} tokens",
                raw.chars().count(),
                prepared.split_whitespace().count()
            );
            (prepared, Some(fs::read(font_path)?))
        }
        Language::English => {
            let font_data = match &task.font_path {
                Some(p) if p.is_file() => Some(fs::read(p)?),
                Some(p) => return Err(Error::FontPath(p.clone())),
                None => None,
            };
            (fs::read_to_string(&task.text_path)?, font_data)
        }
    };

    // Sizing: explicit dimensions without a mask, the mask's intrinsic
    // dimensions with one.
    let mask = match &task.mask_path {
        None => {
            if task.width == 0 || task.height == 0 {
                return Err(Error::Input(
                    "width and height must be positive when no mask is given".into(),
                ));
            }
            None
        }
        Some(path) if path.is_file() => Some(Mask::from_path(path)?),
        Some(path) => return Err(Error::MaskPath(path.clone())),
    };

    let words = text::rank_words(&prepared, &task.stop_words, task.max_words);
    if words.is_empty() {
        return Err(Error::Input("no words left after filtering".into()));
    }
    info!("ranked {} distinct words", words.len());

    let (canvas_w, canvas_h) = match &mask {
        Some(m) => (m.width(), m.height()),
        None => (task.width, task.height),
    };

    let mut builder = WordCloudBuilder::new()
        .size(canvas_w, canvas_h)
        .background("#FFFFFF")
        .color_scheme(task.color_scheme)
        .font_size_range(14.0, task.max_font_size)
        .seed(task.seed);
    if let Some(data) = font_data {
        builder = builder.font(data);
    }
    if let Some(m) = &mask {
        builder = builder.mask(m.clone());
    }

    let mut cloud = builder.build(&words)?;
    info!("placed {} words on {}x{}", cloud.words.len(), canvas_w, canvas_h);

    if let Some(m) = &mask {
        cloud.recolor(m);
    }

    let png = cloud.to_png(1.0)?;

    if !task.output_dir.is_dir() {
        return Err(Error::SaveDir(task.output_dir.clone()));
    }

    let words_png = task.output_dir.join("words.png");
    fs::write(&words_png, &png)?;
    info!("wrote {}", words_png.display());

    let wordcloud_png = match &mask {
        Some(m) => {
            // Reload what was written, then overlay the mask colors.
            let rendered = image::open(&words_png)
                .map_err(|e| Error::Image(e.to_string()))?
                .to_rgba8();
            // The canvas is mask-sized, but the builder clamps tiny sizes,
            // so resample the mask to whatever was actually rendered.
            let sized = m.resized(rendered.width(), rendered.height());
            let composited = compose::overlay(&rendered, sized.pixels())?;

            let path = task.output_dir.join("wordcloud.png");
            composited
                .save(&path)
                .map_err(|e| Error::Image(e.to_string()))?;
            info!("wrote {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(CloudOutput {
        words_png,
        wordcloud_png,
        placed_words: cloud.words.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("cn"), Language::Chinese);
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("fr"), Language::English);
    }

    #[test]
    fn default_task_matches_the_documented_knobs() {
        let task = CloudTask::default();
        assert_eq!((task.width, task.height), (400, 400));
        assert_eq!(task.seed, 42);
        assert_eq!(task.max_words, 1000);
        assert_eq!(task.max_font_size, 400.0);
        assert!(task.keep_words.is_empty());
        assert!(task.stop_words.is_empty());
    }
}
