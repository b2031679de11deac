//! ciyun command-line interface.

use anyhow::{Context, Result};
use ciyun::{pipeline, CloudTask, ColorScheme, Language};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

/// Render a word-frequency cloud image from a text file.
#[derive(Parser)]
#[command(name = "ciyun", version, about)]
struct Cli {
    /// Source text file
    text: PathBuf,

    /// Mask image (SVG, PNG or JPEG) supplying the cloud's shape and colors
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Canvas width, used only without a mask
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Canvas height, used only without a mask
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Text language; "cn" enables Chinese segmentation
    #[arg(long, default_value = "en")]
    lang: String,

    /// Font file (required for --lang cn)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Term the segmenter must keep as one token (repeatable)
    #[arg(long = "keep", value_name = "WORD")]
    keep: Vec<String>,

    /// Word to exclude from the cloud (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    stopwords: Vec<String>,

    /// File with one stop word per line
    #[arg(long, value_name = "FILE")]
    stopwords_file: Option<PathBuf>,

    /// Output directory for words.png / wordcloud.png
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Layout seed, fixed for reproducible output
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Keep at most this many distinct words
    #[arg(long, default_value_t = 1000)]
    max_words: usize,

    /// Upper bound for the font size of the heaviest word
    #[arg(long, default_value_t = 400.0)]
    max_font_size: f32,

    /// Palette for unmasked clouds
    #[arg(long, value_enum, default_value = "ocean")]
    scheme: ColorScheme,

    /// Verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut stop_words = cli.stopwords;
    if let Some(path) = &cli.stopwords_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading stop words from {}", path.display()))?;
        stop_words.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }

    let task = CloudTask {
        text_path: cli.text,
        mask_path: cli.mask,
        width: cli.width,
        height: cli.height,
        language: Language::from_code(&cli.lang),
        font_path: cli.font,
        keep_words: cli.keep,
        stop_words,
        output_dir: cli.out,
        seed: cli.seed,
        max_words: cli.max_words,
        max_font_size: cli.max_font_size,
        color_scheme: cli.scheme,
    };

    let output = pipeline::run(&task).context("word cloud generation failed")?;

    info!("{} words placed", output.placed_words);
    println!("wrote {}", output.words_png.display());
    if let Some(path) = &output.wordcloud_png {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
