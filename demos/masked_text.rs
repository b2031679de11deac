//! Full pipeline demo: a text file plus a mask image produce words.png and
//! the mask-composited wordcloud.png.
//!
//! Usage: masked_text <text-file> <mask-image> [out-dir]

use ciyun::{pipeline, CloudTask};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let text = args
        .next()
        .expect("usage: masked_text <text-file> <mask-image> [out-dir]");
    let mask = args
        .next()
        .expect("usage: masked_text <text-file> <mask-image> [out-dir]");
    let out = args.next().unwrap_or_else(|| ".".to_string());

    let task = CloudTask {
        text_path: PathBuf::from(text),
        mask_path: Some(PathBuf::from(mask)),
        output_dir: PathBuf::from(out),
        ..CloudTask::default()
    };

    let output = pipeline::run(&task)?;

    println!(
        "Placed {} words. Wrote {}",
        output.placed_words,
        output.words_png.display()
    );
    if let Some(path) = output.wordcloud_png {
        println!("Composited cloud at {}", path.display());
    }

    Ok(())
}
