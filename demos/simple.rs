//! Smallest possible usage: weighted words in, PNG and SVG out.

use ciyun::generate;
use std::fs;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let words = vec![
        ("wordcloud", 100.0),
        ("frequency", 75.0),
        ("layout", 65.0),
        ("mask", 55.0),
        ("color", 48.0),
        ("spiral", 40.0),
        ("canvas", 34.0),
        ("glyph", 28.0),
        ("token", 22.0),
        ("render", 18.0),
    ];

    let wordcloud = generate(&words)?;
    println!("Placed {} of {} words.", wordcloud.words.len(), words.len());

    fs::write("output_simple.png", wordcloud.to_png(2.0)?)?;
    fs::write("output_simple.svg", wordcloud.to_svg())?;

    println!("Saved output_simple.png and output_simple.svg in {:?}", start.elapsed());
    Ok(())
}
