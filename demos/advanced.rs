//! Frequency ranking from raw text, then a fully configured builder:
//! custom palette, fixed seed, rotated words.

use ciyun::{text, WordCloudBuilder};
use std::fs;

const SPEECH: &str = "\
We choose to go to the moon. We choose to go to the moon in this decade \
and do the other things, not because they are easy, but because they are \
hard, because that goal will serve to organize and measure the best of \
our energies and skills, because that challenge is one that we are \
willing to accept, one we are unwilling to postpone, and one which we \
intend to win.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let words = text::rank_words(SPEECH, &[], 100);
    println!("Ranked {} distinct words.", words.len());

    let wordcloud = WordCloudBuilder::new()
        .size(640, 480)
        .background("#101418")
        .colors(vec!["#ffd166", "#06d6a0", "#118ab2", "#ef476f"])
        .angles(vec![0.0, 90.0])
        .font_size_range(16.0, 110.0)
        .word_spacing(3.0)
        .seed(7)
        .build(&words)?;

    fs::write("output_advanced.png", wordcloud.to_png(1.0)?)?;
    println!("Generated advanced word cloud: output_advanced.png");

    Ok(())
}
