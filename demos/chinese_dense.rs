//! Dense Chinese cloud built straight from text: segmentation, frequency
//! ranking, then layout. Pass a CJK-capable font file as the first argument.

use ciyun::{text, ChineseTokenizer, ColorScheme, WordCloudBuilder};
use std::fs;
use std::time::Instant;

const ARTICLE: &str = "\
Rust编程语言以内存安全著称。Rust编程语言的所有权模型让并发编程更可靠，\
编译器在编译期就能发现数据竞争。词云可视化把文本里的高频词以不同字号排布，\
高频词越常出现字号越大。中文文本需要先分词，分词之后才能统计词频。\
开源社区为Rust编程语言贡献了大量工具库，图像处理、字体渲染、分词都有成熟的库。\
可视化结果既可以输出SVG也可以输出PNG，词云常用于文章摘要和舆情分析。\
内存安全、并发编程、词云可视化、分词、词频统计，这些主题在本文反复出现。";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let font_path = std::env::args()
        .nth(1)
        .expect("usage: chinese_dense <font.ttf>");
    let font_data = fs::read(&font_path)?;

    let keep = vec!["词云可视化".to_string(), "Rust编程语言".to_string()];
    let stop = vec!["我们".to_string(), "可以".to_string()];

    let tokenizer = ChineseTokenizer::new(&keep, &stop);
    let prepared = tokenizer.prepare(ARTICLE);
    println!("Segmented into {} tokens.", prepared.split_whitespace().count());

    let words = text::rank_words(&prepared, &stop, 200);
    println!("Ranked {} distinct words.", words.len());

    let start = Instant::now();

    let wordcloud = WordCloudBuilder::new()
        .size(1200, 800)
        .color_scheme(ColorScheme::Ocean)
        .font(font_data)
        .padding(2)
        .angles(vec![0.0, 90.0])
        .word_spacing(2.0)
        .font_size_range(14.0, 120.0)
        .seed(42)
        .build(&words)?;

    let output_path = "output_chinese_dense.png";
    fs::write(output_path, wordcloud.to_png(2.0)?)?;

    println!("Success! Time elapsed: {:?}", start.elapsed());
    println!("Saved to {}", output_path);

    Ok(())
}
