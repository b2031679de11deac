//! Chinese text preparation: jieba segmentation with keep-words and
//! stop-words, producing a space-joined token stream for frequency
//! counting downstream.

use jieba_rs::Jieba;
use std::collections::HashSet;

/// Segments Chinese text. Each tokenizer owns its jieba instance, so
/// keep-words registered here never leak into other tokenizers.
pub struct ChineseTokenizer {
    jieba: Jieba,
    stop_words: HashSet<String>,
    min_word_len: usize,
}

impl ChineseTokenizer {
    /// `keep_words` are registered with the segmenter so they are never
    /// split; `stop_words` are dropped from the output.
    pub fn new(keep_words: &[String], stop_words: &[String]) -> Self {
        let mut jieba = Jieba::new();
        for word in keep_words {
            jieba.add_word(word, None, None);
        }
        Self {
            jieba,
            stop_words: stop_words.iter().cloned().collect(),
            min_word_len: 2,
        }
    }

    /// Minimum retained token length in characters. Defaults to 2, which
    /// drops the single-character tokens segmentation produces in bulk.
    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len.max(1);
        self
    }

    /// Segments in precise mode (HMM enabled) and space-joins the retained
    /// tokens in segmentation order. Duplicates are kept: repetition is how
    /// frequency reaches the ranking stage.
    pub fn prepare(&self, text: &str) -> String {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::trim)
            .filter(|token| {
                token.chars().count() >= self.min_word_len
                    && !self.stop_words.contains(*token)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_character_tokens_are_dropped() {
        let tokenizer = ChineseTokenizer::new(&[], &[]);
        let prepared = tokenizer.prepare("我爱北京天安门");
        assert!(prepared.split_whitespace().all(|t| t.chars().count() > 1));
        assert!(prepared.contains("北京"));
        assert!(prepared.contains("天安门"));
    }

    #[test]
    fn stop_words_never_appear() {
        let stop = vec!["北京".to_string()];
        let tokenizer = ChineseTokenizer::new(&[], &stop);
        let prepared = tokenizer.prepare("我爱北京天安门");
        assert!(prepared.split_whitespace().all(|t| t != "北京"));
        assert!(prepared.contains("天安门"));
    }

    #[test]
    fn keep_words_stay_whole() {
        let keep = vec!["云计算".to_string()];
        let with_keep = ChineseTokenizer::new(&keep, &[]);
        let prepared = with_keep.prepare("云计算改变了很多行业");
        assert!(prepared.split_whitespace().any(|t| t == "云计算"));
    }

    #[test]
    fn keep_words_do_not_leak_across_tokenizers() {
        let keep = vec!["超长自定义词".to_string()];
        let _with_keep = ChineseTokenizer::new(&keep, &[]);

        let plain = ChineseTokenizer::new(&[], &[]);
        let prepared = plain.prepare("超长自定义词出现了");
        assert!(prepared.split_whitespace().all(|t| t != "超长自定义词"));
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let tokenizer = ChineseTokenizer::new(&[], &[]);
        let prepared = tokenizer.prepare("北京北京");
        let tokens: Vec<_> = prepared.split_whitespace().collect();
        assert_eq!(tokens, vec!["北京", "北京"]);
    }

    #[test]
    fn min_word_len_is_adjustable() {
        let tokenizer = ChineseTokenizer::new(&[], &[]).with_min_word_len(3);
        let prepared = tokenizer.prepare("我爱北京天安门");
        assert!(!prepared.contains("北京"));
        assert!(prepared.contains("天安门"));
    }
}
