use regex::{Captures, Regex};

use crate::error::Result;
use crate::types::WordMap;

/// Word-by-word translator over a trained summary.
pub struct Translator {
    words: WordMap,
    token: Regex,
}

impl Translator {
    pub fn new(words: WordMap) -> Result<Translator> {
        // whitespace-delimited tokens, same split as the corpus
        let token = Regex::new(r"\S+")?;
        Ok(Translator { words, token })
    }

    /// Replaces every known token, leaving unknown tokens and the whitespace
    /// between tokens as they were.
    pub fn translate(&self, sentence: &str) -> String {
        self.token
            .replace_all(sentence, |caps: &Captures| {
                let word = &caps[0];
                self.words.get(word).map(String::as_str).unwrap_or(word).to_owned()
            })
            .into_owned()
    }
}
