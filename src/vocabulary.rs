use std::collections::HashMap;

use crate::corpus::{Corpus, SentencePair};
use crate::types::WordId;

/// Distinct words of one language role, kept in first-occurrence order.
///
/// The order is the key order of every table built on top of the vocabulary:
/// rows and columns of a `ProbabilityModel`, the flattening used by the
/// distance metric and the order of serialized output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, WordId>,
}

impl Vocabulary {
    pub fn new() -> Vocabulary {
        Vocabulary::default()
    }

    /// Returns the id of `word`, adding it if it was not seen before.
    pub fn insert(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = self.words.len();
        self.words.push(word.to_owned());
        self.ids.insert(word.to_owned(), id);
        id
    }

    pub fn id(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }
}

impl<'a> FromIterator<&'a str> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        for word in iter {
            vocab.insert(word);
        }
        vocab
    }
}

/// Both vocabularies of a corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabularies {
    pub target: Vocabulary,
    pub source: Vocabulary,
}

impl Vocabularies {
    pub fn extract(corpus: &Corpus) -> Vocabularies {
        let mut vocab = Vocabularies::default();
        for pair in corpus {
            vocab.add(pair);
        }
        vocab
    }

    /// Adds the words of `pair` and returns their ids in sentence order,
    /// repeats included.
    pub fn add(&mut self, pair: &SentencePair) -> (Vec<WordId>, Vec<WordId>) {
        let target = pair.target.iter().map(|w| self.target.insert(w)).collect();
        let source = pair.source.iter().map(|w| self.source.insert(w)).collect();
        (target, source)
    }
}
