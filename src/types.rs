use std::collections::HashMap;

// Index of a word inside its Vocabulary
pub type WordId = usize;

// (target word, best source word), in target vocabulary order
pub type BestTranslations = Vec<(String, String)>;

// target word -> source word, as read back by the translator
pub type WordMap = HashMap<String, String>;
