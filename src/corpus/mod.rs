use json::JsonValue;
use log::debug;

pub mod convert;
pub mod file;

use crate::config::CorpusConfig;
use crate::error::{Error, Result};

/// One aligned sentence pair, already split on whitespace.
#[derive(Clone, Debug, PartialEq)]
pub struct SentencePair {
    pub target: Vec<String>,
    pub source: Vec<String>,
}

pub type Corpus = Vec<SentencePair>;

pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(String::from).collect()
}

impl SentencePair {
    pub fn new(target: &str, source: &str) -> SentencePair {
        SentencePair {
            target: tokenize(target),
            source: tokenize(source),
        }
    }
}

fn get_field<'a>(record: &'a JsonValue, index: usize, field: &str) -> Result<&'a str> {
    if !record.has_key(field) {
        return Err(Error::MissingField { index, field: field.to_owned() });
    }
    record[field]
        .as_str()
        .ok_or_else(|| Error::FieldNotString { index, field: field.to_owned() })
}

/// Builds a corpus from a json array of `{target_field: "...", source_field: "..."}`
/// records. Extra fields are ignored.
pub fn from_json(data: &JsonValue, config: &CorpusConfig) -> Result<Corpus> {
    if !data.is_array() {
        return Err(Error::CorpusNotArray);
    }
    let mut corpus = Corpus::with_capacity(data.len());
    for (index, record) in data.members().enumerate() {
        if !record.is_object() {
            return Err(Error::RecordNotObject { index });
        }
        let target = get_field(record, index, &config.target_field)?;
        let source = get_field(record, index, &config.source_field)?;
        corpus.push(SentencePair::new(target, source));
    }
    debug!("{} corpus records", corpus.len());
    Ok(corpus)
}

pub fn parse(file_contents: &str, config: &CorpusConfig) -> Result<Corpus> {
    let data = json::parse(file_contents)?;
    from_json(&data, config)
}
