use std::fs;

use json::JsonValue;
use log::info;

use crate::error::{Error, Result};
use crate::ibm_model_1::TrainedModel;
use crate::types::{BestTranslations, WordMap};

impl TrainedModel {
    // {"e": {"f": p, ...}, ...}
    pub fn to_json(&self) -> Result<JsonValue> {
        let source = &self.vocabularies.source;
        let mut table = JsonValue::new_object();
        for (e, row) in self.probabilities.rows().enumerate() {
            let mut row_obj = JsonValue::new_object();
            for (f, p) in row.iter().enumerate() {
                row_obj.insert(source.word(f), *p)?;
            }
            table.insert(self.vocabularies.target.word(e), row_obj)?;
        }
        Ok(table)
    }

    pub fn save(&self, file_name: &str) -> Result<()> {
        info!("Saving translation table to file: {}", file_name);
        let data = self.to_json()?;
        fs::write(file_name, data.pretty(2)).map_err(|e| Error::io(file_name, e))
    }
}

// {"e": "f", ...}
pub fn summary_to_json(summary: &BestTranslations) -> Result<JsonValue> {
    let mut obj = JsonValue::new_object();
    for (target, source) in summary {
        obj.insert(target, source.as_str())?;
    }
    Ok(obj)
}

pub fn save_summary(summary: &BestTranslations, file_name: &str) -> Result<()> {
    info!("Saving {} translations to file: {}", summary.len(), file_name);
    let data = summary_to_json(summary)?;
    fs::write(file_name, data.dump()).map_err(|e| Error::io(file_name, e))
}

pub fn parse_summary(file_contents: &str) -> Result<WordMap> {
    let data = json::parse(file_contents)?;
    if !data.is_object() {
        return Err(Error::SummaryNotObject);
    }
    let mut words = WordMap::new();
    for (target, source) in data.entries() {
        let source = source.as_str().ok_or(Error::SummaryNotObject)?;
        words.insert(target.to_owned(), source.to_owned());
    }
    Ok(words)
}

pub fn load_summary(file_name: &str) -> Result<WordMap> {
    info!("Loading translations from file: {}", file_name);
    let file_contents = fs::read_to_string(file_name).map_err(|e| Error::io(file_name, e))?;
    parse_summary(&file_contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainConfig;
    use crate::corpus::SentencePair;
    use crate::ibm_model_1::summary::summarize;
    use crate::ibm_model_1::train_model;

    fn trained() -> TrainedModel {
        let corpus = vec![SentencePair::new("a", "x"), SentencePair::new("b \"q\"", "y")];
        train_model(&corpus, TrainConfig::default()).unwrap()
    }

    #[test]
    fn table_json_keeps_vocabulary_order() {
        let data = trained().to_json().unwrap();
        let rows = data.entries().map(|(k, _)| k.to_owned()).collect::<Vec<_>>();
        assert_eq!(rows, vec!["a", "b", "\"q\""]);
        assert_eq!(data["a"]["x"].as_f64(), Some(1.0));
        assert_eq!(data["a"]["y"].as_f64(), Some(0.0));
    }

    #[test]
    fn summary_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let path = path.to_str().unwrap();

        let summary = summarize(&trained());
        save_summary(&summary, path).unwrap();
        let words = load_summary(path).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words["\"q\""], "y");
        assert_eq!(words["a"], "x");
    }

    #[test]
    fn summary_must_map_words_to_words() {
        assert!(matches!(parse_summary("[]").unwrap_err(), Error::SummaryNotObject));
        assert!(matches!(parse_summary(r#"{"a": 1}"#).unwrap_err(), Error::SummaryNotObject));
        assert!(parse_summary("{}").unwrap().is_empty());
    }
}
