use std::fs;
use std::ops::Index;

use csv::ReaderBuilder;
use json::JsonValue;
use log::info;

use crate::error::{Error, Result};

/// Turns a two-column csv into a json corpus. The header row names the two
/// record fields, every following row becomes one record.
pub fn csv_to_json(file_contents: &str) -> Result<JsonValue> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(file_contents.as_bytes());

    let headers = rdr.headers()?.clone();
    if headers.len() != 2 {
        return Err(Error::CsvColumns { line: 1, found: headers.len() });
    }
    let lan1 = headers.index(0).trim().to_owned();
    let lan2 = headers.index(1).trim().to_owned();

    let mut corpus = JsonValue::new_array();
    for result in rdr.records() {
        let r = result?;
        if r.len() != 2 {
            let line = r.position().map(|p| p.line()).unwrap_or(0);
            return Err(Error::CsvColumns { line, found: r.len() });
        }
        let mut record = JsonValue::new_object();
        record.insert(&lan1, r.index(0))?;
        record.insert(&lan2, r.index(1))?;
        corpus.push(record)?;
    }
    Ok(corpus)
}

/// Converts the csv file at `input` and writes the corpus to `output`.
/// Returns the number of records written.
pub fn convert_file(input: &str, output: &str) -> Result<usize> {
    info!("Converting {} to {}", input, output);
    let file_contents = fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    let corpus = csv_to_json(&file_contents)?;
    fs::write(output, corpus.pretty(2)).map_err(|e| Error::io(output, e))?;
    info!("Wrote {} records", corpus.len());
    Ok(corpus.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusConfig;
    use crate::corpus::{parse, SentencePair};

    #[test]
    fn header_names_the_fields() {
        let data = csv_to_json("Eng,Ban\nthe house,\"la maison\"\n\"say \"\"hi\"\"\",salut\n").unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["Eng"], "the house");
        assert_eq!(data[0]["Ban"], "la maison");
        assert_eq!(data[1]["Eng"], "say \"hi\"");
    }

    #[test]
    fn output_loads_as_corpus() {
        let data = csv_to_json("Eng,Ban\nthe dog,le chien\n").unwrap();
        let corpus = parse(&data.dump(), &CorpusConfig::new("Eng", "Ban")).unwrap();
        assert_eq!(corpus, vec![SentencePair::new("the dog", "le chien")]);
    }

    #[test]
    fn rows_must_have_two_columns() {
        let err = csv_to_json("Eng,Ban\na,b\nc,d,e\n").unwrap_err();
        assert!(matches!(err, Error::CsvColumns { line: 3, found: 3 }));

        let err = csv_to_json("Eng\na\n").unwrap_err();
        assert!(matches!(err, Error::CsvColumns { line: 1, found: 1 }));
    }

    #[test]
    fn convert_file_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pairs.csv");
        let output = dir.path().join("corpus.json");
        fs::write(&input, "target,source\nthe book,das Buch\na book,ein Buch\n").unwrap();

        let n = convert_file(input.to_str().unwrap(), output.to_str().unwrap()).unwrap();
        assert_eq!(n, 2);
        let corpus = parse(&fs::read_to_string(&output).unwrap(), &CorpusConfig::default()).unwrap();
        assert_eq!(corpus[1], SentencePair::new("a book", "ein Buch"));
    }
}
