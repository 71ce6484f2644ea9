use std::fs;
use std::io::Read;

use log::info;

use crate::config::CorpusConfig;
use crate::corpus::{parse, Corpus};
use crate::error::{Error, Result};

/// Reads a whole file, `-` meaning stdin.
pub fn read_all(path: &str) -> Result<String> {
    if path == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .map_err(|e| Error::io("<stdin>", e))?;
        Ok(s)
    } else {
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }
}

pub fn load(path: &str, config: &CorpusConfig) -> Result<Corpus> {
    info!("Getting corpus from file: {}", path);
    let file_contents = read_all(path)?;
    let corpus = parse(&file_contents, config)?;
    info!("{} sentence pairs", corpus.len());
    Ok(corpus)
}
