use std::fs;
use std::str::FromStr;

use json::{parse, JsonValue};
use log::debug;

use crate::error::{Error, Result};

/*
Config file structure, every key is optional and falls back to the default:
{
    training: {
        epsilon: 0.01,
        max_iterations: 1000,
        verbose: false
    },
    corpus: {
        target_field: "target",
        source_field: "source"
    }
}
max_iterations = 0 removes the iteration cap
*/

fn config_error(section: &str, key: &str, value: &JsonValue) -> Error {
    Error::Config {
        section: section.to_owned(),
        key: key.to_owned(),
        value: value.dump(),
    }
}

fn get_json<T>(obj: &JsonValue, section: &str, key: &str, def: T) -> Result<T>
where
    T: FromStr,
{
    if !obj.has_key(key) {
        return Ok(def);
    }
    obj[key]
        .dump()
        .parse::<T>()
        .map_err(|_| config_error(section, key, &obj[key]))
}

fn get_json_str(obj: &JsonValue, section: &str, key: &str, def: String) -> Result<String> {
    if !obj.has_key(key) {
        return Ok(def);
    }
    obj[key]
        .as_str()
        .map(String::from)
        .ok_or_else(|| config_error(section, key, &obj[key]))
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    // Training stops once two successive models are closer than this
    pub epsilon: f64,
    // Upper bound on EM iterations, None runs until convergence
    pub max_iterations: Option<usize>,
    // Log every iteration's distance at info level instead of debug
    pub verbose: bool,
}

impl Default for TrainConfig {
    fn default() -> TrainConfig {
        TrainConfig {
            epsilon: 0.01,
            max_iterations: Some(1000),
            verbose: false,
        }
    }
}

impl TrainConfig {
    pub fn from_json(obj: &JsonValue) -> Result<TrainConfig> {
        let mut tmp_config = TrainConfig::default();
        let training_s = "training";
        tmp_config.epsilon = get_json(obj, training_s, "epsilon", tmp_config.epsilon)?;
        let max_iterations = get_json(
            obj,
            training_s,
            "max_iterations",
            tmp_config.max_iterations.unwrap_or(0),
        )?;
        tmp_config.max_iterations = if max_iterations == 0 { None } else { Some(max_iterations) };
        tmp_config.verbose = get_json(obj, training_s, "verbose", tmp_config.verbose)?;
        if tmp_config.epsilon.is_nan() || tmp_config.epsilon <= 0.0 {
            return Err(config_error(training_s, "epsilon", &obj["epsilon"]));
        }
        Ok(tmp_config)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CorpusConfig {
    // Record field holding the target-language sentence
    pub target_field: String,
    // Record field holding the source-language sentence
    pub source_field: String,
}

impl Default for CorpusConfig {
    fn default() -> CorpusConfig {
        CorpusConfig {
            target_field: String::from("target"),
            source_field: String::from("source"),
        }
    }
}

impl CorpusConfig {
    pub fn new(target_field: &str, source_field: &str) -> CorpusConfig {
        CorpusConfig {
            target_field: target_field.to_owned(),
            source_field: source_field.to_owned(),
        }
    }

    pub fn from_json(obj: &JsonValue) -> Result<CorpusConfig> {
        let mut tmp_config = CorpusConfig::default();
        let corpus_s = "corpus";
        tmp_config.target_field = get_json_str(obj, corpus_s, "target_field", tmp_config.target_field)?;
        tmp_config.source_field = get_json_str(obj, corpus_s, "source_field", tmp_config.source_field)?;
        Ok(tmp_config)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub training: TrainConfig,
    pub corpus: CorpusConfig,
}

impl Config {
    pub fn parse(file_contents: &str) -> Result<Config> {
        let mut config = Config::default();
        if file_contents.trim().is_empty() {
            return Ok(config);
        }
        let json_data = parse(file_contents)?;

        let training_s = "training";
        if json_data.has_key(training_s) {
            config.training = TrainConfig::from_json(&json_data[training_s])?;
        }

        let corpus_s = "corpus";
        if json_data.has_key(corpus_s) {
            config.corpus = CorpusConfig::from_json(&json_data[corpus_s])?;
        }

        Ok(config)
    }

    pub fn read(file_name: &str) -> Result<Config> {
        debug!("Reading config file: {}", file_name);
        let file_contents = fs::read_to_string(file_name).map_err(|e| Error::io(file_name, e))?;
        Config::parse(&file_contents)
    }
}
