use thiserror::Error;

/// Broad failure classes. Both are fatal for a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable, unparsable or malformed input (corpus, csv, config).
    Input,
    /// A division by zero inside the EM update.
    Arithmetic,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing json: {0}")]
    Json(#[from] json::Error),

    #[error("Error parsing csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error compiling pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Corpus must be a json array of records")]
    CorpusNotArray,

    #[error("Corpus record {index} is not an object")]
    RecordNotObject { index: usize },

    #[error("Corpus record {index}: missing field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("Corpus record {index}: field `{field}` is not a string")]
    FieldNotString { index: usize, field: String },

    #[error("Csv record {line}: expected 2 columns, found {found}")]
    CsvColumns { line: u64, found: usize },

    #[error("Model file must be a json object of word -> word")]
    SummaryNotObject,

    #[error("Config {section}.{key}: invalid value `{value}`")]
    Config {
        section: String,
        key: String,
        value: String,
    },

    #[error("Division by zero: source word `{word}` accumulated no evidence")]
    ZeroEvidence { word: String },

    #[error("Division by zero: target word `{word}` has no probability mass in sentence {sentence}")]
    ZeroNormalizer { word: String, sentence: usize },

    #[error("Model shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ZeroEvidence { .. } | Error::ZeroNormalizer { .. } | Error::ShapeMismatch { .. } => {
                ErrorKind::Arithmetic
            }
            _ => ErrorKind::Input,
        }
    }

    pub(crate) fn io(path: &str, source: std::io::Error) -> Error {
        Error::Io { path: path.to_owned(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
