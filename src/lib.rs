pub mod config;
pub mod corpus;
pub mod error;
pub mod ibm_model_1;
pub mod translate;
pub mod types;
pub mod vocabulary;

pub use error::{Error, ErrorKind, Result};
