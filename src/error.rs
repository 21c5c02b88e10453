// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Expected outcomes of a lookup (a resource that no contributor supplies, a
//! contributor without an owning module) are modelled as `None`, not as errors.
//! The variants below cover the failures that loaders and parsers report to
//! their callers before the merge layer degrades them to "use base content".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("State Error: {0}")]
    State(String),

    /// A `.properties` document could not be parsed.
    #[error("Malformed properties at line {line}: {reason}")]
    MalformedProperties { line: usize, reason: String },

    /// A located resource could not be opened or read.
    #[error("Unreadable resource {locator}: {source}")]
    UnreadableResource {
        locator: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` as the cause of a failure to read `locator`.
    pub fn unreadable(locator: impl Into<String>, source: Error) -> Self {
        Error::UnreadableResource {
            locator: locator.into(),
            source: Box::new(source),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(err: ciborium::de::Error<std::io::Error>) -> Self {
        Error::State(err.to_string())
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(err: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::State(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
