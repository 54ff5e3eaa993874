use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::validate::find_key_span;

/// Boxed so that `Result<Config>` stays small.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The text of a config file, kept for labelling errors.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    text: String,
    name: String,
}

impl ConfigSource {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn named(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }

    pub(crate) fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            span: source.span().map(SourceSpan::from),
            src: self.named(),
            source,
        })
    }

    /// A semantic error pointing at the line assigning `key`.
    pub(crate) fn invalid(&self, key: &str, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Invalid {
            src: self.named(),
            span: find_key_span(&self.text, key),
            message: message.into(),
            help: None,
        })
    }
}

impl Error {
    pub(crate) fn with_help(mut self: Box<Self>, text: impl Into<String>) -> Box<Self> {
        if let Error::Invalid { help, .. } = self.as_mut() {
            *help = Some(text.into());
        }
        self
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a tsgen.toml with a [package] section"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tsgen.toml")]
    #[diagnostic(code(tsgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(tsgen::invalid_config))]
    Invalid {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
        #[help]
        help: Option<String>,
    },
}
