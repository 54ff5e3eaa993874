//! Validation and construction errors.

use serde::{Deserialize, Serialize, ser::SerializeStruct};
use thiserror::Error;

/// Result of a `parse` or `json` call.
pub type MaybeValid<T> = Result<T, SchemaError>;

/// A single problem found in an input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Keys and list indices leading from the root value to the problem.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    pub(crate) fn root(message: impl Into<String>) -> Self {
        Self::new(Vec::new(), message)
    }

    pub(crate) fn at(segment: &str, message: impl Into<String>) -> Self {
        Self::new(vec![segment.to_string()], message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join(" -> "), self.message)
        }
    }
}

/// Failure to materialize a deferred schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("schema slot {index} ('{name}') was used before it was defined")]
    Undefined { index: usize, name: String },

    #[error("schema slot {index} ('{name}') is already defined")]
    AlreadyDefined { index: usize, name: String },

    #[error("schema slot {index} is out of range for a table of {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("schema table was dropped while still referenced")]
    TableDropped,

    #[error("{0}")]
    Getter(String),
}

/// Why a value could not be parsed or serialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The input does not match the schema. Holds every problem found.
    #[error("{}", render(.0))]
    Invalid(Vec<ValidationError>),

    /// A deferred schema could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
}

fn render(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    pub fn invalid(path: Vec<String>, message: impl Into<String>) -> Self {
        Self::Invalid(vec![ValidationError::new(path, message)])
    }

    pub(crate) fn root(message: impl Into<String>) -> Self {
        Self::Invalid(vec![ValidationError::root(message)])
    }

    /// Validation errors carried by this error (empty for build failures).
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SchemaError::Invalid(errors) => errors,
            SchemaError::Build(_) => &[],
        }
    }
}

/// Accumulates validation errors from child schemas.
///
/// Build errors are never accumulated: they abort the whole operation.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record a child result, prefixing its error paths with `segment`.
    pub(crate) fn absorb<T>(
        &mut self,
        result: MaybeValid<T>,
        segment: Option<&str>,
    ) -> Result<Option<T>, BuildError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(SchemaError::Build(err)) => Err(err),
            Err(SchemaError::Invalid(errors)) => {
                self.errors.extend(errors.into_iter().map(|mut error| {
                    if let Some(segment) = segment {
                        error.path.insert(0, segment.to_string());
                    }
                    error
                }));
                Ok(None)
            }
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> MaybeValid<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(SchemaError::Invalid(self.errors))
        }
    }
}

/// A parse result in the `{ ok, value | errors }` shape handed to consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Valid(T),
    Invalid(Vec<ValidationError>),
}

impl<T> Outcome<T> {
    /// Convert a result, keeping build failures as errors.
    pub fn from_result(result: MaybeValid<T>) -> Result<Self, BuildError> {
        match result {
            Ok(value) => Ok(Outcome::Valid(value)),
            Err(SchemaError::Invalid(errors)) => Ok(Outcome::Invalid(errors)),
            Err(SchemaError::Build(err)) => Err(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Valid(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            Outcome::Invalid(errors) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}
