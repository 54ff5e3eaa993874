use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation.
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A problem found in the IR, attributed to the phase that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub phase: String,
    pub message: String,
    /// Dotted IR path, e.g. `types.imdb.Movie`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, phase.into(), message.into())
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, phase.into(), message.into())
    }

    fn with_severity(severity: Severity, phase: String, message: String) -> Self {
        Self {
            severity,
            phase,
            message,
            location: None,
        }
    }

    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match &self.location {
            Some(location) => write!(f, " (at {location})"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning("validate", "example does not match").at("types.Movie");
        assert_eq!(diag.to_string(), "warning: example does not match (at types.Movie)");
        assert_eq!(Diagnostic::error("validate", "boom").to_string(), "error: boom");
    }

    #[test]
    fn test_serializes_lowercase_severity() {
        let diag = Diagnostic::error("validate", "missing type").at("services.imdb");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["location"], "services.imdb");
    }
}
