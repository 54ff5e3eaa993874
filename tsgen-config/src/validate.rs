//! Validation utilities for generated TypeScript identifiers

use miette::SourceSpan;

use crate::{ConfigSource, Result};

/// Words that cannot name a TypeScript namespace
pub(crate) const TS_RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
    // Strict mode
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
    // Contextual words that break declarations
    "any", "boolean", "number", "string", "symbol", "never", "unknown", "await", "type",
];

pub(crate) fn is_reserved(name: &str) -> bool {
    TS_RESERVED_WORDS.contains(&name)
}

/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        None
    } else {
        Some("name contains characters not allowed in an identifier")
    }
}

pub(crate) fn validate_namespace_export(name: &str, source: &ConfigSource) -> Result<()> {
    // A derived name is reported against the field it comes from.
    let key = if source.text().contains("namespace_export") {
        "namespace_export"
    } else {
        "organization"
    };
    if is_reserved(name) {
        return Err(source
            .invalid(key, format!("'{name}' is a TypeScript reserved word"))
            .with_help("set package.namespace_export to a different name"));
    }
    if let Some(reason) = validate_identifier(name) {
        return Err(source
            .invalid(key, format!("invalid namespace export '{name}'"))
            .with_help(format!(
                "{reason}; use only letters, digits, '_' and '$', not starting with a digit"
            )));
    }
    Ok(())
}

/// Find the span of `key` where it is assigned (`key = ...`) at the start of a line
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            return Some(SourceSpan::from((offset + indent, key.len())));
        }
        offset += line.len();
    }
    None
}
