//! Builders for the TypeScript constructs the generators emit. Each node
//! renders to [`CodeFragment`](tsgen_codegen::builder::CodeFragment)s.

mod class;
mod consts;
mod exports;
mod function;
mod imports;
mod interface;
mod namespace;
mod types;

pub use class::{Class, Getter, Method};
pub use consts::Const;
pub use exports::Export;
pub use function::Function;
pub use imports::Import;
pub use interface::Interface;
pub use namespace::Namespace;
pub use types::{Field, TypeAlias, Union};

/// Render a single node with 2-space indentation.
#[cfg(test)]
pub(crate) fn render(node: &impl tsgen_codegen::builder::Renderable) -> String {
    let mut builder = tsgen_codegen::builder::CodeBuilder::typescript();
    builder.emit(node);
    builder.build()
}

/// Quote a string as a TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A property key, quoted when it is not a valid identifier.
pub fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("line\nbreak"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("movieId"), "movieId");
        assert_eq!(property_key("release-date"), "\"release-date\"");
        assert_eq!(property_key("2fa"), "\"2fa\"");
    }
}
