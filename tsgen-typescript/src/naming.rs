//! TypeScript-specific naming rules.

/// Words that cannot be used as a binding name in generated code.
pub const RESERVED_WORDS: &[&str] = &[
    // JavaScript reserved words
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    // TypeScript reserved words
    "any",
    "as",
    "async",
    "await",
    "boolean",
    "constructor",
    "declare",
    "implements",
    "interface",
    "module",
    "namespace",
    "never",
    "number",
    "object",
    "package",
    "private",
    "protected",
    "public",
    "readonly",
    "static",
    "string",
    "symbol",
    "type",
    "undefined",
    "unknown",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// `name`, prefixed with `_` when it is reserved.
pub fn safe_name(name: &str) -> String {
    if is_reserved(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}
