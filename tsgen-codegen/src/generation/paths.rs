//! Module specifiers between generated files.

/// Drop a trailing `.ts` so the path can be used as a module specifier.
pub fn strip_extension(path: &str) -> &str {
    path.strip_suffix(".ts").unwrap_or(path)
}

/// Relative module specifier from the file `from_file` to the module `to_module`.
///
/// Both paths are `/`-separated and relative to the package root;
/// `to_module` may be a file (with or without `.ts`) or a directory.
pub fn relative_module_specifier(from_file: &str, to_module: &str) -> String {
    let from_dir: Vec<&str> = {
        let mut parts: Vec<&str> = from_file.split('/').filter(|p| !p.is_empty()).collect();
        parts.pop();
        parts
    };
    let to: Vec<&str> = strip_extension(to_module)
        .split('/')
        .filter(|p| !p.is_empty())
        .collect();

    let common = from_dir
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;
    let rest = to[common..].join("/");

    match (ups, rest.is_empty()) {
        (0, true) => ".".to_string(),
        (0, false) => format!("./{rest}"),
        (n, true) => vec![".."; n].join("/"),
        (n, false) => format!("{}/{rest}", vec![".."; n].join("/")),
    }
}
