//! Built-in lints for IR validation.

mod duplicate_discriminant;
mod failing_example;
mod unresolved_error;
mod unresolved_type;

pub use duplicate_discriminant::DuplicateDiscriminantLint;
pub use failing_example::FailingExampleLint;
use tsgen_ir::{DeclaredErrorName, DeclaredTypeName, PackagePath};
pub use unresolved_error::UnresolvedErrorLint;
pub use unresolved_type::UnresolvedTypeLint;

/// Dotted location of a declaration, e.g. `types.imdb.Movie`.
fn location(kind: &str, package: &PackagePath, name: &str) -> String {
    let mut out = kind.to_string();
    for segment in package.segments() {
        out.push('.');
        out.push_str(&segment.original_name);
    }
    if !name.is_empty() {
        out.push('.');
        out.push_str(name);
    }
    out
}

fn type_location(name: &DeclaredTypeName) -> String {
    location("types", &name.package, &name.name.original_name)
}

fn error_location(name: &DeclaredErrorName) -> String {
    location("errors", &name.package, &name.name.original_name)
}
