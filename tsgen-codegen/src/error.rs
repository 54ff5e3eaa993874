use thiserror::Error;

/// Consistency errors that abort a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("type '{type_id}' is referenced but not declared")]
    UnresolvedType { type_id: String },

    #[error("error '{error_id}' is referenced but not declared")]
    UnresolvedError { error_id: String },

    #[error("no service is declared in package '{package}'")]
    UnresolvedService { package: String },

    #[error("type '{type_id}' is an alias of itself")]
    AliasCycle { type_id: String },

    #[error("type '{type_id}' is not a discriminated union")]
    NotAUnion { type_id: String },

    #[error("union '{type_id}' has no member with discriminant '{wire_value}'")]
    UnknownUnionMember { type_id: String, wire_value: String },

    #[error(
        "conflicting exports of '{module}' in '{directory}': '{existing}' and '{requested}'"
    )]
    ExportConflict {
        directory: String,
        module: String,
        existing: String,
        requested: String,
    },

    #[error("exports were already written for this run")]
    ExportsFinalized,

    #[error("file '{path}' was generated twice")]
    DuplicateFile { path: String },

    #[error("type '{type_id}' is declared more than once")]
    DuplicateType { type_id: String },

    #[error(transparent)]
    Schema(#[from] tsgen_schema::BuildError),
}
