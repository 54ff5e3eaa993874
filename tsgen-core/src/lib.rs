//! Core utilities and types for the tsgen SDK generator.
//!
//! This crate provides the casing helpers shared by the IR, the
//! configuration layer and the emitters, plus the staged file-tree writer
//! used to publish a generated package in one step.

mod file;
mod utils;

// File operations
pub use file::{StagedTree, WriteResult, write_file};
// String utilities
pub use utils::{
    split_words, to_camel_case, to_pascal_case, to_screaming_snake_case, to_snake_case,
    upper_first,
};
