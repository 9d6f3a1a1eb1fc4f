//! Core utilities and types for the kdsl generator.
//!
//! This crate provides the file-writing primitives, the language codegen
//! trait and naming helpers shared by the generator crates.

mod codegen;
mod file;
mod utils;

// Code generation
pub use codegen::{GenerateResult, LanguageCodegen, PreviewFile};
// File operations
pub use file::{GeneratedFile, WriteResult, clear_dir, write_file};
// String utilities
pub use utils::{capitalize, last_segment, package_dir, qualify};

/// Attribution header written at the top of every generated unit.
pub const GENERATED_HEADER: &str = "\
/*
  This file was generated by kdsl from the builder API of the scanned library.
  Do not edit, changes are lost on the next generation run.
*/
";
