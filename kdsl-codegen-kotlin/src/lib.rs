//! Kotlin renderer for the kdsl generator.
//!
//! Turns a [`kdsl_codegen::dsl::DslModel`] into one Kotlin file per unit:
//! the `@DslMarker` annotation, collection and map builders, and one
//! builder class per target type.
//!
//! # Example
//!
//! ```ignore
//! use kdsl_codegen_kotlin::generate;
//!
//! let universe = kdsl_manifest::load_universe("build/universe.json")?;
//! let docs = kdsl_manifest::DocIndex::load("build/docs.json")?;
//! generate(&universe, "com.acme", "com.acme.kotlin.dsl", &docs, "generated".as_ref())?;
//! ```

pub mod ast;
pub mod files;
mod generator;
mod kotlin_file;

pub use generator::{Generator, generate, generate_with};
pub use kdsl_core::{GenerateResult, LanguageCodegen, PreviewFile};
pub use kotlin_file::{KotlinFile, RawCode};
