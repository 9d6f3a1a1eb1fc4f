//! Builder scanning, DSL model transformation and shared code generation
//! utilities for the kdsl generator.
//!
//! This crate is language-agnostic up to the [`dsl::DslModel`]; renderers
//! such as `kdsl-codegen-kotlin` turn the model into source files.
//!
//! # Module Organization
//!
//! - [`source`] - API surface scanning (Scanner, SourceModel, etc.)
//! - [`classify`] - Structural roles of builder methods
//! - [`dsl`] - Unit planning, the DSL model and the transformation producing it
//! - [`pipeline`] - Phases, plugins and diagnostics
//! - [`generation`] - Output management (ImportCollector, FileRegistry)
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod classify;
pub mod dsl;
pub mod generation;
pub mod pipeline;
mod settings;
pub mod source;

pub use settings::Settings;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
