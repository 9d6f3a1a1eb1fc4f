//! Input parsing for the kdsl generator.
//!
//! Three inputs feed a generation run:
//! - `kdsl.toml`, the [`Manifest`] naming namespaces, paths and scan options
//! - the universe snapshot, loaded into a [`kdsl_ir::Universe`]
//! - the optional documentation export, loaded into a [`DocIndex`]
//!
//! Every parse error is a [`miette::Diagnostic`] pointing into the offending file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod docs;
mod error;
mod java_type;
mod manifest;
mod snapshot;

pub use docs::{DocIndex, strip_markup};
pub use error::{Error, Result};
pub use java_type::{Scope, TypeSyntaxError, parse_type};
pub use manifest::{
    CollisionPolicy, DEFAULT_SUPERTYPE, KdslToml, Manifest, ScanConfig, SourceConfig,
    TargetConfig, default_builder_suffixes, default_excluded_methods, default_implicit_imports,
    is_java_identifier, parse_manifest,
};
pub use snapshot::{load_universe, parse_universe};
