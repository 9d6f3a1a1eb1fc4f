//! Type model for the kdsl generator.
//!
//! This crate describes the host library that builders are discovered in:
//! type references as they appear in signatures, declared types and
//! methods, and the read-only [`TypeUniverse`] the scanner walks.
//!
//! # Architecture
//!
//! ```text
//! universe.json → kdsl-manifest (parsing) → kdsl-ir (TypeUniverse) → kdsl-codegen
//! ```
//!
//! The IR types are designed to be:
//! - Read-only once built (the scanner never mutates the universe)
//! - Independent of where the type information came from
//! - Self-contained (no dependencies beyond serde)

mod info;
pub mod jdk;
mod types;
mod universe;

pub use info::{MethodInfo, TypeInfo, TypeKind, nested_name_of, package_of, simple_name_of};
pub use types::{OBJECT, PRIMITIVES, TypeRef, is_primitive_name};
pub use universe::{DeclaredMethod, TypeUniverse, Universe};
