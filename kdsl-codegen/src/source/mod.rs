//! API surface scanning.
//!
//! - [`Declarations`] - shared type declarations with bound documentation
//! - [`Scanner`] - discovers builder/target pairs and their methods
//! - [`SourceModel`] and friends - what the scanner produces

mod declarations;
mod model;
mod scanner;

pub use declarations::{Declarations, TypeDeclaration};
pub use model::{BuilderModel, MethodGroupModel, MethodModel, SourceModel};
pub use scanner::{Scanner, is_scannable};
