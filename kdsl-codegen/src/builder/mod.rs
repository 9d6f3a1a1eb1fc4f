//! Text building blocks shared by the renderers.
//!
//! AST nodes implement [`Renderable`] and describe themselves as
//! [`CodeFragment`]s; a [`CodeBuilder`] lays the fragments out with one
//! [`Indent`] unit per nesting level.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
