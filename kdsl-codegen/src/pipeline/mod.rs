//! Generation pipeline.
//!
//! A [`Pipeline`] runs the phases from a type universe to the DSL model:
//!
//! - Explicit phase boundaries (scan → plan → validate → transform)
//! - Plugin hooks before and after each phase
//! - Diagnostics collected in the [`CompilationContext`] and streamed to plugins
//!
//! # Example
//!
//! ```ignore
//! use kdsl_codegen::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(&universe, settings, docs)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let dsl = ctx.take_dsl()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
