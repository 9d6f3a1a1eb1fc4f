//! One generated file per DSL unit.

use std::path::{Path, PathBuf};

use kdsl_codegen::dsl::{LinkKind, UnitName};
use kdsl_core::package_dir;

use crate::ast::{Fun, Param};

pub use kdsl_core::GENERATED_HEADER;

mod collection_dsl;
mod map_dsl;
mod marker;
mod type_dsl;

pub use collection_dsl::CollectionDslKt;
pub use map_dsl::MapDslKt;
pub use marker::MarkerKt;
pub use type_dsl::TypeDslKt;

/// `<base>/<package as path>/<Name>.kt`
fn unit_path(base: &Path, name: &UnitName) -> PathBuf {
    base.join(package_dir(&name.package))
        .join(format!("{}.kt", name.name))
}

/// Class and entry point documentation: a fixed first line, then the
/// documentation of the built type.
fn unit_doc(prefix: &str, target_type: &str, comment: &str) -> String {
    if comment.is_empty() {
        format!("{} {}", prefix, target_type)
    } else {
        format!("{} {}:\n{}", prefix, target_type, comment)
    }
}

/// The top-level `buildX(dslBlock)` function of a unit.
fn entry_point(name: &UnitName, doc: String) -> Fun {
    Fun::new(name.entry_point())
        .doc(doc)
        .param(Param::dsl_block(&name.name))
        .expression(format!("{}().apply(dslBlock).build()", name.name))
}

/// The argument a linked unit passes to the builder method.
fn link_argument(kind: LinkKind, target_dsl: &str, target_entry_point: &str) -> String {
    match kind {
        LinkKind::Builder => format!("{}().apply(dslBlock).builder", target_dsl),
        LinkKind::Direct | LinkKind::Collection | LinkKind::Map => {
            format!("{}(dslBlock)", target_entry_point)
        }
    }
}
