//! The Kotlin DSL model and the transformation producing it.

mod kotlin_type;
mod model;
mod plan;
mod shape;
mod transform;

pub use kotlin_type::{KotlinTypes, nullable_marker};
pub use model::{
    CollectionUnit, DslModel, ExtensionLink, Function, LinkKind, MapUnit, MarkerUnit, Property,
    SubLink, TypeUnit, UnitName,
};
pub use plan::{Collision, MapSlot, Renamed, UnitPlan, UnitSource};
pub use shape::{Buildables, Shape};
pub use transform::transform;
