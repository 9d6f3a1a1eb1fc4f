//! Built-in lints.

mod ambiguous_group;
mod empty_unit;
mod shared_short_name;
mod unit_collision;

pub use ambiguous_group::AmbiguousGroupLint;
pub use empty_unit::EmptyUnitLint;
pub use shared_short_name::SharedShortNameLint;
pub use unit_collision::UnitCollisionLint;
