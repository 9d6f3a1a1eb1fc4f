//! Buildable parameter shapes.

use std::collections::HashMap;

use kdsl_ir::{OBJECT, TypeRef, TypeUniverse, jdk};

use crate::source::SourceModel;

/// How a parameter refers to a buildable target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The target type itself.
    Target(String),
    /// The builder type of the target.
    Builder(String),
    /// A collection of the target.
    Collection(String),
    /// A map valued by the target.
    Map { key: TypeRef, target: String },
}

impl Shape {
    /// Qualified name of the buildable target.
    pub fn target(&self) -> &str {
        match self {
            Shape::Target(target)
            | Shape::Builder(target)
            | Shape::Collection(target)
            | Shape::Map { target, .. } => target,
        }
    }
}

/// Lookup of buildable targets and their builder types.
#[derive(Debug)]
pub struct Buildables<'s> {
    source: &'s SourceModel,
    by_builder: HashMap<&'s str, &'s str>,
}

impl<'s> Buildables<'s> {
    pub fn new(source: &'s SourceModel) -> Self {
        let by_builder = source
            .builders
            .iter()
            .map(|(target, model)| (model.builder.qualified_name.as_str(), target.as_str()))
            .collect();
        Self { source, by_builder }
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.source.builders.contains_key(name)
    }

    /// Target built by the builder type `name`.
    pub fn target_of_builder(&self, name: &str) -> Option<&'s str> {
        self.by_builder.get(name).copied()
    }

    /// Classify a parameter type against the buildable targets.
    pub fn shape_of(&self, universe: &dyn TypeUniverse, param: &TypeRef) -> Option<Shape> {
        let raw = param.raw_class();
        if self.is_target(&raw) {
            return Some(Shape::Target(raw));
        }
        if let Some(target) = self.target_of_builder(&raw) {
            return Some(Shape::Builder(target.to_string()));
        }
        if universe.is_assignable(jdk::COLLECTION, &raw) {
            let element = param.args().first()?.unwrap_wildcard()?.raw_class();
            return self.is_target(&element).then_some(Shape::Collection(element));
        }
        if universe.is_assignable(jdk::MAP, &raw)
            && let [key, value] = param.args()
        {
            let target = value.unwrap_wildcard()?.raw_class();
            let key = key
                .unwrap_wildcard()
                .cloned()
                .unwrap_or_else(|| TypeRef::class(OBJECT));
            return self
                .is_target(&target)
                .then_some(Shape::Map { key, target });
        }
        None
    }
}
