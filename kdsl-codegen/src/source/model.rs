//! The scanned API surface.

use std::{
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use kdsl_ir::TypeRef;

use super::TypeDeclaration;

/// One method of a scanned type, after overload collapse.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodModel {
    pub name: String,
    /// Owner name and method name (`com.acme.Widget$Builder.size`).
    pub qualified_name: String,
    /// Owner name and call signature (`com.acme.Widget$Builder.size(int)`).
    pub key: String,
    /// The scanned type the method was reached from.
    pub owner: Rc<TypeDeclaration>,
    /// Binary name of the type that declares the method.
    pub declaring: String,
    pub params: Vec<TypeRef>,
    /// Return type with the owner's generic arguments applied.
    pub returns: TypeRef,
    /// Documentation comment, empty if the index has none.
    pub doc: String,
    /// Every class name reachable from the parameter types.
    pub dependencies: BTreeSet<String>,
}

impl MethodModel {
    /// The only parameter, for one-argument methods.
    pub fn single_param(&self) -> Option<&TypeRef> {
        match self.params.as_slice() {
            [param] => Some(param),
            _ => None,
        }
    }

    pub fn is_nullary(&self) -> bool {
        self.params.is_empty()
    }
}

/// Overloads sharing a method name.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodGroupModel {
    pub name: String,
    pub qualified_name: String,
    /// Never empty, in scan order.
    pub methods: Vec<Rc<MethodModel>>,
}

/// A builder together with the type it builds.
#[derive(Debug, Clone)]
pub struct BuilderModel {
    pub builder: Rc<TypeDeclaration>,
    pub target: Rc<TypeDeclaration>,
    /// Static zero-argument method on the target returning a new builder.
    pub factory: String,
    /// Qualifying method groups by name.
    pub groups: BTreeMap<String, MethodGroupModel>,
}

impl BuilderModel {
    /// Every method of every group, in group order.
    pub fn methods(&self) -> impl Iterator<Item = &Rc<MethodModel>> {
        self.groups.values().flat_map(|group| group.methods.iter())
    }
}

/// Everything the scanner found.
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    /// Supertype the builders were matched against.
    pub supertype: String,
    /// Builders keyed by qualified target name.
    pub builders: BTreeMap<String, BuilderModel>,
    /// Every method of every scanned type, keyed by [`MethodModel::key`].
    pub methods: BTreeMap<String, Rc<MethodModel>>,
}

impl SourceModel {
    /// The builder model for a target type.
    pub fn builder_for(&self, target: &str) -> Option<&BuilderModel> {
        self.builders.get(target)
    }

    /// The builder model whose builder type is `builder`.
    pub fn builder_of_type(&self, builder: &str) -> Option<&BuilderModel> {
        self.builders
            .values()
            .find(|model| model.builder.qualified_name == builder)
    }

    /// Returns true if `name` is the builder type of some target.
    pub fn is_builder_type(&self, name: &str) -> bool {
        self.builder_of_type(name).is_some()
    }
}
