//! Type declarations shared by every model that references a type.

use std::{collections::HashMap, rc::Rc};

use kdsl_ir::{nested_name_of, package_of, simple_name_of};
use kdsl_manifest::DocIndex;

/// A discovered type with its documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Binary qualified name (`com.acme.Widget$Builder`), also the lookup
    /// key into the type universe.
    pub qualified_name: String,
    /// Simple name (`Builder`).
    pub short_name: String,
    /// Package-relative dotted name (`Widget.Builder`).
    pub nested_name: String,
    pub package: String,
    /// Documentation comment, empty if the index has none.
    pub doc: String,
}

impl TypeDeclaration {
    pub fn new(qualified_name: &str, doc: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            short_name: simple_name_of(qualified_name).to_string(),
            nested_name: nested_name_of(qualified_name),
            package: package_of(qualified_name).to_string(),
            doc: doc.into(),
        }
    }
}

/// Declaration cache keyed by qualified name.
///
/// Every request for the same name hands out the same [`Rc`].
#[derive(Debug)]
pub struct Declarations<'d> {
    docs: &'d DocIndex,
    cache: HashMap<String, Rc<TypeDeclaration>>,
}

impl<'d> Declarations<'d> {
    pub fn new(docs: &'d DocIndex) -> Self {
        Self {
            docs,
            cache: HashMap::new(),
        }
    }

    pub fn get(&mut self, qualified_name: &str) -> Rc<TypeDeclaration> {
        if let Some(found) = self.cache.get(qualified_name) {
            return Rc::clone(found);
        }
        let doc = self.docs.type_comment(qualified_name).unwrap_or_default();
        let declaration = Rc::new(TypeDeclaration::new(qualified_name, doc));
        self.cache
            .insert(qualified_name.to_string(), Rc::clone(&declaration));
        declaration
    }

    pub fn docs(&self) -> &'d DocIndex {
        self.docs
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
