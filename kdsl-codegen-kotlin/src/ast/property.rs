//! Kotlin property builders.

use kdsl_codegen::builder::{CodeFragment, Renderable};

use super::{identifier, kdoc_text};

/// A `val` with an initializer.
#[derive(Debug, Clone)]
pub struct Val {
    name: String,
    ty: Option<String>,
    init: String,
    annotations: Vec<String>,
    is_private: bool,
}

impl Val {
    pub fn new(name: impl Into<String>, init: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            init: init.into(),
            annotations: Vec::new(),
            is_private: false,
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Add an annotation, without the leading `@`.
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }
}

impl Renderable for Val {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .annotations
            .iter()
            .map(|a| CodeFragment::line(format!("@{}", a)))
            .collect();
        let visibility = if self.is_private { "private " } else { "" };
        let name = identifier(&self.name);
        let declaration = match &self.ty {
            Some(ty) => format!("{}val {}: {} = {}", visibility, name, ty, self.init),
            None => format!("{}val {} = {}", visibility, name, self.init),
        };
        fragments.push(CodeFragment::line(declaration));
        fragments
    }
}

/// A `var` that can only be assigned: the getter is hidden from Kotlin
/// callers and the setter forwards to a builder call.
#[derive(Debug, Clone)]
pub struct WriteOnlyVar {
    name: String,
    ty: String,
    doc: Option<String>,
    setter: String,
}

impl WriteOnlyVar {
    /// A property whose setter runs `setter` (with `value` in scope).
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        setter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            setter: setter.into(),
        }
    }

    /// Attach a KDoc only if the text is not empty.
    pub fn doc_if_present(mut self, doc: &str) -> Self {
        if !doc.is_empty() {
            self.doc = Some(doc.to_string());
        }
        self
    }
}

impl Renderable for WriteOnlyVar {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::kdoc(kdoc_text(doc)));
        }
        fragments.push(CodeFragment::line(format!(
            "var {}: {}",
            identifier(&self.name),
            self.ty
        )));
        fragments.push(CodeFragment::indent(vec![
            CodeFragment::line("@Deprecated(\"\", level = HIDDEN)"),
            CodeFragment::line("get() = throw UnsupportedOperationException()"),
            CodeFragment::braced("set(value) {", vec![CodeFragment::line(&self.setter)]),
        ]));
        fragments
    }
}
