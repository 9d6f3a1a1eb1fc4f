//! Kotlin class builder.

use kdsl_codegen::builder::{CodeFragment, Renderable};

use super::kdoc_text;

/// A Kotlin class whose members are separated by blank lines.
///
/// A member is a group of fragments; fragments of one group render without
/// blank lines between them.
#[derive(Debug, Clone, Default)]
pub struct Class {
    name: String,
    doc: Option<String>,
    annotations: Vec<String>,
    members: Vec<Vec<CodeFragment>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add an annotation, without the leading `@`.
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Add one member group.
    pub fn member<R: Renderable>(mut self, node: R) -> Self {
        self.members.push(node.to_fragments());
        self
    }

    /// Add several nodes as one member group.
    pub fn group(mut self, nodes: &[&dyn Renderable]) -> Self {
        let fragments = nodes.iter().flat_map(|n| n.to_fragments()).collect();
        self.members.push(fragments);
        self
    }

    pub fn members<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.members.push(node.to_fragments());
        }
        self
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::kdoc(kdoc_text(doc)));
        }
        for annotation in &self.annotations {
            fragments.push(CodeFragment::line(format!("@{}", annotation)));
        }

        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(member.iter().cloned());
        }
        fragments.push(CodeFragment::braced(format!("class {} {{", self.name), body));
        fragments
    }
}
