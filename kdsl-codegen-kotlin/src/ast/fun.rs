//! Kotlin function builder.

use kdsl_codegen::builder::{CodeFragment, Renderable};

use super::{identifier, kdoc_text};

/// A parameter in a Kotlin function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// The `dslBlock: <Receiver>.() -> Unit` parameter of builder functions.
    pub fn dsl_block(receiver: &str) -> Self {
        Self::new("dslBlock", format!("{}.() -> Unit", receiver))
    }
}

#[derive(Debug, Clone)]
enum Body {
    Block(Vec<String>),
    /// `= expr` on the signature line.
    Inline(String),
    /// `=` on the signature line, the expression indented below.
    Expression(String),
}

/// Builder for Kotlin functions.
#[derive(Debug, Clone)]
pub struct Fun {
    name: String,
    doc: Option<String>,
    modifiers: Vec<&'static str>,
    receiver: Option<String>,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Body,
}

impl Fun {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            modifiers: Vec::new(),
            receiver: None,
            params: Vec::new(),
            return_type: None,
            body: Body::Block(Vec::new()),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach a KDoc only if the text is not empty.
    pub fn doc_if_present(self, doc: &str) -> Self {
        if doc.is_empty() { self } else { self.doc(doc) }
    }

    pub fn internal(mut self) -> Self {
        self.modifiers.push("internal");
        self
    }

    pub fn operator(mut self) -> Self {
        self.modifiers.push("operator");
        self
    }

    /// Declare the function as an extension on `receiver`.
    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the block body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        match &mut self.body {
            Body::Block(lines) => lines.push(line.into()),
            _ => self.body = Body::Block(vec![line.into()]),
        }
        self
    }

    /// Use a single-line expression body.
    pub fn inline(mut self, expression: impl Into<String>) -> Self {
        self.body = Body::Inline(expression.into());
        self
    }

    /// Use an expression body on its own line.
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.body = Body::Expression(expression.into());
        self
    }

    fn signature(&self) -> String {
        let mut signature = String::new();
        for modifier in &self.modifiers {
            signature.push_str(modifier);
            signature.push(' ');
        }
        signature.push_str("fun ");
        if let Some(receiver) = &self.receiver {
            signature.push_str(receiver);
            signature.push('.');
        }
        let params = self
            .params
            .iter()
            .map(|p| format!("{}: {}", identifier(&p.name), p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        signature.push_str(&format!("{}({})", identifier(&self.name), params));
        if let Some(ret) = &self.return_type {
            signature.push_str(&format!(": {}", ret));
        }
        signature
    }
}

impl Renderable for Fun {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::kdoc(kdoc_text(doc)));
        }
        let signature = self.signature();
        match &self.body {
            Body::Block(lines) => fragments.push(CodeFragment::braced(
                format!("{} {{", signature),
                lines.iter().map(CodeFragment::line).collect(),
            )),
            Body::Inline(expression) => {
                fragments.push(CodeFragment::line(format!("{} = {}", signature, expression)))
            }
            Body::Expression(expression) => fragments.push(CodeFragment::block(
                format!("{} =", signature),
                vec![CodeFragment::line(expression)],
                None,
            )),
        }
        fragments
    }
}
