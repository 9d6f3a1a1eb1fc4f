//! Renderable trait and CodeFragment.
//!
//! AST nodes produce fragments; [`super::CodeBuilder`] turns fragments into
//! indented text. Nodes never touch the builder directly.

/// A piece of a generated unit.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// One line, newline appended.
    Line(String),
    /// An empty line, never indented.
    Blank,
    /// Header line, body one level deeper, optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Fragments one level deeper, without header or close.
    Indent(Vec<CodeFragment>),
    /// A KDoc comment; each line of the text becomes one ` * ` line.
    KDoc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// A block closed by `}`.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::block(header, body, Some("}".to_string()))
    }

    /// Continuation lines, e.g. a property accessor under its declaration.
    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    pub fn kdoc(s: impl Into<String>) -> Self {
        Self::KDoc(s.into())
    }
}

/// Kotlin AST nodes that render to fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}
