//! Indented text output for rendered units.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates indented lines.
///
/// `push_*` methods return `&mut Self` for use in loops; the consuming
/// methods chain for short, fixed snippets.
///
/// ```
/// use kdsl_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::kotlin()
///     .line("class WidgetDSL {")
///     .indent()
///     .line("val builder = Widget.builder()")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "class WidgetDSL {\n  val builder = Widget.builder()\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// A builder with 2-space indentation.
    pub fn kotlin() -> Self {
        Self::new(Indent::KOTLIN)
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// An empty line; never carries indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// KDoc block at the current depth. Empty text lines become a bare ` *`.
    pub fn push_kdoc(&mut self, text: &str) -> &mut Self {
        self.push_line("/**");
        for line in text.lines().map(str::trim_end) {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.push_fragment(fragment);
        }
        self
    }

    pub fn push_fragment(&mut self, fragment: CodeFragment) -> &mut Self {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.apply_indented(body);
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Indent(body) => self.apply_indented(body),
            CodeFragment::KDoc(text) => {
                self.push_kdoc(&text);
            }
        }
        self
    }

    fn apply_indented(&mut self, body: Vec<CodeFragment>) {
        self.push_indent();
        for fragment in body {
            self.push_fragment(fragment);
        }
        self.push_dedent();
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::kotlin()
    }
}
