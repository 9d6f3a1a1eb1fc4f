//! KotlinFile abstraction for structured Kotlin file generation.
//!
//! A file is made of file annotations, a package declaration, imports and
//! body elements separated by blank lines.

use kdsl_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A structured representation of a Kotlin source file.
///
/// # Example
///
/// ```
/// use kdsl_codegen_kotlin::{KotlinFile, RawCode};
///
/// let code = KotlinFile::new("com.acme.dsl")
///     .import("com.acme.model.Widget")
///     .add(RawCode::new("annotation class AcmeDSL"))
///     .render();
///
/// assert_eq!(
///     code,
///     "package com.acme.dsl\n\nimport com.acme.model.Widget\n\nannotation class AcmeDSL\n"
/// );
/// ```
#[derive(Debug, Default)]
pub struct KotlinFile {
    file_annotations: Vec<String>,
    package: String,
    imports: Vec<String>,
    body: Vec<Vec<CodeFragment>>,
}

impl KotlinFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Add a file annotation (`Suppress("DEPRECATION")` renders as `@file:Suppress(...)`).
    pub fn file_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.file_annotations.push(annotation.into());
        self
    }

    /// Add an import; imports render sorted and deduplicated.
    pub fn import(mut self, name: impl Into<String>) -> Self {
        self.imports.push(name.into());
        self
    }

    pub fn imports(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file below a header comment, separated by a blank line.
    pub fn render_with_header(&self, header: &str) -> String {
        format!("{}\n{}", header, self.render())
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::kotlin();

        for annotation in &self.file_annotations {
            builder.push_line(&format!("@file:{}", annotation));
        }
        if !self.file_annotations.is_empty() {
            builder.push_blank();
        }

        if !self.package.is_empty() {
            builder.push_line(&format!("package {}", self.package));
        }

        let mut imports: Vec<&String> = self.imports.iter().collect();
        imports.sort();
        imports.dedup();
        if !imports.is_empty() {
            builder.push_blank();
            for import in imports {
                builder.push_line(&format!("import {}", import));
            }
        }

        for fragments in &self.body {
            builder.push_blank();
            for fragment in fragments {
                builder.push_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}

/// A raw code fragment that implements Renderable.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| CodeFragment::Line(line.to_string()))
            .collect()
    }
}
