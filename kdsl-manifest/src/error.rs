use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Input parsing result; the error is boxed, its source copies are large.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// One input file being parsed; builds errors that point into it.
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// kdsl.toml syntax or shape error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// JSON syntax or shape error in the named document.
    pub fn json_error(&self, document: &str, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            document: document.to_string(),
            source,
        })
    }

    pub fn type_syntax_error(
        &self,
        ty: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::TypeSyntax {
            src: self.named_source(),
            span,
            ty: ty.into(),
            reason: reason.into(),
        })
    }

    /// Well-formed input with a value that makes no sense.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the path in kdsl.toml points to an existing file"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kdsl.toml")]
    #[diagnostic(code(kdsl::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {document}")]
    #[diagnostic(code(kdsl::json_error))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error here")]
        span: Option<SourceSpan>,
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid type '{ty}'")]
    #[diagnostic(
        code(kdsl::type_syntax),
        help("types use Java syntax, e.g. 'java.util.List<com.acme.Widget>' or 'int[]'")
    )]
    TypeSyntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        ty: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(kdsl::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}

/// Byte offset of a 1-based line and column.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start = if line == 1 {
        0
    } else {
        src.match_indices('\n').nth(line - 2).map(|(i, _)| i + 1)?
    };
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

/// Span of the first quoted occurrence of `value` in a JSON or TOML source.
pub(crate) fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    src.find(&quoted)
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 3, 3), Some(14));
        assert_eq!(offset_of(src, 9, 1), None);
    }

    #[test]
    fn test_find_quoted_span() {
        let src = r#"{"returns": "java.util.List<"}"#;
        let span = find_quoted_span(src, "java.util.List<").unwrap();
        assert_eq!(span.offset(), 13);
        assert_eq!(span.len(), 15);
    }
}
