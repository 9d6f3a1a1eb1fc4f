//! Kotlin AST builders for the declarations a DSL unit is made of.
//!
//! Nodes produce [`kdsl_codegen::builder::CodeFragment`]s and are rendered
//! through [`crate::KotlinFile`].

use std::borrow::Cow;

mod class;
mod fun;
mod property;

pub use class::Class;
pub use fun::{Fun, Param};
pub use property::{Val, WriteOnlyVar};

/// Kotlin hard keywords, never valid as bare identifiers.
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// A Java member name as a Kotlin identifier, backticked if it is a hard keyword.
pub fn identifier(name: &str) -> Cow<'_, str> {
    if HARD_KEYWORDS.contains(&name) {
        Cow::Owned(format!("`{}`", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Escape text for use inside a KDoc block.
pub(crate) fn kdoc_text(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_quotes_hard_keywords() {
        assert_eq!(identifier("object"), "`object`");
        assert_eq!(identifier("in"), "`in`");
        assert_eq!(identifier("when"), "`when`");
        assert_eq!(identifier("size"), "size");
        // soft keywords are valid identifiers
        assert_eq!(identifier("value"), "value");
        assert_eq!(identifier("data"), "data");
    }
}
