//! Indentation unit.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Two spaces.
    Narrow,
    /// Four spaces.
    Wide,
}

impl Indent {
    /// Indentation of every generated Kotlin unit.
    pub const KOTLIN: Self = Self::Narrow;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Narrow => "  ",
            Self::Wide => "    ",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::KOTLIN
    }
}
