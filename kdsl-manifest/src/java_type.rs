//! Parser for Java type strings as printed by `Type.getTypeName()`.
//!
//! ```text
//! type     := base ("[]")*
//! base     := "?" (("extends" | "super") type)?
//!           | name ("<" type ("," type)* ">")?
//! ```

use kdsl_ir::{TypeRef, is_primitive_name};

/// A syntax error at a byte offset of the parsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSyntaxError {
    pub offset: usize,
    pub reason: String,
}

/// Type variables visible while parsing, with the type that declares them.
///
/// Variables of a generic method shadow the declaring type's and are
/// declared by `Owner#method`.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub declaring: &'a str,
    pub params: &'a [String],
    pub method: Option<(&'a str, &'a [String])>,
}

impl<'a> Scope<'a> {
    pub fn new(declaring: &'a str, params: &'a [String]) -> Self {
        Self {
            declaring,
            params,
            method: None,
        }
    }

    /// The scope inside a method of the declaring type.
    pub fn with_method(self, name: &'a str, params: &'a [String]) -> Self {
        Self {
            method: Some((name, params)),
            ..self
        }
    }

    fn variable(&self, name: &str) -> Option<TypeRef> {
        if let Some((method, params)) = self.method
            && params.iter().any(|p| p == name)
        {
            return Some(TypeRef::variable(
                name,
                format!("{}#{}", self.declaring, method),
            ));
        }
        self.params
            .iter()
            .any(|p| p == name)
            .then(|| TypeRef::variable(name, self.declaring))
    }
}

/// Parse a complete type string.
pub fn parse_type(text: &str, scope: Scope<'_>) -> Result<TypeRef, TypeSyntaxError> {
    let mut parser = Parser { text, pos: 0, scope };
    let ty = parser.parse_type()?;
    parser.skip_ws();
    if parser.pos < text.len() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(ty)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    scope: Scope<'a>,
}

impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        let mut ty = self.parse_base()?;
        loop {
            self.skip_ws();
            if !self.eat("[") {
                break;
            }
            self.skip_ws();
            if !self.eat("]") {
                return Err(self.error("expected ']'"));
            }
            ty = TypeRef::array(ty);
        }
        Ok(ty)
    }

    fn parse_base(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        self.skip_ws();
        if self.eat("?") {
            return self.parse_wildcard();
        }

        let start = self.pos;
        let name = self.name();
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            self.pos = start;
            return Err(self.error("malformed qualified name"));
        }

        self.skip_ws();
        if self.eat("<") {
            let mut args = Vec::new();
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                if self.eat(">") {
                    break;
                }
                if !self.eat(",") {
                    return Err(self.error("expected ',' or '>'"));
                }
            }
            return Ok(TypeRef::parameterized(name, args));
        }

        if is_primitive_name(name) {
            return Ok(TypeRef::primitive(name));
        }
        if !name.contains('.')
            && let Some(var) = self.scope.variable(name)
        {
            return Ok(var);
        }
        Ok(TypeRef::class(name))
    }

    fn parse_wildcard(&mut self) -> Result<TypeRef, TypeSyntaxError> {
        self.skip_ws();
        let save = self.pos;
        match self.name() {
            "extends" => Ok(TypeRef::extends(self.parse_type()?)),
            "super" => Ok(TypeRef::super_of(self.parse_type()?)),
            "" => Ok(TypeRef::unbounded_wildcard()),
            _ => {
                self.pos = save;
                Err(self.error("expected 'extends' or 'super'"))
            }
        }
    }

    fn name(&mut self) -> &'a str {
        let text = self.text;
        let rest = &text[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, reason: &str) -> TypeSyntaxError {
        TypeSyntaxError {
            offset: self.pos,
            reason: reason.to_string(),
        }
    }
}
