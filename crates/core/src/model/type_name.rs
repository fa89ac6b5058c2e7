//! Canonical type names.
//!
//! Both mapping grammars describe parameter and return types, one with JVM
//! descriptors (`[Ljava/lang/String;`), the other with source-form names
//! (`java.lang.String[]`). Everything is normalized into one vocabulary so the
//! two can be compared as plain strings:
//!
//! - primitives use `byte char double float integer long short boolean void`
//! - classes are fully dotted
//! - each array dimension appends `[]`

use crate::error::{MappingError, Result};

const ARRAY_SUFFIX: &str = "[]";

/// Parse a single field descriptor, e.g. `[[I` -> `integer[][]`.
///
/// The whole input must be consumed.
pub fn parse_type_encoding(encoding: &str) -> Result<String> {
    let mut cursor = DescriptorCursor::new(encoding);
    let ty = cursor.next_type()?;
    if !cursor.is_at_end() {
        return Err(MappingError::type_encoding(
            encoding,
            format!("trailing characters '{}'", cursor.remaining()),
        ));
    }
    Ok(ty)
}

/// Parse a method descriptor `(<params>)<return>` into
/// `(parameter_types, return_type)`.
pub fn parse_method_signature(signature: &str) -> Result<(Vec<String>, String)> {
    let mut cursor = DescriptorCursor::new(signature);
    if cursor.bump() != Some('(') {
        return Err(MappingError::signature(signature, "missing '('"));
    }

    let mut params = Vec::new();
    loop {
        match cursor.peek() {
            Some(')') => {
                cursor.bump();
                break;
            }
            Some(_) => params.push(cursor.next_type().map_err(|e| wrap_signature(signature, e))?),
            None => return Err(MappingError::signature(signature, "missing ')'")),
        }
    }

    if cursor.is_at_end() {
        return Err(MappingError::signature(signature, "missing return type"));
    }
    let return_type = cursor
        .next_type()
        .map_err(|e| wrap_signature(signature, e))?;

    if !cursor.is_at_end() {
        return Err(MappingError::signature(
            signature,
            format!("trailing characters '{}' after return type", cursor.remaining()),
        ));
    }

    Ok((params, return_type))
}

// Type-encoding failures inside a signature keep their own variant so callers
// can tell a bad descriptor letter from a missing delimiter.
fn wrap_signature(signature: &str, err: MappingError) -> MappingError {
    match err {
        MappingError::MalformedTypeEncoding { reason, .. } => {
            MappingError::type_encoding(signature, reason)
        }
        other => other,
    }
}

struct DescriptorCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DescriptorCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn next_type(&mut self) -> Result<String> {
        let mut dimensions = 0usize;
        while self.peek() == Some('[') {
            self.bump();
            dimensions += 1;
        }

        let base = match self.bump() {
            Some('B') => "byte".to_string(),
            Some('C') => "char".to_string(),
            Some('D') => "double".to_string(),
            Some('F') => "float".to_string(),
            Some('I') => "integer".to_string(),
            Some('J') => "long".to_string(),
            Some('S') => "short".to_string(),
            Some('Z') => "boolean".to_string(),
            Some('V') => "void".to_string(),
            Some('L') => {
                let rest = self.remaining();
                let end = rest.find(';').ok_or_else(|| {
                    MappingError::type_encoding(self.input, "object type without ';'")
                })?;
                if end == 0 {
                    return Err(MappingError::type_encoding(self.input, "empty class name"));
                }
                let name = rest[..end].replace('/', ".");
                self.pos += end + 1;
                name
            }
            Some(c) => {
                return Err(MappingError::type_encoding(
                    self.input,
                    format!("unrecognized type character '{}'", c),
                ));
            }
            None if dimensions > 0 => {
                return Err(MappingError::type_encoding(
                    self.input,
                    "array dimensions without element type",
                ));
            }
            None => {
                return Err(MappingError::type_encoding(self.input, "unexpected end of input"));
            }
        };

        Ok(with_dimensions(base, dimensions))
    }
}

/// Append `dimensions` array suffixes to `base`.
pub(crate) fn with_dimensions(mut base: String, dimensions: usize) -> String {
    for _ in 0..dimensions {
        base.push_str(ARRAY_SUFFIX);
    }
    base
}

/// Normalize a source-form type name (`int[]`, `java/lang/String`) into the
/// canonical vocabulary.
///
/// Whitespace is not trimmed; callers that accept free-form input trim first.
pub fn normalize_source_type(name: &str) -> String {
    let (base, dimensions) = split_array_suffix(name);
    let base = match base {
        "int" => "integer".to_string(),
        other => other.replace('/', "."),
    };
    with_dimensions(base, dimensions)
}

/// Split `Foo[][]` into (`Foo`, 2). A trailing varargs `...` counts as one
/// dimension.
pub fn split_array_suffix(name: &str) -> (&str, usize) {
    let mut base = name;
    let mut dimensions = 0;
    if let Some(stripped) = base.strip_suffix("...") {
        base = stripped;
        dimensions += 1;
    }
    while let Some(stripped) = base.strip_suffix(ARRAY_SUFFIX) {
        base = stripped;
        dimensions += 1;
    }
    (base, dimensions)
}

/// Remove every `<...>` type-argument list, nested ones included.
///
/// `java.util.Map<K, java.util.List<V>>[]` -> `java.util.Map[]`
pub fn erase_generics(name: &str) -> String {
    if !name.contains('<') {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
