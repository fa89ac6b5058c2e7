use serde::Serialize;
use std::fmt;

/// One method record. Overloads share a name and differ in `parameter_types`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodMapping {
    /// Canonical type name of the return type.
    pub return_type: String,
    pub declared_name: String,
    pub obfuscated_name: String,
    /// Canonical type names in call-signature order.
    pub parameter_types: Vec<String>,
}

impl MethodMapping {
    pub fn new(
        return_type: impl Into<String>,
        declared_name: impl Into<String>,
        obfuscated_name: impl Into<String>,
        parameter_types: Vec<String>,
    ) -> Self {
        Self {
            return_type: return_type.into(),
            declared_name: declared_name.into(),
            obfuscated_name: obfuscated_name.into(),
            parameter_types,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Exact, position-by-position comparison against normalized type names.
    pub fn has_parameters<S: AsRef<str>>(&self, expected: &[S]) -> bool {
        self.parameter_types.len() == expected.len()
            && self
                .parameter_types
                .iter()
                .zip(expected)
                .all(|(have, want)| have == want.as_ref())
    }
}

impl fmt::Display for MethodMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({}) -> {}",
            self.return_type,
            self.declared_name,
            self.parameter_types.join(","),
            self.obfuscated_name
        )
    }
}
