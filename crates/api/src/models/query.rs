use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Field,
    Method,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Class => "class",
            SymbolKind::Field => "field",
            SymbolKind::Method => "method",
        };
        f.write_str(s)
    }
}

/// A symbol as it appears in the community namespace.
///
/// Every name carried here is a *declared* community name, i.e. the text
/// that shows up in locally available source. Owners are fully dotted
/// class names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolQuery {
    Class {
        name: String,
    },
    Field {
        owner: String,
        name: String,
    },
    Method {
        owner: String,
        name: String,
        /// Argument type names in call-signature order.
        #[serde(default)]
        arguments: Vec<String>,
    },
}

impl SymbolQuery {
    pub fn class(name: impl Into<String>) -> Self {
        SymbolQuery::Class { name: name.into() }
    }

    pub fn field(owner: impl Into<String>, name: impl Into<String>) -> Self {
        SymbolQuery::Field {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn method<I, S>(owner: impl Into<String>, name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SymbolQuery::Method {
            owner: owner.into(),
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolQuery::Class { .. } => SymbolKind::Class,
            SymbolQuery::Field { .. } => SymbolKind::Field,
            SymbolQuery::Method { .. } => SymbolKind::Method,
        }
    }

    /// The text a caller keeps when no translation exists.
    pub fn original_text(&self) -> &str {
        match self {
            SymbolQuery::Class { name }
            | SymbolQuery::Field { name, .. }
            | SymbolQuery::Method { name, .. } => name,
        }
    }
}

impl fmt::Display for SymbolQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolQuery::Class { name } => write!(f, "{}", name),
            SymbolQuery::Field { owner, name } => write!(f, "{}#{}", owner, name),
            SymbolQuery::Method {
                owner,
                name,
                arguments,
            } => write!(f, "{}#{}({})", owner, name, arguments.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_json_shape() {
        let query = SymbolQuery::method("com.example.Foo", "a", ["int", "java.lang.String"]);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["kind"], "method");
        assert_eq!(json["arguments"][1], "java.lang.String");

        let back: SymbolQuery =
            serde_json::from_str(r#"{"kind":"method","owner":"Foo","name":"a"}"#).unwrap();
        assert_eq!(back, SymbolQuery::method("Foo", "a", Vec::<String>::new()));
    }

    #[test]
    fn test_display_and_original_text() {
        let query = SymbolQuery::field("com.example.Foo", "b");
        assert_eq!(query.to_string(), "com.example.Foo#b");
        assert_eq!(query.original_text(), "b");
        assert_eq!(query.kind(), SymbolKind::Field);
    }
}
