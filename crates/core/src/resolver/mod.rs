//! Two-hop symbol resolution.
//!
//! A community name is first mapped to its obfuscated identifier through the
//! community table, then back out to a declared name through the canonical
//! table:
//!
//! ```text
//! community.declared --(community)--> obfuscated --(canonical)--> canonical.declared
//! ```
//!
//! Methods are matched by name and by translated argument types; when the
//! owner does not declare a match, its supertypes are searched.

pub mod describe;

pub use describe::{describe_class, describe_field, describe_method, format_method};

use crate::model::type_name::{erase_generics, normalize_source_type, split_array_suffix, with_dimensions};
use crate::model::{ClassMapping, MappingTable, MethodMapping};
use mapscope_api::{SymbolQuery, SymbolTranslator, TypeHierarchy};
use std::collections::HashSet;
use tracing::trace;

/// Read-only view over a community/canonical table pair.
///
/// Either table may be missing while it is still being built; every lookup
/// then answers `None`.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    community: Option<&'a MappingTable>,
    canonical: Option<&'a MappingTable>,
}

impl<'a> Resolver<'a> {
    pub fn new(community: Option<&'a MappingTable>, canonical: Option<&'a MappingTable>) -> Self {
        Self {
            community,
            canonical,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.community.is_some() && self.canonical.is_some()
    }

    /// Canonical record of a community class, found through the shared
    /// obfuscated name.
    pub fn canonical_class(&self, declared_name: &str) -> Option<&'a ClassMapping> {
        let (community, canonical) = (self.community?, self.canonical?);
        let key = class_key(declared_name);
        let class = community.class_by_declared_name(&key)?;
        canonical.class_by_obfuscated_name(class.obfuscated_name())
    }

    pub fn class_name(&self, declared_name: &str) -> Option<&'a str> {
        self.canonical_class(declared_name)
            .map(ClassMapping::declared_name)
    }

    /// Fields are never looked up in supertypes.
    pub fn field_name(&self, owner: &str, field: &str) -> Option<&'a str> {
        self.canonical_class(owner)?.deobfuscate_field(field)
    }

    /// Translate a source-form argument type into the canonical vocabulary.
    ///
    /// Generic arguments are erased and array dimensions kept. A type with no
    /// class mapping keeps its own (normalized) text.
    pub fn translate_type(&self, source_type: &str) -> String {
        let erased = erase_generics(source_type.trim());
        let (base, dimensions) = split_array_suffix(&erased);
        match self.class_name(base) {
            Some(name) => with_dimensions(name.to_string(), dimensions),
            None => normalize_source_type(&erased),
        }
    }

    /// Find the canonical record of a method visible on `owner`.
    ///
    /// Candidates come from the canonical class's obfuscated-name index, since
    /// community source still shows methods under their obfuscated names.
    /// Supertypes are searched depth-first in declaration order; the first
    /// matching overload wins.
    pub fn method<S: AsRef<str>>(
        &self,
        owner: &str,
        name: &str,
        arguments: &[S],
        hierarchy: &dyn TypeHierarchy,
    ) -> Option<&'a MethodMapping> {
        if !self.is_complete() {
            return None;
        }

        let expected: Vec<String> = arguments
            .iter()
            .map(|arg| self.translate_type(arg.as_ref()))
            .collect();

        let mut visited = HashSet::new();
        let mut pending = vec![class_key(owner)];
        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            if let Some(found) = self
                .canonical_class(&current)
                .and_then(|class| find_overload(class, name, &expected))
            {
                trace!(owner, declared_in = %current, method = %found, "resolved method");
                return Some(found);
            }

            let supertypes = hierarchy.direct_supertypes(&current);
            pending.extend(supertypes.iter().rev().map(|s| class_key(s)));
        }
        None
    }

    pub fn method_name<S: AsRef<str>>(
        &self,
        owner: &str,
        name: &str,
        arguments: &[S],
        hierarchy: &dyn TypeHierarchy,
    ) -> Option<&'a str> {
        self.method(owner, name, arguments, hierarchy)
            .map(|m| m.declared_name.as_str())
    }

    /// Dispatch a query to the lookup for its kind.
    pub fn resolve(&self, query: &SymbolQuery, hierarchy: &dyn TypeHierarchy) -> Option<String> {
        let resolved = match query {
            SymbolQuery::Class { name } => self.class_name(name),
            SymbolQuery::Field { owner, name } => self.field_name(owner, name),
            SymbolQuery::Method {
                owner,
                name,
                arguments,
            } => self.method_name(owner, name, arguments, hierarchy),
        };
        resolved.map(str::to_string)
    }
}

impl SymbolTranslator for Resolver<'_> {
    fn translate(&self, query: &SymbolQuery, hierarchy: &dyn TypeHierarchy) -> Option<String> {
        self.resolve(query, hierarchy)
    }
}

fn class_key(name: &str) -> String {
    erase_generics(name.trim())
}

fn find_overload<'a>(
    class: &'a ClassMapping,
    name: &str,
    expected: &[String],
) -> Option<&'a MethodMapping> {
    class
        .methods_by_obfuscated_name(name)
        .find(|candidate| candidate.has_parameters(expected))
}

pub fn resolve_class_name(
    community: Option<&MappingTable>,
    canonical: Option<&MappingTable>,
    declared_name: &str,
) -> Option<String> {
    Resolver::new(community, canonical)
        .class_name(declared_name)
        .map(str::to_string)
}

pub fn resolve_field_name(
    community: Option<&MappingTable>,
    canonical: Option<&MappingTable>,
    owner: &str,
    field: &str,
) -> Option<String> {
    Resolver::new(community, canonical)
        .field_name(owner, field)
        .map(str::to_string)
}

pub fn resolve_method_name<S: AsRef<str>>(
    community: Option<&MappingTable>,
    canonical: Option<&MappingTable>,
    owner: &str,
    hierarchy: &dyn TypeHierarchy,
    method: &str,
    arguments: &[S],
) -> Option<String> {
    Resolver::new(community, canonical)
        .method_name(owner, method, arguments, hierarchy)
        .map(str::to_string)
}
