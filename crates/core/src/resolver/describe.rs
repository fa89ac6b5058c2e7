//! Every name a symbol is known under, for hover-style documentation.
//!
//! Unlike the resolver, these helpers do not assume which namespace the input
//! comes from: they try each table in both directions and collect whatever
//! matches, first-seen order, duplicates removed.

use crate::model::{MappingTable, MethodMapping};
use indexmap::IndexSet;

fn collect(names: IndexSet<String>) -> Vec<String> {
    names.into_iter().collect()
}

pub fn describe_class(
    community: Option<&MappingTable>,
    canonical: Option<&MappingTable>,
    name: &str,
) -> Vec<String> {
    let mut names = IndexSet::new();

    if let Some(class) = canonical.and_then(|t| t.class_by_obfuscated_name(name)) {
        names.insert(class.declared_name().to_string());
    }
    if let Some(class) = community.and_then(|t| t.class_by_obfuscated_name(name)) {
        names.insert(class.declared_name().to_string());
    }
    if let Some(class) = community.and_then(|t| t.class_by_declared_name(name)) {
        let obfuscated = class.obfuscated_name();
        if let Some(mapped) = canonical.and_then(|t| t.class_by_obfuscated_name(obfuscated)) {
            names.insert(mapped.declared_name().to_string());
        }
        names.insert(format!("({})", obfuscated));
    }

    collect(names)
}

pub fn describe_field(
    community: Option<&MappingTable>,
    canonical: Option<&MappingTable>,
    owner: &str,
    field: &str,
) -> Vec<String> {
    let mut names = IndexSet::new();

    let by_obfuscated = [canonical, community]
        .into_iter()
        .flatten()
        .filter_map(|t| t.class_by_obfuscated_name(owner))
        .filter_map(|class| class.deobfuscate_field(field));
    names.extend(by_obfuscated.map(str::to_string));

    if let Some(class) = community.and_then(|t| t.class_by_declared_name(owner)) {
        let mapped = canonical.and_then(|t| t.class_by_obfuscated_name(class.obfuscated_name()));

        if let Some(obfuscated) = class.obfuscate_field(field) {
            names.insert(obfuscated.to_string());
            if let Some(name) = mapped.and_then(|m| m.deobfuscate_field(obfuscated)) {
                names.insert(name.to_string());
            }
        }
        if let Some(name) = mapped.and_then(|m| m.deobfuscate_field(field)) {
            names.insert(name.to_string());
        }
    }

    collect(names)
}

/// Signatures of the community overloads of `owner.name` whose parameter
/// types equal `parameter_types` exactly.
pub fn describe_method<S: AsRef<str>>(
    community: Option<&MappingTable>,
    owner: &str,
    name: &str,
    parameter_types: &[S],
) -> Vec<String> {
    let Some(table) = community else {
        return Vec::new();
    };
    let mut names = IndexSet::new();
    if let Some(class) = table.class_by_declared_name(owner) {
        if let Some(method) = class
            .methods_by_obfuscated_name(name)
            .find(|m| m.has_parameters(parameter_types))
        {
            names.insert(format_method(table, method));
        }
    }
    collect(names)
}

/// `ret name(a, b)` with class names in type positions shown by their
/// obfuscated names in `table`.
pub fn format_method(table: &MappingTable, method: &MethodMapping) -> String {
    let obfuscated = |ty: &str| -> String {
        table
            .class_by_declared_name(ty)
            .map(|c| c.obfuscated_name().to_string())
            .unwrap_or_else(|| ty.to_string())
    };
    let parameters: Vec<String> = method
        .parameter_types
        .iter()
        .map(|p| obfuscated(p.as_str()))
        .collect();
    format!(
        "{} {}({})",
        obfuscated(method.return_type.as_str()),
        method.declared_name,
        parameters.join(", ")
    )
}
