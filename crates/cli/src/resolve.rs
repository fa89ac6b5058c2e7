use crate::pair::PairArgs;
use mapscope_api::{NoHierarchy, SymbolQuery, SymbolTranslator, TypeHierarchy};
use mapscope_core::{describe_class, describe_field};
use std::collections::HashMap;
use std::path::Path;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn translate(pair: &PairArgs, presets: Option<&Path>, query: SymbolQuery, hierarchy: &dyn TypeHierarchy) -> CliResult {
    let loaded = pair.load(presets)?;
    println!("{}", loaded.resolver().translate_or_original(&query, hierarchy));
    Ok(())
}

pub fn class(pair: &PairArgs, presets: Option<&Path>, name: &str) -> CliResult {
    translate(pair, presets, SymbolQuery::class(name), &NoHierarchy)
}

pub fn field(pair: &PairArgs, presets: Option<&Path>, owner: &str, name: &str) -> CliResult {
    translate(pair, presets, SymbolQuery::field(owner, name), &NoHierarchy)
}

pub fn method(
    pair: &PairArgs,
    presets: Option<&Path>,
    owner: &str,
    name: &str,
    arguments: &[String],
    hierarchy: Option<&Path>,
) -> CliResult {
    let query = SymbolQuery::method(owner, name, arguments.iter().cloned());
    match hierarchy {
        Some(path) => {
            let supertypes: HashMap<String, Vec<String>> =
                serde_json::from_str(&std::fs::read_to_string(path)?)?;
            translate(pair, presets, query, &supertypes)
        }
        None => translate(pair, presets, query, &NoHierarchy),
    }
}

pub fn describe(pair: &PairArgs, presets: Option<&Path>, name: &str, field: Option<&str>) -> CliResult {
    let loaded = pair.load(presets)?;
    let (community, canonical) = (Some(&*loaded.community), Some(&*loaded.canonical));

    let names = match field {
        Some(field) => describe_field(community, canonical, name, field),
        None => describe_class(community, canonical, name),
    };
    if names.is_empty() {
        println!("No mapping known for '{}'", field.unwrap_or(name));
    } else {
        println!("{}", names.join(", "));
    }
    Ok(())
}
