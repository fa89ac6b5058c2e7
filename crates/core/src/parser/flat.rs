//! Flat two-file mapping format.
//!
//! Class list, one class per line:
//!
//! ```text
//! # comment
//! a net/minecraft/server/Block
//! ```
//!
//! Member list, fields with three tokens and methods with four:
//!
//! ```text
//! net/minecraft/server/Block b hardness
//! net/minecraft/server/Block a (ILjava/lang/String;)Z isValid
//! ```
//!
//! Members are attached to classes by *declared* class name. Members of
//! classes missing from the class list are dropped.

use super::source::LineSource;
use super::{ParseOptions, check_source, handle_malformed, is_comment};
use crate::error::Result;
use crate::model::type_name::parse_method_signature;
use crate::model::{ClassMapping, MappingTable, MappingTableBuilder, MethodMapping};
use tracing::{debug, trace};

pub fn parse_flat(
    classes: &mut dyn LineSource,
    members: Option<&mut dyn LineSource>,
    options: &ParseOptions,
) -> Result<MappingTable> {
    let mut builder = MappingTableBuilder::new();
    read_classes(classes, &mut builder)?;
    if let Some(members) = members {
        read_members(members, &mut builder, options)?;
    }

    let table = builder.build();
    let stats = table.stats();
    debug!(
        classes = stats.classes,
        fields = stats.fields,
        methods = stats.methods,
        dropped = stats.dropped(),
        "parsed flat mapping"
    );
    Ok(table)
}

fn read_classes(source: &mut dyn LineSource, builder: &mut MappingTableBuilder) -> Result<()> {
    while let Some(line) = source.take_line() {
        if is_comment(&line) || line.trim().is_empty() {
            continue;
        }

        let normalized = line.replace('/', ".");
        let parsed = normalized
            .split_once(' ')
            .map(|(obf, declared)| (obf.trim(), declared.trim()))
            .filter(|(obf, declared)| !obf.is_empty() && !declared.is_empty());

        match parsed {
            Some((obfuscated, declared)) => {
                builder.insert_class(ClassMapping::new(declared, obfuscated));
            }
            None => {
                trace!(line = source.line_number(), "ignoring class line without two names");
                builder.stats_mut().ignored_lines += 1;
            }
        }
    }
    check_source(source)
}

fn read_members(
    source: &mut dyn LineSource,
    builder: &mut MappingTableBuilder,
    options: &ParseOptions,
) -> Result<()> {
    while let Some(line) = source.take_line() {
        let line_no = source.line_number();
        if is_comment(&line) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            [owner, obfuscated, declared] => {
                let owner = owner.replace('/', ".");
                match builder.class_by_declared_name_mut(&owner) {
                    Some(class) => class.insert_field(*obfuscated, *declared),
                    None => skip_unresolved(builder, &owner, line_no),
                }
            }
            [owner, obfuscated, signature, declared] => {
                let owner = owner.replace('/', ".");
                if builder.class_by_declared_name_mut(&owner).is_none() {
                    skip_unresolved(builder, &owner, line_no);
                    continue;
                }

                match parse_method_signature(signature) {
                    Ok((parameter_types, return_type)) => {
                        if let Some(class) = builder.class_by_declared_name_mut(&owner) {
                            class.insert_method(MethodMapping::new(
                                return_type,
                                *declared,
                                *obfuscated,
                                parameter_types,
                            ));
                        }
                    }
                    Err(e) => handle_malformed(options, builder.stats_mut(), line_no, e)?,
                }
            }
            _ => {
                trace!(line = line_no, "ignoring member line with unexpected shape");
                builder.stats_mut().ignored_lines += 1;
            }
        }
    }
    check_source(source)
}

fn skip_unresolved(builder: &mut MappingTableBuilder, owner: &str, line: usize) {
    trace!(line, owner, "dropping member of unknown class");
    builder.stats_mut().unresolved_members += 1;
}
