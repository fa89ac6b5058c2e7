//! Hierarchical "retrace" mapping format (ProGuard / R8 style).
//!
//! ```text
//! # compiler: R8
//! com.example.Foo -> a:
//!     int count -> b
//!     1:4:void <init>() -> <init>
//!     12:15:java.lang.String name(int,boolean) -> c
//! ```
//!
//! A class header opens a block; every following line indented by exactly one
//! indentation unit belongs to it. Types are source-form names and are
//! normalized into the canonical vocabulary.

use super::source::LineSource;
use super::{ParseOptions, check_source, is_comment};
use crate::error::Result;
use crate::model::type_name::normalize_source_type;
use crate::model::{ClassMapping, MappingTable, MappingTableBuilder, MethodMapping, ParseStats};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// One indentation unit of a member line.
pub const INDENT: &str = "    ";

static CLASS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w.$]+) -> ([\w.$]+):$").expect("valid class pattern"));

static CONSTRUCTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+:\d+:)?(?:\S+ )?<(?:cl)?init>(?:\([^)]*\))?(?::\d+(?::\d+)?)? -> \S+$")
        .expect("valid constructor pattern")
});

static METHOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(\d+):(\d+):)?(\S+) ([\w$]+)\(([^)]*)\)(?::\d+(?::\d+)?)? -> ([\w$]+)$",
    )
    .expect("valid method pattern")
});

static FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+) ([\w$]+) -> ([\w$]+)$").expect("valid field pattern")
});

/// Parse a retrace mapping. Records here carry no JVM descriptors, so the
/// malformed-record policy in `_options` never triggers; unrecognized lines
/// are counted as ignored.
pub fn parse_retrace(source: &mut dyn LineSource, _options: &ParseOptions) -> Result<MappingTable> {
    let mut builder = MappingTableBuilder::new();

    while let Some(line) = source.take_line() {
        if is_comment(&line) || line.trim().is_empty() {
            continue;
        }

        let Some(caps) = CLASS_PATTERN.captures(line.trim_end()) else {
            trace!(line = source.line_number(), "ignoring line outside of a class block");
            builder.stats_mut().ignored_lines += 1;
            continue;
        };

        let mut class = ClassMapping::new(&caps[1], &caps[2]);
        read_members(source, &mut class, builder.stats_mut());
        builder.insert_class(class);
    }
    check_source(source)?;

    let table = builder.build();
    let stats = table.stats();
    debug!(
        classes = stats.classes,
        fields = stats.fields,
        methods = stats.methods,
        dropped = stats.dropped(),
        "parsed retrace mapping"
    );
    Ok(table)
}

/// Strip exactly one indentation unit. Lines indented less, more, or with
/// other whitespace do not belong to the block.
fn member_body(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(INDENT)?;
    match rest.chars().next() {
        Some(c) if !c.is_whitespace() => Some(rest),
        _ => None,
    }
}

fn read_members(source: &mut dyn LineSource, class: &mut ClassMapping, stats: &mut ParseStats) {
    loop {
        let body = match source.peek_line() {
            // Comment lines never end a block, indented or not. Only a
            // non-comment line without the member indent does.
            Some(next) if is_comment(next) => {
                source.take_line();
                continue;
            }
            Some(next) => match member_body(next) {
                Some(body) => body.trim_end().to_string(),
                None => break,
            },
            None => break,
        };
        source.take_line();
        let line_no = source.line_number();

        if CONSTRUCTOR_PATTERN.is_match(&body) {
            stats.constructors_skipped += 1;
            continue;
        }

        if let Some(caps) = METHOD_PATTERN.captures(&body) {
            let parameters = &caps[5];
            // Known limitation: a type whose text contains ',' is split apart.
            let parameter_types = if parameters.is_empty() {
                Vec::new()
            } else {
                parameters.split(',').map(normalize_source_type).collect()
            };
            class.insert_method(MethodMapping::new(
                normalize_source_type(&caps[3]),
                &caps[4],
                &caps[6],
                parameter_types,
            ));
        } else if let Some(caps) = FIELD_PATTERN.captures(&body) {
            class.insert_field(&caps[3], &caps[2]);
        } else {
            trace!(line = line_no, "ignoring unrecognized member line");
            stats.ignored_lines += 1;
        }
    }
}
