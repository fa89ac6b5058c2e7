//! Parsers for the two mapping grammars.
//!
//! - [`flat`]: a class list (`<obf> <declared>`) plus an optional member list
//!   with JVM descriptors.
//! - [`retrace`]: class header lines (`<declared> -> <obf>:`) followed by
//!   indented field and method lines using source-form type names.
//!
//! Both produce a [`MappingTable`](crate::model::MappingTable) in one forward
//! pass over their [`LineSource`]s.

pub mod flat;
pub mod retrace;
pub mod source;

pub use flat::parse_flat;
pub use retrace::parse_retrace;
pub use source::{LineSource, PeekableLines};

use crate::error::{MappingError, Result};
use crate::model::ParseStats;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a record whose signature or type encoding is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the record, count it and keep parsing.
    #[default]
    SkipRecord,
    /// Fail the whole parse with the record's error.
    AbortFile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            on_malformed: MalformedPolicy::AbortFile,
        }
    }
}

/// Apply the malformed-record policy to a record-level error.
pub(crate) fn handle_malformed(
    options: &ParseOptions,
    stats: &mut ParseStats,
    line: usize,
    err: MappingError,
) -> Result<()> {
    match options.on_malformed {
        MalformedPolicy::SkipRecord => {
            warn!(line, error = %err, "skipping malformed mapping record");
            stats.malformed_records += 1;
            Ok(())
        }
        MalformedPolicy::AbortFile => Err(err.at_line(line)),
    }
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Surface a read failure that cut the source short.
pub(crate) fn check_source(source: &mut dyn LineSource) -> Result<()> {
    match source.take_error() {
        Some(e) => Err(MappingError::Io(e)),
        None => Ok(()),
    }
}
