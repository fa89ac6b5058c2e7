use serde::Serialize;

/// Counters collected while a table is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub classes: usize,
    pub fields: usize,
    pub methods: usize,
    /// Records dropped because of a malformed signature or type encoding.
    pub malformed_records: usize,
    /// Member records naming a class absent from the class list.
    pub unresolved_members: usize,
    /// Constructor and static-initializer records.
    pub constructors_skipped: usize,
    /// Non-comment lines that match no record shape.
    pub ignored_lines: usize,
}

impl ParseStats {
    /// Total number of records that did not make it into the table.
    pub fn dropped(&self) -> usize {
        self.malformed_records + self.unresolved_members + self.constructors_skipped
    }
}
