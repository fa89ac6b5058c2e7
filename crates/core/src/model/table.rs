//! Bidirectional class index for one mapping file (pair).
//!
//! `MappingTableBuilder` is the only mutable form. Parsers fill it and call
//! `build()`, after which the `MappingTable` is read-only and can be shared
//! across threads behind an `Arc` without locking.

use super::class::ClassMapping;
use super::stats::ParseStats;
use std::collections::HashMap;
use tracing::debug;

/// Position of a class inside a [`MappingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ClassId(u32);

impl ClassId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable mapping table.
///
/// Classes live in one arena; both name indices point into it, so a class
/// found by obfuscated name is the same record found by declared name.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    classes: Vec<ClassMapping>,
    by_obfuscated: HashMap<String, ClassId>,
    by_declared: HashMap<String, ClassId>,
    stats: ParseStats,
}

impl MappingTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn class_by_obfuscated_name(&self, name: &str) -> Option<&ClassMapping> {
        self.by_obfuscated.get(name).map(|id| self.class(*id))
    }

    pub fn class_by_declared_name(&self, name: &str) -> Option<&ClassMapping> {
        self.by_declared.get(name).map(|id| self.class(*id))
    }

    pub fn has_obfuscated_class(&self, name: &str) -> bool {
        self.by_obfuscated.contains_key(name)
    }

    pub fn has_declared_class(&self, name: &str) -> bool {
        self.by_declared.contains_key(name)
    }

    fn class(&self, id: ClassId) -> &ClassMapping {
        &self.classes[id.index()]
    }

    pub fn classes(&self) -> impl ExactSizeIterator<Item = &ClassMapping> + '_ {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }
}

/// Mutable table under construction.
#[derive(Debug, Default)]
pub struct MappingTableBuilder {
    // Evicted duplicates leave a hole until `build()` compacts the arena.
    slots: Vec<Option<ClassMapping>>,
    by_obfuscated: HashMap<String, usize>,
    by_declared: HashMap<String, usize>,
    stats: ParseStats,
}

impl MappingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class. A class sharing either name with an earlier one
    /// replaces it entirely, keeping both indices unique.
    pub fn insert_class(&mut self, class: ClassMapping) {
        let previous = [
            self.by_obfuscated.get(class.obfuscated_name()).copied(),
            self.by_declared.get(class.declared_name()).copied(),
        ];
        for slot in previous.into_iter().flatten() {
            self.evict(slot);
        }

        let slot = self.slots.len();
        self.by_obfuscated
            .insert(class.obfuscated_name().to_string(), slot);
        self.by_declared.insert(class.declared_name().to_string(), slot);
        self.slots.push(Some(class));
    }

    fn evict(&mut self, slot: usize) {
        let Some(old) = self.slots.get_mut(slot).and_then(Option::take) else {
            return;
        };
        debug!(
            declared = old.declared_name(),
            obfuscated = old.obfuscated_name(),
            "replacing duplicate class mapping"
        );
        if self.by_obfuscated.get(old.obfuscated_name()) == Some(&slot) {
            self.by_obfuscated.remove(old.obfuscated_name());
        }
        if self.by_declared.get(old.declared_name()) == Some(&slot) {
            self.by_declared.remove(old.declared_name());
        }
    }

    pub fn class_by_declared_name_mut(&mut self, name: &str) -> Option<&mut ClassMapping> {
        let slot = *self.by_declared.get(name)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    pub fn stats_mut(&mut self) -> &mut ParseStats {
        &mut self.stats
    }

    /// Freeze into an immutable table, compacting evicted slots.
    pub fn build(self) -> MappingTable {
        let mut remap = vec![None; self.slots.len()];
        let mut classes = Vec::with_capacity(self.by_obfuscated.len());
        for (slot, class) in self.slots.into_iter().enumerate() {
            if let Some(class) = class {
                remap[slot] = Some(ClassId(classes.len() as u32));
                classes.push(class);
            }
        }

        let reindex = |index: HashMap<String, usize>| -> HashMap<String, ClassId> {
            index
                .into_iter()
                .filter_map(|(name, slot)| remap[slot].map(|id| (name, id)))
                .collect()
        };
        let by_obfuscated = reindex(self.by_obfuscated);
        let by_declared = reindex(self.by_declared);

        let mut stats = self.stats;
        stats.classes = classes.len();
        stats.fields = classes.iter().map(ClassMapping::field_count).sum();
        stats.methods = classes.iter().map(|c| c.methods().len()).sum();

        MappingTable {
            classes,
            by_obfuscated,
            by_declared,
            stats,
        }
    }
}
