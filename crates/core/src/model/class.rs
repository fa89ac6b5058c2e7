use super::method::MethodMapping;
use std::collections::HashMap;

/// Position of a method inside its owning [`ClassMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MethodId(u32);

impl MethodId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One class with its fields and methods, addressable from both naming sides.
///
/// Methods are stored once; the two method indices hold positions into
/// that storage, so a record reached by obfuscated name is the very same
/// record reached by declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    declared_name: String,
    obfuscated_name: String,
    fields_by_obfuscated: HashMap<String, String>,
    fields_by_declared: HashMap<String, String>,
    methods: Vec<MethodMapping>,
    methods_by_obfuscated: HashMap<String, Vec<MethodId>>,
    methods_by_declared: HashMap<String, Vec<MethodId>>,
}

impl ClassMapping {
    pub fn new(declared_name: impl Into<String>, obfuscated_name: impl Into<String>) -> Self {
        Self {
            declared_name: declared_name.into(),
            obfuscated_name: obfuscated_name.into(),
            fields_by_obfuscated: HashMap::new(),
            fields_by_declared: HashMap::new(),
            methods: Vec::new(),
            methods_by_obfuscated: HashMap::new(),
            methods_by_declared: HashMap::new(),
        }
    }

    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub fn obfuscated_name(&self) -> &str {
        &self.obfuscated_name
    }

    // ---- Fields ----

    /// Record a field. The two field maps stay exact inverses: a mapping that
    /// conflicts with an earlier one replaces it on both sides.
    pub fn insert_field(&mut self, obfuscated: impl Into<String>, declared: impl Into<String>) {
        let obfuscated = obfuscated.into();
        let declared = declared.into();

        if let Some(old_declared) = self
            .fields_by_obfuscated
            .insert(obfuscated.clone(), declared.clone())
        {
            if old_declared != declared
                && self.fields_by_declared.get(&old_declared) == Some(&obfuscated)
            {
                self.fields_by_declared.remove(&old_declared);
            }
        }

        if let Some(old_obfuscated) = self
            .fields_by_declared
            .insert(declared.clone(), obfuscated.clone())
        {
            if old_obfuscated != obfuscated
                && self.fields_by_obfuscated.get(&old_obfuscated) == Some(&declared)
            {
                self.fields_by_obfuscated.remove(&old_obfuscated);
            }
        }
    }

    pub fn deobfuscate_field(&self, obfuscated: &str) -> Option<&str> {
        self.fields_by_obfuscated.get(obfuscated).map(String::as_str)
    }

    pub fn obfuscate_field(&self, declared: &str) -> Option<&str> {
        self.fields_by_declared.get(declared).map(String::as_str)
    }

    /// `(obfuscated, declared)` pairs in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields_by_obfuscated
            .iter()
            .map(|(obf, decl)| (obf.as_str(), decl.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.fields_by_obfuscated.len()
    }

    // ---- Methods ----

    /// Append a method; overloads keep their insertion order in both indices.
    pub fn insert_method(&mut self, method: MethodMapping) {
        let id = MethodId(self.methods.len() as u32);
        self.methods_by_obfuscated
            .entry(method.obfuscated_name.clone())
            .or_default()
            .push(id);
        self.methods_by_declared
            .entry(method.declared_name.clone())
            .or_default()
            .push(id);
        self.methods.push(method);
    }

    /// All methods in insertion order.
    pub fn methods(&self) -> &[MethodMapping] {
        &self.methods
    }

    /// Overloads whose obfuscated name is `name`, in declaration order.
    pub fn methods_by_obfuscated_name(
        &self,
        name: &str,
    ) -> impl ExactSizeIterator<Item = &MethodMapping> + '_ {
        self.resolve_ids(self.methods_by_obfuscated.get(name))
    }

    /// Overloads whose declared name is `name`, in declaration order.
    pub fn methods_by_declared_name(
        &self,
        name: &str,
    ) -> impl ExactSizeIterator<Item = &MethodMapping> + '_ {
        self.resolve_ids(self.methods_by_declared.get(name))
    }

    fn resolve_ids<'a>(
        &'a self,
        ids: Option<&'a Vec<MethodId>>,
    ) -> impl ExactSizeIterator<Item = &'a MethodMapping> + 'a {
        ids.map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |id| &self.methods[id.index()])
    }
}
