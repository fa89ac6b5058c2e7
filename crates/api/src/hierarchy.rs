//! Host-supplied type hierarchy.
//!
//! The resolver walks supertypes when a method is inherited rather than
//! declared. It never computes the hierarchy itself; the host analysis layer
//! provides it through this trait.

use std::collections::{BTreeMap, HashMap};

/// Provides inheritance relationship information.
pub trait TypeHierarchy: Send + Sync {
    /// Direct supertypes (superclass and implemented interfaces) of a declared
    /// class name, in declaration order.
    fn direct_supertypes(&self, fqn: &str) -> Vec<String>;
}

/// A hierarchy with no edges. Useful when no analysis layer is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHierarchy;

impl TypeHierarchy for NoHierarchy {
    fn direct_supertypes(&self, _fqn: &str) -> Vec<String> {
        vec![]
    }
}

impl TypeHierarchy for HashMap<String, Vec<String>> {
    fn direct_supertypes(&self, fqn: &str) -> Vec<String> {
        self.get(fqn).cloned().unwrap_or_default()
    }
}

impl TypeHierarchy for BTreeMap<String, Vec<String>> {
    fn direct_supertypes(&self, fqn: &str) -> Vec<String> {
        self.get(fqn).cloned().unwrap_or_default()
    }
}

impl<T: TypeHierarchy + ?Sized> TypeHierarchy for &T {
    fn direct_supertypes(&self, fqn: &str) -> Vec<String> {
        (**self).direct_supertypes(fqn)
    }
}
