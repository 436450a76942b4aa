//! Declaration-ordered field registry
//!
//! The registry owns every `FieldSpec` for one logical form. Declaration
//! order is preserved because "focus the first error" is defined over it;
//! map key iteration order would not be deterministic across runs.
//!
//! Registration misuse (duplicate names, lookups of unregistered names)
//! fails fast with an error rather than being swallowed. These indicate a
//! static wiring defect, never a user input condition.

use crate::error::{FormError, Result};
use crate::field::{FieldName, FieldSpec};

/// Ordered collection of field specs for one form.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    specs: Vec<FieldSpec>,
    index: im::HashMap<FieldName, usize>,
}

impl FieldRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec, preserving declaration order
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateField` if a spec with the same name is
    /// already registered.
    pub fn register(&mut self, spec: FieldSpec) -> Result<()> {
        if self.index.contains_key(spec.name()) {
            return Err(FormError::duplicate_field(spec.name().as_str()));
        }
        self.index = self.index.update(spec.name().clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    /// Look up a spec by name
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` if no spec with that name exists.
    pub fn get(&self, name: &FieldName) -> Result<&FieldSpec> {
        self.index
            .get(name)
            .and_then(|&i| self.specs.get(i))
            .ok_or_else(|| FormError::unknown_field(name.as_str()))
    }

    /// All specs in declaration order
    #[must_use]
    pub fn all(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Whether a spec with this name is registered
    #[must_use]
    pub fn contains(&self, name: &FieldName) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered specs
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &FieldName> {
        self.specs.iter().map(FieldSpec::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> FieldSpec {
        FieldSpec::builder(name, name).build().unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = FieldRegistry::new();
        registry.register(spec("title")).unwrap();

        let name = FieldName::parse("title").unwrap();
        let found = registry.get(&name).unwrap();
        assert_eq!(found.name().as_str(), "title");
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = FieldRegistry::new();
        registry.register(spec("title")).unwrap();

        let err = registry.register(spec("title"));
        assert!(matches!(err, Err(FormError::DuplicateField { .. })));
        // The first registration survives
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_fails() {
        let registry = FieldRegistry::new();
        let name = FieldName::parse("missing").unwrap();
        let err = registry.get(&name);
        assert!(matches!(err, Err(FormError::UnknownField { .. })));
    }

    #[test]
    fn test_all_preserves_declaration_order() {
        let mut registry = FieldRegistry::new();
        for name in ["zebra", "apple", "mango"] {
            registry.register(spec(name)).unwrap();
        }

        let order: Vec<&str> = registry.all().iter().map(|s| s.name().as_str()).collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_names_iterates_in_order() {
        let mut registry = FieldRegistry::new();
        for name in ["first", "second"] {
            registry.register(spec(name)).unwrap();
        }

        let names: Vec<&str> = registry.names().map(FieldName::as_str).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_contains() {
        let mut registry = FieldRegistry::new();
        registry.register(spec("title")).unwrap();

        assert!(registry.contains(&FieldName::parse("title").unwrap()));
        assert!(!registry.contains(&FieldName::parse("other").unwrap()));
    }

    #[test]
    fn test_empty_registry() {
        let registry = FieldRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.all().is_empty());
    }
}
