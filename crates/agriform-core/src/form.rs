//! Form definition: a registry plus optional conditional rules
//!
//! A `FormDef` is the static description of one logical form. It is built
//! once at wiring time and never changes afterwards; controllers borrow it
//! for the lifetime of a form instance.
//!
//! Builder validation is fail-fast: duplicate names, bad patterns, empty
//! option sets, and rules referencing unregistered fields all surface at
//! `build`, never at runtime.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::field::{FieldName, FieldSpec, FieldSpecBuilder};
use crate::registry::FieldRegistry;
use crate::rules::{ConditionalRules, ConditionalRulesBuilder};
use crate::state::{ErrorMap, Values};

/// Static description of one logical form.
#[derive(Debug, Clone)]
pub struct FormDef {
    name: String,
    registry: FieldRegistry,
    rules: Option<ConditionalRules>,
}

impl FormDef {
    /// Start building a form definition
    #[must_use]
    pub fn builder(name: impl Into<String>) -> FormDefBuilder {
        FormDefBuilder::new(name)
    }

    /// The form's name (e.g. "scheme")
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field registry in declaration order
    #[must_use]
    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// The conditional rule table, if this form has one
    #[must_use]
    pub const fn rules(&self) -> Option<&ConditionalRules> {
        self.rules.as_ref()
    }

    /// The discriminator field, if this form has conditional rules
    #[must_use]
    pub fn discriminator(&self) -> Option<&FieldName> {
        self.rules.as_ref().map(ConditionalRules::discriminator)
    }

    /// The conditional fields activated by the current values.
    ///
    /// Forms without rules activate nothing.
    #[must_use]
    pub fn active_fields(&self, values: &Values) -> BTreeSet<FieldName> {
        self.rules.as_ref().map_or_else(BTreeSet::new, |rules| {
            let current = values
                .get(rules.discriminator())
                .map_or("", String::as_str);
            rules.active_fields(current)
        })
    }

    /// The working set for one validation pass, in declaration order.
    ///
    /// All registered fields participate except conditional fields that the
    /// given active set does not contain.
    #[must_use]
    pub fn working_set(&self, active: &BTreeSet<FieldName>) -> Vec<&FieldSpec> {
        let universe = self
            .rules
            .as_ref()
            .map(ConditionalRules::universe)
            .unwrap_or_default();
        self.registry
            .all()
            .iter()
            .filter(|spec| !universe.contains(spec.name()) || active.contains(spec.name()))
            .collect()
    }

    /// The first field in declaration order carrying an entry in `errors`.
    ///
    /// This is the focus target after a failed validation pass. It is
    /// computed over the freshly supplied mapping; map key iteration order
    /// plays no part.
    #[must_use]
    pub fn first_error_field(&self, errors: &ErrorMap) -> Option<FieldName> {
        self.registry
            .names()
            .find(|name| errors.contains_key(*name))
            .cloned()
    }
}

/// Builder for `FormDef`
///
/// Collects field and rule drafts, then validates everything in one pass.
#[derive(Debug, Clone)]
pub struct FormDefBuilder {
    name: String,
    fields: Vec<FieldSpecBuilder>,
    rules: Option<ConditionalRulesBuilder>,
}

impl FormDefBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: None,
        }
    }

    /// Add a field, preserving declaration order
    #[must_use]
    pub fn field(mut self, field: FieldSpecBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach the conditional rule table
    #[must_use]
    pub fn rules(mut self, rules: ConditionalRulesBuilder) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build and validate the form definition
    ///
    /// # Errors
    ///
    /// Returns the first field spec build error, `FormError::DuplicateField`
    /// for a repeated name, or `FormError::UnknownField` when the rule table
    /// names a field (or discriminator) that is not registered.
    pub fn build(self) -> Result<FormDef> {
        let mut registry = FieldRegistry::new();
        for draft in self.fields {
            registry.register(draft.build()?)?;
        }

        let rules = self.rules.map(ConditionalRulesBuilder::build).transpose()?;
        if let Some(rules) = &rules {
            registry.get(rules.discriminator())?;
            for name in rules.universe() {
                registry.get(&name)?;
            }
        }

        Ok(FormDef {
            name: self.name,
            registry,
            rules,
        })
    }
}
