//! Conditional activation rules
//!
//! A discriminator field's value selects which conditional fields are
//! active. The mapping is a data table, not branching logic, so adding a
//! category is a data change.
//!
//! Terminology:
//! - **universe**: every field appearing anywhere in the table. Only these
//!   fields can ever be deactivated.
//! - **active set**: the fields mapped to the current discriminator value.
//!   Unknown or unset values activate nothing.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::field::FieldName;

/// Discriminator-driven activation table for one form.
#[derive(Debug, Clone)]
pub struct ConditionalRules {
    discriminator: FieldName,
    table: BTreeMap<String, BTreeSet<FieldName>>,
}

impl ConditionalRules {
    /// Start building a rule table keyed by the given discriminator field
    #[must_use]
    pub fn builder(discriminator: impl Into<String>) -> ConditionalRulesBuilder {
        ConditionalRulesBuilder::new(discriminator)
    }

    /// The field whose value drives activation
    #[must_use]
    pub const fn discriminator(&self) -> &FieldName {
        &self.discriminator
    }

    /// The fields activated by `value`.
    ///
    /// Total function: an unset (empty after trimming) or unmapped value
    /// activates nothing.
    #[must_use]
    pub fn active_fields(&self, value: &str) -> BTreeSet<FieldName> {
        if value.trim().is_empty() {
            return BTreeSet::new();
        }
        self.table.get(value).cloned().unwrap_or_default()
    }

    /// Every field appearing anywhere in the table
    #[must_use]
    pub fn universe(&self) -> BTreeSet<FieldName> {
        self.table.values().flatten().cloned().collect()
    }

    /// Fields active under `old` but not under `new`.
    ///
    /// These are the fields whose values and errors must be cleared when
    /// the discriminator changes, so a stale category-specific identifier
    /// cannot leak into a submission for a different category.
    #[must_use]
    pub fn deactivated(&self, old: &str, new: &str) -> BTreeSet<FieldName> {
        let next = self.active_fields(new);
        self.active_fields(old)
            .into_iter()
            .filter(|name| !next.contains(name))
            .collect()
    }

    /// The raw table, for schema output
    #[must_use]
    pub const fn table(&self) -> &BTreeMap<String, BTreeSet<FieldName>> {
        &self.table
    }
}

/// Builder for `ConditionalRules`
#[derive(Debug, Clone)]
pub struct ConditionalRulesBuilder {
    discriminator: String,
    entries: Vec<(String, Vec<String>)>,
}

impl ConditionalRulesBuilder {
    fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            entries: Vec::new(),
        }
    }

    /// Map a discriminator value to the fields it activates.
    ///
    /// Mapping the same value twice merges the field sets.
    #[must_use]
    pub fn activates<I, S>(mut self, value: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push((
            value.into(),
            fields.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Build the rule table, validating every field name
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidFieldName` if the discriminator or any
    /// activated field name fails name validation.
    pub fn build(self) -> Result<ConditionalRules> {
        let discriminator = FieldName::parse(self.discriminator)?;

        let mut table: BTreeMap<String, BTreeSet<FieldName>> = BTreeMap::new();
        for (value, fields) in self.entries {
            let parsed = fields
                .into_iter()
                .map(FieldName::parse)
                .collect::<Result<BTreeSet<_>>>()?;
            table.entry(value).or_default().extend(parsed);
        }

        Ok(ConditionalRules {
            discriminator,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        FieldName::parse(s).unwrap()
    }

    fn provider_rules() -> ConditionalRules {
        ConditionalRules::builder("provider")
            .activates("government", ["tan_number"])
            .activates("bank", ["ifsc_code"])
            .activates("corporate", ["gstin"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_active_fields_known_value() {
        let rules = provider_rules();
        let active = rules.active_fields("bank");
        assert_eq!(active, BTreeSet::from([name("ifsc_code")]));
    }

    #[test]
    fn test_active_fields_unknown_value_is_empty() {
        let rules = provider_rules();
        assert!(rules.active_fields("event").is_empty());
        assert!(rules.active_fields("nonsense").is_empty());
    }

    #[test]
    fn test_active_fields_unset_value_is_empty() {
        let rules = provider_rules();
        assert!(rules.active_fields("").is_empty());
        assert!(rules.active_fields("   ").is_empty());
    }

    #[test]
    fn test_universe_is_union_of_all_sets() {
        let rules = provider_rules();
        let universe = rules.universe();
        assert_eq!(
            universe,
            BTreeSet::from([name("tan_number"), name("ifsc_code"), name("gstin")])
        );
    }

    #[test]
    fn test_deactivated_on_switch() {
        let rules = provider_rules();
        let dropped = rules.deactivated("bank", "corporate");
        assert_eq!(dropped, BTreeSet::from([name("ifsc_code")]));
    }

    #[test]
    fn test_deactivated_same_value_is_empty() {
        let rules = provider_rules();
        assert!(rules.deactivated("bank", "bank").is_empty());
    }

    #[test]
    fn test_deactivated_from_unset_is_empty() {
        let rules = provider_rules();
        assert!(rules.deactivated("", "government").is_empty());
    }

    #[test]
    fn test_deactivated_to_unset_drops_everything_active() {
        let rules = provider_rules();
        let dropped = rules.deactivated("government", "");
        assert_eq!(dropped, BTreeSet::from([name("tan_number")]));
    }

    #[test]
    fn test_duplicate_values_merge() {
        let rules = ConditionalRules::builder("provider")
            .activates("government", ["tan_number"])
            .activates("government", ["registration_number"])
            .build()
            .unwrap();
        assert_eq!(
            rules.active_fields("government"),
            BTreeSet::from([name("tan_number"), name("registration_number")])
        );
    }

    #[test]
    fn test_multiple_fields_per_value() {
        let rules = ConditionalRules::builder("provider")
            .activates("bank", ["ifsc_code", "branch_code"])
            .build()
            .unwrap();
        assert_eq!(rules.active_fields("bank").len(), 2);
    }

    #[test]
    fn test_build_rejects_bad_field_name() {
        let err = ConditionalRules::builder("provider")
            .activates("bank", ["ifsc-code"])
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_build_rejects_bad_discriminator() {
        let err = ConditionalRules::builder("9provider").build();
        assert!(err.is_err());
    }
}
