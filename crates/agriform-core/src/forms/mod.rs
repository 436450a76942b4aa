//! Shipped form definitions
//!
//! The two forms the original application carries: scheme submission
//! (provider-conditional identifier fields) and user registration. Both
//! are plain data built through the `FormDef` builder; nothing here holds
//! logic beyond wiring fields to rules.

mod registration;
mod scheme;

pub use registration::registration;
pub use scheme::{scheme, GSTIN_PATTERN, IFSC_PATTERN, TAN_PATTERN};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::{FormError, Result};
use crate::form::FormDef;

/// Provider category for the scheme form's discriminator field.
///
/// `Event` maps to no conditional field; selecting it activates nothing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Government body; activates the TAN number field
    Government,
    /// Bank; activates the IFSC code field
    Bank,
    /// Corporate entity; activates the GSTIN field
    Corporate,
    /// One-off event; activates nothing
    Event,
}

/// Account category for the registration form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IndividualType {
    /// Farmer account
    Farmer,
    /// Scheme provider account
    Provider,
    /// Administrator account
    Admin,
}

/// Look up a shipped form definition by name.
///
/// # Errors
///
/// Returns `FormError::UnknownForm` for a name this workspace does not
/// ship, and propagates any construction error from the definition itself.
pub fn by_name(name: &str) -> Result<FormDef> {
    match name {
        "scheme" => scheme(),
        "registration" => registration(),
        other => Err(FormError::unknown_form(other)),
    }
}

/// Names of every shipped form, for CLI help and error messages.
#[must_use]
pub const fn names() -> &'static [&'static str] {
    &["scheme", "registration"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_by_name_resolves_shipped_forms() {
        for name in names() {
            let form = by_name(name).unwrap();
            assert_eq!(form.name(), *name);
        }
    }

    #[test]
    fn test_by_name_unknown_form_fails() {
        let err = by_name("survey");
        assert!(matches!(err, Err(FormError::UnknownForm { .. })));
    }

    #[test]
    fn test_provider_kind_round_trip() {
        assert_eq!(ProviderKind::Government.to_string(), "government");
        assert_eq!(
            ProviderKind::from_str("corporate").ok(),
            Some(ProviderKind::Corporate)
        );
        assert!(ProviderKind::from_str("ngo").is_err());
    }

    #[test]
    fn test_provider_kind_variants_are_lowercase() {
        use strum::VariantNames as _;
        assert_eq!(
            ProviderKind::VARIANTS,
            ["government", "bank", "corporate", "event"]
        );
    }

    #[test]
    fn test_individual_type_variants() {
        use strum::VariantNames as _;
        assert_eq!(IndividualType::VARIANTS, ["farmer", "provider", "admin"]);
        assert_eq!(IndividualType::Farmer.to_string(), "farmer");
    }
}
