//! The scheme submission form
//!
//! Field order matches the original application's markup top to bottom;
//! "focus first error" depends on it.

use strum::VariantNames as _;

use super::ProviderKind;
use crate::error::Result;
use crate::field::FieldSpec;
use crate::form::FormDef;
use crate::rules::ConditionalRules;

/// Government identifier: 4 letters, 5 digits, 1 letter.
pub const TAN_PATTERN: &str = "^[A-Z]{4}[0-9]{5}[A-Z]$";

/// Bank identifier: 4 letters, a literal `0`, 6 alphanumerics.
pub const IFSC_PATTERN: &str = "^[A-Z]{4}0[A-Z0-9]{6}$";

/// Corporate tax identifier grammar, 15 characters.
pub const GSTIN_PATTERN: &str = "^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$";

/// Build the scheme submission form definition.
///
/// Discriminator `provider`: `government` activates `tan_number`, `bank`
/// activates `ifsc_code`, `corporate` activates `gstin`, `event` activates
/// nothing.
///
/// # Errors
///
/// Only if the built-in definition itself is broken; a passing test suite
/// means this never fails.
pub fn scheme() -> Result<FormDef> {
    FormDef::builder("scheme")
        .field(FieldSpec::builder("title", "Scheme title").required())
        .field(
            FieldSpec::builder("provider", "Provider type")
                .options(ProviderKind::VARIANTS.iter().copied())
                .required(),
        )
        .field(FieldSpec::builder("organization_name", "Organization name").required())
        .field(
            FieldSpec::builder("deadline", "Deadline")
                .date()
                .required(),
        )
        .field(FieldSpec::builder("description", "Description").required())
        .field(FieldSpec::builder("eligibility", "Eligibility criteria").required())
        .field(FieldSpec::builder("benefits", "Benefits").required())
        .field(FieldSpec::builder("documents", "Required documents"))
        .field(FieldSpec::builder("application_process", "Application process"))
        .field(FieldSpec::builder("website", "Website").url())
        .field(FieldSpec::builder("tags", "Tags"))
        .field(FieldSpec::builder("contact_name", "Contact name").required())
        .field(
            FieldSpec::builder("contact_email", "Contact email")
                .email()
                .required(),
        )
        .field(FieldSpec::builder("contact_phone", "Contact phone"))
        .field(
            FieldSpec::builder("tan_number", "TAN number")
                .pattern(TAN_PATTERN, "Please enter a valid TAN number")
                .required(),
        )
        .field(
            FieldSpec::builder("ifsc_code", "IFSC code")
                .pattern(IFSC_PATTERN, "Please enter a valid IFSC code")
                .required(),
        )
        .field(
            FieldSpec::builder("gstin", "GSTIN")
                .pattern(GSTIN_PATTERN, "Please enter a valid GSTIN")
                .required(),
        )
        .rules(
            ConditionalRules::builder("provider")
                .activates("government", ["tan_number"])
                .activates("bank", ["ifsc_code"])
                .activates("corporate", ["gstin"]),
        )
        .build()
}
