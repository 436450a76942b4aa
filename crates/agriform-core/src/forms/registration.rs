//! The user registration form
//!
//! Flat form, no discriminator. Password strength rules live server-side
//! in the original application, so `password` is plain required text here.

use strum::VariantNames as _;

use super::IndividualType;
use crate::error::Result;
use crate::field::FieldSpec;
use crate::form::FormDef;

/// Build the registration form definition.
///
/// # Errors
///
/// Only if the built-in definition itself is broken.
pub fn registration() -> Result<FormDef> {
    FormDef::builder("registration")
        .field(FieldSpec::builder("username", "Username").required())
        .field(FieldSpec::builder("email", "Email").email().required())
        .field(FieldSpec::builder("password", "Password").required())
        .field(
            FieldSpec::builder("individual_type", "Individual type")
                .options(IndividualType::VARIANTS.iter().copied())
                .required(),
        )
        .field(FieldSpec::builder("location", "Location"))
        .build()
}
