//! # AgriForm Core
//!
//! Declarative, conditional form-validation engine - strictly functional
//! Rust with zero unwraps.
//!
//! A form is static data (`FormDef`: a declaration-ordered field registry
//! plus an optional discriminator-driven rule table). One `FormController`
//! per form instance drives the submission lifecycle: field changes while
//! editing, a pure validation pass on submit, and an external `SubmitSink`
//! collaborator whose result resolves the attempt.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//! - No `todo!()` / `unimplemented!()` - complete implementations only
//!
//! ## Error Handling
//!
//! Construction-time wiring misuse returns `Result<T, FormError>`.
//! Per-field validation failures are data (a field-to-message mapping),
//! never errors; see the `validate` module.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

mod controller;
mod error;
mod field;
mod form;
pub mod forms;
mod lifecycle;
mod phase;
mod registry;
mod rules;
mod session;
mod state;
mod validate;

pub use controller::{FormController, SubmitOutcome, SubmitSink, DEFAULT_FORM_ERROR};
pub use error::{FormError, Result, SubmissionError};
pub use field::{FieldKind, FieldName, FieldSpec, FieldSpecBuilder};
pub use form::{FormDef, FormDefBuilder};
pub use forms::{IndividualType, ProviderKind};
pub use lifecycle::LifecycleState;
pub use phase::FormPhase;
pub use registry::FieldRegistry;
pub use rules::{ConditionalRules, ConditionalRulesBuilder};
pub use session::{MemorySessionStore, SessionStore, LOCATION_KEY, TOKEN_KEY};
pub use state::{ErrorMap, FormSnapshot, FormState, Values};
pub use validate::validate;
