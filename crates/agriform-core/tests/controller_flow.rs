//! End-to-end controller flows against the shipped scheme form.
//!
//! Covers the per-category identifier formats, discriminator switching,
//! declaration-order focus, double-submit idempotence, and the
//! failure/retry path.

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc
)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use agriform_core::{
    forms, FieldName, FormController, FormPhase, SubmissionError, SubmitOutcome, SubmitSink,
    Values, DEFAULT_FORM_ERROR,
};

fn name(s: &str) -> FieldName {
    FieldName::parse(s).unwrap()
}

fn controller() -> FormController {
    FormController::new(forms::scheme().unwrap())
}

/// Fill every required base field with clean values, leaving the
/// discriminator and identifiers to the caller.
fn fill_base(ctl: &mut FormController) {
    let pairs = [
        ("title", "Drip irrigation subsidy"),
        ("organization_name", "State agriculture department"),
        ("deadline", "2026-12-31"),
        ("description", "Subsidy for micro-irrigation equipment"),
        ("eligibility", "Smallholder farmers"),
        ("benefits", "Up to 55% of equipment cost"),
        ("contact_name", "R. Deshmukh"),
        ("contact_email", "schemes@agri.example.gov"),
    ];
    for (field, value) in pairs {
        ctl.on_field_change(&name(field), value).unwrap();
    }
}

/// Scripted collaborator that counts invocations.
struct CountingSink {
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl CountingSink {
    fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmitSink for CountingSink {
    async fn submit(&self, _values: Values) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(SubmissionError::new(message)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// PER-CATEGORY IDENTIFIER FORMATS
// ============================================================================

#[test]
fn test_government_identifier_passes() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "government").unwrap();
    ctl.on_field_change(&name("tan_number"), "ABCD12345E").unwrap();

    let outcome = ctl.begin_submit();
    assert!(matches!(outcome, SubmitOutcome::InFlight { .. }));
}

#[test]
fn test_government_identifier_is_case_insensitive() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "government").unwrap();
    ctl.on_field_change(&name("tan_number"), "abcd12345e").unwrap();

    let outcome = ctl.begin_submit();
    assert!(matches!(outcome, SubmitOutcome::InFlight { .. }));
}

#[test]
fn test_bank_identifier_requires_literal_zero() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "bank").unwrap();

    ctl.on_field_change(&name("ifsc_code"), "ABCD0123456").unwrap();
    assert!(matches!(ctl.begin_submit(), SubmitOutcome::InFlight { .. }));
    ctl.complete_submit(Err(SubmissionError::new("hold")));

    // A `1` in the fifth position is rejected
    ctl.on_field_change(&name("ifsc_code"), "ABCD1123456").unwrap();
    let SubmitOutcome::Rejected { errors, .. } = ctl.begin_submit() else {
        panic!("expected rejection");
    };
    assert_eq!(
        errors.get(&name("ifsc_code")).map(String::as_str),
        Some("Please enter a valid IFSC code")
    );
}

#[test]
fn test_corporate_identifier_format() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "corporate").unwrap();
    ctl.on_field_change(&name("gstin"), "27ABCDE1234F1Z5").unwrap();
    assert!(matches!(ctl.begin_submit(), SubmitOutcome::InFlight { .. }));
}

#[test]
fn test_event_provider_needs_no_identifier() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "event").unwrap();
    assert!(matches!(ctl.begin_submit(), SubmitOutcome::InFlight { .. }));
}

// ============================================================================
// DISCRIMINATOR SWITCHING
// ============================================================================

#[test]
fn test_switch_bank_to_corporate_clears_bank_identifier() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "bank").unwrap();
    ctl.on_field_change(&name("ifsc_code"), "ABCD0123456").unwrap();

    ctl.on_field_change(&name("provider"), "corporate").unwrap();
    let snap = ctl.snapshot();
    assert_eq!(snap.values.get(&name("ifsc_code")), None);
    assert!(!snap.errors.contains_key(&name("ifsc_code")));
    // The corporate identifier starts empty and required
    assert_eq!(snap.values.get(&name("gstin")), None);
    let SubmitOutcome::Rejected { errors, .. } = ctl.begin_submit() else {
        panic!("expected rejection");
    };
    assert_eq!(
        errors.get(&name("gstin")).map(String::as_str),
        Some("GSTIN is required")
    );
}

#[test]
fn test_switch_clears_stale_identifier_error_too() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "bank").unwrap();
    ctl.on_field_change(&name("ifsc_code"), "WRONG").unwrap();
    let _ = ctl.begin_submit();
    assert!(ctl.snapshot().errors.contains_key(&name("ifsc_code")));

    ctl.on_field_change(&name("provider"), "corporate").unwrap();
    assert!(!ctl.snapshot().errors.contains_key(&name("ifsc_code")));
}

#[test]
fn test_stale_inactive_identifier_never_blocks_submission() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    // Garbage typed under bank, then the category changes
    ctl.on_field_change(&name("provider"), "bank").unwrap();
    ctl.on_field_change(&name("ifsc_code"), "garbage").unwrap();
    ctl.on_field_change(&name("provider"), "event").unwrap();

    assert!(matches!(ctl.begin_submit(), SubmitOutcome::InFlight { .. }));
}

// ============================================================================
// DECLARATION-ORDER FOCUS
// ============================================================================

#[test]
fn test_empty_submit_reports_every_required_field_and_focuses_first() {
    let mut ctl = controller();
    let SubmitOutcome::Rejected { errors, focus } = ctl.begin_submit() else {
        panic!("expected rejection");
    };

    // One entry per required base field, none for optional ones
    for required in [
        "title",
        "provider",
        "organization_name",
        "deadline",
        "description",
        "eligibility",
        "benefits",
        "contact_name",
        "contact_email",
    ] {
        assert!(errors.contains_key(&name(required)), "{required} missing");
    }
    for optional in ["documents", "website", "tags", "contact_phone"] {
        assert!(!errors.contains_key(&name(optional)));
    }
    // No provider chosen, so no identifier is in scope
    assert!(!errors.contains_key(&name("tan_number")));
    assert_eq!(errors.len(), 9);

    assert_eq!(focus, Some(name("title")));
    assert_eq!(ctl.phase(), FormPhase::Editing);
}

#[test]
fn test_focus_follows_fresh_errors_not_previous_render() {
    let mut ctl = controller();
    let SubmitOutcome::Rejected { focus, .. } = ctl.begin_submit() else {
        panic!("expected rejection");
    };
    assert_eq!(focus, Some(name("title")));

    // After filling the first field, focus must come from the new result
    ctl.on_field_change(&name("title"), "Solar pump subsidy").unwrap();
    let SubmitOutcome::Rejected { focus, .. } = ctl.begin_submit() else {
        panic!("expected rejection");
    };
    assert_eq!(focus, Some(name("provider")));
}

// ============================================================================
// SUBMISSION, FAILURE, AND RETRY
// ============================================================================

#[tokio::test]
async fn test_full_submit_success() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "government").unwrap();
    ctl.on_field_change(&name("tan_number"), "ABCD12345E").unwrap();

    let sink = CountingSink::succeeding();
    let outcome = ctl.submit(&sink).await;
    assert!(matches!(outcome, SubmitOutcome::InFlight { .. }));
    assert_eq!(ctl.phase(), FormPhase::Submitted);
    assert_eq!(sink.call_count(), 1);
}

#[tokio::test]
async fn test_failed_submit_keeps_values_and_allows_retry() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "event").unwrap();

    let failing = CountingSink::failing("backend offline");
    let _ = ctl.submit(&failing).await;
    let snap = ctl.snapshot();
    assert_eq!(snap.phase, FormPhase::Failed);
    assert_eq!(snap.form_error.as_deref(), Some("backend offline"));
    assert_eq!(
        snap.values.get(&name("title")).map(String::as_str),
        Some("Drip irrigation subsidy")
    );

    // Retry with unchanged values succeeds
    let succeeding = CountingSink::succeeding();
    let _ = ctl.submit(&succeeding).await;
    assert_eq!(ctl.phase(), FormPhase::Submitted);
    assert_eq!(succeeding.call_count(), 1);
}

#[tokio::test]
async fn test_blank_failure_message_falls_back_to_default() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "event").unwrap();

    let sink = CountingSink::failing("  ");
    let _ = ctl.submit(&sink).await;
    assert_eq!(
        ctl.snapshot().form_error.as_deref(),
        Some(DEFAULT_FORM_ERROR)
    );
}

#[tokio::test]
async fn test_double_submit_invokes_collaborator_at_most_once() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "event").unwrap();

    let sink = CountingSink::succeeding();
    let first = ctl.begin_submit();
    assert!(matches!(first, SubmitOutcome::InFlight { .. }));

    // Double-clicks while the attempt is in flight are no-ops
    for _ in 0..5 {
        assert!(matches!(ctl.begin_submit(), SubmitOutcome::Ignored { .. }));
    }

    if let SubmitOutcome::InFlight { values } = first {
        let result = sink.submit(values).await;
        ctl.complete_submit(result);
    }
    assert_eq!(sink.call_count(), 1);

    // Terminal: even after completion no further submit is accepted
    assert!(matches!(ctl.begin_submit(), SubmitOutcome::Ignored { .. }));
}

#[tokio::test]
async fn test_reset_permits_a_fresh_attempt() {
    let mut ctl = controller();
    fill_base(&mut ctl);
    ctl.on_field_change(&name("provider"), "event").unwrap();

    let sink = CountingSink::succeeding();
    let _ = ctl.submit(&sink).await;
    assert_eq!(ctl.phase(), FormPhase::Submitted);

    ctl.reset();
    let snap = ctl.snapshot();
    assert_eq!(snap.phase, FormPhase::Editing);
    assert!(snap.values.is_empty());
}
