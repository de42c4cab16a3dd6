use std::time::{Duration, Instant};

use nexusai::services::governor::{AdmissionError, AdmissionGovernor};

fn governor() -> AdmissionGovernor {
    AdmissionGovernor::new(500, Duration::from_secs(12), 10_000)
}

#[test]
fn fresh_identity_is_admitted_and_text_is_trimmed() {
    let gov = governor();
    let msg = gov.admit("1.2.3.4", "  hello there  ", Instant::now()).unwrap();
    assert_eq!(msg.text(), "hello there");
}

#[test]
fn empty_and_whitespace_messages_are_rejected() {
    let gov = governor();
    let now = Instant::now();
    assert_eq!(
        gov.admit("1.2.3.4", "", now),
        Err(AdmissionError::EmptyMessage)
    );
    assert_eq!(
        gov.admit("1.2.3.4", "   \t\n ", now),
        Err(AdmissionError::EmptyMessage)
    );
}

#[test]
fn length_bound_is_inclusive_at_500() {
    let gov = governor();
    let now = Instant::now();
    let exactly_500 = "a".repeat(500);
    assert!(gov.admit("1.2.3.4", &exactly_500, now).is_ok());

    let too_long = "a".repeat(501);
    assert_eq!(
        gov.admit("5.6.7.8", &too_long, now),
        Err(AdmissionError::MessageTooLong { limit: 500 })
    );
}

#[test]
fn length_is_counted_in_characters_not_bytes() {
    let gov = governor();
    let now = Instant::now();
    // 500 two-byte characters stay within the bound.
    let wide = "é".repeat(500);
    assert!(gov.admit("1.2.3.4", &wide, now).is_ok());
    let wide = "é".repeat(501);
    assert_eq!(
        gov.admit("5.6.7.8", &wide, now),
        Err(AdmissionError::MessageTooLong { limit: 500 })
    );
}

#[test]
fn rejected_messages_do_not_charge_the_rate_limit() {
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "", t0).is_err());
    // A validation failure leaves the identity untracked.
    assert!(gov.admit("1.2.3.4", "hello", t0).is_ok());
}

#[test]
fn second_request_within_interval_is_rate_limited() {
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "first", t0).is_ok());
    assert_eq!(
        gov.admit("1.2.3.4", "second", t0 + Duration::from_secs(11)),
        Err(AdmissionError::RateLimited)
    );
}

#[test]
fn exactly_the_interval_elapsed_is_admitted() {
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "first", t0).is_ok());
    assert!(gov.admit("1.2.3.4", "second", t0 + Duration::from_secs(12)).is_ok());
}

#[test]
fn admission_charges_the_limit_immediately() {
    // A burst at the same instant lets exactly one request through, even
    // though no upstream call has completed yet.
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "first", t0).is_ok());
    assert_eq!(
        gov.admit("1.2.3.4", "second", t0),
        Err(AdmissionError::RateLimited)
    );
}

#[test]
fn distinct_identities_do_not_interfere() {
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "hello", t0).is_ok());
    assert!(gov.admit("5.6.7.8", "hello", t0 + Duration::from_secs(1)).is_ok());
}

#[test]
fn admitted_window_resets_on_each_admission() {
    let gov = governor();
    let t0 = Instant::now();
    assert!(gov.admit("1.2.3.4", "one", t0).is_ok());
    assert!(gov.admit("1.2.3.4", "two", t0 + Duration::from_secs(12)).is_ok());
    // The clock restarted at the second admission.
    assert_eq!(
        gov.admit("1.2.3.4", "three", t0 + Duration::from_secs(23)),
        Err(AdmissionError::RateLimited)
    );
    assert!(gov.admit("1.2.3.4", "four", t0 + Duration::from_secs(24)).is_ok());
}

#[test]
fn table_never_exceeds_capacity() {
    let gov = AdmissionGovernor::new(500, Duration::from_secs(12), 3);
    let t0 = Instant::now();
    for i in 0..10 {
        let identity = format!("10.0.0.{i}");
        assert!(gov.admit(&identity, "hello", t0 + Duration::from_millis(i)).is_ok());
        assert!(gov.tracked() <= 3);
    }
}
