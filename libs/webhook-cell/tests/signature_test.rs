use webhook_cell::services::signature::{compute_signature, verify_signature};

const SECRET: &str = "whsec_test_secret";

#[test]
fn signature_round_trip_verifies() {
    let payload = br#"{"type":"BOOKING_CREATED"}"#;
    let signature = compute_signature(payload, SECRET);

    assert!(verify_signature(payload, &signature, SECRET));
}

#[test]
fn signature_with_surrounding_whitespace_still_verifies() {
    let payload = br#"{"type":"BOOKING_CREATED"}"#;
    let signature = format!(" {} ", compute_signature(payload, SECRET));

    assert!(verify_signature(payload, &signature, SECRET));
}

#[test]
fn wrong_secret_fails_verification() {
    let payload = br#"{"type":"BOOKING_CREATED"}"#;
    let signature = compute_signature(payload, "some-other-secret");

    assert!(!verify_signature(payload, &signature, SECRET));
}

#[test]
fn modified_payload_fails_verification() {
    let payload = br#"{"type":"BOOKING_CREATED"}"#;
    let signature = compute_signature(payload, SECRET);

    assert!(!verify_signature(br#"{"type":"BOOKING_CANCELLED"}"#, &signature, SECRET));
}

#[test]
fn non_hex_signature_is_rejected() {
    assert!(!verify_signature(b"payload", "not hex at all", SECRET));
    assert!(!verify_signature(b"payload", "", SECRET));
}
