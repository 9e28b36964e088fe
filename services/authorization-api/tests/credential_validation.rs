//! Credential input validation tests
//!
//! Tests for security-critical username handling at the sign-up and
//! sign-in boundary.

use suave_types::normalize_username;

// ============================================================================
// Valid Usernames
// ============================================================================

#[test]
fn test_valid_plain_address() {
    assert_eq!(normalize_username("user@example.com").unwrap(), "user@example.com");
}

#[test]
fn test_valid_address_with_plus_tag() {
    assert!(normalize_username("user+tag@example.com").is_ok());
}

#[test]
fn test_valid_address_with_dots_in_local_part() {
    assert!(normalize_username("first.last@example.com").is_ok());
}

#[test]
fn test_valid_subdomain_address() {
    assert!(normalize_username("user@mail.example.co.uk").is_ok());
}

#[test]
fn test_normalization_lowercases() {
    assert_eq!(
        normalize_username("User@Example.COM").unwrap(),
        "user@example.com"
    );
}

#[test]
fn test_normalization_trims_surrounding_whitespace() {
    assert_eq!(
        normalize_username("  user@example.com  ").unwrap(),
        "user@example.com"
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let once = normalize_username("User@Example.com").unwrap();
    let twice = normalize_username(&once).unwrap();
    assert_eq!(once, twice);
}

// ============================================================================
// Invalid Usernames - Security Boundary Tests
// ============================================================================

#[test]
fn test_invalid_empty() {
    assert!(normalize_username("").is_err());
}

#[test]
fn test_invalid_whitespace_only() {
    assert!(normalize_username("   ").is_err());
}

#[test]
fn test_invalid_missing_at_sign() {
    assert!(normalize_username("userexample.com").is_err());
}

#[test]
fn test_invalid_missing_local_part() {
    assert!(normalize_username("@example.com").is_err());
}

#[test]
fn test_invalid_missing_domain() {
    assert!(normalize_username("user@").is_err());
}

#[test]
fn test_invalid_bare_domain_without_dot() {
    assert!(normalize_username("user@localhost").is_err());
}

#[test]
fn test_invalid_double_at_sign() {
    assert!(normalize_username("user@@example.com").is_err());
}

#[test]
fn test_invalid_two_separate_at_signs() {
    assert!(normalize_username("user@host@example.com").is_err());
}

#[test]
fn test_invalid_interior_space() {
    assert!(normalize_username("us er@example.com").is_err());
}

#[test]
fn test_invalid_newline_smuggling() {
    // Header-injection style payloads must not survive into stored usernames
    assert!(normalize_username("user@example.com\nbcc: victim").is_err());
}

#[test]
fn test_invalid_null_byte() {
    assert!(normalize_username("user\0@example.com").is_err());
}

#[test]
fn test_invalid_control_character() {
    assert!(normalize_username("user\x07@example.com").is_err());
}

#[test]
fn test_invalid_overlong_address() {
    let local = "a".repeat(300);
    assert!(normalize_username(&format!("{local}@example.com")).is_err());
}

#[test]
fn test_invalid_domain_leading_dot() {
    assert!(normalize_username("user@.example.com").is_err());
}

#[test]
fn test_invalid_domain_trailing_dot() {
    assert!(normalize_username("user@example.com.").is_err());
}

// ============================================================================
// Duplicate-Account Prevention
// ============================================================================

#[test]
fn test_case_variants_collapse_to_one_account() {
    // Sign-up stores the normalized form, so case variants of one address
    // hit the same uniqueness constraint
    let a = normalize_username("alice@example.com").unwrap();
    let b = normalize_username("ALICE@EXAMPLE.COM").unwrap();
    let c = normalize_username("Alice@Example.Com").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_whitespace_variants_collapse_to_one_account() {
    let a = normalize_username("bob@example.com").unwrap();
    let b = normalize_username(" bob@example.com ").unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// User ID Validation
// ============================================================================

#[test]
fn test_valid_uuid_user_id() {
    let uuid = "550e8400-e29b-41d4-a716-446655440000";
    assert!(uuid::Uuid::parse_str(uuid).is_ok());
}

#[test]
fn test_invalid_user_id_formats() {
    let invalid_ids = [
        "",
        "not-a-uuid",
        "550e8400-e29b-41d4-a716", // truncated
        "550e8400-e29b-41d4-a716-446655440000-extra",
        "' OR 1=1 --", // SQL injection attempt
    ];

    for id in &invalid_ids {
        assert!(uuid::Uuid::parse_str(id).is_err(), "Should reject: {}", id);
    }
}
