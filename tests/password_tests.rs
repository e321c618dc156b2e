use std::collections::HashSet;

use coolbreeze_backend::util::password::{PasswordError, PasswordUtils, PasswordUtilsImpl};

#[test]
fn hash_produces_argon2_phc_string() {
    let hash = PasswordUtilsImpl::hash_password("CorrectHorse1!").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert_ne!(hash, "CorrectHorse1!");
}

#[test]
fn verify_accepts_the_right_password() {
    let hash = PasswordUtilsImpl::hash_password("CorrectHorse1!").unwrap();
    assert!(PasswordUtilsImpl::verify_password("CorrectHorse1!", &hash).unwrap());
}

#[test]
fn verify_rejects_the_wrong_password_without_erroring() {
    let hash = PasswordUtilsImpl::hash_password("CorrectHorse1!").unwrap();
    assert!(!PasswordUtilsImpl::verify_password("WrongHorse1!", &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn same_password_hashes_to_different_strings() {
    // Fresh salt per hash; equal outputs would mean the salt is reused.
    let a = PasswordUtilsImpl::hash_password("CorrectHorse1!").unwrap();
    let b = PasswordUtilsImpl::hash_password("CorrectHorse1!").unwrap();
    assert_ne!(a, b);
    assert!(PasswordUtilsImpl::verify_password("CorrectHorse1!", &a).unwrap());
    assert!(PasswordUtilsImpl::verify_password("CorrectHorse1!", &b).unwrap());
}

#[test]
fn malformed_hash_is_an_error_not_a_mismatch() {
    for bad in ["", "not-a-hash", "$argon2id$broken"] {
        assert!(matches!(
            PasswordUtilsImpl::verify_password("whatever", bad),
            Err(PasswordError::InvalidHashFormat)
        ));
    }
}

#[test]
fn unicode_passwords_round_trip() {
    let password = "пароль-Ω-密码-1!A";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("пароль", &hash).unwrap());
}

#[test]
fn random_passwords_respect_length_and_floor() {
    assert_eq!(PasswordUtilsImpl::generate_random_password(16).len(), 16);
    assert_eq!(PasswordUtilsImpl::generate_random_password(64).len(), 64);
    // Anything under 8 is bumped up to 8.
    assert_eq!(PasswordUtilsImpl::generate_random_password(0).len(), 8);
    assert_eq!(PasswordUtilsImpl::generate_random_password(3).len(), 8);
}

#[test]
fn random_passwords_are_alphanumeric_and_distinct() {
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let password = PasswordUtilsImpl::generate_random_password(20);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(seen.insert(password), "duplicate random password");
    }
}

#[test]
fn strength_rules_accept_good_passwords() {
    for good in ["ValidPass123!", "AnotherValidOne456@", "ComplexP@ssw0rd2026"] {
        assert!(
            PasswordUtilsImpl::validate_password_strength(good).is_ok(),
            "{good:?} should pass"
        );
    }
}

#[test]
fn strength_rules_report_every_violation() {
    let cases: &[(&str, usize)] = &[
        ("weak", 4),              // short, no upper, no digit, no special
        ("nouppercase123!", 1),   // missing uppercase
        ("NOLOWERCASE123!", 1),   // missing lowercase
        ("NoDigitsHere!", 1),     // missing digit
        ("NoSpecialChars123", 1), // missing special character
        ("Aa1!", 1),              // everything present but too short
        ("", 5),                  // violates every rule
    ];
    for (password, expected) in cases {
        let errors = PasswordUtilsImpl::validate_password_strength(password).unwrap_err();
        assert_eq!(errors.len(), *expected, "{password:?}: {errors:?}");
    }
}
