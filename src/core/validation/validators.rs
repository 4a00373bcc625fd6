//! Reusable field validators
//!
//! Each rule exists twice: a pure predicate (usable from services and tests)
//! and a `validator`-compatible wrapper referenced from `#[validate(...)]`
//! attributes on request payloads.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// 8-16 ASCII letters or digits
pub static USER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{8,16}$").expect("valid user name pattern"));

/// National mobile format: 09 followed by 9 digits
pub static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09[0-9]{9}$").expect("valid phone pattern"));

pub const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 55;

pub const USER_NAME_MESSAGE: &str =
    "Username must be 8-16 characters long and contain only letters and numbers";
pub const PHONE_NUMBER_MESSAGE: &str = "Phone number must start with 09 followed by 9 digits";
pub const PASSWORD_MESSAGE: &str = "Password must be 8-24 characters long and contain at least one lowercase letter, one uppercase letter, and one special character";
pub const AGE_MESSAGE: &str = "Age must be between 18 to 55 years old";

pub fn is_valid_user_name(user_name: &str) -> bool {
    USER_NAME_RE.is_match(user_name)
}

pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER_RE.is_match(phone_number)
}

/// 8-24 characters with a lowercase letter, an uppercase letter and one of `!@#$%^&*`
pub fn is_strong_password(password: &str) -> bool {
    let len = password.chars().count();
    (8..=24).contains(&len)
        && !password.contains('\n')
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Whole years elapsed between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age policy: 18 through 55 inclusive
pub fn is_valid_age_on(birth: NaiveDate, today: NaiveDate) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age_on(birth, today))
}

pub fn is_valid_age(birth: NaiveDate) -> bool {
    is_valid_age_on(birth, Utc::now().date_naive())
}

fn rejection(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(rejection("password", PASSWORD_MESSAGE))
    }
}

pub fn validate_age(birth_date: &NaiveDate) -> Result<(), ValidationError> {
    if is_valid_age(*birth_date) {
        Ok(())
    } else {
        Err(rejection("age", AGE_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_user_name_bounds() {
        assert!(is_valid_user_name("frontdesk"));
        assert!(is_valid_user_name("abcdefgh"));
        assert!(is_valid_user_name("abcdefghijklmnop"));
        assert!(!is_valid_user_name("abcdefg"));
        assert!(!is_valid_user_name("abcdefghijklmnopq"));
        assert!(!is_valid_user_name("front_desk"));
        assert!(!is_valid_user_name("frontdésk"));
    }

    #[test]
    fn test_phone_number_format() {
        assert!(is_valid_phone_number("09123456789"));
        assert!(!is_valid_phone_number("9123456789"));
        assert!(!is_valid_phone_number("08123456789"));
        assert!(!is_valid_phone_number("091234567890"));
        assert!(!is_valid_phone_number("0912345678a"));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_strong_password("Secret#Pass1"));
        assert!(is_strong_password("aB!aB!aB"));
        assert!(!is_strong_password("aB!aB!a"));
        assert!(is_strong_password("aB!aB!aB!aB!aB!aB!aB!aB!"));
        assert!(!is_strong_password("aB!aB!aB!aB!aB!aB!aB!aB!a"));
        assert!(!is_strong_password("secret#pass1"));
        assert!(!is_strong_password("SECRET#PASS1"));
        assert!(!is_strong_password("SecretPass1"));
        assert!(!is_strong_password("Secret-Pass1"));
    }

    #[test]
    fn test_age_counts_only_completed_years() {
        let today = date(2026, 10, 19);
        assert_eq!(age_on(date(2000, 10, 19), today), 26);
        assert_eq!(age_on(date(2000, 10, 20), today), 25);
        assert_eq!(age_on(date(2000, 11, 1), today), 25);
        assert_eq!(age_on(date(2000, 1, 1), today), 26);
    }

    #[test]
    fn test_age_boundaries_are_inclusive() {
        let today = date(2026, 10, 19);
        // exactly 18 today
        assert!(is_valid_age_on(date(2008, 10, 19), today));
        // one day short of 18
        assert!(!is_valid_age_on(date(2008, 10, 20), today));
        // 55 until the 56th birthday
        assert!(is_valid_age_on(date(1970, 10, 20), today));
        assert!(!is_valid_age_on(date(1970, 10, 19), today));
    }

    #[test]
    fn test_leap_day_birthday() {
        // born on Feb 29, turns a year older on Mar 1 in common years
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }

    #[test]
    fn test_validator_wrappers_carry_messages() {
        let err = validate_password("weak").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(PASSWORD_MESSAGE));

        let err = validate_age(&date(1900, 1, 1)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some(AGE_MESSAGE));
    }
}
