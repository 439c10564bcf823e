//! Pure field predicates shared by the step models. No I/O, no state.

use chrono::{Datelike, NaiveDate};

/// Characters that satisfy the special-character password requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MIN_ACCOUNT_NUMBER_DIGITS: usize = 10;
pub const MINIMUM_AGE_YEARS: i32 = 18;

/// A name is valid when it is non-empty and free of digits.
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_ascii_digit())
}

/// Accepts addresses shaped `local@domain.tld`: no whitespace, at least one
/// character before the `@`, and a dot inside the domain with characters on
/// both sides.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = value.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let domain = &value[at + 1..];
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

/// True when the value is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when every character is an ASCII digit. The empty string passes;
/// requiredness is a separate concern.
pub fn is_digits_only(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Account numbers are digit strings of at least ten characters.
pub fn is_valid_account_number(value: &str) -> bool {
    is_digits_only(value) && value.chars().count() >= MIN_ACCOUNT_NUMBER_DIGITS
}

/// The confirmation must be non-empty and identical to the password.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    !confirmation.is_empty() && password == confirmation
}

/// Date-aware adulthood check: the applicant must have turned eighteen on
/// or before the reference date.
pub fn is_adult(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years >= MINIMUM_AGE_YEARS
}

/// Result of evaluating a password against the five-point checklist. Each
/// requirement is surfaced on its own so the UI can render a live list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordChecks {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_CHARS,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    pub fn all_satisfied(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.digit && self.special
    }

    /// Checklist rows in display order: label plus satisfaction.
    pub fn requirements(&self) -> [(&'static str, bool); 5] {
        [
            ("8 characters", self.min_length),
            ("Uppercase", self.uppercase),
            ("Lowercase", self.lowercase),
            ("Special Char", self.special),
            ("Number", self.digit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_reject_digits_and_emptiness() {
        assert!(is_valid_name("Jane Doe"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Jane 2nd"));
    }

    #[test]
    fn email_shape_requires_local_domain_and_dot() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.io"));

        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(!is_valid_email("jane doe@example.com"));
    }

    #[test]
    fn password_checklist_flags_each_requirement() {
        let checks = PasswordChecks::evaluate("abc");
        assert!(!checks.min_length);
        assert!(!checks.uppercase);
        assert!(checks.lowercase);
        assert!(!checks.digit);
        assert!(!checks.special);
        assert!(!checks.all_satisfied());

        let checks = PasswordChecks::evaluate("Str0ng!pass");
        assert!(checks.all_satisfied());
    }

    #[test]
    fn password_special_set_is_exact() {
        assert!(PasswordChecks::evaluate("Aa1>aaaa").special);
        assert!(!PasswordChecks::evaluate("Aa1 aaaa").special);
        assert!(!PasswordChecks::evaluate("Aa1§aaaa").special);
    }

    #[test]
    fn confirmation_must_match_and_be_present() {
        assert!(passwords_match("Secret1!", "Secret1!"));
        assert!(!passwords_match("Secret1!", "secret1!"));
        assert!(!passwords_match("", ""));
    }

    #[test]
    fn account_numbers_need_ten_digits() {
        assert!(is_valid_account_number("0123456789"));
        assert!(!is_valid_account_number("012345678"));
        assert!(!is_valid_account_number("01234567a9"));
    }

    #[test]
    fn adulthood_is_date_aware() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();

        let on_birthday = NaiveDate::from_ymd_opt(2008, 8, 22).unwrap();
        assert!(is_adult(on_birthday, today));

        let day_after = NaiveDate::from_ymd_opt(2008, 8, 23).unwrap();
        assert!(!is_adult(day_after, today));

        let same_year_older = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();
        assert!(is_adult(same_year_older, today));
    }
}
