//! Form field validation
//!
//! Forms declare a rule table keyed by field name; `validate_all` runs
//! every rule and collects one message per failing field.

use std::collections::BTreeMap;

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-blank after trimming
    Required(&'static str),
    /// At least `min` characters after trimming
    MinLength { min: usize, message: &'static str },
    Email,
    /// Digits with optional `+`, spaces, dashes and parentheses
    Phone,
}

impl Rule {
    /// Error message for `value`, or `None` when it passes
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        let ok = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::Email => is_valid_email(value),
            Rule::Phone => is_valid_phone(value),
        };
        if ok { None } else { Some(self.message()) }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(message) | Rule::MinLength { message, .. } => *message,
            Rule::Email => INVALID_EMAIL,
            Rule::Phone => INVALID_PHONE,
        }
    }
}

/// Failing fields and their messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Messages in field-name order
    pub fn messages(&self) -> Vec<&'static str> {
        self.0.values().copied().collect()
    }
}

/// Run every rule against the value `lookup` returns for its field.
///
/// Only the first failing rule of a field is reported.
pub fn validate_all<'a, F>(rules: &[(&'static str, Rule)], lookup: F) -> FieldErrors
where
    F: Fn(&str) -> &'a str,
{
    let mut errors = BTreeMap::new();
    for (field, rule) in rules {
        if errors.contains_key(field) {
            continue;
        }
        if let Some(message) = rule.check(lookup(field)) {
            errors.insert(*field, message);
        }
    }
    FieldErrors(errors)
}

/// `local@domain.tld`, no whitespace, exactly one `@`
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !host.starts_with('.') && !tld.is_empty(),
        None => false,
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let body = value.strip_prefix('+').unwrap_or(value);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    PHONE_DIGITS.contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email(" a.b+c@mail.co.in "));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765-43210"));
        assert!(is_valid_phone("(022) 2345 6789"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("98765abc10"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_validate_all_first_failure_wins() {
        let rules = [
            ("title", Rule::Required("Title is required")),
            (
                "title",
                Rule::MinLength {
                    min: 5,
                    message: "Title must be at least 5 characters long",
                },
            ),
            ("email", Rule::Email),
        ];

        let errors = validate_all(&rules, |field| match field {
            "title" => "  ",
            _ => "ok@mail.com",
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("Title is required"));

        let errors = validate_all(&rules, |field| match field {
            "title" => "abc",
            _ => "bad",
        });
        assert_eq!(
            errors.get("title"),
            Some("Title must be at least 5 characters long")
        );
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_min_length_counts_chars() {
        let rule = Rule::MinLength {
            min: 3,
            message: "short",
        };
        assert_eq!(rule.check("éé"), Some("short"));
        assert_eq!(rule.check("ééé"), None);
    }
}
