//! Password policy checks
//!
//! A password is accepted when it is at least 8 characters long and
//! contains a digit, a letter, and a character that is neither
//! alphanumeric nor whitespace. The store returns the violated rules as
//! data; rendering the message is the caller's job.

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single rule a password must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    MinLength,
    Digit,
    Letter,
    Special,
}

impl std::fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyRule::MinLength => write!(f, "at least {} characters", MIN_PASSWORD_LEN),
            PolicyRule::Digit => write!(f, "at least one number"),
            PolicyRule::Letter => write!(f, "at least one letter"),
            PolicyRule::Special => write!(f, "at least one special character"),
        }
    }
}

/// Return every rule the password violates (empty means compliant)
pub fn violations(password: &str) -> Vec<PolicyRule> {
    let mut violated = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        violated.push(PolicyRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violated.push(PolicyRule::Digit);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        violated.push(PolicyRule::Letter);
    }
    if !password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
    {
        violated.push(PolicyRule::Special);
    }

    violated
}

/// Convenience check for callers that only need a yes/no answer
pub fn is_compliant(password: &str) -> bool {
    violations(password).is_empty()
}
