use regex::Regex;

use crate::config::NumericPolicy;
use crate::numeric::{parse_float, parse_float_strict, parse_int, parse_int_strict};

pub const LOAN_TERMS_MESSAGE: &str =
    "Amount and duration must be positive, and interest rate cannot be negative.";
pub const PHONE_NUMBER_MESSAGE: &str = "Please enter a valid phone number (10-12 digits).";
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{10,12}$";

/// A failed client-side check. The display text is the banner shown to the
/// user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardRejection {
    #[error("{}", LOAN_TERMS_MESSAGE)]
    LoanTerms,
    #[error("{}", PHONE_NUMBER_MESSAGE)]
    PhoneNumber,
}

impl GuardRejection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoanTerms => "loan_terms",
            Self::PhoneNumber => "phone_number",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::LoanTerms => LOAN_TERMS_MESSAGE,
            Self::PhoneNumber => PHONE_NUMBER_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoanFormInput {
    pub amount: String,
    pub duration: String,
    pub interest_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerFormInput {
    pub phone: String,
}

/// Loan figures as the guard read them. Under the lenient policy any of
/// these may be NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub amount: f64,
    pub duration: f64,
    pub interest_rate: f64,
}

impl LoanTerms {
    fn violates_bounds(&self) -> bool {
        self.amount <= 0.0 || self.duration <= 0.0 || self.interest_rate < 0.0
    }
}

pub fn validate_loan_form(
    input: &LoanFormInput,
    policy: NumericPolicy,
) -> Result<LoanTerms, GuardRejection> {
    let terms = match policy {
        NumericPolicy::Lenient => LoanTerms {
            amount: parse_float(&input.amount),
            duration: parse_int(&input.duration),
            interest_rate: parse_float(&input.interest_rate),
        },
        NumericPolicy::Strict => LoanTerms {
            amount: parse_float_strict(&input.amount).ok_or(GuardRejection::LoanTerms)?,
            duration: parse_int_strict(&input.duration)
                .map(|days| days as f64)
                .ok_or(GuardRejection::LoanTerms)?,
            interest_rate: parse_float_strict(&input.interest_rate)
                .ok_or(GuardRejection::LoanTerms)?,
        },
    };

    if terms.violates_bounds() {
        return Err(GuardRejection::LoanTerms);
    }
    Ok(terms)
}

#[derive(Debug, Clone)]
pub struct PhoneGuard {
    pattern: Regex,
}

impl PhoneGuard {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(PHONE_PATTERN)?,
        })
    }

    pub fn validate(&self, input: &CustomerFormInput) -> Result<(), GuardRejection> {
        if self.pattern.is_match(&input.phone) {
            Ok(())
        } else {
            Err(GuardRejection::PhoneNumber)
        }
    }
}
