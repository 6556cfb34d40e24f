// ── Contact details collected on the details step ──

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationErrors};

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE_CHARS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-.]+$").ok());

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Digits, spaces, `+ - ( ) .`; 7 to 15 digits (E.164 bound).
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    PHONE_CHARS.as_ref().is_some_and(|re| re.is_match(phone))
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if self.first_name.trim().is_empty() {
            errs.push(validation::FIRST_NAME_REQUIRED);
        }
        if self.last_name.trim().is_empty() {
            errs.push(validation::LAST_NAME_REQUIRED);
        }
        if !is_valid_email(&self.email) {
            errs.push(validation::INVALID_EMAIL);
        }
        if !is_valid_phone(&self.phone) {
            errs.push(validation::INVALID_PHONE);
        }
        errs.into_result()
    }
}
