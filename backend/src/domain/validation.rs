//! Field-level validation shared by credentials and resource drafts.
//!
//! Validators never stop at the first problem: every failing field is
//! recorded so forms can highlight all of them in one round trip.

use std::sync::OnceLock;

use regex::Regex;

use super::error::{ActionError, FieldErrors};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: the auth service performs the authoritative check.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Accumulates per-field messages.
///
/// # Examples
/// ```
/// use staffing_backend::domain::FieldValidator;
///
/// let mut validator = FieldValidator::new();
/// let name = validator.required_text("name", "  Acme  ", 120);
/// assert_eq!(name, "Acme");
/// assert!(validator.finish().is_ok());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldValidator {
    errors: FieldErrors,
}

impl FieldValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Record `message` when `condition` does not hold.
    pub fn ensure(&mut self, condition: bool, field: &str, message: impl Into<String>) {
        if !condition {
            self.add(field, message);
        }
    }

    /// Trimmed, non-blank text of at most `max_chars` characters.
    pub fn required_text(&mut self, field: &str, value: &str, max_chars: usize) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, format!("{} is required.", label(field)));
        } else {
            self.check_length(field, trimmed, max_chars);
        }
        trimmed.to_owned()
    }

    /// Trimmed optional text; blank input becomes `None`.
    pub fn optional_text(
        &mut self,
        field: &str,
        value: Option<&str>,
        max_chars: usize,
    ) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|text| !text.is_empty())?;
        self.check_length(field, trimmed, max_chars);
        Some(trimmed.to_owned())
    }

    /// Required email address, lower-cased.
    pub fn required_email(&mut self, field: &str, value: &str) -> String {
        let email = self.required_text(field, value, 254).to_lowercase();
        if !email.is_empty() && !email_regex().is_match(&email) {
            self.add(field, "Invalid email");
        }
        email
    }

    /// Optional email address, lower-cased; blank input becomes `None`.
    pub fn optional_email(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let email = self.optional_text(field, value, 254)?.to_lowercase();
        if !email_regex().is_match(&email) {
            self.add(field, "Invalid email");
        }
        Some(email)
    }

    /// Optional phone number: digits with common separators.
    pub fn optional_phone(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let phone = self.optional_text(field, value, 32)?;
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')' | '.'));
        if !allowed || digits < 6 {
            self.add(field, "Invalid phone number");
        }
        Some(phone)
    }

    fn check_length(&mut self, field: &str, value: &str, max_chars: usize) {
        if value.chars().count() > max_chars {
            self.add(
                field,
                format!("{} must be at most {max_chars} characters.", label(field)),
            );
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation.
    ///
    /// # Errors
    ///
    /// Returns a `VALIDATION_ERROR` carrying every recorded field message.
    pub fn finish(self) -> Result<(), ActionError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ActionError::validation(self.errors))
        }
    }
}

/// Human label for a snake_case field name: `first_name` → `First name`.
fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
