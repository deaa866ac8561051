//! Pure form validation. No side effects; every field is checked
//! independently so the caller gets the complete error map in one pass.

use crate::models::{FieldErrors, FormField, LeadForm, ServiceType};
use regex::Regex;

/// Validates an email address shape: `local@domain.tld`, no embedded
/// whitespace, at least one dot after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    // Conservative shape check, same as the website form
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    email_regex.is_match(email)
}

/// Validates a phone number permissively: digits, optional leading `+`,
/// spaces, hyphens, parentheses, at least 10 characters overall.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone_regex = Regex::new(r"^\+?[\d\s\-()]{10,}$").unwrap();
    phone_regex.is_match(phone)
}

/// Validates the whole form plus the CAPTCHA token.
///
/// Returns the complete error map; an empty map means the submission may
/// proceed. Field order does not matter and no rule short-circuits another.
pub fn validate_form(form: &LeadForm, captcha_token: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.first_name.trim().is_empty() {
        errors.insert(FormField::FirstName, "First name is required");
    } else if form.first_name.trim().chars().count() < 2 {
        errors.insert(FormField::FirstName, "First name must be at least 2 characters");
    }

    if form.last_name.trim().is_empty() {
        errors.insert(FormField::LastName, "Last name is required");
    } else if form.last_name.trim().chars().count() < 2 {
        errors.insert(FormField::LastName, "Last name must be at least 2 characters");
    }

    if form.phone.trim().is_empty() {
        errors.insert(FormField::Phone, "Phone number is required");
    } else if !is_valid_phone(form.phone.trim()) {
        errors.insert(FormField::Phone, "Please enter a valid phone number");
    }

    if form.email.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(form.email.trim()) {
        errors.insert(FormField::Email, "Please enter a valid email address");
    }

    if ServiceType::parse(form.service.trim()).is_none() {
        errors.insert(FormField::Service, "Please select a service");
    }

    if form.description.trim().is_empty() {
        errors.insert(FormField::Description, "Project description is required");
    } else if form.description.trim().chars().count() < 10 {
        errors.insert(
            FormField::Description,
            "Description must be at least 10 characters",
        );
    }

    // The CAPTCHA is required regardless of other field validity
    match captcha_token {
        Some(token) if !token.is_empty() => {}
        _ => {
            errors.insert(
                FormField::Captcha,
                "Please complete the security verification",
            );
        }
    }

    if !errors.is_empty() {
        tracing::debug!("Form validation failed with {} error(s)", errors.len());
    }

    errors
}
