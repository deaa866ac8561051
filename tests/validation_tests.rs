/// Unit tests for form validation logic
/// Tests email/phone pattern checks and the whole-form error map
use lead_intake_api::models::{FormField, LeadForm};
use lead_intake_api::validation::{is_valid_email, is_valid_phone, validate_form};

fn valid_form() -> LeadForm {
    LeadForm {
        first_name: "Kwame".to_string(),
        last_name: "Asante".to_string(),
        phone: "+233 24 491 9412".to_string(),
        email: "john@example.com".to_string(),
        service: "residential".to_string(),
        description: "Full rewiring of a three-bedroom house".to_string(),
    }
}

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("test.user@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails() {
        // No dot after the @
        assert!(!is_valid_email("john@example"));
        // No @ at all
        assert!(!is_valid_email("john example.com"));
        assert!(!is_valid_email("johnexample.com"));
        // Embedded whitespace
        assert!(!is_valid_email("john @example.com"));
        assert!(!is_valid_email("john@exam ple.com"));
        // Degenerate
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email(""));
    }
}

#[cfg(test)]
mod phone_validation_tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("+233 24 491 9412"));
        assert!(is_valid_phone("0244919412"));
        assert!(is_valid_phone("(233) 24-491-9412"));
        assert!(is_valid_phone("024 491 9412"));
    }

    #[test]
    fn test_invalid_phones() {
        // Too short
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone(""));
        // Letters not allowed
        assert!(!is_valid_phone("call me maybe"));
        assert!(!is_valid_phone("024491941a"));
        // Plus sign only allowed in front
        assert!(!is_valid_phone("0244+919412"));
    }
}

#[cfg(test)]
mod form_validation_tests {
    use super::*;

    #[test]
    fn test_complete_form_with_token_is_valid() {
        let errors = validate_form(&valid_form(), Some("captcha-token"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_fields_reported_exactly() {
        let mut form = valid_form();
        form.description = String::new();
        form.email = String::new();

        let errors = validate_form(&form, Some("captcha-token"));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(FormField::Description),
            Some("Project description is required")
        );
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert!(!errors.contains(FormField::FirstName));
    }

    #[test]
    fn test_description_length_boundary() {
        let mut form = valid_form();

        form.description = "x".repeat(9);
        let errors = validate_form(&form, Some("t"));
        assert_eq!(
            errors.get(FormField::Description),
            Some("Description must be at least 10 characters")
        );

        // 10 characters after trimming passes; the validator imposes no
        // upper bound
        form.description = format!("  {}  ", "x".repeat(10));
        assert!(validate_form(&form, Some("t")).is_empty());

        form.description = "x".repeat(5000);
        assert!(validate_form(&form, Some("t")).is_empty());
    }

    #[test]
    fn test_service_must_be_in_catalog() {
        let mut form = valid_form();

        form.service = String::new();
        let errors = validate_form(&form, Some("t"));
        assert_eq!(errors.get(FormField::Service), Some("Please select a service"));

        form.service = "plumbing".to_string();
        assert!(validate_form(&form, Some("t")).contains(FormField::Service));

        for id in ["residential", "commercial", "solar", "emergency", "maintenance"] {
            form.service = id.to_string();
            assert!(
                !validate_form(&form, Some("t")).contains(FormField::Service),
                "catalog service '{}' rejected",
                id
            );
        }
    }

    #[test]
    fn test_missing_captcha_blocks_otherwise_valid_form() {
        let errors = validate_form(&valid_form(), None);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(FormField::Captcha));
    }

    #[test]
    fn test_all_fields_validated_independently() {
        // No short-circuit: an empty form reports every field at once
        let errors = validate_form(&LeadForm::default(), None);
        for field in [
            FormField::FirstName,
            FormField::LastName,
            FormField::Phone,
            FormField::Email,
            FormField::Service,
            FormField::Description,
            FormField::Captcha,
        ] {
            assert!(errors.contains(field), "missing error for {:?}", field);
        }
    }

    #[test]
    fn test_whitespace_only_values_treated_as_missing() {
        let mut form = valid_form();
        form.first_name = "   ".to_string();
        form.phone = " \t ".to_string();

        let errors = validate_form(&form, Some("t"));
        assert_eq!(errors.get(FormField::FirstName), Some("First name is required"));
        assert_eq!(errors.get(FormField::Phone), Some("Phone number is required"));
    }
}
