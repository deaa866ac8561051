//! Submit lifecycle: validate, gate on the CAPTCHA, fan out to every
//! delivery channel, classify the aggregate outcome, and update the
//! user-visible state. All mutable submission state (form, field errors,
//! CAPTCHA token, status) is owned here and changed only through the
//! transition methods below.

use crate::captcha::CaptchaGate;
use crate::channels::{ChannelSet, DeliveryReport};
use crate::models::{
    ClientContext, FieldErrors, FormField, LeadForm, StatusKind, SubmissionRecord, SubmitStatus,
};
use crate::status::StatusPresenter;
use crate::validation::validate_form;
use tokio::time::Duration;

/// How long a success status stays visible before auto-clearing.
pub const SUCCESS_STATUS_TTL: Duration = Duration::from_secs(10);
/// How long a failure status stays visible before auto-clearing.
pub const FAILURE_STATUS_TTL: Duration = Duration::from_secs(8);

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitResult {
    /// Validation failed: inline field errors were set, nothing was
    /// delivered, and the CAPTCHA was left untouched.
    Invalid,
    /// All channels ran and the aggregate outcome was classified.
    Completed(DeliveryReport),
}

/// Classifies the aggregate outcome of one fan-out.
///
/// Priority policy (a deliberate product decision): the sheet log is the
/// primary source of truth, so its success dominates regardless of the
/// notification email outcome. Either email succeeding is
/// an acceptable fallback. Only a total failure is surfaced as an error.
pub fn classify(report: &DeliveryReport, company_phone: &str) -> SubmitStatus {
    if report.sheet.succeeded() {
        let mut message = "Thank you! Your request has been submitted successfully.".to_string();
        if report.auto_reply.succeeded() {
            message.push_str(
                " You should receive a confirmation email shortly. We'll contact you within 24 hours.",
            );
        } else {
            message.push_str(
                " Your information has been saved to our system and we'll contact you within 24 hours.",
            );
        }
        // A failed notification email is logged by the channel layer but
        // never changes the user-facing message.
        SubmitStatus::success(message)
    } else if report.notification.succeeded() || report.auto_reply.succeeded() {
        SubmitStatus::success(
            "Thank you! We've received your request and will respond within 24 hours.",
        )
    } else {
        let reason = report
            .sheet
            .failure()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        SubmitStatus::error(format!(
            "Sorry, there was an error submitting your request: {}. Please try again or call us directly at {}.",
            reason, company_phone
        ))
    }
}

/// Owns the submission state machine for one form session.
pub struct SubmissionOrchestrator {
    form: LeadForm,
    errors: FieldErrors,
    gate: CaptchaGate,
    presenter: StatusPresenter,
    channels: ChannelSet,
    company_phone: String,
}

impl SubmissionOrchestrator {
    pub fn new(channels: ChannelSet, company_phone: impl Into<String>) -> Self {
        Self {
            form: LeadForm::default(),
            errors: FieldErrors::new(),
            gate: CaptchaGate::new(),
            presenter: StatusPresenter::new(),
            channels,
            company_phone: company_phone.into(),
        }
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn captcha_token(&self) -> Option<&str> {
        self.gate.token()
    }

    /// User-facing notice from the last CAPTCHA expiry/error callback, if
    /// any. Cleared by a fresh completion or a gate reset.
    pub fn captcha_notice(&self) -> Option<&str> {
        self.gate.notice()
    }

    /// The currently displayed status, if any (auto-clears on its own TTL).
    pub fn status(&self) -> Option<&SubmitStatus> {
        self.presenter.current()
    }

    /// Replace the whole form in one step, e.g. when loading a request
    /// body. Clears all field errors and any displayed status.
    pub fn load_form(&mut self, form: LeadForm) {
        self.form = form;
        self.errors = FieldErrors::new();
        self.presenter.clear();
    }

    /// User edited one field: store the value, drop that field's error, and
    /// dismiss any displayed status.
    pub fn edit_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear_field(field);
        self.presenter.clear();
    }

    /// CAPTCHA widget produced (or cleared) a token.
    pub fn captcha_completed(&mut self, token: Option<String>) {
        self.gate.challenge_completed(token);
        if self.gate.token().is_some() {
            self.errors.clear_field(FormField::Captcha);
        }
        self.presenter.clear();
    }

    pub fn captcha_expired(&mut self) {
        self.gate.challenge_expired();
        self.presenter.clear();
    }

    pub fn captcha_errored(&mut self) {
        self.gate.challenge_errored();
        self.presenter.clear();
    }

    /// Runs one submit attempt end to end.
    pub async fn submit(&mut self, client: &ClientContext) -> SubmitResult {
        self.errors = validate_form(&self.form, self.gate.token());
        if !self.errors.is_empty() {
            tracing::debug!(
                "Submission blocked by validation: {} error(s)",
                self.errors.len()
            );
            return SubmitResult::Invalid;
        }

        // Validation guarantees a token and a resolvable service; treat
        // the impossible cases as fresh field errors rather than panicking.
        let Some(token) = self.gate.token().map(str::to_string) else {
            self.errors.insert(
                FormField::Captcha,
                "Please complete the security verification",
            );
            return SubmitResult::Invalid;
        };
        let Some(record) = SubmissionRecord::build(&self.form, &token, client) else {
            self.errors.insert(FormField::Service, "Please select a service");
            return SubmitResult::Invalid;
        };

        tracing::info!(
            "Submitting lead from {} for {}",
            record.full_name,
            record.service
        );

        let report = self.channels.deliver_all(&record).await;
        let status = classify(&report, &self.company_phone);

        // The token is single-use: reset the gate after every terminal
        // outcome so it cannot be replayed on the next attempt.
        self.gate.reset();
        match status.kind {
            StatusKind::Success => {
                self.form.clear();
                self.presenter.show(status, SUCCESS_STATUS_TTL);
            }
            StatusKind::Error => {
                // Form stays as entered so the user can retry.
                self.presenter.show(status, FAILURE_STATUS_TTL);
            }
        }

        SubmitResult::Completed(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryFailure, DeliveryOutcome, StatusKind};

    fn report(
        sheet: DeliveryOutcome,
        notification: DeliveryOutcome,
        auto_reply: DeliveryOutcome,
    ) -> DeliveryReport {
        DeliveryReport {
            sheet,
            notification,
            auto_reply,
        }
    }

    fn failed() -> DeliveryOutcome {
        DeliveryOutcome::Failed(DeliveryFailure::Transport("connection refused".to_string()))
    }

    #[test]
    fn test_sheet_and_auto_reply_success_mentions_confirmation_email() {
        let status = classify(
            &report(DeliveryOutcome::Dispatched, failed(), DeliveryOutcome::Delivered),
            "+233 24 491 9412",
        );
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.message.contains("confirmation email"));
    }

    #[test]
    fn test_sheet_success_without_auto_reply_mentions_saved() {
        let status = classify(
            &report(DeliveryOutcome::Dispatched, DeliveryOutcome::Delivered, failed()),
            "+233 24 491 9412",
        );
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.message.contains("saved to our system"));
    }

    #[test]
    fn test_email_only_fallback_is_generic_success() {
        let status = classify(
            &report(failed(), failed(), DeliveryOutcome::Delivered),
            "+233 24 491 9412",
        );
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.message.contains("received your request"));
        assert!(!status.message.contains("confirmation email"));
    }

    #[test]
    fn test_total_failure_is_error_with_phone_number() {
        let status = classify(
            &report(failed(), failed(), failed()),
            "+233 24 491 9412",
        );
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("+233 24 491 9412"));
        assert!(status.message.contains("connection refused"));
    }
}
