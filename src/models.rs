use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============ Lead Form ============

/// The fixed set of services a lead can request.
///
/// Mirrors the service catalog offered on the website; the form's service
/// field must resolve to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Residential,
    Commercial,
    Solar,
    Emergency,
    Maintenance,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Residential,
        ServiceType::Commercial,
        ServiceType::Solar,
        ServiceType::Emergency,
        ServiceType::Maintenance,
    ];

    /// Form value as submitted by the website select input.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Residential => "residential",
            ServiceType::Commercial => "commercial",
            ServiceType::Solar => "solar",
            ServiceType::Emergency => "emergency",
            ServiceType::Maintenance => "maintenance",
        }
    }

    /// Human-readable catalog label.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Residential => "Residential Electrical",
            ServiceType::Commercial => "Commercial Electrical",
            ServiceType::Solar => "Solar Installation",
            ServiceType::Emergency => "Emergency Repair",
            ServiceType::Maintenance => "Electrical Maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<ServiceType> {
        ServiceType::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == value)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable contact-form state. Created empty, mutated per keystroke,
/// cleared on terminal success.
///
/// Fields default to empty on deserialization so a request body that omits
/// a key reaches the validator and comes back as a field error, not as a
/// deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    /// Raw select value; validated against [`ServiceType`].
    pub service: String,
    pub description: String,
}

impl LeadForm {
    /// Reset every field to its empty default.
    pub fn clear(&mut self) {
        *self = LeadForm::default();
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::Service => self.service = value,
            FormField::Description => self.description = value,
            // The captcha field is synthetic; it has no form storage.
            FormField::Captcha => {}
        }
    }
}

/// Identifies a single validatable field, including the synthetic
/// `captcha` entry that has no backing form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Phone,
    Email,
    Service,
    Description,
    Captcha,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Service => "service",
            FormField::Description => "description",
            FormField::Captcha => "captcha",
        }
    }
}

/// Field name -> human-readable error message, recomputed wholesale on each
/// submit attempt. Empty map means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field, e.g. when the user edits it.
    pub fn clear_field(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

// ============ Submission ============

/// Request-scoped client metadata attached to a submission.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub user_agent: String,
    pub referrer: Option<String>,
}

/// Immutable snapshot built once per submit attempt and shared read-only by
/// every delivery channel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub service: ServiceType,
    pub description: String,
    pub submitted_at: DateTime<Utc>,
    pub user_agent: String,
    pub referrer: String,
    pub captcha_token: String,
}

impl SubmissionRecord {
    /// Builds the snapshot from a validated form. Returns `None` when the
    /// service value does not resolve, which validation rules out.
    pub fn build(
        form: &LeadForm,
        captcha_token: &str,
        client: &ClientContext,
    ) -> Option<SubmissionRecord> {
        let service = ServiceType::parse(form.service.trim())?;
        let referrer = match client.referrer.as_deref() {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => "Direct".to_string(),
        };

        Some(SubmissionRecord {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            full_name: format!("{} {}", form.first_name.trim(), form.last_name.trim()),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            service,
            description: form.description.trim().to_string(),
            submitted_at: Utc::now(),
            user_agent: client.user_agent.clone(),
            referrer,
            captcha_token: captcha_token.to_string(),
        })
    }

    /// Human-readable submission time for email templates and the sheet
    /// log. Accra local time is UTC year-round.
    pub fn formatted_submission_date(&self) -> String {
        self.submitted_at
            .format("%A, %-d %B %Y at %H:%M GMT")
            .to_string()
    }
}

// ============ Delivery Outcomes ============

/// Which external sink a delivery channel targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    SheetLog,
    NotificationEmail,
    AutoReplyEmail,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::SheetLog => "sheet_log",
            ChannelKind::NotificationEmail => "notification_email",
            ChannelKind::AutoReplyEmail => "auto_reply_email",
        }
    }
}

/// Closed set of classified delivery failures. Unknown provider errors fall
/// back to `Unclassified` with the raw message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DeliveryFailure {
    /// Required provider credentials are absent; the channel never attempted
    /// the call.
    NotConfigured,
    /// Provider rejected the configured service id.
    ServiceNotFound,
    /// Provider rejected the configured template id.
    TemplateNotFound,
    /// Template variables did not match the template.
    ParameterMismatch,
    /// Network-level failure before a provider response was read.
    Transport(String),
    Unclassified(String),
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryFailure::NotConfigured => {
                write!(f, "provider credentials not configured")
            }
            DeliveryFailure::ServiceNotFound => {
                write!(f, "email service not found - check the service id")
            }
            DeliveryFailure::TemplateNotFound => {
                write!(f, "email template not found - check the template id")
            }
            DeliveryFailure::ParameterMismatch => {
                write!(f, "email template variables mismatch")
            }
            DeliveryFailure::Transport(msg) => write!(f, "request failed: {}", msg),
            DeliveryFailure::Unclassified(msg) => write!(f, "{}", msg),
        }
    }
}

/// Per-channel result. Channels never return errors past this boundary;
/// every failure is captured here as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// The sink confirmed receipt.
    Delivered,
    /// The request left without error but the transport forbids reading the
    /// response, so delivery is unconfirmed. Best-effort success.
    Dispatched,
    Failed(DeliveryFailure),
}

impl DeliveryOutcome {
    /// Whether this outcome counts as success for aggregate classification.
    /// `Dispatched` does: the request was handed off without a fault.
    pub fn succeeded(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered | DeliveryOutcome::Dispatched)
    }

    pub fn failure(&self) -> Option<&DeliveryFailure> {
        match self {
            DeliveryOutcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

// ============ Presentation ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient user-facing status shown after a submit attempt resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SubmitStatus {
    pub fn success(message: impl Into<String>) -> Self {
        SubmitStatus {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubmitStatus {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_roundtrip() {
        for service in ServiceType::ALL {
            assert_eq!(ServiceType::parse(service.as_str()), Some(service));
        }
        assert_eq!(ServiceType::parse(""), None);
        assert_eq!(ServiceType::parse("plumbing"), None);
    }

    #[test]
    fn test_record_builds_full_name_and_referrer_sentinel() {
        let form = LeadForm {
            first_name: "  Ama ".to_string(),
            last_name: "Osei".to_string(),
            phone: "+233 24 491 9412".to_string(),
            email: "ama@example.com".to_string(),
            service: "solar".to_string(),
            description: "Panel installation for a warehouse".to_string(),
        };

        let record = SubmissionRecord::build(
            &form,
            "tok-123",
            &ClientContext {
                user_agent: "test-agent".to_string(),
                referrer: None,
            },
        )
        .unwrap();

        assert_eq!(record.full_name, "Ama Osei");
        assert_eq!(record.referrer, "Direct");
        assert_eq!(record.service, ServiceType::Solar);
        assert_eq!(record.captcha_token, "tok-123");
    }

    #[test]
    fn test_record_rejects_unknown_service() {
        let form = LeadForm {
            service: "landscaping".to_string(),
            ..LeadForm::default()
        };
        assert!(SubmissionRecord::build(&form, "tok", &ClientContext::default()).is_none());
    }

    #[test]
    fn test_dispatched_counts_as_success() {
        assert!(DeliveryOutcome::Delivered.succeeded());
        assert!(DeliveryOutcome::Dispatched.succeeded());
        assert!(!DeliveryOutcome::Failed(DeliveryFailure::NotConfigured).succeeded());
    }

    #[test]
    fn test_field_errors_serialize_with_form_names() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::FirstName, "First name is required");
        errors.insert(FormField::Captcha, "Please complete the verification");

        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("captcha").is_some());
    }
}
