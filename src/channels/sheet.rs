use crate::errors::AppError;
use crate::models::{ChannelKind, DeliveryFailure, DeliveryOutcome, SubmissionRecord};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::DeliveryChannel;

/// Logs the lead to the spreadsheet intake endpoint.
///
/// The endpoint is an Apps Script web app whose responses cannot be
/// meaningfully inspected (it answers with redirects and opaque bodies), so
/// this channel treats a request that leaves without a transport error as
/// [`DeliveryOutcome::Dispatched`]: sent, delivery unconfirmed. That is a
/// best-effort guarantee, not confirmed delivery.
pub struct SheetLogChannel {
    client: reqwest::Client,
    webhook_url: String,
}

impl SheetLogChannel {
    pub fn new(webhook_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create sheet client: {}", e))
            })?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Wire format expected by the intake script. Several fields are
    /// duplicated under alias keys for downstream consumer flexibility.
    fn payload(record: &SubmissionRecord) -> serde_json::Value {
        json!({
            // Basic customer information
            "firstName": record.first_name,
            "lastName": record.last_name,
            "fullName": record.full_name,
            "phone": record.phone,
            "email": record.email,

            // Project details
            "service": record.service.as_str(),
            "description": record.description,

            // Submission metadata
            "timestamp": record.submitted_at.to_rfc3339(),
            "submissionDate": record.formatted_submission_date(),
            "source": "Website Contact Form",

            // Security and tracking
            "recaptchaVerified": true,
            "recaptchaToken": record.captcha_token,
            "userAgent": record.user_agent,
            "referrer": record.referrer,

            // Duplicated aliases for downstream compatibility
            "customerPhone": record.phone,
            "customerEmail": record.email,
            "serviceType": record.service.as_str(),
            "projectDescription": record.description,
        })
    }
}

#[async_trait]
impl DeliveryChannel for SheetLogChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::SheetLog
    }

    async fn deliver(&self, record: &SubmissionRecord) -> DeliveryOutcome {
        tracing::info!("Logging lead to intake sheet for {}", record.full_name);

        let result = self
            .client
            .post(&self.webhook_url)
            .json(&Self::payload(record))
            .send()
            .await;

        match result {
            // The response body/status is deliberately not inspected; the
            // endpoint contract does not allow distinguishing "received"
            // from "delivered".
            Ok(_) => DeliveryOutcome::Dispatched,
            Err(e) => {
                DeliveryOutcome::Failed(DeliveryFailure::Transport(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientContext, LeadForm};

    fn sample_record() -> SubmissionRecord {
        let form = LeadForm {
            first_name: "Kwame".to_string(),
            last_name: "Asante".to_string(),
            phone: "+233 24 491 9412".to_string(),
            email: "kwame@example.com".to_string(),
            service: "commercial".to_string(),
            description: "Office block wiring inspection".to_string(),
        };
        SubmissionRecord::build(
            &form,
            "tok",
            &ClientContext {
                user_agent: "ua".to_string(),
                referrer: Some("https://google.com".to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_payload_carries_alias_keys() {
        let payload = SheetLogChannel::payload(&sample_record());

        assert_eq!(payload["phone"], payload["customerPhone"]);
        assert_eq!(payload["email"], payload["customerEmail"]);
        assert_eq!(payload["service"], payload["serviceType"]);
        assert_eq!(payload["description"], payload["projectDescription"]);
        assert_eq!(payload["source"], "Website Contact Form");
        assert_eq!(payload["referrer"], "https://google.com");
    }
}
