use crate::config::{Config, EmailJsCredentials};
use crate::errors::AppError;
use crate::models::{ChannelKind, DeliveryFailure, DeliveryOutcome, SubmissionRecord};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::DeliveryChannel;

/// Shared transport for the transactional email provider (EmailJS-style
/// REST contract: `service_id` + `template_id` + `user_id` +
/// `template_params`).
#[derive(Clone)]
pub struct EmailDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl EmailDispatcher {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create email client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    /// Sends one templated email. Provider error statuses are classified
    /// into the closed [`DeliveryFailure`] set; anything unknown falls back
    /// to the provider's raw response text.
    pub async fn send(
        &self,
        credentials: &EmailJsCredentials,
        template_params: serde_json::Value,
    ) -> DeliveryOutcome {
        let url = format!("{}/api/v1.0/email/send", self.base_url);
        let body = json!({
            "service_id": credentials.service_id,
            "template_id": credentials.template_id,
            "user_id": credentials.public_key,
            "template_params": template_params,
        });

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                return DeliveryOutcome::Failed(DeliveryFailure::Transport(e.to_string()))
            }
        };

        let status = response.status();
        if status.is_success() {
            return DeliveryOutcome::Delivered;
        }

        // Known provider error codes map to distinct reasons
        let failure = match status.as_u16() {
            404 => DeliveryFailure::ServiceNotFound,
            400 => DeliveryFailure::TemplateNotFound,
            422 => DeliveryFailure::ParameterMismatch,
            _ => {
                let text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("provider returned status {}", status));
                DeliveryFailure::Unclassified(text)
            }
        };

        DeliveryOutcome::Failed(failure)
    }
}

/// Alerts the business operator about a new lead.
pub struct NotificationEmailChannel {
    dispatcher: EmailDispatcher,
    credentials: Option<EmailJsCredentials>,
    operator_name: String,
    operator_email: String,
}

impl NotificationEmailChannel {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            dispatcher: EmailDispatcher::new(config.emailjs_base_url.clone())?,
            credentials: config.notification_credentials(),
            operator_name: config.operator_name.clone(),
            operator_email: config.operator_email.clone(),
        })
    }

    fn template_params(&self, record: &SubmissionRecord) -> serde_json::Value {
        json!({
            // Recipient
            "to_name": self.operator_name,
            "to_email": self.operator_email,
            "user_name": self.operator_name,
            "user_email": self.operator_email,

            // Customer information
            "customer_name": record.full_name,
            "customer_email": record.email,
            "customer_phone": record.phone,

            // Project details
            "service_type": record.service.label(),
            "project_description": record.description,

            // Additional info
            "submission_date": record.formatted_submission_date(),
            "recaptcha_verified": "Verified",

            // For replying straight to the customer
            "reply_to": record.email,
        })
    }
}

#[async_trait]
impl DeliveryChannel for NotificationEmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::NotificationEmail
    }

    async fn deliver(&self, record: &SubmissionRecord) -> DeliveryOutcome {
        let Some(credentials) = &self.credentials else {
            tracing::warn!("Email credentials missing - skipping notification email");
            return DeliveryOutcome::Failed(DeliveryFailure::NotConfigured);
        };

        tracing::info!("Sending lead notification email for {}", record.full_name);
        self.dispatcher
            .send(credentials, self.template_params(record))
            .await
    }
}

/// Confirms receipt to the customer's own address, using a different
/// template than the operator notification.
pub struct AutoReplyEmailChannel {
    dispatcher: EmailDispatcher,
    credentials: Option<EmailJsCredentials>,
    company_phone: String,
    company_email: String,
    company_address: String,
}

impl AutoReplyEmailChannel {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            dispatcher: EmailDispatcher::new(config.emailjs_base_url.clone())?,
            credentials: config.auto_reply_credentials(),
            company_phone: config.company_phone.clone(),
            company_email: config.company_email.clone(),
            company_address: config.company_address.clone(),
        })
    }

    fn template_params(&self, record: &SubmissionRecord) -> serde_json::Value {
        json!({
            // Customer information
            "customer_name": record.full_name,
            "customer_email": record.email,
            "customer_phone": record.phone,
            "user_name": record.full_name,
            "user_email": record.email,

            // Project details
            "service_type": record.service.label(),
            "project_description": record.description,

            // Additional info
            "submission_date": record.formatted_submission_date(),

            // Contact info for the customer
            "company_phone": self.company_phone,
            "company_email": self.company_email,
            "company_address": self.company_address,

            "reply_to": self.company_email,
        })
    }
}

#[async_trait]
impl DeliveryChannel for AutoReplyEmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::AutoReplyEmail
    }

    async fn deliver(&self, record: &SubmissionRecord) -> DeliveryOutcome {
        let Some(credentials) = &self.credentials else {
            tracing::warn!("Email credentials missing - skipping auto-reply email");
            return DeliveryOutcome::Failed(DeliveryFailure::NotConfigured);
        };

        tracing::info!("Sending auto-reply email to {}", record.email);
        self.dispatcher
            .send(credentials, self.template_params(record))
            .await
    }
}
