use serde::Deserialize;

/// Complete credential set for one EmailJS template profile.
#[derive(Debug, Clone)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Apps Script web-app endpoint that appends leads to the intake sheet.
    pub sheet_webhook_url: String,
    pub emailjs_base_url: String,
    pub emailjs_service_id: Option<String>,
    pub emailjs_notification_template_id: Option<String>,
    pub emailjs_auto_reply_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    /// Operator inbox that receives the internal lead alert.
    pub operator_name: String,
    pub operator_email: String,
    /// Company contact details surfaced in the auto-reply and in the
    /// all-channels-failed message.
    pub company_phone: String,
    pub company_email: String,
    pub company_address: String,
    pub description_max_length: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            sheet_webhook_url: std::env::var("SHEET_WEBHOOK_URL")
                .map_err(|_| anyhow::anyhow!("SHEET_WEBHOOK_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("SHEET_WEBHOOK_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("SHEET_WEBHOOK_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            emailjs_base_url: std::env::var("EMAILJS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "https://api.emailjs.com".to_string()),
            emailjs_service_id: std::env::var("EMAILJS_SERVICE_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            emailjs_notification_template_id: std::env::var("EMAILJS_NOTIFICATION_TEMPLATE_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            emailjs_auto_reply_template_id: std::env::var("EMAILJS_AUTO_REPLY_TEMPLATE_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            emailjs_public_key: std::env::var("EMAILJS_PUBLIC_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            operator_name: std::env::var("OPERATOR_NAME")
                .unwrap_or_else(|_| "The NAPHTALI VENTURES Team".to_string()),
            operator_email: std::env::var("OPERATOR_EMAIL")
                .map_err(|_| anyhow::anyhow!("OPERATOR_EMAIL environment variable required"))
                .and_then(|email| {
                    if email.trim().is_empty() {
                        anyhow::bail!("OPERATOR_EMAIL cannot be empty");
                    }
                    Ok(email)
                })?,
            company_phone: std::env::var("COMPANY_PHONE")
                .unwrap_or_else(|_| "+233 24 491 9412".to_string()),
            company_email: std::env::var("COMPANY_EMAIL")
                .unwrap_or_else(|_| "naphtaliotoo@gmail.com".to_string()),
            company_address: std::env::var("COMPANY_ADDRESS").unwrap_or_else(|_| {
                "H/No. 20/21 Boame Street, Darkuman, Accra, Ghana".to_string()
            }),
            description_max_length: std::env::var("DESCRIPTION_MAX_LENGTH")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DESCRIPTION_MAX_LENGTH must be a number"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Sheet webhook URL: {}...",
            url_preview(&config.sheet_webhook_url)
        );
        tracing::debug!("EmailJS base URL: {}", config.emailjs_base_url);
        if config.notification_credentials().is_none() {
            tracing::warn!("EmailJS notification credentials incomplete - channel will report not-configured");
        }
        if config.auto_reply_credentials().is_none() {
            tracing::warn!("EmailJS auto-reply credentials incomplete - channel will report not-configured");
        }
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }

    /// Credentials for the operator notification template, if fully set.
    pub fn notification_credentials(&self) -> Option<EmailJsCredentials> {
        Some(EmailJsCredentials {
            service_id: self.emailjs_service_id.clone()?,
            template_id: self.emailjs_notification_template_id.clone()?,
            public_key: self.emailjs_public_key.clone()?,
        })
    }

    /// Credentials for the customer auto-reply template, if fully set.
    pub fn auto_reply_credentials(&self) -> Option<EmailJsCredentials> {
        Some(EmailJsCredentials {
            service_id: self.emailjs_service_id.clone()?,
            template_id: self.emailjs_auto_reply_template_id.clone()?,
            public_key: self.emailjs_public_key.clone()?,
        })
    }
}

/// First 30 characters of the URL for redacted logs, truncated on a char
/// boundary so multibyte URLs cannot panic the startup log line.
fn url_preview(url: &str) -> &str {
    match url.char_indices().nth(30) {
        Some((idx, _)) => &url[..idx],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_preview_truncates_long_urls() {
        let url = "https://script.google.com/macros/s/abc123/exec";
        assert_eq!(url_preview(url), "https://script.google.com/macr");
    }

    #[test]
    fn test_url_preview_keeps_short_urls_whole() {
        let url = "https://a.co";
        assert_eq!(url_preview(url), url);
    }

    #[test]
    fn test_url_preview_survives_multibyte_characters() {
        // 27 ASCII chars then multibyte: byte 30 falls inside a char
        let url = "https://example.com/intake/ééééé";
        let preview = url_preview(url);
        assert!(url.starts_with(preview));
        assert!(preview.chars().count() <= 30);
    }
}
