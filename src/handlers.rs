use crate::channels::{ChannelSet, DeliveryReport};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    ClientContext, FormField, LeadForm, ServiceType, StatusKind, SubmissionRecord, SubmitStatus,
};
use crate::orchestrator::classify;
use crate::validation::validate_form;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// The three delivery channels every submission fans out to.
    pub channels: ChannelSet,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-intake-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/v1/services
///
/// The fixed service catalog the form's service field must come from.
pub async fn list_services() -> Json<serde_json::Value> {
    let services: Vec<_> = ServiceType::ALL
        .iter()
        .map(|s| json!({ "id": s.as_str(), "label": s.label() }))
        .collect();
    Json(json!({ "services": services }))
}

/// Request payload for a lead submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmissionRequest {
    #[serde(flatten)]
    pub form: LeadForm,
    pub captcha_token: Option<String>,
}

/// Successful submission response: the classified status plus the
/// per-channel outcomes (including the unconfirmed-dispatch distinction).
#[derive(Debug, Serialize)]
pub struct LeadSubmissionResponse {
    pub status: SubmitStatus,
    pub channels: DeliveryReport,
}

/// POST /api/v1/leads
///
/// Runs the full submission pipeline for one lead: validate the form and
/// CAPTCHA token, fan out to the sheet log and both email channels
/// concurrently, classify the aggregate outcome. Validation problems come
/// back as a 422 with the per-field error map; a total delivery failure is
/// a 502 asking the user to retry or call directly.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<LeadSubmissionRequest>,
) -> Result<Json<LeadSubmissionResponse>, AppError> {
    tracing::info!("POST /api/v1/leads");

    let mut errors = validate_form(&request.form, request.captcha_token.as_deref());

    // The form UI caps the description; enforce the same bound here.
    let max_len = state.config.description_max_length;
    if request.form.description.trim().chars().count() > max_len {
        errors.insert(
            FormField::Description,
            format!("Description must be at most {} characters", max_len),
        );
    }

    if !errors.is_empty() {
        return Err(AppError::ValidationFailed(errors));
    }

    let client = client_context(&headers);
    let token = request.captcha_token.as_deref().unwrap_or_default();
    let record = SubmissionRecord::build(&request.form, token, &client).ok_or_else(|| {
        AppError::InternalError("Validated form failed to build a submission record".to_string())
    })?;

    let report = state.channels.deliver_all(&record).await;
    let status = classify(&report, &state.config.company_phone);

    match status.kind {
        StatusKind::Success => Ok(Json(LeadSubmissionResponse {
            status,
            channels: report,
        })),
        StatusKind::Error => Err(AppError::DeliveryFailed(status.message)),
    }
}

fn client_context(headers: &HeaderMap) -> ClientContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Unknown")
        .to_string();
    let referrer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    ClientContext {
        user_agent,
        referrer,
    }
}
