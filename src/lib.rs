//! Lead Intake API Library
//!
//! This library implements the lead-submission pipeline behind the
//! electrical-services website contact form: field validation, CAPTCHA
//! gating, concurrent fan-out delivery to the intake sheet and both email
//! channels, aggregate outcome classification, and transient status
//! presentation.
//!
//! # Modules
//!
//! - `captcha`: CAPTCHA token gate wrapping the challenge widget callbacks.
//! - `channels`: Delivery channels (sheet log, notification email, auto-reply email).
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `orchestrator`: Submit lifecycle and aggregate classification.
//! - `status`: Transient submit-status presentation with timed auto-clear.
//! - `validation`: Pure form validation.

pub mod captcha;
pub mod channels;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod status;
pub mod validation;
