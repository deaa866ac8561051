//! Delivery channels: each one independently attempts to hand a submission
//! to a single external sink and reports the outcome as data. No channel
//! error ever propagates past [`DeliveryChannel::deliver`].

mod email;
mod sheet;

pub use email::{AutoReplyEmailChannel, EmailDispatcher, NotificationEmailChannel};
pub use sheet::SheetLogChannel;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ChannelKind, DeliveryOutcome, SubmissionRecord};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// One independent external delivery mechanism for a lead.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Attempts delivery exactly once. Must not fail: all errors are caught
    /// and mapped into the returned outcome.
    async fn deliver(&self, record: &SubmissionRecord) -> DeliveryOutcome;
}

/// Aggregate of the three per-channel results for one submit attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub sheet: DeliveryOutcome,
    pub notification: DeliveryOutcome,
    pub auto_reply: DeliveryOutcome,
}

/// The three channels every submission fans out to.
#[derive(Clone)]
pub struct ChannelSet {
    pub sheet: Arc<dyn DeliveryChannel>,
    pub notification: Arc<dyn DeliveryChannel>,
    pub auto_reply: Arc<dyn DeliveryChannel>,
}

impl ChannelSet {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(ChannelSet {
            sheet: Arc::new(SheetLogChannel::new(config.sheet_webhook_url.clone())?),
            notification: Arc::new(NotificationEmailChannel::new(config)?),
            auto_reply: Arc::new(AutoReplyEmailChannel::new(config)?),
        })
    }

    /// Fires all three channels concurrently and waits for every outcome.
    ///
    /// Join-all semantics: no early cancellation on first failure or first
    /// success; the aggregate decision is made only once all have settled.
    pub async fn deliver_all(&self, record: &SubmissionRecord) -> DeliveryReport {
        let (sheet, notification, auto_reply) = tokio::join!(
            self.sheet.deliver(record),
            self.notification.deliver(record),
            self.auto_reply.deliver(record),
        );

        for (kind, outcome) in [
            (self.sheet.kind(), &sheet),
            (self.notification.kind(), &notification),
            (self.auto_reply.kind(), &auto_reply),
        ] {
            match outcome {
                DeliveryOutcome::Delivered => {
                    tracing::info!("✓ Channel {} delivered", kind.as_str())
                }
                DeliveryOutcome::Dispatched => {
                    tracing::info!("✓ Channel {} dispatched (unconfirmed)", kind.as_str())
                }
                DeliveryOutcome::Failed(reason) => {
                    tracing::warn!("Channel {} failed: {}", kind.as_str(), reason)
                }
            }
        }

        DeliveryReport {
            sheet,
            notification,
            auto_reply,
        }
    }
}
