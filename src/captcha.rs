//! Narrow wrapper around the third-party challenge widget.
//!
//! The gate only tracks the opaque verification token and the user-facing
//! notice raised by the widget's expiry/error callbacks. The concrete
//! provider stays swappable: the orchestrator talks to this surface alone.

/// Holds the current CAPTCHA token between widget callbacks and submit.
///
/// A token is single-use: the orchestrator resets the gate after every
/// terminal submission outcome so a consumed token can never be replayed.
#[derive(Debug, Default)]
pub struct CaptchaGate {
    token: Option<String>,
    notice: Option<String>,
}

impl CaptchaGate {
    pub fn new() -> Self {
        CaptchaGate::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Widget `onChange` callback: a fresh token, or `None` when the widget
    /// cleared itself.
    pub fn challenge_completed(&mut self, token: Option<String>) {
        self.notice = None;
        self.token = token.filter(|t| !t.is_empty());
    }

    /// Widget `onExpired` callback. The held token is no longer valid.
    pub fn challenge_expired(&mut self) {
        tracing::debug!("CAPTCHA token expired");
        self.token = None;
        self.notice =
            Some("Security verification expired. Please complete it again.".to_string());
    }

    /// Widget `onError` callback. Distinct from expiry: the widget itself
    /// failed, not the token.
    pub fn challenge_errored(&mut self) {
        tracing::warn!("CAPTCHA widget reported an error");
        self.token = None;
        self.notice =
            Some("Security verification failed to load. Please try again.".to_string());
    }

    /// Clears the held token and any notice. Invoked after every terminal
    /// submission outcome, success or failure.
    pub fn reset(&mut self) {
        self.token = None;
        self.notice = None;
    }

    /// User-facing message from the last expiry/error callback, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
