use crate::models::SubmitStatus;
use tokio::time::{Duration, Instant};

#[derive(Debug)]
struct Shown {
    status: SubmitStatus,
    expires_at: Instant,
}

/// Holds the single transient submit status with timed auto-clear.
///
/// At most one status is alive at a time; showing a new one replaces the
/// old. Expiry is evaluated lazily on read so no background timer is
/// needed, and clearing an already-clear presenter is a no-op.
#[derive(Debug, Default)]
pub struct StatusPresenter {
    current: Option<Shown>,
}

impl StatusPresenter {
    pub fn new() -> Self {
        StatusPresenter::default()
    }

    /// Displays `status` for `ttl`, replacing whatever was shown before.
    pub fn show(&mut self, status: SubmitStatus, ttl: Duration) {
        self.current = Some(Shown {
            status,
            expires_at: Instant::now() + ttl,
        });
    }

    /// The currently visible status, if one is shown and not yet expired.
    pub fn current(&self) -> Option<&SubmitStatus> {
        match &self.current {
            Some(shown) if Instant::now() < shown.expires_at => Some(&shown.status),
            _ => None,
        }
    }

    /// Dismisses the status immediately. Idempotent.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_status_expires_after_ttl() {
        let mut presenter = StatusPresenter::new();
        presenter.show(SubmitStatus::success("done"), Duration::from_secs(10));
        assert!(presenter.current().is_some());

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(presenter.current().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(presenter.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_replaces_previous_status() {
        let mut presenter = StatusPresenter::new();
        presenter.show(SubmitStatus::error("failed"), Duration::from_secs(8));
        presenter.show(SubmitStatus::success("worked"), Duration::from_secs(10));

        assert_eq!(presenter.current().unwrap().message, "worked");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let mut presenter = StatusPresenter::new();
        presenter.clear();
        assert!(presenter.current().is_none());

        presenter.show(SubmitStatus::success("ok"), Duration::from_secs(10));
        presenter.clear();
        presenter.clear();
        assert!(presenter.current().is_none());
    }
}
