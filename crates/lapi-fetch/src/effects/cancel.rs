use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Cooperative cancellation context for a transfer.
///
/// Only the next chunk read observes it: an issued request is not aborted and
/// bytes already copied are kept.
#[derive(Debug, Clone, Default)]
pub enum Cancellation {
    /// The transfer always runs to the end of the body.
    #[default]
    Never,
    /// The transfer stops at the next read once the token is cancelled.
    Token(CancellationToken),
}

impl From<CancellationToken> for Cancellation {
    fn from(token: CancellationToken) -> Self { Cancellation::Token(token) }
}

impl Cancellation {
    pub fn is_cancelled(&self) -> bool {
        match self {
            Cancellation::Never => false,
            Cancellation::Token(token) => token.is_cancelled(),
        }
    }

    /// Runs `fut` unless cancellation arrives first. `None` means cancelled.
    ///
    /// A token that is already cancelled wins over a future that is ready.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        match self {
            Cancellation::Never => Some(fut.await),
            Cancellation::Token(token) => tokio::select! {
                biased;
                _ = token.cancelled() => None,
                out = fut => Some(out),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_always_runs() {
        let cancellation = Cancellation::Never;
        assert!(!cancellation.is_cancelled());
        assert_eq!(cancellation.guard(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_live_token_runs() {
        let cancellation = Cancellation::from(CancellationToken::new());
        assert_eq!(cancellation.guard(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_cancelled_token_wins_over_ready_future() {
        let token = CancellationToken::new();
        token.cancel();
        let cancellation = Cancellation::from(token);
        assert!(cancellation.is_cancelled());
        assert_eq!(cancellation.guard(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let token = CancellationToken::new();
        let cancellation = Cancellation::from(token.clone());
        let trigger = tokio::spawn(async move { token.cancel() });
        let out = cancellation.guard(std::future::pending::<()>()).await;
        trigger.await.unwrap();
        assert_eq!(out, None);
    }
}
