//! Per-request deadline for service calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::Error;

use super::ApiResult;

/// Run `call`, failing with `SERVICE_UNAVAILABLE` once `timeout` elapses.
///
/// The dropped future releases any pooled connection it held, and an open
/// database transaction is rolled back by the server.
pub async fn with_deadline<T, F>(timeout: Duration, call: F) -> ApiResult<T>
where
    F: Future<Output = Result<T, Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(timeout_ms, "request deadline elapsed");
            Err(Error::service_unavailable("request timed out"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn fast_calls_pass_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, Error>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[rstest]
    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let result: ApiResult<()> =
            with_deadline(Duration::from_secs(1), async { Err(Error::not_found("gone")) }).await;
        assert_eq!(result.map_err(|err| err.code()), Err(ErrorCode::NotFound));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn slow_calls_become_service_unavailable() {
        let result: ApiResult<()> = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        let err = result.expect_err("deadline elapses");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.message(), "request timed out");
    }
}
