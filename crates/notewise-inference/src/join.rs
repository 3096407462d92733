//! Concurrent join primitives for inference fan-out.
//!
//! Two strategies are used side by side:
//!
//! - [`settle_all`] waits for every branch and hands back each outcome, so a
//!   failing branch never affects its siblings.
//! - [`fail_fast_all`] runs every branch concurrently and fails as soon as any
//!   one of them fails; remaining branches are dropped.
//!
//! [`with_deadline`] turns an optional per-call timeout into an ordinary
//! failure for whichever join the call belongs to.

use std::future::Future;
use std::time::Duration;

use futures::future::try_join_all;

use notewise_core::{Error, Result};

/// Run three branches concurrently and collect every outcome.
pub async fn settle_all<A, B, C, FA, FB, FC>(
    a: FA,
    b: FB,
    c: FC,
) -> (Result<A>, Result<B>, Result<C>)
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
    FC: Future<Output = Result<C>>,
{
    tokio::join!(a, b, c)
}

/// Run all branches concurrently; the first failure fails the whole join.
///
/// Successful outputs keep the input order regardless of completion order.
pub async fn fail_fast_all<I, F, T>(branches: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>>,
{
    try_join_all(branches).await
}

/// Await `fut`, failing with [`Error::Timeout`] once `limit` elapses.
///
/// `None` waits indefinitely.
pub async fn with_deadline<T, F>(fut: F, limit: Option<Duration>) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        None => fut.await,
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(limit.as_millis() as u64)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn ok_after(ms: u64, value: u32) -> Result<u32> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(value)
    }

    async fn fail_after(ms: u64) -> Result<u32> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Err(Error::Inference("boom".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_all_keeps_each_outcome() {
        let (a, b, c) = settle_all(ok_after(30, 1), fail_after(10), ok_after(20, 3)).await;
        assert_eq!(a.unwrap(), 1);
        assert!(b.is_err());
        assert_eq!(c.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_all_waits_for_slowest_branch() {
        let start = tokio::time::Instant::now();
        let _ = settle_all(fail_after(5), ok_after(50, 2), ok_after(1, 3)).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_all_preserves_input_order() {
        let results = fail_fast_all(vec![ok_after(30, 1), ok_after(10, 2), ok_after(20, 3)])
            .await
            .unwrap();
        assert_eq!(results, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_all_single_failure_fails_join() {
        let branches: Vec<std::pin::Pin<Box<dyn Future<Output = Result<u32>>>>> = vec![
            Box::pin(ok_after(10, 1)),
            Box::pin(fail_after(20)),
            Box::pin(ok_after(10, 3)),
        ];
        assert!(fail_fast_all(branches).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_all_does_not_wait_for_slow_siblings() {
        let finished = Arc::new(AtomicUsize::new(0));
        let slow = {
            let finished = finished.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, Error>(1)
            }
        };
        let branches: Vec<std::pin::Pin<Box<dyn Future<Output = Result<u32>>>>> =
            vec![Box::pin(slow), Box::pin(fail_after(5))];

        let start = tokio::time::Instant::now();
        assert!(fail_fast_all(branches).await.is_err());
        assert!(start.elapsed() < Duration::from_secs(60));
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fail_fast_all_empty_is_ok() {
        let branches: Vec<std::future::Ready<Result<u32>>> = Vec::new();
        assert!(fail_fast_all(branches).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_none_waits() {
        let value = with_deadline(ok_after(10_000, 7), None).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_times_out() {
        let result = with_deadline(ok_after(10_000, 7), Some(Duration::from_millis(250))).await;
        assert!(matches!(result, Err(Error::Timeout(250))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_passes_through_errors() {
        let result = with_deadline(fail_after(5), Some(Duration::from_secs(1))).await;
        assert!(matches!(result, Err(Error::Inference(_))));
    }
}
