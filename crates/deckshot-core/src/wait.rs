//! Deadline-bounded polling

use std::future::Future;
use std::time::Duration;

use crate::clock::Clock;
use crate::{DeckError, Result};

/// Poll `check` every `interval` until it returns `true` or `timeout` passes
///
/// `check` runs once more at the deadline before giving up. A failing check
/// aborts the wait with its error. `condition` describes what was awaited in
/// the resulting [`DeckError::Timeout`].
pub async fn wait_until<K, F, Fut>(
    clock: &K,
    condition: &str,
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<()>
where
    K: Clock + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = clock.elapsed();

    loop {
        if check().await? {
            return Ok(());
        }

        let waited = clock.elapsed().saturating_sub(start);
        if waited >= timeout {
            return Err(DeckError::Timeout {
                condition: condition.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }

        clock.sleep(interval.min(timeout - waited)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::Cell;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn test_times_out_when_condition_never_holds() {
        let clock = ManualClock::new();
        let checks = Cell::new(0);

        let err = wait_until(&clock, "the marker", Duration::from_secs(1), INTERVAL, || {
            checks.set(checks.get() + 1);
            async { Ok(false) }
        })
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DeckError::Timeout { ref condition, timeout_ms: 1000 } if condition == "the marker"
        ));
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
        // t = 0, 100, ..., 1000
        assert_eq!(checks.get(), 11);
    }

    #[tokio::test]
    async fn test_returns_once_condition_holds() {
        let clock = ManualClock::new();
        let checks = Cell::new(0);

        wait_until(&clock, "ready", Duration::from_secs(5), INTERVAL, || {
            checks.set(checks.get() + 1);
            let ready = checks.get() >= 3;
            async move { Ok(ready) }
        })
        .await
        .unwrap();

        assert_eq!(checks.get(), 3);
        assert_eq!(clock.sleeps(), vec![INTERVAL, INTERVAL]);
    }

    #[tokio::test]
    async fn test_last_sleep_is_clipped_to_deadline() {
        let clock = ManualClock::new();

        let result = wait_until(&clock, "x", Duration::from_millis(250), INTERVAL, || async {
            Ok(false)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(
            clock.sleeps(),
            vec![INTERVAL, INTERVAL, Duration::from_millis(50)]
        );
    }

    #[tokio::test]
    async fn test_check_error_aborts_wait() {
        let clock = ManualClock::new();

        let err = wait_until(&clock, "x", Duration::from_secs(1), INTERVAL, || async {
            Err(DeckError::Script("boom".to_string()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DeckError::Script(_)));
        assert!(clock.sleeps().is_empty());
    }
}
