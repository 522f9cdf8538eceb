//! Minimum visible duration for loading states.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Awaits `fut`, then holds the result back until at least `floor` has
/// elapsed since the call, so fast responses do not make the spinner flicker.
pub async fn with_min_duration<F>(floor: Duration, fut: F) -> F::Output
where
    F: Future,
{
    let started = Instant::now();
    let output = fut.await;
    sleep_until(started + floor).await;
    output
}
