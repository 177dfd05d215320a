//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Calculate the delay before the given retry attempt.
///
/// Doubles per attempt starting from `base_ms`, capped at `max_ms`, with
/// 0–10% jitter added on top. Attempt 0 is the initial try and gets no
/// delay.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential = base_ms.saturating_mul(2u64.saturating_pow(attempt - 1));
    let capped = exponential.min(max_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        let first = calculate_backoff(1, 100, 2_000);
        assert!(first.as_millis() >= 100);

        let second = calculate_backoff(2, 100, 2_000);
        assert!(second.as_millis() >= 200);

        let capped = calculate_backoff(10, 100, 1_000);
        assert!(capped.as_millis() >= 1_000);
        assert!(capped.as_millis() <= 1_100);
    }

    #[test]
    fn test_initial_attempt_has_no_delay() {
        assert_eq!(calculate_backoff(0, 100, 1_000), Duration::from_millis(0));
    }
}
