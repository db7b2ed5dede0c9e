//! Request-rate limits and the sliding history used to enforce them.

use std::collections::VecDeque;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::CoreError;

/// Scope shared by the game category endpoints.
pub const SCOPE_GAME_CATEGORIES: &str = "game-categories";

/// Default scope for anonymous clients.
pub const SCOPE_ANON: &str = "anon";

/// Default scope for authenticated clients.
pub const SCOPE_USER: &str = "user";

/// `num_requests` per `period`, parsed from strings such as `"30/hour"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRate {
    pub num_requests: u32,
    pub period: Duration,
}

impl ThrottleRate {
    pub fn new(num_requests: u32, period: Duration) -> Self {
        Self {
            num_requests,
            period,
        }
    }

    /// Parse an optional rate; `off`, `none` and the empty string disable it.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, CoreError> {
        let value = value.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("off")
            || value.eq_ignore_ascii_case("none")
        {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for ThrottleRate {
    type Err = CoreError;

    /// Accepts `<count>/<period>` where only the first letter of the period
    /// matters: `s`, `m`, `h` or `d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid throttle rate '{s}'"));

        let (count, period) = s.split_once('/').ok_or_else(invalid)?;
        let num_requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if num_requests == 0 {
            return Err(invalid());
        }

        let secs = match period.trim().chars().next() {
            Some('s') => 1,
            Some('m') => 60,
            Some('h') => 60 * 60,
            Some('d') => 24 * 60 * 60,
            _ => return Err(invalid()),
        };

        Ok(Self::new(num_requests, Duration::from_secs(secs)))
    }
}

/// Record a request at `now` against `history` (oldest first).
///
/// Entries older than the rate's period are discarded first. If the window
/// is already full the request is not recorded and the time until the
/// oldest entry expires is returned as the error.
pub fn check_history(
    history: &mut VecDeque<Instant>,
    rate: &ThrottleRate,
    now: Instant,
) -> Result<(), Duration> {
    while let Some(&oldest) = history.front() {
        if now.saturating_duration_since(oldest) >= rate.period {
            history.pop_front();
        } else {
            break;
        }
    }

    if history.len() >= rate.num_requests as usize {
        let oldest = history.front().copied().unwrap_or(now);
        let elapsed = now.saturating_duration_since(oldest);
        return Err(rate.period.saturating_sub(elapsed));
    }

    history.push_back(now);
    Ok(())
}

/// Whole seconds for a `Retry-After` header, rounded up and at least 1.
pub fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}
