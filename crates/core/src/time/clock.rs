const SECONDS_PER_QUARTER: u32 = 15 * 60;

/// Parses a period clock formatted `MM:SS` into seconds.
///
/// Returns `None` unless the input is exactly two `:`-separated non-negative integers with
/// seconds below 60 and a total no longer than one quarter (`15:00`).
pub fn parse_clock(clock: &str) -> Option<u32> {
    let (minutes, seconds) = clock.trim().split_once(':')?;
    if seconds.contains(':') {
        return None;
    }
    let minutes = minutes.trim().parse::<u32>().ok()?;
    let seconds = seconds.trim().parse::<u32>().ok()?;
    if seconds >= 60 {
        return None;
    }
    let total = minutes.checked_mul(60)?.checked_add(seconds)?;
    (total <= SECONDS_PER_QUARTER).then_some(total)
}

/// Lenient clock read used at the request boundary: a malformed clock degrades to zero seconds
/// remaining instead of failing the request.
pub fn clock_seconds_or_zero(clock: &str) -> u32 {
    match parse_clock(clock) {
        Some(seconds) => seconds,
        None => {
            tracing::warn!(clock, "unparseable game clock; treating as 0 seconds remaining");
            0
        }
    }
}

/// Seconds left in regulation. Overtime only counts its own period clock.
pub fn game_seconds_remaining(quarter: u8, period_seconds: u32) -> u32 {
    let full_quarters_left = 4u32.saturating_sub(u32::from(quarter));
    period_seconds.saturating_add(full_quarters_left * SECONDS_PER_QUARTER)
}

/// Seconds left in the current half. Overtime is treated like a second-half quarter.
pub fn half_seconds_remaining(quarter: u8, period_seconds: u32) -> u32 {
    match quarter {
        1 | 3 => period_seconds.saturating_add(SECONDS_PER_QUARTER),
        _ => period_seconds,
    }
}
