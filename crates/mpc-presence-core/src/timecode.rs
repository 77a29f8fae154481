//! Conversion between the player's clock strings and milliseconds.

/// Drop a zero-value hour segment for display: "00:04:12" reads as "04:12".
pub fn display(time: &str) -> &str {
    time.strip_prefix("00:").unwrap_or(time)
}

/// Parse "H:MM:SS" or "M:SS" into milliseconds.
///
/// Any other arity yields 0, and non-numeric segments count as 0. The
/// presentation must degrade to a zero duration on a flaky scrape rather
/// than fail the cycle.
pub fn to_millis(time: &str) -> u64 {
    let parts: Vec<u64> = time
        .split(':')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect();

    let seconds = match parts.as_slice() {
        [hours, minutes, seconds] => hours * 3600 + minutes * 60 + seconds,
        [minutes, seconds] => minutes * 60 + seconds,
        _ => 0,
    };
    seconds * 1000
}
