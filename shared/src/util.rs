/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at back-office scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Whole days elapsed between `since` and `now` (both Unix millis).
///
/// Floor semantics: 23h59m = 0 days. Negative spans clamp to 0.
pub fn days_since(since: i64, now: i64) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    ((now - since).max(0)) / DAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert_ne!(a, b);
    }

    #[test]
    fn days_since_floors() {
        const DAY_MS: i64 = 86_400_000;
        assert_eq!(days_since(0, DAY_MS - 1), 0);
        assert_eq!(days_since(0, DAY_MS), 1);
        assert_eq!(days_since(0, 3 * DAY_MS + 5), 3);
        // future timestamp clamps instead of going negative
        assert_eq!(days_since(DAY_MS, 0), 0);
    }
}
