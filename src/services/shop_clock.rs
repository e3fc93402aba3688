use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone, Utc};

/// Wall clock in the shop's local offset. Revenue days are bucketed at local
/// midnight, so everything date-related goes through here.
#[derive(Clone, Copy, Debug)]
pub struct ShopClock {
    tz: FixedOffset,
    frozen_at: Option<DateTime<Utc>>,
}

impl ShopClock {
    pub fn new(tz: FixedOffset) -> Self {
        Self {
            tz,
            frozen_at: None,
        }
    }

    /// A clock that always reports `at`.
    pub fn fixed(at: DateTime<Utc>, tz: FixedOffset) -> Self {
        Self {
            tz,
            frozen_at: Some(at),
        }
    }

    pub fn tz(&self) -> FixedOffset {
        self.tz
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.frozen_at
            .unwrap_or_else(Utc::now)
            .with_timezone(&self.tz)
    }
}

/// `[00:00 of date, 00:00 of the next day)` in the given offset, as UTC instants.
pub fn local_day_bounds(date: NaiveDate, tz: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = midnight(date, tz);
    let end = midnight(date.checked_add_days(Days::new(1)).unwrap_or(date), tz);
    (start, end)
}

fn midnight(date: NaiveDate, tz: FixedOffset) -> DateTime<Utc> {
    // A fixed offset has no gaps, so the local midnight always maps to one instant.
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

pub fn parse_tz_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sign_char = trimmed.chars().next()?;
    let sign = match sign_char {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let rest = &trimmed[1..];
    let mut parts = rest.split(':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = parts.next().unwrap_or("0").parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    let total_seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(total_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets() {
        assert_eq!(
            parse_tz_offset("+05:30"),
            FixedOffset::east_opt(5 * 3600 + 30 * 60)
        );
        assert_eq!(parse_tz_offset("-02"), FixedOffset::west_opt(2 * 3600));
        assert_eq!(parse_tz_offset("05:30"), None);
        assert_eq!(parse_tz_offset("+25:00"), None);
        assert_eq!(parse_tz_offset(""), None);
    }

    #[test]
    fn day_bounds_follow_local_midnight() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let (start, end) = local_day_bounds(date, ist);
        assert_eq!(start.to_rfc3339(), "2025-01-01T18:30:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-01-02T18:30:00+00:00");
    }

    #[test]
    fn fixed_clock_reports_local_time() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
        let clock = ShopClock::fixed(at, ist);
        assert_eq!(
            clock.now().date_naive(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
    }
}
