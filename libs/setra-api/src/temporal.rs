use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta};
use regex::Regex;

// The wire resolution is the grammar's 7 fractional digits: 100 ns ticks.
const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;
const SECONDS_PER_DAY: i64 = 86_400;

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-)?(?:(\d+)\.)?(\d{1,2}):(\d{1,2}):(\d{1,2})(?:\.(\d{1,7}))?$")
            .expect("duration pattern is valid")
    })
}

/// Parse the constant duration form `[-][d.]hh:mm:ss[.fffffff]`.
///
/// Hours are 0–23, minutes and seconds 0–59. Returns `None` when `raw` does
/// not match the grammar or the value overflows.
pub fn parse_duration(raw: &str) -> Option<TimeDelta> {
    let caps = duration_re().captures(raw)?;
    let negative = caps.get(1).is_some();
    let days: i64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let hours: i64 = caps[3].parse().ok()?;
    let minutes: i64 = caps[4].parse().ok()?;
    let seconds: i64 = caps[5].parse().ok()?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    // Fractional digits are left-aligned: ".5" means 5_000_000 ticks.
    let frac_ticks: i64 = match caps.get(6) {
        Some(m) => format!("{:0<7}", m.as_str()).parse().ok()?,
        None => 0,
    };

    let day_seconds = days.checked_mul(SECONDS_PER_DAY)?;
    let total_seconds = day_seconds
        .checked_add(hours * 3600)?
        .checked_add(minutes * 60)?
        .checked_add(seconds)?;
    let mut ticks = total_seconds
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(frac_ticks)?;
    if negative {
        ticks = ticks.checked_neg()?;
    }
    delta_from_ticks(ticks)
}

/// Format in the constant duration form. Days appear only when non-zero,
/// the fraction only when non-zero (always 7 digits then).
pub fn format_duration(delta: &TimeDelta) -> String {
    let total_ticks = ticks_of(delta);
    let ticks = total_ticks.unsigned_abs();
    let frac = ticks % TICKS_PER_SECOND as u128;
    let total_seconds = ticks / TICKS_PER_SECOND as u128;
    let days = total_seconds / SECONDS_PER_DAY as u128;
    let rem = total_seconds % SECONDS_PER_DAY as u128;
    let (hours, minutes, seconds) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let mut out = String::new();
    if total_ticks < 0 {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if frac > 0 {
        out.push_str(&format!(".{frac:07}"));
    }
    out
}

/// Parse an RFC 3339 instant, offset preserved.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

/// Round-trip instant form: RFC 3339, `Z` for UTC, exactly the sub-second
/// digits needed to reconstruct the value.
pub fn format_instant(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// i128: chrono's full range exceeds what i64 can hold in 100 ns ticks.
fn ticks_of(delta: &TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * i128::from(TICKS_PER_SECOND)
        + i128::from(delta.subsec_nanos()) / i128::from(NANOS_PER_TICK)
}

fn delta_from_ticks(ticks: i64) -> Option<TimeDelta> {
    let seconds = ticks.div_euclid(TICKS_PER_SECOND);
    let rem_ticks = ticks.rem_euclid(TICKS_PER_SECOND);
    TimeDelta::new(seconds, (rem_ticks * NANOS_PER_TICK) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_basic() {
        assert_eq!(
            parse_duration("02:03:04"),
            Some(TimeDelta::hours(2) + TimeDelta::minutes(3) + TimeDelta::seconds(4))
        );
    }

    #[test]
    fn duration_with_days() {
        let d = TimeDelta::days(1)
            + TimeDelta::hours(2)
            + TimeDelta::minutes(3)
            + TimeDelta::seconds(4);
        assert_eq!(parse_duration("1.02:03:04"), Some(d));
        assert_eq!(format_duration(&d), "1.02:03:04");
    }

    #[test]
    fn duration_fraction_left_aligned() {
        // ".5" is half a second, not 5 ticks.
        assert_eq!(
            parse_duration("00:00:00.5"),
            Some(TimeDelta::milliseconds(500))
        );
        assert_eq!(
            parse_duration("00:00:00.0000001"),
            Some(TimeDelta::nanoseconds(100))
        );
    }

    #[test]
    fn duration_negative() {
        let d = parse_duration("-00:00:01.5000000").unwrap();
        assert_eq!(d, TimeDelta::milliseconds(-1500));
        assert_eq!(format_duration(&d), "-00:00:01.5000000");
    }

    #[test]
    fn duration_format_omits_zero_parts() {
        assert_eq!(format_duration(&TimeDelta::seconds(5)), "00:00:05");
        assert_eq!(format_duration(&TimeDelta::zero()), "00:00:00");
    }

    #[test]
    fn duration_rejects_out_of_range_fields() {
        assert!(parse_duration("24:00:00").is_none());
        assert!(parse_duration("00:60:00").is_none());
        assert!(parse_duration("00:00:60").is_none());
        assert!(parse_duration("five minutes").is_none());
        assert!(parse_duration("00:00").is_none());
    }

    #[test]
    fn duration_round_trip() {
        for raw in ["00:00:00", "10675199.02:48:05.4775807", "-1.00:00:00", "23:59:59.9999999"] {
            let d = parse_duration(raw).unwrap();
            assert_eq!(format_duration(&d), raw, "round-trip of {raw}");
        }
    }

    #[test]
    fn instant_round_trip_preserves_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = tz.with_ymd_and_hms(2026, 8, 7, 10, 30, 0).unwrap();
        let s = format_instant(&t);
        let back = parse_instant(&s).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.offset(), t.offset());
    }

    #[test]
    fn instant_utc_prints_z() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let t = tz.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_instant(&t), "2026-01-01T00:00:00Z");
    }

    #[test]
    fn instant_rejects_naive_datetimes() {
        assert!(parse_instant("2026-01-01T00:00:00").is_none());
        assert!(parse_instant("not a time").is_none());
    }
}
