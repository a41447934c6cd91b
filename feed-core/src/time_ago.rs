use chrono::{DateTime, Datelike, Utc};

/// Короткое относительное время в стиле ленты: `now`, `42s`, `5m`, `3h`,
/// `Mar 5`, `Mar 5, 2021`.
///
/// Время из будущего показывается как `now`, для некорректного timestamp
/// возвращается пустая строка.
pub fn time_ago(created_at_seconds: i64, now: DateTime<Utc>) -> String {
    let Some(created) = DateTime::from_timestamp(created_at_seconds, 0) else {
        return String::new();
    };

    let elapsed = now.signed_duration_since(created);
    let seconds = elapsed.num_seconds();
    if seconds < 1 {
        return "now".to_string();
    }
    if seconds < 60 {
        return format!("{seconds}s");
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h");
    }

    if created.year() == now.year() {
        created.format("%b %-d").to_string()
    } else {
        created.format("%b %-d, %Y").to_string()
    }
}

/// [`time_ago`] относительно текущего момента.
pub fn time_ago_now(created_at_seconds: i64) -> String {
    time_ago(created_at_seconds, Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::time_ago;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn recent_posts_use_short_units() {
        let now = at(2024, 6, 10, 12, 0, 0);
        let ts = |dt: chrono::DateTime<Utc>| dt.timestamp();

        assert_eq!(time_ago(ts(now), now), "now");
        assert_eq!(time_ago(ts(at(2024, 6, 10, 11, 59, 18)), now), "42s");
        assert_eq!(time_ago(ts(at(2024, 6, 10, 11, 55, 0)), now), "5m");
        assert_eq!(time_ago(ts(at(2024, 6, 10, 9, 0, 0)), now), "3h");
    }

    #[test]
    fn older_posts_use_dates() {
        let now = at(2024, 6, 10, 12, 0, 0);

        assert_eq!(time_ago(at(2024, 3, 5, 8, 0, 0).timestamp(), now), "Mar 5");
        assert_eq!(time_ago(at(2021, 12, 25, 8, 0, 0).timestamp(), now), "Dec 25, 2021");
    }

    #[test]
    fn future_timestamp_is_now() {
        let now = at(2024, 6, 10, 12, 0, 0);
        assert_eq!(time_ago(now.timestamp() + 30, now), "now");
    }
}
