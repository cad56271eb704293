use chrono::{NaiveDateTime, Utc};

/// 저장 시각 (UTC)
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// 응답용 UTC 타임스탬프 (`2026-01-26T15:00:00Z`)
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.and_utc().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn should_format_as_utc_without_fraction() {
        let dt = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 500)
            .unwrap();

        assert_eq!(format_datetime(dt), "2026-12-31T23:59:59Z");
    }
}
