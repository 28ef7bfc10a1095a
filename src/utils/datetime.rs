use chrono::{DateTime, Utc};

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y %H:%M UTC").to_string()
}
