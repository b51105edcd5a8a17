//! Time helpers: business time zone rendering
//!
//! Storage keeps `i64` Unix millis. Rendering into the business zone happens
//! only when building API projections.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Layout of `order_date` in projections
pub const ORDER_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_zone(millis: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
}

/// `17-10-2026 15:04:05`
pub fn format_order_date(millis: i64, tz: Tz) -> String {
    to_zone(millis, tz).format(ORDER_DATE_FORMAT).to_string()
}

/// `17 Oktober 2026, 15:04 WIB`
pub fn format_long_date(millis: i64, tz: Tz) -> String {
    let local = to_zone(millis, tz);
    let month = MONTHS_ID[local.month0() as usize];
    format!(
        "{:02} {} {}, {}",
        local.day(),
        month,
        local.year(),
        local.format("%H:%M %Z")
    )
}
