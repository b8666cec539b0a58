//! Conversion between chrono values and Excel date serial numbers

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::table::CellValue;

const SECONDS_PER_DAY: f64 = 86_400.0;

// Keeps the day count well inside i64 and chrono's supported range
const MAX_SERIAL_DAYS: f64 = 1.0e12;

/// Day zero of the 1900 date system (accounts for the 1900 leap-year bug)
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Convert an Excel serial number to a Date (whole days) or DateTime.
///
/// Serials outside chrono's calendar (or not finite) come back as the raw
/// number, the same thing Excel shows as `#####`.
pub fn serial_to_cell(serial: f64) -> CellValue {
    match serial_to_datetime(serial) {
        Some(datetime) if datetime.time() == NaiveTime::MIN => CellValue::Date(datetime.date()),
        Some(datetime) => CellValue::DateTime(datetime),
        None => CellValue::Float(serial),
    }
}

fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let days = Duration::try_days(serial.trunc() as i64)?;
    let fraction = (serial - serial.trunc()) * SECONDS_PER_DAY;
    let seconds = Duration::try_seconds(fraction.round() as i64)?;
    epoch().checked_add_signed(days)?.checked_add_signed(seconds)
}

/// Excel serial number of a date
pub fn date_to_serial(date: NaiveDate) -> f64 {
    datetime_to_serial(date.and_time(NaiveTime::MIN))
}

/// Excel serial number of a datetime
pub fn datetime_to_serial(datetime: NaiveDateTime) -> f64 {
    let elapsed = datetime - epoch();
    elapsed.num_seconds() as f64 / SECONDS_PER_DAY
}
