//! Selection of the hourly entries worth showing: the rest of today plus all
//! of tomorrow, in the caller's calendar.

use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone, Timelike};

use crate::model::HourForecast;

/// Longest stretch of local time a clock change can skip (Samoa dropped a
/// whole day in 2011).
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Half-open window `[start of the current hour, midnight after tomorrow)`.
///
/// The start is taken on the instant line, so a repeated hour after clocks go
/// back keeps the offset `now` is in. When midnight is skipped by a forward
/// change the window ends at the first local time that exists after the gap.
/// `None` only when the dates overflow chrono's range.
pub fn hourly_window<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let into_hour = Duration::minutes(i64::from(now.minute()))
        + Duration::seconds(i64::from(now.second()))
        + Duration::nanoseconds(i64::from(now.nanosecond()));
    let start = now.clone().checked_sub_signed(into_hour)?;

    let midnight = now.date_naive().checked_add_days(Days::new(2))?.and_time(NaiveTime::MIN);
    let tz = now.timezone();
    let end = (0..=MAX_GAP_MINUTES).find_map(|minutes| {
        let local = midnight.checked_add_signed(Duration::minutes(minutes))?;
        tz.from_local_datetime(&local).earliest()
    })?;

    Some((start, end))
}

/// Keep the hours inside [`hourly_window`] for `now`, preserving order.
pub fn current_and_next_day<Tz: TimeZone>(
    hours: Vec<HourForecast>,
    now: &DateTime<Tz>,
) -> Vec<HourForecast> {
    let Some((start, end)) = hourly_window(now) else {
        return Vec::new();
    };

    hours
        .into_iter()
        .filter(|hour| {
            let instant = hour.instant();
            instant >= start && instant < end
        })
        .collect()
}
