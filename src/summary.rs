//! Weather summarising: pictograms and the midday-per-day forecast digest

use chrono::{Local, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

use crate::models::ForecastEntry;

pub const CLEAR: &str = "☀️";
pub const CLOUDS: &str = "☁️";
pub const RAIN: &str = "🌧️";
pub const THUNDERSTORM: &str = "⚡";
pub const SNOW: &str = "❄️";
pub const MIST: &str = "🌫️";
pub const GENERIC: &str = "🌍";

/// Number of days kept by [`summarize_forecast`]
pub const FORECAST_DAYS: usize = 5;

const MIDDAY_HOUR: i64 = 12;

/// Pick a pictogram for a weather description.
///
/// Checks run in a fixed order and the first hit wins, so "light rain and
/// clouds" is a cloud. Matching is on the text as delivered; the provider
/// sends lowercase descriptions.
#[must_use]
pub fn pictogram_for(description: &str) -> &'static str {
    if description.contains("clear") {
        CLEAR
    } else if description.contains("cloud") {
        CLOUDS
    } else if description.contains("rain") {
        RAIN
    } else if description.contains("thunderstorm") {
        THUNDERSTORM
    } else if description.contains("snow") {
        SNOW
    } else if description.contains("mist") || description.contains("fog") {
        MIST
    } else {
        GENERIC
    }
}

/// The forecast sample chosen to represent one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastSummary {
    pub date: NaiveDate,
    pub entry: ForecastEntry,
}

/// Condense a forecast into one entry per day, in the server's time zone
#[must_use]
pub fn summarize_forecast_local(entries: &[ForecastEntry]) -> Vec<DailyForecastSummary> {
    summarize_forecast(entries, &Local)
}

/// Condense a forecast into one entry per calendar day in `tz`.
///
/// Days keep the order in which they first appear and only the first
/// [`FORECAST_DAYS`] are kept. Within a day the entry whose hour is closest
/// to noon wins; on a tie the earlier entry in the input stays.
#[must_use]
pub fn summarize_forecast<Tz: TimeZone>(
    entries: &[ForecastEntry],
    tz: &Tz,
) -> Vec<DailyForecastSummary> {
    // (date, chosen entry, its distance from noon)
    let mut days: Vec<(NaiveDate, &ForecastEntry, i64)> = Vec::new();

    for entry in entries {
        let Some(time) = entry.time() else {
            continue;
        };
        let local = time.with_timezone(tz);
        let date = local.date_naive();
        let distance = (i64::from(local.hour()) - MIDDAY_HOUR).abs();

        match days.iter_mut().find(|(day, _, _)| *day == date) {
            Some(day) => {
                if distance < day.2 {
                    day.1 = entry;
                    day.2 = distance;
                }
            }
            None => days.push((date, entry, distance)),
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, entry, _)| DailyForecastSummary {
            date,
            entry: entry.clone(),
        })
        .collect()
}
