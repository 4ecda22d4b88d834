//! Reduce a 3-hourly forecast to one entry per day.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

use crate::model::{DailySummary, ForecastSample};

/// How many days the forecast strip shows.
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Local hour of the sample that stands for a whole day.
const REPRESENTATIVE_HOUR: u32 = 12;

/// Pick the noon sample of each calendar day, in input order, up to `max_days`.
///
/// Dates and hours are taken in `tz`. A day without a sample at exactly the
/// representative hour is left out, so fewer than `max_days` entries may come
/// back. Days are compared by full date, so the same day-of-month in two
/// different months counts as two days.
pub fn summarize<Tz: TimeZone>(
    samples: &[ForecastSample],
    max_days: usize,
    tz: &Tz,
) -> Vec<DailySummary> {
    let mut days = Vec::with_capacity(max_days.min(samples.len()));
    let mut last_date: Option<NaiveDate> = None;

    for sample in samples {
        if days.len() >= max_days {
            break;
        }

        let Some(local) = DateTime::from_timestamp(sample.dt, 0).map(|utc| utc.with_timezone(tz))
        else {
            log::debug!("skipping forecast sample with out-of-range timestamp {}", sample.dt);
            continue;
        };

        if local.hour() != REPRESENTATIVE_HOUR {
            continue;
        }

        let date = local.date_naive();
        if last_date == Some(date) {
            continue;
        }

        last_date = Some(date);
        days.push(DailySummary::from(sample));
    }

    days
}
