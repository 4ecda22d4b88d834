//! Text rendering of the current-weather card and the forecast strip.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use std::fmt::Write;
use weather_core::{CurrentWeather, DailySummary, UnitSystem, WeatherReport};

const COLUMN_WIDTH: usize = 14;

/// Glyph for an OpenWeather icon code such as "10d".
pub fn condition_glyph(icon: &str) -> &'static str {
    match icon.get(..2).unwrap_or_default() {
        "01" => "☀",
        "02" => "⛅",
        "03" | "04" => "☁",
        "09" => "🌧",
        "10" => "🌦",
        "11" => "⛈",
        "13" => "❄",
        "50" => "🌫",
        _ => "·",
    }
}

fn clock<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Label for a forecast day, e.g. "Sat, Oct 18". Falls back to the raw text.
pub fn day_label(dt_txt: &str) -> String {
    NaiveDateTime::parse_from_str(dt_txt, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| dt_txt.to_string())
}

pub fn render_current<Tz: TimeZone>(current: &CurrentWeather, units: UnitSystem, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let label = units.temperature_label();
    let mut out = String::new();

    let (glyph, description) = current
        .condition()
        .map(|w| (condition_glyph(&w.icon), w.description.as_str()))
        .unwrap_or(("·", "no description"));

    let _ = writeln!(out, "{}", current.name);
    let _ = writeln!(out, "{glyph}  {description}");
    let _ = writeln!(
        out,
        "  Temperature  {} {label} (feels like {} {label})",
        current.main.temp, current.main.feels_like
    );
    let _ = writeln!(out, "  Humidity     {}%", current.main.humidity);
    let _ = writeln!(
        out,
        "  Wind         {} {}",
        current.wind.speed,
        units.speed_label()
    );
    let _ = writeln!(out, "  Pressure     {} hPa", current.main.pressure);
    if let Some(metres) = current.visibility {
        let _ = writeln!(out, "  Visibility   {} km", (metres / 1000.0).round());
    }
    let _ = writeln!(
        out,
        "  Sunrise {}   Sunset {}",
        clock(current.sys.sunrise, tz),
        clock(current.sys.sunset, tz)
    );

    out
}

pub fn render_forecast(days: &[DailySummary], units: UnitSystem) -> String {
    if days.is_empty() {
        return String::new();
    }

    let rows: [Vec<String>; 4] = [
        days.iter().map(|d| day_label(&d.dt_txt)).collect(),
        days.iter()
            .map(|d| condition_glyph(d.condition().map_or("", |w| w.icon.as_str())).to_string())
            .collect(),
        days.iter()
            .map(|d| format!("{}{}", d.main.temp.round(), units.temperature_label()))
            .collect(),
        days.iter()
            .map(|d| d.condition().map(|w| w.main.clone()).unwrap_or_default())
            .collect(),
    ];

    let mut out = String::new();
    for row in rows {
        let line: String = row
            .iter()
            .map(|cell| format!("{cell:<COLUMN_WIDTH$}"))
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn render_report<Tz: TimeZone>(report: &WeatherReport, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = render_current(&report.current, report.units, tz);
    let strip = render_forecast(&report.forecast, report.units);
    if !strip.is_empty() {
        out.push('\n');
        out.push_str(&strip);
    }
    out
}
