//! Human-friendly text output.

use chrono::{DateTime, Utc};
use onecall_core::{CurrentWeather, OneCall, Units};
use std::fmt::{self, Write};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn time(ts: DateTime<Utc>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn current(cw: &CurrentWeather, units: Units) -> String {
    CurrentView { cw, units }.to_string()
}

/// Labelled lines for one snapshot.
struct CurrentView<'a> {
    cw: &'a CurrentWeather,
    units: Units,
}

impl fmt::Display for CurrentView<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_current(out, self.cw, self.units)
    }
}

fn write_current(out: &mut impl Write, cw: &CurrentWeather, units: Units) -> fmt::Result {
    let t = units.temperature_label();
    let v = units.speed_label();

    let conditions = if cw.weather().is_empty() {
        "-".to_string()
    } else {
        cw.weather().iter().map(|w| w.description.as_str()).collect::<Vec<_>>().join(", ")
    };
    let gust = cw.wind_gust().map_or_else(|| "-".to_string(), |g| format!("{g:.1} {v}"));

    writeln!(out, "  Observed:    {}", time(cw.current_time()))?;
    writeln!(out, "  Conditions:  {conditions}")?;
    writeln!(
        out,
        "  Temperature: {:.1} {t} (feels like {:.1} {t})",
        cw.temperature(),
        cw.feels_like()
    )?;
    writeln!(out, "  Dew point:   {:.1} {t}", cw.dew_point())?;
    writeln!(out, "  Humidity:    {}", percent(cw.humidity()))?;
    writeln!(out, "  Cloudiness:  {}", percent(cw.cloudiness()))?;
    writeln!(out, "  Pressure:    {} hPa", cw.pressure())?;
    writeln!(out, "  Wind:        {:.1} {v}, gusts {gust}", cw.wind_speed())?;
    writeln!(out, "  UV index:    {:.1}", cw.uvi())?;
    writeln!(out, "  Visibility:  {:.0} m", cw.visibility())?;
    writeln!(out, "  Sunrise:     {}", time(cw.sunrise()))?;
    writeln!(out, "  Sunset:      {}", time(cw.sunset()))
}

pub fn one_call(oc: &OneCall, units: Units) -> String {
    let mut out = format!(
        "Location {}, {} ({}, UTC{:+}h)\n",
        oc.lat,
        oc.lon,
        oc.timezone,
        oc.timezone_offset as f64 / 3600.0
    );
    match &oc.current {
        Some(cw) => out.push_str(&current(cw, units)),
        None => out.push_str("  No current weather in response\n"),
    }
    out
}
