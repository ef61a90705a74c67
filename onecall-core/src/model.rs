use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};
use tracing::warn;

use crate::{
    convert::{epoch_to_utc, percent_to_fraction},
    raw::{RawCurrentWeather, RawOneCall},
};

/// Unit system requested from the API. Values come back already converted;
/// nothing in this crate rescales them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, metre/sec.
    Standard,
    /// Celsius, metre/sec.
    #[default]
    Metric,
    /// Fahrenheit, miles/hour.
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Standard, Units::Metric, Units::Imperial]
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Units::Standard | Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: standard, metric, imperial."
            )),
        }
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Condition code, e.g. 500 for light rain.
    pub id: u32,
    /// Group of parameters (Rain, Snow, Clouds, ...).
    pub main: String,
    pub description: String,
    /// Icon code, e.g. "10d".
    pub icon: String,
}

impl Weather {
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Current conditions at a location, normalized from the `current` object of
/// a OneCall response.
///
/// Timestamps are UTC. Humidity and cloudiness are fractions, so 57 %
/// humidity reads back as `0.57`. Everything else is in whatever unit system
/// the request asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    current_time: DateTime<Utc>,
    sunset: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    temperature: f64,
    feels_like: f64,
    pressure: i32,
    humidity: f64,
    dew_point: f64,
    cloudiness: f64,
    uvi: f64,
    visibility: f64,
    wind_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_gust: Option<f64>,
    weather: Vec<Weather>,
}

impl CurrentWeather {
    /// Time of the observation.
    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    pub fn sunset(&self) -> DateTime<Utc> {
        self.sunset
    }

    pub fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Human perception of the temperature.
    pub fn feels_like(&self) -> f64 {
        self.feels_like
    }

    /// Atmospheric pressure at sea level, hPa.
    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    /// Relative humidity, 0.0 - 1.0.
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Temperature below which water droplets begin to condense.
    pub fn dew_point(&self) -> f64 {
        self.dew_point
    }

    /// Cloud cover, 0.0 - 1.0.
    pub fn cloudiness(&self) -> f64 {
        self.cloudiness
    }

    pub fn uvi(&self) -> f64 {
        self.uvi
    }

    /// Average visibility, metres.
    pub fn visibility(&self) -> f64 {
        self.visibility
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// `None` when the API reported no gusts.
    pub fn wind_gust(&self) -> Option<f64> {
        self.wind_gust
    }

    pub fn weather(&self) -> &[Weather] {
        &self.weather
    }
}

impl From<RawCurrentWeather> for CurrentWeather {
    fn from(raw: RawCurrentWeather) -> Self {
        warn_if_not_percentage("humidity", raw.humidity);
        warn_if_not_percentage("clouds", raw.clouds);

        Self {
            current_time: epoch_to_utc(raw.dt),
            sunset: epoch_to_utc(raw.sunset),
            sunrise: epoch_to_utc(raw.sunrise),
            temperature: raw.temp,
            feels_like: raw.feels_like,
            pressure: raw.pressure,
            humidity: percent_to_fraction(raw.humidity),
            dew_point: raw.dew_point,
            cloudiness: percent_to_fraction(raw.clouds),
            uvi: raw.uvi,
            visibility: raw.visibility,
            wind_speed: raw.wind_speed,
            wind_gust: raw.wind_gust,
            weather: raw.weather,
        }
    }
}

// Out-of-range values are kept as they are; the warning is the only effect.
fn warn_if_not_percentage(field: &str, value: f64) {
    if !(0.0..=100.0).contains(&value) {
        warn!(field, value, "percentage outside 0..=100, fraction will leave 0..=1");
    }
}

/// The envelope of a OneCall response with only the `current` section kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneCall {
    pub lat: f64,
    pub lon: f64,
    /// IANA zone name, e.g. "Europe/Vilnius".
    pub timezone: String,
    /// Shift in seconds from UTC.
    pub timezone_offset: i32,
    /// Absent when the request excluded `current`.
    pub current: Option<CurrentWeather>,
}

impl From<RawOneCall> for OneCall {
    fn from(raw: RawOneCall) -> Self {
        Self {
            lat: raw.lat,
            lon: raw.lon,
            timezone: raw.timezone,
            timezone_offset: raw.timezone_offset,
            current: raw.current.map(CurrentWeather::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_sample() -> RawCurrentWeather {
        RawCurrentWeather {
            dt: 3600,
            sunset: 1_684_951_915,
            sunrise: 1_684_926_645,
            temp: 292.55,
            feels_like: 292.87,
            pressure: 1014,
            humidity: 57.0,
            dew_point: 290.16,
            clouds: 0.0,
            uvi: 9.25,
            visibility: 10000.0,
            wind_speed: 3.13,
            wind_gust: None,
            weather: vec![Weather {
                id: 800,
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
        }
    }

    #[test]
    fn normalizes_times_and_fractions() {
        let cw = CurrentWeather::from(raw_sample());

        assert_eq!(cw.current_time().to_rfc3339(), "1970-01-01T01:00:00+00:00");
        assert_eq!(cw.sunrise().timestamp(), 1_684_926_645);
        assert_eq!(cw.sunset().timestamp(), 1_684_951_915);
        assert_eq!(cw.humidity(), 0.57);
        assert_eq!(cw.cloudiness(), 0.0);
    }

    #[test]
    fn passes_other_fields_through() {
        let cw = CurrentWeather::from(raw_sample());

        assert_eq!(cw.temperature(), 292.55);
        assert_eq!(cw.feels_like(), 292.87);
        assert_eq!(cw.pressure(), 1014);
        assert_eq!(cw.dew_point(), 290.16);
        assert_eq!(cw.uvi(), 9.25);
        assert_eq!(cw.visibility(), 10000.0);
        assert_eq!(cw.wind_speed(), 3.13);
        assert_eq!(cw.weather().len(), 1);
        assert_eq!(cw.weather()[0].main, "Clear");
    }

    #[test]
    fn wind_gust_absent_or_exact() {
        assert_eq!(CurrentWeather::from(raw_sample()).wind_gust(), None);

        let raw = RawCurrentWeather { wind_gust: Some(7.42), ..raw_sample() };
        assert_eq!(CurrentWeather::from(raw).wind_gust(), Some(7.42));
    }

    #[test]
    fn empty_weather_list_is_kept() {
        let raw = RawCurrentWeather { weather: vec![], ..raw_sample() };
        let cw = CurrentWeather::from(raw);

        assert!(cw.weather().is_empty());
    }

    #[test]
    fn out_of_range_percentages_pass_through() {
        let raw = RawCurrentWeather { humidity: 120.0, clouds: -5.0, ..raw_sample() };
        let cw = CurrentWeather::from(raw);

        assert_eq!(cw.humidity(), 1.2);
        assert_eq!(cw.cloudiness(), -0.05);
    }

    #[test]
    fn snapshot_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CurrentWeather>();
    }

    #[test]
    fn one_call_without_current() {
        let raw = RawOneCall {
            lat: 54.69,
            lon: 25.28,
            timezone: "Europe/Vilnius".into(),
            timezone_offset: 10800,
            current: None,
        };
        let oc = OneCall::from(raw);

        assert!(oc.current.is_none());
        assert_eq!(oc.timezone, "Europe/Vilnius");
    }

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!("Imperial".parse::<Units>().unwrap(), Units::Imperial);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("furlongs").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn unit_labels() {
        assert_eq!(Units::default(), Units::Metric);
        assert_eq!(Units::Imperial.temperature_label(), "°F");
        assert_eq!(Units::Imperial.speed_label(), "mph");
        assert_eq!(Units::Standard.speed_label(), "m/s");
    }

    #[test]
    fn icon_url_uses_icon_code() {
        let w = &raw_sample().weather[0];
        assert_eq!(w.icon_url(), "https://openweathermap.org/img/wn/01d@2x.png");
    }
}
