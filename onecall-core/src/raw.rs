//! Wire-shaped records. Field names are the JSON keys, values are kept
//! exactly as the API sent them; see [`crate::model`] for the normalized
//! forms.

use serde::{Deserialize, Serialize};

use crate::{
    model::{CurrentWeather, OneCall, Weather},
    schema::{FieldSpec, Normalize, Schema},
};

/// The `current` object of a OneCall response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentWeather {
    /// Epoch seconds.
    pub dt: u64,
    pub sunset: u64,
    pub sunrise: u64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: i32,
    /// Percent, 0-100.
    pub humidity: f64,
    pub dew_point: f64,
    /// Percent, 0-100.
    pub clouds: f64,
    pub uvi: f64,
    pub visibility: f64,
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    pub weather: Vec<Weather>,
}

impl Schema for RawCurrentWeather {
    const NAME: &'static str = "current";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("dt"),
        FieldSpec::required("sunset"),
        FieldSpec::required("sunrise"),
        FieldSpec::required("temp"),
        FieldSpec::required("feels_like"),
        FieldSpec::required("pressure"),
        FieldSpec::required("humidity"),
        FieldSpec::required("dew_point"),
        FieldSpec::required("clouds"),
        FieldSpec::required("uvi"),
        FieldSpec::required("visibility"),
        FieldSpec::required("wind_speed"),
        FieldSpec::optional("wind_gust"),
        FieldSpec::required("weather"),
    ];
}

impl Normalize for RawCurrentWeather {
    type Output = CurrentWeather;

    fn normalize(self) -> CurrentWeather {
        CurrentWeather::from(self)
    }
}

impl Schema for Weather {
    const NAME: &'static str = "weather";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id"),
        FieldSpec::required("main"),
        FieldSpec::required("description"),
        FieldSpec::required("icon"),
    ];
}

/// Top level of a OneCall response. Sections other than `current` are
/// skipped during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOneCall {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<RawCurrentWeather>,
}

impl Schema for RawOneCall {
    const NAME: &'static str = "onecall";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("lat"),
        FieldSpec::required("lon"),
        FieldSpec::required("timezone"),
        FieldSpec::required("timezone_offset"),
        FieldSpec::optional("current"),
    ];
}

impl Normalize for RawOneCall {
    type Output = OneCall;

    fn normalize(self) -> OneCall {
        OneCall::from(self)
    }
}
