use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt::Debug;
use tracing::debug;

use crate::{
    config::Config,
    model::{CurrentWeather, OneCall, Units},
    schema::decode_one_call,
};

pub const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Sections dropped from the response since only `current` is modelled.
const EXCLUDE: &str = "minutely,hourly,daily,alerts";

#[derive(Debug, Clone, PartialEq)]
pub struct OneCallRequest {
    pub lat: f64,
    pub lon: f64,
    pub units: Units,
    pub lang: Option<String>,
}

impl OneCallRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, units: Units::default(), lang: None }
    }

    /// Request for a coordinate using the units and language stored in `config`.
    pub fn from_config(lat: f64, lon: f64, config: &Config) -> Self {
        Self { lat, lon, units: config.units, lang: config.lang.clone() }
    }
}

#[async_trait]
pub trait CurrentWeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, request: &OneCallRequest) -> Result<CurrentWeather>;
}

#[derive(Debug, Clone)]
pub struct OneCallClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OneCallClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: ONECALL_URL.to_string(),
        }
    }

    /// Point the client at another OneCall-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn query(&self, request: &OneCallRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", request.lat.to_string()),
            ("lon", request.lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", request.units.as_str().to_string()),
            ("exclude", EXCLUDE.to_string()),
        ];
        if let Some(lang) = &request.lang {
            query.push(("lang", lang.clone()));
        }
        query
    }

    /// Fetch the OneCall envelope for a coordinate. One request, no retries.
    pub async fn fetch(&self, request: &OneCallRequest) -> Result<OneCall> {
        debug!(lat = request.lat, lon = request.lon, units = %request.units, "requesting OneCall");

        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query(request))
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap (OneCall)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeatherMap OneCall response body")?;

        parse_response(status, &body)
    }
}

fn parse_response(status: StatusCode, body: &str) -> Result<OneCall> {
    if !status.is_success() {
        return Err(anyhow!(
            "OpenWeatherMap OneCall request failed with status {}: {}",
            status,
            truncate_body(body),
        ));
    }

    decode_one_call(body).context("Failed to parse OpenWeatherMap OneCall JSON")
}

#[async_trait]
impl CurrentWeatherSource for OneCallClient {
    async fn fetch_current(&self, request: &OneCallRequest) -> Result<CurrentWeather> {
        self.fetch(request)
            .await?
            .current
            .ok_or_else(|| anyhow!("OpenWeatherMap OneCall response contained no current weather"))
    }
}

/// Construct a client from the stored API key.
pub fn client_from_config(config: &Config) -> Result<OneCallClient> {
    let api_key = config.api_key()?;
    Ok(OneCallClient::new(api_key.to_owned()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
