use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::location::Location;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

const USER_AGENT: &str = concat!("tokyo-wx/", env!("CARGO_PKG_VERSION"));
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,weathercode";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_probability_max,weathercode";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("forecast service answered HTTP {0}")]
    Status(u16),

    #[error("malformed forecast payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

/// Anything that can produce a raw forecast for a location.
pub trait ForecastSource: Send + Sync {
    fn fetch(&self, location: &Location) -> Result<RawForecastPayload, FetchError>;
}

/// Open-Meteo `/forecast` response, restricted to the fields the view uses.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawForecastPayload {
    pub current_weather: CurrentWeather,

    #[serde(default)]
    pub hourly: Option<HourlySeries>,

    #[serde(default)]
    pub daily: Option<DailySeries>,

    #[serde(default)]
    pub utc_offset_seconds: i32,

    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CurrentWeather {
    pub temperature: f64,

    pub windspeed: f64,

    pub weathercode: u32,
}

/// A series of nullable samples; Open-Meteo emits `null` for gaps.
pub type Series<T> = Vec<Option<T>>;

/// Hourly samples starting at hour 0 of the first forecast day.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(default)]
    pub temperature_2m: Option<Series<f64>>,

    #[serde(default)]
    pub relativehumidity_2m: Option<Series<f64>>,

    #[serde(default)]
    pub weathercode: Option<Series<u32>>,
}

/// Daily samples, offset 0 being the reference date.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(default)]
    pub temperature_2m_max: Option<Series<f64>>,

    #[serde(default)]
    pub temperature_2m_min: Option<Series<f64>>,

    #[serde(default)]
    pub precipitation_probability_max: Option<Series<f64>>,

    #[serde(default)]
    pub weathercode: Option<Series<u32>>,
}

/// Reads `series[index]`, treating an absent series, a short series and a
/// `null` sample alike.
pub fn sample<T: Copy>(series: &Option<Series<T>>, index: usize) -> Option<T> {
    series.as_ref()?.get(index).copied().flatten()
}

#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    pub base_url: String,
    pub timezone: String,
    pub timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    fn validate_coordinates(location: &Location) -> Result<(), FetchError> {
        if !(-90.0..=90.0).contains(&location.latitude)
            || !(-180.0..=180.0).contains(&location.longitude)
        {
            return Err(FetchError::InvalidCoordinates);
        }
        Ok(())
    }
}

impl ForecastSource for OpenMeteoClient {
    #[instrument(skip_all, fields(location = location.id))]
    fn fetch(&self, location: &Location) -> Result<RawForecastPayload, FetchError> {
        Self::validate_coordinates(location)?;

        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let url = self.forecast_url();
        debug!(url = %url, "requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("temperature_unit", "celsius"),
                ("windspeed_unit", "kmh"),
                ("timezone", self.config.timezone.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let payload: RawForecastPayload = serde_json::from_str(&body)?;
        info!(
            timezone = payload.timezone.as_deref().unwrap_or("GMT"),
            hours = payload.hourly.as_ref().map_or(0, |h| h.time.len()),
            days = payload.daily.as_ref().map_or(0, |d| d.time.len()),
            "forecast received"
        );
        Ok(payload)
    }
}
