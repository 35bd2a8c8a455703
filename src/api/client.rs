use crate::core::config::WeatherConfig;
use crate::core::error::WeatherError;
use crate::models::weather::{CurrentWeather, HistoricalWeather};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error};

/// Daily aggregates requested from the history provider, in response order
const DAILY_SERIES: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,rain_sum,showers_sum,snowfall_sum";

/// Client for the third-party weather providers
///
/// Holds one `reqwest::Client` for the whole process. No retries and no timeout
/// beyond the client default.
pub struct WeatherClient {
    client: reqwest::Client,
    current_url: String,
    history_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            current_url: config.current_url.clone(),
            history_url: config.history_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Upstream URL for current conditions in `city`
    ///
    /// `api_key` overrides the configured key when present.
    pub fn current_weather_url(&self, city: &str, api_key: Option<&str>) -> String {
        let key = api_key.unwrap_or(&self.api_key);
        let query = serde_urlencoded::to_string(&[("q", city), ("appid", key), ("units", "metric")])
            .unwrap_or_default();

        format!("{}?{}", self.current_url, query)
    }

    /// Upstream URL for daily aggregates between two `YYYY-MM-DD` dates
    pub fn history_url(&self, latitude: f64, longitude: f64, start_date: &str, end_date: &str) -> String {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
            ("daily", DAILY_SERIES.to_string()),
        ];
        let encoded = serde_urlencoded::to_string(&params[..]).unwrap_or_default();

        format!("{}?{}", self.history_url, encoded)
    }

    pub async fn current_weather(
        &self,
        city: &str,
        api_key: Option<&str>,
    ) -> Result<CurrentWeather, WeatherError> {
        let json = self.fetch_json(&self.current_weather_url(city, api_key)).await?;
        flatten_current(&json)
    }

    pub async fn historical_weather(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
    ) -> Result<HistoricalWeather, WeatherError> {
        let url = self.history_url(latitude, longitude, start_date, end_date);
        let json = self.fetch_json(&url).await?;
        extract_history(&json)
    }

    /// GET `url`, turning non-success statuses into `WeatherError::Upstream`
    async fn fetch_json(&self, url: &str) -> Result<Value, WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // hyper only records the phrase when it differs from the canonical one
            let reason = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            error!(
                status = status.as_u16(),
                reason = %reason,
                "Error response from weather API"
            );
            return Err(WeatherError::Upstream { status, reason });
        }

        let json = response.json::<Value>().await?;
        debug!(data = %json, "Weather API response");

        Ok(json)
    }
}

/// Look up `pointer` in `json` and render it as display text
///
/// Whole floats drop their fraction, so `21.0` renders as `21`.
fn text_at(json: &Value, pointer: &str) -> Result<String, WeatherError> {
    match json.pointer(pointer) {
        None | Some(Value::Null) => Err(WeatherError::MalformedResponse(pointer.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        }),
        Some(other) => Ok(other.to_string()),
    }
}

fn flatten_current(json: &Value) -> Result<CurrentWeather, WeatherError> {
    Ok(CurrentWeather {
        temperature: format!("{} °C", text_at(json, "/main/temp")?),
        humidity: format!("{} %", text_at(json, "/main/humidity")?),
        wind: format!("{} km/h", text_at(json, "/wind/speed")?),
        city: text_at(json, "/name")?,
        weather_status: text_at(json, "/weather/0/icon")?,
        longitude: text_at(json, "/coord/lon")?,
        latitude: text_at(json, "/coord/lat")?,
    })
}

/// Missing series become `null`; a missing `daily` object is malformed
fn extract_history(json: &Value) -> Result<HistoricalWeather, WeatherError> {
    let daily = json
        .get("daily")
        .filter(|daily| daily.is_object())
        .ok_or_else(|| WeatherError::MalformedResponse("daily".to_string()))?;

    let series = |name: &str| daily.get(name).cloned().unwrap_or(Value::Null);

    Ok(HistoricalWeather {
        max_temp: series("temperature_2m_max"),
        min_temp: series("temperature_2m_min"),
        precipitation: series("precipitation_sum"),
        rain: series("rain_sum"),
        shower: series("showers_sum"),
        snow: series("snowfall_sum"),
    })
}
