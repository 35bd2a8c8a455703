use crate::core::error::WeatherError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    #[serde(alias = "searchedCity")]
    pub city: String,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

/// Coordinate plus an inclusive date range
///
/// Each end of the range is either a `startDate`/`endDate` string or the
/// `startYear`/`startMonth`/`startDay` components; the string wins when both
/// are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_year: Option<i32>,
    pub start_month: Option<u32>,
    pub start_day: Option<u32>,
    pub end_year: Option<i32>,
    pub end_month: Option<u32>,
    pub end_day: Option<u32>,
}

impl HistoryQuery {
    /// Resolve both ends of the range to `YYYY-MM-DD`
    pub fn date_range(&self) -> Result<(String, String), WeatherError> {
        let start = resolve_date(
            "start",
            self.start_date.as_deref(),
            (self.start_year, self.start_month, self.start_day),
        )?;
        let end = resolve_date(
            "end",
            self.end_date.as_deref(),
            (self.end_year, self.end_month, self.end_day),
        )?;

        Ok((start, end))
    }
}

fn resolve_date(
    which: &str,
    text: Option<&str>,
    parts: (Option<i32>, Option<u32>, Option<u32>),
) -> Result<String, WeatherError> {
    if let Some(text) = text {
        return parse_date(text).ok_or_else(|| {
            WeatherError::InvalidQuery(format!("{} date '{}' is not YYYY-MM-DD", which, text))
        });
    }

    match parts {
        (Some(year), Some(month), Some(day)) => Ok(format_date(year, month, day)),
        _ => Err(WeatherError::InvalidQuery(format!(
            "missing {which} date: give {which}Date or {which}Year, {which}Month and {which}Day"
        ))),
    }
}

/// Accepts `YYYY-M-D` with or without padding and normalizes it
fn parse_date(text: &str) -> Option<String> {
    let mut parts = text.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;

    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    Some(format_date(year, month, day))
}

/// `YYYY-MM-DD` with zero padded month and day
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Current conditions flattened to display strings with units appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub city: String,
    pub weather_status: String,
    pub longitude: String,
    pub latitude: String,
}

/// Daily aggregate series, relayed as the provider returns them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalWeather {
    pub max_temp: Value,
    pub min_temp: Value,
    pub precipitation: Value,
    pub rain: Value,
    pub shower: Value,
    pub snow: Value,
}
