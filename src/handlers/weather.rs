// Weather proxy endpoints

use crate::core::error::WeatherError;
use crate::core::state::AppState;
use crate::models::weather::{CurrentWeather, CurrentWeatherQuery, HistoricalWeather, HistoryQuery};
use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;

/// Current conditions for a city
///
/// GET /weather/current?city=<name>[&apiKey=<key>]
pub async fn current_weather_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CurrentWeatherQuery>,
) -> Result<Json<CurrentWeather>, WeatherError> {
    let weather = state
        .weather
        .current_weather(&params.city, params.api_key.as_deref())
        .await?;

    info!(city = %params.city, temperature = %weather.temperature, "Current weather served");

    Ok(Json(weather))
}

/// Daily aggregates for a coordinate over a date range
///
/// GET /weather/history?latitude=&longitude=&startDate=&endDate=
/// GET /weather/history?latitude=&longitude=&startYear=&startMonth=&startDay=&endYear=&endMonth=&endDay=
pub async fn historical_weather_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoricalWeather>, WeatherError> {
    let (start_date, end_date) = params.date_range()?;

    let history = state
        .weather
        .historical_weather(params.latitude, params.longitude, &start_date, &end_date)
        .await?;

    info!(
        latitude = params.latitude,
        longitude = params.longitude,
        start_date = %start_date,
        end_date = %end_date,
        "Historical weather served"
    );

    Ok(Json(history))
}
