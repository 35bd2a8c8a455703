// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{favorites, fallback, health, users, weather};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))

        // Users resource
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )

        // Favorites resource
        .route("/favorites", get(favorites::list_favorites).post(favorites::create_favorite))
        .route(
            "/favorites/{id}",
            get(favorites::get_favorite)
                .put(favorites::update_favorite)
                .delete(favorites::delete_favorite),
        )

        // Weather proxy; the GetWeather* paths are kept for older clients
        .route("/weather/current", get(weather::current_weather_handler))
        .route("/weather/history", get(weather::historical_weather_handler))
        .route("/weather/GetWeather", get(weather::current_weather_handler))
        .route("/weather/GetWeatherHistory", get(weather::historical_weather_handler))

        .fallback(fallback::fallback_handler)

        .with_state(state)
}
