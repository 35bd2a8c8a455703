// Application state (AppState)

use crate::api::client::WeatherClient;
use crate::core::config::Config;
use crate::stores::{database::Database, favorite_store::FavoriteStore, user_store::UserStore};
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
///
/// Cloned into every request; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Users resource storage
    pub users: UserStore,

    /// Favorites resource storage
    pub favorites: FavoriteStore,

    /// Upstream weather providers
    pub weather: Arc<WeatherClient>,

    /// Underlying connection pool, used for health checks
    pub database: Database,
}

impl AppState {
    pub fn new(config: &Config, database: Database) -> Result<Self> {
        let weather = Arc::new(WeatherClient::new(&config.weather)?);

        Ok(Self {
            users: UserStore::new(database.clone()),
            favorites: FavoriteStore::new(database.clone()),
            weather,
            database,
        })
    }
}

/// State backed by a fresh in-memory database and weather URLs under `weather_base`
#[cfg(test)]
pub(crate) async fn create_test_state(weather_base: &str) -> Arc<AppState> {
    let database = Database::in_memory().await.unwrap();
    let config = crate::core::config::test_config(weather_base);

    Arc::new(AppState::new(&config, database).unwrap())
}
