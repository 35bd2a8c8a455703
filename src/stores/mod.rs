pub mod database;
pub mod favorite_store;
pub mod user_store;
