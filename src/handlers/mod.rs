pub mod favorites;
pub mod fallback;
pub mod health;
pub mod users;
pub mod weather;
